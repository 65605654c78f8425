use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use hotelops::{
    Config, Hotel,
    config::Args,
    db::models::{
        housekeeping::{HousekeepingTask, TaskPriority, TaskStatus},
        reservations::ReservationStatus,
        rooms::{CleaningStatus, Room, RoomStatus},
    },
    front_desk::GuestDetails,
    reports::{self, MAX_REPORT_DAYS, ReservationFilter, TaskFilter},
    telemetry,
};
use serde::Serialize;

/// Hotel operations: room board, reservations, housekeeping and reports
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: Args,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Today's headline figures, arrivals and departures (default)
    Dashboard,
    /// Occupancy and revenue over a trailing window
    Report {
        /// Window length in days; defaults to `report_days` from the config
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_REPORT_DAYS)))]
        days: Option<u32>,
    },
    /// The room board with per-status counts
    Rooms,
    /// Change a room's status from the room board
    RoomStatus {
        room_id: String,
        status: RoomStatus,
        /// Also set the cleaning status
        #[arg(long)]
        cleaning: Option<CleaningStatus>,
    },
    /// Reservations, optionally filtered
    Reservations {
        /// Guest name, email or room number
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<ReservationStatus>,
    },
    /// Housekeeping tasks, optionally filtered, with their buckets
    Tasks {
        #[arg(long)]
        status: Option<TaskStatus>,
        #[arg(long)]
        priority: Option<TaskPriority>,
    },
    /// Rooms that are occupied or dirty
    Cleaning,
    /// Book a room for a guest
    Book {
        room_id: String,
        #[arg(long)]
        guest: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        check_in: NaiveDate,
        #[arg(long)]
        check_out: NaiveDate,
    },
    /// Check a guest in
    CheckIn { reservation_id: String },
    /// Check a guest out
    CheckOut { reservation_id: String },
    /// Move a housekeeping task to a new status
    TaskStatus { task_id: String, status: TaskStatus },
    /// Create a housekeeping task for a room
    QuickTask {
        room_id: String,
        #[arg(long)]
        priority: Option<TaskPriority>,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskBoard {
    buckets: reports::TaskBuckets,
    tasks: Vec<HousekeepingTask>,
}

#[derive(Serialize)]
struct RoomBoard {
    counts: reports::RoomStatusCounts,
    rooms: Vec<Room>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.args)?;

    if cli.args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    telemetry::init_telemetry()?;
    tracing::debug!("{:?}", cli);

    let hotel = Hotel::from_config(&config)?;
    let today = Local::now().date_naive();
    let desk = hotel.front_desk();

    match cli.command.unwrap_or(Command::Dashboard) {
        Command::Dashboard => print_json(&hotel.snapshot().await?.dashboard(today)),
        Command::Report { days } => {
            let days = days.unwrap_or(config.report_days);
            print_json(&hotel.snapshot().await?.period_report(today, days))
        }
        Command::Rooms => {
            let rooms = hotel.rooms().list().await?;
            print_json(&RoomBoard {
                counts: reports::room_status_counts(&rooms),
                rooms,
            })
        }
        Command::RoomStatus {
            room_id,
            status,
            cleaning,
        } => print_json(&desk.set_room_status(&room_id, status, cleaning).await?),
        Command::Reservations { search, status } => {
            let (reservations, rooms) = tokio::try_join!(hotel.reservations().list(), hotel.rooms().list())?;
            print_json(&ReservationFilter { search, status }.apply(&reservations, &rooms))
        }
        Command::Tasks { status, priority } => {
            let tasks = hotel.tasks().list().await?;
            print_json(&TaskBoard {
                buckets: reports::task_buckets(&tasks, today, &Local),
                tasks: TaskFilter { status, priority }.apply(&tasks),
            })
        }
        Command::Cleaning => print_json(&reports::rooms_needing_cleaning(&hotel.rooms().list().await?)),
        Command::Book {
            room_id,
            guest,
            email,
            phone,
            check_in,
            check_out,
        } => {
            let guest = GuestDetails {
                guest_name: guest,
                email,
                phone,
                check_in,
                check_out,
                notes: String::new(),
            };
            print_json(&desk.book_room(&room_id, &guest).await?)
        }
        Command::CheckIn { reservation_id } => print_json(&desk.check_in(&reservation_id).await?),
        Command::CheckOut { reservation_id } => print_json(&desk.check_out(&reservation_id).await?),
        Command::TaskStatus { task_id, status } => print_json(&desk.set_task_status(&task_id, status).await?),
        Command::QuickTask { room_id, priority } => print_json(&desk.create_quick_task(&room_id, priority).await?),
    }
}
