//! Builders for tests.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::Hotel;
use crate::db::{
    fixtures::Fixtures,
    handlers::{MemorySettings, MemoryStore},
    models::{
        housekeeping::{HousekeepingTask, TaskPriority, TaskStatus},
        reservations::{Reservation, ReservationStatus},
        rooms::{CleaningStatus, Room, RoomStatus},
    },
};

pub fn date(value: &str) -> NaiveDate {
    value.parse().expect("test dates are YYYY-MM-DD")
}

/// A clean first-floor room priced at 100
pub fn room(id: &str, number: &str, room_type: &str, status: RoomStatus) -> Room {
    Room {
        id: id.to_string(),
        number: number.to_string(),
        room_type: room_type.to_string(),
        floor: 1,
        price: Decimal::from(100),
        status,
        cleaning_status: CleaningStatus::Clean,
        features: Vec::new(),
    }
}

/// A confirmed reservation with no room assigned
pub fn reservation(id: &str, check_in: &str, check_out: &str, total: i64) -> Reservation {
    Reservation {
        id: id.to_string(),
        guest_name: format!("Guest {id}"),
        email: format!("guest{id}@example.com"),
        phone: String::new(),
        check_in: date(check_in),
        check_out: date(check_out),
        room_id: None,
        status: ReservationStatus::Confirmed,
        total_amount: Decimal::from(total),
        notes: String::new(),
    }
}

pub fn task(id: &str, status: TaskStatus, priority: TaskPriority) -> HousekeepingTask {
    HousekeepingTask {
        id: id.to_string(),
        room_id: None,
        assigned_to: "Housekeeping Staff".to_string(),
        status,
        priority,
        completed_at: None,
    }
}

/// An in-memory hotel with no latency, seeded with the given records
pub fn test_hotel(rooms: Vec<Room>, reservations: Vec<Reservation>, tasks: Vec<HousekeepingTask>) -> Hotel {
    let store = MemoryStore::new(Fixtures {
        rooms,
        reservations,
        tasks,
    });
    Hotel::in_memory(&store, MemorySettings::instant())
}
