//! Derived views over repository snapshots.
//!
//! Everything in this module is a pure function of its inputs: no I/O, no clock reads (callers
//! pass `today`), and empty inputs produce zeroed aggregates rather than errors.
//!
//! Percentages follow one rule everywhere: `round(part / total * 100)` rounding halves up, and
//! zero when `total` is zero. See [`percentage`].

pub mod daily;
pub mod filters;
pub mod housekeeping;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::db::models::{
    housekeeping::{HousekeepingTask, TaskStatus},
    reservations::{Reservation, ReservationStatus},
    rooms::{Room, RoomStatus},
};

pub use daily::{DailyOccupancy, DailyRevenue, MAX_REPORT_DAYS, occupancy_by_day, revenue_by_day, trailing_days};
pub use filters::{ReservationFilter, TaskFilter};
pub use housekeeping::{PriorityCounts, TaskBuckets, rooms_needing_cleaning, task_buckets};

/// `round(part / total * 100)` with halves rounded up; 0 when `total` is 0
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (200 * part as u128 + total as u128) / (2 * total as u128);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

fn count_occupied(rooms: &[Room]) -> usize {
    rooms.iter().filter(|room| room.status == RoomStatus::Occupied).count()
}

/// Share of rooms currently occupied, as a whole percentage in `[0, 100]`
pub fn occupancy_rate(rooms: &[Room]) -> u32 {
    percentage(count_occupied(rooms), rooms.len())
}

/// Room board tallies by occupancy status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomStatusCounts {
    pub available: usize,
    pub occupied: usize,
    pub cleaning: usize,
    pub maintenance: usize,
}

pub fn room_status_counts(rooms: &[Room]) -> RoomStatusCounts {
    rooms.iter().fold(RoomStatusCounts::default(), |mut counts, room| {
        match room.status {
            RoomStatus::Available => counts.available += 1,
            RoomStatus::Occupied => counts.occupied += 1,
            RoomStatus::Cleaning => counts.cleaning += 1,
            RoomStatus::Maintenance => counts.maintenance += 1,
        }
        counts
    })
}

/// Confirmed reservations arriving on `today`
pub fn arrivals_on(reservations: &[Reservation], today: NaiveDate) -> Vec<Reservation> {
    reservations
        .iter()
        .filter(|r| r.check_in == today && r.status == ReservationStatus::Confirmed)
        .cloned()
        .collect()
}

/// Confirmed reservations departing on `today`
pub fn departures_on(reservations: &[Reservation], today: NaiveDate) -> Vec<Reservation> {
    reservations
        .iter()
        .filter(|r| r.check_out == today && r.status == ReservationStatus::Confirmed)
        .cloned()
        .collect()
}

/// Occupancy figures for one room type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomTypeBreakdown {
    #[serde(rename = "type")]
    pub room_type: String,
    pub total: usize,
    pub occupied: usize,
    pub available: usize,
    pub occupancy_rate: u32,
}

/// Group rooms by type, in the order each type is first seen
pub fn room_type_breakdown(rooms: &[Room]) -> Vec<RoomTypeBreakdown> {
    let mut types: Vec<&str> = Vec::new();
    for room in rooms {
        if !types.contains(&room.room_type.as_str()) {
            types.push(&room.room_type);
        }
    }

    types
        .into_iter()
        .map(|room_type| {
            let of_type: Vec<&Room> = rooms.iter().filter(|room| room.room_type == room_type).collect();
            let occupied = of_type.iter().filter(|room| room.status == RoomStatus::Occupied).count();
            let available = of_type.iter().filter(|room| room.status == RoomStatus::Available).count();
            RoomTypeBreakdown {
                room_type: room_type.to_string(),
                total: of_type.len(),
                occupied,
                available,
                occupancy_rate: percentage(occupied, of_type.len()),
            }
        })
        .collect()
}

/// Headline figures for the reports page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub current_occupancy_rate: u32,
    pub occupied_rooms: usize,
    pub total_rooms: usize,
    pub total_revenue: Decimal,
    pub total_bookings: usize,
    /// Whole currency units, halves rounded up
    pub avg_booking_value: Decimal,
}

pub fn period_stats(rooms: &[Room], reservations: &[Reservation]) -> PeriodStats {
    let booked: Vec<&Reservation> = reservations
        .iter()
        .filter(|r| r.status != ReservationStatus::Cancelled)
        .collect();
    let total_revenue: Decimal = booked.iter().map(|r| r.total_amount).sum();
    let avg_booking_value = if booked.is_empty() {
        Decimal::ZERO
    } else {
        (total_revenue / Decimal::from(booked.len())).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    };

    PeriodStats {
        current_occupancy_rate: occupancy_rate(rooms),
        occupied_rooms: count_occupied(rooms),
        total_rooms: rooms.len(),
        total_revenue,
        total_bookings: booked.len(),
        avg_booking_value,
    }
}

/// Everything the dashboard shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_rooms: usize,
    pub occupied_rooms: usize,
    pub occupancy_rate: u32,
    pub pending_tasks: usize,
    pub arrivals: Vec<Reservation>,
    pub departures: Vec<Reservation>,
}

/// Occupancy and revenue series for a trailing window, plus the per-type breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub stats: PeriodStats,
    pub occupancy: Vec<DailyOccupancy>,
    pub revenue: Vec<DailyRevenue>,
    pub room_types: Vec<RoomTypeBreakdown>,
}

/// A point-in-time copy of all three collections
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub rooms: Vec<Room>,
    pub reservations: Vec<Reservation>,
    pub tasks: Vec<HousekeepingTask>,
}

impl Snapshot {
    pub fn dashboard(&self, today: NaiveDate) -> DashboardSummary {
        DashboardSummary {
            total_rooms: self.rooms.len(),
            occupied_rooms: count_occupied(&self.rooms),
            occupancy_rate: occupancy_rate(&self.rooms),
            pending_tasks: self.tasks.iter().filter(|t| t.status == TaskStatus::Pending).count(),
            arrivals: arrivals_on(&self.reservations, today),
            departures: departures_on(&self.reservations, today),
        }
    }

    pub fn period_report(&self, today: NaiveDate, days: u32) -> PeriodReport {
        PeriodReport {
            stats: period_stats(&self.rooms, &self.reservations),
            occupancy: occupancy_by_day(&self.rooms, &self.reservations, today, days),
            revenue: revenue_by_day(&self.reservations, today, days),
            room_types: room_type_breakdown(&self.rooms),
        }
    }
}
