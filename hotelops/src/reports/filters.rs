//! List filters used by the reservations and housekeeping boards.

use serde::Deserialize;

use crate::db::models::{
    housekeeping::{HousekeepingTask, TaskPriority, TaskStatus},
    reservations::{Reservation, ReservationStatus},
    rooms::Room,
};

/// Free-text search plus an optional status
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationFilter {
    /// Case-insensitive match on guest name or email, or a substring of the room number
    pub search: Option<String>,
    pub status: Option<ReservationStatus>,
}

impl ReservationFilter {
    pub fn matches(&self, reservation: &Reservation, rooms: &[Room]) -> bool {
        let status_ok = self.status.is_none_or(|status| reservation.status == status);
        status_ok && self.matches_search(reservation, rooms)
    }

    fn matches_search(&self, reservation: &Reservation, rooms: &[Room]) -> bool {
        let Some(term) = self.search.as_deref().map(str::trim).filter(|t| !t.is_empty()) else {
            return true;
        };
        let needle = term.to_lowercase();
        if reservation.guest_name.to_lowercase().contains(&needle) || reservation.email.to_lowercase().contains(&needle) {
            return true;
        }
        reservation
            .room_id
            .as_deref()
            .and_then(|room_id| rooms.iter().find(|room| room.id == room_id))
            .is_some_and(|room| room.number.contains(term))
    }

    pub fn apply(&self, reservations: &[Reservation], rooms: &[Room]) -> Vec<Reservation> {
        reservations.iter().filter(|r| self.matches(r, rooms)).cloned().collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

impl TaskFilter {
    pub fn matches(&self, task: &HousekeepingTask) -> bool {
        self.status.is_none_or(|status| task.status == status) && self.priority.is_none_or(|priority| task.priority == priority)
    }

    pub fn apply(&self, tasks: &[HousekeepingTask]) -> Vec<HousekeepingTask> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}
