//! Housekeeping task aggregates.

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::db::models::{
    housekeeping::{HousekeepingTask, TaskPriority, TaskStatus},
    rooms::{CleaningStatus, Room, RoomStatus},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBuckets {
    pub pending: usize,
    pub in_progress: usize,
    /// Completed tasks whose `completedAt` falls on `today` in the caller's time zone
    pub completed_today: usize,
    pub by_priority: PriorityCounts,
}

/// Count tasks by status and priority.
///
/// `completedAt` is converted to `tz` before comparing its date with `today`, so `today` must be
/// a date in that same zone.
pub fn task_buckets<Tz: TimeZone>(tasks: &[HousekeepingTask], today: NaiveDate, tz: &Tz) -> TaskBuckets {
    tasks.iter().fold(TaskBuckets::default(), |mut buckets, task| {
        match task.status {
            TaskStatus::Pending => buckets.pending += 1,
            TaskStatus::InProgress => buckets.in_progress += 1,
            TaskStatus::Completed => {
                if task.completed_at.is_some_and(|at| at.with_timezone(tz).date_naive() == today) {
                    buckets.completed_today += 1;
                }
            }
        }
        match task.priority {
            TaskPriority::Low => buckets.by_priority.low += 1,
            TaskPriority::Medium => buckets.by_priority.medium += 1,
            TaskPriority::High => buckets.by_priority.high += 1,
        }
        buckets
    })
}

/// Rooms that are occupied or dirty
pub fn rooms_needing_cleaning(rooms: &[Room]) -> Vec<Room> {
    rooms
        .iter()
        .filter(|room| room.status == RoomStatus::Occupied || room.cleaning_status == CleaningStatus::Dirty)
        .cloned()
        .collect()
}
