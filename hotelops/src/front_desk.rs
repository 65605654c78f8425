//! Front-desk workflows.
//!
//! Each workflow updates the primary record first and then brings the referenced room in line.
//! A room that no longer exists is skipped with a warning; any other failure is returned as is,
//! so a failed room update after a successful primary update leaves the primary change in place.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::Hotel;
use crate::db::{
    errors::{Result, StoreError},
    models::{
        housekeeping::{HousekeepingTask, TaskCreate, TaskPriority, TaskStatus, TaskUpdate},
        reservations::{Reservation, ReservationCreate, ReservationStatus, ReservationUpdate},
        rooms::{CleaningStatus, Room, RoomStatus, RoomUpdate},
    },
};
use crate::types::abbrev_id;

/// Staff name given to tasks created from the housekeeping board
pub const DEFAULT_ASSIGNEE: &str = "Housekeeping Staff";

/// Guest details captured by the quick-booking form
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetails {
    pub guest_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

/// Workflows spanning more than one collection, borrowed from a [`Hotel`]
pub struct FrontDesk<'h> {
    hotel: &'h Hotel,
}

impl<'h> FrontDesk<'h> {
    pub(crate) fn new(hotel: &'h Hotel) -> Self {
        Self { hotel }
    }

    /// Book a room: create a confirmed reservation priced from the room, then mark it occupied
    #[instrument(skip(self, room_id, guest), fields(room_id = %abbrev_id(room_id)), err)]
    pub async fn book_room(&self, room_id: &str, guest: &GuestDetails) -> Result<Reservation> {
        if guest.check_out <= guest.check_in {
            return Err(StoreError::validation(format!(
                "check-out ({}) must be after check-in ({})",
                guest.check_out, guest.check_in
            )));
        }

        let room = self.hotel.rooms().get_by_id(room_id).await?;
        let request = ReservationCreate {
            guest_name: Some(guest.guest_name.clone()),
            email: Some(guest.email.clone()),
            phone: Some(guest.phone.clone()),
            room_id: Some(room.id.clone()),
            status: Some(ReservationStatus::Confirmed),
            notes: Some(guest.notes.clone()),
            ..ReservationCreate::new(guest.check_in, guest.check_out)
        }
        .priced_at(room.price);

        let reservation = self.hotel.reservations().create(&request).await?;
        self.update_room(Some(&room.id), &RoomUpdate::status(RoomStatus::Occupied)).await?;
        info!(reservation_id = %abbrev_id(&reservation.id), room = %room.number, "Room booked");
        Ok(reservation)
    }

    /// Mark a reservation checked in and its room occupied
    #[instrument(skip(self, reservation_id), fields(reservation_id = %abbrev_id(reservation_id)), err)]
    pub async fn check_in(&self, reservation_id: &str) -> Result<Reservation> {
        let reservation = self
            .hotel
            .reservations()
            .update(reservation_id, &ReservationUpdate::status(ReservationStatus::CheckedIn))
            .await?;
        self.update_room(reservation.room_id.as_deref(), &RoomUpdate::status(RoomStatus::Occupied))
            .await?;
        Ok(reservation)
    }

    /// Mark a reservation checked out and its room due for cleaning
    #[instrument(skip(self, reservation_id), fields(reservation_id = %abbrev_id(reservation_id)), err)]
    pub async fn check_out(&self, reservation_id: &str) -> Result<Reservation> {
        let reservation = self
            .hotel
            .reservations()
            .update(reservation_id, &ReservationUpdate::status(ReservationStatus::CheckedOut))
            .await?;
        self.update_room(reservation.room_id.as_deref(), &RoomUpdate::status(RoomStatus::Cleaning))
            .await?;
        Ok(reservation)
    }

    /// Move a task to `status`; completing it marks its room clean.
    ///
    /// Completion is stamped with the current time. Any other status clears `completedAt`,
    /// whatever the store's completion policy.
    #[instrument(skip(self, task_id), fields(task_id = %abbrev_id(task_id)), err)]
    pub async fn set_task_status(&self, task_id: &str, status: TaskStatus) -> Result<HousekeepingTask> {
        let patch = TaskUpdate {
            completed_at: (status != TaskStatus::Completed).then_some(None),
            ..TaskUpdate::status(status)
        };
        let task = self.hotel.tasks().update(task_id, &patch).await?;
        if status == TaskStatus::Completed {
            self.update_room(task.room_id.as_deref(), &RoomUpdate::cleaning_status(CleaningStatus::Clean))
                .await?;
        }
        Ok(task)
    }

    /// Set a room's status, and optionally its cleaning status, from the room board
    #[instrument(skip(self, room_id), fields(room_id = %abbrev_id(room_id)), err)]
    pub async fn set_room_status(
        &self,
        room_id: &str,
        status: RoomStatus,
        cleaning_status: Option<CleaningStatus>,
    ) -> Result<Room> {
        let patch = RoomUpdate {
            cleaning_status,
            ..RoomUpdate::status(status)
        };
        let room = self.hotel.rooms().update(room_id, &patch).await?;
        info!(room = %room.number, status = %room.status, "Room status updated");
        Ok(room)
    }

    /// Create a pending task for a room, assigned to the general housekeeping staff
    #[instrument(skip(self, room_id), fields(room_id = %abbrev_id(room_id)), err)]
    pub async fn create_quick_task(&self, room_id: &str, priority: Option<TaskPriority>) -> Result<HousekeepingTask> {
        let request = TaskCreate {
            room_id: Some(room_id.to_string()),
            assigned_to: Some(DEFAULT_ASSIGNEE.to_string()),
            status: Some(TaskStatus::Pending),
            priority: Some(priority.unwrap_or_default()),
        };
        self.hotel.tasks().create(&request).await
    }

    async fn update_room(&self, room_id: Option<&str>, patch: &RoomUpdate) -> Result<Option<Room>> {
        let Some(room_id) = room_id else {
            return Ok(None);
        };
        match self.hotel.rooms().update(room_id, patch).await {
            Ok(room) => Ok(Some(room)),
            Err(e) if e.is_not_found() => {
                warn!(room_id = %abbrev_id(room_id), "Referenced room does not exist, skipping room update");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, reservation, room, task, test_hotel};
    use rust_decimal::Decimal;

    fn guest(check_in: &str, check_out: &str) -> GuestDetails {
        GuestDetails {
            guest_name: "Grace Hopper".to_string(),
            email: "grace@navy.mil".to_string(),
            phone: "555-0100".to_string(),
            check_in: date(check_in),
            check_out: date(check_out),
            notes: String::new(),
        }
    }

    #[test_log::test(tokio::test)]
    async fn test_book_room() {
        let hotel = test_hotel(vec![room("1", "101", "standard", RoomStatus::Available)], vec![], vec![]);

        let booked = hotel
            .front_desk()
            .book_room("1", &guest("2024-01-01", "2024-01-03"))
            .await
            .unwrap();

        assert_eq!(booked.status, ReservationStatus::Confirmed);
        assert_eq!(booked.total_amount, Decimal::from(200));
        assert_eq!(booked.room_id.as_deref(), Some("1"));
        assert_eq!(booked.guest_name, "Grace Hopper");
        assert_eq!(hotel.rooms().get_by_id("1").await.unwrap().status, RoomStatus::Occupied);
    }

    #[tokio::test]
    async fn test_book_room_rejects_inverted_dates() {
        let hotel = test_hotel(vec![room("1", "101", "standard", RoomStatus::Available)], vec![], vec![]);
        let desk = hotel.front_desk();

        for (check_in, check_out) in [("2024-01-03", "2024-01-01"), ("2024-01-01", "2024-01-01")] {
            let err = desk.book_room("1", &guest(check_in, check_out)).await.unwrap_err();
            assert!(matches!(err, StoreError::Validation { .. }), "{err}");
        }

        assert!(hotel.reservations().list().await.unwrap().is_empty());
        assert_eq!(hotel.rooms().get_by_id("1").await.unwrap().status, RoomStatus::Available);
    }

    #[tokio::test]
    async fn test_book_missing_room_is_not_found() {
        let hotel = test_hotel(vec![], vec![], vec![]);
        let err = hotel
            .front_desk()
            .book_room("404", &guest("2024-01-01", "2024-01-02"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(hotel.reservations().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_check_in_and_out() {
        let mut stay = reservation("r1", "2024-01-01", "2024-01-03", 200);
        stay.room_id = Some("1".to_string());
        let hotel = test_hotel(vec![room("1", "101", "standard", RoomStatus::Available)], vec![stay], vec![]);
        let desk = hotel.front_desk();

        let checked_in = desk.check_in("r1").await.unwrap();
        assert_eq!(checked_in.status, ReservationStatus::CheckedIn);
        assert_eq!(hotel.rooms().get_by_id("1").await.unwrap().status, RoomStatus::Occupied);

        let checked_out = desk.check_out("r1").await.unwrap();
        assert_eq!(checked_out.status, ReservationStatus::CheckedOut);
        assert_eq!(hotel.rooms().get_by_id("1").await.unwrap().status, RoomStatus::Cleaning);
    }

    #[test_log::test(tokio::test)]
    async fn test_dangling_room_is_skipped() {
        let mut stay = reservation("r1", "2024-01-01", "2024-01-03", 200);
        stay.room_id = Some("gone".to_string());
        let mut cleaning = task("t1", TaskStatus::InProgress, TaskPriority::High);
        cleaning.room_id = Some("gone".to_string());
        let hotel = test_hotel(vec![], vec![stay], vec![cleaning]);
        let desk = hotel.front_desk();

        assert_eq!(desk.check_in("r1").await.unwrap().status, ReservationStatus::CheckedIn);
        assert_eq!(desk.check_out("r1").await.unwrap().status, ReservationStatus::CheckedOut);
        assert_eq!(
            desk.set_task_status("t1", TaskStatus::Completed).await.unwrap().status,
            TaskStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_check_in_missing_reservation() {
        let hotel = test_hotel(vec![room("1", "101", "standard", RoomStatus::Available)], vec![], vec![]);
        let err = hotel.front_desk().check_in("nope").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(hotel.rooms().get_by_id("1").await.unwrap().status, RoomStatus::Available);
    }

    #[tokio::test]
    async fn test_completing_task_cleans_room() {
        let mut dirty = room("1", "101", "standard", RoomStatus::Cleaning);
        dirty.cleaning_status = CleaningStatus::Dirty;
        let mut cleaning = task("t1", TaskStatus::Pending, TaskPriority::Medium);
        cleaning.room_id = Some("1".to_string());
        let hotel = test_hotel(vec![dirty], vec![], vec![cleaning]);
        let desk = hotel.front_desk();

        let started = desk.set_task_status("t1", TaskStatus::InProgress).await.unwrap();
        assert_eq!(started.completed_at, None);
        assert_eq!(hotel.rooms().get_by_id("1").await.unwrap().cleaning_status, CleaningStatus::Dirty);

        let done = desk.set_task_status("t1", TaskStatus::Completed).await.unwrap();
        assert!(done.completed_at.is_some());
        let room = hotel.rooms().get_by_id("1").await.unwrap();
        assert_eq!(room.cleaning_status, CleaningStatus::Clean);
        // Only the cleaning status changes; the occupancy status is left to the front desk
        assert_eq!(room.status, RoomStatus::Cleaning);
    }

    #[tokio::test]
    async fn test_reopening_task_clears_completion_time() {
        let mut cleaning = task("t1", TaskStatus::Pending, TaskPriority::Medium);
        cleaning.room_id = Some("1".to_string());
        let hotel = test_hotel(vec![room("1", "101", "standard", RoomStatus::Cleaning)], vec![], vec![cleaning]);
        let desk = hotel.front_desk();

        let done = desk.set_task_status("t1", TaskStatus::Completed).await.unwrap();
        assert!(done.completed_at.is_some());

        let reopened = desk.set_task_status("t1", TaskStatus::InProgress).await.unwrap();
        assert_eq!(reopened.status, TaskStatus::InProgress);
        assert_eq!(reopened.completed_at, None);

        desk.set_task_status("t1", TaskStatus::Completed).await.unwrap();
        let reset = desk.set_task_status("t1", TaskStatus::Pending).await.unwrap();
        assert_eq!(reset.completed_at, None);
        assert_eq!(hotel.tasks().get_by_id("t1").await.unwrap().completed_at, None);
    }

    #[tokio::test]
    async fn test_set_room_status() {
        let hotel = test_hotel(vec![room("1", "101", "standard", RoomStatus::Available)], vec![], vec![]);
        let desk = hotel.front_desk();

        let room = desk.set_room_status("1", RoomStatus::Maintenance, None).await.unwrap();
        assert_eq!(room.status, RoomStatus::Maintenance);
        assert_eq!(room.cleaning_status, CleaningStatus::Clean);

        let room = desk
            .set_room_status("1", RoomStatus::Cleaning, Some(CleaningStatus::Dirty))
            .await
            .unwrap();
        assert_eq!(room.status, RoomStatus::Cleaning);
        assert_eq!(room.cleaning_status, CleaningStatus::Dirty);

        let err = desk.set_room_status("404", RoomStatus::Available, None).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_create_quick_task() {
        let hotel = test_hotel(vec![room("1", "101", "standard", RoomStatus::Cleaning)], vec![], vec![]);
        let desk = hotel.front_desk();

        let default_priority = desk.create_quick_task("1", None).await.unwrap();
        assert_eq!(default_priority.priority, TaskPriority::Medium);
        assert_eq!(default_priority.status, TaskStatus::Pending);
        assert_eq!(default_priority.assigned_to, DEFAULT_ASSIGNEE);
        assert_eq!(default_priority.room_id.as_deref(), Some("1"));
        assert_eq!(default_priority.completed_at, None);

        let urgent = desk.create_quick_task("1", Some(TaskPriority::High)).await.unwrap();
        assert_eq!(urgent.priority, TaskPriority::High);
        assert_eq!(hotel.tasks().list().await.unwrap().len(), 2);
    }
}
