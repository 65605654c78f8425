//! Models for reservations.

use crate::db::handlers::repository::Entity;
use crate::string_enum;
use crate::types::{ReservationId, RoomId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

string_enum! {
    pub enum ReservationStatus {
        Confirmed => "confirmed",
        CheckedIn => "checked-in",
        CheckedOut => "checked-out",
        Cancelled => "cancelled",
    }
}

/// A guest's booking of a room for a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: ReservationId,
    pub guest_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    /// Weak reference; the room may no longer exist
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub total_amount: Decimal,
    #[serde(default)]
    pub notes: String,
}

impl Reservation {
    /// Number of nights between check-in and check-out (zero for inverted ranges)
    pub fn nights(&self) -> i64 {
        nights_between(self.check_in, self.check_out)
    }

    /// Whether the stay covers `day`, counting both the arrival and departure dates
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.check_in <= day && day <= self.check_out
    }
}

pub fn nights_between(check_in: NaiveDate, check_out: NaiveDate) -> i64 {
    (check_out - check_in).num_days().max(0)
}

/// Request for creating a reservation.
///
/// `total_amount` may be left out; [`crate::Hotel::create_reservation`] prices it from the room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ReservationCreate {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            guest_name: None,
            email: None,
            phone: None,
            check_in,
            check_out,
            room_id: None,
            status: None,
            total_amount: None,
            notes: None,
        }
    }

    pub fn nights(&self) -> i64 {
        nights_between(self.check_in, self.check_out)
    }

    /// Set the total to `nightly × nights`, replacing any total already present
    pub fn priced_at(self, nightly: Decimal) -> Self {
        let total = nightly * Decimal::from(self.nights());
        Self {
            total_amount: Some(total),
            ..self
        }
    }
}

/// Partial update for a reservation. Only present fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveDate>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_with::rust::double_option"
    )]
    pub room_id: Option<Option<RoomId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ReservationUpdate {
    pub fn status(status: ReservationStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl Entity for Reservation {
    type CreateRequest = ReservationCreate;
    type UpdateRequest = ReservationUpdate;

    const KIND: &'static str = "Reservation";
    const COLLECTION: &'static str = "reservations";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "guest_name",
        "email",
        "phone",
        "check_in",
        "check_out",
        "room_id",
        "status",
        "total_amount",
        "notes",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn materialize(id: String, request: &ReservationCreate) -> Self {
        Self {
            id,
            guest_name: request.guest_name.clone().unwrap_or_default(),
            email: request.email.clone().unwrap_or_default(),
            phone: request.phone.clone().unwrap_or_default(),
            check_in: request.check_in,
            check_out: request.check_out,
            room_id: request.room_id.clone(),
            status: request.status.unwrap_or(ReservationStatus::Confirmed),
            total_amount: request.total_amount.unwrap_or_default(),
            notes: request.notes.clone().unwrap_or_default(),
        }
    }

    fn merge(&mut self, patch: &ReservationUpdate) {
        if let Some(guest_name) = &patch.guest_name {
            self.guest_name = guest_name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(phone) = &patch.phone {
            self.phone = phone.clone();
        }
        if let Some(check_in) = patch.check_in {
            self.check_in = check_in;
        }
        if let Some(check_out) = patch.check_out {
            self.check_out = check_out;
        }
        if let Some(room_id) = &patch.room_id {
            self.room_id = room_id.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(total_amount) = patch.total_amount {
            self.total_amount = total_amount;
        }
        if let Some(notes) = &patch.notes {
            self.notes = notes.clone();
        }
    }
}
