//! Models for rooms.

use crate::db::handlers::repository::Entity;
use crate::string_enum;
use crate::types::RoomId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

string_enum! {
    /// Occupancy axis of a room
    pub enum RoomStatus {
        Available => "available",
        Occupied => "occupied",
        Cleaning => "cleaning",
        Maintenance => "maintenance",
    }
}

string_enum! {
    /// Cleanliness axis of a room, independent of [`RoomStatus`]
    pub enum CleaningStatus {
        Clean => "clean",
        Dirty => "dirty",
    }
}

/// A bookable room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub floor: i32,
    /// Nightly rate
    pub price: Decimal,
    #[serde(default)]
    pub status: RoomStatus,
    #[serde(default)]
    pub cleaning_status: CleaningStatus,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Request for creating a room. Omitted fields take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning_status: Option<CleaningStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

/// Partial update for a room. Only present fields are written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RoomStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning_status: Option<CleaningStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
}

impl RoomUpdate {
    pub fn status(status: RoomStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn cleaning_status(cleaning_status: CleaningStatus) -> Self {
        Self {
            cleaning_status: Some(cleaning_status),
            ..Default::default()
        }
    }
}

impl Entity for Room {
    type CreateRequest = RoomCreate;
    type UpdateRequest = RoomUpdate;

    const KIND: &'static str = "Room";
    const COLLECTION: &'static str = "rooms";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "number",
        "type",
        "floor",
        "price",
        "status",
        "cleaning_status",
        "features",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn materialize(id: String, request: &RoomCreate) -> Self {
        Self {
            id,
            number: request.number.clone().unwrap_or_default(),
            room_type: request.room_type.clone().unwrap_or_default(),
            floor: request.floor.unwrap_or_default(),
            price: request.price.unwrap_or_default(),
            status: request.status.unwrap_or(RoomStatus::Available),
            cleaning_status: request.cleaning_status.unwrap_or(CleaningStatus::Clean),
            features: request.features.clone().unwrap_or_default(),
        }
    }

    fn merge(&mut self, patch: &RoomUpdate) {
        if let Some(number) = &patch.number {
            self.number = number.clone();
        }
        if let Some(room_type) = &patch.room_type {
            self.room_type = room_type.clone();
        }
        if let Some(floor) = patch.floor {
            self.floor = floor;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(cleaning_status) = patch.cleaning_status {
            self.cleaning_status = cleaning_status;
        }
        if let Some(features) = &patch.features {
            self.features = features.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialize_applies_defaults() {
        let room = Room::materialize("r1".to_string(), &RoomCreate::default());
        assert_eq!(room.id, "r1");
        assert_eq!(room.status, RoomStatus::Available);
        assert_eq!(room.cleaning_status, CleaningStatus::Clean);
        assert!(room.features.is_empty());
        assert_eq!(room.price, Decimal::ZERO);
    }

    #[test]
    fn test_merge_touches_only_present_fields() {
        let mut room = Room::materialize(
            "r1".to_string(),
            &RoomCreate {
                number: Some("101".to_string()),
                price: Some(Decimal::from(100)),
                features: Some(vec!["wifi".to_string()]),
                ..Default::default()
            },
        );
        let before = room.clone();
        room.merge(&RoomUpdate::status(RoomStatus::Occupied));

        assert_eq!(room.status, RoomStatus::Occupied);
        assert_eq!(room.cleaning_status, before.cleaning_status);
        assert_eq!(room.number, before.number);
        assert_eq!(room.price, before.price);
        assert_eq!(room.features, before.features);
    }

    #[test]
    fn test_status_axes_are_independent() {
        let mut room = Room::materialize("r1".to_string(), &RoomCreate::default());
        room.merge(&RoomUpdate::status(RoomStatus::Occupied));
        assert_eq!(room.cleaning_status, CleaningStatus::Clean);
        room.merge(&RoomUpdate::cleaning_status(CleaningStatus::Dirty));
        assert_eq!(room.status, RoomStatus::Occupied);
    }

    #[test]
    fn test_camel_case_serialization() {
        let room = Room::materialize("r1".to_string(), &RoomCreate::default());
        let json = serde_json::to_value(&room).unwrap();
        assert_eq!(json["cleaningStatus"], "clean");
        assert_eq!(json["type"], "");
    }
}
