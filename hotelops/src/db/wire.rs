//! Translation between the canonical schema and the remote record service's wire schema.
//!
//! The canonical schema is camelCase (what the models serialize to). The remote service speaks
//! snake_case and is loose about types: ids and money may come back as numbers or strings,
//! `features` may be a comma separated string, enum values may use underscores. Everything that
//! crosses the boundary goes through this module:
//!
//! - [`to_wire`] serializes a canonical value and renames its fields via [`FIELD_MAP`]
//! - [`decode`] reads a wire record through [`WireRecord`], which accepts either spelling of a
//!   field name and applies the coercions in one place
//!
//! Values that are present but cannot be coerced are [`StoreError::Validation`] errors. Absent or
//! null values fall back to the same defaults the in-memory store uses.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::db::{
    errors::{Result, StoreError},
    handlers::repository::Entity,
    models::{housekeeping::HousekeepingTask, reservations::Reservation, rooms::Room},
};
use crate::types::UnknownVariant;

/// Canonical field names whose wire spelling differs, as (canonical, wire) pairs.
///
/// Fields not listed here are spelled the same on both sides.
pub const FIELD_MAP: &[(&str, &str)] = &[
    ("cleaningStatus", "cleaning_status"),
    ("guestName", "guest_name"),
    ("checkIn", "check_in"),
    ("checkOut", "check_out"),
    ("roomId", "room_id"),
    ("totalAmount", "total_amount"),
    ("assignedTo", "assigned_to"),
    ("completedAt", "completed_at"),
];

pub fn wire_name(canonical: &str) -> &str {
    FIELD_MAP
        .iter()
        .find(|(c, _)| *c == canonical)
        .map_or(canonical, |(_, wire)| wire)
}

pub fn canonical_name(wire: &str) -> &str {
    FIELD_MAP.iter().find(|(_, w)| *w == wire).map_or(wire, |(canonical, _)| canonical)
}

/// Serialize a canonical value (entity, create or update request) into a wire object
pub fn to_wire<T: Serialize>(value: &T) -> Result<Value> {
    match serde_json::to_value(value).map_err(anyhow::Error::from)? {
        Value::Object(fields) => Ok(Value::Object(
            fields
                .into_iter()
                .map(|(name, value)| (wire_name(&name).to_string(), value))
                .collect(),
        )),
        other => Err(StoreError::validation(format!("expected an object, got {other}"))),
    }
}

/// An entity that can be read from a wire record
pub trait WireSchema: Entity {
    fn from_wire(record: &WireRecord<'_>) -> Result<Self>;
}

/// Decode a single wire record, optionally wrapped in a `{"data": ...}` envelope
pub fn decode<E: WireSchema>(value: Value) -> Result<E> {
    match unwrap_envelope(value) {
        Value::Object(fields) => E::from_wire(&WireRecord::new(E::KIND, &fields)),
        other => Err(StoreError::validation(format!("{} record must be an object, got {other}", E::KIND))),
    }
}

/// Decode a list of wire records, optionally wrapped in a `{"data": [...]}` envelope
pub fn decode_list<E: WireSchema>(value: Value) -> Result<Vec<E>> {
    match unwrap_envelope(value) {
        Value::Array(items) => items.into_iter().map(decode).collect(),
        other => Err(StoreError::validation(format!("{} list must be an array, got {other}", E::KIND))),
    }
}

fn unwrap_envelope(value: Value) -> Value {
    match value {
        Value::Object(mut fields) if fields.len() == 1 && fields.contains_key("data") => {
            fields.remove("data").unwrap_or(Value::Null)
        }
        value => value,
    }
}

/// Read access to one wire record with centralized coercions
pub struct WireRecord<'a> {
    kind: &'static str,
    fields: &'a Map<String, Value>,
}

impl<'a> WireRecord<'a> {
    pub fn new(kind: &'static str, fields: &'a Map<String, Value>) -> Self {
        Self { kind, fields }
    }

    /// Look a field up by its wire name, then by its canonical name; null counts as absent
    fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields
            .get(field)
            .or_else(|| self.fields.get(canonical_name(field)))
            .filter(|value| !value.is_null())
    }

    fn invalid(&self, field: &str, expected: &str, value: &Value) -> StoreError {
        StoreError::validation(format!("{}.{field}: expected {expected}, got {value}", self.kind))
    }

    pub fn id(&self) -> Result<String> {
        match self.get("id") {
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(self.invalid("id", "a string or number", other)),
            None => Err(StoreError::validation(format!("{} record has no id", self.kind))),
        }
    }

    pub fn string(&self, field: &str) -> Result<String> {
        Ok(self.optional_string(field)?.unwrap_or_default())
    }

    /// Strings and numbers are accepted; an empty string counts as absent
    pub fn optional_string(&self, field: &str) -> Result<Option<String>> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(self.invalid(field, "a string", other)),
        }
    }

    pub fn integer(&self, field: &str) -> Result<i32> {
        let parsed = match self.get(field) {
            None => return Ok(0),
            Some(Value::Number(n)) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            Some(Value::String(s)) => s.trim().parse().ok(),
            Some(_) => None,
        };
        parsed.ok_or_else(|| self.invalid(field, "an integer", self.get(field).unwrap_or(&Value::Null)))
    }

    pub fn decimal(&self, field: &str) -> Result<Decimal> {
        let parsed = match self.get(field) {
            None => return Ok(Decimal::ZERO),
            Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
                .ok()
                .or_else(|| n.as_f64().and_then(Decimal::from_f64_retain)),
            Some(Value::String(s)) => Decimal::from_str(s.trim()).ok(),
            Some(_) => None,
        };
        parsed.ok_or_else(|| self.invalid(field, "a decimal", self.get(field).unwrap_or(&Value::Null)))
    }

    /// A calendar date; full timestamps are truncated to their date
    pub fn date(&self, field: &str) -> Result<NaiveDate> {
        let value = self
            .get(field)
            .ok_or_else(|| StoreError::validation(format!("{}.{field} is required", self.kind)))?;
        let parsed = value.as_str().and_then(|s| {
            let s = s.trim();
            NaiveDate::from_str(s)
                .ok()
                .or_else(|| parse_timestamp(s).map(|ts| ts.date_naive()))
        });
        parsed.ok_or_else(|| self.invalid(field, "a date", value))
    }

    /// An RFC 3339 timestamp; timestamps without an offset are taken as UTC
    pub fn timestamp(&self, field: &str) -> Result<Option<DateTime<Utc>>> {
        match self.get(field) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .and_then(|s| parse_timestamp(s.trim()))
                .map(Some)
                .ok_or_else(|| self.invalid(field, "a timestamp", value)),
        }
    }

    pub fn enumeration<T>(&self, field: &str) -> Result<T>
    where
        T: FromStr<Err = UnknownVariant> + Default,
    {
        match self.get(field) {
            None => Ok(T::default()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(T::default()),
            Some(Value::String(s)) => s
                .parse()
                .map_err(|e: UnknownVariant| StoreError::validation(format!("{}.{field}: {e}", self.kind))),
            Some(other) => Err(self.invalid(field, "a string", other)),
        }
    }

    /// An array of strings, or a single comma separated string
    pub fn list(&self, field: &str) -> Result<Vec<String>> {
        match self.get(field) {
            None => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(s
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(self.invalid(field, "a list of strings", other)),
                })
                .collect(),
            Some(other) => Err(self.invalid(field, "a list of strings", other)),
        }
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .ok()
        .or_else(|| NaiveDateTime::from_str(s).ok().map(|naive| naive.and_utc()))
}

impl WireSchema for Room {
    fn from_wire(record: &WireRecord<'_>) -> Result<Self> {
        Ok(Self {
            id: record.id()?,
            number: record.string("number")?,
            room_type: record.string("type")?,
            floor: record.integer("floor")?,
            price: record.decimal("price")?,
            status: record.enumeration("status")?,
            cleaning_status: record.enumeration("cleaning_status")?,
            features: record.list("features")?,
        })
    }
}

impl WireSchema for Reservation {
    fn from_wire(record: &WireRecord<'_>) -> Result<Self> {
        Ok(Self {
            id: record.id()?,
            guest_name: record.string("guest_name")?,
            email: record.string("email")?,
            phone: record.string("phone")?,
            check_in: record.date("check_in")?,
            check_out: record.date("check_out")?,
            room_id: record.optional_string("room_id")?,
            status: record.enumeration("status")?,
            total_amount: record.decimal("total_amount")?,
            notes: record.string("notes")?,
        })
    }
}

impl WireSchema for HousekeepingTask {
    fn from_wire(record: &WireRecord<'_>) -> Result<Self> {
        Ok(Self {
            id: record.id()?,
            room_id: record.optional_string("room_id")?,
            assigned_to: record.string("assigned_to")?,
            status: record.enumeration("status")?,
            priority: record.enumeration("priority")?,
            completed_at: record.timestamp("completed_at")?,
        })
    }
}
