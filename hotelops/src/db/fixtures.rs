//! Seed data for the in-memory store.
//!
//! Three independent JSON collections in the canonical camelCase schema. The built-in set is
//! embedded into the binary; a directory holding files with the same names can replace it.

use anyhow::Context;
use rust_embed::RustEmbed;
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::info;

use crate::db::models::{housekeeping::HousekeepingTask, reservations::Reservation, rooms::Room};

pub const ROOMS_FILE: &str = "rooms.json";
pub const RESERVATIONS_FILE: &str = "reservations.json";
pub const HOUSEKEEPING_FILE: &str = "housekeeping.json";

#[derive(RustEmbed)]
#[folder = "fixtures/"]
struct EmbeddedFixtures;

/// The three seed collections, loaded once at startup
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    pub rooms: Vec<Room>,
    pub reservations: Vec<Reservation>,
    pub tasks: Vec<HousekeepingTask>,
}

impl Fixtures {
    /// The fixture set compiled into the binary
    pub fn embedded() -> anyhow::Result<Self> {
        let fixtures = Self {
            rooms: embedded_collection(ROOMS_FILE)?,
            reservations: embedded_collection(RESERVATIONS_FILE)?,
            tasks: embedded_collection(HOUSEKEEPING_FILE)?,
        };
        info!(
            rooms = fixtures.rooms.len(),
            reservations = fixtures.reservations.len(),
            tasks = fixtures.tasks.len(),
            "Loaded embedded fixtures"
        );
        Ok(fixtures)
    }

    /// Load fixtures from a directory containing `rooms.json`, `reservations.json` and
    /// `housekeeping.json`
    pub fn from_dir(dir: &Path) -> anyhow::Result<Self> {
        let fixtures = Self {
            rooms: file_collection(&dir.join(ROOMS_FILE))?,
            reservations: file_collection(&dir.join(RESERVATIONS_FILE))?,
            tasks: file_collection(&dir.join(HOUSEKEEPING_FILE))?,
        };
        info!(
            dir = %dir.display(),
            rooms = fixtures.rooms.len(),
            reservations = fixtures.reservations.len(),
            tasks = fixtures.tasks.len(),
            "Loaded fixtures from directory"
        );
        Ok(fixtures)
    }
}

fn embedded_collection<T: DeserializeOwned>(name: &str) -> anyhow::Result<Vec<T>> {
    let file = EmbeddedFixtures::get(name).with_context(|| format!("embedded fixture {name} is missing"))?;
    serde_json::from_slice(&file.data).with_context(|| format!("embedded fixture {name} is malformed"))
}

fn file_collection<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let data = std::fs::read(path).with_context(|| format!("failed to read fixture {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("fixture {} is malformed", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::models::{housekeeping::TaskPriority, reservations::ReservationStatus, rooms::RoomStatus};

    #[test]
    fn test_embedded_fixtures_parse() {
        let fixtures = Fixtures::embedded().unwrap();
        assert_eq!(fixtures.rooms.len(), 8);
        assert_eq!(fixtures.reservations.len(), 7);
        assert_eq!(fixtures.tasks.len(), 5);

        assert_eq!(fixtures.rooms[0].number, "101");
        assert_eq!(fixtures.rooms[1].status, RoomStatus::Occupied);
        assert_eq!(fixtures.reservations[6].status, ReservationStatus::Cancelled);
        assert_eq!(fixtures.tasks[0].priority, TaskPriority::High);
        assert!(fixtures.tasks[2].completed_at.is_some());
    }

    #[test]
    fn test_from_dir_reports_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();
        std::fs::write(dir.join(ROOMS_FILE), "[]").unwrap();

        let err = Fixtures::from_dir(dir).unwrap_err();
        assert!(err.to_string().contains(RESERVATIONS_FILE));

        std::fs::write(dir.join(RESERVATIONS_FILE), "[]").unwrap();
        std::fs::write(dir.join(HOUSEKEEPING_FILE), "[]").unwrap();
        let fixtures = Fixtures::from_dir(dir).unwrap();
        assert!(fixtures.rooms.is_empty());
    }
}
