//! # hotelops: Hotel Operations Data Layer
//!
//! `hotelops` is the data layer behind a small hotel operations dashboard: the room board,
//! reservations, housekeeping tasks and the occupancy and revenue reports built from them.
//!
//! ## Overview
//!
//! Three entity collections (rooms, reservations and housekeeping tasks) are exposed through one
//! uniform asynchronous CRUD interface, [`Repository`]. Two interchangeable backends implement
//! it: a remote record service reached over HTTP, and an in-memory store seeded from JSON
//! fixtures with simulated latency. Which one is used is decided once, at startup, from
//! configuration ([`Hotel::from_config`]); nothing downstream can tell them apart.
//!
//! On top of the repositories sit two thin layers:
//!
//! - [`reports`]: pure functions that turn a [`Snapshot`] of the collections into dashboard
//!   figures, trailing occupancy and revenue series, room type breakdowns and housekeeping
//!   buckets.
//! - [`front_desk`]: the multi-step workflows a receptionist performs (booking, check-in,
//!   check-out, finishing a cleaning task) that touch more than one collection.
//!
//! ## Architecture
//!
//! ```text
//!   config ──► Hotel::from_config ──► Hotel ──► FrontDesk
//!                     │                 │
//!          ┌──────────┴─────────┐       └──► snapshot ──► reports
//!          ↓                    ↓
//!     MemoryStore          RemoteClient
//!   (fixtures, latency)   (reqwest, wire)
//! ```
//!
//! Errors from every backend are reported as [`StoreError`]: a missing record is `NotFound`,
//! malformed data is `Validation`, and an unreachable or failing record service is
//! `BackingStoreUnavailable`. Nothing retries.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hotelops::{Hotel, db::handlers::{MemorySettings, MemoryStore}, db::fixtures::Fixtures};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let store = MemoryStore::new(Fixtures::embedded()?);
//! let hotel = Hotel::in_memory(&store, MemorySettings::default());
//!
//! let snapshot = hotel.snapshot().await?;
//! let today = chrono::Local::now().date_naive();
//! println!("{}% occupied", snapshot.dashboard(today).occupancy_rate);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod front_desk;
pub mod reports;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod test_utils;

use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub use config::Config;
pub use db::errors::StoreError;
pub use db::handlers::Repository;
pub use front_desk::FrontDesk;
pub use reports::Snapshot;

use crate::config::BackendConfig;
use crate::db::{
    errors::Result,
    fixtures::Fixtures,
    handlers::{MemorySettings, MemoryStore, RemoteClient, RemoteSettings},
    models::{
        housekeeping::HousekeepingTask,
        reservations::{Reservation, ReservationCreate},
        rooms::Room,
    },
};

/// Handle to the three hotel collections.
///
/// Cheap to clone; clones share the same repositories.
#[derive(Clone)]
pub struct Hotel {
    rooms: Arc<dyn Repository<Room>>,
    reservations: Arc<dyn Repository<Reservation>>,
    tasks: Arc<dyn Repository<HousekeepingTask>>,
}

impl Hotel {
    /// A hotel backed by an in-memory store
    pub fn in_memory(store: &MemoryStore, settings: MemorySettings) -> Self {
        Self {
            rooms: Arc::new(store.rooms(settings)),
            reservations: Arc::new(store.reservations(settings)),
            tasks: Arc::new(store.tasks(settings)),
        }
    }

    /// A hotel backed by the remote record service
    pub fn remote(settings: RemoteSettings) -> Result<Self> {
        let client = RemoteClient::new(settings)?;
        Ok(Self {
            rooms: Arc::new(client.repository::<Room>()),
            reservations: Arc::new(client.repository::<Reservation>()),
            tasks: Arc::new(client.repository::<HousekeepingTask>()),
        })
    }

    /// Select and build the configured backend
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        match &config.backend {
            BackendConfig::Remote { url, request_timeout, .. } => {
                info!(%url, timeout = ?request_timeout, "Using remote record service");
                let settings = config
                    .remote_settings()
                    .ok_or_else(|| anyhow::anyhow!("remote backend without remote settings"))?;
                Ok(Self::remote(settings)?)
            }
            BackendConfig::Memory { fixtures_dir, .. } => {
                let fixtures = match fixtures_dir {
                    Some(dir) => Fixtures::from_dir(dir)?,
                    None => Fixtures::embedded()?,
                };
                let settings = config
                    .memory_settings()
                    .ok_or_else(|| anyhow::anyhow!("memory backend without memory settings"))?;
                info!(latency = ?settings.latency, "Using in-memory store");
                Ok(Self::in_memory(&MemoryStore::new(fixtures), settings))
            }
        }
    }

    pub fn rooms(&self) -> &dyn Repository<Room> {
        self.rooms.as_ref()
    }

    pub fn reservations(&self) -> &dyn Repository<Reservation> {
        self.reservations.as_ref()
    }

    pub fn tasks(&self) -> &dyn Repository<HousekeepingTask> {
        self.tasks.as_ref()
    }

    pub fn front_desk(&self) -> FrontDesk<'_> {
        FrontDesk::new(self)
    }

    /// Create a reservation, pricing it from its room when no total is given.
    ///
    /// The total is `room.price × nights`; a reservation without a room, or whose room no longer
    /// exists, is priced at zero.
    #[instrument(skip(self, request), fields(check_in = %request.check_in, check_out = %request.check_out), err)]
    pub async fn create_reservation(&self, request: &ReservationCreate) -> Result<Reservation> {
        if request.total_amount.is_some() {
            return self.reservations.create(request).await;
        }

        let nightly = match &request.room_id {
            Some(room_id) => match self.rooms.get_by_id(room_id).await {
                Ok(room) => room.price,
                Err(e) if e.is_not_found() => {
                    debug!(room_id = %types::abbrev_id(room_id), "Room not found, pricing reservation at zero");
                    Decimal::ZERO
                }
                Err(e) => return Err(e),
            },
            None => Decimal::ZERO,
        };

        self.reservations.create(&request.clone().priced_at(nightly)).await
    }

    /// Read all three collections concurrently
    #[instrument(skip(self), err)]
    pub async fn snapshot(&self) -> Result<Snapshot> {
        let (rooms, reservations, tasks) = tokio::try_join!(self.rooms.list(), self.reservations.list(), self.tasks.list())?;
        Ok(Snapshot {
            rooms,
            reservations,
            tasks,
        })
    }
}
