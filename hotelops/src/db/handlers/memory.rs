//! In-memory fallback store.
//!
//! [`MemoryStore`] owns one collection per entity type. It is constructed once (usually from
//! [`Fixtures`]) and handed to whoever needs repositories; every repository created from the same
//! store shares its collections, while separate stores are fully isolated.
//!
//! Each collection sits behind its own mutex. Locks are only held for the synchronous part of an
//! operation, after the simulated latency has elapsed, so every operation is atomic with respect
//! to a single entity and nothing is ever locked across an await point.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::db::{
    errors::{Result, StoreError},
    fixtures::Fixtures,
    handlers::repository::{Entity, Repository, UpdateContext},
    latency::{Latency, StoreOperation},
    models::{housekeeping::CompletionPolicy, housekeeping::HousekeepingTask, reservations::Reservation, rooms::Room},
};
use crate::types::abbrev_id;

type Collection<E> = Arc<Mutex<Vec<E>>>;

/// Owner of the three in-memory collections
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    rooms: Collection<Room>,
    reservations: Collection<Reservation>,
    tasks: Collection<HousekeepingTask>,
}

/// Settings shared by every repository created from a [`MemoryStore`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MemorySettings {
    pub latency: Latency,
    pub completion_policy: CompletionPolicy,
}

impl MemorySettings {
    /// No latency and the default completion policy; what tests want
    pub fn instant() -> Self {
        Self {
            latency: Latency::NONE,
            completion_policy: CompletionPolicy::default(),
        }
    }
}

impl MemoryStore {
    /// Create a store seeded from fixtures
    pub fn new(fixtures: Fixtures) -> Self {
        Self {
            rooms: Arc::new(Mutex::new(fixtures.rooms)),
            reservations: Arc::new(Mutex::new(fixtures.reservations)),
            tasks: Arc::new(Mutex::new(fixtures.tasks)),
        }
    }

    /// Create a store with no records
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rooms(&self, settings: MemorySettings) -> MemoryRepository<Room> {
        MemoryRepository::new(self.rooms.clone(), settings)
    }

    pub fn reservations(&self, settings: MemorySettings) -> MemoryRepository<Reservation> {
        MemoryRepository::new(self.reservations.clone(), settings)
    }

    pub fn tasks(&self, settings: MemorySettings) -> MemoryRepository<HousekeepingTask> {
        MemoryRepository::new(self.tasks.clone(), settings)
    }
}

/// Repository over one collection of a [`MemoryStore`]
pub struct MemoryRepository<E: Entity> {
    records: Collection<E>,
    settings: MemorySettings,
}

impl<E: Entity> MemoryRepository<E> {
    fn new(records: Collection<E>, settings: MemorySettings) -> Self {
        Self { records, settings }
    }

    fn next_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[async_trait::async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    #[instrument(skip(self), fields(entity = E::KIND), err)]
    async fn list(&self) -> Result<Vec<E>> {
        self.settings.latency.simulate(StoreOperation::List).await;
        Ok(self.records.lock().clone())
    }

    #[instrument(skip(self, id), fields(entity = E::KIND, id = %abbrev_id(id)), err)]
    async fn get_by_id(&self, id: &str) -> Result<E> {
        self.settings.latency.simulate(StoreOperation::Get).await;
        self.records
            .lock()
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(E::KIND, id))
    }

    #[instrument(skip(self, request), fields(entity = E::KIND), err)]
    async fn create(&self, request: &E::CreateRequest) -> Result<E> {
        self.settings.latency.simulate(StoreOperation::Create).await;
        let entity = E::materialize(Self::next_id(), request);
        self.records.lock().push(entity.clone());
        Ok(entity)
    }

    #[instrument(skip(self, id, patch), fields(entity = E::KIND, id = %abbrev_id(id)), err)]
    async fn update(&self, id: &str, patch: &E::UpdateRequest) -> Result<E> {
        self.settings.latency.simulate(StoreOperation::Update).await;
        let mut patch = patch.clone();
        E::prepare_update(&mut patch, &UpdateContext::now(self.settings.completion_policy));

        let mut records = self.records.lock();
        let record = records
            .iter_mut()
            .find(|record| record.id() == id)
            .ok_or_else(|| StoreError::not_found(E::KIND, id))?;
        record.merge(&patch);
        Ok(record.clone())
    }

    #[instrument(skip(self, id), fields(entity = E::KIND, id = %abbrev_id(id)), err)]
    async fn delete(&self, id: &str) -> Result<E> {
        self.settings.latency.simulate(StoreOperation::Delete).await;
        let mut records = self.records.lock();
        let index = records
            .iter()
            .position(|record| record.id() == id)
            .ok_or_else(|| StoreError::not_found(E::KIND, id))?;
        Ok(records.remove(index))
    }
}
