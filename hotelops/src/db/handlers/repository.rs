//! Base repository trait for entity collections.

use chrono::{DateTime, Utc};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

use crate::db::errors::Result;
use crate::db::models::housekeeping::CompletionPolicy;

/// An entity stored in one of the hotel collections.
///
/// Implementors describe how a create request materializes into an entity and how an update
/// request merges into one. Both backends rely on these, so defaults and merge semantics are
/// defined exactly once per entity.
pub trait Entity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The request type for creating entities
    type CreateRequest: Debug + Send + Sync + Serialize;

    /// The request type for updating entities
    type UpdateRequest: Debug + Clone + Send + Sync + Serialize;

    /// Human readable entity name, used in errors and traces
    const KIND: &'static str;

    /// Collection name on the remote record service
    const COLLECTION: &'static str;

    /// Wire field allowlist requested from the remote record service
    const FIELDS: &'static [&'static str];

    fn id(&self) -> &str;

    /// Build a full entity from a create request, filling store defaults for omitted fields
    fn materialize(id: String, request: &Self::CreateRequest) -> Self;

    /// Overwrite the fields present in `patch`, leaving every other field as it was
    fn merge(&mut self, patch: &Self::UpdateRequest);

    /// Rewrite a patch before it reaches the backing store
    fn prepare_update(_patch: &mut Self::UpdateRequest, _context: &UpdateContext) {}
}

/// Inputs to [`Entity::prepare_update`]
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext {
    pub completion_policy: CompletionPolicy,
    pub now: DateTime<Utc>,
}

impl UpdateContext {
    pub fn now(completion_policy: CompletionPolicy) -> Self {
        Self {
            completion_policy,
            now: Utc::now(),
        }
    }
}

/// Base repository trait providing CRUD over one entity collection
///
/// Every entity returned is a detached snapshot: mutating it never affects the store.
#[async_trait::async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// List every entity, in insertion order where the backend preserves it
    async fn list(&self) -> Result<Vec<E>>;

    /// Get an entity by ID, failing with `NotFound` when it does not exist
    async fn get_by_id(&self, id: &str) -> Result<E>;

    /// Create a new entity; the store assigns its ID
    async fn create(&self, request: &E::CreateRequest) -> Result<E>;

    /// Merge `patch` into an existing entity and return the result
    async fn update(&self, id: &str, patch: &E::UpdateRequest) -> Result<E>;

    /// Delete an entity by ID, returning it as it was just before removal
    async fn delete(&self, id: &str) -> Result<E>;
}
