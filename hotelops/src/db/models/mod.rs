//! Entity models for the three hotel collections.
//!
//! Each entity comes with three shapes:
//!
//! - the entity itself (e.g. [`rooms::Room`]), a fully materialized snapshot
//! - a create request (e.g. [`rooms::RoomCreate`]) whose omitted fields take store defaults
//! - an update request (e.g. [`rooms::RoomUpdate`]) whose omitted fields are left untouched
//!
//! All three serialize camelCase, which is the canonical schema and the fixture format. The
//! remote record service speaks a snake_case dialect; translation lives in [`crate::db::wire`].
//!
//! Nullable fields (`roomId`, `completedAt`) use a double `Option` in update requests so that
//! "leave unchanged" and "set to null" stay distinguishable.

pub mod housekeeping;
pub mod reservations;
pub mod rooms;
