//! Data access layer for the hotel collections.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ Hotel / FrontDesk│  (workflows and derived views)
//! └────────┬─────────┘
//!          │ dyn Repository<E>
//!          ↓
//! ┌──────────────────┐
//! │   Repositories   │  (db::handlers - memory or remote)
//! └────────┬─────────┘
//!          │
//!          ↓
//! ┌──────────────────┐        ┌──────────────┐
//! │      Models      │ ←────→ │     Wire     │  (db::wire - remote schema adapter)
//! └──────────────────┘        └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`handlers`]: The repository trait and its two backends
//! - [`models`]: Entity, create request and update request structures
//! - [`wire`]: Translation to and from the remote record service schema
//! - [`fixtures`]: Seed data for the in-memory store
//! - [`latency`]: Simulated round-trip latency for the in-memory store
//! - [`errors`]: Repository error types

pub mod errors;
pub mod fixtures;
pub mod handlers;
pub mod latency;
pub mod models;
pub mod wire;
