//! Repository implementations for the hotel collections.
//!
//! Two backends implement the [`Repository`] trait for every [`Entity`]:
//!
//! - [`MemoryRepository`]: the in-memory fallback, created from a [`MemoryStore`]
//! - [`RemoteRepository`]: a remote record service, created from a [`RemoteClient`]
//!
//! Which one is used is decided once at startup (see [`crate::Hotel::from_config`]); the rest
//! of the crate only ever sees `dyn Repository<E>`.
//!
//! # Common Pattern
//!
//! ```ignore
//! use hotelops::db::handlers::{MemorySettings, MemoryStore, Repository};
//! use hotelops::db::models::rooms::RoomUpdate;
//!
//! async fn example(store: &MemoryStore) -> hotelops::db::errors::Result<()> {
//!     let rooms = store.rooms(MemorySettings::default());
//!
//!     for room in rooms.list().await? {
//!         println!("{} is {}", room.number, room.status);
//!     }
//!
//!     let room = rooms.update("1", &RoomUpdate::default()).await?;
//!     Ok(())
//! }
//! ```

pub mod memory;
pub mod remote;
pub mod repository;

pub use memory::{MemoryRepository, MemorySettings, MemoryStore};
pub use remote::{RemoteClient, RemoteRepository, RemoteSettings};
pub use repository::{Entity, Repository, UpdateContext};
