//! Simulated network latency for the in-memory store.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Repository operations, as seen by the latency simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

/// Per-operation pause applied by the in-memory store before touching its collections.
///
/// Defaults emulate a round trip to the remote record service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Latency {
    #[serde(with = "humantime_serde")]
    pub list: Duration,
    #[serde(with = "humantime_serde")]
    pub get: Duration,
    #[serde(with = "humantime_serde")]
    pub create: Duration,
    #[serde(with = "humantime_serde")]
    pub update: Duration,
    #[serde(with = "humantime_serde")]
    pub delete: Duration,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            list: Duration::from_millis(300),
            get: Duration::from_millis(200),
            create: Duration::from_millis(400),
            update: Duration::from_millis(300),
            delete: Duration::from_millis(300),
        }
    }
}

impl Latency {
    /// No simulated latency at all
    pub const NONE: Latency = Latency {
        list: Duration::ZERO,
        get: Duration::ZERO,
        create: Duration::ZERO,
        update: Duration::ZERO,
        delete: Duration::ZERO,
    };

    pub fn for_operation(&self, operation: StoreOperation) -> Duration {
        match operation {
            StoreOperation::List => self.list,
            StoreOperation::Get => self.get,
            StoreOperation::Create => self.create,
            StoreOperation::Update => self.update,
            StoreOperation::Delete => self.delete,
        }
    }

    pub async fn simulate(&self, operation: StoreOperation) {
        let delay = self.for_operation(operation);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
