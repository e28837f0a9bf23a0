//! Configuration types.

use std::time::Duration;

/// Profile store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Artificial latency applied to save operations.
    pub save_latency: Duration,
    /// Artificial latency applied to delete operations.
    pub delete_latency: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            save_latency: Duration::from_millis(1500),
            delete_latency: Duration::from_millis(800),
        }
    }
}

impl StoreConfig {
    /// Zero-latency configuration, used by tests.
    pub fn instant() -> Self {
        Self {
            save_latency: Duration::ZERO,
            delete_latency: Duration::ZERO,
        }
    }
}
