//! Retention sweeper configuration.

use serde::{Deserialize, Serialize};

/// Background retention sweeper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the sweeper runs at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Seconds between sweep passes.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
    /// Hours an EXPIRED record is retained before being purged.
    #[serde(default = "default_purge_after")]
    pub purge_after_hours: u32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            sweep_interval_seconds: default_sweep_interval(),
            purge_after_hours: default_purge_after(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    60
}

fn default_purge_after() -> u32 {
    168
}
