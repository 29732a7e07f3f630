//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Top-level blob storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Which backend to use: `"memory"` or `"local"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Maximum accepted file size in bytes (default 50 MiB).
    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            max_file_size_bytes: default_max_file_size(),
            local: LocalStorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for stored blobs.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_max_file_size() -> u64 {
    52_428_800 // 50 MiB
}

fn default_local_root() -> String {
    "./data/blobs".to_string()
}
