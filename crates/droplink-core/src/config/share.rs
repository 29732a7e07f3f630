//! Share limits and expiry configuration.

use serde::{Deserialize, Serialize};

/// Limits applied when creating a share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Maximum length of the text snippet in characters.
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
    /// Expiry applied when the client does not request one, in hours.
    #[serde(default = "default_expiry_hours")]
    pub default_expiry_hours: u32,
    /// Longest accepted expiry, in hours.
    #[serde(default = "default_max_expiry_hours")]
    pub max_expiry_hours: u32,
    /// Base URL prepended to file download paths in responses.
    /// Empty means relative paths.
    #[serde(default)]
    pub public_base_url: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            max_text_chars: default_max_text_chars(),
            default_expiry_hours: default_expiry_hours(),
            max_expiry_hours: default_max_expiry_hours(),
            public_base_url: String::new(),
        }
    }
}

fn default_max_text_chars() -> usize {
    10_000
}

fn default_expiry_hours() -> u32 {
    24
}

fn default_max_expiry_hours() -> u32 {
    168 // 7 days
}
