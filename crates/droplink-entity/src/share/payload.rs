//! File payload value object returned on redemption.

use serde::{Deserialize, Serialize};

/// How a redeemed file payload is retrieved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadSource {
    /// Fetch the bytes from a download URL.
    DownloadUrl(String),
    /// The bytes are inlined as a base64 data URL.
    DataUrl(String),
}

/// A redeemed file payload: metadata plus where to get the bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilePayload {
    /// Original file name.
    pub name: String,
    /// Size in bytes.
    pub size: i64,
    /// MIME type.
    pub mime_type: String,
    /// Where the bytes live.
    #[serde(flatten)]
    pub source: PayloadSource,
}
