//! Share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use droplink_core::ShareCode;

/// Lifecycle status of a share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "share_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShareStatus {
    /// The share can be redeemed.
    Active,
    /// The expiry timestamp has passed.
    Expired,
    /// The record was removed by the platform's lifecycle rules.
    Deleted,
}

/// A text/file payload addressed by a short code with an expiry.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Share {
    /// Unique share identifier.
    pub id: Uuid,
    /// The redeemable 6-character code.
    pub code: ShareCode,
    /// Text snippet, if any.
    pub text: Option<String>,
    /// Original file name, if a file was attached.
    pub file_name: Option<String>,
    /// File size in bytes.
    pub file_size: Option<i64>,
    /// File MIME type.
    pub file_type: Option<String>,
    /// Key of the stored blob in the blob store.
    pub blob_key: Option<String>,
    /// Lifecycle status.
    pub status: ShareStatus,
    /// Number of successful redemptions.
    pub download_count: i32,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// When the share expires.
    pub expires_at: DateTime<Utc>,
}

impl Share {
    /// Whether a file payload is attached.
    pub fn has_file(&self) -> bool {
        self.blob_key.is_some()
    }

    /// Whether the share can still be redeemed at the given instant.
    pub fn is_redeemable_at(&self, now: DateTime<Utc>) -> bool {
        self.status == ShareStatus::Active && self.expires_at > now
    }
}

/// Data required to create a new share record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShare {
    /// The generated code.
    pub code: ShareCode,
    /// Text snippet, if any.
    pub text: Option<String>,
    /// Original file name.
    pub file_name: Option<String>,
    /// File size in bytes.
    pub file_size: Option<i64>,
    /// File MIME type.
    pub file_type: Option<String>,
    /// Key of the stored blob.
    pub blob_key: Option<String>,
    /// Expiry time.
    pub expires_at: DateTime<Utc>,
}
