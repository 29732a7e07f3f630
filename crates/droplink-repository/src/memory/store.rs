//! In-memory share repository using dashmap.
//!
//! The runtime analogue of the original app's local-storage simulation:
//! everything lives in the process and vanishes on restart.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use droplink_core::error::AppError;
use droplink_core::result::AppResult;
use droplink_core::types::code::ShareCode;
use droplink_entity::share::{CreateShare, Share, ShareStatus};

use crate::provider::ShareRepository;

/// In-memory share repository keyed by code.
#[derive(Debug, Default)]
pub struct MemoryShareRepository {
    /// Share records keyed by their uppercase code.
    shares: DashMap<String, Share>,
}

impl MemoryShareRepository {
    /// Create an empty in-memory repository.
    pub fn new() -> Self {
        Self {
            shares: DashMap::new(),
        }
    }
}

#[async_trait]
impl ShareRepository for MemoryShareRepository {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn insert(&self, data: &CreateShare) -> AppResult<Share> {
        let key = data.code.as_str().to_string();
        let share = Share {
            id: Uuid::new_v4(),
            code: data.code.clone(),
            text: data.text.clone(),
            file_name: data.file_name.clone(),
            file_size: data.file_size,
            file_type: data.file_type.clone(),
            blob_key: data.blob_key.clone(),
            status: ShareStatus::Active,
            download_count: 0,
            created_at: Utc::now(),
            expires_at: data.expires_at,
        };

        // Entry API keeps the existence check and the insert atomic.
        match self.shares.entry(key) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Code {} is already taken",
                data.code
            ))),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(share.clone());
                debug!(code = %share.code, "Stored share record");
                Ok(share)
            }
        }
    }

    async fn find_by_code(&self, code: &ShareCode) -> AppResult<Option<Share>> {
        Ok(self.shares.get(code.as_str()).map(|entry| entry.clone()))
    }

    async fn increment_download_count(&self, code: &ShareCode) -> AppResult<i32> {
        let mut entry = self
            .shares
            .get_mut(code.as_str())
            .ok_or_else(|| AppError::not_found(format!("No share for code {code}")))?;
        entry.download_count += 1;
        Ok(entry.download_count)
    }

    async fn find_expired(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<Share>> {
        let mut expired: Vec<Share> = self
            .shares
            .iter()
            .filter(|entry| entry.status == ShareStatus::Active && entry.expires_at <= now)
            .map(|entry| entry.clone())
            .collect();
        expired.sort_by_key(|share| share.expires_at);
        expired.truncate(limit.max(0) as usize);
        Ok(expired)
    }

    async fn mark_expired(&self, id: Uuid) -> AppResult<()> {
        for mut entry in self.shares.iter_mut() {
            if entry.id == id {
                entry.status = ShareStatus::Expired;
                return Ok(());
            }
        }
        Err(AppError::not_found(format!("No share with id {id}")))
    }

    async fn purge_expired_before(&self, cutoff: DateTime<Utc>) -> AppResult<u64> {
        // Count inside the closure; differencing map lengths miscounts when
        // an insert lands mid-retain.
        let removed = AtomicU64::new(0);
        self.shares.retain(|_, share| {
            let purge = share.status == ShareStatus::Expired && share.expires_at < cutoff;
            if purge {
                removed.fetch_add(1, Ordering::Relaxed);
            }
            !purge
        });
        let removed = removed.into_inner();
        if removed > 0 {
            debug!(removed, "Purged expired share records");
        }
        Ok(removed)
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(self.shares.len() as u64)
    }
}
