//! Retention sweeper — background loop that expires and purges old shares.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use tokio::sync::watch;
use tokio::time;
use tracing::{debug, error, info, warn};

use droplink_core::config::worker::WorkerConfig;
use droplink_core::error::AppError;
use droplink_core::traits::storage::BlobStore;
use droplink_repository::{RepositoryManager, ShareRepository};
use droplink_storage::StorageManager;

/// How many expired shares a single sweep batch handles.
const SWEEP_BATCH_SIZE: i64 = 500;

/// Background task that marks expired shares, releases their blobs, and
/// purges records that have been expired longer than the retention window.
#[derive(Debug)]
pub struct RetentionSweeper {
    /// Share record repository.
    repository: Arc<RepositoryManager>,
    /// Blob store for reclaiming file payloads.
    storage: Arc<StorageManager>,
    /// Sweep interval and retention settings.
    config: WorkerConfig,
}

impl RetentionSweeper {
    /// Creates a new retention sweeper.
    pub fn new(
        repository: Arc<RepositoryManager>,
        storage: Arc<StorageManager>,
        config: WorkerConfig,
    ) -> Self {
        Self {
            repository,
            storage,
            config,
        }
    }

    /// Runs the sweep loop until the cancel signal is received.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(
            interval_seconds = self.config.sweep_interval_seconds,
            purge_after_hours = self.config.purge_after_hours,
            "Retention sweeper started"
        );

        let interval = Duration::from_secs(self.config.sweep_interval_seconds);

        loop {
            tokio::select! {
                changed = cancel.changed() => {
                    // A closed channel means the sender is gone; stop
                    // rather than spin on the error.
                    if changed.is_err() || *cancel.borrow() {
                        info!("Retention sweeper received shutdown signal");
                        break;
                    }
                }
                _ = time::sleep(interval) => {
                    if let Err(e) = self.sweep_once().await {
                        error!(error = %e, "Retention sweep failed");
                    }
                }
            }
        }

        info!("Retention sweeper shut down");
    }

    /// Performs one sweep pass: expire shares past their deadline, delete
    /// their blobs, and purge records past the retention window.
    pub async fn sweep_once(&self) -> Result<(), AppError> {
        let now = Utc::now();

        let expired = self.repository.find_expired(now, SWEEP_BATCH_SIZE).await?;
        let found = expired.len();

        for share in expired {
            if let Some(ref key) = share.blob_key {
                // A missing blob is fine; anything else is logged and the
                // record is still marked so the share stops resolving.
                if let Err(e) = self.storage.delete(key).await {
                    warn!(code = %share.code, key, error = %e, "Failed to delete expired blob");
                }
            }
            self.repository.mark_expired(share.id).await?;
        }

        let cutoff = now - ChronoDuration::hours(i64::from(self.config.purge_after_hours));
        let purged = self.repository.purge_expired_before(cutoff).await?;

        if found > 0 || purged > 0 {
            info!(expired = found, purged, "Retention sweep completed");
        } else {
            debug!("Retention sweep found nothing to do");
        }

        Ok(())
    }
}
