//! Share creation and redemption.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use droplink_core::config::share::ShareConfig;
use droplink_core::error::{AppError, ErrorKind};
use droplink_core::traits::storage::{BlobStore, ByteStream};
use droplink_core::types::code::ShareCode;
use droplink_entity::share::{CreateShare, FilePayload, PayloadSource, Share, ShareStatus};
use droplink_repository::{RepositoryManager, ShareRepository};
use droplink_storage::StorageManager;
use droplink_storage::mime::mime_from_name;

use super::code::CodeGenerator;

/// How many times a colliding code is regenerated before giving up.
const CODE_RETRY_ATTEMPTS: u32 = 5;

/// Manages share creation and redemption.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share record repository.
    repository: Arc<RepositoryManager>,
    /// Blob store for file payloads.
    storage: Arc<StorageManager>,
    /// Code generator.
    codes: CodeGenerator,
    /// Limits and expiry settings.
    limits: ShareConfig,
    /// Maximum accepted file size in bytes.
    max_file_size_bytes: u64,
}

/// An uploaded file payload.
#[derive(Debug, Clone)]
pub struct FileUpload {
    /// Original file name.
    pub name: String,
    /// Declared MIME type, if any.
    pub content_type: Option<String>,
    /// The file bytes.
    pub data: Bytes,
}

/// Request to create a new share.
#[derive(Debug, Clone, Default)]
pub struct CreateShareRequest {
    /// Text snippet to share.
    pub text: Option<String>,
    /// File to share.
    pub file: Option<FileUpload>,
    /// Requested expiry in hours; the configured default when absent.
    pub expiry_hours: Option<u32>,
}

/// Response returned on share creation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateShareResponse {
    /// The redeemable code.
    pub code: ShareCode,
    /// When the share expires.
    pub expires_at: DateTime<Utc>,
}

/// A redeemed share as returned to the recipient.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RedeemedShare {
    /// The share code.
    pub code: ShareCode,
    /// Text snippet, if any.
    pub text: Option<String>,
    /// File payload, if any.
    pub file: Option<FilePayload>,
    /// Lifecycle status at redemption time.
    pub status: ShareStatus,
    /// Redemption count including this redemption.
    pub download_count: i32,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
    /// When the share expires.
    pub expires_at: DateTime<Utc>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        repository: Arc<RepositoryManager>,
        storage: Arc<StorageManager>,
        limits: ShareConfig,
        max_file_size_bytes: u64,
    ) -> Self {
        Self {
            repository,
            storage,
            codes: CodeGenerator::new(),
            limits,
            max_file_size_bytes,
        }
    }

    /// Creates a new share and returns its code and expiry.
    pub async fn create_share(&self, req: CreateShareRequest) -> Result<CreateShareResponse, AppError> {
        let text = req.text.filter(|t| !t.trim().is_empty());

        if text.is_none() && req.file.is_none() {
            return Err(AppError::validation(
                "Provide text or a file to create a share",
            ));
        }

        if let Some(ref text) = text {
            let chars = text.chars().count();
            if chars > self.limits.max_text_chars {
                return Err(AppError::validation(format!(
                    "Text exceeds the limit of {} characters",
                    self.limits.max_text_chars
                )));
            }
        }

        if let Some(ref file) = req.file {
            if file.data.len() as u64 > self.max_file_size_bytes {
                return Err(AppError::validation(format!(
                    "File size exceeds the limit of {} bytes",
                    self.max_file_size_bytes
                )));
            }
            if file.data.is_empty() {
                return Err(AppError::validation("Uploaded file is empty"));
            }
        }

        let expiry_hours = req.expiry_hours.unwrap_or(self.limits.default_expiry_hours);
        if expiry_hours < 1 || expiry_hours > self.limits.max_expiry_hours {
            return Err(AppError::validation(format!(
                "Expiry must be between 1 and {} hours",
                self.limits.max_expiry_hours
            )));
        }
        let expires_at = Utc::now() + Duration::hours(i64::from(expiry_hours));

        // Write the blob before the record so a half-created share never
        // points at missing bytes.
        let mut blob_key = None;
        let mut file_name = None;
        let mut file_size = None;
        let mut file_type = None;

        if let Some(file) = req.file {
            let key = format!("shares/{}", Uuid::new_v4());
            self.storage.write(&key, file.data.clone()).await?;

            file_size = Some(file.data.len() as i64);
            file_type = Some(
                file.content_type
                    .filter(|t| !t.is_empty())
                    .or_else(|| mime_from_name(&file.name))
                    .unwrap_or_else(|| "application/octet-stream".to_string()),
            );
            file_name = Some(file.name);
            blob_key = Some(key);
        }

        let share = match self
            .insert_with_fresh_code(text, file_name, file_size, file_type, blob_key.clone(), expires_at)
            .await
        {
            Ok(share) => share,
            Err(err) => {
                // The record never landed; reclaim the blob.
                if let Some(ref key) = blob_key {
                    if let Err(cleanup_err) = self.storage.delete(key).await {
                        warn!(key, error = %cleanup_err, "Failed to clean up orphaned blob");
                    }
                }
                return Err(err);
            }
        };

        info!(
            code = %share.code,
            has_text = share.text.is_some(),
            has_file = share.has_file(),
            expires_at = %share.expires_at,
            "Share created"
        );

        Ok(CreateShareResponse {
            code: share.code,
            expires_at: share.expires_at,
        })
    }

    /// Inserts the record, regenerating the code on collision.
    async fn insert_with_fresh_code(
        &self,
        text: Option<String>,
        file_name: Option<String>,
        file_size: Option<i64>,
        file_type: Option<String>,
        blob_key: Option<String>,
        expires_at: DateTime<Utc>,
    ) -> Result<Share, AppError> {
        for attempt in 1..=CODE_RETRY_ATTEMPTS {
            let create = CreateShare {
                code: self.codes.generate(),
                text: text.clone(),
                file_name: file_name.clone(),
                file_size,
                file_type: file_type.clone(),
                blob_key: blob_key.clone(),
                expires_at,
            };

            match self.repository.insert(&create).await {
                Ok(share) => return Ok(share),
                Err(err) if err.kind == ErrorKind::Conflict => {
                    warn!(attempt, code = %create.code, "Code collision, regenerating");
                }
                Err(err) => return Err(err),
            }
        }

        Err(AppError::conflict(
            "Could not allocate a free share code; try again",
        ))
    }

    /// Redeems a code: validates it, bumps the counter, and returns the share.
    pub async fn redeem_share(&self, code: &str) -> Result<RedeemedShare, AppError> {
        let code = ShareCode::parse(code)?;

        let share = self
            .repository
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::not_found("No active share found for this code"))?;

        if !share.is_redeemable_at(Utc::now()) {
            return Err(AppError::gone("This share has expired"));
        }

        let file = match share.blob_key {
            Some(ref key) => Some(self.build_file_payload(&share, key).await?),
            None => None,
        };

        // Count only after the payload is in hand; a failed blob read
        // must not consume a redemption.
        let download_count = self.repository.increment_download_count(&code).await?;

        info!(code = %share.code, download_count, "Share redeemed");

        Ok(RedeemedShare {
            code: share.code,
            text: share.text,
            file,
            status: share.status,
            download_count,
            created_at: share.created_at,
            expires_at: share.expires_at,
        })
    }

    /// Opens the file payload of a share for streaming without bumping the
    /// redemption counter again.
    pub async fn open_file(&self, code: &str) -> Result<(Share, ByteStream), AppError> {
        let code = ShareCode::parse(code)?;

        let share = self
            .repository
            .find_by_code(&code)
            .await?
            .ok_or_else(|| AppError::not_found("No active share found for this code"))?;

        if !share.is_redeemable_at(Utc::now()) {
            return Err(AppError::gone("This share has expired"));
        }

        let key = share
            .blob_key
            .clone()
            .ok_or_else(|| AppError::not_found("This share has no file payload"))?;

        let stream = self.storage.read(&key).await?;
        Ok((share, stream))
    }

    /// Builds the payload view: inline data URL for in-memory storage,
    /// download URL otherwise.
    async fn build_file_payload(&self, share: &Share, key: &str) -> Result<FilePayload, AppError> {
        let name = share.file_name.clone().unwrap_or_else(|| "file".to_string());
        let size = share.file_size.unwrap_or(0);
        let mime_type = share
            .file_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let source = if self.storage.serves_inline() {
            let bytes = self.storage.read_bytes(key).await?;
            let encoded = BASE64.encode(&bytes);
            PayloadSource::DataUrl(format!("data:{mime_type};base64,{encoded}"))
        } else {
            PayloadSource::DownloadUrl(format!(
                "{}/api/shares/{}/file",
                self.limits.public_base_url.trim_end_matches('/'),
                share.code
            ))
        };

        Ok(FilePayload {
            name,
            size,
            mime_type,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use droplink_repository::memory::MemoryShareRepository;
    use droplink_storage::providers::memory::MemoryBlobStore;

    fn make_service() -> ShareService {
        let repository = Arc::new(RepositoryManager::from_repository(Arc::new(
            MemoryShareRepository::new(),
        )));
        let storage = Arc::new(StorageManager::from_store(Arc::new(MemoryBlobStore::new())));
        ShareService::new(repository, storage, ShareConfig::default(), 52_428_800)
    }

    fn text_request(text: &str) -> CreateShareRequest {
        CreateShareRequest {
            text: Some(text.to_string()),
            file: None,
            expiry_hours: Some(1),
        }
    }

    #[tokio::test]
    async fn test_create_then_redeem_text() {
        let service = make_service();
        let created = service.create_share(text_request("hello there")).await.unwrap();

        let redeemed = service.redeem_share(created.code.as_str()).await.unwrap();
        assert_eq!(redeemed.text.as_deref(), Some("hello there"));
        assert_eq!(redeemed.download_count, 1);
        assert!(redeemed.file.is_none());
    }

    #[tokio::test]
    async fn test_redeem_is_case_insensitive() {
        let service = make_service();
        let created = service.create_share(text_request("case test")).await.unwrap();

        let lowered = created.code.as_str().to_lowercase();
        let redeemed = service.redeem_share(&lowered).await.unwrap();
        assert_eq!(redeemed.code, created.code);
    }

    #[tokio::test]
    async fn test_counter_increments_per_redemption() {
        let service = make_service();
        let created = service.create_share(text_request("counted")).await.unwrap();

        service.redeem_share(created.code.as_str()).await.unwrap();
        let second = service.redeem_share(created.code.as_str()).await.unwrap();
        assert_eq!(second.download_count, 2);
    }

    #[tokio::test]
    async fn test_empty_request_is_rejected() {
        let service = make_service();
        let err = service
            .create_share(CreateShareRequest::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_whitespace_text_is_rejected() {
        let service = make_service();
        let err = service.create_share(text_request("   ")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_oversized_text_is_rejected() {
        let service = make_service();
        let err = service
            .create_share(text_request(&"x".repeat(10_001)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_expiry_bounds() {
        let service = make_service();
        for hours in [0u32, 169] {
            let err = service
                .create_share(CreateShareRequest {
                    text: Some("bounds".to_string()),
                    file: None,
                    expiry_hours: Some(hours),
                })
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation, "hours = {hours}");
        }
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let service = make_service();
        let err = service.redeem_share("AB2C3D").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_invalid_code_is_validation_error() {
        let service = make_service();
        let err = service.redeem_share("not a code!").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_file_share_inlines_data_url_from_memory_storage() {
        let service = make_service();
        let created = service
            .create_share(CreateShareRequest {
                text: None,
                file: Some(FileUpload {
                    name: "notes.txt".to_string(),
                    content_type: None,
                    data: Bytes::from("file contents"),
                }),
                expiry_hours: Some(1),
            })
            .await
            .unwrap();

        let redeemed = service.redeem_share(created.code.as_str()).await.unwrap();
        let file = redeemed.file.expect("file payload expected");
        assert_eq!(file.name, "notes.txt");
        assert_eq!(file.mime_type, "text/plain");
        match file.source {
            PayloadSource::DataUrl(url) => {
                assert!(url.starts_with("data:text/plain;base64,"));
                let encoded = url.rsplit(',').next().unwrap();
                let decoded = BASE64.decode(encoded).unwrap();
                assert_eq!(decoded, b"file contents");
            }
            PayloadSource::DownloadUrl(_) => panic!("memory storage should inline the payload"),
        }
    }

    #[tokio::test]
    async fn test_failed_blob_read_leaves_counter_untouched() {
        let repository = Arc::new(RepositoryManager::from_repository(Arc::new(
            MemoryShareRepository::new(),
        )));
        let storage = Arc::new(StorageManager::from_store(Arc::new(MemoryBlobStore::new())));
        let service = ShareService::new(
            repository.clone(),
            storage,
            ShareConfig::default(),
            52_428_800,
        );

        // Record points at a blob that was never written.
        let code = ShareCode::parse("MSSNGX").unwrap();
        repository
            .insert(&CreateShare {
                code: code.clone(),
                text: None,
                file_name: Some("gone.bin".to_string()),
                file_size: Some(4),
                file_type: Some("application/octet-stream".to_string()),
                blob_key: Some("shares/does-not-exist".to_string()),
                expires_at: Utc::now() + Duration::hours(1),
            })
            .await
            .unwrap();

        let err = service.redeem_share(code.as_str()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let stored = repository
            .find_by_code(&code)
            .await
            .unwrap()
            .expect("record should survive the failed redemption");
        assert_eq!(stored.download_count, 0);
    }

    #[tokio::test]
    async fn test_oversized_file_is_rejected() {
        let repository = Arc::new(RepositoryManager::from_repository(Arc::new(
            MemoryShareRepository::new(),
        )));
        let storage = Arc::new(StorageManager::from_store(Arc::new(MemoryBlobStore::new())));
        // Tiny limit so the test does not allocate 50 MiB.
        let service = ShareService::new(repository, storage, ShareConfig::default(), 8);

        let err = service
            .create_share(CreateShareRequest {
                text: None,
                file: Some(FileUpload {
                    name: "big.bin".to_string(),
                    content_type: None,
                    data: Bytes::from(vec![0u8; 9]),
                }),
                expiry_hours: Some(1),
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_open_file_streams_without_counting() {
        use futures::StreamExt;

        let service = make_service();
        let created = service
            .create_share(CreateShareRequest {
                text: None,
                file: Some(FileUpload {
                    name: "data.bin".to_string(),
                    content_type: Some("application/octet-stream".to_string()),
                    data: Bytes::from("stream me"),
                }),
                expiry_hours: Some(1),
            })
            .await
            .unwrap();

        let (share, mut stream) = service.open_file(created.code.as_str()).await.unwrap();
        assert_eq!(share.download_count, 0);

        let mut collected = Vec::new();
        while let Some(chunk) = stream.next().await {
            collected.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(collected, b"stream me");
    }

    #[tokio::test]
    async fn test_open_file_on_text_share_is_not_found() {
        let service = make_service();
        let created = service.create_share(text_request("text only")).await.unwrap();

        let err = match service.open_file(created.code.as_str()).await {
            Ok(_) => panic!("expected open_file on a text share to fail"),
            Err(err) => err,
        };
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
