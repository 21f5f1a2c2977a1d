//! File-store abstraction trait
//!
//! This module defines the `FileStore` trait the widget engine consumes.
//! Implementations wrap whatever remote platform actually owns the files;
//! errors they raise are reduced to a single display string before they
//! reach a notification.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use filedock_core::models::{FileContent, FileRecord};

/// Fallback shown when an error carries no usable message.
const UNKNOWN_ERROR: &str = "Unknown error";

/// File-store operation errors
#[derive(Debug, Error)]
pub enum FileStoreError {
    #[error("List failed: {0}")]
    ListFailed(String),

    #[error("Fetch failed: {0}")]
    FetchFailed(String),

    #[error("Measure failed: {0}")]
    MeasureFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Share failed: {0}")]
    ShareFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    /// Structured error body returned by the backing platform, possibly
    /// carrying several messages for one call.
    #[error("Backend error")]
    Backend { messages: Vec<String> },
}

/// Result type for file-store operations
pub type StoreResult<T> = Result<T, FileStoreError>;

impl FileStoreError {
    /// Reduce this error to one human-readable string for display.
    ///
    /// A structured backend body is unwrapped and its messages joined; a
    /// plain operation error yields its message; anything without a usable
    /// message collapses to a fixed "Unknown error" string.
    pub fn reduced_message(&self) -> String {
        let message = match self {
            FileStoreError::Backend { messages } => messages
                .iter()
                .filter(|m| !m.trim().is_empty())
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            FileStoreError::ListFailed(msg)
            | FileStoreError::FetchFailed(msg)
            | FileStoreError::MeasureFailed(msg)
            | FileStoreError::DeleteFailed(msg)
            | FileStoreError::UploadFailed(msg)
            | FileStoreError::ShareFailed(msg)
            | FileStoreError::NotFound(msg) => msg.trim().to_string(),
        };

        if message.is_empty() {
            UNKNOWN_ERROR.to_string()
        } else {
            message
        }
    }
}

impl From<FileStoreError> for filedock_core::AppError {
    fn from(err: FileStoreError) -> Self {
        filedock_core::AppError::Store(err.reduced_message())
    }
}

/// File-store abstraction trait
///
/// All backends (platform RPC adapters, the in-memory store) implement this
/// trait, so the engines never couple to transport details. Every method is
/// a remote call and may fail; per-call error policy is the caller's.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// List the files attached to an owning record, in the store's order.
    async fn list_files(&self, owner_id: Uuid) -> StoreResult<Vec<FileRecord>>;

    /// Fetch the raw content of one file version.
    async fn fetch_content(&self, version_id: Uuid) -> StoreResult<FileContent>;

    /// Measure the byte size of each listed document in one batched call.
    async fn measure_sizes(&self, document_ids: &[Uuid]) -> StoreResult<HashMap<Uuid, u64>>;

    /// Delete several documents in one batched call.
    async fn delete_files(&self, document_ids: &[Uuid]) -> StoreResult<()>;

    /// Delete one document.
    async fn delete_file(&self, document_id: Uuid) -> StoreResult<()>;

    /// Detach a document from the owning record without deleting it.
    async fn remove_from_record(&self, document_id: Uuid, owner_id: Uuid) -> StoreResult<()>;

    /// Upload one file and attach it to the owning record.
    async fn upload_one(&self, data: Bytes, file_name: &str, owner_id: Uuid) -> StoreResult<()>;

    /// Create a shareable link for one file version.
    async fn create_share_link(&self, version_id: Uuid) -> StoreResult<String>;
}
