//! In-memory file-store backend
//!
//! Keeps attached files in a `tokio::sync::RwLock` map keyed by owning
//! record. Used by the demo binary and by tests that need a working store
//! without a remote platform.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use filedock_core::models::{FileContent, FileRecord};
use filedock_core::validation::file_extension;

use crate::traits::{FileStore, FileStoreError, StoreResult};

struct StoredFile {
    record: FileRecord,
    data: Bytes,
}

/// In-memory file store keyed by owning record id.
#[derive(Default)]
pub struct InMemoryFileStore {
    files: RwLock<HashMap<Uuid, Vec<StoredFile>>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one file under an owner, returning its record.
    pub async fn seed(&self, owner_id: Uuid, file_name: &str, data: Bytes) -> FileRecord {
        let record = build_record(file_name, data.len() as u64);
        let mut files = self.files.write().await;
        files
            .entry(owner_id)
            .or_default()
            .push(StoredFile {
                record: record.clone(),
                data,
            });
        record
    }

    pub async fn file_count(&self, owner_id: Uuid) -> usize {
        self.files
            .read()
            .await
            .get(&owner_id)
            .map(|v| v.len())
            .unwrap_or(0)
    }
}

fn build_record(file_name: &str, content_size: u64) -> FileRecord {
    let extension = file_extension(file_name);
    let title = match file_name.rfind('.') {
        Some(idx) if !extension.is_empty() => file_name[..idx].to_string(),
        _ => file_name.to_string(),
    };
    FileRecord {
        document_id: Uuid::new_v4(),
        version_id: Uuid::new_v4(),
        title,
        extension: if extension.is_empty() {
            None
        } else {
            Some(extension.clone())
        },
        file_type: extension.to_uppercase(),
        content_size,
        last_modified: Utc::now(),
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn list_files(&self, owner_id: Uuid) -> StoreResult<Vec<FileRecord>> {
        let files = self.files.read().await;
        Ok(files
            .get(&owner_id)
            .map(|v| v.iter().map(|f| f.record.clone()).collect())
            .unwrap_or_default())
    }

    async fn fetch_content(&self, version_id: Uuid) -> StoreResult<FileContent> {
        let files = self.files.read().await;
        files
            .values()
            .flatten()
            .find(|f| f.record.version_id == version_id)
            .map(|f| FileContent {
                file_name: f.record.display_name(),
                data: f.data.clone(),
            })
            .ok_or_else(|| FileStoreError::NotFound(version_id.to_string()))
    }

    async fn measure_sizes(&self, document_ids: &[Uuid]) -> StoreResult<HashMap<Uuid, u64>> {
        let files = self.files.read().await;
        Ok(files
            .values()
            .flatten()
            .filter(|f| document_ids.contains(&f.record.document_id))
            .map(|f| (f.record.document_id, f.data.len() as u64))
            .collect())
    }

    async fn delete_files(&self, document_ids: &[Uuid]) -> StoreResult<()> {
        tracing::debug!(count = document_ids.len(), "Batch delete");
        let mut files = self.files.write().await;
        for stored in files.values_mut() {
            stored.retain(|f| !document_ids.contains(&f.record.document_id));
        }
        Ok(())
    }

    async fn delete_file(&self, document_id: Uuid) -> StoreResult<()> {
        let mut files = self.files.write().await;
        for stored in files.values_mut() {
            let before = stored.len();
            stored.retain(|f| f.record.document_id != document_id);
            if stored.len() < before {
                return Ok(());
            }
        }
        Err(FileStoreError::NotFound(document_id.to_string()))
    }

    async fn remove_from_record(&self, document_id: Uuid, owner_id: Uuid) -> StoreResult<()> {
        let mut files = self.files.write().await;
        let stored = files
            .get_mut(&owner_id)
            .ok_or_else(|| FileStoreError::NotFound(owner_id.to_string()))?;
        let before = stored.len();
        stored.retain(|f| f.record.document_id != document_id);
        if stored.len() < before {
            Ok(())
        } else {
            Err(FileStoreError::NotFound(document_id.to_string()))
        }
    }

    async fn upload_one(&self, data: Bytes, file_name: &str, owner_id: Uuid) -> StoreResult<()> {
        self.seed(owner_id, file_name, data).await;
        Ok(())
    }

    async fn create_share_link(&self, version_id: Uuid) -> StoreResult<String> {
        let files = self.files.read().await;
        if files
            .values()
            .flatten()
            .any(|f| f.record.version_id == version_id)
        {
            Ok(format!("https://files.invalid/share/{}", version_id))
        } else {
            Err(FileStoreError::NotFound(version_id.to_string()))
        }
    }
}
