use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One file attached to the owning record.
///
/// Owned by the external file store; the widget holds a read-only snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub document_id: Uuid,
    pub version_id: Uuid,
    pub title: String,
    pub extension: Option<String>,
    /// Declared type tag (e.g. "PDF", "WORD") used for icon lookup.
    pub file_type: String,
    pub content_size: u64,
    pub last_modified: DateTime<Utc>,
}

impl FileRecord {
    /// Display name: `title.extension` when an extension is present.
    pub fn display_name(&self) -> String {
        match self.extension.as_deref() {
            Some(ext) if !ext.is_empty() => format!("{}.{}", self.title, ext),
            _ => self.title.clone(),
        }
    }
}

/// Ordered snapshot of the files attached to the owning record.
///
/// Replaced wholesale on every successful refresh, never mutated in place.
/// Order reflects the store's return order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileList {
    records: Vec<FileRecord>,
}

impl FileList {
    pub fn new(records: Vec<FileRecord>) -> Self {
        FileList { records }
    }

    pub fn records(&self) -> &[FileRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cross-reference a row by document id for single-row actions.
    pub fn find_by_document_id(&self, document_id: Uuid) -> Option<&FileRecord> {
        self.records.iter().find(|f| f.document_id == document_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.records.iter()
    }
}

/// Raw content returned by the store for one file version.
#[derive(Debug, Clone)]
pub struct FileContent {
    pub file_name: String,
    pub data: Bytes,
}

/// A file the host reports as just created by an upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub document_id: Uuid,
    pub name: String,
}
