//! Widget facade
//!
//! One `FileWidget` per hosted record-detail view. It owns the refreshable
//! file-list snapshot and the current configuration, and delegates the two
//! heavy operations to the archive and upload engines.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use filedock_core::models::{FileList, FileRecord, UploadedFile};
use filedock_core::validation::is_extension_blocked;
use filedock_core::{AppError, RawWidgetConfig, WidgetConfig};
use filedock_services::archive::{ArchiveOutcome, ArchiveService};
use filedock_services::hooks::ListRefresher;
use filedock_services::report::{Notification, Severity};
use filedock_services::upload::messages::extension_blocked_message;
use filedock_services::upload::{UploadOutcome, UploadPipeline};
use filedock_store::FileStore;

use crate::hooks::WidgetHooks;
use crate::row_action::RowAction;

const DEFAULT_CARD_TITLE: &str = "Files";
const DELETE_CONFIRM: &str = "Are you sure you want to delete this file?";
const REMOVE_CONFIRM: &str = "Are you sure you want to remove this file from the record?";

/// Shared snapshot state, also reachable from the upload pipeline's refresh
/// hook.
struct Snapshot {
    owner_id: Uuid,
    files: RwLock<Arc<FileList>>,
    error: RwLock<Option<String>>,
    expanded: AtomicBool,
}

impl Snapshot {
    fn new(owner_id: Uuid) -> Self {
        Snapshot {
            owner_id,
            files: RwLock::new(Arc::new(FileList::default())),
            error: RwLock::new(None),
            expanded: AtomicBool::new(false),
        }
    }

    /// Replace the snapshot wholesale from the store. A list-level error
    /// clears the list and records the reduced message.
    async fn refresh(&self, store: &dyn FileStore) {
        match store.list_files(self.owner_id).await {
            Ok(records) => {
                tracing::debug!(owner = %self.owner_id, files = records.len(), "File list refreshed");
                *self.files.write().await = Arc::new(FileList::new(records));
                *self.error.write().await = None;
                self.expanded.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                let reason = e.reduced_message();
                tracing::error!(owner = %self.owner_id, error = %reason, "File list refresh failed");
                *self.files.write().await = Arc::new(FileList::default());
                *self.error.write().await = Some(reason);
            }
        }
    }
}

struct SnapshotRefresher {
    snapshot: Arc<Snapshot>,
    store: Arc<dyn FileStore>,
}

#[async_trait]
impl ListRefresher for SnapshotRefresher {
    async fn refresh(&self) {
        self.snapshot.refresh(self.store.as_ref()).await;
    }
}

pub struct FileWidget {
    snapshot: Arc<Snapshot>,
    card_title: String,
    record_name: RwLock<Option<String>>,
    config: RwLock<Arc<WidgetConfig>>,
    store: Arc<dyn FileStore>,
    hooks: WidgetHooks,
    archive: ArchiveService,
    upload: UploadPipeline,
}

impl FileWidget {
    pub fn new(owner_id: Uuid, store: Arc<dyn FileStore>, hooks: WidgetHooks) -> Self {
        let snapshot = Arc::new(Snapshot::new(owner_id));
        let archive = ArchiveService::new(
            store.clone(),
            hooks.notifier.clone(),
            hooks.saver.clone(),
        );
        let upload = UploadPipeline::new(
            store.clone(),
            hooks.notifier.clone(),
            Arc::new(SnapshotRefresher {
                snapshot: snapshot.clone(),
                store: store.clone(),
            }),
        );

        FileWidget {
            snapshot,
            card_title: DEFAULT_CARD_TITLE.to_string(),
            record_name: RwLock::new(None),
            config: RwLock::new(Arc::new(WidgetConfig::default())),
            store,
            hooks,
            archive,
            upload,
        }
    }

    pub fn with_card_title(mut self, title: impl Into<String>) -> Self {
        self.card_title = title.into();
        self
    }

    // ----- Configuration surface -----

    /// Rebuild the configuration from raw host strings. Normalization
    /// happens here, never at use sites.
    pub async fn configure(&self, raw: &RawWidgetConfig) {
        *self.config.write().await = Arc::new(WidgetConfig::from_raw(raw));
    }

    pub async fn config(&self) -> Arc<WidgetConfig> {
        self.config.read().await.clone()
    }

    pub async fn set_record_name(&self, name: Option<String>) {
        *self.record_name.write().await = name;
    }

    // ----- Snapshot surface -----

    pub async fn files(&self) -> Arc<FileList> {
        self.snapshot.files.read().await.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.snapshot.error.read().await.clone()
    }

    pub async fn has_files(&self) -> bool {
        !self.files().await.is_empty()
    }

    pub async fn file_count(&self) -> usize {
        self.files().await.len()
    }

    pub async fn header_title(&self) -> String {
        format!("{} ({})", self.card_title, self.file_count().await)
    }

    /// The rows currently shown: the whole snapshot, or the configured
    /// window when a display limit is set and the list is not expanded.
    pub async fn displayed_files(&self) -> Vec<FileRecord> {
        let files = self.files().await;
        let limit = self.config().await.initial_files_displayed();
        if limit == 0 || self.snapshot.expanded.load(Ordering::Relaxed) {
            return files.records().to_vec();
        }
        files.records().iter().take(limit).cloned().collect()
    }

    pub async fn remaining_files_count(&self) -> usize {
        let limit = self.config().await.initial_files_displayed();
        self.file_count().await.saturating_sub(limit)
    }

    pub fn show_all(&self) {
        self.snapshot.expanded.store(true, Ordering::Relaxed);
    }

    pub async fn refresh_files(&self) {
        self.snapshot.refresh(self.store.as_ref()).await;
    }

    // ----- Core operations -----

    /// Build one archive from the current snapshot and hand it to the
    /// save-as sink.
    pub async fn download_all(&self) -> Result<ArchiveOutcome, AppError> {
        let files = self.files().await;
        let record_name = self.record_name.read().await.clone();
        self.archive
            .download_all(&files, record_name.as_deref())
            .await
    }

    /// Validate the batch the host just created, delete the rejects, and
    /// refresh the snapshot.
    pub async fn upload_finished(
        &self,
        uploaded: Vec<UploadedFile>,
    ) -> Result<UploadOutcome, AppError> {
        let config = self.config().await;
        self.upload.validate_and_clean(uploaded, &config).await
    }

    /// Non-validating upload variant: extension rules are applied before
    /// anything reaches the store, so no compensating delete is needed.
    pub async fn upload_files(&self, files: Vec<(String, Bytes)>) -> Result<(), AppError> {
        let config = self.config().await;

        let mut blocked = Vec::new();
        let mut allowed = Vec::new();
        for (name, data) in files {
            if is_extension_blocked(
                &name,
                config.allowed_extensions(),
                config.excluded_extensions(),
            ) {
                blocked.push(UploadedFile {
                    document_id: Uuid::nil(),
                    name,
                });
            } else {
                allowed.push((name, data));
            }
        }

        if !blocked.is_empty() {
            self.hooks
                .notifier
                .notify(Notification {
                    title: "Upload Blocked".to_string(),
                    message: extension_blocked_message(&blocked, &config),
                    severity: Severity::Error,
                })
                .await;
        }

        if allowed.is_empty() {
            return Ok(());
        }

        let total = allowed.len();
        let mut failed = Vec::new();
        for (name, data) in allowed {
            if let Err(e) = self
                .store
                .upload_one(data, &name, self.snapshot.owner_id)
                .await
            {
                let reason = e.reduced_message();
                tracing::warn!(file = %name, error = %reason, "Upload failed");
                failed.push(format!("{} ({})", name, reason));
            }
        }

        self.refresh_files().await;

        if failed.is_empty() {
            self.hooks
                .notifier
                .notify(Notification::success(format!(
                    "{} file(s) uploaded successfully.",
                    total
                )))
                .await;
        } else {
            self.hooks
                .notifier
                .notify(Notification::warning(
                    "Upload Complete (with errors)",
                    format!("Failed: {}", failed.join(", ")),
                ))
                .await;
        }

        Ok(())
    }

    // ----- Row actions -----

    pub async fn row_action(&self, action: RowAction, document_id: Uuid) -> Result<(), AppError> {
        match action {
            RowAction::Download => self.download_single(document_id).await,
            RowAction::Share | RowAction::Details => {
                self.hooks.navigator.to_file_detail(document_id).await;
                Ok(())
            }
            RowAction::PublicLink => {
                let file = self.find_file(document_id).await?;
                self.hooks
                    .navigator
                    .to_content_delivery(file.version_id)
                    .await;
                Ok(())
            }
            RowAction::Edit => {
                self.hooks.navigator.to_file_edit(document_id).await;
                Ok(())
            }
            RowAction::Delete => self.confirm_and_delete(document_id).await,
            RowAction::Remove => self.confirm_and_remove(document_id).await,
        }
    }

    /// Preview overlay scoped to the whole snapshot.
    pub async fn preview(&self, document_id: Uuid) {
        let all = self.files().await.iter().map(|f| f.document_id).collect();
        self.hooks
            .navigator
            .to_file_preview(document_id, all)
            .await;
    }

    /// Create a shareable link for one row.
    pub async fn public_link(&self, document_id: Uuid) -> Result<String, AppError> {
        let file = self.find_file(document_id).await?;
        match self.store.create_share_link(file.version_id).await {
            Ok(url) => Ok(url),
            Err(e) => {
                let reason = e.reduced_message();
                self.hooks
                    .notifier
                    .notify(Notification::error(reason.clone()))
                    .await;
                Err(AppError::Store(reason))
            }
        }
    }

    async fn find_file(&self, document_id: Uuid) -> Result<FileRecord, AppError> {
        self.files()
            .await
            .find_by_document_id(document_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No file with document id {}", document_id)))
    }

    async fn download_single(&self, document_id: Uuid) -> Result<(), AppError> {
        let file = self.find_file(document_id).await?;
        match self.store.fetch_content(file.version_id).await {
            Ok(content) => {
                if let Err(e) = self
                    .hooks
                    .saver
                    .save(&content.file_name, content.data)
                    .await
                {
                    self.hooks
                        .notifier
                        .notify(Notification::error(format!("Failed to save file: {}", e)))
                        .await;
                }
            }
            Err(e) => {
                self.hooks
                    .notifier
                    .notify(Notification::error(e.reduced_message()))
                    .await;
            }
        }
        Ok(())
    }

    async fn confirm_and_delete(&self, document_id: Uuid) -> Result<(), AppError> {
        if !self.hooks.confirm.confirm(DELETE_CONFIRM).await {
            return Ok(());
        }
        match self.store.delete_file(document_id).await {
            Ok(()) => {
                self.hooks
                    .notifier
                    .notify(Notification::success("File deleted."))
                    .await;
                self.refresh_files().await;
            }
            Err(e) => {
                self.hooks
                    .notifier
                    .notify(Notification::error(e.reduced_message()))
                    .await;
            }
        }
        Ok(())
    }

    async fn confirm_and_remove(&self, document_id: Uuid) -> Result<(), AppError> {
        if !self.hooks.confirm.confirm(REMOVE_CONFIRM).await {
            return Ok(());
        }
        match self
            .store
            .remove_from_record(document_id, self.snapshot.owner_id)
            .await
        {
            Ok(()) => {
                self.hooks
                    .notifier
                    .notify(Notification::success("File removed from record."))
                    .await;
                self.refresh_files().await;
            }
            Err(e) => {
                self.hooks
                    .notifier
                    .notify(Notification::error(e.reduced_message()))
                    .await;
            }
        }
        Ok(())
    }
}
