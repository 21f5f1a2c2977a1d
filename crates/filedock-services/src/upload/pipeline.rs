//! Upload validation pipeline
//!
//! The host creates files first and tells the widget afterwards, so
//! validation here is two-phase rejection followed by compensating
//! deletion: extension rules, then a batched size measurement, then one
//! batched delete of everything blocked, then exactly one validation
//! notification, a list refresh and (when anything survived) a success
//! notification.

use std::sync::Arc;
use uuid::Uuid;

use filedock_core::validation::{is_extension_blocked, is_oversized_for_upload};
use filedock_core::{AppError, UploadedFile, WidgetConfig};
use filedock_store::FileStore;

use crate::hooks::{ListRefresher, Notifier};
use crate::report::{Notification, Severity};
use crate::single_flight::SingleFlight;

use super::messages::{
    combined_blocked_message, extension_blocked_message, size_blocked_message,
};

/// A survivor of the extension check that failed the size check, annotated
/// with its measured size for reporting.
#[derive(Debug, Clone)]
pub struct SizeBlockedFile {
    pub file: UploadedFile,
    pub measured_bytes: u64,
}

/// What one settled batch classified, for the caller and for tests.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub extension_blocked: Vec<UploadedFile>,
    pub size_blocked: Vec<SizeBlockedFile>,
    pub survivors: Vec<UploadedFile>,
}

/// Result of one upload-completion event.
#[derive(Debug)]
pub enum UploadOutcome {
    /// Another batch is still being validated; this event was ignored.
    Busy,
    Completed(UploadReport),
}

/// Transient per-batch state. Built up phase by phase, dropped when the
/// pipeline finishes.
#[derive(Default)]
struct UploadBatch {
    extension_blocked: Vec<UploadedFile>,
    size_candidates: Vec<UploadedFile>,
    size_blocked: Vec<SizeBlockedFile>,
}

impl UploadBatch {
    fn blocked_document_ids(&self) -> Vec<Uuid> {
        self.extension_blocked
            .iter()
            .map(|f| f.document_id)
            .chain(self.size_blocked.iter().map(|e| e.file.document_id))
            .collect()
    }
}

pub struct UploadPipeline {
    store: Arc<dyn FileStore>,
    notifier: Arc<dyn Notifier>,
    refresher: Arc<dyn ListRefresher>,
    guard: SingleFlight,
}

impl UploadPipeline {
    pub fn new(
        store: Arc<dyn FileStore>,
        notifier: Arc<dyn Notifier>,
        refresher: Arc<dyn ListRefresher>,
    ) -> Self {
        Self {
            store,
            notifier,
            refresher,
            guard: SingleFlight::new(),
        }
    }

    /// Validate one batch of freshly created files, delete the rejects, and
    /// report. Invoked once per upload-completion event.
    pub async fn validate_and_clean(
        &self,
        uploaded: Vec<UploadedFile>,
        config: &WidgetConfig,
    ) -> Result<UploadOutcome, AppError> {
        let Some(_permit) = self.guard.try_acquire() else {
            tracing::debug!("Upload batch already being validated; ignoring event");
            return Ok(UploadOutcome::Busy);
        };

        tracing::info!(candidates = uploaded.len(), "Validating upload batch");

        // Phase 1: extension check.
        let mut batch = UploadBatch::default();
        for file in uploaded {
            if is_extension_blocked(
                &file.name,
                config.allowed_extensions(),
                config.excluded_extensions(),
            ) {
                batch.extension_blocked.push(file);
            } else {
                batch.size_candidates.push(file);
            }
        }

        // Phase 2: batched size check. A failed measurement call skips
        // enforcement for this batch; survivors are kept, not blocked.
        let survivors = self.apply_size_check(&mut batch, config).await;

        // Phase 3: compensating delete of everything blocked.
        let blocked_ids = batch.blocked_document_ids();
        if !blocked_ids.is_empty() {
            tracing::info!(blocked = blocked_ids.len(), "Deleting blocked uploads");
            if let Err(e) = self.store.delete_files(&blocked_ids).await {
                let reason = e.reduced_message();
                tracing::error!(error = %reason, "Failed to delete blocked uploads");
                self.notifier.notify(Notification::error(reason)).await;
            }
        }

        // Phase 4: one validation notification, then refresh, then success
        // for any survivors.
        if let Some(message) = self.validation_message(&batch, config) {
            self.notifier
                .notify(Notification {
                    title: "Upload Blocked".to_string(),
                    message,
                    severity: Severity::Error,
                })
                .await;
        }

        self.refresher.refresh().await;

        let everything_blocked = !blocked_ids.is_empty() && survivors.is_empty();
        if !everything_blocked {
            self.notifier
                .notify(Notification::success("File(s) uploaded successfully."))
                .await;
        }

        Ok(UploadOutcome::Completed(UploadReport {
            extension_blocked: batch.extension_blocked,
            size_blocked: batch.size_blocked,
            survivors,
        }))
    }

    /// Split the extension survivors by measured size. Returns the files
    /// that remain after the check.
    async fn apply_size_check(
        &self,
        batch: &mut UploadBatch,
        config: &WidgetConfig,
    ) -> Vec<UploadedFile> {
        let candidates = std::mem::take(&mut batch.size_candidates);
        if !config.has_size_limit() || candidates.is_empty() {
            return candidates;
        }

        let ids: Vec<Uuid> = candidates.iter().map(|f| f.document_id).collect();
        let sizes = match self.store.measure_sizes(&ids).await {
            Ok(sizes) => sizes,
            Err(e) => {
                tracing::warn!(
                    error = %e.reduced_message(),
                    "Size measurement failed; skipping size enforcement for this batch"
                );
                return candidates;
            }
        };

        let limit = config.max_file_size_bytes();
        let mut survivors = Vec::new();
        for file in candidates {
            match sizes.get(&file.document_id) {
                Some(&measured) if is_oversized_for_upload(measured, limit) => {
                    batch.size_blocked.push(SizeBlockedFile {
                        file,
                        measured_bytes: measured,
                    });
                }
                _ => survivors.push(file),
            }
        }
        survivors
    }

    fn validation_message(&self, batch: &UploadBatch, config: &WidgetConfig) -> Option<String> {
        match (
            batch.extension_blocked.is_empty(),
            batch.size_blocked.is_empty(),
        ) {
            (false, false) => Some(combined_blocked_message(
                &batch.extension_blocked,
                &batch.size_blocked,
                config,
            )),
            (false, true) => Some(extension_blocked_message(&batch.extension_blocked, config)),
            (true, false) => Some(size_blocked_message(
                &batch.size_blocked,
                config.max_file_size_bytes(),
            )),
            (true, true) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bytes::Bytes;
    use filedock_core::models::{FileContent, FileRecord};
    use filedock_core::RawWidgetConfig;
    use filedock_store::{FileStoreError, StoreResult};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::hooks::BufferingNotifier;

    /// Store double: serves a fixed size map, optionally fails measuring or
    /// deleting, and records delete calls.
    #[derive(Default)]
    struct BatchStore {
        sizes: Mutex<HashMap<Uuid, u64>>,
        fail_measure: bool,
        fail_delete: bool,
        measure_calls: AtomicUsize,
        delete_calls: Mutex<Vec<Vec<Uuid>>>,
    }

    #[async_trait]
    impl FileStore for BatchStore {
        async fn list_files(&self, _owner_id: Uuid) -> StoreResult<Vec<FileRecord>> {
            Ok(vec![])
        }

        async fn fetch_content(&self, version_id: Uuid) -> StoreResult<FileContent> {
            Err(FileStoreError::NotFound(version_id.to_string()))
        }

        async fn measure_sizes(&self, document_ids: &[Uuid]) -> StoreResult<HashMap<Uuid, u64>> {
            self.measure_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_measure {
                return Err(FileStoreError::MeasureFailed("backend offline".to_string()));
            }
            let sizes = self.sizes.lock().unwrap();
            Ok(document_ids
                .iter()
                .filter_map(|id| sizes.get(id).map(|&s| (*id, s)))
                .collect())
        }

        async fn delete_files(&self, document_ids: &[Uuid]) -> StoreResult<()> {
            self.delete_calls
                .lock()
                .unwrap()
                .push(document_ids.to_vec());
            if self.fail_delete {
                return Err(FileStoreError::DeleteFailed("row locked".to_string()));
            }
            Ok(())
        }

        async fn delete_file(&self, _document_id: Uuid) -> StoreResult<()> {
            Ok(())
        }

        async fn remove_from_record(
            &self,
            _document_id: Uuid,
            _owner_id: Uuid,
        ) -> StoreResult<()> {
            Ok(())
        }

        async fn upload_one(
            &self,
            _data: Bytes,
            _file_name: &str,
            _owner_id: Uuid,
        ) -> StoreResult<()> {
            Ok(())
        }

        async fn create_share_link(&self, _version_id: Uuid) -> StoreResult<String> {
            Ok(String::new())
        }
    }

    /// Refresh hook that counts invocations.
    #[derive(Default)]
    struct CountingRefresher {
        count: AtomicUsize,
    }

    #[async_trait]
    impl ListRefresher for CountingRefresher {
        async fn refresh(&self) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn uploaded(name: &str) -> UploadedFile {
        UploadedFile {
            document_id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    fn config(excluded: &str, allowed: &str, max_bytes: u64) -> WidgetConfig {
        WidgetConfig::from_raw(&RawWidgetConfig {
            excluded_file_extensions: Some(excluded.to_string()),
            allowed_file_extensions: Some(allowed.to_string()),
            max_file_size_bytes: Some(max_bytes.to_string()),
            initial_files_displayed: None,
        })
    }

    fn pipeline(
        store: Arc<BatchStore>,
    ) -> (
        UploadPipeline,
        Arc<BufferingNotifier>,
        Arc<CountingRefresher>,
    ) {
        let notifier = Arc::new(BufferingNotifier::new());
        let refresher = Arc::new(CountingRefresher::default());
        let pipeline = UploadPipeline::new(store, notifier.clone(), refresher.clone());
        (pipeline, notifier, refresher)
    }

    fn completed(outcome: UploadOutcome) -> UploadReport {
        match outcome {
            UploadOutcome::Completed(report) => report,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mixed_batch_blocks_deletes_and_reports() {
        let store = Arc::new(BatchStore::default());
        let a = uploaded("a.exe");
        let b = uploaded("b.bat");
        let c = uploaded("c.pdf");
        let d = uploaded("d.pdf");
        let e = uploaded("e.pdf");
        {
            let mut sizes = store.sizes.lock().unwrap();
            sizes.insert(c.document_id, 25 * 1024 * 1024);
            sizes.insert(d.document_id, 1024);
            sizes.insert(e.document_id, 2048);
        }

        let (pipeline, notifier, refresher) = pipeline(store.clone());
        let cfg = config("exe,bat", "", 10 * 1024 * 1024);

        let report = completed(
            pipeline
                .validate_and_clean(
                    vec![a.clone(), b.clone(), c.clone(), d.clone(), e.clone()],
                    &cfg,
                )
                .await
                .unwrap(),
        );

        assert_eq!(report.extension_blocked.len(), 2);
        assert_eq!(report.size_blocked.len(), 1);
        assert_eq!(report.size_blocked[0].file.name, "c.pdf");
        assert_eq!(report.size_blocked[0].measured_bytes, 25 * 1024 * 1024);
        assert_eq!(report.survivors.len(), 2);

        // One batched measurement for the three extension survivors, one
        // batched delete for the three blocked documents.
        assert_eq!(store.measure_calls.load(Ordering::SeqCst), 1);
        let deletes = store.delete_calls.lock().unwrap().clone();
        assert_eq!(deletes.len(), 1);
        let mut deleted = deletes[0].clone();
        deleted.sort();
        let mut expected = vec![a.document_id, b.document_id, c.document_id];
        expected.sort();
        assert_eq!(deleted, expected);

        let notes = notifier.snapshot();
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "Upload Blocked");
        assert_eq!(notes[0].severity, Severity::Error);
        assert!(notes[0].message.contains("not allowed"));
        assert!(notes[0].message.contains("exceed"));
        assert_eq!(notes[1].severity, Severity::Success);
        assert_eq!(refresher.count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_fully_blocked_batch_has_no_success_notification() {
        let store = Arc::new(BatchStore::default());
        let (pipeline, notifier, refresher) = pipeline(store);
        let cfg = config("exe", "", 0);

        let report = completed(
            pipeline
                .validate_and_clean(vec![uploaded("a.exe"), uploaded("b.exe")], &cfg)
                .await
                .unwrap(),
        );

        assert!(report.survivors.is_empty());
        let notes = notifier.snapshot();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].title, "Upload Blocked");
        assert_eq!(refresher.count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_clean_batch_reports_success_only() {
        let store = Arc::new(BatchStore::default());
        let (pipeline, notifier, _refresher) = pipeline(store.clone());
        let cfg = config("exe", "", 0);

        let report = completed(
            pipeline
                .validate_and_clean(vec![uploaded("a.pdf")], &cfg)
                .await
                .unwrap(),
        );

        assert_eq!(report.survivors.len(), 1);
        // No size limit configured: the measurement call is never issued.
        assert_eq!(store.measure_calls.load(Ordering::SeqCst), 0);
        assert!(store.delete_calls.lock().unwrap().is_empty());

        let notes = notifier.snapshot();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_measurement_failure_keeps_survivors() {
        let store = Arc::new(BatchStore {
            fail_measure: true,
            ..Default::default()
        });
        let (pipeline, notifier, _refresher) = pipeline(store.clone());
        let cfg = config("", "", 10);

        let report = completed(
            pipeline
                .validate_and_clean(vec![uploaded("a.pdf"), uploaded("b.pdf")], &cfg)
                .await
                .unwrap(),
        );

        assert!(report.size_blocked.is_empty());
        assert_eq!(report.survivors.len(), 2);
        assert!(store.delete_calls.lock().unwrap().is_empty());

        // Degrades silently: only the success notification reaches the user.
        let notes = notifier.snapshot();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Success);
    }

    #[tokio::test]
    async fn test_unmeasured_survivor_is_kept() {
        // The measurement map can omit ids; those files pass.
        let store = Arc::new(BatchStore::default());
        let (pipeline, _notifier, _refresher) = pipeline(store);
        let cfg = config("", "", 10);

        let report = completed(
            pipeline
                .validate_and_clean(vec![uploaded("a.pdf")], &cfg)
                .await
                .unwrap(),
        );
        assert_eq!(report.survivors.len(), 1);
        assert!(report.size_blocked.is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_is_surfaced_and_does_not_reblock() {
        let store = Arc::new(BatchStore {
            fail_delete: true,
            ..Default::default()
        });
        let (pipeline, notifier, refresher) = pipeline(store);
        let cfg = config("exe", "", 0);

        let report = completed(
            pipeline
                .validate_and_clean(vec![uploaded("a.exe"), uploaded("b.pdf")], &cfg)
                .await
                .unwrap(),
        );

        assert_eq!(report.extension_blocked.len(), 1);
        assert_eq!(report.survivors.len(), 1);

        let notes = notifier.snapshot();
        assert_eq!(notes.len(), 3);
        assert_eq!(notes[0].severity, Severity::Error);
        assert_eq!(notes[0].message, "row locked");
        assert_eq!(notes[1].title, "Upload Blocked");
        assert_eq!(notes[2].severity, Severity::Success);
        assert_eq!(refresher.count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_event_refreshes_and_succeeds() {
        let store = Arc::new(BatchStore::default());
        let (pipeline, notifier, refresher) = pipeline(store);
        let cfg = config("", "", 0);

        let report = completed(pipeline.validate_and_clean(vec![], &cfg).await.unwrap());
        assert!(report.survivors.is_empty());

        let notes = notifier.snapshot();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].severity, Severity::Success);
        assert_eq!(refresher.count.load(Ordering::SeqCst), 1);
    }
}
