//! Archive assembly service
//!
//! Orchestrates one "download all" job: per-file fetch, size classification,
//! accumulation into an in-memory zip, final packaging and hand-off to the
//! save-as sink. Files are processed strictly one at a time; a fetch failure
//! is recorded and never aborts the job.

use bytes::Bytes;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::sync::Arc;

use filedock_core::constants::UNNAMED_ENTRY_PREFIX;
use filedock_core::models::FileList;
use filedock_core::validation::is_oversized_for_archive;
use filedock_core::AppError;
use filedock_store::FileStore;

use crate::hooks::{Notifier, SaveAs};
use crate::report::{summarize, EntryNote, Notification};
use crate::single_flight::SingleFlight;

use super::names::{sanitize_entry_name, unique_entry_name};

const SKIP_REASON_OVERSIZED: &str = "exceeds 18 MB limit";

/// Accumulated outcome of one job. Created when the job is admitted,
/// dropped when it finishes; never shared across invocations.
#[derive(Default)]
struct ArchiveJob {
    added: usize,
    skipped: Vec<EntryNote>,
    failed: Vec<EntryNote>,
    name_counter: HashMap<String, u32>,
}

/// What one completed job produced, for the caller and for tests.
#[derive(Debug)]
pub struct ArchiveReport {
    pub added: usize,
    pub skipped: Vec<EntryNote>,
    pub failed: Vec<EntryNote>,
    pub archive_name: String,
}

/// Result of a "download all" request.
#[derive(Debug)]
pub enum ArchiveOutcome {
    /// The file list was empty; nothing was done.
    EmptyList,
    /// Another archive job is in flight; this request was ignored.
    Busy,
    /// Every file was skipped or failed; no archive was produced.
    NothingToArchive,
    Completed(ArchiveReport),
}

enum Assembled {
    Empty(ArchiveJob),
    Archive { job: ArchiveJob, buffer: Vec<u8> },
}

pub struct ArchiveService {
    store: Arc<dyn FileStore>,
    notifier: Arc<dyn Notifier>,
    saver: Arc<dyn SaveAs>,
    guard: SingleFlight,
}

impl ArchiveService {
    pub fn new(
        store: Arc<dyn FileStore>,
        notifier: Arc<dyn Notifier>,
        saver: Arc<dyn SaveAs>,
    ) -> Self {
        Self {
            store,
            notifier,
            saver,
            guard: SingleFlight::new(),
        }
    }

    /// Build one archive from the current snapshot and hand it to the
    /// save-as sink under a name derived from the owning record.
    pub async fn download_all(
        &self,
        files: &FileList,
        record_name: Option<&str>,
    ) -> Result<ArchiveOutcome, AppError> {
        if files.is_empty() {
            return Ok(ArchiveOutcome::EmptyList);
        }

        // The permit is released on every exit path below, errors included.
        let Some(_permit) = self.guard.try_acquire() else {
            tracing::debug!("Archive job already in flight; ignoring request");
            return Ok(ArchiveOutcome::Busy);
        };

        let archive_name = archive_file_name(record_name);
        tracing::info!(files = files.len(), archive = %archive_name, "Starting archive job");

        match self.assemble(files).await {
            Ok(Assembled::Empty(job)) => {
                tracing::warn!(
                    skipped = job.skipped.len(),
                    failed = job.failed.len(),
                    "Archive job produced no entries"
                );
                self.notifier
                    .notify(Notification::warning(
                        "Warning",
                        "No files could be added to the archive.",
                    ))
                    .await;
                Ok(ArchiveOutcome::NothingToArchive)
            }
            Ok(Assembled::Archive { job, buffer }) => {
                if let Err(e) = self.saver.save(&archive_name, Bytes::from(buffer)).await {
                    self.notifier
                        .notify(Notification::error(format!("Failed to save archive: {}", e)))
                        .await;
                    return Err(AppError::Internal(format!("Save-as failed: {}", e)));
                }

                tracing::info!(
                    added = job.added,
                    skipped = job.skipped.len(),
                    failed = job.failed.len(),
                    "Archive job complete"
                );
                self.notifier
                    .notify(summarize(job.added, &job.skipped, &job.failed))
                    .await;

                Ok(ArchiveOutcome::Completed(ArchiveReport {
                    added: job.added,
                    skipped: job.skipped,
                    failed: job.failed,
                    archive_name,
                }))
            }
            Err(e) => {
                tracing::error!(error = %e, "Archive job failed");
                self.notifier
                    .notify(Notification::error(format!(
                        "Failed to create ZIP archive: {}",
                        e
                    )))
                    .await;
                Err(e)
            }
        }
    }

    /// Walk the snapshot in order and assemble the zip in memory.
    async fn assemble(&self, files: &FileList) -> Result<Assembled, AppError> {
        use zip::write::{FileOptions, ZipWriter};
        use zip::CompressionMethod;

        let mut job = ArchiveJob::default();
        let mut buffer = Vec::new();
        {
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = FileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(0o644);

            for file in files.iter() {
                if is_oversized_for_archive(file.content_size) {
                    tracing::debug!(
                        file = %file.display_name(),
                        size = file.content_size,
                        "Skipping oversized file"
                    );
                    job.skipped
                        .push(EntryNote::new(file.display_name(), SKIP_REASON_OVERSIZED));
                    continue;
                }

                // One outstanding fetch at a time; failures are independent.
                match self.store.fetch_content(file.version_id).await {
                    Ok(content) => {
                        let fallback = format!("{}_{}", UNNAMED_ENTRY_PREFIX, file.document_id);
                        let safe = sanitize_entry_name(&content.file_name, &fallback);
                        let entry_name = unique_entry_name(safe, &mut job.name_counter);

                        zip.start_file(&entry_name, options).map_err(|e| {
                            AppError::Archive(format!(
                                "Failed to add {} to archive: {}",
                                entry_name, e
                            ))
                        })?;
                        zip.write_all(&content.data).map_err(|e| {
                            AppError::Archive(format!(
                                "Failed to write {} to archive: {}",
                                entry_name, e
                            ))
                        })?;
                        job.added += 1;
                    }
                    Err(e) => {
                        let reason = e.reduced_message();
                        tracing::warn!(
                            file = %file.display_name(),
                            error = %reason,
                            "Fetch failed; continuing with remaining files"
                        );
                        job.failed.push(EntryNote::new(file.display_name(), reason));
                    }
                }
            }

            if job.added == 0 {
                return Ok(Assembled::Empty(job));
            }

            zip.finish()
                .map_err(|e| AppError::Archive(format!("Failed to finalize archive: {}", e)))?;
        }

        Ok(Assembled::Archive { job, buffer })
    }
}

/// Archive name derived from the owning record.
fn archive_file_name(record_name: Option<&str>) -> String {
    match record_name {
        Some(name) if !name.trim().is_empty() => format!("Files - {}.zip", name.trim()),
        _ => "Files.zip".to_string(),
    }
}
