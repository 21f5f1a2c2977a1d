//! Filedock demo — drives the widget against the in-memory store.
//!
//! Seeds a handful of files, runs a "download all" (writing the archive to
//! disk), then replays an upload-completion batch through the validation
//! pipeline. Notifications are printed as they would reach a hosting UI.

use anyhow::Context;
use async_trait::async_trait;
use bytes::Bytes;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use filedock_cli::init_tracing;
use filedock_core::models::UploadedFile;
use filedock_core::RawWidgetConfig;
use filedock_services::hooks::{Notifier, SaveAs};
use filedock_services::report::{Notification, Severity};
use filedock_store::InMemoryFileStore;
use filedock_widget::{FileWidget, WidgetHooks};

#[derive(Parser)]
#[command(name = "filedock", about = "File widget demo")]
struct Cli {
    /// Comma-separated extensions to block on upload
    #[arg(long, default_value = "exe,bat")]
    excluded_extensions: String,

    /// Upload size limit in bytes (0 = unlimited)
    #[arg(long, default_value = "1048576")]
    max_file_size_bytes: String,

    /// Record name used for the archive filename
    #[arg(long, default_value = "Acme Corp")]
    record_name: String,

    /// Directory the archive is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

/// Prints notifications the way a hosting UI would render toasts.
struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, notification: Notification) {
        let tag = match notification.severity {
            Severity::Success => "SUCCESS",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        println!(
            "[{}] {}: {}",
            tag, notification.title, notification.message
        );
    }
}

/// Save-as sink writing into the chosen output directory.
struct DiskSaveAs {
    output_dir: PathBuf,
}

#[async_trait]
impl SaveAs for DiskSaveAs {
    async fn save(&self, file_name: &str, data: Bytes) -> Result<(), String> {
        let path = self.output_dir.join(file_name);
        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        println!("Saved {} ({} bytes)", path.display(), data.len());
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    tokio::fs::create_dir_all(&cli.output_dir)
        .await
        .with_context(|| format!("creating {}", cli.output_dir.display()))?;

    let store = Arc::new(InMemoryFileStore::new());
    let owner = Uuid::new_v4();

    let hooks = WidgetHooks {
        notifier: Arc::new(ConsoleNotifier),
        saver: Arc::new(DiskSaveAs {
            output_dir: cli.output_dir.clone(),
        }),
        ..WidgetHooks::default()
    };
    let widget = FileWidget::new(owner, store.clone(), hooks);
    widget.set_record_name(Some(cli.record_name.clone())).await;
    widget
        .configure(&RawWidgetConfig {
            excluded_file_extensions: Some(cli.excluded_extensions.clone()),
            allowed_file_extensions: None,
            max_file_size_bytes: Some(cli.max_file_size_bytes.clone()),
            initial_files_displayed: None,
        })
        .await;

    // Seed the record with a few attachments, duplicate names included.
    store
        .seed(owner, "report.pdf", Bytes::from_static(b"%PDF-1.7 demo"))
        .await;
    store
        .seed(owner, "report.pdf", Bytes::from_static(b"%PDF-1.7 revised"))
        .await;
    store
        .seed(owner, "notes.txt", Bytes::from_static(b"meeting notes"))
        .await;

    widget.refresh_files().await;
    println!("{}", widget.header_title().await);

    widget
        .download_all()
        .await
        .context("download all failed")?;

    // Replay an upload-completion event: the host already created both
    // files; the pipeline deletes the blocked one.
    let blocked = store
        .seed(owner, "installer.exe", Bytes::from_static(b"MZ"))
        .await;
    let kept = store
        .seed(owner, "summary.docx", Bytes::from_static(b"PK"))
        .await;

    widget
        .upload_finished(vec![
            UploadedFile {
                document_id: blocked.document_id,
                name: "installer.exe".to_string(),
            },
            UploadedFile {
                document_id: kept.document_id,
                name: "summary.docx".to_string(),
            },
        ])
        .await
        .context("upload validation failed")?;

    println!("{}", widget.header_title().await);
    Ok(())
}
