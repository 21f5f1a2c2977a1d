//! Host hooks owned by the widget layer
//!
//! Navigation and confirmation are host-platform concerns; the widget only
//! asks. Notification and save-as hooks live in the services crate because
//! the engines use them directly.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use filedock_services::hooks::{NoOpNotifier, NoOpSaveAs, Notifier, SaveAs};

/// Navigation into the host's own pages.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn to_file_detail(&self, document_id: Uuid);
    async fn to_file_edit(&self, document_id: Uuid);
    /// Share-link creation page for one file version.
    async fn to_content_delivery(&self, version_id: Uuid);
    /// Preview overlay, scoped to every file in the current snapshot.
    async fn to_file_preview(&self, document_id: Uuid, all_document_ids: Vec<Uuid>);
}

/// Confirmation dialog for destructive row actions.
#[async_trait]
pub trait ConfirmPrompt: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

pub struct NoOpNavigator;

#[async_trait]
impl Navigator for NoOpNavigator {
    async fn to_file_detail(&self, _document_id: Uuid) {}
    async fn to_file_edit(&self, _document_id: Uuid) {}
    async fn to_content_delivery(&self, _version_id: Uuid) {}
    async fn to_file_preview(&self, _document_id: Uuid, _all_document_ids: Vec<Uuid>) {}
}

/// Confirms everything. The default for hosts that render no dialog.
pub struct AlwaysConfirm;

#[async_trait]
impl ConfirmPrompt for AlwaysConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// The full hook set a host hands to [`crate::FileWidget`].
#[derive(Clone)]
pub struct WidgetHooks {
    pub notifier: Arc<dyn Notifier>,
    pub saver: Arc<dyn SaveAs>,
    pub navigator: Arc<dyn Navigator>,
    pub confirm: Arc<dyn ConfirmPrompt>,
}

impl Default for WidgetHooks {
    fn default() -> Self {
        WidgetHooks {
            notifier: Arc::new(NoOpNotifier),
            saver: Arc::new(NoOpSaveAs),
            navigator: Arc::new(NoOpNavigator),
            confirm: Arc::new(AlwaysConfirm),
        }
    }
}
