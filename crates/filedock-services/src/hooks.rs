//! Hooks and traits for host integration
//!
//! The engines never render anything themselves. The hosting UI implements
//! these traits: a notification channel it displays, a client-side save-as
//! for finished archives, and a list refresh it performs after uploads.
//! No-op implementations cover hosts that opt out, and buffering
//! implementations capture calls for tests and the demo binary.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Mutex;

use crate::report::Notification;

/// Notification channel rendered by the host.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification);
}

/// Client-side save-as for a finished archive or a single download.
///
/// The only filesystem-adjacent interface in the system; an error string is
/// surfaced to the user as an error notification.
#[async_trait]
pub trait SaveAs: Send + Sync {
    async fn save(&self, file_name: &str, data: Bytes) -> Result<(), String>;
}

/// List refresh the host performs after an upload batch is settled.
#[async_trait]
pub trait ListRefresher: Send + Sync {
    async fn refresh(&self);
}

/// No-op implementation for hosts without a notification channel.
pub struct NoOpNotifier;

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn notify(&self, _notification: Notification) {}
}

/// No-op save-as; the archive bytes are dropped.
pub struct NoOpSaveAs;

#[async_trait]
impl SaveAs for NoOpSaveAs {
    async fn save(&self, _file_name: &str, _data: Bytes) -> Result<(), String> {
        Ok(())
    }
}

/// No-op refresh.
pub struct NoOpRefresher;

#[async_trait]
impl ListRefresher for NoOpRefresher {
    async fn refresh(&self) {}
}

/// Notifier that buffers everything it receives.
#[derive(Default)]
pub struct BufferingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl BufferingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications.lock().unwrap())
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for BufferingNotifier {
    async fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

/// Save-as sink that keeps every blob it is handed.
#[derive(Default)]
pub struct BufferingSaveAs {
    saved: Mutex<Vec<(String, Bytes)>>,
}

impl BufferingSaveAs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> Vec<(String, Bytes)> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl SaveAs for BufferingSaveAs {
    async fn save(&self, file_name: &str, data: Bytes) -> Result<(), String> {
        self.saved
            .lock()
            .unwrap()
            .push((file_name.to_string(), data));
        Ok(())
    }
}
