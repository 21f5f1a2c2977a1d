//! Filedock Services Library
//!
//! The two engines behind the file widget: bulk-archive assembly and
//! upload validation/cleanup, plus the reporting aggregator, the
//! single-flight guard they run under, and the hook traits the hosting
//! UI implements (notifications, save-as, list refresh).

pub mod archive;
pub mod hooks;
pub mod report;
pub mod single_flight;
pub mod upload;

// Re-export commonly used types
pub use archive::{ArchiveOutcome, ArchiveReport, ArchiveService};
pub use hooks::{
    BufferingNotifier, BufferingSaveAs, ListRefresher, NoOpNotifier, NoOpRefresher, NoOpSaveAs,
    Notifier, SaveAs,
};
pub use report::{summarize, EntryNote, Notification, Severity};
pub use single_flight::{SingleFlight, SingleFlightPermit};
pub use upload::{SizeBlockedFile, UploadOutcome, UploadPipeline, UploadReport};
