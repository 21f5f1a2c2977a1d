//! Bulk-archive assembly engine

pub mod names;
pub mod service;

pub use names::{sanitize_entry_name, unique_entry_name};
pub use service::{ArchiveOutcome, ArchiveReport, ArchiveService};
