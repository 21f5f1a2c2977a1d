//! Filedock Core Library
//!
//! This crate provides the domain models, error types, configuration, and
//! classification predicates shared across all filedock components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::{RawWidgetConfig, WidgetConfig};
pub use error::AppError;
pub use models::{FileContent, FileList, FileRecord, UploadedFile};
