//! Filedock Store Library
//!
//! This crate provides the file-store abstraction the widget engine talks
//! to. The `FileStore` trait models the external record platform's remote
//! operations (list, fetch, measure, delete, upload, share); transport is
//! the implementor's concern. An in-memory backend is included for the demo
//! binary and tests.

pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use memory::InMemoryFileStore;
pub use traits::{FileStore, FileStoreError, StoreResult};
