//! Shared constants
//!
//! Limits that are fixed by the engine rather than configured by the host.

/// Hard per-file ceiling for archive inclusion. Files larger than this are
/// skipped by the bulk-archive engine regardless of the configured upload
/// limit: the whole archive is assembled in memory, so one oversized entry
/// can exhaust the client.
pub const ARCHIVE_MAX_FILE_SIZE_BYTES: u64 = 18 * 1024 * 1024;

/// Entry name used when a fetched file name sanitizes down to nothing.
pub const UNNAMED_ENTRY_PREFIX: &str = "unnamed";
