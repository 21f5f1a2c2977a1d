//! Upload validation/cleanup pipeline

pub mod messages;
pub mod pipeline;

pub use pipeline::{SizeBlockedFile, UploadOutcome, UploadPipeline, UploadReport};
