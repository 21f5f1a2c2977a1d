//! Domain models

pub mod file_record;

pub use file_record::{FileContent, FileList, FileRecord, UploadedFile};
