//! Validation modules

pub mod classifier;

pub use classifier::{
    file_extension, is_extension_blocked, is_oversized_for_archive, is_oversized_for_upload,
};
