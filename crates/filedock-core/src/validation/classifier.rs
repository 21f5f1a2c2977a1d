//! Size/extension classifier
//!
//! Pure predicates classifying a candidate file against the configured
//! allow/deny lists and size limits. Callers compose them; nothing here
//! touches the store or mutates state.

use std::collections::HashSet;

use crate::constants::ARCHIVE_MAX_FILE_SIZE_BYTES;

/// Extract the lower-cased extension of a file name: the substring after the
/// last `.`. Returns an empty string when there is no dot or the dot is the
/// final character.
pub fn file_extension(file_name: &str) -> String {
    match file_name.rfind('.') {
        Some(idx) if idx + 1 < file_name.len() => file_name[idx + 1..].to_lowercase(),
        _ => String::new(),
    }
}

/// Whether a file is too large to be included in a bulk archive.
///
/// The ceiling is fixed (18 MiB), independent of the configurable upload
/// limit: archives are assembled in memory.
pub fn is_oversized_for_archive(content_size: u64) -> bool {
    content_size > ARCHIVE_MAX_FILE_SIZE_BYTES
}

/// Whether a measured upload exceeds the configured limit. A limit of 0
/// means unlimited.
pub fn is_oversized_for_upload(measured_bytes: u64, limit_bytes: u64) -> bool {
    limit_bytes > 0 && measured_bytes > limit_bytes
}

/// Whether a file name is blocked by the configured extension rules.
///
/// The allow-list is evaluated first: when non-empty, a file is blocked
/// unless its extension is a member, and a file with no extension is always
/// blocked (no match is possible). Otherwise the deny-list applies; a file
/// with no extension passes a pure deny-list.
pub fn is_extension_blocked(
    file_name: &str,
    allowed: &HashSet<String>,
    excluded: &HashSet<String>,
) -> bool {
    let extension = file_extension(file_name);

    if !allowed.is_empty() {
        return !allowed.contains(&extension);
    }

    !extension.is_empty() && excluded.contains(&extension)
}
