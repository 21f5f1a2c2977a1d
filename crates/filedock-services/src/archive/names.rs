//! Archive entry naming
//!
//! Entry names go through two steps before they reach the zip writer:
//! path-traversal sanitization, then per-job deduplication.

use std::collections::HashMap;
use std::path::Path;

/// Sanitize a filename for an archive entry to prevent path traversal.
/// Extracts only the base name (strips path components like `../`).
pub fn sanitize_entry_name(filename: &str, fallback: &str) -> String {
    Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .unwrap_or(fallback)
        .to_string()
}

/// Resolve a candidate entry name against the job's name counter.
///
/// The first occurrence of a name is returned unchanged and its counter set
/// to 1. Every later occurrence gets a ` (n)` suffix before the extension,
/// with `n` strictly increasing per name. Suffixed names are themselves
/// registered in the counter, so an emitted name is never produced twice
/// within one job even when a suffixed form also arrives as input.
pub fn unique_entry_name(candidate: String, counter: &mut HashMap<String, u32>) -> String {
    if !counter.contains_key(&candidate) {
        counter.insert(candidate.clone(), 1);
        return candidate;
    }

    loop {
        let count = counter.entry(candidate.clone()).or_insert(1);
        let n = *count;
        *count += 1;

        let renamed = match candidate.rfind('.') {
            Some(idx) => format!("{} ({}){}", &candidate[..idx], n, &candidate[idx..]),
            None => format!("{} ({})", candidate, n),
        };

        if !counter.contains_key(&renamed) {
            counter.insert(renamed.clone(), 1);
            return renamed;
        }
    }
}
