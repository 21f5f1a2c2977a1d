//! Configuration module
//!
//! The hosting page hands the widget raw strings (comma-separated extension
//! lists, numeric limits). They are normalized exactly once, here, into an
//! immutable `WidgetConfig` value object; use sites never re-normalize.

use std::collections::HashSet;

/// Raw configuration values as supplied by the hosting page.
#[derive(Debug, Clone, Default)]
pub struct RawWidgetConfig {
    /// Comma-separated deny-list, e.g. `"exe, .bat, js"`.
    pub excluded_file_extensions: Option<String>,
    /// Comma-separated allow-list. Empty or absent = no allow-list restriction.
    pub allowed_file_extensions: Option<String>,
    /// Maximum upload size in bytes as a numeric string. 0 or unparsable = unlimited.
    pub max_file_size_bytes: Option<String>,
    /// Number of rows shown before the list is expanded. 0 or unparsable = unlimited.
    pub initial_files_displayed: Option<String>,
}

/// Normalized, read-only widget configuration.
///
/// Rebuilt wholesale via [`WidgetConfig::from_raw`] whenever the host supplies
/// new raw values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WidgetConfig {
    excluded_extensions: HashSet<String>,
    allowed_extensions: HashSet<String>,
    max_file_size_bytes: u64,
    initial_files_displayed: usize,
}

/// Split a comma-separated extension list into a normalized set:
/// entries are trimmed, lower-cased, stripped of leading dots, and empty
/// entries are dropped.
fn normalize_extension_list(raw: Option<&str>) -> HashSet<String> {
    match raw {
        None => HashSet::new(),
        Some(value) => value
            .split(',')
            .map(|ext| ext.trim().to_lowercase())
            .map(|ext| ext.trim_start_matches('.').to_string())
            .filter(|ext| !ext.is_empty())
            .collect(),
    }
}

/// Parse a numeric setting, treating absent, unparsable, or negative input
/// as 0 (unlimited).
fn parse_numeric_setting(raw: Option<&str>) -> u64 {
    raw.and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

impl WidgetConfig {
    pub fn from_raw(raw: &RawWidgetConfig) -> Self {
        WidgetConfig {
            excluded_extensions: normalize_extension_list(
                raw.excluded_file_extensions.as_deref(),
            ),
            allowed_extensions: normalize_extension_list(raw.allowed_file_extensions.as_deref()),
            max_file_size_bytes: parse_numeric_setting(raw.max_file_size_bytes.as_deref()),
            initial_files_displayed: parse_numeric_setting(
                raw.initial_files_displayed.as_deref(),
            ) as usize,
        }
    }

    pub fn excluded_extensions(&self) -> &HashSet<String> {
        &self.excluded_extensions
    }

    pub fn allowed_extensions(&self) -> &HashSet<String> {
        &self.allowed_extensions
    }

    /// Configured upload size limit in bytes. 0 = unlimited.
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_bytes
    }

    /// Rows shown before expansion. 0 = unlimited.
    pub fn initial_files_displayed(&self) -> usize {
        self.initial_files_displayed
    }

    pub fn has_allow_list(&self) -> bool {
        !self.allowed_extensions.is_empty()
    }

    pub fn has_deny_list(&self) -> bool {
        !self.excluded_extensions.is_empty()
    }

    pub fn has_size_limit(&self) -> bool {
        self.max_file_size_bytes > 0
    }
}
