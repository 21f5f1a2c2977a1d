//! Blocked-upload message builders
//!
//! One validation notification is produced per upload batch; these builders
//! render its message for the three blocked shapes (extension only, size
//! only, combined).

use filedock_core::validation::file_extension;
use filedock_core::{UploadedFile, WidgetConfig};

use super::pipeline::SizeBlockedFile;

fn extension_label(name: &str) -> String {
    let ext = file_extension(name);
    if ext.is_empty() {
        "no extension".to_string()
    } else {
        format!(".{}", ext)
    }
}

fn blocked_details(blocked: &[UploadedFile]) -> String {
    blocked
        .iter()
        .map(|f| format!("{} ({})", f.name, extension_label(&f.name)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the configured allow-list as ".pdf, .png", sorted for stable
/// messages.
fn allow_list_label(config: &WidgetConfig) -> String {
    let mut extensions: Vec<_> = config
        .allowed_extensions()
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect();
    extensions.sort();
    extensions.join(", ")
}

fn format_mb(bytes: u64) -> String {
    format!("{} MB", bytes / 1024 / 1024)
}

/// Message for files blocked by the extension rules. Names the allow-list
/// when one is configured, otherwise the deny-list wording.
pub fn extension_blocked_message(blocked: &[UploadedFile], config: &WidgetConfig) -> String {
    let rule = if config.has_allow_list() {
        format!(
            "Only {} files are allowed on this page.",
            allow_list_label(config)
        )
    } else {
        "These file types are not allowed on this page.".to_string()
    };

    if let [file] = blocked {
        let rule = if config.has_allow_list() {
            rule
        } else {
            format!(
                "The {} file type is not allowed on this page.",
                extension_label(&file.name)
            )
        };
        return format!("\"{}\" cannot be uploaded. {}", file.name, rule);
    }

    format!(
        "{} file(s) could not be uploaded: {}. {}",
        blocked.len(),
        blocked_details(blocked),
        rule
    )
}

/// Message for files blocked by the configured size limit, naming each file
/// with its measured size.
pub fn size_blocked_message(blocked: &[SizeBlockedFile], limit_bytes: u64) -> String {
    if let [entry] = blocked {
        return format!(
            "\"{}\" cannot be uploaded. The file is {}, which exceeds the {} limit.",
            entry.file.name,
            format_mb(entry.measured_bytes),
            format_mb(limit_bytes)
        );
    }

    let details = blocked
        .iter()
        .map(|entry| format!("{} ({})", entry.file.name, format_mb(entry.measured_bytes)))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{} file(s) exceed the {} size limit: {}.",
        blocked.len(),
        format_mb(limit_bytes),
        details
    )
}

/// Combined message when both blocked sets are non-empty.
pub fn combined_blocked_message(
    extension_blocked: &[UploadedFile],
    size_blocked: &[SizeBlockedFile],
    config: &WidgetConfig,
) -> String {
    format!(
        "{} {}",
        extension_blocked_message(extension_blocked, config),
        size_blocked_message(size_blocked, config.max_file_size_bytes())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedock_core::RawWidgetConfig;
    use uuid::Uuid;

    fn uploaded(name: &str) -> UploadedFile {
        UploadedFile {
            document_id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    fn config(excluded: &str, allowed: &str, max: &str) -> WidgetConfig {
        WidgetConfig::from_raw(&RawWidgetConfig {
            excluded_file_extensions: Some(excluded.to_string()),
            allowed_file_extensions: Some(allowed.to_string()),
            max_file_size_bytes: Some(max.to_string()),
            initial_files_displayed: None,
        })
    }

    #[test]
    fn test_single_file_deny_list_message() {
        let msg = extension_blocked_message(&[uploaded("virus.exe")], &config("exe", "", "0"));
        assert_eq!(
            msg,
            "\"virus.exe\" cannot be uploaded. The .exe file type is not allowed on this page."
        );
    }

    #[test]
    fn test_single_file_allow_list_message() {
        let msg = extension_blocked_message(&[uploaded("virus.exe")], &config("", "pdf,png", "0"));
        assert_eq!(
            msg,
            "\"virus.exe\" cannot be uploaded. Only .pdf, .png files are allowed on this page."
        );
    }

    #[test]
    fn test_multiple_files_deny_list_message() {
        let msg = extension_blocked_message(
            &[uploaded("a.exe"), uploaded("b.bat")],
            &config("exe,bat", "", "0"),
        );
        assert_eq!(
            msg,
            "2 file(s) could not be uploaded: a.exe (.exe), b.bat (.bat). \
             These file types are not allowed on this page."
        );
    }

    #[test]
    fn test_extensionless_file_under_allow_list() {
        let msg = extension_blocked_message(
            &[uploaded("README"), uploaded("a.exe")],
            &config("", "pdf", "0"),
        );
        assert!(msg.contains("README (no extension)"));
        assert!(msg.contains("Only .pdf files are allowed"));
    }

    #[test]
    fn test_single_size_blocked_message() {
        let blocked = vec![SizeBlockedFile {
            file: uploaded("huge.bin"),
            measured_bytes: 25 * 1024 * 1024,
        }];
        let msg = size_blocked_message(&blocked, 10 * 1024 * 1024);
        assert_eq!(
            msg,
            "\"huge.bin\" cannot be uploaded. The file is 25 MB, which exceeds the 10 MB limit."
        );
    }

    #[test]
    fn test_multiple_size_blocked_message() {
        let blocked = vec![
            SizeBlockedFile {
                file: uploaded("a.bin"),
                measured_bytes: 12 * 1024 * 1024,
            },
            SizeBlockedFile {
                file: uploaded("b.bin"),
                measured_bytes: 25 * 1024 * 1024,
            },
        ];
        let msg = size_blocked_message(&blocked, 10 * 1024 * 1024);
        assert_eq!(
            msg,
            "2 file(s) exceed the 10 MB size limit: a.bin (12 MB), b.bin (25 MB)."
        );
    }

    #[test]
    fn test_combined_message_names_both_rules() {
        let ext = vec![uploaded("virus.exe")];
        let size = vec![SizeBlockedFile {
            file: uploaded("huge.bin"),
            measured_bytes: 25 * 1024 * 1024,
        }];
        let msg = combined_blocked_message(&ext, &size, &config("exe", "", "10485760"));
        assert!(msg.contains(".exe file type is not allowed"));
        assert!(msg.contains("exceeds the 10 MB limit"));
    }
}
