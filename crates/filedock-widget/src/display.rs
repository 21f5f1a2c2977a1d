//! Row display helpers
//!
//! Pure formatting glue for the host's row template: doc-type icons,
//! human-readable sizes and dates. Nothing here touches the store.

use chrono::{DateTime, Utc};

/// Map a declared file type to the host's doc-type icon set.
pub fn icon_name(file_type: &str) -> &'static str {
    match file_type {
        "AI" => "doctype:ai",
        "ATTACHMENT" => "doctype:attachment",
        "AUDIO" => "doctype:audio",
        "BMP" | "GIF" | "JPEG" | "JPG" | "PNG" | "SVG" | "TIFF" | "TIF" => "doctype:image",
        "CSV" => "doctype:csv",
        "EPS" => "doctype:eps",
        "EXCEL" | "EXCEL_X" => "doctype:excel",
        "EXE" => "doctype:exe",
        "FLASH" => "doctype:flash",
        "GPRES" | "SLIDE" => "doctype:slides",
        "HTML" => "doctype:html",
        "KEYNOTE" => "doctype:keynote",
        "LINK" => "doctype:link",
        "MOV" | "VIDEO" => "doctype:video",
        "MP4" => "doctype:mp4",
        "PACK" => "doctype:pack",
        "PAGES" => "doctype:pages",
        "PDF" => "doctype:pdf",
        "POWER_POINT" | "POWER_POINT_X" => "doctype:ppt",
        "PSD" => "doctype:psd",
        "RTF" => "doctype:rtf",
        "SNOTE" => "doctype:stypi",
        "TEXT" => "doctype:txt",
        "VISIO" => "doctype:visio",
        "WORD" | "WORD_X" => "doctype:word",
        "XML" => "doctype:xml",
        "ZIP" => "doctype:zip",
        _ => "doctype:unknown",
    }
}

/// Human-readable size: whole bytes below 1 KB, one decimal above.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[unit])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// `Mon D, YYYY` date formatting for the row template.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_icon_lookup() {
        assert_eq!(icon_name("PDF"), "doctype:pdf");
        assert_eq!(icon_name("JPG"), "doctype:image");
        assert_eq!(icon_name("WORD_X"), "doctype:word");
        assert_eq!(icon_name("whatever"), "doctype:unknown");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2025, 3, 7, 12, 0, 0).unwrap();
        assert_eq!(format_date(date), "Mar 7, 2025");
    }
}
