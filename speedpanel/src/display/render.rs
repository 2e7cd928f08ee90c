//! Result label rendering.

use serde::Serialize;

use crate::preferences::DisplayPreferences;
use crate::session::SpeedResult;

pub const DOWNLOAD_LABEL: &str = "Download Speed:";
pub const UPLOAD_LABEL: &str = "Upload Speed:";
pub const MBPS_UNIT: &str = "Mbps";

/// Shown in the upload slot when both results are hidden.
pub const CHECK_SETTINGS_MESSAGE: &str = "Open the settings and choose\nwhich speed you want to see";

/// Text of the two result labels. Empty means the label is blank.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ResultLines {
    pub download: String,
    pub upload: String,
}

impl ResultLines {
    /// Both labels blank.
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.download.is_empty() && self.upload.is_empty()
    }
}

/// Format a rate the way the labels show it: shortest exact decimal, with
/// at least one fractional digit.
pub fn format_mbps(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}

fn download_line(result: &SpeedResult) -> String {
    format!("{} {}{}", DOWNLOAD_LABEL, format_mbps(result.download_mbps), MBPS_UNIT)
}

fn upload_line(result: &SpeedResult) -> String {
    format!("{} {}{}", UPLOAD_LABEL, format_mbps(result.upload_mbps), MBPS_UNIT)
}

/// Decide the label text for a completed run.
///
/// | download | upload | download slot | upload slot |
/// |----------|--------|---------------|-------------|
/// | on       | on     | download line | upload line |
/// | off      | on     | empty         | upload line |
/// | on       | off    | download line | empty       |
/// | off      | off    | empty         | settings hint |
pub fn render_results(prefs: DisplayPreferences, result: &SpeedResult) -> ResultLines {
    match (prefs.show_download, prefs.show_upload) {
        (true, true) => ResultLines {
            download: download_line(result),
            upload: upload_line(result),
        },
        (false, true) => ResultLines {
            download: String::new(),
            upload: upload_line(result),
        },
        (true, false) => ResultLines {
            download: download_line(result),
            upload: String::new(),
        },
        (false, false) => ResultLines {
            download: String::new(),
            upload: CHECK_SETTINGS_MESSAGE.to_string(),
        },
    }
}

/// Labels for a run that failed or timed out while awaiting completion.
pub fn render_failure(reason: &str) -> ResultLines {
    ResultLines {
        download: String::new(),
        upload: format!("Speed test failed: {}", reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SpeedResult {
        SpeedResult::new(93.5, 11.2)
    }

    #[test]
    fn test_both_enabled() {
        let lines = render_results(DisplayPreferences::new(true, true), &sample());
        assert_eq!(lines.download, "Download Speed: 93.5Mbps");
        assert_eq!(lines.upload, "Upload Speed: 11.2Mbps");
    }

    #[test]
    fn test_upload_only() {
        let lines = render_results(DisplayPreferences::new(false, true), &sample());
        assert_eq!(lines.download, "");
        assert_eq!(lines.upload, "Upload Speed: 11.2Mbps");
    }

    #[test]
    fn test_download_only() {
        let lines = render_results(DisplayPreferences::new(true, false), &sample());
        assert_eq!(lines.download, "Download Speed: 93.5Mbps");
        assert_eq!(lines.upload, "");
    }

    #[test]
    fn test_both_disabled_uses_upload_slot() {
        let lines = render_results(DisplayPreferences::new(false, false), &sample());
        assert_eq!(lines.download, "");
        assert_eq!(lines.upload, CHECK_SETTINGS_MESSAGE);
    }

    #[test]
    fn test_zero_result_renders_with_fraction() {
        let lines = render_results(DisplayPreferences::default(), &SpeedResult::default());
        assert_eq!(lines.download, "Download Speed: 0.0Mbps");
        assert_eq!(lines.upload, "Upload Speed: 0.0Mbps");
    }

    #[test]
    fn test_format_mbps() {
        assert_eq!(format_mbps(0.0), "0.0");
        assert_eq!(format_mbps(100.0), "100.0");
        assert_eq!(format_mbps(93.5), "93.5");
        assert_eq!(format_mbps(11.25), "11.25");
        assert_eq!(format_mbps(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_failure_lines() {
        let lines = render_failure("timed out");
        assert_eq!(lines.download, "");
        assert_eq!(lines.upload, "Speed test failed: timed out");
        assert!(!lines.is_empty());
        assert!(ResultLines::cleared().is_empty());
    }
}
