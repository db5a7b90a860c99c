//! Terminal output utilities
//!
//! Provides consistent formatting for CLI output.

use owo_colors::{OwoColorize, Stream};

/// Force colors on or off, overriding terminal detection
pub fn set_color(enabled: bool) {
    owo_colors::set_override(enabled);
}

/// Status message helpers
pub struct Status;

impl Status {
    /// Print a success message
    pub fn success(message: &str) {
        println!("{} {}", "✓".if_supports_color(Stream::Stdout, |t| t.green()), message);
    }

    /// Print an error message
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".if_supports_color(Stream::Stderr, |t| t.red()), message);
    }

    /// Print a warning message
    pub fn warning(message: &str) {
        eprintln!("{} {}", "⚠".if_supports_color(Stream::Stderr, |t| t.yellow()), message);
    }

    /// Print an info message
    pub fn info(message: &str) {
        println!("{} {}", "ℹ".if_supports_color(Stream::Stdout, |t| t.blue()), message);
    }

    /// Print a header
    pub fn header(message: &str) {
        println!();
        println!("{}", message.if_supports_color(Stream::Stdout, |t| t.bold()));
        println!("{}", "─".repeat(message.chars().count()));
    }
}

/// One line of a scan report: code, transform, then the path.
///
/// Unknown orientations are dimmed so rotated photos stand out.
pub fn orientation_row(code: Option<u8>, transform: &str, path: &str) -> String {
    match code {
        Some(1) => format!("{:>7}  {:<26} {}", "1", transform, path),
        Some(c) => format!(
            "{:>7}  {:<26} {}",
            c.if_supports_color(Stream::Stdout, |t| t.cyan()),
            transform.if_supports_color(Stream::Stdout, |t| t.cyan()),
            path
        ),
        None => format!(
            "{:>7}  {:<26} {}",
            "unknown".if_supports_color(Stream::Stdout, |t| t.dimmed()),
            transform,
            path
        ),
    }
}

/// Format a duration for display
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f32();
    if secs < 1.0 {
        format!("{:.0}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        let mins = (secs / 60.0).floor();
        let remaining_secs = secs % 60.0;
        format!("{}m {:.0}s", mins, remaining_secs)
    }
}

/// Format a byte count for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Format a count with singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_format_duration_ms() {
        let d = Duration::from_millis(500);
        assert_eq!(format_duration(d), "500ms");
    }

    #[test]
    fn test_format_duration_secs() {
        let d = Duration::from_secs_f32(5.5);
        assert_eq!(format_duration(d), "5.5s");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(500), "500 B");
        assert_eq!(format_size(64 * 1024), "64.00 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(1, "photo", "photos"), "1 photo");
        assert_eq!(format_count(5, "photo", "photos"), "5 photos");
    }

    #[test]
    fn test_orientation_row_plain() {
        set_color(false);
        let row = orientation_row(Some(6), "rotate(90deg)", "cake.jpg");
        assert!(row.trim_start().starts_with("6  rotate(90deg)"));
        assert!(row.ends_with("cake.jpg"));

        let row = orientation_row(None, "none", "notes.jpg");
        assert!(row.contains("unknown"));
    }
}
