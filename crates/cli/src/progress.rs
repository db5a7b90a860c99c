//! Progress indicators
//!
//! Progress bars for scanning many images.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

/// Create a progress bar for file processing
///
/// Hidden when `visible` is false so JSON output stays clean.
pub fn file_progress(total: u64, visible: bool) -> ProgressBar {
    let pb = ProgressBar::new(total);
    if !visible {
        pb.set_draw_target(ProgressDrawTarget::hidden());
        return pb;
    }
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} photos ({eta})")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }
    pb.set_draw_target(ProgressDrawTarget::stderr());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Finish a progress bar with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("✓ {}", message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress() {
        let pb = file_progress(10, false);
        pb.inc(5);
        assert_eq!(pb.position(), 5);
        finish_success(&pb, "done");
        assert!(pb.is_finished());
    }

    #[test]
    fn test_visible_progress() {
        let pb = file_progress(3, true);
        pb.inc(3);
        pb.finish_and_clear();
    }
}
