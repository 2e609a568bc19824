//! Progress indicators
//!
//! A spinner for in-flight API calls and a bar for multi-file uploads,
//! matching the glyphs `output::Status` uses.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Spinner shown while a single request is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg} ({elapsed})")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Bar tracking a batch upload, one tick per file
pub fn upload_progress(total_files: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_files);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.green/white}] {pos}/{len} files · {elapsed}")
            .unwrap()
            .progress_chars("●◐○"),
    );
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Finish a progress bar with a success message
pub fn finish_success(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("{} {}", "✓".green(), message));
}

/// Finish a progress bar with an error message
pub fn finish_error(pb: &ProgressBar, message: &str) {
    pb.finish_with_message(format!("{} {}", "✗".red(), message));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_creation() {
        let pb = spinner("Uploading front.jpg");
        pb.finish();
    }

    #[test]
    fn test_upload_progress_tracks_files() {
        let pb = upload_progress(3);
        pb.inc(2);
        assert_eq!(pb.position(), 2);
        pb.finish();
    }
}
