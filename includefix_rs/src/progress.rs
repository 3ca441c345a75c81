//! Progress UI utilities (spinners, status messages)

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner for long-running operations
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// Create a new spinner with a message
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                .template("{spinner:.cyan} {msg}")
                .expect("valid template"),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Self { bar }
    }

    /// Update the spinner message
    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Finish with success message (green checkmark)
    pub fn finish_success(&self, message: &str) {
        self.bar.finish_and_clear();
        println!("{} {}", style("✓").green().bold(), message);
    }

    /// Just clear the spinner without message
    pub fn finish_clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Print an error message (red)
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Format a count with proper singular/plural
pub fn format_count(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

#[cfg(test)]
mod tests {
    use super::format_count;

    #[test]
    fn format_count_picks_plural() {
        assert_eq!(format_count(1, "file", "files"), "1 file");
        assert_eq!(format_count(3, "file", "files"), "3 files");
    }
}
