//! Progress bar display for downloads

use indicatif::{ProgressBar, ProgressStyle};

/// Progress display for a single download
pub struct DownloadProgress {
    pb: ProgressBar,
}

impl DownloadProgress {
    /// Create a progress display; `total` is the content length when known
    pub fn new(label: &str, total: Option<u64>) -> Self {
        let pb = match total {
            Some(total) => {
                let style = ProgressStyle::default_bar()
                    .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-");
                let pb = ProgressBar::new(total);
                pb.set_style(style);
                pb
            }
            None => {
                let style = ProgressStyle::default_spinner()
                    .template("{spinner} {msg} {bytes}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner());
                let pb = ProgressBar::new_spinner();
                pb.set_style(style);
                pb
            }
        };
        pb.set_message(shorten(label));
        Self { pb }
    }

    pub fn advance(&self, bytes: usize) {
        self.pb.inc(bytes as u64);
    }

    pub fn finish(&self) {
        self.pb.finish_and_clear();
    }

    /// Abandon on error
    pub fn abandon(&self) {
        self.pb.abandon();
    }
}

/// Truncate long labels for display
fn shorten(label: &str) -> String {
    let count = label.chars().count();
    if count > 50 {
        let tail: String = label.chars().skip(count - 47).collect();
        format!("...{tail}")
    } else {
        label.to_string()
    }
}
