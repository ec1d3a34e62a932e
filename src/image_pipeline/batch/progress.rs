use std::io::Write;
use std::sync::Mutex;

use tracing::info;

const BAR_WIDTH: usize = 30;

/// Receives `(index, total)` after each file; `index` starts at 1.
pub trait ProgressSink {
    fn update(&self, index: usize, total: usize);
}

/// Emits a text progress bar as a log line.
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn update(&self, index: usize, total: usize) {
        info!("Processing: {}\t{}", index, progress_bar(index, total));
    }
}

/// Redraws a single `Processing: i [####....] i/total` line in place,
/// ending it with a newline once the last file is done.
pub struct RedrawProgress<W: Write> {
    out: Mutex<W>,
}

impl<W: Write> RedrawProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write> ProgressSink for RedrawProgress<W> {
    fn update(&self, index: usize, total: usize) {
        let Ok(mut out) = self.out.lock() else {
            return;
        };
        let end = if index >= total { "\n" } else { "" };
        // write errors are ignored
        let _ = write!(out, "\rProcessing: {}\t{}{}", index, progress_bar(index, total), end);
        let _ = out.flush();
    }
}

/// `[#####.........] 5/30`, filled proportionally to `progress / total`.
pub fn progress_bar(progress: usize, total: usize) -> String {
    let filled = if total == 0 {
        BAR_WIDTH
    } else {
        (BAR_WIDTH * progress.min(total)) / total
    };
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        ".".repeat(BAR_WIDTH - filled),
        progress,
        total
    )
}
