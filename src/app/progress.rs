use crate::metrics::Progress;

/// The line printed for each progress notification.
#[must_use]
pub fn progress_line(progress: Progress) -> String {
    format!(
        "Progress: {}/{} requests completed",
        progress.completed, progress.total
    )
}
