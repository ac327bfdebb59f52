use grabber_core::{AppViewModel, DownloadStatus, Notification, NotificationKind};
use grabber_engine::NotificationSink;

const BAR_WIDTH: usize = 20;

/// One-line status for the terminal, e.g. `[##############------]  70% streaming data`.
pub fn progress_line(view: &AppViewModel) -> String {
    let filled = usize::from(view.progress.min(100)) * BAR_WIDTH / 100;
    format!(
        "[{}{}] {:>3}% {}",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        view.progress,
        view.message
    )
}

pub fn summary(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.log_lines.len() + 2);
    lines.push(format!(
        "{} {} -> {}",
        view.platform,
        view.mode,
        status_label(view.status)
    ));
    if let Some(url) = &view.download_url {
        lines.push(format!("saved to {url}"));
    }
    lines.extend(view.log_lines.iter().map(|line| format!("  {line}")));
    lines
}

fn status_label(status: DownloadStatus) -> &'static str {
    match status {
        DownloadStatus::Idle => "idle",
        DownloadStatus::Processing => "processing",
        DownloadStatus::Downloading => "downloading",
        DownloadStatus::Complete => "complete",
        DownloadStatus::Error => "error",
    }
}

/// Prints notifications the way a toast would show them.
pub struct TerminalNotifier;

impl NotificationSink for TerminalNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Success => {
                println!("{}: {}", notification.title, notification.description)
            }
            NotificationKind::Error => {
                eprintln!("{}: {}", notification.title, notification.description)
            }
        }
    }
}
