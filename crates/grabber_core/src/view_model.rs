use crate::{DownloadStatus, Mode, Platform};

/// Read-only snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub platform: Platform,
    pub mode: Mode,
    pub input_text: String,
    pub search_available: bool,
    pub status: DownloadStatus,
    pub progress: u8,
    pub message: String,
    pub filename: Option<String>,
    pub download_url: Option<String>,
    pub log_lines: Vec<String>,
    /// False while a request is in flight.
    pub submit_enabled: bool,
}
