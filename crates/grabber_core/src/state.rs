use crate::view_model::AppViewModel;
use crate::{ConsoleLog, Mode, Platform, Selection};

/// Tag carried by every engine event so results of an abandoned submission
/// can be recognised and dropped.
pub type SubmissionId = u64;

/// Payloads below this size are treated as server-side error bodies.
pub const DEFAULT_MIN_PAYLOAD_BYTES: u64 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadStatus {
    #[default]
    Idle,
    Processing,
    Downloading,
    Complete,
    Error,
}

impl DownloadStatus {
    /// A request is in flight.
    pub fn is_busy(self) -> bool {
        matches!(self, DownloadStatus::Processing | DownloadStatus::Downloading)
    }
}

/// Snapshot of the current download. Only built through the constructors
/// below, which keep `Idle`/`Error` at progress 0 and `Complete` with a
/// filename.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DownloadState {
    status: DownloadStatus,
    progress: u8,
    message: String,
    download_url: Option<String>,
    filename: Option<String>,
}

impl DownloadState {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn processing(progress: u8, message: impl Into<String>) -> Self {
        Self::in_flight(DownloadStatus::Processing, progress, message)
    }

    pub fn downloading(progress: u8, message: impl Into<String>) -> Self {
        Self::in_flight(DownloadStatus::Downloading, progress, message)
    }

    pub fn complete(filename: impl Into<String>, download_url: Option<String>) -> Self {
        Self {
            status: DownloadStatus::Complete,
            progress: 100,
            message: "download complete".to_string(),
            download_url,
            filename: Some(filename.into()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: DownloadStatus::Error,
            progress: 0,
            message: message.into(),
            download_url: None,
            filename: None,
        }
    }

    fn in_flight(status: DownloadStatus, progress: u8, message: impl Into<String>) -> Self {
        Self {
            status,
            progress: progress.min(100),
            message: message.into(),
            download_url: None,
            filename: None,
        }
    }

    pub fn status(&self) -> DownloadStatus {
        self.status
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn download_url(&self) -> Option<&str> {
        self.download_url.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreSettings {
    pub min_payload_bytes: u64,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            min_payload_bytes: DEFAULT_MIN_PAYLOAD_BYTES,
        }
    }
}

/// What the update remembers about the submission it is waiting on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ActiveSubmission {
    pub(crate) id: SubmissionId,
    pub(crate) platform: Platform,
    pub(crate) mode: Mode,
    pub(crate) filename: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    selection: Selection,
    download: DownloadState,
    log: ConsoleLog,
    settings: CoreSettings,
    last_submission: SubmissionId,
    active: Option<ActiveSubmission>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: CoreSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            platform: self.selection.platform(),
            mode: self.selection.mode(),
            input_text: self.selection.input_text().to_string(),
            search_available: self.selection.platform().supports_search(),
            status: self.download.status(),
            progress: self.download.progress(),
            message: self.download.message().to_string(),
            filename: self.download.filename().map(ToOwned::to_owned),
            download_url: self.download.download_url().map(ToOwned::to_owned),
            log_lines: self.log.lines(),
            submit_enabled: !self.download.status().is_busy(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn download(&self) -> &DownloadState {
        &self.download
    }

    pub fn log(&self) -> &ConsoleLog {
        &self.log
    }

    pub fn settings(&self) -> CoreSettings {
        self.settings
    }

    /// Submission whose engine events are currently accepted.
    pub fn active_submission(&self) -> Option<SubmissionId> {
        self.active.as_ref().map(|active| active.id)
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn selection_mut(&mut self) -> &mut Selection {
        self.dirty = true;
        &mut self.selection
    }

    pub(crate) fn set_download(&mut self, download: DownloadState) {
        self.download = download;
        self.dirty = true;
    }

    pub(crate) fn log_line(&mut self, text: impl Into<String>) {
        self.log.append(text);
        self.dirty = true;
    }

    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        self.last_submission += 1;
        self.active = Some(ActiveSubmission {
            id: self.last_submission,
            platform: self.selection.platform(),
            mode: self.selection.mode(),
            filename: None,
        });
        self.last_submission
    }

    /// The active submission, if `submission` is it.
    pub(crate) fn active_mut(&mut self, submission: SubmissionId) -> Option<&mut ActiveSubmission> {
        self.active
            .as_mut()
            .filter(|active| active.id == submission)
    }

    pub(crate) fn end_submission(&mut self) {
        self.active = None;
    }

    pub(crate) fn reset(&mut self) {
        self.download = DownloadState::idle();
        self.log.clear();
        self.selection.clear_input();
        self.active = None;
        self.dirty = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_hold_progress_invariants() {
        assert_eq!(DownloadState::idle().progress(), 0);
        assert_eq!(DownloadState::failed("x").progress(), 0);
        assert_eq!(DownloadState::processing(250, "x").progress(), 100);

        let complete = DownloadState::complete("a.mp4", None);
        assert_eq!(complete.status(), DownloadStatus::Complete);
        assert_eq!(complete.progress(), 100);
        assert_eq!(complete.filename(), Some("a.mp4"));
    }

    #[test]
    fn submission_ids_increase_across_resets() {
        let mut state = AppState::new();
        let first = state.begin_submission();
        state.reset();
        assert_eq!(state.active_submission(), None);
        let second = state.begin_submission();
        assert!(second > first);
        assert!(state.active_mut(first).is_none());
        assert!(state.active_mut(second).is_some());
    }
}
