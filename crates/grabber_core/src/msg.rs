use crate::{DownloadError, Mode, Platform, ResponseHead, SubmissionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a platform tab.
    PlatformSelected(Platform),
    /// User picked a download type.
    ModeSelected(Mode),
    /// User edited the URL / username input.
    InputChanged(String),
    /// User asked for the current selection to be downloaded.
    SubmitClicked,
    /// User asked to start over.
    ResetClicked,
    /// Engine got a success status; the body is still streaming.
    Connected {
        submission: SubmissionId,
        head: ResponseHead,
    },
    /// Engine finished a request, either with the whole body or a failure.
    Finished {
        submission: SubmissionId,
        result: Result<Vec<u8>, DownloadError>,
    },
    /// Host save mechanism reported back; `Ok` carries where the file landed.
    FileSaved {
        submission: SubmissionId,
        result: Result<String, String>,
    },
}
