use std::io;

use grabber_core::{DownloadError, Msg, ResponseHead, SubmissionId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Success status received; body not read yet.
    Connected {
        submission: SubmissionId,
        head: ResponseHead,
    },
    /// Request over: the whole body, or why there is none.
    Finished {
        submission: SubmissionId,
        result: Result<Vec<u8>, DownloadError>,
    },
}

impl From<EngineEvent> for Msg {
    fn from(event: EngineEvent) -> Self {
        match event {
            EngineEvent::Connected { submission, head } => Msg::Connected { submission, head },
            EngineEvent::Finished { submission, result } => Msg::Finished { submission, result },
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine worker: {0}")]
    Worker(#[from] io::Error),
    #[error("failed to build http client: {0}")]
    Client(String),
}
