use thiserror::Error;

/// Failures after a request has been dispatched. Each one ends its submission.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    /// Non-success HTTP status; `message` comes from the error body when it has one.
    #[error("{message}")]
    Transport { status: u16, message: String },
    #[error("downloaded file is too small ({size} bytes, expected at least {minimum}), it may be invalid")]
    PayloadTooSmall { size: u64, minimum: u64 },
    #[error("{0}")]
    Unknown(String),
}

impl DownloadError {
    /// Message used when the server gave no readable reason.
    pub fn from_status(status: u16) -> Self {
        DownloadError::Transport {
            status,
            message: format!("request failed with status {status}"),
        }
    }
}
