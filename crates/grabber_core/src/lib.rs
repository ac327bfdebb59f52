//! Grabber core: pure download state machine and view-model helpers.
mod console_log;
mod effect;
mod error;
mod filename;
mod msg;
mod request;
mod selection;
mod state;
mod update;
mod validate;
mod view_model;

pub use console_log::{ConsoleLog, LogEntry, CONSOLE_LOG_CAPACITY};
pub use effect::{Effect, Notification, NotificationKind};
pub use error::DownloadError;
pub use filename::resolve_filename;
pub use msg::Msg;
pub use request::{ApiRequest, RequestBody, ResponseHead};
pub use selection::{Mode, ParseSelectionError, Platform, Selection};
pub use state::{
    AppState, CoreSettings, DownloadState, DownloadStatus, SubmissionId,
    DEFAULT_MIN_PAYLOAD_BYTES,
};
pub use update::update;
pub use validate::{validate, ValidationError};
pub use view_model::AppViewModel;
