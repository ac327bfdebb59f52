//! Grabber engine: HTTP transport, host save target and effect execution.
mod engine;
mod fetch;
mod orchestrator;
mod persist;
mod types;

pub use engine::EngineHandle;
pub use fetch::{ChannelEventSink, EventSink, FetchSettings, Fetcher, ReqwestFetcher};
pub use orchestrator::{DownloadOrchestrator, NotificationSink};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError, SaveTarget};
pub use types::{EngineError, EngineEvent};
