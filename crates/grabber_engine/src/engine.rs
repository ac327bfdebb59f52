use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use grabber_core::{ApiRequest, SubmissionId};
use grabber_logging::grab_debug;

use crate::fetch::{ChannelEventSink, FetchSettings, Fetcher, ReqwestFetcher};
use crate::{EngineError, EngineEvent};

enum EngineCommand {
    Send {
        submission: SubmissionId,
        request: ApiRequest,
    },
}

/// Owns the worker thread that runs requests on a tokio runtime.
///
/// Commands go in and events come out over plain channels, so the caller
/// never needs an async context. Dropping the handle stops the worker once
/// in-flight requests finish.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let fetcher = ReqwestFetcher::new(settings)?;
        Self::with_fetcher(Arc::new(fetcher))
    }

    pub fn with_fetcher(fetcher: Arc<dyn Fetcher>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("grabber-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let fetcher = fetcher.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(fetcher.as_ref(), command, event_tx).await;
                    });
                }
                grab_debug!("engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn send(&self, submission: SubmissionId, request: ApiRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Send {
            submission,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Send {
            submission,
            request,
        } => {
            let sink = ChannelEventSink::new(event_tx.clone());
            let result = fetcher.fetch(submission, &request, &sink).await;
            let _ = event_tx.send(EngineEvent::Finished { submission, result });
        }
    }
}
