use std::time::Duration;

use futures_util::StreamExt;
use grabber_core::{ApiRequest, DownloadError, ResponseHead, SubmissionId};
use grabber_logging::{grab_debug, grab_info, grab_warn};
use reqwest::header::CONTENT_DISPOSITION;
use serde::Deserialize;

use crate::{EngineError, EngineEvent};

/// Error bodies only need to carry a short JSON `message`.
const ERROR_BODY_LIMIT: u64 = 64 * 1024;

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Scheme and host of the media API, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Covers the whole exchange, body included.
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(300),
            max_bytes: 2 * 1024 * 1024 * 1024,
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Performs the single request of a submission.
///
/// Implementations emit `EngineEvent::Connected` once a success status is
/// seen and return the full body; failures are returned, not emitted.
#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(
        &self,
        submission: SubmissionId,
        request: &ApiRequest,
        sink: &dyn EventSink,
    ) -> Result<Vec<u8>, DownloadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, path: &str) -> Result<reqwest::Url, DownloadError> {
        let joined = format!("{}{}", self.settings.base_url.trim_end_matches('/'), path);
        reqwest::Url::parse(&joined)
            .map_err(|err| DownloadError::Unknown(format!("invalid api url {joined}: {err}")))
    }

    fn too_large(&self, actual: u64) -> DownloadError {
        DownloadError::Unknown(format!(
            "response too large ({actual} bytes, limit {})",
            self.settings.max_bytes
        ))
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(
        &self,
        submission: SubmissionId,
        request: &ApiRequest,
        sink: &dyn EventSink,
    ) -> Result<Vec<u8>, DownloadError> {
        let url = self.endpoint(&request.path)?;
        grab_info!("submission {submission}: POST {url}");

        let response = self
            .client
            .post(url)
            .json(&request.body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = read_prefix(response, ERROR_BODY_LIMIT.min(self.settings.max_bytes)).await;
            let err = transport_error(status.as_u16(), &body);
            grab_warn!("submission {submission}: {status}: {err}");
            return Err(err);
        }

        if let Some(len) = response.content_length() {
            if len > self.settings.max_bytes {
                return Err(self.too_large(len));
            }
        }

        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);

        sink.emit(EngineEvent::Connected {
            submission,
            head: ResponseHead {
                content_disposition,
            },
        });

        let mut payload = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = payload.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            payload.extend_from_slice(&chunk);
        }

        grab_debug!("submission {submission}: read {} bytes", payload.len());
        Ok(payload)
    }
}

/// Reads at most `limit` bytes of a body; read errors end the prefix early.
async fn read_prefix(response: reqwest::Response, limit: u64) -> Vec<u8> {
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(Ok(chunk)) = stream.next().await {
        let room = limit - body.len();
        if chunk.len() >= room {
            body.extend_from_slice(&chunk[..room]);
            break;
        }
        body.extend_from_slice(&chunk);
    }
    body
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Uses the `message` of a JSON error body, else a status-derived message.
fn transport_error(status: u16, body: &[u8]) -> DownloadError {
    match serde_json::from_slice::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
        }) if !message.trim().is_empty() => DownloadError::Transport { status, message },
        _ => DownloadError::from_status(status),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> DownloadError {
    if err.is_timeout() {
        return DownloadError::Unknown(format!("request timed out: {err}"));
    }
    DownloadError::Unknown(err.to_string())
}
