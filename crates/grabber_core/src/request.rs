use serde::Serialize;

use crate::{Mode, Selection};

/// JSON body sent to the media API: `{"url": ..}` or `{"query": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestBody {
    Url(String),
    Query(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Path relative to the API base, e.g. `/api/youtube/video`.
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn for_selection(selection: &Selection) -> Self {
        let input = selection.input_text().to_string();
        let body = if selection.mode() == Mode::Search {
            RequestBody::Query(input)
        } else {
            RequestBody::Url(input)
        };
        Self {
            path: format!("/api/{}/{}", selection.platform(), selection.mode()),
            body,
        }
    }
}

/// What the engine learned from a successful response before reading its body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseHead {
    pub content_disposition: Option<String>,
}
