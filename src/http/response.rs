use std::collections::BTreeMap;

use serde::Serialize;

/// Transfer metadata for one call, successful or not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResponseInfo {
    pub url: String,
    pub effective_url: Option<String>,
    /// `0` when no response was received.
    pub http_code: u16,
    pub status_text: String,
    pub content_type: Option<String>,
    pub redirect_count: usize,
    pub size_download: u64,
    pub total_time_ms: u64,
    pub remote_addr: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub error: Option<String>,
}

impl ResponseInfo {
    pub fn for_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct CallSuccess {
    pub body: String,
    pub info: ResponseInfo,
}
