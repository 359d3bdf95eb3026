use thiserror::Error;

use crate::http::response::ResponseInfo;

/// Problems detected while assembling a request, before anything is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("unsupported URL scheme `{0}` (expected http or https)")]
    UnsupportedScheme(String),
    #[error("invalid subdomain `{0}`")]
    InvalidSubdomain(String),
    #[error("basic auth username cannot be empty")]
    EmptyUsername,
    #[error("invalid user agent `{value}`: {reason}")]
    InvalidUserAgent { value: String, reason: String },
}

/// A call that did not end in HTTP 200.
///
/// Server errors, transport failures and redirect loops all land here; the
/// metadata tells them apart (`http_code` is `0` when no response arrived).
#[derive(Debug, Error)]
#[error("call failed with HTTP {}", .info.http_code)]
pub struct CallFailure {
    pub info: Box<ResponseInfo>,
}

impl CallFailure {
    pub fn new(info: ResponseInfo) -> Self {
        Self {
            info: Box::new(info),
        }
    }
}
