use std::collections::BTreeMap;
use std::error::Error as _;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use reqwest::blocking::{Client, Response};
use reqwest::header::{CONTENT_TYPE, HeaderMap};
use reqwest::redirect::Policy;
use tracing::{debug, info, warn};

use crate::error::CallFailure;

use super::request::RequestConfig;
use super::response::{CallSuccess, ResponseInfo};

/// Perform the configured GET and block until it completes.
///
/// Only HTTP 200 counts as success. Everything else, including failures
/// before a response arrives, comes back as a [`CallFailure`] carrying
/// whatever metadata was gathered.
pub fn call(config: &RequestConfig) -> Result<CallSuccess, CallFailure> {
    let mut info = ResponseInfo::for_url(config.url().as_str());
    let hops = Arc::new(AtomicUsize::new(0));

    if !config.verify_tls() {
        warn!(url = %config.url(), "TLS certificate verification is disabled");
    }

    let client = match build_client(config, Arc::clone(&hops)) {
        Ok(client) => client,
        Err(e) => return Err(failed(info, format!("Failed to build HTTP client: {}", describe(&e)))),
    };

    debug!(
        url = %config.url(),
        username = config.credentials().username(),
        user_agent = config.user_agent(),
        "sending GET"
    );
    let started = Instant::now();
    let request = config.credentials().apply(client.get(config.url().clone()));

    let response = match request.send() {
        Ok(response) => response,
        Err(e) => {
            info.total_time_ms = elapsed_ms(started);
            info.redirect_count = hops.load(Ordering::Relaxed);
            return Err(failed(info, format!("Request failed: {}", describe(&e))));
        }
    };

    record_response(&mut info, &response);
    let bytes = response.bytes();
    info.total_time_ms = elapsed_ms(started);
    info.redirect_count = hops.load(Ordering::Relaxed);

    let bytes = match bytes {
        Ok(bytes) => bytes,
        Err(e) => return Err(failed(info, format!("Failed to read response: {}", describe(&e)))),
    };
    info.size_download = bytes.len() as u64;
    let body = String::from_utf8_lossy(&bytes).into_owned();

    if info.http_code == 200 {
        info!(
            status = info.http_code,
            elapsed_ms = info.total_time_ms,
            redirects = info.redirect_count,
            bytes = info.size_download,
            "call succeeded"
        );
        Ok(CallSuccess { body, info })
    } else {
        warn!(
            status = info.http_code,
            elapsed_ms = info.total_time_ms,
            url = info.effective_url.as_deref().unwrap_or(&info.url),
            "call failed"
        );
        Err(CallFailure::new(info))
    }
}

fn build_client(config: &RequestConfig, hops: Arc<AtomicUsize>) -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(config.user_agent())
        .redirect(redirect_policy(config, hops))
        .danger_accept_invalid_certs(!config.verify_tls())
        .timeout(config.timeout())
        .build()
}

fn redirect_policy(config: &RequestConfig, hops: Arc<AtomicUsize>) -> Policy {
    if !config.follow_redirects() {
        return Policy::none();
    }

    let max = config.max_redirects();
    Policy::custom(move |attempt| {
        if hops.load(Ordering::Relaxed) >= max {
            return attempt.error(format!("too many redirects (limit {max})"));
        }
        let hop = hops.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(to = %attempt.url(), hop, "following redirect");
        attempt.follow()
    })
}

fn record_response(info: &mut ResponseInfo, response: &Response) {
    let status = response.status();
    info.http_code = status.as_u16();
    info.status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
    info.effective_url = Some(response.url().to_string());
    info.remote_addr = response.remote_addr().map(|addr| addr.to_string());
    info.content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    info.headers = collect_headers(response.headers());
}

fn collect_headers(headers: &HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = value.to_str().unwrap_or("<binary>");
        collected
            .entry(name.to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    collected
}

fn failed(mut info: ResponseInfo, message: String) -> CallFailure {
    warn!(url = %info.url, error = %message, "call failed before a response was read");
    info.error = Some(message);
    CallFailure::new(info)
}

/// reqwest's top-level message rarely names the cause (DNS, TLS, refused),
/// so append the source chain.
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
