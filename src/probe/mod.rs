//! Reachability probing with bounded retries and content sniffing.
//!
//! [`check_url`] issues an HTTP GET against a record's URL and
//! classifies the outcome under a category-specific
//! [`ProbePolicy`]. Retry and message-formatting logic is driven by
//! the closed [`AttemptError`] set rather than open-ended error
//! chains, so both stay exhaustive.

pub mod client;
pub mod sniff;

pub use client::{build_http_client, HttpClient};

use std::time::Duration;

use bytes::{Bytes, BytesMut};
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::header::{ACCEPT, CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use hyper::{Method, Request, Response, StatusCode};

/// At most this much of the response body is read for sniffing.
const SAMPLE_LIMIT: usize = 1024;

/// Category-specific acceptance rules, headers, and retry backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbePolicy {
    /// Static GTFS datasets: only HTTP 200 with a non-empty body.
    Static,
    /// Realtime updaters: 200 with a body, 204, and 429 all prove
    /// liveness.
    Realtime,
}

impl ProbePolicy {
    const fn user_agent(self) -> &'static str {
        match self {
            Self::Static => concat!(
                "Mozilla/5.0 (compatible; GTFS-Checker/",
                env!("CARGO_PKG_VERSION"),
                ")"
            ),
            Self::Realtime => concat!(
                "Mozilla/5.0 (compatible; Realtime-Checker/",
                env!("CARGO_PKG_VERSION"),
                ")"
            ),
        }
    }

    const fn accept(self) -> &'static str {
        match self {
            Self::Static => "*/*",
            Self::Realtime => "application/x-protobuf, application/json, */*",
        }
    }

    const fn retry_backoff(self) -> Duration {
        match self {
            Self::Static => Duration::from_millis(1000),
            Self::Realtime => Duration::from_millis(500),
        }
    }
}

/// Per-attempt timeout and total attempt count.
#[derive(Debug, Clone, Copy)]
pub struct ProbeLimits {
    pub timeout: Duration,
    pub retries: u32,
}

impl Default for ProbeLimits {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(15),
            retries: 2,
        }
    }
}

/// Outcome of one [`check_url`] call, retries included.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub success: bool,
    pub message: String,
    /// Last HTTP status seen; 0 when no response was ever received.
    pub status_code: u16,
}

impl ProbeResult {
    fn ok(message: String, status: StatusCode) -> Self {
        Self {
            success: true,
            message,
            status_code: status.as_u16(),
        }
    }

    fn fail(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            success: false,
            message: message.into(),
            status_code,
        }
    }
}

/// Closed set of retryable attempt failures.
#[derive(Debug)]
enum AttemptError {
    HttpStatus { code: StatusCode },
    Connection(String),
    Timeout,
    Other(String),
}

impl AttemptError {
    fn status_code(&self) -> u16 {
        match self {
            Self::HttpStatus { code } => code.as_u16(),
            _ => 0,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::HttpStatus { code } => match code.canonical_reason() {
                Some(reason) => format!("HTTP {}: {reason}", code.as_u16()),
                None => format!("HTTP {}", code.as_u16()),
            },
            Self::Connection(detail) => format!("Connection error: {detail}"),
            Self::Timeout => "Timeout".into(),
            Self::Other(detail) => format!("Error: {detail}"),
        }
    }
}

/// Probe a URL under the given policy. Never fails the run: every
/// outcome, including exhausted retries, folds into a [`ProbeResult`].
pub async fn check_url(
    client: &HttpClient,
    url: &str,
    policy: ProbePolicy,
    limits: ProbeLimits,
) -> ProbeResult {
    let attempts = limits.retries.max(1);

    for attempt in 1..=attempts {
        match attempt_once(client, url, policy, limits.timeout).await {
            Ok(result) => {
                tracing::debug!(url, attempt, success = result.success, "probe settled");
                return result;
            }
            Err(err) => {
                tracing::debug!(url, attempt, error = %err.message(), "probe attempt failed");
                if attempt == attempts {
                    return ProbeResult::fail(err.message(), err.status_code());
                }
                tokio::time::sleep(policy.retry_backoff()).await;
            }
        }
    }

    ProbeResult::fail("Max retries exceeded", 0)
}

async fn attempt_once(
    client: &HttpClient,
    url: &str,
    policy: ProbePolicy,
    timeout: Duration,
) -> Result<ProbeResult, AttemptError> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(url)
        .header(USER_AGENT, policy.user_agent())
        .header(ACCEPT, policy.accept())
        .body(Full::new(Bytes::new()))
        .map_err(|e| AttemptError::Other(error_detail(&e)))?;

    // The timeout covers the request and the body sampling together.
    match tokio::time::timeout(timeout, classify_response(client, request, policy)).await {
        Ok(outcome) => outcome,
        Err(_) => Err(AttemptError::Timeout),
    }
}

async fn classify_response(
    client: &HttpClient,
    request: Request<Full<Bytes>>,
    policy: ProbePolicy,
) -> Result<ProbeResult, AttemptError> {
    let response = client.request(request).await.map_err(|e| {
        if e.is_connect() {
            AttemptError::Connection(error_detail(&e))
        } else {
            AttemptError::Other(error_detail(&e))
        }
    })?;

    let status = response.status();
    let content_type = header_value(&response, CONTENT_TYPE).unwrap_or_default();
    let content_length = header_value(&response, CONTENT_LENGTH).unwrap_or_else(|| "unknown".into());

    match policy {
        ProbePolicy::Static => match status.as_u16() {
            200 => {
                let sample = read_sample(response.into_body()).await?;
                Ok(classify_static_sample(&sample, &content_type, &content_length))
            }
            _ if status.is_client_error() || status.is_server_error() => {
                Err(AttemptError::HttpStatus { code: status })
            }
            code => Ok(ProbeResult::fail(format!("HTTP {code}"), code)),
        },
        ProbePolicy::Realtime => match status.as_u16() {
            200 => {
                let sample = read_sample(response.into_body()).await?;
                Ok(classify_realtime_sample(&sample, &content_type, &content_length))
            }
            204 => Ok(ProbeResult::ok(
                "OK (No Content - no updates available)".into(),
                status,
            )),
            // Rate limiting still proves the endpoint is alive; accept
            // it immediately instead of retrying into the limit.
            429 => Ok(ProbeResult::ok(
                "OK (Rate limited - endpoint is working)".into(),
                status,
            )),
            _ if status.is_client_error() || status.is_server_error() => {
                Err(AttemptError::HttpStatus { code: status })
            }
            code => Ok(ProbeResult::fail(format!("HTTP {code}"), code)),
        },
    }
}

fn classify_static_sample(sample: &[u8], content_type: &str, content_length: &str) -> ProbeResult {
    if sniff::is_zip(sample) {
        ProbeResult::ok(
            format!("OK (ZIP file, {content_length} bytes)"),
            StatusCode::OK,
        )
    } else if !sample.is_empty() {
        ProbeResult::ok(
            format!("OK ({content_type}, {content_length} bytes)"),
            StatusCode::OK,
        )
    } else {
        ProbeResult::fail("Empty response", StatusCode::OK.as_u16())
    }
}

fn classify_realtime_sample(sample: &[u8], content_type: &str, content_length: &str) -> ProbeResult {
    if sample.is_empty() {
        return ProbeResult::fail("Empty response", StatusCode::OK.as_u16());
    }
    let message = if sniff::is_protobuf(sample) {
        format!("OK (GTFS-RT protobuf, {content_length} bytes)")
    } else if sniff::is_json(sample) {
        format!("OK (JSON, {content_length} bytes)")
    } else {
        format!("OK ({content_type}, {content_length} bytes)")
    };
    ProbeResult::ok(message, StatusCode::OK)
}

/// Read at most [`SAMPLE_LIMIT`] bytes of the body, then stop polling.
async fn read_sample(mut body: Incoming) -> Result<Bytes, AttemptError> {
    let mut sample = BytesMut::with_capacity(SAMPLE_LIMIT);

    while sample.len() < SAMPLE_LIMIT {
        match body.frame().await {
            Some(Ok(frame)) => {
                if let Ok(data) = frame.into_data() {
                    sample.extend_from_slice(&data);
                }
            }
            Some(Err(e)) => return Err(AttemptError::Connection(error_detail(&e))),
            None => break,
        }
    }

    sample.truncate(SAMPLE_LIMIT);
    Ok(sample.freeze())
}

fn header_value(response: &Response<Incoming>, name: hyper::header::HeaderName) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Innermost source message of an error chain; hyper's top-level
/// wrappers ("client error (Connect)") say less than their cause.
fn error_detail(err: &(dyn std::error::Error + 'static)) -> String {
    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        detail = inner.to_string();
        source = inner.source();
    }
    detail
}
