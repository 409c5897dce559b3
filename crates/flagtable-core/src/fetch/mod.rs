// crates/flagtable-core/src/fetch/mod.rs

//! # HTTP Fetcher
//!
//! Request/response values shared by every [`Fetch`](crate::traits::Fetch)
//! implementation. The real transport lives in `http.rs` behind the `http`
//! feature.

use std::string::FromUtf8Error;
use std::time::Duration;

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpFetcher, CONNECT_TIMEOUT};

/// Used when the caller does not set a timeout explicitly.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A single GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    url: String,
    timeout: Duration,
    headers: Vec<(String, String)>,
}

impl FetchRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            headers: Vec::new(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn request_timeout(&self) -> Duration {
        self.timeout
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

/// Status plus the complete body. The status is informational only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    status: u16,
    body: Vec<u8>,
}

impl FetchResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as UTF-8 text (the JSON endpoints).
    pub fn into_text(self) -> Result<String, FromUtf8Error> {
        String::from_utf8(self.body)
    }
}
