// crates/flagtable-core/src/fetch/http.rs

use super::{FetchRequest, FetchResponse};
use crate::error::{FlagTableError, NetworkError, NetworkErrorKind, Result};
use crate::traits::Fetch;
use log::{debug, trace};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::redirect::Policy;
use std::time::Duration;

/// Client-level connect timeout. Per-request timeouts come from [`FetchRequest`].
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(20);

const MAX_REDIRECTS: usize = 10;

// One client per process is enough for the default settings; it pools connections.
static SHARED_FETCHER: OnceCell<HttpFetcher> = OnceCell::new();

/// Blocking [`Fetch`] implementation over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self> {
        Self::with_connect_timeout(CONNECT_TIMEOUT)
    }

    pub fn with_connect_timeout(connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("flagtable/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FlagTableError::Client(e.to_string()))?;
        Ok(Self { client })
    }

    /// Process-wide fetcher with the default connect timeout.
    pub fn shared() -> Result<&'static Self> {
        SHARED_FETCHER.get_or_try_init(Self::new)
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, request: &FetchRequest) -> std::result::Result<FetchResponse, NetworkError> {
        let url = request.url();
        trace!("GET {url} (timeout {:?})", request.request_timeout());

        let mut builder = self.client.get(url).timeout(request.request_timeout());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().map_err(|e| network_error(url, e))?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(|e| network_error(url, e))?;

        debug!("GET {url} -> {status} ({} bytes)", body.len());
        Ok(FetchResponse::new(status, body.to_vec()))
    }
}

fn network_error(url: &str, err: reqwest::Error) -> NetworkError {
    let kind = if err.is_timeout() {
        NetworkErrorKind::Timeout
    } else if err.is_connect() {
        NetworkErrorKind::Connect
    } else {
        NetworkErrorKind::Other
    };
    NetworkError::new(url, kind, err)
}
