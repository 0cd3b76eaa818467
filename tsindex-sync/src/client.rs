//! The HTTP seam every remote read goes through.

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::error::{FetchError, SyncError};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can fetch the body at a URL.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Blocking HTTP fetcher backed by reqwest.
pub struct HttpFetcher {
    http: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("tsindex/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        log::debug!("GET {url}");
        let response = self.http.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.bytes()?.to_vec())
    }
}

/// Fetch `url` and decode it as JSON.
pub fn fetch_json<T: DeserializeOwned>(fetcher: &dyn Fetch, url: &str) -> Result<T, SyncError> {
    let body = fetcher.fetch(url)?;
    serde_json::from_slice(&body).map_err(|e| SyncError::parse(url, e))
}
