//! HTTP client for the items endpoint.
//!
//! # Architecture
//!
//! [`ItemsClient`] wraps a shared hardened [`reqwest::Client`] and issues a
//! single authenticated read: `GET <base_url>/items` with an
//! `Authorization: Bearer <token>` header.
//!
//! # Error Handling
//!
//! Every failure mode maps to one [`FetchError`] variant:
//!
//! | Variant | Cause |
//! |---------|-------|
//! | `Status` | Non-2xx HTTP status (`HTTP <code>`) |
//! | `Network` | Connection/transport failure |
//! | `Decode` | Body is not a JSON array of items |
//!
//! The caller converts all three into the `Failed` display phase; nothing
//! here retries or recovers.

use std::sync::OnceLock;
use std::time::Duration;

use roster_types::{ApiToken, Item};
use url::Url;

const CONNECT_TIMEOUT_SECS: u64 = 10;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const TCP_KEEPALIVE_SECS: u64 = 60;

fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        base_client_builder().build().unwrap_or_else(|e| {
            tracing::error!("Failed to build HTTP client: {e}. Falling back to defaults.");
            reqwest::Client::builder()
                .redirect(reqwest::redirect::Policy::none())
                .build()
                .expect("default HTTP client must build")
        })
    })
}

fn base_client_builder() -> reqwest::ClientBuilder {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
        .redirect(reqwest::redirect::Policy::none())
}

/// Failure modes of a single items fetch.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("HTTP {0}")]
    Status(u16),
    /// The request never produced a usable response.
    #[error("{0}")]
    Network(#[source] reqwest::Error),
    /// The body was not a JSON array of items.
    #[error("invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
#[error("invalid base URL {url}: cannot join endpoint path")]
pub struct BaseUrlError {
    pub url: Url,
}

/// Resolve the fixed `/items` endpoint against a base URL.
///
/// The base path is treated as a directory: `http://host:8000` and
/// `http://host:8000/api` both gain a trailing `items` segment.
fn items_url(base_url: &Url) -> Result<Url, BaseUrlError> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("items").map_err(|_| BaseUrlError {
        url: base_url.clone(),
    })
}

/// Read-only client for the items endpoint.
///
/// The credential is injected at construction; the client never reads
/// ambient process state.
#[derive(Debug, Clone)]
pub struct ItemsClient {
    items_url: Url,
    token: ApiToken,
    http: reqwest::Client,
}

impl ItemsClient {
    pub fn new(base_url: &Url, token: ApiToken) -> Result<Self, BaseUrlError> {
        Ok(Self {
            items_url: items_url(base_url)?,
            token,
            http: http_client().clone(),
        })
    }

    /// Endpoint this client fetches from.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.items_url
    }

    /// Fetch the item collection once.
    ///
    /// Returns items in server order; an empty array is a success. Never
    /// retries.
    pub async fn fetch_items(&self) -> Result<Vec<Item>, FetchError> {
        let response = self
            .http
            .get(self.items_url.clone())
            .bearer_auth(self.token.expose_secret())
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), url = %self.items_url, "items request failed");
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FetchError::Network)?;
        let items: Vec<Item> = serde_json::from_slice(&body).map_err(FetchError::Decode)?;
        tracing::debug!(count = items.len(), "items fetched");
        Ok(items)
    }
}
