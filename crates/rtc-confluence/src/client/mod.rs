//! Confluence REST API client.
//!
//! Provides a sync HTTP client for the Confluence content REST API,
//! authenticated with HTTP Basic credentials (account name and API token).

mod pages;

pub use pages::PageContent;

use std::time::Duration;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use serde::de::DeserializeOwned;
use ureq::http::Response;
use ureq::{Agent, Body};

use crate::error::ConfluenceError;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create client from config values.
    ///
    /// # Arguments
    /// * `base_url` - Wiki base URL (e.g. `https://acme.atlassian.net/wiki`)
    /// * `username` - Account user name
    /// * `api_key` - API token
    #[must_use]
    pub fn from_config(base_url: &str, username: &str, api_key: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            auth_header: basic_auth_header(username, api_key),
        }
    }

    /// Wiki base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the content API URL.
    fn content_url(&self) -> String {
        format!("{}/rest/api/content", self.base_url)
    }
}

/// Build the `Authorization` header value for Basic authentication.
fn basic_auth_header(username: &str, api_key: &str) -> String {
    let credentials = BASE64_STANDARD.encode(format!("{username}:{api_key}"));
    format!("Basic {credentials}")
}

/// Turn an HTTP response into a typed body or an error carrying the status.
fn read_response<T: DeserializeOwned>(response: Response<Body>) -> Result<T, ConfluenceError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    check_status(status, || {
        body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned())
    })?;

    Ok(body_reader.read_json()?)
}

/// Map an error status to [`ConfluenceError::HttpResponse`].
///
/// `body` is only read for statuses of 400 and above.
fn check_status(status: u16, body: impl FnOnce() -> String) -> Result<(), ConfluenceError> {
    if status >= 400 {
        return Err(ConfluenceError::HttpResponse {
            status,
            body: body(),
        });
    }
    Ok(())
}
