//! Remote headless browser renderer
//!
//! Talks to a browser service exposing a `/content` endpoint (the browserless
//! API): the service navigates to the URL, waits according to the requested
//! policy, and returns the serialized DOM.

use crate::render::{PageRenderer, RenderedPage, WaitPolicy};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Extra time granted to the HTTP call on top of the navigation timeout, so
/// the service reports its own timeout before the connection is cut
const RESPONSE_GRACE: Duration = Duration::from_secs(5);

/// Longest service error message kept in a `Navigation` error
const MAX_MESSAGE_LEN: usize = 200;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentRequest<'a> {
    url: &'a str,
    goto_options: GotoOptions,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GotoOptions {
    timeout: u64,
    wait_until: &'static str,
}

impl WaitPolicy {
    /// The puppeteer `waitUntil` value for this policy
    fn as_wait_until(&self) -> &'static str {
        match self {
            WaitPolicy::NetworkIdle => "networkidle0",
            WaitPolicy::Load => "load",
        }
    }
}

/// Renderer backed by a remote headless browser service
pub struct BrowserRenderer {
    client: Client,
    content_url: Url,
}

impl BrowserRenderer {
    /// Creates a renderer for the service at `endpoint`
    ///
    /// The optional `token` is sent as a `token` query parameter on every call.
    pub fn new(client: Client, endpoint: Url, token: Option<String>) -> Self {
        let mut base = endpoint;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut content_url = base.join("content").unwrap_or(base);
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            content_url.query_pairs_mut().append_pair("token", &token);
        }

        Self {
            client,
            content_url,
        }
    }

    /// The URL pages are requested from
    pub fn content_url(&self) -> &Url {
        &self.content_url
    }
}

#[async_trait]
impl PageRenderer for BrowserRenderer {
    async fn fetch(
        &self,
        url: &Url,
        timeout: Duration,
        wait: WaitPolicy,
    ) -> Result<RenderedPage, FetchError> {
        let timeout_ms = timeout.as_millis() as u64;
        let body = ContentRequest {
            url: url.as_str(),
            goto_options: GotoOptions {
                timeout: timeout_ms,
                wait_until: wait.as_wait_until(),
            },
        };

        let response = self
            .client
            .post(self.content_url.clone())
            .timeout(timeout + RESPONSE_GRACE)
            .json(&body)
            .send()
            .await
            .map_err(|e| transport_error(url, timeout_ms, e))?;

        let status = response.status();
        if status.is_success() {
            let html = response
                .text()
                .await
                .map_err(|e| transport_error(url, timeout_ms, e))?;
            return Ok(RenderedPage {
                final_url: url.clone(),
                html,
            });
        }

        if status == StatusCode::REQUEST_TIMEOUT || status == StatusCode::GATEWAY_TIMEOUT {
            return Err(FetchError::Timeout {
                url: url.to_string(),
                timeout_ms,
            });
        }

        let mut message = response.text().await.unwrap_or_default().trim().to_string();
        if message.is_empty() {
            message = format!("browser service returned HTTP {}", status.as_u16());
        }
        if message.len() > MAX_MESSAGE_LEN {
            let cut = (0..=MAX_MESSAGE_LEN)
                .rev()
                .find(|i| message.is_char_boundary(*i))
                .unwrap_or(0);
            message.truncate(cut);
        }

        Err(FetchError::Navigation {
            url: url.to_string(),
            message,
        })
    }

    async fn close(&self) -> Result<(), FetchError> {
        tracing::debug!("Releasing browser service session at {}", self.content_url);
        Ok(())
    }
}

/// Maps a transport failure talking to the service
fn transport_error(url: &Url, timeout_ms: u64, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
            timeout_ms,
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}
