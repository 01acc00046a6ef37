//! Direct HTTP renderer
//!
//! This renderer fetches pages with a plain GET request. It does not execute
//! scripts, so contact details injected client-side are only visible through
//! the `BrowserRenderer`. It is useful when no browser service is available
//! and for sites that render server-side.

use crate::config::RendererConfig;
use crate::render::{PageRenderer, RenderedPage, WaitPolicy};
use crate::FetchError;
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Builds the HTTP client shared by both renderers
///
/// # Example
///
/// ```no_run
/// use mailscout::config::RendererConfig;
/// use mailscout::render::build_http_client;
///
/// let client = build_http_client(&RendererConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &RendererConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Renderer that fetches HTML with a plain GET request
pub struct HttpRenderer {
    client: Client,
}

impl HttpRenderer {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    /// Fetches the page; the wait policy has no meaning without a browser
    ///
    /// # Error Mapping
    ///
    /// | Condition | Error |
    /// |-----------|-------|
    /// | Request exceeded `timeout` | `Timeout` |
    /// | Non-success status | `Http` |
    /// | Content-Type present and not HTML | `NotHtml` |
    /// | Connection refused, TLS, redirect limit | `Network` |
    async fn fetch(
        &self,
        url: &Url,
        timeout: Duration,
        _wait: WaitPolicy,
    ) -> Result<RenderedPage, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, timeout, e))?;

        let status = response.status();
        let final_url = response.url().clone();

        if !status.is_success() {
            return Err(FetchError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.is_empty() && !is_html(&content_type) {
            return Err(FetchError::NotHtml {
                url: url.to_string(),
                content_type,
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| classify_error(url, timeout, e))?;

        Ok(RenderedPage { final_url, html })
    }
}

/// Returns true for HTML and XHTML content types
fn is_html(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type.contains("text/html") || content_type.contains("application/xhtml+xml")
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(url: &Url, timeout: Duration, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    } else {
        FetchError::Network {
            url: url.to_string(),
            message: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn renderer() -> HttpRenderer {
        HttpRenderer::new(build_http_client(&RendererConfig::default()).unwrap())
    }

    fn page_url(server: &MockServer, page: &str) -> Url {
        Url::parse(&format!("{}{}", server.uri(), page)).unwrap()
    }

    #[test]
    fn test_is_html() {
        assert!(is_html("text/html"));
        assert!(is_html("text/html; charset=utf-8"));
        assert!(is_html("Text/HTML"));
        assert!(is_html("application/xhtml+xml"));
        assert!(!is_html("application/pdf"));
        assert!(!is_html("image/png"));
    }

    #[tokio::test]
    async fn test_fetch_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html><body>Hi</body></html>", "text/html; charset=utf-8"),
            )
            .mount(&server)
            .await;

        let page = renderer()
            .fetch(&page_url(&server, "/"), Duration::from_secs(5), WaitPolicy::Load)
            .await
            .unwrap();

        assert!(page.html.contains("Hi"));
        assert_eq!(page.final_url.path(), "/");
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw("<html>moved</html>", "text/html"),
            )
            .mount(&server)
            .await;

        let page = renderer()
            .fetch(&page_url(&server, "/old"), Duration::from_secs(5), WaitPolicy::Load)
            .await
            .unwrap();

        assert_eq!(page.final_url.path(), "/new");
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = renderer()
            .fetch(&page_url(&server, "/missing"), Duration::from_secs(5), WaitPolicy::Load)
            .await;

        assert!(matches!(result, Err(FetchError::Http { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(vec![0u8, 1, 2])
                    .insert_header("content-type", "application/octet-stream"),
            )
            .mount(&server)
            .await;

        let result = renderer()
            .fetch(&page_url(&server, "/blob"), Duration::from_secs(5), WaitPolicy::Load)
            .await;

        assert!(matches!(result, Err(FetchError::NotHtml { .. })));
    }

    #[tokio::test]
    async fn test_fetch_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("<html>slow</html>")
                    .insert_header("content-type", "text/html")
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let result = renderer()
            .fetch(&page_url(&server, "/slow"), Duration::from_millis(200), WaitPolicy::Load)
            .await;

        assert!(matches!(result, Err(FetchError::Timeout { timeout_ms: 200, .. })));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        let server = MockServer::start().await;
        let url = page_url(&server, "/");
        drop(server);

        let result = renderer()
            .fetch(&url, Duration::from_secs(2), WaitPolicy::Load)
            .await;

        assert!(result.is_err());
    }
}
