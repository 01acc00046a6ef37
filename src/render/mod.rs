//! Page rendering
//!
//! The crawler never talks to the network directly. It asks a `PageRenderer`
//! for the HTML of a URL under a timeout and a wait policy. Two renderers are
//! provided:
//! - `BrowserRenderer` calls a remote headless browser service and returns the
//!   fully rendered document
//! - `HttpRenderer` performs a plain GET without executing scripts

mod browser;
mod http;

pub use browser::BrowserRenderer;
pub use http::{build_http_client, HttpRenderer};

use crate::config::{RendererConfig, RendererKind};
use crate::FetchError;
use async_trait::async_trait;
use std::time::Duration;
use url::Url;

/// When a navigation is considered finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitPolicy {
    /// Wait until network activity settles; used for home pages, which often
    /// load contact widgets asynchronously
    NetworkIdle,
    /// Wait for the load event only
    Load,
}

/// A fetched page
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// URL of the document after redirects
    pub final_url: Url,

    /// The document HTML
    pub html: String,
}

/// Fetches pages for the crawler
///
/// A renderer is opened once per batch and reused sequentially for every
/// fetch. `close` is called exactly once when the batch ends.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Fetches `url`, failing if it takes longer than `timeout`
    async fn fetch(
        &self,
        url: &Url,
        timeout: Duration,
        wait: WaitPolicy,
    ) -> Result<RenderedPage, FetchError>;

    /// Releases any session held by the renderer
    async fn close(&self) -> Result<(), FetchError> {
        Ok(())
    }
}

/// Builds the renderer selected by the configuration
pub fn build_renderer(config: &RendererConfig) -> Result<Box<dyn PageRenderer>, crate::ScoutError> {
    let client = build_http_client(config)?;

    let renderer: Box<dyn PageRenderer> = match config.kind {
        RendererKind::Browser => {
            let endpoint = Url::parse(&config.endpoint).map_err(|e| {
                crate::ConfigError::InvalidUrl(format!(
                    "Invalid renderer endpoint '{}': {}",
                    config.endpoint, e
                ))
            })?;
            Box::new(BrowserRenderer::new(client, endpoint, config.token.clone()))
        }
        RendererKind::Http => Box::new(HttpRenderer::new(client)),
    };

    Ok(renderer)
}
