//! HTTP client for the remote rendering service.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};

use super::Renderer;
use crate::error::RenderError;
use crate::request::GenerationRequest;
use crate::typescript::TargetAst;

/// Default rendering service address
pub const DEFAULT_RENDERER_URL: &str = "http://localhost:8080";

const CLASS_ENDPOINT: &str = "/generate/class";
const ENUM_ENDPOINT: &str = "/generate/enum";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Connection settings for the rendering service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRendererConfig {
    /// Service base URL, without trailing slash.
    pub base_url: String,
    /// Per-request timeout enforced by the client.
    pub timeout: Duration,
}

impl Default for HttpRendererConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_RENDERER_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Renders by posting requests to the rendering service.
///
/// Owns one client for its whole lifetime so connections are reused across
/// every request of a run. Construct it when the run starts and drop it when
/// the run ends.
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpRenderer {
    /// Build the client.
    pub fn new(config: &HttpRendererConfig) -> Result<Self, RenderError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| {
                warn!(error = %err, "Failed to build renderer HTTP client.");
                RenderError::Transport(err)
            })?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        })
    }

    /// Endpoint handling the request's category.
    pub fn endpoint(request: &GenerationRequest) -> &'static str {
        match request.data_model {
            TargetAst::Class(_) => CLASS_ENDPOINT,
            TargetAst::Enum(_) => ENUM_ENDPOINT,
        }
    }

    fn build_url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Renderer for HttpRenderer {
    async fn render(&self, request: &GenerationRequest) -> Result<String, RenderError> {
        let url = self.build_url(Self::endpoint(request));
        let body = request.to_json().map_err(RenderError::Serialize)?;

        debug!(%url, model = %request.name(), "Sending render request.");
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, JSON_MEDIA_TYPE)
            .header(CONTENT_TYPE, JSON_MEDIA_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|err| {
                debug!(error = %err, %url, "Render request failed.");
                if err.is_timeout() {
                    RenderError::Timeout(self.timeout.as_millis())
                } else {
                    RenderError::Transport(err)
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(RenderError::Transport)?;

        if !status.is_success() {
            warn!(%status, model = %request.name(), "Renderer rejected request.");
            return Err(RenderError::Status { status, body: text });
        }
        if text.trim().is_empty() {
            return Err(RenderError::EmptyResponse);
        }

        debug!(%status, bytes = text.len(), "Received render response.");
        Ok(text)
    }
}
