//! Rendering generation requests into TypeScript source text.
//!
//! `Renderer` is the seam between AST construction and text production. Two
//! implementations ship with the crate:
//! - `HttpRenderer`: posts the request to a remote rendering service
//! - `LocalRenderer`: prints the AST in-process via the `Emit` trait
//!
//! `dispatch` wraps any renderer with bounded retries and a per-attempt
//! timeout.

mod http;
mod local;

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::RenderError;
use crate::request::GenerationRequest;

pub use http::{DEFAULT_RENDERER_URL, HttpRenderer, HttpRendererConfig};
pub use local::LocalRenderer;

/// Default number of attempts per request
const DEFAULT_MAX_ATTEMPTS: u32 = 3;
/// Default per-attempt timeout (in seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default delay between attempts (in ms)
const DEFAULT_RETRY_DELAY_MS: u64 = 200;

/// Turns a generation request into source text.
pub trait Renderer: Send + Sync {
    /// Render one request. Any non-success outcome is an error, never empty
    /// text.
    fn render(
        &self,
        request: &GenerationRequest,
    ) -> impl Future<Output = Result<String, RenderError>> + Send;
}

/// Retry behaviour for render dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per request, including the first.
    pub max_attempts: u32,
    /// Timeout applied to each attempt.
    pub timeout: Duration,
    /// Delay between attempts.
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

/// Render `request`, retrying transient failures up to the policy's budget.
///
/// Each request owns its budget; a request that exhausts it fails alone.
pub async fn dispatch<R: Renderer>(
    renderer: &R,
    request: &GenerationRequest,
    policy: &RetryPolicy,
) -> Result<String, RenderError> {
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let outcome = tokio::time::timeout(policy.timeout, renderer.render(request))
            .await
            .unwrap_or_else(|_| Err(RenderError::Timeout(policy.timeout.as_millis())));

        match outcome {
            Ok(text) => {
                debug!(model = %request.name(), attempt, "Request rendered.");
                return Ok(text);
            }
            Err(err) if err.is_transient() && attempt < attempts => {
                warn!(
                    model = %request.name(),
                    attempt,
                    max_attempts = attempts,
                    error = %err,
                    "Render attempt failed, retrying."
                );
                tokio::time::sleep(policy.retry_delay).await;
                attempt += 1;
            }
            Err(err) => {
                debug!(model = %request.name(), attempt, error = %err, "Render failed.");
                return Err(err);
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use reqwest::StatusCode;

    use super::*;
    use crate::layout::OutputLayout;
    use crate::typescript::{EnumAst, TargetAst};

    /// Fails with the given status for the first `failures` calls.
    struct FlakyRenderer {
        failures: u32,
        status: StatusCode,
        calls: AtomicU32,
    }

    impl Renderer for FlakyRenderer {
        async fn render(&self, _request: &GenerationRequest) -> Result<String, RenderError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(RenderError::Status {
                    status: self.status,
                    body: String::new(),
                })
            } else {
                Ok("export enum Status {}\n".to_string())
            }
        }
    }

    struct SlowRenderer;

    impl Renderer for SlowRenderer {
        async fn render(&self, _request: &GenerationRequest) -> Result<String, RenderError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(String::new())
        }
    }

    fn request() -> GenerationRequest {
        GenerationRequest::build(
            TargetAst::Enum(EnumAst {
                name: "Status".into(),
                members: vec![],
            }),
            &OutputLayout::new("out"),
        )
        .unwrap()
    }

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            timeout: Duration::from_millis(50),
            retry_delay: Duration::from_millis(1),
        }
    }

    #[tokio::test]
    async fn test_retries_transient_failures() {
        let renderer = FlakyRenderer {
            failures: 2,
            status: StatusCode::SERVICE_UNAVAILABLE,
            calls: AtomicU32::new(0),
        };
        let text = dispatch(&renderer, &request(), &fast_policy(3))
            .await
            .unwrap();
        assert_eq!(text, "export enum Status {}\n");
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let renderer = FlakyRenderer {
            failures: 10,
            status: StatusCode::BAD_GATEWAY,
            calls: AtomicU32::new(0),
        };
        let err = dispatch(&renderer, &request(), &fast_policy(2))
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::Status { .. }));
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_does_not_retry_client_errors() {
        let renderer = FlakyRenderer {
            failures: 1,
            status: StatusCode::BAD_REQUEST,
            calls: AtomicU32::new(0),
        };
        assert!(dispatch(&renderer, &request(), &fast_policy(5)).await.is_err());
        assert_eq!(renderer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_timeout_per_attempt() {
        let err = dispatch(&SlowRenderer, &request(), &fast_policy(2))
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::Timeout(50)));
    }
}
