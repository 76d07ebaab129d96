//! # Prometheus Metrics
//!
//! Request counters and latency histograms recorded through the `metrics`
//! facade into a Prometheus recorder owned by the application, rendered
//! at `GET /metrics`.
//!
//! The recorder is scoped to [`ApiMetrics`] rather than installed globally,
//! so several routers (one per test) can live in one process.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle, PrometheusRecorder};

pub const REQUESTS_TOTAL: &str = "http_requests_total";
pub const REQUEST_DURATION: &str = "http_request_duration_seconds";
pub const RATE_LIMITED_TOTAL: &str = "rate_limited_requests_total";

/// Shared metrics state.
#[derive(Clone)]
pub struct ApiMetrics {
    recorder: Arc<PrometheusRecorder>,
    handle: PrometheusHandle,
}

impl ApiMetrics {
    pub fn new() -> Self {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        Self {
            recorder: Arc::new(recorder),
            handle,
        }
    }

    /// Run `f` with this instance's recorder as the `metrics` target.
    fn record(&self, f: impl FnOnce()) {
        metrics::with_local_recorder(&*self.recorder, f);
    }

    pub fn record_request(&self, method: &str, path: &str, status: u16, elapsed_secs: f64) {
        let (method, path) = (method.to_string(), path.to_string());
        self.record(|| {
            metrics::counter!(
                REQUESTS_TOTAL,
                "method" => method.clone(),
                "path" => path.clone(),
                "status" => status.to_string()
            )
            .increment(1);
            metrics::histogram!(REQUEST_DURATION, "method" => method, "path" => path)
                .record(elapsed_secs);
        });
    }

    pub fn record_rate_limited(&self, scope: &str) {
        let scope = scope.to_string();
        self.record(|| {
            metrics::counter!(RATE_LIMITED_TOTAL, "scope" => scope).increment(1);
        });
    }

    /// Prometheus text exposition of everything recorded so far.
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ApiMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiMetrics").finish_non_exhaustive()
    }
}

/// Middleware that records a request counter and latency per route.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());
    let started = Instant::now();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.record_request(
            &method,
            &path,
            response.status().as_u16(),
            started.elapsed().as_secs_f64(),
        );
    }

    response
}
