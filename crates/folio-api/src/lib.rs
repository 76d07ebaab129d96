//! # folio-api — Portfolio Site API
//!
//! HTTP surface behind the portfolio site: the contact form, drafted reply
//! suggestions, and the project catalog the gallery deep-links into.
//!
//! ## API Surface
//!
//! | Route                        | Module                 | Limit (default) |
//! |------------------------------|------------------------|-----------------|
//! | `POST /api/contact`          | [`routes::contact`]    | 5 per hour      |
//! | `POST /api/ai/suggest-reply` | [`routes::suggest`]    | 10 per hour     |
//! | `GET /api/projects`          | [`routes::projects`]   | none            |
//! | `GET /api/projects/{slug}`   | [`routes::projects`]   | none            |
//! | `GET /metrics`               | [`middleware::metrics`]| none            |
//! | `GET /openapi.json`          | [`openapi`]            | none            |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → RateLimitMiddleware (per route) → Handler
//! ```

pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod reply;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) sit outside the tracing and metrics layers.
pub fn app(state: AppState) -> Router {
    let metrics = state.metrics.clone();

    let api = Router::new()
        .merge(routes::contact::router(&state))
        .merge(routes::suggest::router(&state))
        .merge(routes::projects::router())
        .merge(openapi::router())
        .route("/metrics", get(render_metrics))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(metrics))
        .with_state(state);

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api)
}

/// Liveness probe: 200 while the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 once the catalog is loaded and the router built.
async fn readiness() -> &'static str {
    "ready"
}

/// GET /metrics in Prometheus text format.
async fn render_metrics(State(state): State<AppState>) -> String {
    state.metrics.render()
}
