//! # Per-Client Rate Limiting
//!
//! Fixed-window counters keyed by `"{scope}:{client}"`. The store is an
//! in-process map behind one mutex, so each check-and-increment is atomic
//! with respect to every other check in this process. Counts are not shared
//! across processes and are lost on restart.
//!
//! ## Window rules
//!
//! - no entry, or `now > reset_at`: start a fresh window with count 1
//! - `count < limit`: increment
//! - otherwise: deny, leave the entry untouched
//!
//! Expired entries are only a memory concern. [`RateLimitStore::sweep`]
//! drops them and the binary runs it periodically through
//! [`RateLimitStore::spawn_sweeper`]; no decision depends on it having run.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::HeaderName;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

use crate::error::AppError;
use crate::middleware::metrics::ApiMetrics;

pub const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");
pub const X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Bucket used when no forwarding header identifies the client.
pub const UNKNOWN_CLIENT: &str = "unknown";

// ─── Decision ────────────────────────────────────────────────────────

/// Outcome of one [`RateLimitStore::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    /// Requests left in the current window after this one.
    pub remaining: u32,
    /// When the current window ends.
    pub reset_at: DateTime<Utc>,
}

impl RateLimitDecision {
    /// Whole seconds until the window resets, rounded up.
    ///
    /// A denied request gets at least 1: the window only expires strictly
    /// after `reset_at`, so a retry at `reset_at` itself is still denied.
    pub fn retry_after(&self, now: DateTime<Utc>) -> u64 {
        let floor = u64::from(!self.allowed);
        let millis = (self.reset_at - now).num_milliseconds();
        if millis <= 0 {
            return floor;
        }
        u64::try_from(millis).map_or(floor, |ms| ms.div_ceil(1000).max(floor))
    }

    /// Write `X-RateLimit-Limit`, `X-RateLimit-Remaining` and the RFC 3339
    /// `X-RateLimit-Reset` headers.
    pub fn apply_headers(&self, headers: &mut HeaderMap) {
        headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(self.limit));
        headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(self.remaining));
        if let Ok(reset) = HeaderValue::from_str(&self.reset_at.to_rfc3339()) {
            headers.insert(X_RATELIMIT_RESET, reset);
        }
    }
}

// ─── Store ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct RateLimitEntry {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Shared rate limit counters. Cloning yields another handle to the same map.
#[derive(Debug, Clone, Default)]
pub struct RateLimitStore {
    entries: Arc<Mutex<HashMap<String, RateLimitEntry>>>,
}

impl RateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one request from `identifier` against `limit` per `window`.
    pub fn check(&self, identifier: &str, limit: u32, window: Duration) -> RateLimitDecision {
        self.check_at(identifier, limit, window, Utc::now())
    }

    /// [`check`](Self::check) with an explicit clock reading.
    pub fn check_at(
        &self,
        identifier: &str,
        limit: u32,
        window: Duration,
        now: DateTime<Utc>,
    ) -> RateLimitDecision {
        let mut entries = self.entries.lock();

        let live = entries
            .get_mut(identifier)
            .filter(|entry| now <= entry.reset_at);

        match live {
            Some(entry) if entry.count < limit => {
                entry.count += 1;
                RateLimitDecision {
                    allowed: true,
                    limit,
                    remaining: limit - entry.count,
                    reset_at: entry.reset_at,
                }
            }
            Some(entry) => RateLimitDecision {
                allowed: false,
                limit,
                remaining: 0,
                reset_at: entry.reset_at,
            },
            None if limit == 0 => RateLimitDecision {
                allowed: false,
                limit,
                remaining: 0,
                reset_at: now + window,
            },
            None => {
                let reset_at = now + window;
                entries.insert(
                    identifier.to_string(),
                    RateLimitEntry { count: 1, reset_at },
                );
                RateLimitDecision {
                    allowed: true,
                    limit,
                    remaining: limit - 1,
                    reset_at,
                }
            }
        }
    }

    /// Drop entries whose window ended before `now`. Returns how many.
    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|_, entry| now <= entry.reset_at);
        before - entries.len()
    }

    /// [`sweep_at`](Self::sweep_at) against the wall clock.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    /// Number of tracked identifiers, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sweep every `period` on the tokio runtime until the task is aborted.
    pub fn spawn_sweeper(&self, period: std::time::Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let removed = store.sweep();
                if removed > 0 {
                    tracing::debug!(removed, "swept expired rate limit entries");
                }
            }
        })
    }
}

// ─── Client identification ───────────────────────────────────────────

/// Derive the client identifier from proxy headers.
///
/// First entry of `x-forwarded-for`, else `x-real-ip`, else [`UNKNOWN_CLIENT`].
/// Clients with no forwarding headers all share one bucket.
pub fn client_identifier(headers: &HeaderMap) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    header("x-forwarded-for")
        .and_then(|list| list.split(',').next())
        .map(str::trim)
        .filter(|first| !first.is_empty())
        .or_else(|| header("x-real-ip"))
        .unwrap_or(UNKNOWN_CLIENT)
        .to_string()
}

// ─── Policy & middleware ─────────────────────────────────────────────

/// Limit applied to one group of routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitPolicy {
    /// Bucket namespace, so separate endpoints keep separate counts.
    pub scope: String,
    pub limit: u32,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub fn new(scope: impl Into<String>, limit: u32, window: Duration) -> Self {
        Self {
            scope: scope.into(),
            limit,
            window,
        }
    }

    /// Store key for `identifier` under this policy.
    pub fn key(&self, identifier: &str) -> String {
        format!("{}:{identifier}", self.scope)
    }
}

/// Middleware state: a policy bound to the shared store.
#[derive(Debug, Clone)]
pub struct RateLimitGuard {
    pub store: RateLimitStore,
    pub policy: RateLimitPolicy,
}

impl RateLimitGuard {
    pub fn new(store: RateLimitStore, policy: RateLimitPolicy) -> Self {
        Self { store, policy }
    }
}

/// Middleware that enforces a [`RateLimitPolicy`] per client.
///
/// Mount with `axum::middleware::from_fn_with_state(guard, rate_limit_middleware)`.
pub async fn rate_limit_middleware(
    State(guard): State<RateLimitGuard>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_identifier(request.headers());
    let now = Utc::now();
    let decision = guard.store.check_at(
        &guard.policy.key(&client),
        guard.policy.limit,
        guard.policy.window,
        now,
    );

    if !decision.allowed {
        tracing::warn!(
            scope = %guard.policy.scope,
            client = %client,
            reset_at = %decision.reset_at,
            "rate limit exceeded"
        );
        if let Some(metrics) = request.extensions().get::<ApiMetrics>() {
            metrics.record_rate_limited(&guard.policy.scope);
        }
        return AppError::RateLimited {
            retry_after: decision.retry_after(now),
            decision,
        }
        .into_response();
    }

    let mut response = next.run(request).await;
    decision.apply_headers(response.headers_mut());
    response
}
