//! Rate Limiter Module
//!
//! Per-client sliding-window request budget, shared in memory across all
//! in-flight requests like the cache store.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::AppState;
use crate::error::ApiError;

// == Rate Limiter ==
/// Sliding window of request timestamps per client key.
#[derive(Debug)]
pub struct RateLimiter {
    /// Window length
    window: Duration,
    /// Requests allowed per window
    max_requests: usize,
    /// Request timestamps per client, oldest first
    clients: HashMap<String, VecDeque<Instant>>,
}

impl RateLimiter {
    // == Constructor ==
    /// Creates a limiter allowing `max_requests` per `window_secs` seconds.
    pub fn new(window_secs: u64, max_requests: usize) -> Self {
        Self {
            window: Duration::from_secs(window_secs),
            max_requests,
            clients: HashMap::new(),
        }
    }

    // == Check ==
    /// Records a request for the client and reports whether it is within
    /// budget. Timestamps older than the window are pruned first.
    pub fn check(&mut self, client: &str) -> bool {
        let now = Instant::now();
        let window = self.window;
        let timestamps = self.clients.entry(client.to_string()).or_default();

        while timestamps
            .front()
            .is_some_and(|t| now.duration_since(*t) >= window)
        {
            timestamps.pop_front();
        }

        if timestamps.len() >= self.max_requests {
            return false;
        }
        timestamps.push_back(now);
        true
    }

    // == Prune ==
    /// Drops clients whose whole window has elapsed. Called opportunistically
    /// by the background sweep to bound memory.
    pub fn prune_idle(&mut self) -> usize {
        let now = Instant::now();
        let window = self.window;
        let before = self.clients.len();
        self.clients
            .retain(|_, timestamps| timestamps.back().is_some_and(|t| now.duration_since(*t) < window));
        before - self.clients.len()
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.clients.len()
    }
}

// == Middleware ==
/// Refuses over-budget requests with the canonical 429 envelope.
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let client = client_key(&req);
    let allowed = state.limiter.write().await.check(&client);
    if !allowed {
        return ApiError::RateLimited.into_response();
    }
    next.run(req).await
}

/// Client identity for the sliding window: forwarded-for header first,
/// then the socket peer address, else a shared local bucket.
fn client_key(req: &Request) -> String {
    if let Some(forwarded) = req
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            return first.trim().to_string();
        }
    }
    if let Some(ConnectInfo(addr)) = req
        .extensions()
        .get::<ConnectInfo<std::net::SocketAddr>>()
    {
        return addr.ip().to_string();
    }
    "local".to_string()
}
