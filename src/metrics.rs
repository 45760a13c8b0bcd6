//! Prometheus metrics: HTTP request middleware and auth business counters.
//!
//! Everything is a no-op until [`init_metrics`] has run with metrics enabled
//! (`METRICS_ENABLED`, read into [`MetricsConfig`]). Tests never install a
//! recorder, so they record nothing.

use std::sync::OnceLock;
use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use quill_config::MetricsConfig;

/// Path label for requests that matched no route.
pub const UNMATCHED_PATH: &str = "unmatched";

static METRICS_ENABLED: OnceLock<bool> = OnceLock::new();

pub fn is_metrics_enabled() -> bool {
    METRICS_ENABLED.get().copied().unwrap_or(false)
}

/// Installs the Prometheus recorder and spawns its upkeep task.
///
/// Returns `Ok(None)` when metrics are disabled.
pub fn init_metrics(config: &MetricsConfig) -> Result<Option<PrometheusHandle>, BuildError> {
    if !config.enabled {
        METRICS_ENABLED.get_or_init(|| false);
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ],
        )?
        .install_recorder()?;
    METRICS_ENABLED.get_or_init(|| true);

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// The route template for `req`, never the raw URI.
fn path_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_PATH.to_owned())
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_metrics_enabled() {
        return next.run(req).await;
    }

    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = path_label(&req);

    gauge!("http_requests_active").increment(1.0);

    let response = next.run(req).await;

    let latency = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(latency);

    gauge!("http_requests_active").decrement(1.0);

    response
}

pub fn track_registration() {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_registrations_total").increment(1);
}

/// `status` is `success` or `failure`.
pub fn track_login(status: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_logins_total", "status" => status).increment(1);
}

/// `status` is `valid`, `invalid` or `user_not_found`.
pub fn track_token_verification(status: &'static str) {
    if !is_metrics_enabled() {
        return;
    }
    counter!("auth_token_verifications_total", "status" => status).increment(1);
}
