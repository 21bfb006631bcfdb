//! Health probe client.
//!
//! Polls `/health` the way a container orchestrator would: a failure only
//! counts once the start period has elapsed, and the probe gives up after
//! `retries` consecutive counted failures. Anything other than HTTP 200 with
//! a `"healthy"` body is a failure.

use std::time::Duration;

use reqwest::StatusCode;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::api::handlers::HEALTHY;
use crate::api::HealthResponse;
use crate::error::ProbeError;

/// Probe timing, mirroring the container `HEALTHCHECK` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Delay between attempts.
    pub interval: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Grace period during which failures are not counted.
    pub start_period: Duration,
    /// Counted failures before giving up (at least 1).
    pub retries: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
            timeout: Duration::from_secs(30),
            start_period: Duration::from_secs(10),
            retries: 3,
        }
    }
}

/// Issue a single health request.
pub async fn probe_once(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> Result<HealthResponse, ProbeError> {
    let response = client.get(url).timeout(timeout).send().await?;

    if response.status() != StatusCode::OK {
        return Err(ProbeError::UnexpectedStatus(response.status().as_u16()));
    }

    let body: HealthResponse = response.json().await?;
    if body.status != HEALTHY {
        return Err(ProbeError::NotHealthy(body.status));
    }

    Ok(body)
}

/// Poll `url` until it reports healthy or the retry budget is spent.
pub async fn wait_until_healthy(
    client: &reqwest::Client,
    url: &str,
    config: &ProbeConfig,
) -> Result<HealthResponse, ProbeError> {
    let retries = config.retries.max(1);
    let grace_ends = Instant::now() + config.start_period;
    let mut attempts = 0u32;
    let mut failures = 0u32;

    loop {
        attempts += 1;
        debug!(url, attempt = attempts, "probing health endpoint");

        match probe_once(client, url, config.timeout).await {
            Ok(body) => {
                info!(url, attempts, "service is healthy");
                return Ok(body);
            }
            Err(e) => {
                let counted = Instant::now() >= grace_ends;
                if counted {
                    failures += 1;
                }
                warn!(url, attempt = attempts, counted, error = %e, "health probe failed");

                if failures >= retries {
                    return Err(ProbeError::Unhealthy {
                        url: url.to_string(),
                        attempts,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tokio::time::sleep(config.interval).await;
    }
}
