//! Bounded retry with exponential backoff for the generation call.
//!
//! The generation call is the one network-dependent, rate-limited dependency
//! in the request flow, so it alone gets retries. Retrieval stays
//! single-attempt: the similarity computation is deterministic and retrying
//! it would not change the outcome.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::warn;

use crate::error_handler::{LlmError, Result, env_opt_u32, env_opt_u64};

/// Bounded exponential backoff with jitter.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one.
    max_attempts: u32,
    base_delay_ms: u64,
    max_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 500,
            max_delay_ms: 8_000,
        }
    }
}

impl RetryPolicy {
    /// Reads retry knobs from environment variables, falling back to the
    /// defaults (3 attempts, 500ms base, 8s cap).
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            max_attempts: env_opt_u32("LLM_RETRY_ATTEMPTS")?.unwrap_or(defaults.max_attempts),
            base_delay_ms: env_opt_u64("LLM_RETRY_BASE_DELAY_MS")?
                .unwrap_or(defaults.base_delay_ms),
            max_delay_ms: env_opt_u64("LLM_RETRY_MAX_DELAY_MS")?.unwrap_or(defaults.max_delay_ms),
        })
    }

    /// Runs `op`, retrying transient failures (per [`LlmError::is_retryable`])
    /// up to the attempt budget. Non-retryable errors return immediately.
    pub async fn run<F, Fut, T>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0u32;

        loop {
            match op().await {
                Ok(v) => return Ok(v),
                Err(e) => {
                    attempt += 1;
                    if attempt >= self.max_attempts.max(1) || !e.is_retryable() {
                        return Err(e);
                    }

                    let delay = self.delay_for(attempt);
                    warn!(
                        target: "llm_service::retry",
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "generation failed, retrying"
                    );
                    sleep(delay).await;
                }
            }
        }
    }

    /// Binary exponential backoff capped at `max_delay_ms`, with ±25% jitter.
    fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self
            .base_delay_ms
            .saturating_mul(2u64.saturating_pow(attempt.saturating_sub(1)))
            .min(self.max_delay_ms);

        let jitter = (exp / 4) as i64;
        let offset = ((rand::random::<f64>() * 2.0 - 1.0) * jitter as f64) as i64;

        Duration::from_millis(((exp as i64) + offset).max(0) as u64)
    }
}
