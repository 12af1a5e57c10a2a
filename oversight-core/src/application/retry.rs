// oversight-core/src/application/retry.rs

use std::future::Future;
use std::time::Duration;
use tracing::warn;

use crate::domain::configuration::RetryPolicy;
use crate::error::OversightError;

/// Runs `op` until it succeeds, fails with a non-transient error, or the
/// policy's attempts are spent. Only use for idempotent operations.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut op: F,
) -> Result<T, OversightError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, OversightError>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() && attempt + 1 < attempts => {
                let delay = policy.delay_for(attempt);
                warn!(
                    operation = label,
                    attempt = attempt + 1,
                    max_attempts = attempts,
                    delay_ms = millis(delay),
                    error = %e,
                    "Transient failure, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

fn millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}
