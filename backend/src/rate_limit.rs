use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Enforces a minimum interval between outbound provider requests.
///
/// Callers queue on the lock, so concurrent requests are spaced out as well.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    // None until the first request
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_request: Mutex::new(None),
        }
    }

    /// Waits until the next request may be sent and records it. Returns how
    /// long the caller had to wait.
    pub async fn acquire(&self) -> Duration {
        let mut last_request = self.last_request.lock().await;

        let wait = match *last_request {
            Some(previous) => self.interval.saturating_sub(previous.elapsed()),
            None => Duration::ZERO,
        };
        if !wait.is_zero() {
            tracing::debug!(?wait, "Rate limiting provider request");
            tokio::time::sleep(wait).await;
        }

        *last_request = Some(Instant::now());
        wait
    }
}
