use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

/// Minimum-spacing limiter for the primary translation provider.
///
/// One shared last-request watermark; callers invoked faster than the gap
/// are delayed, never rejected.
pub struct RateLimiter {
    min_gap: Duration,
    last: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(min_gap: Duration) -> Self {
        Self {
            min_gap,
            last: Mutex::new(None),
        }
    }

    /// Wait until the gap since the previous call has elapsed, then claim
    /// the watermark for this call.
    pub async fn wait(&self) {
        let mut last = self.last.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_gap {
                tokio::time::sleep(self.min_gap - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn second_call_is_delayed_by_the_gap() {
        let limiter = RateLimiter::new(Duration::from_millis(1000));

        let start = Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() < Duration::from_millis(10));

        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn spaced_calls_are_not_delayed() {
        let limiter = RateLimiter::new(Duration::from_millis(100));
        limiter.wait().await;
        tokio::time::sleep(Duration::from_millis(200)).await;

        let before = Instant::now();
        limiter.wait().await;
        assert!(before.elapsed() < Duration::from_millis(10));
    }
}
