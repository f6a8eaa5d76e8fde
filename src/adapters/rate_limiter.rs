//! Fixed-window token bucket shared by the HTTP clients.

use std::time::{Duration, Instant};

/// Token-bucket rate limiter.
///
/// Allows up to `capacity` requests per `window`. When the bucket is
/// exhausted, [`acquire`](RateLimiter::acquire) sleeps until the window
/// resets.
#[derive(Debug)]
pub struct RateLimiter {
    /// Name of the API, for log lines.
    service: &'static str,
    capacity: u32,
    tokens: u32,
    window: Duration,
    window_start: Instant,
}

impl RateLimiter {
    /// Create a limiter allowing `capacity` requests per `window`.
    ///
    /// A zero capacity is treated as one request per window.
    pub fn new(service: &'static str, capacity: u32, window: Duration) -> Self {
        let capacity = capacity.max(1);
        Self {
            service,
            capacity,
            tokens: capacity,
            window,
            window_start: Instant::now(),
        }
    }

    /// Acquire a single token, sleeping if necessary.
    pub async fn acquire(&mut self) {
        let elapsed = self.window_start.elapsed();
        if elapsed >= self.window {
            self.tokens = self.capacity;
            self.window_start = Instant::now();
        }

        if self.tokens > 0 {
            self.tokens -= 1;
        } else {
            let remaining = self.window.saturating_sub(elapsed);
            tracing::debug!(
                service = self.service,
                sleep_ms = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX),
                "client-side rate limit reached, sleeping"
            );
            tokio::time::sleep(remaining).await;
            self.tokens = self.capacity - 1;
            self.window_start = Instant::now();
        }
    }

    #[cfg(test)]
    pub(crate) const fn available(&self) -> u32 {
        self.tokens
    }
}
