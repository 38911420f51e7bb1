//! Retry loop: run a closure until success or policy says stop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use super::classify;
use super::policy::{ErrorKind, RetryDecision, RetryPolicy};
use crate::api::ApiError;

const ABORT_POLL: Duration = Duration::from_millis(250);

/// Runs a closure until it succeeds or the retry policy says to stop.
/// On retryable failure, sleeps for the backoff duration then tries again.
/// A set `abort` token ends the loop with [`ApiError::Aborted`].
pub fn run_with_retry<T, F>(
    policy: &RetryPolicy,
    abort: Option<&AtomicBool>,
    mut f: F,
) -> Result<T, ApiError>
where
    F: FnMut() -> Result<T, ApiError>,
{
    let mut attempt = 1u32;
    loop {
        if is_aborted(abort) {
            return Err(ApiError::Aborted);
        }
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryAfter(d) => {
                        if kind == ErrorKind::Throttled {
                            tracing::info!(
                                "rate limit reached, waiting {}s before retrying",
                                d.as_secs_f64()
                            );
                        } else {
                            tracing::warn!(attempt, "{}; retrying in {:?}", e, d);
                        }
                        if !sleep_unless_aborted(d, abort) {
                            return Err(ApiError::Aborted);
                        }
                        attempt += 1;
                    }
                }
            }
        }
    }
}

/// Sleeps for `d` in short slices. Returns false if `abort` was set meanwhile.
pub fn sleep_unless_aborted(d: Duration, abort: Option<&AtomicBool>) -> bool {
    let deadline = Instant::now() + d;
    loop {
        if is_aborted(abort) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        std::thread::sleep((deadline - now).min(ABORT_POLL));
    }
}

fn is_aborted(abort: Option<&AtomicBool>) -> bool {
    abort.is_some_and(|a| a.load(Ordering::Relaxed))
}
