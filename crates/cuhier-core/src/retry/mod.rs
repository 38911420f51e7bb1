//! Retry and backoff policy.
//!
//! This module encapsulates error classification (throttling, timeouts,
//! connection failures) and backoff decisions so that every API call shares
//! one policy. ClickUp answers 429 when the per-minute request budget is
//! spent; those waits are fixed rather than exponential.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, sleep_unless_aborted};
