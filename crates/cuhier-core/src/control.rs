//! Sweep cancellation: a shared abort token checked between lists and during waits.
//!
//! The CLI sets the token on Ctrl-C; the sweep stops at the next list boundary
//! and pending rate-limit waits end early.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::api::ApiError;

/// Error returned when a sweep is stopped by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("sweep aborted by user")]
pub struct SweepAborted;

#[derive(Debug, Clone, Default)]
pub struct AbortToken(Arc<AtomicBool>);

impl AbortToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    pub fn check(&self) -> Result<(), SweepAborted> {
        if self.is_aborted() {
            Err(SweepAborted)
        } else {
            Ok(())
        }
    }

    pub fn flag(&self) -> &AtomicBool {
        &self.0
    }
}

/// Treats a failed read as "nothing there": logs it and yields the default,
/// except for an abort, which is passed up.
pub(crate) fn or_skip<T: Default>(
    result: Result<T, ApiError>,
    what: impl FnOnce() -> String,
) -> Result<T, SweepAborted> {
    match result {
        Ok(v) => Ok(v),
        Err(ApiError::Aborted) => Err(SweepAborted),
        Err(e) if e.is_server_error() => {
            tracing::info!("internal server error when requesting {}; skipping", what());
            Ok(T::default())
        }
        Err(e) => {
            tracing::warn!("error while fetching {}: {}", what(), e);
            Ok(T::default())
        }
    }
}

/// Converts a fatal API error, keeping aborts recognizable as [`SweepAborted`].
pub(crate) fn escalate(e: ApiError) -> anyhow::Error {
    match e {
        ApiError::Aborted => SweepAborted.into(),
        e => e.into(),
    }
}
