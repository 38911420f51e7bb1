//! Classify HTTP status and curl errors into retry policy error kinds.

use crate::api::ApiError;
use crate::retry::policy::ErrorKind;

/// Classify an HTTP status code for retry decisions.
///
/// A plain 500 is not retried: ClickUp returns it for requests that will keep
/// failing, and callers skip that item instead.
pub fn classify_http_status(code: u32) -> ErrorKind {
    match code {
        429 | 503 => ErrorKind::Throttled,
        502 | 504 => ErrorKind::Http5xx(code as u16),
        _ => ErrorKind::Other,
    }
}

/// Classify a curl error for retry decisions.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    if e.is_operation_timedout() {
        return ErrorKind::Timeout;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return ErrorKind::Connection;
    }
    ErrorKind::Other
}

pub fn classify(e: &ApiError) -> ErrorKind {
    match e {
        ApiError::Transport(ce) => classify_curl_error(ce),
        ApiError::Status { code, .. } => classify_http_status(*code),
        ApiError::Decode { .. } | ApiError::InvalidUrl { .. } | ApiError::Aborted => {
            ErrorKind::Other
        }
    }
}
