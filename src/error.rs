use reqwest::StatusCode;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Errors surfaced by the API client and the services built on top of it.
///
/// The client performs exactly one local recovery: a 401 on a non-refresh
/// request triggers one refresh-and-replay cycle. Every other failure is
/// propagated untouched.
#[derive(Debug)]
pub enum ApiError {
    /// DNS/connection/timeout failure. Never retried.
    Transport(reqwest::Error),
    /// A 2xx response whose body could not be deserialized.
    Json(serde_json::Error),
    /// Any non-2xx status propagated verbatim, body included.
    Status { status: StatusCode, body: String },
    /// The refresh call itself failed; wraps the refresh failure. The login
    /// redirect hook has already fired by the time callers see this.
    SessionInvalid(Box<ApiError>),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Transport(e) => write!(f, "network error: {e}"),
            ApiError::Json(e) => write!(f, "json error: {e}"),
            ApiError::Status { status, body } => {
                write!(f, "unexpected http status: {status}: {body}")
            }
            ApiError::SessionInvalid(e) => write!(f, "session invalid: {e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Transport(e) => Some(e),
            ApiError::Json(e) => Some(e),
            ApiError::Status { .. } => None,
            ApiError::SessionInvalid(e) => Some(e.as_ref()),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Transport(e)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Json(e)
    }
}

impl ApiError {
    /// Status code of the failing response, if this error carries one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::SessionInvalid(inner) => inner.status(),
            _ => None,
        }
    }

    pub fn is_session_invalid(&self) -> bool {
        matches!(self, ApiError::SessionInvalid(_))
    }
}
