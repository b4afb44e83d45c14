use thiserror::Error;

/// Failure taxonomy for every backend interaction.
///
/// `Invalid` is raised before any request leaves the client; `Server`
/// carries the backend's own `error` string (or a caller-supplied
/// fallback when the body had none); `Network` covers transport failures
/// where no response was received. No variant is retried anywhere, and
/// every one of them degrades to a visible message rather than a crash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Server(String),

    #[error("Network error. Please try again.")]
    Network,
}

impl ApiError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}
