//! Client error types.

/// Fallback shown to the operator when the backend gave no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Errors from backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure (connect, timeout, TLS).
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// Non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
        /// `errMessage` from the body, when it carried one.
        message: Option<String>,
    },
    /// `errCode != 0`.
    #[error("{endpoint} rejected the request (errCode {err_code}): {}", .message.as_deref().unwrap_or("no message"))]
    Backend {
        endpoint: String,
        err_code: i64,
        message: Option<String>,
    },
    /// Response body did not match the expected shape.
    #[error("failed to decode response from {endpoint}: {reason}")]
    Deserialization { endpoint: String, reason: String },
    /// A success envelope without the expected `data`.
    #[error("{endpoint} returned no data")]
    MissingData { endpoint: String },
    /// The client could not be built.
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

impl ClientError {
    /// The server's message when it sent one, else a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend {
                message: Some(m), ..
            }
            | Self::Status {
                message: Some(m), ..
            } => m.clone(),
            _ => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }

    /// HTTP status, if the backend answered with one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
