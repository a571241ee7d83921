//! Error types for the API client.
//!
//! # Design
//! `Http` carries only the status code; the body of a failed response is
//! never read by the client. Transport failures are flattened to a message
//! so any `Transport` implementation can produce them.

/// Errors returned by `ApiClient` requests.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    /// The server answered with a status outside 200..=299.
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    /// The request never completed: connection, DNS, or body read failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A JSON response body (or a typed conversion of it) failed to decode.
    #[error("decode failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Status code for `Http` errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        ApiError::Network(error.to_string())
    }
}
