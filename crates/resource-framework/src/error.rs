//! # Framework Errors
//!
//! Two error families live here.
//!
//! - [`RemoteError`] is what a backend call can fail with. It never escapes a
//!   repository: its `Display` text becomes the message of a `Resource::Failure`.
//! - [`StoreError`] is what the in-process [`DocumentStore`](crate::store::DocumentStore)
//!   answers with. It converts into a `RemoteError` at the source boundary.

/// A failed remote call, already reduced to something a screen can display.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    /// The backend answered with a non-success status.
    #[error("Error {code}: {message}")]
    Status { code: u16, message: String },
    /// Transport failure, decoding failure, or any other raised error.
    #[error("Exception: {0}")]
    Exception(String),
    /// The backend answered successfully but without the body the call requires.
    #[error("Error: empty response body")]
    EmptyBody,
}

impl RemoteError {
    pub fn status(code: u16, message: impl Into<String>) -> Self {
        RemoteError::Status {
            code,
            message: message.into(),
        }
    }

    pub fn exception(cause: impl std::fmt::Display) -> Self {
        RemoteError::Exception(cause.to_string())
    }

    pub fn not_found() -> Self {
        RemoteError::status(404, "Not Found")
    }
}

/// Errors produced by the in-process document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Document store closed")]
    StoreClosed,
    #[error("Document store dropped response channel")]
    StoreDropped,
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
}

impl From<StoreError> for RemoteError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => RemoteError::not_found(),
            other => RemoteError::exception(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_format() {
        assert_eq!(
            RemoteError::status(404, "Not Found").to_string(),
            "Error 404: Not Found"
        );
    }

    #[test]
    fn test_exception_message_format() {
        let io = std::io::Error::other("connection refused");
        assert_eq!(
            RemoteError::exception(io).to_string(),
            "Exception: connection refused"
        );
    }

    #[test]
    fn test_store_errors_map_to_remote_errors() {
        let missing: RemoteError = StoreError::NotFound("tutorial_9".into()).into();
        assert_eq!(missing, RemoteError::not_found());

        let closed: RemoteError = StoreError::StoreClosed.into();
        assert_eq!(closed.to_string(), "Exception: Document store closed");
    }
}
