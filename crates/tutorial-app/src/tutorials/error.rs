//! Error types for tutorials.

use thiserror::Error;

/// Errors that can occur during tutorial operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TutorialError {
    /// A tutorial needs a title.
    #[error("Tutorial title must not be empty")]
    EmptyTitle,

    /// The update would leave the tutorial without a body.
    #[error("Tutorial body must not be empty")]
    EmptyBody,
}
