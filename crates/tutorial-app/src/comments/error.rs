//! Error types for comments.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CommentError {
    #[error("Comment text must not be empty")]
    EmptyText,

    #[error("Comment is longer than {max} characters")]
    TooLong { max: usize },
}
