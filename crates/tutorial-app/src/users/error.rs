//! Error types for users.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User name must not be empty")]
    EmptyName,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}
