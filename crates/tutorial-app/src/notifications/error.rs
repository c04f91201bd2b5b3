//! Error types for notifications.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotificationError {
    #[error("Notification message must not be empty")]
    EmptyMessage,
}
