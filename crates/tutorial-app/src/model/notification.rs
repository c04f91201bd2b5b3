use super::{entity_id, UserId};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Notifications.
    NotificationId,
    "notification"
);

/// A notification in a user's inbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub recipient: UserId,
    pub message: String,
    #[serde(default)]
    pub read: bool,
}

/// Payload for sending a notification.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationCreate {
    pub recipient: UserId,
    pub message: String,
}

/// Payload for marking a notification.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationUpdate {
    pub read: bool,
}
