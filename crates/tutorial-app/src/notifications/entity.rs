//! RemoteEntity trait implementation for the Notification domain type.

use super::error::NotificationError;
use crate::model::{Notification, NotificationCreate, NotificationId, NotificationUpdate, UserId};
use resource_framework::RemoteEntity;

impl RemoteEntity for Notification {
    type Id = NotificationId;
    type Create = NotificationCreate;
    type Update = NotificationUpdate;
    /// The recipient whose inbox is listed; `None` lists every notification.
    type Filter = Option<UserId>;
    type Action = ();
    type ActionResult = ();
    type Error = NotificationError;

    fn id(&self) -> &NotificationId {
        &self.id
    }

    fn from_create_params(
        id: NotificationId,
        params: NotificationCreate,
    ) -> Result<Self, Self::Error> {
        if params.message.trim().is_empty() {
            return Err(NotificationError::EmptyMessage);
        }
        Ok(Self {
            id,
            recipient: params.recipient,
            message: params.message,
            read: false,
        })
    }

    fn on_update(&mut self, update: NotificationUpdate) -> Result<(), Self::Error> {
        self.read = update.read;
        Ok(())
    }

    fn matches(&self, filter: &Option<UserId>) -> bool {
        filter
            .as_ref()
            .map_or(true, |recipient| &self.recipient == recipient)
    }

    fn handle_action(&mut self, _: ()) -> Result<(), Self::Error> {
        Ok(())
    }
}
