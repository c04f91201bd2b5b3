//! # Notification Screen
//!
//! The inbox. Its view-model is usually eager, so the list is `Loading` from the start.
use crate::context::AppContext;
use crate::model::{Notification, NotificationId, NotificationUpdate};
use resource_framework::{Resource, ResourceScreen, ViewModelHandle};
use tracing::{debug, instrument};

/// Client for the notification inbox.
#[derive(Clone)]
pub struct NotificationScreen {
    inner: ViewModelHandle<Notification>,
    context: AppContext,
}

impl NotificationScreen {
    pub fn new(inner: ViewModelHandle<Notification>, context: AppContext) -> Self {
        Self { inner, context }
    }
}

impl ResourceScreen<Notification> for NotificationScreen {
    fn handle(&self) -> &ViewModelHandle<Notification> {
        &self.inner
    }
}

impl NotificationScreen {
    #[instrument(skip(self))]
    pub async fn mark_read(&self, id: NotificationId) {
        debug!("Sending request");
        self.inner.update(id, NotificationUpdate { read: true }).await;
    }

    /// Unread count for the badge; `None` while the inbox is not loaded or when the user
    /// turned notifications off.
    pub fn badge(&self) -> Option<usize> {
        if !self.context.settings().notifications_enabled {
            return None;
        }
        match self.inner.list() {
            Resource::Success(items) => Some(items.iter().filter(|n| !n.read).count()),
            _ => None,
        }
    }
}
