//! # Profile Screen
//!
//! One user's profile: shown from the detail slot, edited through the update slot.
use crate::model::{User, UserId, UserUpdate};
use resource_framework::{Query, Resource, ResourceScreen, SlotKey, ViewModelHandle, Watcher};
use tracing::{debug, instrument};

/// Client for the profile of one user.
#[derive(Clone)]
pub struct ProfileScreen {
    inner: ViewModelHandle<User>,
    user_id: UserId,
}

impl ProfileScreen {
    pub fn new(inner: ViewModelHandle<User>, user_id: UserId) -> Self {
        Self { inner, user_id }
    }
}

impl ResourceScreen<User> for ProfileScreen {
    fn handle(&self) -> &ViewModelHandle<User> {
        &self.inner
    }
}

impl ProfileScreen {
    /// Load the profile.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn open(&self) {
        debug!("Sending request");
        self.inner.select(self.user_id.clone()).await;
    }

    pub async fn reload(&self) {
        self.inner.retry(Query::Detail).await;
    }

    /// Save profile edits. On success the saved profile is in the update slot and the
    /// profile itself reloads.
    #[instrument(skip(self), fields(user_id = %self.user_id))]
    pub async fn save(&self, update: UserUpdate) {
        debug!("Sending request");
        self.inner.update(self.user_id.clone(), update).await;
    }

    /// Clear the "saved" / error banner.
    pub async fn dismiss_save_result(&self) {
        self.inner.reset(SlotKey::Updated).await;
    }

    pub fn profile(&self) -> Resource<User> {
        self.inner.detail()
    }

    pub fn watch_profile(&self) -> Watcher<Resource<User>> {
        self.inner.watch_detail()
    }

    pub fn save_result(&self) -> Resource<User> {
        self.inner.updated()
    }

    pub fn watch_save_result(&self) -> Watcher<Resource<User>> {
        self.inner.watch_updated()
    }
}
