//! # Tutorial Screen
//!
//! The tutorial list, the detail pane and the favorite star.
use crate::model::{Tutorial, TutorialCreate, TutorialId, TutorialUpdate};
use resource_framework::{
    Query, Resource, ResourceScreen, SlotKey, ViewModelHandle, Watcher,
};
use tracing::{debug, instrument};

/// Client for the tutorial screen.
#[derive(Clone)]
pub struct TutorialScreen {
    inner: ViewModelHandle<Tutorial>,
}

impl TutorialScreen {
    pub fn new(inner: ViewModelHandle<Tutorial>) -> Self {
        Self { inner }
    }
}

impl ResourceScreen<Tutorial> for TutorialScreen {
    fn handle(&self) -> &ViewModelHandle<Tutorial> {
        &self.inner
    }
}

impl TutorialScreen {
    /// Show one tutorial in the detail pane.
    #[instrument(skip(self))]
    pub async fn open_tutorial(&self, id: TutorialId) {
        debug!("Sending request");
        self.inner.select(id).await;
    }

    /// Retry the detail pane after a failure.
    pub async fn reload_tutorial(&self) {
        self.inner.retry(Query::Detail).await;
    }

    #[instrument(skip(self))]
    pub async fn publish(&self, params: TutorialCreate) {
        debug!("Sending request");
        self.inner.create(params).await;
    }

    #[instrument(skip(self))]
    pub async fn edit(&self, id: TutorialId, update: TutorialUpdate) {
        debug!("Sending request");
        self.inner.update(id, update).await;
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: TutorialId) {
        debug!("Sending request");
        self.inner.delete(id).await;
    }

    /// Load the favorite star of one tutorial.
    pub async fn check_favorite(&self, id: TutorialId) {
        self.inner.check_favorite(id).await;
    }

    /// Flip the favorite star. The star is updated without reloading the list.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(&self, id: TutorialId) {
        debug!("Sending request");
        self.inner.toggle_favorite(id).await;
    }

    pub async fn watch_favorite(&self, id: TutorialId) -> Option<Watcher<Resource<bool>>> {
        self.inner.watch_favorite(id).await
    }

    /// Dismiss the "published" banner.
    pub async fn dismiss_published(&self) {
        self.inner.reset(SlotKey::Created).await;
    }

    pub fn tutorial(&self) -> Resource<Tutorial> {
        self.inner.detail()
    }

    pub fn watch_tutorial(&self) -> Watcher<Resource<Tutorial>> {
        self.inner.watch_detail()
    }

    pub fn published(&self) -> Resource<Tutorial> {
        self.inner.created()
    }

    pub fn watch_published(&self) -> Watcher<Resource<Tutorial>> {
        self.inner.watch_created()
    }

    pub fn watch_edited(&self) -> Watcher<Resource<Tutorial>> {
        self.inner.watch_updated()
    }

    pub fn watch_removed(&self) -> Watcher<Resource<()>> {
        self.inner.watch_deleted()
    }

    pub fn watch_favorite_toggle(&self) -> Watcher<Resource<()>> {
        self.inner.watch_favorite_toggle()
    }
}
