//! # Comment Screen
//!
//! The comments under one tutorial.
use crate::model::{Comment, CommentCreate, CommentId, TutorialId, UserId};
use resource_framework::{Resource, ResourceScreen, ViewModelHandle, Watcher};
use tracing::{debug, instrument};

/// Client for the comments of one tutorial.
#[derive(Clone)]
pub struct CommentScreen {
    inner: ViewModelHandle<Comment>,
    tutorial_id: TutorialId,
}

impl CommentScreen {
    /// `inner` must be a view-model whose list filter is `Some(tutorial_id)`.
    pub fn new(inner: ViewModelHandle<Comment>, tutorial_id: TutorialId) -> Self {
        Self { inner, tutorial_id }
    }

    pub fn tutorial_id(&self) -> &TutorialId {
        &self.tutorial_id
    }
}

impl ResourceScreen<Comment> for CommentScreen {
    fn handle(&self) -> &ViewModelHandle<Comment> {
        &self.inner
    }
}

impl CommentScreen {
    #[instrument(skip(self, text), fields(tutorial_id = %self.tutorial_id))]
    pub async fn post_comment(&self, author: UserId, text: impl Into<String> + Send) {
        debug!("Sending request");
        let params = CommentCreate {
            tutorial_id: self.tutorial_id.clone(),
            author,
            text: text.into(),
        };
        self.inner.create(params).await;
    }

    #[instrument(skip(self), fields(tutorial_id = %self.tutorial_id))]
    pub async fn delete_comment(&self, id: CommentId) {
        debug!("Sending request");
        self.inner.delete(id).await;
    }

    pub fn watch_posted(&self) -> Watcher<Resource<Comment>> {
        self.inner.watch_created()
    }

    pub fn watch_deleted(&self) -> Watcher<Resource<()>> {
        self.inner.watch_deleted()
    }
}
