//! # Tutorials
//!
//! The tutorial resource: list, detail, full CRUD and the per-user favorite flag.
//!
//! ## Structure
//!
//! - [`entity`] - [`RemoteEntity`](resource_framework::RemoteEntity) implementation for
//!   [`Tutorial`] and the [`TutorialAction`] favorite actions
//! - [`error`] - [`TutorialError`] validation errors
//! - [`TutorialFavorites`] - the favorite flag served by the document store
//! - [`new()`] - Factory function that creates the store and a repository over it
//!
//! ## Usage
//!
//! ```rust
//! use resource_framework::repository::settle;
//! use tutorial_app::model::TutorialCreate;
//! use tutorial_app::tutorials;
//!
//! #[tokio::main]
//! async fn main() {
//!     let (store, repository) = tutorials::new(32);
//!     tokio::spawn(store.run());
//!
//!     let params = TutorialCreate {
//!         title: "Pattern matching".into(),
//!         body: "match all the things".into(),
//!         author: "user_1".into(),
//!     };
//!     let created = settle(repository.create(params)).await;
//!     assert!(created.is_success());
//! }
//! ```

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

use crate::model::{Tutorial, TutorialId};
use async_trait::async_trait;
use resource_framework::{
    DocumentStore, FavoriteSource, RemoteError, ResourceRepository, StoreClient,
};
use std::sync::Arc;

/// Favorite flags kept on the tutorial records of the document store.
#[derive(Clone)]
pub struct TutorialFavorites {
    store: StoreClient<Tutorial>,
}

impl TutorialFavorites {
    pub fn new(store: StoreClient<Tutorial>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl FavoriteSource<Tutorial> for TutorialFavorites {
    async fn is_favorite(&self, id: &TutorialId) -> Result<bool, RemoteError> {
        Ok(self
            .store
            .perform_action(id.clone(), TutorialAction::IsFavorite)
            .await?)
    }

    async fn add_favorite(&self, id: &TutorialId) -> Result<(), RemoteError> {
        self.store
            .perform_action(id.clone(), TutorialAction::SetFavorite(true))
            .await?;
        Ok(())
    }

    async fn remove_favorite(&self, id: &TutorialId) -> Result<(), RemoteError> {
        self.store
            .perform_action(id.clone(), TutorialAction::SetFavorite(false))
            .await?;
        Ok(())
    }
}

/// Creates a new tutorial store and a repository (with favorites) over it.
pub fn new(buffer: usize) -> (DocumentStore<Tutorial>, ResourceRepository<Tutorial>) {
    let (store, client) = DocumentStore::new(buffer);
    let repository = ResourceRepository::new(Arc::new(client.clone()))
        .with_favorites(Arc::new(TutorialFavorites::new(client)));
    (store, repository)
}
