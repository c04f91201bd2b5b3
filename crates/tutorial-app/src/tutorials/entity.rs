//! RemoteEntity trait implementation for the Tutorial domain type.
//!
//! Includes the favorite flag actions served by the document store.

use super::error::TutorialError;
use crate::model::{Tutorial, TutorialCreate, TutorialId, TutorialUpdate};
use resource_framework::RemoteEntity;

/// Custom actions for Tutorial records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TutorialAction {
    /// Reads the favorite flag without modifying it.
    IsFavorite,
    /// Sets the favorite flag.
    SetFavorite(bool),
}

impl RemoteEntity for Tutorial {
    type Id = TutorialId;
    type Create = TutorialCreate;
    type Update = TutorialUpdate;
    type Filter = ();
    type Action = TutorialAction;
    /// The favorite flag after the action.
    type ActionResult = bool;
    type Error = TutorialError;

    fn id(&self) -> &TutorialId {
        &self.id
    }

    fn from_create_params(id: TutorialId, params: TutorialCreate) -> Result<Self, Self::Error> {
        if params.title.trim().is_empty() {
            return Err(TutorialError::EmptyTitle);
        }
        Ok(Self::new(id, params.title, params.body, params.author))
    }

    /// Handles updates to the Tutorial entity.
    ///
    /// # Fields Updated
    /// - `title`: must stay non-empty
    /// - `body`: must stay non-empty
    fn on_update(&mut self, update: TutorialUpdate) -> Result<(), Self::Error> {
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(TutorialError::EmptyTitle);
        }
        if update.body.as_deref().is_some_and(|b| b.trim().is_empty()) {
            return Err(TutorialError::EmptyBody);
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(body) = update.body {
            self.body = body;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: TutorialAction) -> Result<bool, Self::Error> {
        match action {
            TutorialAction::IsFavorite => Ok(self.favorite),
            TutorialAction::SetFavorite(favorite) => {
                self.favorite = favorite;
                Ok(self.favorite)
            }
        }
    }
}
