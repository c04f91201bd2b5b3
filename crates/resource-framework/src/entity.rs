//! # RemoteEntity Trait
//!
//! The `RemoteEntity` trait is the contract every record type (Tutorial, Comment, User,
//! …) implements so the generic repository, view-model and document store can handle it.
//! It names the identifier, the DTOs for creation and updates, the list filter, and the
//! custom actions the document store can run against one record.
//!
//! # Architecture Note
//! The core never looks inside an entity. Everything it needs (the id, how to build one
//! from a create DTO, how to apply an update) goes through this trait, so one repository
//! and one view-model serve every screen.
//!
//! We use associated types to keep the pairs straight: a `Tutorial` is created from a
//! `TutorialCreate`, and the compiler rejects a `CommentCreate` sent to the tutorial
//! screen.

use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any record type must implement to be served by the framework.
pub trait RemoteEntity: Clone + Debug + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for id generation in the document store.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32> + 'static;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug + 'static;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug + 'static;

    /// Narrows a list request (e.g. comments of one tutorial). Use `()` for "everything".
    type Filter: Clone + Default + Send + Sync + Debug + 'static;

    /// Record-specific operations run by the document store (e.g. flagging a favorite).
    type Action: Send + Sync + Debug + 'static;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug + 'static;

    /// The error type for validation and action failures.
    type Error: std::error::Error + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// Construct the full entity from the assigned id and the create DTO.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Apply an update DTO in place.
    fn on_update(&mut self, update: Self::Update) -> Result<(), Self::Error>;

    /// Whether this entity belongs in a list requested with `filter`.
    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }

    /// Handle a custom record-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Extract just the type name (e.g., "Tutorial" instead of "tutorial_app::model::tutorial::Tutorial")
pub fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}
