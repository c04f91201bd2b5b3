//! # Notifications
//!
//! The notification inbox. Its screen is the one eagerly loaded view-model in the app:
//! the list starts at `Loading` instead of `Idle`.

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::Notification;
use resource_framework::{DocumentStore, ResourceRepository};
use std::sync::Arc;

/// Creates a new notification store and a repository over it.
pub fn new(buffer: usize) -> (DocumentStore<Notification>, ResourceRepository<Notification>) {
    let (store, client) = DocumentStore::new(buffer);
    (store, ResourceRepository::new(Arc::new(client)))
}
