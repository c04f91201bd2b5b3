//! # Comments
//!
//! Comments are listed per tutorial, posted and deleted. There is no favorite flag.

pub mod entity;
pub mod error;

pub use entity::*;
pub use error::*;

use crate::model::Comment;
use resource_framework::{DocumentStore, ResourceRepository};
use std::sync::Arc;

/// Creates a new comment store and a repository over it.
pub fn new(buffer: usize) -> (DocumentStore<Comment>, ResourceRepository<Comment>) {
    let (store, client) = DocumentStore::new(buffer);
    (store, ResourceRepository::new(Arc::new(client)))
}
