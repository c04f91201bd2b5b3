//! # Users
//!
//! The user resource behind the profile screen: read one profile, edit it.
//!
//! ## Key Features
//!
//! - **No list filter**: `Filter = ()`
//! - **Validation**: names must be non-empty, emails must look like addresses

pub mod entity;
pub mod error;

pub use error::*;

use crate::model::User;
use resource_framework::{DocumentStore, ResourceRepository};
use std::sync::Arc;

/// Creates a new user store and a repository over it.
pub fn new(buffer: usize) -> (DocumentStore<User>, ResourceRepository<User>) {
    let (store, client) = DocumentStore::new(buffer);
    (store, ResourceRepository::new(Arc::new(client)))
}
