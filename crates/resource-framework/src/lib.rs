//! # Resource Framework
//!
//! This crate provides the building blocks for screens that display and edit records held
//! by a remote backend. Its centre is an **asynchronous resource state machine**: every
//! remote operation is observed as a [`Resource<T>`] that moves from `Idle` to `Loading`
//! and ends in `Success(data)` or `Failure(message)`.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into four layers, leaf first:
//!
//! 1. **Result Layer** ([`Resource`]) - the closed four-variant lifecycle value
//! 2. **Repository Layer** ([`ResourceRepository`]) - one remote call per invocation,
//!    exposed as a finite stream `[Loading, terminal]`
//! 3. **Coordinator Layer** ([`ResourceViewModel`]) - one task per screen owning named
//!    slots, triggering calls and applying their outcomes serially
//! 4. **Interface Layer** ([`ViewModelHandle`], [`ResourceScreen`]) - fire-and-forget
//!    triggers plus synchronous reads and subscriptions
//!
//! The backend itself is a trait object ([`RemoteSource`], [`FavoriteSource`]). This crate
//! ships two: the in-process [`DocumentStore`] actor and the scripted
//! [`MockSource`](mock::MockSource) for tests.
//!
//! ## Core Abstractions
//!
//! ### [`RemoteEntity`] - The Record Contract
//!
//! ```rust
//! use resource_framework::store::DocumentStore;
//! use resource_framework::{RemoteEntity, Resource, ResourceRepository, ResourceViewModel};
//! use std::sync::Arc;
//!
//! // 1. Define the Entity
//! #[derive(Clone, Debug)]
//! struct Material {
//!     id: u32,
//!     title: String,
//! }
//!
//! #[derive(Debug)] struct MaterialCreate { title: String }
//! #[derive(Debug)] struct MaterialUpdate { title: Option<String> }
//! #[derive(Debug, thiserror::Error)] #[error("material error")] struct MaterialError;
//!
//! impl RemoteEntity for Material {
//!     type Id = u32;
//!     type Create = MaterialCreate;
//!     type Update = MaterialUpdate;
//!     type Filter = ();
//!     type Action = ();
//!     type ActionResult = ();
//!     type Error = MaterialError;
//!
//!     fn id(&self) -> &u32 { &self.id }
//!
//!     fn from_create_params(id: u32, params: MaterialCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, title: params.title })
//!     }
//!
//!     fn on_update(&mut self, update: MaterialUpdate) -> Result<(), Self::Error> {
//!         if let Some(title) = update.title { self.title = title; }
//!         Ok(())
//!     }
//!
//!     fn handle_action(&mut self, _: ()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! // 2. Wire a screen
//! #[tokio::main]
//! async fn main() {
//!     let (store, client) = DocumentStore::<Material>::new(10);
//!     tokio::spawn(store.run());
//!
//!     let repository = ResourceRepository::new(Arc::new(client));
//!     let screen = ResourceViewModel::spawn(repository, (), Default::default());
//!     assert!(screen.list().is_idle());
//!
//!     let mut created = screen.watch_created();
//!     screen.create(MaterialCreate { title: "Ownership".into() }).await;
//!     created.wait_for(Resource::is_terminal).await.unwrap();
//!
//!     // A successful create reloads the list.
//!     let mut list = screen.watch_list();
//!     let loaded = list.wait_for(|r| r.data().is_some_and(|items| items.len() == 1)).await;
//!     assert!(loaded.is_ok());
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each view-model and each document store runs in its own Tokio task
//! - A view-model's slots are written by that task only; calls run beside it in a
//!   `JoinSet` and their outcomes are applied one at a time
//! - Overlapping calls on one slot follow the configured [`RacePolicy`]
//! - Dropping every handle stops the view-model and abandons its in-flight calls
//!
//! ## Error Model
//!
//! Backends fail with a [`RemoteError`]; the repository turns it into
//! `Resource::Failure(message)` and nothing else ever leaves the repository as an error.
//!
//! ## Testing
//!
//! The [`mock`] module provides `MockSource`, a scripted backend with FIFO expectations,
//! error injection and deferred replies for exercising races deterministically.

pub mod entity;
pub mod error;
pub mod handle;
pub mod message;
pub mod mock;
pub mod observable;
pub mod render;
pub mod repository;
pub mod resource;
pub mod screen;
pub mod slot;
pub mod source;
pub mod store;
pub mod view_model;

// Re-export core types for convenience
pub use entity::RemoteEntity;
pub use error::{RemoteError, StoreError};
pub use handle::{ViewModelHandle, WeakViewModelHandle};
pub use message::{Query, SlotKey};
pub use observable::{Observable, Watcher};
pub use render::Presentation;
pub use repository::{ResourceRepository, ResourceStream};
pub use resource::Resource;
pub use screen::ResourceScreen;
pub use slot::RacePolicy;
pub use source::{FavoriteSource, RemoteSource};
pub use store::{DocumentStore, StoreClient};
pub use view_model::{ResourceViewModel, ViewModelOptions};
