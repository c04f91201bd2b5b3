//! # Remote Sources
//!
//! The boundary to the backend. A source performs one call per method and reports the
//! outcome as a plain `Result`; turning that into `Resource` values is the repository's
//! job. Implementations in this workspace:
//!
//! - [`StoreClient`](crate::store::StoreClient), the in-process document store;
//! - [`MockSource`](crate::mock::MockSource), scripted answers for tests;
//! - the REST source of the application crate.

use crate::entity::RemoteEntity;
use crate::error::RemoteError;
use async_trait::async_trait;

/// Request/response access to one collection of records.
#[async_trait]
pub trait RemoteSource<T: RemoteEntity>: Send + Sync {
    /// Fetch every record matching `filter`.
    async fn list(&self, filter: &T::Filter) -> Result<Vec<T>, RemoteError>;

    /// Fetch one record. `Ok(None)` means the backend answered without a body.
    async fn get(&self, id: &T::Id) -> Result<Option<T>, RemoteError>;

    /// Create a record and return it as stored.
    async fn create(&self, params: T::Create) -> Result<T, RemoteError>;

    /// Update a record and return it as stored.
    async fn update(&self, id: &T::Id, update: T::Update) -> Result<T, RemoteError>;

    async fn delete(&self, id: &T::Id) -> Result<(), RemoteError>;
}

/// The "favorite" flag of a record, read and written one id at a time.
#[async_trait]
pub trait FavoriteSource<T: RemoteEntity>: Send + Sync {
    async fn is_favorite(&self, id: &T::Id) -> Result<bool, RemoteError>;

    async fn add_favorite(&self, id: &T::Id) -> Result<(), RemoteError>;

    async fn remove_favorite(&self, id: &T::Id) -> Result<(), RemoteError>;
}
