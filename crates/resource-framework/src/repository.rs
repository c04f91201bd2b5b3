//! # Resource Repository
//!
//! The [`ResourceRepository<T>`] turns each backend call into a short stream of
//! [`Resource`] values:
//!
//! 1. `Loading`, emitted as soon as the stream is polled;
//! 2. the call itself, performed exactly once;
//! 3. `Success(payload)` or `Failure(message)`, after which the stream ends.
//!
//! Every method returns a fresh stream. Nothing is cached or shared between calls, and
//! nothing is retried here: retrying is the caller's decision.
//!
//! ```rust
//! use futures::StreamExt;
//! use resource_framework::{repository::resource_stream, RemoteError, Resource};
//!
//! #[tokio::main]
//! async fn main() {
//!     let stream = resource_stream::<u32, _>("count", async { Err(RemoteError::status(404, "Not Found")) });
//!     let seen: Vec<Resource<u32>> = stream.collect().await;
//!     assert_eq!(seen, vec![Resource::Loading, Resource::failure("Error 404: Not Found")]);
//! }
//! ```

use crate::entity::{entity_type, RemoteEntity};
use crate::error::RemoteError;
use crate::resource::Resource;
use crate::source::{FavoriteSource, RemoteSource};
use async_stream::stream;
use futures::stream::BoxStream;
use futures::StreamExt;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// A finite sequence of `Resource` values for one invocation.
pub type ResourceStream<U> = BoxStream<'static, Resource<U>>;

/// Wraps one remote call in the `Loading` → terminal shape.
///
/// The call is not started until the stream is polled past `Loading`.
pub fn resource_stream<U, F>(operation: &'static str, call: F) -> ResourceStream<U>
where
    U: Send + 'static,
    F: Future<Output = Result<U, RemoteError>> + Send + 'static,
{
    Box::pin(stream! {
        yield Resource::Loading;
        match call.await {
            Ok(data) => {
                debug!(operation, "Call succeeded");
                yield Resource::Success(data);
            }
            Err(e) => {
                warn!(operation, error = %e, "Call failed");
                yield Resource::Failure(e.to_string());
            }
        }
    })
}

/// Drives a stream to its end and returns the last value it emitted.
pub async fn settle<U>(mut stream: ResourceStream<U>) -> Resource<U> {
    let mut last = Resource::Idle;
    while let Some(value) = stream.next().await {
        last = value;
    }
    last
}

/// The generic repository: one remote operation per method, one stream per call.
pub struct ResourceRepository<T: RemoteEntity> {
    source: Arc<dyn RemoteSource<T>>,
    favorites: Option<Arc<dyn FavoriteSource<T>>>,
}

impl<T: RemoteEntity> Clone for ResourceRepository<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            favorites: self.favorites.clone(),
        }
    }
}

impl<T: RemoteEntity> ResourceRepository<T> {
    pub fn new(source: Arc<dyn RemoteSource<T>>) -> Self {
        Self {
            source,
            favorites: None,
        }
    }

    /// Adds the favorite flag operations.
    pub fn with_favorites(mut self, favorites: Arc<dyn FavoriteSource<T>>) -> Self {
        self.favorites = Some(favorites);
        self
    }

    pub fn supports_favorites(&self) -> bool {
        self.favorites.is_some()
    }

    pub fn fetch_list(&self, filter: T::Filter) -> ResourceStream<Vec<T>> {
        debug!(entity_type = entity_type::<T>(), ?filter, "fetch_list");
        let source = Arc::clone(&self.source);
        resource_stream("fetch_list", async move { source.list(&filter).await })
    }

    /// Fetches one record. A success without a body is reported as a failure.
    pub fn fetch(&self, id: T::Id) -> ResourceStream<T> {
        debug!(entity_type = entity_type::<T>(), %id, "fetch");
        let source = Arc::clone(&self.source);
        resource_stream("fetch", async move {
            source.get(&id).await?.ok_or(RemoteError::EmptyBody)
        })
    }

    pub fn create(&self, params: T::Create) -> ResourceStream<T> {
        debug!(entity_type = entity_type::<T>(), ?params, "create");
        let source = Arc::clone(&self.source);
        resource_stream("create", async move { source.create(params).await })
    }

    pub fn update(&self, id: T::Id, update: T::Update) -> ResourceStream<T> {
        debug!(entity_type = entity_type::<T>(), %id, ?update, "update");
        let source = Arc::clone(&self.source);
        resource_stream("update", async move { source.update(&id, update).await })
    }

    /// Deletes one record. `Success(())` only signals that the deletion happened.
    pub fn delete(&self, id: T::Id) -> ResourceStream<()> {
        debug!(entity_type = entity_type::<T>(), %id, "delete");
        let source = Arc::clone(&self.source);
        resource_stream("delete", async move { source.delete(&id).await })
    }

    pub fn is_favorite(&self, id: T::Id) -> ResourceStream<bool> {
        let favorites = self.favorites_source();
        resource_stream("is_favorite", async move { favorites?.is_favorite(&id).await })
    }

    pub fn add_favorite(&self, id: T::Id) -> ResourceStream<()> {
        let favorites = self.favorites_source();
        resource_stream("add_favorite", async move { favorites?.add_favorite(&id).await })
    }

    pub fn remove_favorite(&self, id: T::Id) -> ResourceStream<()> {
        let favorites = self.favorites_source();
        resource_stream("remove_favorite", async move {
            favorites?.remove_favorite(&id).await
        })
    }

    fn favorites_source(&self) -> Result<Arc<dyn FavoriteSource<T>>, RemoteError> {
        self.favorites.clone().ok_or_else(|| {
            RemoteError::exception(format!(
                "favorites are not supported for {}",
                entity_type::<T>()
            ))
        })
    }
}
