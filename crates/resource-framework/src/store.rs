//! # In-Process Document Store
//!
//! This module defines the [`DocumentStore`], an actor that plays the part of the remote
//! document database, and the [`StoreClient`] that talks to it. The client implements
//! [`RemoteSource`], so a repository cannot tell it apart from a real backend: calls are
//! asynchronous and every answer comes back on a completion channel.
//!
//! **Concurrency Model**:
//! The store processes its messages *sequentially* in a loop and owns its map, so there
//! is no `Mutex` around the records. Clients are cheap to clone and can be shared across
//! tasks; the store shuts down when the last client is dropped.
//!
//! ```rust
//! use resource_framework::store::DocumentStore;
//! use resource_framework::RemoteEntity;
//!
//! #[derive(Clone, Debug)] struct Note { id: u32, text: String }
//! #[derive(Debug)] struct NoteCreate { text: String }
//! #[derive(Debug)] struct NoteUpdate { text: String }
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! impl RemoteEntity for Note {
//!     type Id = u32; type Create = NoteCreate; type Update = NoteUpdate; type Filter = ();
//!     type Action = (); type ActionResult = (); type Error = NoteError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, NoteError> {
//!         Ok(Self { id, text: params.text })
//!     }
//!     fn on_update(&mut self, update: NoteUpdate) -> Result<(), NoteError> {
//!         self.text = update.text;
//!         Ok(())
//!     }
//!     fn handle_action(&mut self, _: ()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (store, client) = DocumentStore::<Note>::new(10);
//!     tokio::spawn(store.run());
//!
//!     let note = client.create(NoteCreate { text: "hello".into() }).await.unwrap();
//!     let notes = client.list(()).await.unwrap();
//!     assert_eq!(notes.len(), 1);
//!     assert_eq!(notes[0].text, note.text);
//! }
//! ```

use crate::entity::{entity_type, RemoteEntity};
use crate::error::{RemoteError, StoreError};
use crate::message::StoreRequest;
use crate::source::RemoteSource;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

/// The actor that owns one collection of records.
///
/// Records are listed in insertion order.
pub struct DocumentStore<T: RemoteEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    next_id: u32,
}

impl<T: RemoteEntity> DocumentStore<T> {
    /// Creates a new `DocumentStore` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; clients wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            records: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        };
        (store, StoreClient::new(sender))
    }

    /// Runs the store's event loop, processing messages until every client is gone.
    pub async fn run(mut self) {
        let entity_type = entity_type::<T>();
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .order
                        .iter()
                        .filter_map(|id| self.records.get(id))
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                StoreRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(item) => {
                            self.records.insert(id.clone(), item.clone());
                            self.order.push(id.clone());
                            info!(entity_type, %id, size = self.records.len(), "Created");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(StoreError::Entity(Box::new(e))));
                        }
                    }
                }
                StoreRequest::Get { id, respond_to } => {
                    let item = self.records.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                StoreRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.records.get_mut(&id) {
                        if let Err(e) = item.on_update(update) {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(StoreError::Entity(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    if self.records.remove(&id).is_some() {
                        self.order.retain(|existing| existing != &id);
                        info!(entity_type, %id, size = self.records.len(), "Deleted");
                        let _ = respond_to.send(Ok(()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
                StoreRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.records.get_mut(&id) {
                        let result = item
                            .handle_action(action)
                            .map_err(|e| StoreError::Entity(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }
}

/// A type-safe client for a [`DocumentStore`].
pub struct StoreClient<T: RemoteEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: RemoteEntity> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: RemoteEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }

    pub async fn list(&self, filter: T::Filter) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::List { filter, respond_to })
            .await
    }

    pub async fn create(&self, params: T::Create) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| StoreRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, StoreError> {
        self.request(|respond_to| StoreRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

#[async_trait]
impl<T: RemoteEntity> RemoteSource<T> for StoreClient<T> {
    async fn list(&self, filter: &T::Filter) -> Result<Vec<T>, RemoteError> {
        Ok(StoreClient::list(self, filter.clone()).await?)
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>, RemoteError> {
        match StoreClient::get(self, id.clone()).await? {
            Some(item) => Ok(Some(item)),
            None => Err(RemoteError::not_found()),
        }
    }

    async fn create(&self, params: T::Create) -> Result<T, RemoteError> {
        Ok(StoreClient::create(self, params).await?)
    }

    async fn update(&self, id: &T::Id, update: T::Update) -> Result<T, RemoteError> {
        Ok(StoreClient::update(self, id.clone(), update).await?)
    }

    async fn delete(&self, id: &T::Id) -> Result<(), RemoteError> {
        Ok(StoreClient::delete(self, id.clone()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{TestId, TestItem, TestItemCreate, TestItemUpdate};

    fn spawn_store() -> StoreClient<TestItem> {
        let (store, client) = DocumentStore::new(10);
        tokio::spawn(store.run());
        client
    }

    #[tokio::test]
    async fn test_store_full_lifecycle() {
        let client = spawn_store();

        let created = client
            .create(TestItemCreate {
                label: "first".into(),
                group: 1,
            })
            .await
            .unwrap();
        assert_eq!(created.id, TestId(1));

        let updated = client
            .update(
                created.id.clone(),
                TestItemUpdate {
                    label: Some("renamed".into()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.label, "renamed");

        let fetched = client.get(created.id.clone()).await.unwrap().unwrap();
        assert_eq!(fetched, updated);

        client.delete(created.id.clone()).await.unwrap();
        assert!(client.get(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_and_filters() {
        let client = spawn_store();
        for (label, group) in [("a", 1), ("b", 2), ("c", 1)] {
            client
                .create(TestItemCreate {
                    label: label.into(),
                    group,
                })
                .await
                .unwrap();
        }

        let all: Vec<String> = client
            .list(None)
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.label)
            .collect();
        assert_eq!(all, vec!["a", "b", "c"]);

        let group_one: Vec<String> = client
            .list(Some(1))
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.label)
            .collect();
        assert_eq!(group_one, vec!["a", "c"]);
    }

    #[tokio::test]
    async fn test_validation_error_is_reported() {
        let client = spawn_store();
        let result = client
            .create(TestItemCreate {
                label: String::new(),
                group: 1,
            })
            .await;
        assert!(matches!(result, Err(StoreError::Entity(_))));
    }

    #[tokio::test]
    async fn test_remote_source_maps_missing_to_404() {
        let client = spawn_store();
        let result = RemoteSource::get(&client, &TestId(42)).await;
        assert_eq!(result.unwrap_err().to_string(), "Error 404: Not Found");

        let result = RemoteSource::delete(&client, &TestId(42)).await;
        assert_eq!(result.unwrap_err(), RemoteError::not_found());
    }

    #[tokio::test]
    async fn test_closed_store_is_exception() {
        let (store, client) = DocumentStore::<TestItem>::new(1);
        drop(store);
        let result = RemoteSource::list(&client, &None).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Exception: Document store closed"
        );
    }
}
