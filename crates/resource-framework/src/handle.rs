//! # View-Model Handle
//!
//! The `ViewModelHandle<T>` is what a screen holds. Triggers are fire-and-forget: they
//! return once the request is queued, and the outcome shows up in the slots. Slots can be
//! read synchronously or watched.

use crate::entity::{entity_type, RemoteEntity};
use crate::message::{Query, SlotKey, ViewModelRequest};
use crate::observable::Watcher;
use crate::resource::Resource;
use tokio::sync::{mpsc, oneshot};
use tracing::warn;

/// A cloneable handle to a [`ResourceViewModel`](crate::view_model::ResourceViewModel).
pub struct ViewModelHandle<T: RemoteEntity> {
    sender: mpsc::Sender<ViewModelRequest<T>>,
    list: Watcher<Resource<Vec<T>>>,
    detail: Watcher<Resource<T>>,
    created: Watcher<Resource<T>>,
    updated: Watcher<Resource<T>>,
    deleted: Watcher<Resource<()>>,
    favorite_toggle: Watcher<Resource<()>>,
}

impl<T: RemoteEntity> Clone for ViewModelHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            list: self.list.clone(),
            detail: self.detail.clone(),
            created: self.created.clone(),
            updated: self.updated.clone(),
            deleted: self.deleted.clone(),
            favorite_toggle: self.favorite_toggle.clone(),
        }
    }
}

impl<T: RemoteEntity> ViewModelHandle<T> {
    pub(crate) fn new(
        sender: mpsc::Sender<ViewModelRequest<T>>,
        list: Watcher<Resource<Vec<T>>>,
        detail: Watcher<Resource<T>>,
        created: Watcher<Resource<T>>,
        updated: Watcher<Resource<T>>,
        deleted: Watcher<Resource<()>>,
        favorite_toggle: Watcher<Resource<()>>,
    ) -> Self {
        Self {
            sender,
            list,
            detail,
            created,
            updated,
            deleted,
            favorite_toggle,
        }
    }

    async fn send(&self, request: ViewModelRequest<T>) {
        if self.sender.send(request).await.is_err() {
            warn!(entity_type = entity_type::<T>(), "View-model is closed, request dropped");
        }
    }

    // --- Triggers ---

    pub async fn load(&self, query: Query) {
        self.send(ViewModelRequest::Load(query)).await;
    }

    /// Same as [`load`](Self::load); there is no memoization to bypass.
    pub async fn retry(&self, query: Query) {
        self.send(ViewModelRequest::Load(query)).await;
    }

    /// Makes `id` the detail record and loads it.
    pub async fn select(&self, id: T::Id) {
        self.send(ViewModelRequest::Select(id)).await;
    }

    pub async fn create(&self, params: T::Create) {
        self.send(ViewModelRequest::Create(params)).await;
    }

    pub async fn update(&self, id: T::Id, update: T::Update) {
        self.send(ViewModelRequest::Update { id, update }).await;
    }

    pub async fn delete(&self, id: T::Id) {
        self.send(ViewModelRequest::Delete(id)).await;
    }

    pub async fn reset(&self, slot: SlotKey) {
        self.send(ViewModelRequest::Reset(slot)).await;
    }

    pub async fn check_favorite(&self, id: T::Id) {
        self.send(ViewModelRequest::CheckFavorite(id)).await;
    }

    /// Adds the record to the favorites if its flag is not `Success(true)`, removes it
    /// otherwise. Ignored while the flag or a previous toggle of the same record is
    /// still loading.
    pub async fn toggle_favorite(&self, id: T::Id) {
        self.send(ViewModelRequest::ToggleFavorite(id)).await;
    }

    /// Puts the flag back to `Idle`; a flag nobody watches is dropped.
    pub async fn reset_favorite(&self, id: T::Id) {
        self.send(ViewModelRequest::ResetFavorite(id)).await;
    }

    /// Stops the view-model. In-flight calls are abandoned.
    pub async fn shutdown(&self) {
        self.send(ViewModelRequest::Shutdown).await;
    }

    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// A handle that can stop the view-model without keeping it alive.
    pub fn downgrade(&self) -> WeakViewModelHandle<T> {
        WeakViewModelHandle {
            sender: self.sender.downgrade(),
        }
    }

    // --- Slot readers ---

    pub fn list(&self) -> Resource<Vec<T>> {
        self.list.borrow().clone()
    }

    pub fn detail(&self) -> Resource<T> {
        self.detail.borrow().clone()
    }

    pub fn created(&self) -> Resource<T> {
        self.created.borrow().clone()
    }

    pub fn updated(&self) -> Resource<T> {
        self.updated.borrow().clone()
    }

    pub fn deleted(&self) -> Resource<()> {
        self.deleted.borrow().clone()
    }

    pub fn favorite_toggle(&self) -> Resource<()> {
        self.favorite_toggle.borrow().clone()
    }

    // --- Subscriptions ---

    pub fn watch_list(&self) -> Watcher<Resource<Vec<T>>> {
        self.list.clone()
    }

    pub fn watch_detail(&self) -> Watcher<Resource<T>> {
        self.detail.clone()
    }

    pub fn watch_created(&self) -> Watcher<Resource<T>> {
        self.created.clone()
    }

    pub fn watch_updated(&self) -> Watcher<Resource<T>> {
        self.updated.clone()
    }

    pub fn watch_deleted(&self) -> Watcher<Resource<()>> {
        self.deleted.clone()
    }

    pub fn watch_favorite_toggle(&self) -> Watcher<Resource<()>> {
        self.favorite_toggle.clone()
    }

    /// Subscribes to the favorite flag of one record, creating its slot (`Idle`) if
    /// needed. `None` once the view-model has stopped.
    pub async fn watch_favorite(&self, id: T::Id) -> Option<Watcher<Resource<bool>>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(ViewModelRequest::WatchFavorite { id, respond_to })
            .await
            .ok()?;
        response.await.ok()
    }
}

/// Reaches a view-model without keeping it alive.
///
/// Once every [`ViewModelHandle`] is dropped the view-model stops on its own, whatever
/// weak handles remain.
pub struct WeakViewModelHandle<T: RemoteEntity> {
    sender: mpsc::WeakSender<ViewModelRequest<T>>,
}

impl<T: RemoteEntity> Clone for WeakViewModelHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: RemoteEntity> WeakViewModelHandle<T> {
    /// Whether every strong handle has been dropped.
    pub fn is_released(&self) -> bool {
        self.sender.upgrade().is_none()
    }

    /// Stops the view-model if a screen still holds it.
    pub async fn shutdown(&self) {
        if let Some(sender) = self.sender.upgrade() {
            let _ = sender.send(ViewModelRequest::Shutdown).await;
        }
    }
}
