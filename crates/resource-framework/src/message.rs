//! # Generic Messages
//!
//! Two request families travel over `mpsc` channels in this crate:
//!
//! - [`StoreRequest`] is sent by a [`StoreClient`](crate::store::StoreClient) to its
//!   [`DocumentStore`](crate::store::DocumentStore) and answered on a oneshot channel,
//!   the in-process stand-in for a document database's completion callback.
//! - [`ViewModelRequest`] is sent by a [`ViewModelHandle`](crate::handle::ViewModelHandle)
//!   to its [`ResourceViewModel`](crate::view_model::ResourceViewModel). Apart from
//!   `WatchFavorite` these are fire-and-forget: the screen observes the effect through
//!   the slots.

use crate::entity::RemoteEntity;
use crate::error::StoreError;
use crate::observable::Watcher;
use crate::resource::Resource;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by the document store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Message type sent to the document store.
///
/// The variants map directly onto the document operations a remote database offers:
/// query a collection, add, get, update, remove, plus `Action` for record-specific
/// operations that don't fit the CRUD model.
#[derive(Debug)]
pub enum StoreRequest<T: RemoteEntity> {
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

/// The read slots a view-model can load (and retry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    /// The collection shown by the screen.
    List,
    /// The record last passed to `select`.
    Detail,
}

/// Every fixed slot of a view-model, for `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotKey {
    List,
    Detail,
    Created,
    Updated,
    Deleted,
    FavoriteToggle,
}

/// Message type sent to a view-model.
#[derive(Debug)]
pub enum ViewModelRequest<T: RemoteEntity> {
    /// Load or retry a read slot.
    Load(Query),
    /// Remember `id` as the detail record and load it.
    Select(T::Id),
    Create(T::Create),
    Update { id: T::Id, update: T::Update },
    Delete(T::Id),
    Reset(SlotKey),
    /// Load the favorite flag of one record.
    CheckFavorite(T::Id),
    /// Flip the favorite flag of one record.
    ToggleFavorite(T::Id),
    ResetFavorite(T::Id),
    /// Ask for a subscription to the favorite flag slot of one record.
    WatchFavorite {
        id: T::Id,
        respond_to: oneshot::Sender<Watcher<Resource<bool>>>,
    },
    Shutdown,
}
