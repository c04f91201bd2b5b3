//! # Resource View-Model
//!
//! The [`ResourceViewModel<T>`] is the per-screen coordinator. It runs as its own task,
//! owns every slot of the screen and is the only writer of those slots. Screens talk to
//! it through a [`ViewModelHandle<T>`]: triggers go in over a bounded `mpsc` channel and
//! the effects come back out through the slots.
//!
//! ```text
//!   ViewModelHandle ──request──▶ ResourceViewModel ──spawn──▶ JoinSet (repository calls)
//!         ▲                            │      ▲                        │
//!         └──────── watch (slots) ─────┘      └────── join_next ───────┘
//! ```
//!
//! Repository calls never block the loop: each one runs in the coordinator's `JoinSet`
//! and its terminal value is applied when the task is reaped. Two calls on the same slot
//! may therefore be in flight at once; what happens when they settle out of order is
//! decided by the [`RacePolicy`].
//!
//! ## Mutations
//!
//! A successful create, update or delete reloads the list slot (unless
//! [`ViewModelOptions::reload_list`] is off). An update of the selected record also
//! reloads the detail slot; deleting it clears the selection and puts the detail slot
//! back to `Idle`. Failed mutations touch nothing but their own slot.
//!
//! ## Lifecycle
//!
//! The loop ends when [`ViewModelHandle::shutdown`] is called or when the last handle is
//! dropped. Calls still in flight at that point are aborted and their results are
//! never delivered.

use crate::entity::{entity_type, RemoteEntity};
use crate::handle::ViewModelHandle;
use crate::message::{Query, SlotKey, ViewModelRequest};
use crate::repository::{settle, ResourceRepository};
use crate::resource::Resource;
use crate::slot::{RacePolicy, Slot, Ticket};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, info, warn};

/// Construction options for a view-model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewModelOptions {
    /// Capacity of the request channel.
    pub capacity: usize,
    /// Start the list slot at `Loading` and load it as soon as the loop runs.
    pub eager: bool,
    pub race_policy: RacePolicy,
    /// Reload the list slot after a successful mutation. Screens that never show the
    /// list turn this off.
    pub reload_list: bool,
}

impl Default for ViewModelOptions {
    fn default() -> Self {
        Self {
            capacity: 32,
            eager: false,
            race_policy: RacePolicy::LastArrival,
            reload_list: true,
        }
    }
}

/// Terminal value of one repository call, tagged with the slot it belongs to.
enum Settled<T: RemoteEntity> {
    List(Ticket, Resource<Vec<T>>),
    Detail(Ticket, Resource<T>),
    Created(Ticket, Resource<T>),
    Updated(T::Id, Ticket, Resource<T>),
    Deleted(T::Id, Ticket, Resource<()>),
    Favorite(T::Id, Ticket, Resource<bool>),
    Toggled {
        id: T::Id,
        ticket: Ticket,
        target: bool,
        outcome: Resource<()>,
    },
}

enum Event<T: RemoteEntity> {
    Request(Option<ViewModelRequest<T>>),
    Settled(Result<Settled<T>, JoinError>),
}

/// The coordinator task of one screen.
pub struct ResourceViewModel<T: RemoteEntity> {
    receiver: mpsc::Receiver<ViewModelRequest<T>>,
    repository: ResourceRepository<T>,
    filter: T::Filter,
    selected: Option<T::Id>,
    policy: RacePolicy,
    eager: bool,
    reload_list: bool,
    in_flight: JoinSet<Settled<T>>,

    list: Slot<Vec<T>>,
    detail: Slot<T>,
    created: Slot<T>,
    updated: Slot<T>,
    deleted: Slot<()>,
    favorite_toggle: Slot<()>,
    favorites: HashMap<T::Id, Slot<bool>>,
    /// Ids with a toggle in flight.
    toggling: HashSet<T::Id>,
    /// Highest generation of any dropped favorite slot.
    retired_favorites: u64,
}

impl<T: RemoteEntity> ResourceViewModel<T> {
    /// Creates the coordinator and the handle screens use to drive it.
    ///
    /// Nothing happens until [`run`](Self::run) is spawned.
    pub fn new(
        repository: ResourceRepository<T>,
        filter: T::Filter,
        options: ViewModelOptions,
    ) -> (Self, ViewModelHandle<T>) {
        let (sender, receiver) = mpsc::channel(options.capacity);
        let initial = if options.eager {
            Resource::Loading
        } else {
            Resource::Idle
        };

        let view_model = Self {
            receiver,
            repository,
            filter,
            selected: None,
            policy: options.race_policy,
            eager: options.eager,
            reload_list: options.reload_list,
            in_flight: JoinSet::new(),
            list: Slot::with_value("list", initial),
            detail: Slot::new("detail"),
            created: Slot::new("created"),
            updated: Slot::new("updated"),
            deleted: Slot::new("deleted"),
            favorite_toggle: Slot::new("favorite_toggle"),
            favorites: HashMap::new(),
            toggling: HashSet::new(),
            retired_favorites: 0,
        };

        let handle = ViewModelHandle::new(
            sender,
            view_model.list.subscribe(),
            view_model.detail.subscribe(),
            view_model.created.subscribe(),
            view_model.updated.subscribe(),
            view_model.deleted.subscribe(),
            view_model.favorite_toggle.subscribe(),
        );
        (view_model, handle)
    }

    /// Creates the coordinator, spawns it on the current runtime and returns its handle.
    pub fn spawn(
        repository: ResourceRepository<T>,
        filter: T::Filter,
        options: ViewModelOptions,
    ) -> ViewModelHandle<T> {
        let (view_model, handle) = Self::new(repository, filter, options);
        tokio::spawn(view_model.run());
        handle
    }

    /// Runs the coordinator loop until shutdown or until every handle is gone.
    pub async fn run(mut self) {
        let entity_type = entity_type::<T>();
        info!(entity_type, policy = ?self.policy, eager = self.eager, "View-model started");

        if self.eager {
            self.load_list();
        }

        loop {
            let event = tokio::select! {
                request = self.receiver.recv() => Event::Request(request),
                Some(done) = self.in_flight.join_next(), if !self.in_flight.is_empty() => {
                    Event::Settled(done)
                }
            };

            match event {
                Event::Request(Some(ViewModelRequest::Shutdown)) | Event::Request(None) => break,
                Event::Request(Some(request)) => self.handle_request(request),
                Event::Settled(Ok(settled)) => self.apply(settled),
                Event::Settled(Err(e)) => {
                    warn!(entity_type, error = %e, "Repository call did not complete");
                }
            }
        }

        let abandoned = self.in_flight.len();
        self.in_flight.abort_all();
        info!(entity_type, abandoned, "View-model stopped");
    }

    fn handle_request(&mut self, request: ViewModelRequest<T>) {
        let entity_type = entity_type::<T>();
        match request {
            ViewModelRequest::Load(Query::List) => {
                debug!(entity_type, "Load list");
                self.load_list();
            }
            ViewModelRequest::Load(Query::Detail) => match self.selected.clone() {
                Some(id) => self.load_detail(id),
                None => warn!(entity_type, "Load detail without a selected record"),
            },
            ViewModelRequest::Select(id) => {
                debug!(entity_type, %id, "Select");
                self.selected = Some(id.clone());
                self.load_detail(id);
            }
            ViewModelRequest::Create(params) => {
                let ticket = self.created.begin();
                let stream = self.repository.create(params);
                self.in_flight
                    .spawn(async move { Settled::Created(ticket, settle(stream).await) });
            }
            ViewModelRequest::Update { id, update } => {
                let ticket = self.updated.begin();
                let stream = self.repository.update(id.clone(), update);
                self.in_flight
                    .spawn(async move { Settled::Updated(id, ticket, settle(stream).await) });
            }
            ViewModelRequest::Delete(id) => {
                let ticket = self.deleted.begin();
                let stream = self.repository.delete(id.clone());
                self.in_flight
                    .spawn(async move { Settled::Deleted(id, ticket, settle(stream).await) });
            }
            ViewModelRequest::Reset(key) => self.reset(key),
            ViewModelRequest::CheckFavorite(id) => self.check_favorite(id),
            ViewModelRequest::ToggleFavorite(id) => self.toggle_favorite(id),
            ViewModelRequest::ResetFavorite(id) => self.reset_favorite(id),
            ViewModelRequest::WatchFavorite { id, respond_to } => {
                let _ = respond_to.send(self.favorite_slot(id).subscribe());
            }
            ViewModelRequest::Shutdown => {}
        }
    }

    fn apply(&mut self, settled: Settled<T>) {
        let policy = self.policy;
        match settled {
            Settled::List(ticket, outcome) => {
                self.list.settle(ticket, outcome, policy);
            }
            Settled::Detail(ticket, outcome) => {
                self.detail.settle(ticket, outcome, policy);
            }
            Settled::Created(ticket, outcome) => {
                let refresh = outcome.is_success();
                self.created.settle(ticket, outcome, policy);
                self.after_mutation(refresh);
            }
            Settled::Updated(id, ticket, outcome) => {
                let refresh = outcome.is_success();
                self.updated.settle(ticket, outcome, policy);
                self.after_mutation(refresh);
                if refresh && self.selected.as_ref() == Some(&id) {
                    self.load_detail(id);
                }
            }
            Settled::Deleted(id, ticket, outcome) => {
                let refresh = outcome.is_success();
                self.deleted.settle(ticket, outcome, policy);
                self.after_mutation(refresh);
                if refresh && self.selected.as_ref() == Some(&id) {
                    debug!(entity_type = entity_type::<T>(), %id, "Selected record deleted");
                    self.selected = None;
                    self.detail.reset();
                }
            }
            Settled::Favorite(id, ticket, outcome) => {
                // The slot may have been dropped by a reset in the meantime.
                if let Some(slot) = self.favorites.get_mut(&id) {
                    slot.settle(ticket, outcome, policy);
                }
            }
            Settled::Toggled {
                id,
                ticket,
                target,
                outcome,
            } => {
                let succeeded = outcome.is_success();
                self.toggling.remove(&id);
                self.favorite_toggle.settle(ticket, outcome, policy);
                // The backend flag changed whether or not anyone still watches the toggle.
                if succeeded {
                    debug!(entity_type = entity_type::<T>(), %id, target, "Favorite flag set");
                    if let Some(slot) = self.favorites.get_mut(&id) {
                        slot.set(Resource::Success(target));
                    }
                }
            }
        }
    }

    /// A successful mutation invalidates the list; a failed one leaves it alone.
    fn after_mutation(&mut self, succeeded: bool) {
        if succeeded && self.reload_list {
            self.load_list();
        }
    }

    fn load_list(&mut self) {
        let ticket = self.list.begin();
        let stream = self.repository.fetch_list(self.filter.clone());
        self.in_flight
            .spawn(async move { Settled::List(ticket, settle(stream).await) });
    }

    fn load_detail(&mut self, id: T::Id) {
        let ticket = self.detail.begin();
        let stream = self.repository.fetch(id);
        self.in_flight
            .spawn(async move { Settled::Detail(ticket, settle(stream).await) });
    }

    fn check_favorite(&mut self, id: T::Id) {
        let ticket = self.favorite_slot(id.clone()).begin();
        let stream = self.repository.is_favorite(id.clone());
        self.in_flight
            .spawn(async move { Settled::Favorite(id, ticket, settle(stream).await) });
    }

    fn toggle_favorite(&mut self, id: T::Id) {
        let entity_type = entity_type::<T>();
        let flag = self.favorite_slot(id.clone()).current();
        if self.toggling.contains(&id) || flag.is_loading() {
            debug!(entity_type, %id, "Toggle ignored while another call is in flight");
            return;
        }

        // Idle or Failure counts as "not a favorite".
        let target = !matches!(flag, Resource::Success(true));
        debug!(entity_type, %id, target, "Toggle favorite");

        self.toggling.insert(id.clone());
        let ticket = self.favorite_toggle.begin();
        let stream = if target {
            self.repository.add_favorite(id.clone())
        } else {
            self.repository.remove_favorite(id.clone())
        };
        self.in_flight.spawn(async move {
            Settled::Toggled {
                id,
                ticket,
                target,
                outcome: settle(stream).await,
            }
        });
    }

    fn reset(&mut self, key: SlotKey) {
        match key {
            SlotKey::List => self.list.reset(),
            SlotKey::Detail => self.detail.reset(),
            SlotKey::Created => self.created.reset(),
            SlotKey::Updated => self.updated.reset(),
            SlotKey::Deleted => self.deleted.reset(),
            SlotKey::FavoriteToggle => self.favorite_toggle.reset(),
        }
    }

    /// Resets the flag of `id`. A flag nobody watches is dropped altogether; a later
    /// `watch_favorite` starts a fresh one that ignores the calls made before.
    fn reset_favorite(&mut self, id: T::Id) {
        let Some(slot) = self.favorites.get_mut(&id) else {
            return;
        };
        if slot.subscriber_count() > 0 {
            slot.reset();
            return;
        }
        if let Some(retired) = self.favorites.remove(&id) {
            self.retired_favorites = self.retired_favorites.max(retired.generation());
            debug!(entity_type = entity_type::<T>(), %id, "Favorite slot dropped");
        }
    }

    fn favorite_slot(&mut self, id: T::Id) -> &mut Slot<bool> {
        let after = self.retired_favorites;
        self.favorites
            .entry(id)
            .or_insert_with(|| Slot::starting_after("favorite", after))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockCall, MockSource, TestId, TestItem, TestItemCreate};
    use crate::observable::Watcher;
    use std::time::Duration;

    async fn until<U: Clone>(
        watcher: &mut Watcher<Resource<U>>,
        done: impl FnMut(&Resource<U>) -> bool,
    ) -> Resource<U> {
        tokio::time::timeout(Duration::from_secs(2), watcher.wait_for(done))
            .await
            .expect("timed out waiting for slot")
            .expect("view-model stopped")
            .clone()
    }

    #[tokio::test]
    async fn test_create_failure_leaves_list_alone() {
        let mock = MockSource::<TestItem>::new();
        mock.expect_list().return_ok(vec![TestItem::new(1, "a")]);
        mock.expect_create()
            .return_err(crate::error::RemoteError::status(422, "Unprocessable Entity"));

        let handle = ResourceViewModel::spawn(mock.repository(), None, Default::default());
        let mut list = handle.watch_list();
        let mut created = handle.watch_created();

        handle.load(Query::List).await;
        until(&mut list, Resource::is_success).await;

        handle
            .create(TestItemCreate {
                label: "b".into(),
                group: 1,
            })
            .await;
        let outcome = until(&mut created, Resource::is_terminal).await;
        assert_eq!(outcome, Resource::failure("Error 422: Unprocessable Entity"));
        assert_eq!(handle.list(), Resource::success(vec![TestItem::new(1, "a")]));
        assert_eq!(mock.count(|call| *call == MockCall::List), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_eager_view_model_starts_loading() {
        let mock = MockSource::<TestItem>::new();
        let reply = mock.expect_list().defer();

        let options = ViewModelOptions {
            eager: true,
            ..Default::default()
        };
        let (view_model, handle) = ResourceViewModel::new(mock.repository(), None, options);
        assert!(handle.list().is_loading());

        tokio::spawn(view_model.run());
        reply.send(Ok(vec![])).unwrap();

        let mut list = handle.watch_list();
        assert_eq!(until(&mut list, Resource::is_terminal).await, Resource::success(vec![]));
        mock.verify();
    }

    #[tokio::test]
    async fn test_shutdown_abandons_in_flight_call() {
        let mock = MockSource::<TestItem>::new();
        let mut reply = mock.expect_get(TestId(1)).defer();

        let (view_model, handle) = ResourceViewModel::new(mock.repository(), None, Default::default());
        let task = tokio::spawn(view_model.run());

        handle.select(TestId(1)).await;
        while mock.calls().is_empty() {
            tokio::task::yield_now().await;
        }
        handle.shutdown().await;
        task.await.unwrap();

        assert!(handle.detail().is_loading());
        tokio::time::timeout(Duration::from_secs(2), reply.closed())
            .await
            .expect("in-flight call was not aborted");
    }

    #[tokio::test]
    async fn test_reset_favorite_drops_unwatched_slot() {
        let mock = MockSource::<TestItem>::new();
        let reply = mock.expect_is_favorite(TestId(1)).defer();

        let (mut view_model, _handle) =
            ResourceViewModel::new(mock.repository(), None, Default::default());
        view_model.handle_request(ViewModelRequest::CheckFavorite(TestId(1)));
        view_model.handle_request(ViewModelRequest::ResetFavorite(TestId(1)));
        assert!(view_model.favorites.is_empty());

        // The late answer does not bring the slot back.
        reply.send(Ok(true)).unwrap();
        let settled = view_model.in_flight.join_next().await.unwrap().unwrap();
        view_model.apply(settled);
        assert!(view_model.favorites.is_empty());

        // A watched slot survives a reset and goes back to Idle.
        let watcher = view_model.favorite_slot(TestId(1)).subscribe();
        view_model.favorite_slot(TestId(1)).set(Resource::Success(true));
        view_model.handle_request(ViewModelRequest::ResetFavorite(TestId(1)));
        assert_eq!(view_model.favorites.len(), 1);
        assert!(watcher.borrow().is_idle());

        drop(watcher);
        view_model.handle_request(ViewModelRequest::ResetFavorite(TestId(1)));
        assert!(view_model.favorites.is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_detail_requires_selection() {
        let mock = MockSource::<TestItem>::new();
        mock.expect_get(TestId(2)).return_ok(Some(TestItem::new(2, "two")));
        mock.expect_get(TestId(2)).return_ok(Some(TestItem::new(2, "again")));

        let handle = ResourceViewModel::spawn(mock.repository(), None, Default::default());
        let mut detail = handle.watch_detail();

        // Nothing selected yet: ignored.
        handle.load(Query::Detail).await;
        handle.select(TestId(2)).await;
        assert_eq!(
            until(&mut detail, Resource::is_success).await,
            Resource::success(TestItem::new(2, "two"))
        );

        handle.retry(Query::Detail).await;
        until(&mut detail, |r| r.data().map(|item| item.label.as_str()) == Some("again")).await;
        assert_eq!(
            mock.calls(),
            vec![MockCall::Get(TestId(2)), MockCall::Get(TestId(2))]
        );
        mock.verify();
    }
}
