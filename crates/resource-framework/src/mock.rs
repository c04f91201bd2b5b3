//! # Mock Framework & Testing Guide
//!
//! [`MockSource<T>`] implements [`RemoteSource<T>`] and [`FavoriteSource<T>`] from a
//! script of expectations. It lets you drive a repository or a whole view-model through
//! every state (including failures that are hard to provoke against a real backend)
//! without a network or a document store.
//!
//! ## When to use Mocks vs the Document Store
//!
//! | Feature | MockSource | DocumentStore |
//! |---------|------------|---------------|
//! | **Determinism** | Fully scripted | Real state, real ordering |
//! | **Error Injection** | Easy (`return_err`) | Only what the entity rejects |
//! | **Timing** | `defer()` holds a call open | Answers as soon as it runs |
//! | **Use Case** | Slot transitions, races, failure paths | End-to-end flows |
//!
//! ## Expectations
//!
//! Expectations are consumed in FIFO order. A call that does not match the next
//! expectation is answered with a `RemoteError::Exception` and recorded; [`MockSource::verify`]
//! then panics, naming it.
//!
//! ```rust
//! use resource_framework::mock::MockSource;
//! use resource_framework::repository::settle;
//! use resource_framework::{RemoteEntity, RemoteError, Resource};
//!
//! #[derive(Clone, Debug, PartialEq)] struct Tag { id: u32 }
//! #[derive(Debug)] struct TagCreate;
//! #[derive(Debug)] struct TagUpdate;
//! #[derive(Debug, thiserror::Error)] #[error("tag error")] struct TagError;
//!
//! impl RemoteEntity for Tag {
//!     type Id = u32; type Create = TagCreate; type Update = TagUpdate; type Filter = ();
//!     type Action = (); type ActionResult = (); type Error = TagError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn from_create_params(id: u32, _: TagCreate) -> Result<Self, TagError> { Ok(Self { id }) }
//!     fn on_update(&mut self, _: TagUpdate) -> Result<(), TagError> { Ok(()) }
//!     fn handle_action(&mut self, _: ()) -> Result<(), TagError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockSource::<Tag>::new();
//!     mock.expect_list()
//!         .return_err(RemoteError::exception("network unreachable"));
//!
//!     let outcome = settle(mock.repository().fetch_list(())).await;
//!     assert_eq!(outcome, Resource::failure("Exception: network unreachable"));
//!     mock.verify();
//! }
//! ```
//!
//! ## Holding a call open
//!
//! `defer()` returns the sending half of the reply. Until the test sends on it, the call
//! stays in flight and the slot stays `Loading`. This is how overlapping loads are
//! tested:
//!
//! ```rust,ignore
//! let first = mock.expect_list().defer();
//! let second = mock.expect_list().defer();
//! screen.refresh().await;
//! screen.refresh().await;
//! second.send(Ok(vec![newer])).unwrap();
//! first.send(Ok(vec![older])).unwrap();
//! ```

use crate::entity::RemoteEntity;
use crate::error::RemoteError;
use crate::repository::ResourceRepository;
use crate::source::{FavoriteSource, RemoteSource};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

/// The answer scripted for one expected call.
enum Reply<R> {
    Ready(Result<R, RemoteError>),
    Deferred(oneshot::Receiver<Result<R, RemoteError>>),
}

impl<R> Reply<R> {
    async fn resolve(self) -> Result<R, RemoteError> {
        match self {
            Reply::Ready(result) => result,
            Reply::Deferred(receiver) => receiver
                .await
                .unwrap_or_else(|_| Err(RemoteError::exception("mock reply dropped"))),
        }
    }
}

/// Represents an expected request to the mock source.
enum Expectation<T: RemoteEntity> {
    List(Reply<Vec<T>>),
    Get { id: T::Id, reply: Reply<Option<T>> },
    Create(Reply<T>),
    Update { id: T::Id, reply: Reply<T> },
    Delete { id: T::Id, reply: Reply<()> },
    IsFavorite { id: T::Id, reply: Reply<bool> },
    AddFavorite { id: T::Id, reply: Reply<()> },
    RemoveFavorite { id: T::Id, reply: Reply<()> },
}

/// One request received by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall<Id> {
    List,
    Get(Id),
    Create,
    Update(Id),
    Delete(Id),
    IsFavorite(Id),
    AddFavorite(Id),
    RemoveFavorite(Id),
}

struct MockState<T: RemoteEntity> {
    expectations: VecDeque<Expectation<T>>,
    calls: Vec<MockCall<T::Id>>,
    unexpected: Vec<MockCall<T::Id>>,
}

/// A scripted source with expectation tracking.
pub struct MockSource<T: RemoteEntity> {
    state: Arc<Mutex<MockState<T>>>,
}

impl<T: RemoteEntity> Clone for MockSource<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: RemoteEntity> Default for MockSource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RemoteEntity> MockSource<T> {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                expectations: VecDeque::new(),
                calls: Vec::new(),
                unexpected: Vec::new(),
            })),
        }
    }

    /// A repository backed by this mock, favorites included.
    pub fn repository(&self) -> ResourceRepository<T> {
        ResourceRepository::new(Arc::new(self.clone())).with_favorites(Arc::new(self.clone()))
    }

    pub fn expect_list(&self) -> ReplyBuilder<T, Vec<T>> {
        self.builder(Expectation::List)
    }

    pub fn expect_get(&self, id: T::Id) -> ReplyBuilder<T, Option<T>> {
        self.builder(move |reply| Expectation::Get { id, reply })
    }

    pub fn expect_create(&self) -> ReplyBuilder<T, T> {
        self.builder(Expectation::Create)
    }

    pub fn expect_update(&self, id: T::Id) -> ReplyBuilder<T, T> {
        self.builder(move |reply| Expectation::Update { id, reply })
    }

    pub fn expect_delete(&self, id: T::Id) -> ReplyBuilder<T, ()> {
        self.builder(move |reply| Expectation::Delete { id, reply })
    }

    pub fn expect_is_favorite(&self, id: T::Id) -> ReplyBuilder<T, bool> {
        self.builder(move |reply| Expectation::IsFavorite { id, reply })
    }

    pub fn expect_add_favorite(&self, id: T::Id) -> ReplyBuilder<T, ()> {
        self.builder(move |reply| Expectation::AddFavorite { id, reply })
    }

    pub fn expect_remove_favorite(&self, id: T::Id) -> ReplyBuilder<T, ()> {
        self.builder(move |reply| Expectation::RemoveFavorite { id, reply })
    }

    /// Every request received so far, in order.
    pub fn calls(&self) -> Vec<MockCall<T::Id>> {
        self.state.lock().unwrap().calls.clone()
    }

    /// How many received requests satisfy `predicate`.
    pub fn count(&self, predicate: impl Fn(&MockCall<T::Id>) -> bool) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| predicate(call))
            .count()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let state = self.state.lock().unwrap();
        if !state.unexpected.is_empty() {
            panic!("Unexpected requests: {:?}", state.unexpected);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }

    fn builder<R>(
        &self,
        make: impl FnOnce(Reply<R>) -> Expectation<T> + Send + 'static,
    ) -> ReplyBuilder<T, R> {
        ReplyBuilder {
            state: Arc::clone(&self.state),
            make: Box::new(make),
        }
    }

    /// Records `call` and pops the next expectation if `accept` takes it.
    fn take<R>(
        &self,
        call: MockCall<T::Id>,
        accept: impl FnOnce(Expectation<T>) -> Result<Reply<R>, Expectation<T>>,
    ) -> Result<Reply<R>, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call.clone());
        let rejected = match state.expectations.pop_front() {
            Some(expectation) => match accept(expectation) {
                Ok(reply) => return Ok(reply),
                Err(expectation) => Some(expectation),
            },
            None => None,
        };
        if let Some(expectation) = rejected {
            state.expectations.push_front(expectation);
        }
        state.unexpected.push(call.clone());
        Err(RemoteError::exception(format!("unexpected request {:?}", call)))
    }
}

/// Builder for the reply to one expectation.
pub struct ReplyBuilder<T: RemoteEntity, R> {
    state: Arc<Mutex<MockState<T>>>,
    make: Box<dyn FnOnce(Reply<R>) -> Expectation<T> + Send>,
}

impl<T: RemoteEntity, R> ReplyBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Reply::Ready(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: RemoteError) {
        self.push(Reply::Ready(Err(error)));
    }

    /// Leaves the call in flight until the returned sender is used (or dropped).
    pub fn defer(self) -> oneshot::Sender<Result<R, RemoteError>> {
        let (sender, receiver) = oneshot::channel();
        self.push(Reply::Deferred(receiver));
        sender
    }

    fn push(self, reply: Reply<R>) {
        let expectation = (self.make)(reply);
        self.state.lock().unwrap().expectations.push_back(expectation);
    }
}

#[async_trait]
impl<T: RemoteEntity> RemoteSource<T> for MockSource<T> {
    async fn list(&self, _filter: &T::Filter) -> Result<Vec<T>, RemoteError> {
        let reply = self.take(MockCall::List, |expectation| match expectation {
            Expectation::List(reply) => Ok(reply),
            other => Err(other),
        })?;
        reply.resolve().await
    }

    async fn get(&self, id: &T::Id) -> Result<Option<T>, RemoteError> {
        let reply = self.take(MockCall::Get(id.clone()), |expectation| match expectation {
            Expectation::Get { id: expected, reply } if expected == *id => Ok(reply),
            other => Err(other),
        })?;
        reply.resolve().await
    }

    async fn create(&self, _params: T::Create) -> Result<T, RemoteError> {
        let reply = self.take(MockCall::Create, |expectation| match expectation {
            Expectation::Create(reply) => Ok(reply),
            other => Err(other),
        })?;
        reply.resolve().await
    }

    async fn update(&self, id: &T::Id, _update: T::Update) -> Result<T, RemoteError> {
        let reply = self.take(MockCall::Update(id.clone()), |expectation| match expectation {
            Expectation::Update { id: expected, reply } if expected == *id => Ok(reply),
            other => Err(other),
        })?;
        reply.resolve().await
    }

    async fn delete(&self, id: &T::Id) -> Result<(), RemoteError> {
        let reply = self.take(MockCall::Delete(id.clone()), |expectation| match expectation {
            Expectation::Delete { id: expected, reply } if expected == *id => Ok(reply),
            other => Err(other),
        })?;
        reply.resolve().await
    }
}

#[async_trait]
impl<T: RemoteEntity> FavoriteSource<T> for MockSource<T> {
    async fn is_favorite(&self, id: &T::Id) -> Result<bool, RemoteError> {
        let reply = self.take(MockCall::IsFavorite(id.clone()), |expectation| {
            match expectation {
                Expectation::IsFavorite { id: expected, reply } if expected == *id => Ok(reply),
                other => Err(other),
            }
        })?;
        reply.resolve().await
    }

    async fn add_favorite(&self, id: &T::Id) -> Result<(), RemoteError> {
        let reply = self.take(MockCall::AddFavorite(id.clone()), |expectation| {
            match expectation {
                Expectation::AddFavorite { id: expected, reply } if expected == *id => Ok(reply),
                other => Err(other),
            }
        })?;
        reply.resolve().await
    }

    async fn remove_favorite(&self, id: &T::Id) -> Result<(), RemoteError> {
        let reply = self.take(MockCall::RemoveFavorite(id.clone()), |expectation| {
            match expectation {
                Expectation::RemoveFavorite { id: expected, reply } if expected == *id => {
                    Ok(reply)
                }
                other => Err(other),
            }
        })?;
        reply.resolve().await
    }
}

// =============================================================================
// TEST FIXTURE
// =============================================================================

#[cfg(test)]
pub(crate) use fixture::*;

#[cfg(test)]
mod fixture {
    use crate::entity::RemoteEntity;
    use std::fmt::Display;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct TestId(pub u32);

    impl From<u32> for TestId {
        fn from(id: u32) -> Self {
            Self(id)
        }
    }

    impl Display for TestId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "item_{}", self.0)
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct TestItem {
        pub id: TestId,
        pub label: String,
        pub group: u32,
        pub favorite: bool,
    }

    impl TestItem {
        pub fn new(id: u32, label: &str) -> Self {
            Self {
                id: TestId(id),
                label: label.to_string(),
                group: 1,
                favorite: false,
            }
        }
    }

    #[derive(Debug)]
    pub struct TestItemCreate {
        pub label: String,
        pub group: u32,
    }

    #[derive(Debug)]
    pub struct TestItemUpdate {
        pub label: Option<String>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("Test item validation error: {0}")]
    pub struct TestItemError(String);

    impl RemoteEntity for TestItem {
        type Id = TestId;
        type Create = TestItemCreate;
        type Update = TestItemUpdate;
        type Filter = Option<u32>;
        type Action = bool;
        type ActionResult = bool;
        type Error = TestItemError;

        fn id(&self) -> &TestId {
            &self.id
        }

        fn from_create_params(id: TestId, params: TestItemCreate) -> Result<Self, Self::Error> {
            if params.label.is_empty() {
                return Err(TestItemError("label must not be empty".into()));
            }
            Ok(Self {
                id,
                label: params.label,
                group: params.group,
                favorite: false,
            })
        }

        fn on_update(&mut self, update: TestItemUpdate) -> Result<(), Self::Error> {
            if let Some(label) = update.label {
                self.label = label;
            }
            Ok(())
        }

        fn matches(&self, filter: &Option<u32>) -> bool {
            filter.map_or(true, |group| self.group == group)
        }

        /// Sets the favorite flag, returning the previous value.
        fn handle_action(&mut self, favorite: bool) -> Result<bool, Self::Error> {
            Ok(std::mem::replace(&mut self.favorite, favorite))
        }
    }
}
