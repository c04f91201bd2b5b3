//! # ResourceScreen Trait
//!
//! Provides a common interface for screen clients, adding default list operations built
//! on top of a generic [`ViewModelHandle`].
use crate::entity::RemoteEntity;
use crate::message::{Query, SlotKey};
use crate::observable::Watcher;
use crate::render::Presentation;
use crate::resource::Resource;
use crate::ViewModelHandle;
use async_trait::async_trait;

/// Trait for screen clients to inherit the standard list operations.
///
/// A screen wraps one handle and adds domain-named methods (`open_tutorial`,
/// `post_comment`, …); refreshing, retrying and reading the list come for free.
///
/// # Example
///
/// ```rust
/// use resource_framework::mock::MockSource;
/// use resource_framework::{
///     RemoteEntity, Resource, ResourceScreen, ResourceViewModel, ViewModelHandle,
/// };
///
/// #[derive(Clone, Debug, PartialEq)] struct Topic { id: u32 }
/// #[derive(Debug)] struct TopicCreate;
/// #[derive(Debug)] struct TopicUpdate;
/// #[derive(Debug, thiserror::Error)] #[error("topic error")] struct TopicError;
///
/// impl RemoteEntity for Topic {
///     type Id = u32; type Create = TopicCreate; type Update = TopicUpdate; type Filter = ();
///     type Action = (); type ActionResult = (); type Error = TopicError;
///     fn id(&self) -> &u32 { &self.id }
///     fn from_create_params(id: u32, _: TopicCreate) -> Result<Self, TopicError> { Ok(Self { id }) }
///     fn on_update(&mut self, _: TopicUpdate) -> Result<(), TopicError> { Ok(()) }
///     fn handle_action(&mut self, _: ()) -> Result<(), TopicError> { Ok(()) }
/// }
///
/// // 1. Wrap the handle
/// struct ForumScreen {
///     handle: ViewModelHandle<Topic>,
/// }
///
/// // 2. Implement ResourceScreen
/// impl ResourceScreen<Topic> for ForumScreen {
///     fn handle(&self) -> &ViewModelHandle<Topic> {
///         &self.handle
///     }
/// }
///
/// // 3. Usage
/// #[tokio::main]
/// async fn main() {
///     let mock = MockSource::<Topic>::new();
///     mock.expect_list().return_ok(vec![Topic { id: 1 }]);
///
///     let screen = ForumScreen {
///         handle: ResourceViewModel::spawn(mock.repository(), (), Default::default()),
///     };
///     // refresh() and watch_items() are provided automatically!
///     let mut items = screen.watch_items();
///     screen.refresh().await;
///     items.wait_for(Resource::is_success).await.unwrap();
///     assert_eq!(screen.items(), Resource::success(vec![Topic { id: 1 }]));
/// }
/// ```
#[async_trait]
pub trait ResourceScreen<T: RemoteEntity>: Send + Sync {
    /// Access the inner generic handle.
    fn handle(&self) -> &ViewModelHandle<T>;

    /// Load the list again.
    #[tracing::instrument(skip(self))]
    async fn refresh(&self) {
        tracing::debug!("Sending request");
        self.handle().load(Query::List).await;
    }

    /// The retry affordance of a failed list.
    #[tracing::instrument(skip(self))]
    async fn retry(&self) {
        tracing::debug!("Sending request");
        self.handle().retry(Query::List).await;
    }

    /// Clear a slot once its outcome has been shown.
    async fn acknowledge(&self, slot: SlotKey) {
        self.handle().reset(slot).await;
    }

    fn items(&self) -> Resource<Vec<T>> {
        self.handle().list()
    }

    fn watch_items(&self) -> Watcher<Resource<Vec<T>>> {
        self.handle().watch_list()
    }

    /// Runs `render` against the current list presentation.
    fn render_items<R>(&self, render: impl FnOnce(Presentation<'_, Vec<T>>) -> R) -> R
    where
        Self: Sized,
    {
        let items = self.items();
        render(items.present())
    }
}
