use resource_framework::{
    DocumentStore, FavoriteSource, Query, RemoteEntity, RemoteError, Resource, ResourceRepository,
    ResourceViewModel, SlotKey, StoreClient,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct SimpleTopic {
    id: u32,
    title: String,
    pinned: bool,
}

#[derive(Debug)]
struct SimpleTopicCreate {
    title: String,
}

#[derive(Debug)]
struct SimpleTopicUpdate {
    title: Option<String>,
}

#[derive(Debug)]
enum TopicAction {
    IsPinned,
    SetPinned(bool),
}

#[derive(Debug, thiserror::Error)]
#[error("Simple topic error")]
struct SimpleTopicError;

impl RemoteEntity for SimpleTopic {
    type Id = u32;
    type Create = SimpleTopicCreate;
    type Update = SimpleTopicUpdate;
    type Filter = ();
    type Action = TopicAction;
    type ActionResult = bool;
    type Error = SimpleTopicError;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn from_create_params(id: u32, params: SimpleTopicCreate) -> Result<Self, Self::Error> {
        if params.title.is_empty() {
            return Err(SimpleTopicError);
        }
        Ok(Self {
            id,
            title: params.title,
            pinned: false,
        })
    }

    fn on_update(&mut self, update: SimpleTopicUpdate) -> Result<(), Self::Error> {
        if let Some(title) = update.title {
            self.title = title;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: TopicAction) -> Result<bool, Self::Error> {
        match action {
            TopicAction::IsPinned => Ok(self.pinned),
            TopicAction::SetPinned(pinned) => {
                self.pinned = pinned;
                Ok(pinned)
            }
        }
    }
}

/// Pinned topics play the part of favorites.
struct PinnedTopics(StoreClient<SimpleTopic>);

#[async_trait]
impl FavoriteSource<SimpleTopic> for PinnedTopics {
    async fn is_favorite(&self, id: &u32) -> Result<bool, RemoteError> {
        Ok(self.0.perform_action(*id, TopicAction::IsPinned).await?)
    }

    async fn add_favorite(&self, id: &u32) -> Result<(), RemoteError> {
        self.0.perform_action(*id, TopicAction::SetPinned(true)).await?;
        Ok(())
    }

    async fn remove_favorite(&self, id: &u32) -> Result<(), RemoteError> {
        self.0.perform_action(*id, TopicAction::SetPinned(false)).await?;
        Ok(())
    }
}

fn spawn_repository() -> ResourceRepository<SimpleTopic> {
    let (store, client) = DocumentStore::new(10);
    tokio::spawn(store.run());
    ResourceRepository::new(Arc::new(client.clone())).with_favorites(Arc::new(PinnedTopics(client)))
}

async fn until<U: Clone>(
    watcher: &mut resource_framework::Watcher<Resource<U>>,
    done: impl FnMut(&Resource<U>) -> bool,
) -> Resource<U> {
    tokio::time::timeout(Duration::from_secs(2), watcher.wait_for(done))
        .await
        .expect("timed out waiting for slot")
        .expect("view-model stopped")
        .clone()
}

// --- Test ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let handle = ResourceViewModel::spawn(spawn_repository(), (), Default::default());
    let mut list = handle.watch_list();
    let mut created = handle.watch_created();
    let mut updated = handle.watch_updated();
    let mut deleted = handle.watch_deleted();

    // 1. Load an empty collection
    handle.load(Query::List).await;
    assert_eq!(until(&mut list, Resource::is_terminal).await, Resource::success(vec![]));

    // 2. Create, which reloads the list
    handle
        .create(SimpleTopicCreate {
            title: "Lifetimes".into(),
        })
        .await;
    let topic = until(&mut created, Resource::is_terminal)
        .await
        .into_data()
        .unwrap();
    assert_eq!(topic.id, 1);
    until(&mut list, |r| r.data().is_some_and(|items| items.len() == 1)).await;

    // 3. Update
    handle
        .update(
            topic.id,
            SimpleTopicUpdate {
                title: Some("Borrowing".into()),
            },
        )
        .await;
    let renamed = until(&mut updated, Resource::is_terminal).await;
    assert_eq!(renamed.data().map(|t| t.title.as_str()), Some("Borrowing"));
    until(&mut list, |r| {
        r.data()
            .is_some_and(|items| items.iter().any(|t| t.title == "Borrowing"))
    })
    .await;

    // 4. Pin it through the favorite toggle
    let mut pinned = handle.watch_favorite(topic.id).await.unwrap();
    handle.check_favorite(topic.id).await;
    assert_eq!(until(&mut pinned, Resource::is_terminal).await, Resource::success(false));
    handle.toggle_favorite(topic.id).await;
    assert_eq!(
        until(&mut pinned, |r| *r == Resource::success(true)).await,
        Resource::success(true)
    );

    // 5. Delete, which empties the list again
    handle.delete(topic.id).await;
    assert_eq!(until(&mut deleted, Resource::is_terminal).await, Resource::success(()));
    until(&mut list, |r| r.data().is_some_and(|items| items.is_empty())).await;

    // 6. Deleting twice surfaces the backend's 404
    handle.reset(SlotKey::Deleted).await;
    until(&mut deleted, Resource::is_idle).await;
    handle.delete(topic.id).await;
    assert_eq!(
        until(&mut deleted, Resource::is_terminal).await,
        Resource::failure("Error 404: Not Found")
    );

    handle.shutdown().await;
}

#[tokio::test]
async fn test_rejected_create_is_an_exception() {
    let handle = ResourceViewModel::spawn(spawn_repository(), (), Default::default());
    let mut created = handle.watch_created();

    handle
        .create(SimpleTopicCreate {
            title: String::new(),
        })
        .await;
    assert_eq!(
        until(&mut created, Resource::is_terminal).await,
        Resource::failure("Exception: Entity error: Simple topic error")
    );
    assert!(handle.list().is_idle());
}

#[tokio::test]
async fn test_dropping_every_handle_stops_the_view_model() {
    let (view_model, handle) =
        ResourceViewModel::new(spawn_repository(), (), Default::default());
    let task = tokio::spawn(view_model.run());

    drop(handle);
    tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .expect("view-model kept running")
        .unwrap();
}

#[tokio::test]
async fn test_weak_handle_does_not_keep_the_view_model_alive() {
    let (view_model, handle) =
        ResourceViewModel::new(spawn_repository(), (), Default::default());
    let task = tokio::spawn(view_model.run());
    let weak = handle.downgrade();
    assert!(!weak.is_released());

    drop(handle);
    assert!(weak.is_released());
    tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .expect("view-model kept running")
        .unwrap();

    // Stopping a released view-model is a no-op.
    weak.shutdown().await;
}

#[tokio::test]
async fn test_weak_handle_stops_a_held_view_model() {
    let (view_model, handle) =
        ResourceViewModel::new(spawn_repository(), (), Default::default());
    let task = tokio::spawn(view_model.run());

    handle.downgrade().shutdown().await;
    tokio::time::timeout(Duration::from_secs(2), task)
        .await
        .expect("view-model kept running")
        .unwrap();
    assert!(handle.is_closed());
}
