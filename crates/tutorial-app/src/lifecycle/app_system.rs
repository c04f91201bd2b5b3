use crate::config::{AppConfig, BackendConfig, ConfigError};
use crate::context::AppContext;
use crate::http::HttpSource;
use crate::model::{Comment, Notification, Tutorial, TutorialId, User, UserId};
use crate::screens::{CommentScreen, NotificationScreen, ProfileScreen, TutorialScreen};
use crate::{comments, notifications, tutorials, users};
use resource_framework::{
    ResourceRepository, ResourceViewModel, ViewModelHandle, ViewModelOptions, WeakViewModelHandle,
};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{info, warn};

/// Errors raised while starting or stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Task failed during shutdown: {0}")]
    Join(#[from] JoinError),
}

/// One repository per entity, over whichever backend the config selects.
pub struct Repositories {
    pub tutorials: ResourceRepository<Tutorial>,
    pub comments: ResourceRepository<Comment>,
    pub users: ResourceRepository<User>,
    pub notifications: ResourceRepository<Notification>,
}

impl Repositories {
    /// In-process document stores; their tasks are pushed onto `handles`.
    fn in_memory(capacity: usize, handles: &mut Vec<JoinHandle<()>>) -> Self {
        let (tutorial_store, tutorials) = tutorials::new(capacity);
        let (comment_store, comments) = comments::new(capacity);
        let (user_store, users) = users::new(capacity);
        let (notification_store, notifications) = notifications::new(capacity);

        handles.push(tokio::spawn(tutorial_store.run()));
        handles.push(tokio::spawn(comment_store.run()));
        handles.push(tokio::spawn(user_store.run()));
        handles.push(tokio::spawn(notification_store.run()));

        Self {
            tutorials,
            comments,
            users,
            notifications,
        }
    }

    fn http(base_url: &str, timeout: Duration) -> Result<Self, SystemError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let tutorial_source = Arc::new(HttpSource::<Tutorial>::new(client.clone(), base_url));

        Ok(Self {
            tutorials: ResourceRepository::new(tutorial_source.clone())
                .with_favorites(tutorial_source),
            comments: ResourceRepository::new(Arc::new(HttpSource::<Comment>::new(
                client.clone(),
                base_url,
            ))),
            users: ResourceRepository::new(Arc::new(HttpSource::<User>::new(
                client.clone(),
                base_url,
            ))),
            notifications: ResourceRepository::new(Arc::new(HttpSource::<Notification>::new(
                client, base_url,
            ))),
        })
    }
}

/// The running application.
///
/// `AppSystem` is responsible for:
/// - **Lifecycle Management**: starting the stores and view-models, stopping them
/// - **Wiring**: handing each screen a view-model over the right repository
/// - **Context**: owning the [`AppContext`] every screen shares
pub struct AppSystem {
    /// Shared user settings.
    pub context: AppContext,

    /// The tutorial list and detail screen.
    pub tutorials: TutorialScreen,

    /// The notification inbox.
    pub notifications: NotificationScreen,

    config: AppConfig,
    repositories: Repositories,
    tutorial_handle: ViewModelHandle<Tutorial>,
    notification_handle: ViewModelHandle<Notification>,
    comment_handles: Vec<WeakViewModelHandle<Comment>>,
    profile_handles: Vec<WeakViewModelHandle<User>>,

    /// Store tasks (in-memory backend only).
    handles: Vec<JoinHandle<()>>,
}

impl AppSystem {
    /// Builds the backend and spawns the long-lived screens.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &AppConfig) -> Result<Self, SystemError> {
        let mut handles = Vec::new();
        let repositories = match &config.backend {
            BackendConfig::InMemory => {
                Repositories::in_memory(config.channel_capacity, &mut handles)
            }
            BackendConfig::Http {
                base_url,
                timeout_secs,
            } => Repositories::http(base_url, Duration::from_secs(*timeout_secs))?,
        };
        info!(backend = ?config.backend, policy = ?config.race_policy, "Starting app system");

        let context = AppContext::new(config.settings.clone());

        let tutorial_handle = ResourceViewModel::spawn(
            repositories.tutorials.clone(),
            (),
            config.view_model_options(false),
        );
        let notification_handle = ResourceViewModel::spawn(
            repositories.notifications.clone(),
            None,
            config.view_model_options(config.eager_notifications),
        );

        Ok(Self {
            tutorials: TutorialScreen::new(tutorial_handle.clone()),
            notifications: NotificationScreen::new(notification_handle.clone(), context.clone()),
            context,
            config: config.clone(),
            repositories,
            tutorial_handle,
            notification_handle,
            comment_handles: Vec::new(),
            profile_handles: Vec::new(),
            handles,
        })
    }

    /// A comment screen for one tutorial, with its own view-model.
    ///
    /// The view-model stops when the last clone of the screen is dropped.
    pub fn comments_for(&mut self, tutorial_id: TutorialId) -> CommentScreen {
        info!(%tutorial_id, "Opening comment screen");
        let handle = ResourceViewModel::spawn(
            self.repositories.comments.clone(),
            Some(tutorial_id.clone()),
            self.config.view_model_options(false),
        );
        self.comment_handles.retain(|weak| !weak.is_released());
        self.comment_handles.push(handle.downgrade());
        CommentScreen::new(handle, tutorial_id)
    }

    /// A profile screen for one user, with its own view-model.
    ///
    /// A saved profile reloads the profile itself, not the user list.
    pub fn profile_for(&mut self, user_id: UserId) -> ProfileScreen {
        info!(%user_id, "Opening profile screen");
        let options = ViewModelOptions {
            reload_list: false,
            ..self.config.view_model_options(false)
        };
        let handle = ResourceViewModel::spawn(self.repositories.users.clone(), (), options);
        self.profile_handles.retain(|weak| !weak.is_released());
        self.profile_handles.push(handle.downgrade());
        ProfileScreen::new(handle, user_id)
    }

    /// Comment and profile screens still held by a caller.
    pub fn open_screens(&self) -> usize {
        let comments = self.comment_handles.iter().filter(|w| !w.is_released()).count();
        let profiles = self.profile_handles.iter().filter(|w| !w.is_released()).count();
        comments + profiles
    }

    /// Direct repository access, for flows without a screen (e.g. registration).
    pub fn repositories(&self) -> &Repositories {
        &self.repositories
    }

    /// Stops every view-model, then waits for the stores to drain.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down app system");

        self.tutorial_handle.shutdown().await;
        self.notification_handle.shutdown().await;
        for handle in &self.comment_handles {
            handle.shutdown().await;
        }
        for handle in &self.profile_handles {
            handle.shutdown().await;
        }

        // The view-models release their repositories as they stop; ours go here.
        drop(self.repositories);

        for handle in self.handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Store task failed");
                return Err(e.into());
            }
        }

        info!("App system stopped");
        Ok(())
    }
}
