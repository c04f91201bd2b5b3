//! # Tutorial App
//!
//! Drives the screens once against the configured backend:
//! 1.  Register a [`User`](tutorial_app::model::User).
//! 2.  Publish a tutorial and load the list.
//! 3.  Favorite it, comment on it, edit the author's profile.
//!
//! Set `TUTORIAL_APP_CONFIG` to a TOML file to pick another backend; see
//! [`tutorial_app::config`]. Set `RUST_LOG=debug` to follow every slot.

use resource_framework::repository::settle;
use resource_framework::{Presentation, Resource, ResourceScreen, Watcher};
use tutorial_app::config::AppConfig;
use tutorial_app::lifecycle::{setup_tracing, AppSystem};
use tutorial_app::model::{TutorialCreate, UserCreate, UserUpdate};
use tracing::{error, info, warn, Instrument};

/// Waits for the next terminal value of a slot.
async fn settled<U: Clone>(watcher: &mut Watcher<Resource<U>>) -> Result<Resource<U>, String> {
    watcher
        .wait_for(Resource::is_terminal)
        .await
        .map(|value| value.clone())
        .map_err(|_| "view-model stopped".to_string())
}

/// Unwraps a success, turning a failure into the error of `main`.
fn require<U>(step: &str, value: Resource<U>) -> Result<U, String> {
    match value {
        Resource::Success(data) => Ok(data),
        other => Err(format!(
            "{step} failed: {}",
            other.message().unwrap_or(other.state())
        )),
    }
}

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    let mut system = AppSystem::new(&config).map_err(|e| e.to_string())?;

    info!("Starting tutorial app");

    // Register the author
    let span = tracing::info_span!("user_registration");
    let author = async {
        info!("Registering author");
        let params = UserCreate {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        require("Registration", settle(system.repositories().users.create(params)).await)
    }
    .instrument(span)
    .await?;

    info!(user_id = %author.id, "Author registered");

    // Publish a tutorial; success reloads the list
    let span = tracing::info_span!("publish");
    let tutorial = async {
        let mut published = system.tutorials.watch_published();
        let mut items = system.tutorials.watch_items();

        system
            .tutorials
            .publish(TutorialCreate {
                title: "Ownership in five minutes".to_string(),
                body: "Every value has exactly one owner.".to_string(),
                author: author.id.clone(),
            })
            .await;
        let tutorial = require("Publishing", settled(&mut published).await?)?;

        items
            .wait_for(|list| list.data().is_some_and(|l| l.iter().any(|t| t.id == tutorial.id)))
            .await
            .map_err(|_| "view-model stopped".to_string())?;
        Ok::<_, String>(tutorial)
    }
    .instrument(span)
    .await?;

    system.tutorials.render_items(|presentation| match presentation {
        Presentation::Content(items) => info!(count = items.len(), "Tutorial list loaded"),
        Presentation::NoItems => info!("No tutorials yet"),
        Presentation::Error { message } => warn!(%message, "Tutorial list failed"),
        Presentation::Neutral | Presentation::Progress => {}
    });

    // Favorite it
    let span = tracing::info_span!("favorite", tutorial_id = %tutorial.id);
    async {
        system.tutorials.check_favorite(tutorial.id.clone()).await;
        let Some(mut flag) = system.tutorials.watch_favorite(tutorial.id.clone()).await else {
            warn!("Favorites are not supported by this backend");
            return;
        };
        if let Ok(Resource::Success(false)) = settled(&mut flag).await {
            // A failed toggle lands in the toggle slot and leaves the flag as it was.
            let mut toggle = system.tutorials.watch_favorite_toggle();
            system.tutorials.toggle_favorite(tutorial.id.clone()).await;
            match settled(&mut toggle).await {
                Ok(Resource::Success(())) => {
                    let favorite = flag.borrow().data().copied().unwrap_or(false);
                    info!(favorite, "Tutorial favorited");
                }
                Ok(other) => warn!(message = ?other.message(), "Favorite toggle failed"),
                Err(e) => error!(error = %e, "Tutorial screen stopped"),
            }
        }
    }
    .instrument(span)
    .await;

    // Comment on it
    let span = tracing::info_span!("comments", tutorial_id = %tutorial.id);
    async {
        let comments = system.comments_for(tutorial.id.clone());
        let mut posted = comments.watch_posted();
        comments
            .post_comment(author.id.clone(), "Short and to the point.")
            .await;
        match settled(&mut posted).await {
            Ok(Resource::Success(comment)) => info!(comment_id = %comment.id, "Comment posted"),
            Ok(other) => warn!(message = ?other.message(), "Comment rejected"),
            Err(e) => error!(error = %e, "Comment screen stopped"),
        }
    }
    .instrument(span)
    .await;

    // Edit the profile
    let span = tracing::info_span!("profile", user_id = %author.id);
    async {
        let profile = system.profile_for(author.id.clone());
        let mut saved = profile.watch_save_result();
        profile.open().await;
        profile
            .save(UserUpdate {
                bio: Some("Writes about Rust.".to_string()),
                ..Default::default()
            })
            .await;
        match settled(&mut saved).await {
            Ok(Resource::Success(user)) => info!(bio = ?user.bio, "Profile saved"),
            Ok(other) => warn!(message = ?other.message(), "Profile save failed"),
            Err(e) => error!(error = %e, "Profile screen stopped"),
        }
    }
    .instrument(span)
    .await;

    match system.notifications.badge() {
        Some(unread) => info!(unread, "Notification badge"),
        None => info!("No notification badge"),
    }

    // Shutdown system gracefully
    system.shutdown().await.map_err(|e| e.to_string())?;

    info!("Application completed successfully");
    Ok(())
}
