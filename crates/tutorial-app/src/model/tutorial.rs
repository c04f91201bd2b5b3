use super::{entity_id, UserId};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Tutorials.
    TutorialId,
    "tutorial"
);

/// A published tutorial.
///
/// # Resource Framework
/// This struct implements the [`RemoteEntity`](resource_framework::RemoteEntity) trait,
/// so one generic repository and view-model serve the tutorial screen.
///
/// See [`impl RemoteEntity for Tutorial`](#impl-RemoteEntity-for-Tutorial) for details on:
/// - Creation parameters ([`TutorialCreate`])
/// - Update parameters ([`TutorialUpdate`])
/// - Favorite actions ([`TutorialAction`](crate::tutorials::TutorialAction))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: TutorialId,
    pub title: String,
    pub body: String,
    pub author: UserId,
    /// Kept by the document store only; REST backends serve favorites separately.
    #[serde(default, skip_serializing)]
    pub favorite: bool,
}

/// Payload for creating a new tutorial.
#[derive(Debug, Clone, Serialize)]
pub struct TutorialCreate {
    pub title: String,
    pub body: String,
    pub author: UserId,
}

/// Payload for updating an existing tutorial.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TutorialUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Tutorial {
    /// Creates a new Tutorial instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (typically set by the backend)
    /// * `title` - Headline shown in the list
    /// * `body` - Full text shown on the detail screen
    /// * `author` - The user who wrote it
    pub fn new(
        id: impl Into<TutorialId>,
        title: impl Into<String>,
        body: impl Into<String>,
        author: impl Into<UserId>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            author: author.into(),
            favorite: false,
        }
    }
}
