use super::{entity_id, TutorialId, UserId};
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Comments.
    CommentId,
    "comment"
);

/// A comment left under a tutorial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub tutorial_id: TutorialId,
    pub author: UserId,
    pub text: String,
}

/// Payload for posting a new comment.
#[derive(Debug, Clone, Serialize)]
pub struct CommentCreate {
    pub tutorial_id: TutorialId,
    pub author: UserId,
    pub text: String,
}

/// Payload for editing a comment.
#[derive(Debug, Clone, Serialize)]
pub struct CommentUpdate {
    pub text: String,
}
