//! RemoteEntity trait implementation for the Comment domain type.
//!
//! Comment lists are always requested per tutorial, through [`Comment::matches`].

use super::error::CommentError;
use crate::model::{Comment, CommentCreate, CommentId, CommentUpdate, TutorialId};
use resource_framework::RemoteEntity;

/// Longest comment accepted by the store.
pub const MAX_COMMENT_LEN: usize = 2_000;

fn validate(text: &str) -> Result<(), CommentError> {
    if text.trim().is_empty() {
        return Err(CommentError::EmptyText);
    }
    if text.chars().count() > MAX_COMMENT_LEN {
        return Err(CommentError::TooLong {
            max: MAX_COMMENT_LEN,
        });
    }
    Ok(())
}

impl RemoteEntity for Comment {
    type Id = CommentId;
    type Create = CommentCreate;
    type Update = CommentUpdate;
    /// The tutorial whose comments are listed; `None` lists every comment.
    type Filter = Option<TutorialId>;
    type Action = ();
    type ActionResult = ();
    type Error = CommentError;

    fn id(&self) -> &CommentId {
        &self.id
    }

    fn from_create_params(id: CommentId, params: CommentCreate) -> Result<Self, Self::Error> {
        validate(&params.text)?;
        Ok(Self {
            id,
            tutorial_id: params.tutorial_id,
            author: params.author,
            text: params.text,
        })
    }

    fn on_update(&mut self, update: CommentUpdate) -> Result<(), Self::Error> {
        validate(&update.text)?;
        self.text = update.text;
        Ok(())
    }

    fn matches(&self, filter: &Option<TutorialId>) -> bool {
        filter
            .as_ref()
            .map_or(true, |tutorial_id| &self.tutorial_id == tutorial_id)
    }

    fn handle_action(&mut self, _: ()) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_only_its_tutorial() {
        let comment = Comment {
            id: "c1".into(),
            tutorial_id: "t1".into(),
            author: "user_1".into(),
            text: "nice".into(),
        };
        assert!(comment.matches(&None));
        assert!(comment.matches(&Some("t1".into())));
        assert!(!comment.matches(&Some("t2".into())));
    }

    #[test]
    fn test_text_validation() {
        assert_eq!(validate(" "), Err(CommentError::EmptyText));
        let long = "x".repeat(MAX_COMMENT_LEN + 1);
        assert_eq!(
            validate(&long),
            Err(CommentError::TooLong {
                max: MAX_COMMENT_LEN
            })
        );
        assert!(validate("fine").is_ok());
    }
}
