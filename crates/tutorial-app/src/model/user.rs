use super::entity_id;
use serde::{Deserialize, Serialize};

entity_id!(
    /// Type-safe identifier for Users.
    UserId,
    "user"
);

/// A registered user, as shown on the profile screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
}

/// Payload for registering a user.
#[derive(Debug, Clone, Serialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
}

/// Payload for editing a profile.
/// DTOs for User updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl User {
    /// Creates a new User instance.
    ///
    /// # Arguments
    /// * `name` - User's display name
    /// * `email` - User's email address
    ///
    /// # Notes
    /// The `id` field is initialized as an empty string and will be set by the backend.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId(String::new()),
            name: name.into(),
            email: email.into(),
            bio: String::new(),
        }
    }
}
