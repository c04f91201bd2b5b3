//! RemoteEntity trait implementation for the User domain type.

use super::error::UserError;
use crate::model::{User, UserCreate, UserId, UserUpdate};
use resource_framework::RemoteEntity;

fn validate_email(email: &str) -> Result<(), UserError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(UserError::InvalidEmail(email.to_string())),
    }
}

impl RemoteEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = UserUpdate;
    type Filter = ();
    type Action = ();
    type ActionResult = ();
    type Error = UserError;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, Self::Error> {
        if params.name.trim().is_empty() {
            return Err(UserError::EmptyName);
        }
        validate_email(&params.email)?;
        let mut user = User::new(params.name, params.email);
        user.id = id;
        Ok(user)
    }

    /// Handles profile edits.
    ///
    /// # Fields Updated
    /// - `name`: must stay non-empty
    /// - `email`: must look like an address
    /// - `bio`: free text
    fn on_update(&mut self, update: UserUpdate) -> Result<(), Self::Error> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(UserError::EmptyName);
            }
        }
        if let Some(email) = &update.email {
            validate_email(email)?;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(bio) = update.bio {
            self.bio = bio;
        }
        Ok(())
    }

    fn handle_action(&mut self, _: ()) -> Result<(), Self::Error> {
        Ok(())
    }
}
