//! # Rendering Contract
//!
//! Screens switch exhaustively over a [`Presentation`], never over the raw `Resource`, so
//! the "loaded but empty" case cannot be confused with "not loaded yet".
//!
//! | Resource            | Presentation        |
//! |---------------------|---------------------|
//! | `Idle`              | `Neutral`           |
//! | `Loading`           | `Progress`          |
//! | `Success(empty)`    | `NoItems`           |
//! | `Success(data)`     | `Content(&data)`    |
//! | `Failure(message)`  | `Error { message }` (with a retry affordance) |

use crate::resource::Resource;

/// What a screen should show for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation<'a, T> {
    Neutral,
    Progress,
    Content(&'a T),
    NoItems,
    Error { message: &'a str },
}

impl<'a, T> Presentation<'a, T> {
    /// Whether the screen should offer a retry.
    pub fn offers_retry(&self) -> bool {
        matches!(self, Presentation::Error { .. })
    }
}

/// Payloads that can be empty.
pub trait Collection {
    fn is_empty(&self) -> bool;
}

impl<T> Collection for Vec<T> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

impl<T> Resource<T> {
    /// Presentation with a caller-supplied emptiness test.
    pub fn present_with(&self, is_empty: impl FnOnce(&T) -> bool) -> Presentation<'_, T> {
        match self {
            Resource::Idle => Presentation::Neutral,
            Resource::Loading => Presentation::Progress,
            Resource::Success(data) => {
                if is_empty(data) {
                    Presentation::NoItems
                } else {
                    Presentation::Content(data)
                }
            }
            Resource::Failure(message) => Presentation::Error { message },
        }
    }

    /// Presentation of a single record; a record is never "no items".
    pub fn present_item(&self) -> Presentation<'_, T> {
        self.present_with(|_| false)
    }
}

impl<T: Collection> Resource<T> {
    pub fn present(&self) -> Presentation<'_, T> {
        self.present_with(Collection::is_empty)
    }
}
