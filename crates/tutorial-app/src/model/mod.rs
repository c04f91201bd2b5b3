//! Pure data structures (DTOs) implementing the [`RemoteEntity`](resource_framework::RemoteEntity) trait.
//!
//! Every entity has a string identifier newtype. Records created by the in-process
//! document store get sequential ids (`tutorial_1`, `comment_3`, …); records read from
//! a REST backend keep whatever id the backend sent.

pub mod comment;
pub mod notification;
pub mod tutorial;
pub mod user;

pub use comment::*;
pub use notification::*;
pub use tutorial::*;
pub use user::*;

/// Declares a transparent string id with `From<u32>` for store-assigned ids.
macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(format!("{}_{}", $prefix, id))
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

pub(crate) use entity_id;
