//! # Resource Result
//!
//! [`Resource<T>`] models the lifecycle of one remote operation as seen by a screen:
//! nothing requested yet, in flight, finished with data, or finished with an error.
//!
//! Every slot a view-model exposes holds exactly one `Resource` at a time, and every
//! transition replaces the whole value. There is no "stale" or "partial" state.
//!
//! ```rust
//! use resource_framework::Resource;
//!
//! let empty: Resource<Vec<u32>> = Resource::success(vec![]);
//! assert!(empty.is_success());
//! assert_ne!(empty, Resource::loading());
//!
//! let failed: Resource<Vec<u32>> = Resource::failure("Error 404: Not Found");
//! assert_eq!(failed.message(), Some("Error 404: Not Found"));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The outcome of a remote operation at a point in time.
///
/// `Success` always carries data. An empty collection is a valid `Success` and is
/// distinct from `Idle` and `Loading`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum Resource<T> {
    /// No operation has been requested for this stream yet.
    Idle,
    /// An operation is in flight.
    Loading,
    /// The operation completed with a payload.
    Success(T),
    /// The operation completed with a human-readable error message.
    Failure(String),
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Resource::Idle
    }
}

impl<T> Resource<T> {
    pub fn idle() -> Self {
        Resource::Idle
    }

    pub fn loading() -> Self {
        Resource::Loading
    }

    pub fn success(data: T) -> Self {
        Resource::Success(data)
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Resource::Failure(message.into())
    }

    /// Collapses a `Result` into a terminal value, keeping only the error's message.
    pub fn from_result<E: Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Resource::Success(data),
            Err(e) => Resource::Failure(e.to_string()),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Resource::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Resource::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Resource::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Resource::Failure(_))
    }

    /// `true` for `Success` and `Failure`, the values that end one invocation.
    pub fn is_terminal(&self) -> bool {
        self.is_success() || self.is_failure()
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Resource::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Resource::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Resource<&T> {
        match self {
            Resource::Idle => Resource::Idle,
            Resource::Loading => Resource::Loading,
            Resource::Success(data) => Resource::Success(data),
            Resource::Failure(message) => Resource::Failure(message.clone()),
        }
    }

    /// Transforms the payload of a `Success`, leaving every other variant as is.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resource<U> {
        match self {
            Resource::Idle => Resource::Idle,
            Resource::Loading => Resource::Loading,
            Resource::Success(data) => Resource::Success(f(data)),
            Resource::Failure(message) => Resource::Failure(message),
        }
    }

    /// Short variant name used as a structured log field.
    pub fn state(&self) -> &'static str {
        match self {
            Resource::Idle => "idle",
            Resource::Loading => "loading",
            Resource::Success(_) => "success",
            Resource::Failure(_) => "failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        let resource: Resource<String> = Resource::default();
        assert!(resource.is_idle());
        assert!(!resource.is_terminal());
    }

    #[test]
    fn test_empty_success_is_not_loading_or_idle() {
        let empty: Resource<Vec<String>> = Resource::success(Vec::new());
        assert!(empty.is_success());
        assert!(empty.is_terminal());
        assert_ne!(empty, Resource::idle());
        assert_ne!(empty, Resource::loading());
        assert_eq!(empty.data().map(Vec::len), Some(0));
    }

    #[test]
    fn test_from_result_keeps_only_message() {
        let failed: Resource<u32> = Resource::from_result(Err::<u32, _>("Exception: timeout"));
        assert_eq!(failed, Resource::failure("Exception: timeout"));
        assert_eq!(failed.data(), None);

        let ok: Resource<u32> = Resource::from_result(Ok::<_, String>(7));
        assert_eq!(ok.into_data(), Some(7));
    }

    #[test]
    fn test_map_only_touches_success() {
        assert_eq!(Resource::success(2).map(|n| n * 10), Resource::success(20));
        assert_eq!(Resource::<i32>::loading().map(|n| n * 10), Resource::loading());
        assert_eq!(
            Resource::<i32>::failure("boom").map(|n| n * 10),
            Resource::failure("boom")
        );
    }

    #[test]
    fn test_state_names() {
        assert_eq!(Resource::<()>::idle().state(), "idle");
        assert_eq!(Resource::<()>::loading().state(), "loading");
        assert_eq!(Resource::success(()).state(), "success");
        assert_eq!(Resource::<()>::failure("x").state(), "failure");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(Resource::success(vec![1, 2])).unwrap();
        assert_eq!(json, serde_json::json!({ "state": "success", "value": [1, 2] }));

        let idle: Resource<u32> = serde_json::from_str(r#"{ "state": "idle" }"#).unwrap();
        assert!(idle.is_idle());
    }
}
