//! Screen clients: domain-named wrappers around [`ViewModelHandle`](resource_framework::ViewModelHandle).
//!
//! Each screen implements [`ResourceScreen`](resource_framework::ResourceScreen) and so
//! inherits `refresh`, `retry`, `items` and `watch_items`.

pub mod comment_screen;
pub mod notification_screen;
pub mod profile_screen;
pub mod tutorial_screen;

pub use comment_screen::*;
pub use notification_screen::*;
pub use profile_screen::*;
pub use tutorial_screen::*;
