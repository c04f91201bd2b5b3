//! # System Lifecycle & Orchestration
//!
//! This module builds the running application: one backend source per entity, one
//! view-model task per screen, and the shared [`AppContext`](crate::context::AppContext).
//!
//! ## The AppSystem Pattern
//!
//! ```rust,ignore
//! let config = AppConfig::from_env()?;
//! let mut system = AppSystem::new(&config)?;
//!
//! system.tutorials.refresh().await;
//! let comments = system.comments_for("tutorial_1".into());
//! comments.refresh().await;
//!
//! system.shutdown().await?;
//! ```
//!
//! 1. **Sources** - for `in_memory`, one [`DocumentStore`](resource_framework::DocumentStore)
//!    task per entity; for `http`, one shared `reqwest::Client`
//! 2. **Screens** - the tutorial and notification screens exist for the whole run; comment
//!    and profile screens are created on demand, each with its own view-model
//! 3. **Shutdown** - every view-model is told to stop (abandoning its in-flight calls),
//!    the system drops its repositories, and the store tasks end once their last client
//!    is gone
//!
//! ## Graceful Shutdown
//!
//! Screens handed out by the system may outlive it. Their handles stay valid but every
//! trigger is dropped with a warning once the view-model has stopped.
//!
//! The system only keeps weak handles to comment and profile view-models. Dropping the
//! last clone of such a screen stops its view-model right away instead of at shutdown.
//!
//! ## Logging
//!
//! [`setup_tracing`] installs the subscriber; see the [`tracing`](self::tracing) module.

pub mod app_system;
pub mod tracing;

pub use app_system::*;
pub use self::tracing::setup_tracing;
