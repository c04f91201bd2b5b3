//! # Tutorial App Library
//!
//! The screens of a tutorial-sharing app, built on `resource-framework`. This library
//! exposes the application modules for `main` and for integration testing.
//!
//! - **[model]**: the records (tutorials, comments, users, notifications)
//! - **[tutorials]**, **[comments]**, **[users]**, **[notifications]**: entity rules and
//!   in-memory repository factories
//! - **[http]**: the REST backend
//! - **[screens]**: domain-named screen clients
//! - **[config]** and **[context]**: configuration file and shared settings
//! - **[lifecycle]**: the [`AppSystem`](lifecycle::AppSystem) wiring it all together

pub mod comments;
pub mod config;
pub mod context;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod notifications;
pub mod screens;
pub mod tutorials;
pub mod users;
