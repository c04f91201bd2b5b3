//! # Observability & Tracing
//!
//! The framework and the app log through `tracing` with structured fields; this module
//! installs the subscriber that prints them.
//!
//! - **Repository**: one `debug` line per call (`entity_type`, `id`, payload) and a
//!   `warn` line with the error text when a call fails.
//! - **Slots**: `Loading`, `Settled`, `Set` and `Reset` transitions with `slot` and
//!   `generation`, plus the results dropped by the race policy or a reset.
//! - **View-model**: start/stop (with the number of abandoned calls) and every trigger.
//! - **Document store**: `Created`, `Updated`, `Deleted`, `Action ok` with the record id
//!   and the collection size.
//! - **App**: one span per demo step (`publish`, `favorite`, `comments`, `profile`) and
//!   the screens' `#[instrument]` spans.
//!
//! ## Usage Examples
//!
//! ```bash
//! # Lifecycle and store writes only
//! RUST_LOG=info cargo run -p tutorial-app
//!
//! # Every slot transition
//! RUST_LOG=debug cargo run -p tutorial-app
//!
//! # Only the framework
//! RUST_LOG=resource_framework=debug cargo run -p tutorial-app
//! ```
//!
//! **With `RUST_LOG=debug`**, the tutorial list reload after a publish reads:
//!
//! ```text
//! DEBUG publish:publish: Sending request
//! DEBUG publish: Settled slot="created" generation=1 state="success"
//! DEBUG publish: Loading slot="list" generation=1
//! DEBUG publish: Settled slot="list" generation=1 state="success"
//! ```

/// Installs the global `tracing` subscriber.
///
/// Filtering comes from `RUST_LOG`. The format is compact and hides the module path
/// (`with_target(false)`); `entity_type` and `slot` fields say where a line comes from.
/// A second call keeps the subscriber installed by the first.
pub fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_is_idempotent() {
        setup_tracing();
        setup_tracing();
        assert!(tracing::dispatcher::has_been_set());
    }
}
