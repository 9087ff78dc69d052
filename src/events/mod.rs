//! Audit events for authentication activity.
//!
//! Events are fired from actions and the session manager. If no
//! listeners are registered, dispatch is a no-op. Register listeners
//! once at startup:
//!
//! ```rust,ignore
//! use mandate::register_event_listeners;
//! use mandate::events::listeners::LoggingListener;
//!
//! register_event_listeners(|registry| {
//!     registry.listen(LoggingListener::new());
//! });
//! ```
//!
//! Custom listeners implement the [`Listener`] trait:
//!
//! ```rust,ignore
//! use mandate::events::{AuthEvent, Listener};
//! use async_trait::async_trait;
//!
//! struct MetricsListener;
//!
//! #[async_trait]
//! impl Listener for MetricsListener {
//!     async fn handle(&self, event: &AuthEvent) {
//!         if let AuthEvent::SignInFailed { .. } = event {
//!             // increment a failure counter
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::AuthEvent;
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners};
