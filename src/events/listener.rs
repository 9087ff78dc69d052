use async_trait::async_trait;

use super::AuthEvent;

/// Trait for handling audit events asynchronously.
///
/// Listeners can perform any async work: logging, notifications,
/// metrics. Filter by matching on the event variant.
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Handle an audit event. Called once for every dispatched event.
    async fn handle(&self, event: &AuthEvent);
}
