use async_trait::async_trait;

use crate::events::{Listener, TeamEvent};

/// Emits team events as tracing events.
///
/// Requires the `tracing` feature to be enabled.
///
/// # Example
///
/// ```rust,ignore
/// use roster::register_event_listeners;
/// use roster::events::listeners::TracingListener;
///
/// register_event_listeners(|registry| {
///     registry.listen(TracingListener);
/// });
/// ```
pub struct TracingListener;

#[async_trait]
impl Listener for TracingListener {
    async fn handle(&self, event: &TeamEvent) {
        tracing::info!(
            target: "roster::events",
            event_name = event.name(),
            ?event,
            "team event"
        );
    }
}
