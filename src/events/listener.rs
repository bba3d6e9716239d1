use async_trait::async_trait;

use super::TeamEvent;

/// Trait for handling team events asynchronously.
///
/// Implement this trait to create custom event listeners. Listeners can
/// perform any async operation: logging, sending notifications, updating
/// metrics, etc.
///
/// # Example
///
/// ```rust,ignore
/// use roster::events::{TeamEvent, Listener};
/// use async_trait::async_trait;
///
/// struct InviteEmailListener {
///     mailer_url: String,
/// }
///
/// #[async_trait]
/// impl Listener for InviteEmailListener {
///     async fn handle(&self, event: &TeamEvent) {
///         if let TeamEvent::MemberInvited { email, .. } = event {
///             // send the invitation email
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Handle a team event.
    ///
    /// This method is called for every event dispatched. Filter by matching
    /// on the event variant to handle specific events.
    async fn handle(&self, event: &TeamEvent);
}
