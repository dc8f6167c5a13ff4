//! Live feed subscription handle.
//!
//! A [`Subscription`] is the receiving end of one account-scoped change feed.
//! Teardown happens exactly once: either through an explicit [`close`], or as
//! a drop guard when the handle goes out of scope.
//!
//! [`close`]: Subscription::close

use tokio::sync::mpsc;

use crate::types::change::ChangeEvent;

/// One standing change-feed subscription.
///
/// Events arrive over an internal channel fed by the backend implementation.
/// The handle owns the backend-side registration; dropping it unsubscribes.
pub struct Subscription {
    events: mpsc::UnboundedReceiver<ChangeEvent>,
    canceller: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Builds a subscription from its event channel and the action that
    /// releases the backend-side registration.
    pub fn new(
        events: mpsc::UnboundedReceiver<ChangeEvent>,
        canceller: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self {
            events,
            canceller: Some(Box::new(canceller)),
        }
    }

    /// Waits for the next event. Returns `None` once the feed has been
    /// closed and all buffered events were drained.
    pub async fn next_event(&mut self) -> Option<ChangeEvent> {
        self.events.recv().await
    }

    /// Returns the next buffered event without waiting, if any.
    pub fn try_next(&mut self) -> Option<ChangeEvent> {
        self.events.try_recv().ok()
    }

    /// Explicitly unsubscribes. Buffered events are discarded.
    pub fn close(mut self) {
        self.cancel();
    }

    fn cancel(&mut self) {
        if let Some(canceller) = self.canceller.take() {
            canceller();
        }
        self.events.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}
