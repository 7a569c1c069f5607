use crate::domain::model::Vote;
use crate::domain::ports::VoteListener;

/// Ordered collection of vote listeners. Registration happens before startup;
/// during dispatch the list is read-only and shared across connection tasks.
#[derive(Default)]
pub struct ListenerRegistry {
    listeners: Vec<Box<dyn VoteListener>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a listener. Duplicates are allowed: two listeners may share a
    /// display name and each still gets its own delivery.
    pub fn register(&mut self, listener: Box<dyn VoteListener>) {
        tracing::debug!("Registered vote listener: {}", listener.name());
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Delivers `vote` to every listener in registration order. A failing
    /// listener is logged and skipped over; it never hides the vote from the
    /// listeners after it and never fails the connection that triggered the
    /// dispatch.
    pub async fn dispatch(&self, vote: &Vote) {
        for listener in &self.listeners {
            if let Err(e) = listener.on_vote(vote).await {
                tracing::warn!(
                    "Error caught while sending vote to '{}': {}",
                    listener.name(),
                    e
                );
            }
        }
    }
}
