//! Outbound message queue port.

/// Error type for queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Queue unavailable: {0}")]
    Unavailable(String),

    #[error("Publish rejected: {0}")]
    Rejected(String),
}

/// A single message for the internal outbound queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    /// Messages sharing a group key are delivered in order.
    pub group_id: String,
    pub body: String,
}

/// Port trait for the internal notification queue.
#[async_trait::async_trait]
pub trait NotificationPublisher: Send + Sync + 'static {
    async fn send_messages(&self, messages: Vec<OutboundMessage>) -> Result<(), QueueError>;
}
