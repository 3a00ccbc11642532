//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod queue;
mod repository;

pub use queue::{NotificationPublisher, OutboundMessage, QueueError};
pub use repository::{EntityDirectory, NotificationStore, RawNotificationLog};
