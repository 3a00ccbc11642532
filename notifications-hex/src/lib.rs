//! # Notifications Hex
//!
//! Application service layer and inbound adapters for the notification
//! pipeline.
//!
//! ## Architecture
//!
//! - `service/` - Application service (raw log, classify, resolve, dispatch, forward)
//! - `dispatch/` - Category dispatchers and pure transform functions
//! - `resolver/` - Customer ID to internal entity resolution
//! - `inbound/` - RabbitMQ consumer and health endpoint
//!
//! The service is generic over the repository and publisher ports, allowing
//! different adapters to be injected.

pub mod dispatch;
pub mod inbound;
pub mod resolver;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::NotificationService;
