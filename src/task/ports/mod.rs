//! Port contracts for the task board.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod gateway;
pub mod notifier;

pub use gateway::{GatewayError, GatewayResult, TaskGateway, UserTasks};
pub use notifier::{Notification, NotificationLevel, Notifier};

#[cfg(test)]
pub use gateway::MockTaskGateway;
