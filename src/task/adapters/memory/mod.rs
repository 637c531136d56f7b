//! In-memory adapters used by tests and offline sessions.

mod gateway;
mod notifier;

pub use gateway::{GatewayOperation, InMemoryTaskGateway};
pub use notifier::RecordingNotifier;
