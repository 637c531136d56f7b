//! Adapter implementations of the task board ports.

pub mod http;
pub mod memory;
pub mod tracing_notifier;
