//! REST adapter for the task and user endpoints.

mod client;
pub mod wire;

pub use client::HttpTaskGateway;
