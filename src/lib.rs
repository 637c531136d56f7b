//! Taskboard: a role-aware kanban task board engine.
//!
//! The crate loads tasks from a REST backend, arranges them in paginated
//! status columns, and applies mutations with optimistic status changes and
//! snapshot rollback.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and notification
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory, tracing)
//!
//! # Modules
//!
//! - [`task`]: Task model, board services and adapters
//! - [`config`]: Environment-driven board configuration
//! - [`telemetry`]: Tracing subscriber setup

pub mod config;
pub mod task;
pub mod telemetry;
