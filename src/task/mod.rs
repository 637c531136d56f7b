//! Kanban task board.
//!
//! Tasks move through four status columns (`todo`, `waiting`,
//! `in-progress`, `done`). Status changes are applied optimistically and
//! rolled back when persistence fails; every other mutation waits for the
//! gateway. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
