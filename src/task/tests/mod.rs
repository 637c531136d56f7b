//! Unit tests for the task board.
//!
//! Tests are organised by component: domain values, the status machine,
//! the store and its derived views, mutations, the board and the wire
//! format.

mod http_tests;
mod state_transition_tests;
