//! Application services for the task board.
//!
//! The [`TaskStore`] owns the loaded collection; the [`MutationController`]
//! applies changes to it and to the gateway; the [`TaskBoard`] ties both to
//! a role, a session and the view state.

mod board;
mod hierarchy;
mod mutation;
mod paginator;
mod session;
mod store;

pub use board::{
    BoardAction, BoardCapabilities, BoardRole, BoardScope, ColumnView, LoadState, TaskBoard,
};
pub use hierarchy::HierarchyResolver;
pub use mutation::{MutationController, MutationError, MutationResult, StatusChange};
pub use paginator::{ColumnCursors, ColumnPaginator, CursorMode, PAGE_SIZE, PageNumber};
pub use session::SessionToken;
pub use store::{TaskSnapshot, TaskStore};
