//! Fixed-size pagination of status columns.

use std::collections::HashMap;

use super::TaskStore;
use crate::task::domain::{Task, TaskDomainError, TaskStatus};

/// Default number of tasks per column page.
pub const PAGE_SIZE: usize = 10;

/// One-based page number.
///
/// Zero is rejected at construction; pages past the end are valid and
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNumber(u32);

impl PageNumber {
    /// The first page.
    pub const FIRST: Self = Self(1);

    /// Creates a validated page number.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidPageNumber`] for zero.
    pub const fn new(value: u32) -> Result<Self, TaskDomainError> {
        if value == 0 {
            return Err(TaskDomainError::InvalidPageNumber(value));
        }
        Ok(Self(value))
    }

    /// Returns the one-based value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Returns the following page.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Returns the preceding page, staying on the first page.
    #[must_use]
    pub const fn previous(self) -> Self {
        if self.0 > 1 { Self(self.0 - 1) } else { Self::FIRST }
    }

    fn offset(self, page_size: usize) -> usize {
        usize::try_from(self.0 - 1)
            .unwrap_or(usize::MAX)
            .saturating_mul(page_size)
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

/// Splits a column's task list into fixed-size pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPaginator {
    page_size: usize,
}

impl Default for ColumnPaginator {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl ColumnPaginator {
    /// Creates a paginator; a zero size is raised to one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    /// Returns the number of tasks per page.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns page `page` of `tasks`, clipped to bounds.
    #[must_use]
    pub fn slice(&self, tasks: &[Task], page: PageNumber) -> Vec<Task> {
        tasks
            .iter()
            .skip(page.offset(self.page_size))
            .take(self.page_size)
            .cloned()
            .collect()
    }

    /// Returns page `page` of the `status` column held by `store`.
    #[must_use]
    pub fn page(&self, store: &TaskStore, status: TaskStatus, page: PageNumber) -> Vec<Task> {
        self.slice(&store.by_status(status), page)
    }

    /// Returns how many pages `len` tasks span; an empty column has one.
    #[must_use]
    pub const fn total_pages(&self, len: usize) -> usize {
        let pages = len.div_ceil(self.page_size);
        if pages == 0 { 1 } else { pages }
    }
}

/// How page cursors relate across columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CursorMode {
    /// Each column keeps its own page.
    #[default]
    PerColumn,
    /// One page number drives every column at once.
    Shared,
}

/// Current page of each status column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnCursors {
    mode: CursorMode,
    pages: HashMap<TaskStatus, PageNumber>,
}

impl ColumnCursors {
    /// Creates cursors with every column on the first page.
    #[must_use]
    pub fn new(mode: CursorMode) -> Self {
        Self {
            mode,
            pages: HashMap::new(),
        }
    }

    /// Returns the cursor mode.
    #[must_use]
    pub const fn mode(&self) -> CursorMode {
        self.mode
    }

    /// Returns the current page of `status`.
    #[must_use]
    pub fn page(&self, status: TaskStatus) -> PageNumber {
        self.pages.get(&status).copied().unwrap_or_default()
    }

    /// Moves the `status` column to `page`; in shared mode every column
    /// moves.
    pub fn set_page(&mut self, status: TaskStatus, page: PageNumber) {
        match self.mode {
            CursorMode::PerColumn => {
                self.pages.insert(status, page);
            }
            CursorMode::Shared => {
                for column in TaskStatus::ALL {
                    self.pages.insert(column, page);
                }
            }
        }
    }

    /// Returns every column to the first page.
    pub fn reset(&mut self) {
        self.pages.clear();
    }
}
