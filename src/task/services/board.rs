//! The task board: one component for every role.
//!
//! A board is parameterised by a [`BoardRole`], which decides which tasks are
//! visible ([`BoardScope`]) and which actions are allowed
//! ([`BoardCapabilities`]). View state (selected task, drag source, page
//! cursors) refers to tasks by identifier only; the [`TaskStore`] owns them.

use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    ColumnCursors, ColumnPaginator, CursorMode, HierarchyResolver, MutationController,
    MutationError, MutationResult, PageNumber, SessionToken, StatusChange, TaskStore,
};
use crate::config::BoardConfig;
use crate::task::{
    domain::{
        DueDate, EditTaskForm, NewTaskForm, QuickSubtaskForm, Task, TaskId, TaskStatus, User,
        UserId,
    },
    ports::{Notification, Notifier, TaskGateway},
};

/// Which tasks a board shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardScope {
    /// Every task.
    All,
    /// Only tasks the given user is responsible for.
    AssignedTo(UserId),
}

/// Actions a board may offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardAction {
    /// Create a task from the creation form.
    Create,
    /// Save the detail form.
    Edit,
    /// Delete a task.
    Delete,
    /// Move a task to another column.
    ChangeStatus,
    /// Add a subtask from the detail view.
    AddSubtask,
}

/// Set of actions a board allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardCapabilities {
    full_crud: bool,
}

impl BoardCapabilities {
    /// Create, edit, delete, subtasks and status changes.
    pub const FULL: Self = Self { full_crud: true };

    /// Status changes only.
    pub const STATUS_ONLY: Self = Self { full_crud: false };

    /// Returns whether `action` is allowed.
    #[must_use]
    pub const fn allows(self, action: BoardAction) -> bool {
        match action {
            BoardAction::ChangeStatus => true,
            BoardAction::Create
            | BoardAction::Edit
            | BoardAction::Delete
            | BoardAction::AddSubtask => self.full_crud,
        }
    }
}

/// Role of the signed-in user, as far as the board is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardRole {
    /// Administrator: every task, every action.
    Admin,
    /// Manager: every task, every action.
    Manager,
    /// Employee: own tasks, status changes only.
    Employee(UserId),
}

impl BoardRole {
    /// Returns the tasks this role sees.
    #[must_use]
    pub const fn scope(self) -> BoardScope {
        match self {
            Self::Admin | Self::Manager => BoardScope::All,
            Self::Employee(user) => BoardScope::AssignedTo(user),
        }
    }

    /// Returns the actions this role may take.
    #[must_use]
    pub const fn capabilities(self) -> BoardCapabilities {
        match self {
            Self::Admin | Self::Manager => BoardCapabilities::FULL,
            Self::Employee(_) => BoardCapabilities::STATUS_ONLY,
        }
    }
}

/// Loading state of a board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    /// Nothing loaded yet, or a load is running.
    #[default]
    Loading,
    /// The last load succeeded.
    Ready,
    /// The last load failed; the previous collection is still shown.
    Failed,
}

/// One page of a status column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    /// Column status.
    pub status: TaskStatus,
    /// Human-readable column title.
    pub title: &'static str,
    /// Number of tasks in the column across all pages.
    pub total: usize,
    /// Page shown.
    pub page: PageNumber,
    /// Number of pages in the column.
    pub total_pages: usize,
    /// Tasks on the page shown.
    pub tasks: Vec<Task>,
}

/// Kanban task board bound to one session.
///
/// Dropping the board cancels its session, so persistence calls still in
/// flight no longer touch the store.
pub struct TaskBoard<G, N, C = DefaultClock>
where
    G: TaskGateway,
    N: Notifier,
    C: Clock + Send + Sync,
{
    role: BoardRole,
    gateway: Arc<G>,
    notifier: Arc<N>,
    clock: Arc<C>,
    store: TaskStore,
    controller: MutationController<G, N>,
    hierarchy: HierarchyResolver,
    paginator: ColumnPaginator,
    cursors: ColumnCursors,
    session: SessionToken,
    load_state: LoadState,
    selected: Option<TaskId>,
    drag_source: Option<TaskId>,
}

impl<G, N, C> TaskBoard<G, N, C>
where
    G: TaskGateway,
    N: Notifier,
    C: Clock + Send + Sync,
{
    /// Creates an empty board for `role`.
    #[must_use]
    pub fn new(role: BoardRole, gateway: Arc<G>, notifier: Arc<N>, clock: Arc<C>) -> Self {
        let store = TaskStore::new();
        let session = SessionToken::new();
        let default_responsible = match role.scope() {
            BoardScope::AssignedTo(user) => Some(user),
            BoardScope::All => None,
        };
        let controller = MutationController::new(
            Arc::clone(&gateway),
            Arc::clone(&notifier),
            store.clone(),
            session.clone(),
        )
        .with_default_responsible(default_responsible);
        Self {
            role,
            gateway,
            notifier,
            clock,
            hierarchy: HierarchyResolver::new(store.clone()),
            store,
            controller,
            paginator: ColumnPaginator::default(),
            cursors: ColumnCursors::new(CursorMode::PerColumn),
            session,
            load_state: LoadState::default(),
            selected: None,
            drag_source: None,
        }
    }

    /// Applies the page size and cursor mode from `config`.
    #[must_use]
    pub fn with_config(mut self, config: &BoardConfig) -> Self {
        self.paginator = ColumnPaginator::new(config.page_size);
        self.cursors = ColumnCursors::new(config.cursor_mode);
        self
    }

    /// Returns the board's role.
    #[must_use]
    pub const fn role(&self) -> BoardRole {
        self.role
    }

    /// Returns the store backing the board.
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Returns the mutation controller used by the board.
    #[must_use]
    pub const fn controller(&self) -> &MutationController<G, N> {
        &self.controller
    }

    /// Returns the session token of the board.
    #[must_use]
    pub const fn session(&self) -> &SessionToken {
        &self.session
    }

    /// Returns the loading state.
    #[must_use]
    pub const fn load_state(&self) -> LoadState {
        self.load_state
    }

    /// Loads the tasks and users visible to the board's role.
    ///
    /// A failed load keeps the previous collection and emits an error
    /// notification.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::Gateway`] when a fetch fails and
    /// [`MutationError::Cancelled`] when the session ends first; both leave
    /// the board in [`LoadState::Failed`].
    #[instrument(skip(self), fields(role = ?self.role))]
    pub async fn load(&mut self) -> MutationResult<usize> {
        self.load_state = LoadState::Loading;
        let scope = self.role.scope();
        let loaded = self
            .session
            .run(self.store.load(self.gateway.as_ref(), scope))
            .await;
        match loaded {
            None => {
                debug!("session cancelled, load discarded");
                self.load_state = LoadState::Failed;
                Err(MutationError::Cancelled)
            }
            Some(Ok(count)) => {
                info!(count, "board loaded");
                self.load_state = LoadState::Ready;
                Ok(count)
            }
            Some(Err(err)) => {
                warn!(error = %err, "board load failed");
                self.load_state = LoadState::Failed;
                self.notifier
                    .notify(Notification::error("Could not load tasks"));
                Err(err.into())
            }
        }
    }

    /// Ends the session; results of calls still in flight are discarded.
    pub fn close(&self) {
        self.session.cancel();
    }

    /// Returns the current page of the `status` column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> ColumnView {
        let all = self.store.by_status(status);
        let page = self.cursors.page(status);
        ColumnView {
            status,
            title: status.title(),
            total: all.len(),
            page,
            total_pages: self.paginator.total_pages(all.len()),
            tasks: self.paginator.slice(&all, page),
        }
    }

    /// Returns the current page of every column, in board order.
    #[must_use]
    pub fn columns(&self) -> Vec<ColumnView> {
        TaskStatus::ALL
            .into_iter()
            .map(|status| self.column(status))
            .collect()
    }

    /// Moves the `status` column to `page`.
    pub fn set_page(&mut self, status: TaskStatus, page: PageNumber) {
        self.cursors.set_page(status, page);
    }

    /// Returns the loaded users, for responsible selectors.
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        self.store.users()
    }

    /// Opens the detail view of a task and returns its prefilled form.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::UnknownTask`] when the task is not loaded.
    pub fn open_detail(&mut self, id: TaskId) -> MutationResult<EditTaskForm> {
        let task = self.store.get(id).ok_or(MutationError::UnknownTask(id))?;
        self.selected = Some(id);
        Ok(EditTaskForm::from_task(&task))
    }

    /// Closes the detail view.
    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    /// Returns the task shown in the detail view.
    #[must_use]
    pub fn selected_task(&self) -> Option<Task> {
        self.selected.and_then(|id| self.store.get(id))
    }

    /// Returns the subtasks of the task shown in the detail view.
    #[must_use]
    pub fn subtasks_of_selected(&self) -> Vec<Task> {
        self.selected_task()
            .map(|task| self.hierarchy.subtasks_of(&task))
            .unwrap_or_default()
    }

    /// Returns the tasks offered as parent: all tasks but the selected one.
    #[must_use]
    pub fn parent_candidates(&self) -> Vec<Task> {
        self.selected.map_or_else(
            || self.store.all(),
            |id| self.hierarchy.valid_parents(id),
        )
    }

    /// Records the task being dragged.
    pub fn begin_drag(&mut self, id: TaskId) {
        self.drag_source = Some(id);
    }

    /// Returns the task being dragged.
    #[must_use]
    pub const fn drag_source(&self) -> Option<TaskId> {
        self.drag_source
    }

    /// Drops the dragged task on the `status` column.
    ///
    /// The drag source is cleared whatever the outcome; dropping with no
    /// drag source does nothing.
    ///
    /// # Errors
    ///
    /// See [`MutationController::apply_status_change`].
    pub async fn drop_on(&mut self, status: TaskStatus) -> MutationResult<StatusChange> {
        let Some(id) = self.drag_source.take() else {
            debug!("drop without drag source ignored");
            return Ok(StatusChange::Unchanged);
        };
        self.change_status(id, status).await
    }

    /// Moves a task to `status` optimistically.
    ///
    /// # Errors
    ///
    /// See [`MutationController::apply_status_change`].
    pub async fn change_status(
        &self,
        id: TaskId,
        status: TaskStatus,
    ) -> MutationResult<StatusChange> {
        self.ensure_allowed(BoardAction::ChangeStatus)?;
        self.controller.apply_status_change(id, status).await
    }

    /// Creates a task from the creation form.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::NotPermitted`] for status-only boards; see
    /// also [`MutationController::create`].
    pub async fn create_task(&self, form: NewTaskForm) -> MutationResult<Task> {
        self.ensure_allowed(BoardAction::Create)?;
        self.controller.create(form).await
    }

    /// Saves the detail form of the selected task and closes the detail
    /// view once the gateway confirms.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::NotPermitted`] for status-only boards; see
    /// also [`MutationController::save_edit`]. The view stays open on
    /// failure.
    pub async fn save_detail(&mut self, form: EditTaskForm) -> MutationResult<Task> {
        self.ensure_allowed(BoardAction::Edit)?;
        let id = self.selected_id()?;
        let saved = self.controller.save_edit(id, form).await?;
        self.close_detail();
        Ok(saved)
    }

    /// Deletes a task, closing its detail view if open.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::NotPermitted`] for status-only boards; see
    /// also [`MutationController::delete`].
    pub async fn delete_task(&mut self, id: TaskId) -> MutationResult<Task> {
        self.ensure_allowed(BoardAction::Delete)?;
        let removed = self.controller.delete(id).await?;
        if self.selected == Some(id) {
            self.close_detail();
        }
        if self.drag_source == Some(id) {
            self.drag_source = None;
        }
        Ok(removed)
    }

    /// Adds a subtask to the selected task.
    ///
    /// # Errors
    ///
    /// Returns [`MutationError::NotPermitted`] for status-only boards and
    /// [`MutationError::NoSelection`] when no detail view is open; see also
    /// [`MutationController::add_subtask`].
    pub async fn add_subtask(&self, form: QuickSubtaskForm) -> MutationResult<Task> {
        self.ensure_allowed(BoardAction::AddSubtask)?;
        let parent = self.selected_id()?;
        let today = DueDate::from_date(self.clock.utc().date_naive());
        self.controller.add_subtask(parent, form, today).await
    }

    fn selected_id(&self) -> MutationResult<TaskId> {
        let id = self.selected.ok_or(MutationError::NoSelection)?;
        if self.store.contains(id) {
            Ok(id)
        } else {
            Err(MutationError::UnknownTask(id))
        }
    }

    fn ensure_allowed(&self, action: BoardAction) -> MutationResult<()> {
        if self.role.capabilities().allows(action) {
            return Ok(());
        }
        warn!(?action, role = ?self.role, "action not permitted");
        Err(MutationError::NotPermitted(action))
    }
}

impl<G, N, C> Drop for TaskBoard<G, N, C>
where
    G: TaskGateway,
    N: Notifier,
    C: Clock + Send + Sync,
{
    fn drop(&mut self) {
        self.session.cancel();
    }
}
