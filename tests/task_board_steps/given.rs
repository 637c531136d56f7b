//! Given steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status, parse_task_id, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::task::{
    adapters::memory::GatewayOperation,
    domain::{Assignee, DueDate, PersistedTaskData, Task, User, UserId},
    services::{BoardRole, TaskBoard},
};

#[given(r#"a user {id:u64} named "{firstname}" "{lastname}""#)]
fn known_user(
    world: &mut TaskBoardWorld,
    id: u64,
    firstname: String,
    lastname: String,
) -> Result<(), eyre::Report> {
    let user_id = UserId::new(id).map_err(|err| eyre::eyre!("invalid user id: {err}"))?;
    world
        .gateway
        .insert_user(User::new(user_id, firstname, lastname))
        .wrap_err("seed user")?;
    Ok(())
}

#[given(r#"a task {id:u64} for user {user:u64} with status "{status}""#)]
fn existing_task(
    world: &mut TaskBoardWorld,
    id: u64,
    user: u64,
    status: String,
) -> Result<(), eyre::Report> {
    let responsible = UserId::new(user).map_err(|err| eyre::eyre!("invalid user id: {err}"))?;
    let due_date =
        DueDate::parse("2025-11-01").map_err(|err| eyre::eyre!("invalid due date: {err}"))?;
    let task = Task::from_persisted(PersistedTaskData {
        id: parse_task_id(id)?,
        label: format!("Task {id}"),
        description: String::new(),
        responsible: Some(Assignee::from_id(responsible)),
        due_date: Some(due_date),
        parent_task: None,
        status: parse_status(&status)?,
    });
    world.gateway.insert_task(task).wrap_err("seed task")?;
    Ok(())
}

#[given("the backend rejects task updates")]
fn backend_rejects_updates(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    world
        .gateway
        .fail(GatewayOperation::UpdateTask)
        .wrap_err("inject update failure")?;
    Ok(())
}

#[given("a manager board is loaded")]
fn manager_board_loaded(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    let mut board = TaskBoard::new(
        BoardRole::Manager,
        world.gateway.clone(),
        world.notifier.clone(),
        std::sync::Arc::new(mockable::DefaultClock),
    );
    run_async(board.load()).wrap_err("load manager board")?;
    world.board = Some(board);
    Ok(())
}

#[given("the detail view of task {id:u64} is open")]
fn detail_view_open(world: &mut TaskBoardWorld, id: u64) -> Result<(), eyre::Report> {
    let task_id = parse_task_id(id)?;
    world
        .board_mut()?
        .open_detail(task_id)
        .wrap_err("open detail view")?;
    Ok(())
}
