//! When steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status, parse_task_id, run_async};
use rstest_bdd_macros::when;
use taskboard::task::domain::{DueDate, NewTaskForm, UserId};

#[when(r#"a task "{label}" is created for user {user:u64} due "{date}""#)]
fn create_task(
    world: &mut TaskBoardWorld,
    label: String,
    user: u64,
    date: String,
) -> Result<(), eyre::Report> {
    let responsible = UserId::new(user).map_err(|err| eyre::eyre!("invalid user id: {err}"))?;
    let due_date = DueDate::parse(&date).map_err(|err| eyre::eyre!("invalid due date: {err}"))?;
    let form = NewTaskForm::new(label)
        .with_responsible(responsible)
        .with_due_date(due_date);

    let result = run_async(world.board()?.create_task(form));
    world.last_error = result.err();
    Ok(())
}

#[when(r#"task {id:u64} is dragged to "{status}""#)]
fn drag_task(world: &mut TaskBoardWorld, id: u64, status: String) -> Result<(), eyre::Report> {
    let task_id = parse_task_id(id)?;
    let target = parse_status(&status)?;
    let board = world.board_mut()?;

    board.begin_drag(task_id);
    let result = run_async(board.drop_on(target));
    world.last_error = result.err();
    Ok(())
}

#[when("task {id:u64} is deleted")]
fn delete_task(world: &mut TaskBoardWorld, id: u64) -> Result<(), eyre::Report> {
    let task_id = parse_task_id(id)?;
    let result = run_async(world.board_mut()?.delete_task(task_id));
    world.last_error = result.err();
    Ok(())
}
