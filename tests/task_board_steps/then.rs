//! Then steps for task board BDD scenarios.

use super::world::{TaskBoardWorld, parse_status, parse_task_id};
use rstest_bdd_macros::then;
use taskboard::task::{
    adapters::memory::GatewayOperation,
    ports::{Notification, NotificationLevel},
};

#[then("the board holds {count:usize} task")]
fn board_holds(world: &mut TaskBoardWorld, count: usize) -> Result<(), eyre::Report> {
    let held = world.board()?.store().len();
    if held != count {
        return Err(eyre::eyre!("expected {count} tasks, found {held}"));
    }
    Ok(())
}

#[then(r#"task {id:u64} has status "{status}""#)]
fn task_has_status(world: &mut TaskBoardWorld, id: u64, status: String) -> Result<(), eyre::Report> {
    let expected = parse_status(&status)?;
    let task = world
        .board()?
        .store()
        .get(parse_task_id(id)?)
        .ok_or_else(|| eyre::eyre!("task {id} is not on the board"))?;
    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            task.status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the notification "{message}" is shown"#)]
fn success_notification(world: &mut TaskBoardWorld, message: String) -> Result<(), eyre::Report> {
    let expected = Notification::success(message);
    let last = world.notifier.last();
    if last.as_ref() != Some(&expected) {
        return Err(eyre::eyre!("expected {expected:?}, got {last:?}"));
    }
    Ok(())
}

#[then("an error notification is shown")]
fn error_notification(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    let last = world.notifier.last();
    if !last
        .as_ref()
        .is_some_and(|notification| notification.level == NotificationLevel::Error)
    {
        return Err(eyre::eyre!("expected an error notification, got {last:?}"));
    }
    if world.last_error.is_none() {
        return Err(eyre::eyre!("expected the action to fail"));
    }
    Ok(())
}

#[then("the backend received {count:usize} update call")]
fn update_calls(world: &mut TaskBoardWorld, count: usize) -> Result<(), eyre::Report> {
    let calls = world
        .gateway
        .call_count(GatewayOperation::UpdateTask)
        .map_err(|err| eyre::eyre!("read call count: {err}"))?;
    if calls != count {
        return Err(eyre::eyre!("expected {count} update calls, found {calls}"));
    }
    Ok(())
}

#[then("task {id:u64} is not on the board")]
fn task_absent(world: &mut TaskBoardWorld, id: u64) -> Result<(), eyre::Report> {
    if world.board()?.store().contains(parse_task_id(id)?) {
        return Err(eyre::eyre!("task {id} is still on the board"));
    }
    Ok(())
}

#[then("no detail view is open")]
fn detail_closed(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    if let Some(task) = world.board()?.selected_task() {
        return Err(eyre::eyre!("detail view still shows task {}", task.id()));
    }
    Ok(())
}
