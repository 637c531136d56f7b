//! End-to-end board scenarios over the in-memory gateway.

use super::helpers::{Backend, backend, due, empty_backend, task_id, user_id};
use eyre::{bail, ensure};
use rstest::rstest;
use taskboard::task::{
    adapters::memory::GatewayOperation,
    domain::{NewTaskForm, TaskStatus},
    ports::Notification,
    services::{BoardRole, StatusChange},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn created_task_starts_in_todo(empty_backend: Backend) -> eyre::Result<()> {
    let mut board = empty_backend.board(BoardRole::Manager);
    board.load().await?;

    let created = board
        .create_task(
            NewTaskForm::new("Draft spec")
                .with_responsible(user_id(3))
                .with_due_date(due("2025-11-01")),
        )
        .await?;

    let all = board.store().all();
    ensure!(all.len() == 1, "expected exactly one task, found {}", all.len());
    ensure!(created.status() == TaskStatus::Todo, "created task is todo");
    ensure!(
        all.first().map(|t| t.status()) == Some(TaskStatus::Todo),
        "stored task is todo"
    );
    ensure!(
        created
            .responsible()
            .and_then(|a| a.display_name())
            == Some("Grace Hopper"),
        "responsible resolved"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dragged_task_persists_its_new_status(backend: Backend) -> eyre::Result<()> {
    let mut board = backend.board(BoardRole::Manager);
    board.load().await?;

    board.begin_drag(task_id(7));
    let outcome = board.drop_on(TaskStatus::Done).await?;

    let StatusChange::Persisted(task) = outcome else {
        bail!("expected the change to be persisted");
    };
    ensure!(task.status() == TaskStatus::Done, "returned task is done");
    ensure!(
        board.store().get(task_id(7)).map(|t| t.status()) == Some(TaskStatus::Done),
        "store shows done"
    );
    ensure!(
        backend.notifier.last() == Some(Notification::success("Status: Done")),
        "success notification emitted"
    );
    ensure!(
        backend.gateway.call_count(GatewayOperation::UpdateTask)? == 1,
        "exactly one persistence call"
    );
    ensure!(
        board.column(TaskStatus::Done).total == 1 && board.column(TaskStatus::Todo).total == 0,
        "task moved columns"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn failed_drag_reverts_to_todo(backend: Backend) -> eyre::Result<()> {
    let mut board = backend.board(BoardRole::Manager);
    board.load().await?;
    backend.gateway.fail(GatewayOperation::UpdateTask)?;

    board.begin_drag(task_id(7));
    let result = board.drop_on(TaskStatus::Done).await;

    ensure!(result.is_err(), "drop should fail");
    ensure!(
        board.store().get(task_id(7)).map(|t| t.status()) == Some(TaskStatus::Todo),
        "store reverted to todo"
    );
    ensure!(
        backend
            .notifier
            .last()
            .is_some_and(|notification| notification.is_error()),
        "error notification emitted"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_leaves_store_and_detail_view(backend: Backend) -> eyre::Result<()> {
    let mut board = backend.board(BoardRole::Admin);
    board.load().await?;
    board.open_detail(task_id(7))?;

    board.delete_task(task_id(7)).await?;

    ensure!(!board.store().contains(task_id(7)), "task removed from store");
    ensure!(board.selected_task().is_none(), "detail view closed");
    ensure!(
        backend.gateway.tasks()?.is_empty(),
        "task removed from the backend"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn edited_task_is_visible_after_reload(backend: Backend) -> eyre::Result<()> {
    let mut board = backend.board(BoardRole::Admin);
    board.load().await?;
    let form = board
        .open_detail(task_id(7))?
        .with_label("Final spec")
        .with_status(TaskStatus::Waiting);
    board.save_detail(form).await?;

    let mut fresh = backend.board(BoardRole::Admin);
    fresh.load().await?;

    let reloaded = fresh.store().get(task_id(7));
    ensure!(
        reloaded
            .as_ref()
            .is_some_and(|t| t.label() == "Final spec" && t.status() == TaskStatus::Waiting),
        "reloaded task reflects the edit, got {reloaded:?}"
    );
    Ok(())
}
