//! Session lifetime and concurrency tests for the task board.

use super::helpers::{Backend, backend, seeded_task, task_id};
use eyre::ensure;
use rstest::rstest;
use taskboard::task::{
    adapters::memory::GatewayOperation,
    domain::TaskStatus,
    services::{BoardRole, MutationError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dropping_the_board_discards_pending_results(backend: Backend) -> eyre::Result<()> {
    let _gate = backend.gateway.hold_updates()?;
    let mut board = backend.board(BoardRole::Manager);
    board.load().await?;
    let controller = board.controller().clone();

    let pending = tokio::spawn(async move {
        controller
            .apply_status_change(task_id(7), TaskStatus::Done)
            .await
    });
    while backend.gateway.call_count(GatewayOperation::UpdateTask)? == 0 {
        tokio::task::yield_now().await;
    }
    drop(board);

    let result = pending.await?;
    ensure!(
        matches!(result, Err(MutationError::Cancelled)),
        "expected cancellation, got {result:?}"
    );
    ensure!(
        backend.notifier.notifications().is_empty(),
        "no notification after teardown"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rollback_restores_the_full_snapshot(backend: Backend) -> eyre::Result<()> {
    backend
        .gateway
        .insert_task(seeded_task(8, TaskStatus::Waiting))?;
    let mut board = backend.board(BoardRole::Manager);
    board.load().await?;
    let snapshot = board.store().snapshot();
    let gate = backend.gateway.hold_updates()?;
    backend.gateway.fail(GatewayOperation::UpdateTask)?;

    let controller = board.controller().clone();
    let pending = tokio::spawn(async move {
        controller
            .apply_status_change(task_id(7), TaskStatus::InProgress)
            .await
    });
    while !board.controller().is_in_flight(task_id(7)) {
        tokio::task::yield_now().await;
    }
    ensure!(
        board.store().get(task_id(7)).map(|t| t.status()) == Some(TaskStatus::InProgress),
        "optimistic status visible before persistence"
    );

    gate.notify_one();
    let result = pending.await?;

    ensure!(result.is_err(), "persistence fails");
    ensure!(
        board.store().all() == snapshot.tasks(),
        "collection deep-equals the snapshot"
    );
    Ok(())
}
