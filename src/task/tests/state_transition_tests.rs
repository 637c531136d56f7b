//! Unit tests for the status state machine.

use super::fixtures::{subtask, task};
use crate::task::domain::{TaskStatus, TransitionOutcome};
use eyre::{bail, ensure};
use rstest::rstest;

#[rstest]
#[case(TaskStatus::Todo, TaskStatus::Waiting)]
#[case(TaskStatus::Todo, TaskStatus::InProgress)]
#[case(TaskStatus::Todo, TaskStatus::Done)]
#[case(TaskStatus::Waiting, TaskStatus::Todo)]
#[case(TaskStatus::Waiting, TaskStatus::InProgress)]
#[case(TaskStatus::Waiting, TaskStatus::Done)]
#[case(TaskStatus::InProgress, TaskStatus::Todo)]
#[case(TaskStatus::InProgress, TaskStatus::Waiting)]
#[case(TaskStatus::InProgress, TaskStatus::Done)]
#[case(TaskStatus::Done, TaskStatus::Todo)]
#[case(TaskStatus::Done, TaskStatus::Waiting)]
#[case(TaskStatus::Done, TaskStatus::InProgress)]
fn every_directed_transition_is_applied(
    #[case] from: TaskStatus,
    #[case] to: TaskStatus,
) -> eyre::Result<()> {
    ensure!(from.can_transition_to(to), "{from} -> {to} should be allowed");

    let original = task(1, from);
    let TransitionOutcome::Applied(updated) = original.transition(to) else {
        bail!("{from} -> {to} should apply");
    };

    ensure!(updated.status() == to, "status should be {to}");
    ensure!(
        updated.fields().with_status(from) == original.fields(),
        "every other field should be unchanged"
    );
    ensure!(updated.id() == original.id(), "identifier should be unchanged");
    Ok(())
}

#[rstest]
#[case(TaskStatus::Todo)]
#[case(TaskStatus::Waiting)]
#[case(TaskStatus::InProgress)]
#[case(TaskStatus::Done)]
fn transition_to_current_status_is_a_noop(#[case] status: TaskStatus) -> eyre::Result<()> {
    let original = task(1, status);
    let outcome = original.transition(status);

    ensure!(outcome.is_noop(), "{status} -> {status} should be a no-op");
    ensure!(outcome.task() == &original, "no-op should return the task unchanged");
    Ok(())
}

#[rstest]
fn transition_preserves_parent_and_assignee() -> eyre::Result<()> {
    let child = subtask(4, 2);
    for target in TaskStatus::ALL {
        let updated = child.transition(target).into_task();
        ensure!(updated.status() == target, "status should be {target}");
        ensure!(updated.parent_task() == child.parent_task(), "parent kept");
        ensure!(updated.responsible() == child.responsible(), "assignee kept");
        ensure!(updated.label() == child.label(), "label kept");
        ensure!(updated.due_date() == child.due_date(), "due date kept");
    }
    Ok(())
}
