//! Property-based tests for board invariants.
//!
//! Uses proptest to verify:
//! 1. Created ids are pairwise distinct across columns and tasks.
//! 2. Deleting a column leaves no task pointing at it.
//! 3. `array_move` preserves length and contents, lands the element at the
//!    target index, and keeps the relative order of everything else.
//! 4. Operations naming a missing id fail and leave the snapshot unchanged.
//! 5. A drag released outside any target leaves the snapshot unchanged.
//! 6. Random operation sequences never leave a dangling task reference.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::HashSet;

use proptest::prelude::*;

use kanban::board::{BoardStore, SequentialIdGenerator, array_move};
use kanban::drag::DragSession;
use kanban_proto::board::{Id, Task};
use kanban_proto::command::BoardCommand;

/// A single operation against a board, with ids chosen by index so they
/// usually (but not always) hit live entities.
#[derive(Debug, Clone)]
enum Op {
    CreateColumn,
    DeleteColumn(usize),
    CreateTask(usize),
    DeleteTask(usize),
    ReorderColumns(usize, usize),
    ReorderTasks(usize, usize),
    MoveTaskToColumn(usize, usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        2 => Just(Op::CreateColumn),
        1 => (0usize..8).prop_map(Op::DeleteColumn),
        4 => (0usize..8).prop_map(Op::CreateTask),
        1 => (0usize..16).prop_map(Op::DeleteTask),
        2 => (0usize..8, 0usize..8).prop_map(|(a, b)| Op::ReorderColumns(a, b)),
        2 => (0usize..16, 0usize..16).prop_map(|(a, b)| Op::ReorderTasks(a, b)),
        2 => (0usize..16, 0usize..8).prop_map(|(a, b)| Op::MoveTaskToColumn(a, b)),
    ]
}

/// Picks the id at `index`, or a missing id when out of range.
fn pick(ids: &[Id], index: usize) -> Id {
    ids.get(index).cloned().unwrap_or_else(|| Id::from("missing"))
}

fn to_command(store: &BoardStore, op: &Op) -> BoardCommand {
    let columns: Vec<Id> = store.columns().iter().map(|c| c.id.clone()).collect();
    let tasks: Vec<Id> = store.tasks().iter().map(|t| t.id.clone()).collect();
    match *op {
        Op::CreateColumn => BoardCommand::CreateColumn {
            title: "lane".to_string(),
        },
        Op::DeleteColumn(i) => BoardCommand::DeleteColumn { id: pick(&columns, i) },
        Op::CreateTask(i) => BoardCommand::CreateTask {
            column_id: pick(&columns, i),
        },
        Op::DeleteTask(i) => BoardCommand::DeleteTask { id: pick(&tasks, i) },
        Op::ReorderColumns(a, b) => BoardCommand::ReorderColumns {
            active: pick(&columns, a),
            over: pick(&columns, b),
        },
        Op::ReorderTasks(a, b) => BoardCommand::ReorderTasks {
            active: pick(&tasks, a),
            over: pick(&tasks, b),
        },
        Op::MoveTaskToColumn(a, b) => BoardCommand::MoveTaskToColumn {
            task_id: pick(&tasks, a),
            column_id: pick(&columns, b),
        },
    }
}

fn make_store() -> BoardStore {
    BoardStore::new(Box::new(SequentialIdGenerator::default()))
}

/// Builds a store by applying `ops`, ignoring rejected commands.
fn build(ops: &[Op]) -> BoardStore {
    let mut store = make_store();
    for op in ops {
        let command = to_command(&store, op);
        let _ = store.apply(&command);
    }
    store
}

fn assert_invariants(store: &BoardStore) -> Result<(), TestCaseError> {
    let column_ids: HashSet<&Id> = store.columns().iter().map(|c| &c.id).collect();
    prop_assert_eq!(column_ids.len(), store.columns().len(), "duplicate column id");
    let task_ids: HashSet<&Id> = store.tasks().iter().map(|t| &t.id).collect();
    prop_assert_eq!(task_ids.len(), store.tasks().len(), "duplicate task id");
    for task in store.tasks() {
        prop_assert!(column_ids.contains(&task.column_id), "dangling task {}", task.id);
        prop_assert!(!column_ids.contains(&task.id), "id {} names a column and a task", task.id);
    }
    Ok(())
}

proptest! {
    /// Any mix of column and task creation yields unique ids per sequence.
    #[test]
    fn created_ids_are_unique(creates in prop::collection::vec(any::<bool>(), 1..64)) {
        let mut store = make_store();
        let first = store.create_column("first").unwrap();
        for is_column in creates {
            if is_column {
                store.create_column("lane").unwrap();
            } else {
                store.create_task(&first.id).unwrap();
            }
        }
        assert_invariants(&store)?;
    }

    /// Deleting any column removes all of its tasks and nothing else.
    #[test]
    fn delete_column_cascades(ops in prop::collection::vec(arb_op(), 0..48), pick_index in 0usize..8) {
        let mut store = build(&ops);
        prop_assume!(!store.columns().is_empty());
        let victim = store.columns()[pick_index % store.columns().len()].id.clone();
        let survivors: Vec<Task> = store
            .tasks()
            .iter()
            .filter(|t| t.column_id != victim)
            .cloned()
            .collect();

        store.delete_column(&victim).unwrap();

        prop_assert!(store.tasks().iter().all(|t| t.column_id != victim));
        prop_assert_eq!(store.tasks(), survivors.as_slice());
    }

    /// Single-element move keeps contents and relative order.
    #[test]
    fn array_move_is_a_move(
        len in 2usize..32,
        from_seed in any::<usize>(),
        to_seed in any::<usize>(),
    ) {
        let from = from_seed % len;
        let to = to_seed % len;
        prop_assume!(from != to);

        let original: Vec<usize> = (0..len).collect();
        let mut moved = original.clone();
        prop_assert!(array_move(&mut moved, from, to));

        prop_assert_eq!(moved.len(), original.len());
        prop_assert_eq!(moved[to], original[from]);

        let mut sorted = moved.clone();
        sorted.sort_unstable();
        prop_assert_eq!(&sorted, &original);

        let rest_before: Vec<usize> = original.iter().copied().filter(|&x| x != from).collect();
        let rest_after: Vec<usize> = moved.iter().copied().filter(|&x| x != from).collect();
        prop_assert_eq!(rest_before, rest_after);
    }

    /// Updates and deletes on a missing id fail with not-found and change nothing.
    #[test]
    fn missing_id_is_rejected_without_change(ops in prop::collection::vec(arb_op(), 0..32)) {
        let mut store = build(&ops);
        let before = store.snapshot();
        let ghost = Id::from("ghost");

        prop_assert!(store.update_column_title(&ghost, "x").unwrap_err().is_not_found());
        prop_assert!(store.delete_column(&ghost).unwrap_err().is_not_found());
        prop_assert!(store.update_task_content(&ghost, "x").unwrap_err().is_not_found());
        prop_assert!(store.delete_task(&ghost).unwrap_err().is_not_found());
        prop_assert_eq!(store.snapshot(), before);
    }

    /// Start, any hovering, then release outside: board is unchanged.
    #[test]
    fn drag_released_outside_is_a_no_op(
        ops in prop::collection::vec(arb_op(), 1..32),
        active_index in 0usize..16,
        hovers in prop::collection::vec(0usize..16, 0..8),
    ) {
        let mut store = build(&ops);
        let mut candidates: Vec<Id> = store.column_ids().into_iter().cloned().collect();
        candidates.extend(store.tasks().iter().map(|t| t.id.clone()));
        prop_assume!(!candidates.is_empty());

        let before = store.snapshot();
        let active = candidates[active_index % candidates.len()].clone();
        let mut session = DragSession::new();
        session.start(&store, active.clone()).unwrap();
        for hover in hovers {
            session.over(&active, candidates[hover % candidates.len()].clone()).unwrap();
        }
        prop_assert_eq!(session.end(&mut store, &active, None).unwrap(), None);
        prop_assert_eq!(store.snapshot(), before);
    }

    /// Invariants hold after any operation sequence, accepted or not.
    #[test]
    fn invariants_hold_under_random_ops(ops in prop::collection::vec(arb_op(), 0..96)) {
        let mut store = make_store();
        for op in &ops {
            let command = to_command(&store, op);
            let before = store.snapshot();
            if store.apply(&command).is_err() {
                prop_assert_eq!(store.snapshot(), before);
            }
            assert_invariants(&store)?;
        }
    }
}
