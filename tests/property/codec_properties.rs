//! Property-based codec tests.
//!
//! Uses proptest to verify:
//! 1. Any snapshot, command or drag event survives a framed encode/decode.
//! 2. Concatenated frames decode back in order with exact byte accounting.
//! 3. Random bytes never cause a panic in `decode` or `decode_framed`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;

use kanban_proto::board::{BoardSnapshot, Column, Id, Task};
use kanban_proto::codec::{self, Frame};
use kanban_proto::command::{BoardCommand, DragEvent};

// --- Strategies ---

fn arb_id() -> impl Strategy<Value = Id> {
    "[a-z0-9-]{1,36}".prop_map(Id::from)
}

fn arb_text() -> impl Strategy<Value = String> {
    ".{0,64}"
}

fn arb_snapshot() -> impl Strategy<Value = BoardSnapshot> {
    (
        prop::collection::vec((arb_id(), arb_text()), 0..8),
        prop::collection::vec((arb_id(), arb_id(), arb_text()), 0..16),
    )
        .prop_map(|(columns, tasks)| {
            BoardSnapshot::new(
                columns.into_iter().map(|(id, title)| Column::new(id, title)).collect(),
                tasks
                    .into_iter()
                    .map(|(id, column_id, content)| Task::new(id, column_id, content))
                    .collect(),
            )
        })
}

fn arb_command() -> impl Strategy<Value = BoardCommand> {
    prop_oneof![
        arb_text().prop_map(|title| BoardCommand::CreateColumn { title }),
        (arb_id(), arb_text()).prop_map(|(id, title)| BoardCommand::UpdateColumnTitle { id, title }),
        arb_id().prop_map(|id| BoardCommand::DeleteColumn { id }),
        arb_id().prop_map(|column_id| BoardCommand::CreateTask { column_id }),
        (arb_id(), arb_text())
            .prop_map(|(id, content)| BoardCommand::UpdateTaskContent { id, content }),
        arb_id().prop_map(|id| BoardCommand::DeleteTask { id }),
        (arb_id(), arb_id()).prop_map(|(active, over)| BoardCommand::ReorderColumns { active, over }),
        (arb_id(), arb_id()).prop_map(|(active, over)| BoardCommand::ReorderTasks { active, over }),
        (arb_id(), arb_id())
            .prop_map(|(task_id, column_id)| BoardCommand::MoveTaskToColumn { task_id, column_id }),
    ]
}

fn arb_drag_event() -> impl Strategy<Value = DragEvent> {
    prop_oneof![
        arb_id().prop_map(|active| DragEvent::Start { active }),
        (arb_id(), arb_id()).prop_map(|(active, over)| DragEvent::Over { active, over }),
        (arb_id(), prop::option::of(arb_id())).prop_map(|(active, over)| DragEvent::End { active, over }),
        Just(DragEvent::Cancel),
    ]
}

fn arb_frame() -> impl Strategy<Value = Frame> {
    prop_oneof![
        arb_command().prop_map(Frame::Command),
        arb_drag_event().prop_map(Frame::Drag),
        arb_snapshot().prop_map(Frame::Snapshot),
    ]
}

// --- Property tests ---

proptest! {
    /// Any frame survives a framed encode → decode.
    #[test]
    fn framed_round_trip(frame in arb_frame()) {
        let bytes = codec::encode_framed(&frame).expect("encode should succeed");
        let (decoded, consumed) = codec::decode_framed(&bytes).expect("decode should succeed");
        prop_assert_eq!(&decoded, &frame);
        prop_assert_eq!(consumed, bytes.len());
    }

    /// A stream of frames decodes back in order.
    #[test]
    fn frame_stream_decodes_in_order(frames in prop::collection::vec(arb_frame(), 1..8)) {
        let mut stream = Vec::new();
        for frame in &frames {
            stream.extend(codec::encode_framed(frame).expect("encode should succeed"));
        }
        let mut offset = 0;
        let mut decoded = Vec::new();
        while offset < stream.len() {
            let (frame, consumed) = codec::decode_framed(&stream[offset..]).expect("decode should succeed");
            offset += consumed;
            decoded.push(frame);
        }
        prop_assert_eq!(decoded, frames);
    }

    /// Random bytes never cause a panic when decoded.
    #[test]
    fn random_bytes_decode_no_panic(bytes in prop::collection::vec(any::<u8>(), 0..512)) {
        let _ = codec::decode(&bytes);
        let _ = codec::decode_framed(&bytes);
    }
}
