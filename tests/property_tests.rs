//! Property-based tests for the core engine types.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use chrono::Utc;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use waypoint::builder::{MachineBuilder, StateDefinitionBuilder, TransitionBuilder};
use waypoint::core::{Event, Guard, State, TransitionJournal, TransitionRecord};
use waypoint::Machine;

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
struct Node(u8);

impl State for Node {
    fn name(&self) -> &str {
        "Node"
    }
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
struct Step(u8);

impl Event for Step {
    fn name(&self) -> &str {
        "Step"
    }
}

/// Build a linear chain Node(0) -> Node(1) -> ... -> Node(len).
fn chain_machine(len: u8) -> Machine<Node, Step, u32, ()> {
    let mut builder = MachineBuilder::new().initial(Node(0)).context(0);
    for i in 0..len {
        builder = builder.state(
            StateDefinitionBuilder::new()
                .state(Node(i))
                .transition(TransitionBuilder::new().event(Step(i)).to(Node(i + 1)))
                .unwrap()
                .build()
                .unwrap(),
        );
    }
    builder
        .state(StateDefinitionBuilder::new().state(Node(len)).build().unwrap())
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn every_chain_state_is_reachable(len in 1..10u8, target in 0..10u8) {
        let target = target % (len + 1);
        let machine = chain_machine(len);

        let report = machine.go_to(&Node(target), &()).unwrap();

        prop_assert!(report.reached_target);
        prop_assert_eq!(machine.current_state().unwrap(), Node(target));
        // One journal record per hop walked.
        prop_assert_eq!(machine.journal().unwrap().records().len(), target as usize);
    }

    #[test]
    fn walking_past_the_chain_end_needs_an_error_state(len in 1..10u8) {
        let machine = chain_machine(len);

        // Node(len + 1) is never declared.
        let result = machine.go_to(&Node(len + 1), &());

        prop_assert!(result.is_err());
        prop_assert_eq!(machine.current_state().unwrap(), Node(0));
    }

    #[test]
    fn guard_is_deterministic(context in proptest::option::of(0..100u32), input in 0..100u32) {
        let guard = Guard::new(|ctx: Option<&u32>, input: &u32| ctx.is_some_and(|c| c > input));

        let first = guard.check(context.as_ref(), &input);
        let second = guard.check(context.as_ref(), &input);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn journal_preserves_record_order(hops in proptest::collection::vec((0..20u8, 0..20u8), 0..12)) {
        let mut journal: TransitionJournal<Node, Step> = TransitionJournal::new();
        for (i, (from, to)) in hops.iter().enumerate() {
            journal = journal.record(TransitionRecord {
                from: Node(*from),
                to: Node(*to),
                event: Some(Step(i as u8)),
                timestamp: Utc::now(),
            });
        }

        prop_assert_eq!(journal.records().len(), hops.len());
        for (record, (from, to)) in journal.records().iter().zip(&hops) {
            prop_assert_eq!(&record.from, &Node(*from));
            prop_assert_eq!(&record.to, &Node(*to));
        }

        let expected_path_len = if hops.is_empty() { 0 } else { hops.len() + 1 };
        prop_assert_eq!(journal.path().len(), expected_path_len);
    }

    #[test]
    fn journal_round_trips_through_serde(hops in proptest::collection::vec((0..20u8, 0..20u8), 0..8)) {
        let mut journal: TransitionJournal<Node, Step> = TransitionJournal::new();
        for (from, to) in &hops {
            journal = journal.record(TransitionRecord {
                from: Node(*from),
                to: Node(*to),
                event: None,
                timestamp: Utc::now(),
            });
        }

        let json = serde_json::to_string(&journal).unwrap();
        let restored: TransitionJournal<Node, Step> = serde_json::from_str(&json).unwrap();

        prop_assert_eq!(restored.records().len(), journal.records().len());
        prop_assert_eq!(restored.path(), journal.path());
    }

    #[test]
    fn partial_walks_keep_already_applied_hops(len in 2..8u8, cut in 1..8u8) {
        let cut = (cut % (len - 1)) + 1;

        // Same chain, but the hop out of Node(cut) is guarded shut.
        let mut builder = MachineBuilder::new().initial(Node(0)).context(0u32);
        for i in 0..len {
            let mut edge = TransitionBuilder::new().event(Step(i)).to(Node(i + 1));
            if i == cut {
                edge = edge.when(|_ctx, _input: &()| false);
            }
            builder = builder.state(
                StateDefinitionBuilder::new()
                    .state(Node(i))
                    .transition(edge)
                    .unwrap()
                    .build()
                    .unwrap(),
            );
        }
        let machine = builder
            .state(StateDefinitionBuilder::new().state(Node(len)).build().unwrap())
            .build()
            .unwrap();

        let report = machine.go_to(&Node(len), &()).unwrap();

        prop_assert!(!report.reached_target);
        prop_assert_eq!(report.reached, Node(cut));
        prop_assert_eq!(machine.journal().unwrap().records().len(), cut as usize);
    }
}
