//! Property-based tests for the FSM engine.
//!
//! These tests use proptest to check dispatch behavior against a reference
//! model across many randomly generated transition tables and event
//! sequences.

use lumen_fsm::{Fsm, Label, Step};
use proptest::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn state(i: usize) -> Label {
    Label::new(format!("s{}", i))
}

fn event(i: usize) -> Label {
    Label::new(format!("e{}", i))
}

proptest! {
    #[test]
    fn unregistered_events_never_move_the_state(
        initial in "[a-z]{1,8}",
        events in prop::collection::vec("[a-z]{1,8}", 0..32),
    ) {
        let fsm = Fsm::new(Label::new(initial.clone()));
        for e in &events {
            prop_assert_eq!(fsm.call(&Label::new(e.clone())), Label::new(initial.clone()));
        }
        prop_assert_eq!(fsm.state(), Label::new(initial));
    }

    #[test]
    fn dispatch_matches_reference_model(
        triples in prop::collection::vec((0usize..4, 0usize..4, 0usize..4), 0..24),
        sequence in prop::collection::vec(0usize..4, 0..48),
    ) {
        let fsm = Fsm::new(state(0));
        let mut model: HashMap<(usize, usize), usize> = HashMap::new();
        for &(from, ev, to) in &triples {
            // Same insertion order as the engine, so last-wins overwrite
            // semantics agree.
            model.insert((from, ev), to);
            fsm.add_handler(state(from), event(ev), move || Step::to(state(to)));
        }

        let mut current = 0usize;
        for &ev in &sequence {
            if let Some(&to) = model.get(&(current, ev)) {
                current = to;
            }
            prop_assert_eq!(fsm.call(&event(ev)), state(current));
        }
    }

    #[test]
    fn only_the_last_registration_runs(count in 1usize..8) {
        let fsm = Fsm::new(state(0));
        let hits: Vec<Arc<AtomicUsize>> =
            (0..count).map(|_| Arc::new(AtomicUsize::new(0))).collect();
        for hit in &hits {
            let hit = hit.clone();
            fsm.add_handler(state(0), event(0), move || {
                hit.fetch_add(1, Ordering::SeqCst);
                Step::to(state(1))
            });
        }

        prop_assert_eq!(fsm.call(&event(0)), state(1));
        for (i, hit) in hits.iter().enumerate() {
            let expected = if i == count - 1 { 1 } else { 0 };
            prop_assert_eq!(hit.load(Ordering::SeqCst), expected);
        }
    }
}
