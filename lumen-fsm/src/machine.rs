//! The finite state machine engine.
//!
//! An [`Fsm`] owns one current state and one transition table, both behind a
//! single exclusive lock. Dispatch acquires the lock for the full duration of
//! table lookup, handler invocation, and state commit, so handlers for one
//! instance never run concurrently. A slow handler stalls every other caller
//! dispatching into the same instance for as long as it runs.

use crate::step::{EffectOutcome, Step};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

/// A registered transition action: runs its side effect and names the state
/// to commit. One handler is registered per (state, event) pair; closures
/// sharing captured state may back any number of pairs.
pub type Handler<S> = Box<dyn FnMut() -> Step<S> + Send>;

/// A finite state machine over caller-defined state and event keys.
///
/// The state and event universes are open: the engine only compares and
/// hashes them. There is no terminal state; any state may be re-entered, and
/// a state with no registered handlers simply turns every dispatch into a
/// no-op.
pub struct Fsm<S, E> {
    inner: Mutex<Inner<S, E>>,
}

struct Inner<S, E> {
    state: S,
    table: HashMap<S, HashMap<E, Handler<S>>>,
}

impl<S, E> Fsm<S, E>
where
    S: Clone + Eq + Hash + Debug,
    E: Eq + Hash + Debug,
{
    /// Creates a machine in the given initial state with an empty transition
    /// table.
    ///
    /// The initial state is accepted as-is; it is never validated against the
    /// table, which may be populated afterwards.
    pub fn new(initial: S) -> Self {
        Self {
            inner: Mutex::new(Inner {
                state: initial,
                table: HashMap::new(),
            }),
        }
    }

    /// Registers `handler` to run when `event` is dispatched while the
    /// current state equals `state`. Returns the machine for chained
    /// registration.
    ///
    /// Re-registering a (state, event) pair logs a warning and overwrites the
    /// previous handler; the last registration wins. Table mutation takes the
    /// same lock as dispatch, so registering while other threads dispatch is
    /// safe.
    pub fn add_handler(
        &self,
        state: S,
        event: E,
        handler: impl FnMut() -> Step<S> + Send + 'static,
    ) -> &Self {
        let mut inner = self.inner.lock();
        let events = inner.table.entry(state.clone()).or_default();
        if events.contains_key(&event) {
            tracing::warn!(
                "handler for state {:?} event {:?} already registered, overwriting",
                state,
                event
            );
        }
        events.insert(event, Box::new(handler));
        self
    }

    /// Dispatches an event and returns the resulting current state.
    ///
    /// If the current state has no handler for `event`, the state is returned
    /// unchanged; an unregistered transition is a defined no-op, not an
    /// error. Otherwise the handler runs under the lock, its returned state
    /// commits unconditionally (self-transitions included), and the realized
    /// transition is logged. A failed effect outcome is logged as a warning
    /// but never withholds the commit.
    pub fn call(&self, event: &E) -> S {
        let mut inner = self.inner.lock();
        let Inner { state, table } = &mut *inner;

        let Some(events) = table.get_mut(state) else {
            tracing::trace!("no handlers registered for state {:?}", state);
            return state.clone();
        };
        let Some(handler) = events.get_mut(event) else {
            tracing::trace!("no handler for event {:?} in state {:?}", event, state);
            return state.clone();
        };

        let step = handler();
        let old = std::mem::replace(state, step.next);
        if let EffectOutcome::Failed(reason) = &step.outcome {
            tracing::warn!(
                "handler effect failed on {:?} ({:?} to {:?}): {}",
                event,
                old,
                state,
                reason
            );
        }
        tracing::debug!("state changed from {:?} to {:?} on {:?}", old, state, event);
        state.clone()
    }

    /// Returns a snapshot of the current state.
    ///
    /// The snapshot is taken under the lock, but the machine may transition
    /// again before the caller looks at the value. Callers needing a read
    /// consistent with concurrent dispatch must route reads through [`call`]
    /// or treat this value as possibly stale.
    ///
    /// [`call`]: Fsm::call
    pub fn state(&self) -> S {
        self.inner.lock().state.clone()
    }

    /// Overwrites the current state without running any handler.
    ///
    /// No validation: any value is acceptable, including one with no
    /// registered transitions, which makes subsequent dispatches no-ops.
    pub fn set_state(&self, state: S) {
        self.inner.lock().state = state;
    }
}
