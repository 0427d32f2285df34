//! Handler results.
//!
//! A handler hands the machine a [`Step`]: the state to commit and the
//! outcome of whatever side effect it ran. Handlers report effect failures
//! here instead of printing them; the engine surfaces the outcome through
//! its diagnostic log.

/// Outcome of the side effect a handler ran, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EffectOutcome {
    /// The handler ran no external effect.
    #[default]
    None,
    /// The effect completed.
    Completed,
    /// The effect failed, with the reported reason. The machine still
    /// commits the handler's returned state.
    Failed(String),
}

/// What a handler returns: the next state and the effect outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<S> {
    /// State to commit as the new current state.
    pub next: S,

    /// Outcome of the handler's side effect.
    pub outcome: EffectOutcome,
}

impl<S> Step<S> {
    /// A pure transition with no side effect.
    pub fn to(next: S) -> Self {
        Self {
            next,
            outcome: EffectOutcome::None,
        }
    }

    /// A transition whose side effect completed.
    pub fn completed(next: S) -> Self {
        Self {
            next,
            outcome: EffectOutcome::Completed,
        }
    }

    /// A transition whose side effect failed. The state still commits.
    pub fn failed(next: S, reason: impl Into<String>) -> Self {
        Self {
            next,
            outcome: EffectOutcome::Failed(reason.into()),
        }
    }
}
