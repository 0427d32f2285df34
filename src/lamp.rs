//! The lamp state machine.
//!
//! Three states, three buttons, every button handled in every state: each
//! handler drives the LED into the button's mode and names that mode's state
//! as the next state. A failed LED invocation is reported through the step
//! outcome; the lamp still commits to the target state.

use crate::led::{LedDriver, LedMode};
use clap::ValueEnum;
use lumen_fsm::{Fsm, Step};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// States the lamp can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LampState {
    Off,
    Blinking,
    Steady,
}

impl fmt::Display for LampState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LampState::Off => "off",
            LampState::Blinking => "blinking",
            LampState::Steady => "steady",
        })
    }
}

/// Buttons dispatched into the lamp as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    Off,
    Blink,
    Steady,
}

impl Button {
    /// The state this button drives the lamp into, and the LED mode that
    /// realizes it.
    fn target(self) -> (LampState, LedMode) {
        match self {
            Button::Off => (LampState::Off, LedMode::Off),
            Button::Blink => (LampState::Blinking, LedMode::Blink),
            Button::Steady => (LampState::Steady, LedMode::Steady),
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Button::Off => "off",
            Button::Blink => "blink",
            Button::Steady => "steady",
        })
    }
}

const STATES: [LampState; 3] = [LampState::Off, LampState::Blinking, LampState::Steady];
const BUTTONS: [Button; 3] = [Button::Off, Button::Blink, Button::Steady];

/// Builds the lamp machine: initial state off, every button registered in
/// every state. The machine and its table are owned by the returned value;
/// nothing is process-global.
pub fn build(driver: LedDriver) -> Fsm<LampState, Button> {
    let driver = Arc::new(driver);
    let fsm = Fsm::new(LampState::Off);
    for state in STATES {
        for button in BUTTONS {
            let driver = driver.clone();
            let (target, mode) = button.target();
            fsm.add_handler(state, button, move || match driver.apply(mode) {
                Ok(()) => Step::completed(target),
                Err(e) => Step::failed(target, e.to_string()),
            });
        }
    }
    fsm
}
