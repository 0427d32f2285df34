//! LED control invocation.
//!
//! The LED itself is owned by an external control command (on the reference
//! hardware, a GPIO script). The driver appends a mode argument to a
//! configured command line and requires the command to exit zero with output
//! beginning with `success`; anything else is a failed actuation.

use std::fmt;
use std::process::Command;
use thiserror::Error;

/// Modes the LED control command understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedMode {
    Off,
    Blink,
    Steady,
}

impl LedMode {
    /// Argument the control command expects for this mode.
    pub fn as_arg(self) -> &'static str {
        match self {
            LedMode::Off => "off",
            LedMode::Blink => "blinks",
            LedMode::Steady => "light",
        }
    }
}

impl fmt::Display for LedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// Errors from the LED control command.
#[derive(Debug, Error)]
pub enum LedError {
    #[error("LED command line is empty")]
    EmptyCommand,

    #[error("failed to run LED command: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("LED command exited with status {status}: {stderr}")]
    Exit { status: i32, stderr: String },

    #[error("LED command rejected mode '{mode}': {output}")]
    Rejected { mode: LedMode, output: String },
}

/// Invokes the external LED control command.
#[derive(Debug, Clone)]
pub struct LedDriver {
    program: String,
    args: Vec<String>,
    dry_run: bool,
}

impl LedDriver {
    /// Parses a whitespace-separated command line, e.g. `python3 led.py`.
    /// Quoting is not supported; arguments may not contain spaces.
    pub fn from_command_line(command: &str, dry_run: bool) -> Result<Self, LedError> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().ok_or(LedError::EmptyCommand)?;
        Ok(Self {
            program,
            args: parts.collect(),
            dry_run,
        })
    }

    /// A driver that logs instead of touching hardware.
    pub fn disconnected() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            dry_run: true,
        }
    }

    /// Drives the LED into the given mode.
    pub fn apply(&self, mode: LedMode) -> Result<(), LedError> {
        if self.dry_run {
            tracing::info!("dry run: LED set to {}", mode);
            return Ok(());
        }

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(mode.as_arg())
            .output()?;

        if !output.status.success() {
            return Err(LedError::Exit {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.starts_with("success") {
            return Err(LedError::Rejected {
                mode,
                output: stdout.trim().to_string(),
            });
        }
        Ok(())
    }
}
