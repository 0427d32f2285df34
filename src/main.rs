//! lumen - LED lamp controller
//!
//! Drives a three-state LED lamp (off, blinking, steady) through a small
//! generic finite state machine. Button events come from one-shot command
//! invocations or an interactive REPL; the LED itself is actuated by an
//! external control command.

mod lamp;
mod led;
mod repl;

use clap::{Parser, Subcommand};
use colored::Colorize;
use lamp::Button;
use led::LedDriver;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lumen")]
#[command(about = "LED lamp controller driven by a finite state machine")]
#[command(version)]
struct Cli {
    /// LED control command; the mode argument (off/blinks/light) is appended
    /// on each invocation
    #[arg(long, env = "LUMEN_LED_CMD", default_value = "python3 led.py")]
    led_cmd: String,

    /// Log LED actuations instead of running the control command
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive REPL
    Repl,

    /// Press one or more buttons and print the realized transitions
    Press {
        /// Buttons to press, in order
        #[arg(required = true, value_enum)]
        buttons: Vec<Button>,

        /// Emit one JSON object per dispatch instead of plain text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let driver = LedDriver::from_command_line(&cli.led_cmd, cli.dry_run)?;
    let fsm = lamp::build(driver);

    match cli.command {
        Some(Commands::Repl) | None => {
            repl::run(&fsm)?;
        }
        Some(Commands::Press { buttons, json }) => {
            for button in buttons {
                let from = fsm.state();
                let to = fsm.call(&button);
                if json {
                    let record = serde_json::json!({
                        "button": button,
                        "from": from,
                        "to": to,
                    });
                    println!("{}", record);
                } else {
                    println!(
                        "{} {} → {}",
                        button.to_string().cyan(),
                        from,
                        to.to_string().yellow()
                    );
                }
            }
        }
    }

    Ok(())
}
