//! Interactive REPL.

use crate::lamp::{Button, LampState};
use colored::Colorize;
use lumen_fsm::Fsm;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

const HELP_TEXT: &str = r#"
Available commands:
  off                 Press the off button
  blink               Press the blink button
  steady              Press the steady button

  state               Show the current lamp state
  help                Show this help

  quit, exit          Exit the REPL
"#;

pub fn run(fsm: &Fsm<LampState, Button>) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "lumen lamp".bold().cyan());

    let config = Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .build();
    let mut rl: Editor<(), DefaultHistory> = Editor::with_config(config)?;

    let history_path = std::env::var("HOME")
        .map(|h| std::path::PathBuf::from(h).join(".lumen_history"))
        .unwrap_or_else(|_| ".lumen_history".into());
    let _ = rl.load_history(&history_path);

    println!(
        "Lamp is {}. Type 'help' for available commands.\n",
        fsm.state().to_string().yellow()
    );

    loop {
        let prompt = format!("{} ", "lumen>".cyan());
        match rl.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match execute_repl_command(fsm, line) {
                    Some(output) => println!("{}\n", output),
                    None => break, // Exit command
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                println!("{}: {:?}", "Error".red(), err);
                break;
            }
        }
    }

    let _ = rl.save_history(&history_path);
    Ok(())
}

fn execute_repl_command(fsm: &Fsm<LampState, Button>, line: &str) -> Option<String> {
    let cmd = line
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match cmd.as_str() {
        "help" | "?" => Some(HELP_TEXT.to_string()),

        "quit" | "exit" | "q" => None,

        "state" | "s" => Some(fsm.state().to_string().yellow().to_string()),

        "off" | "blink" | "steady" => {
            let button = match cmd.as_str() {
                "off" => Button::Off,
                "blink" => Button::Blink,
                _ => Button::Steady,
            };
            let from = fsm.state();
            let to = fsm.call(&button);
            Some(format!(
                "{} {} → {}",
                button.to_string().cyan(),
                from,
                to.to_string().yellow()
            ))
        }

        _ => Some(format!("Unknown command: {}. Type 'help' for help.", cmd)),
    }
}
