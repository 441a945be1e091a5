//! # Meep
//!
//! A chatty, line-oriented task tracker. Type commands at the prompt and Meep
//! keeps a list of tasks (plus a log of everything you said), which it can
//! save to and load from a plain text file.
//!
//! ## Usage
//!
//! ### Console (default)
//!
//! ```bash
//! meep
//! # start from the saved list
//! meep --autoload
//! ```
//!
//! ### Interactive Mode (TUI)
//!
//! ```bash
//! meep ui
//! ```
//!
//! Responses appear as chat bubbles. `F1` opens the help popup, `Esc` quits.
//!
//! ### Scripting
//!
//! ```bash
//! meep exec "todo buy milk" "list"
//! ```
//!
//! Prints one JSON object per line: `{"response": "...", "category": "AddTask"}`.
//!
//! ## Commands
//!
//! ```text
//! hello | how are you? | list | list messages | help | bye
//! todo <description>
//! deadline <description> /by <yyyy-MM-dd>
//! event <description> /from <yyyy-MM-dd> /to <yyyy-MM-dd>
//! mark <n> | unmark <n> | delete <n>
//! find <keyword>
//! check due <yyyy-MM-dd>
//! save | load
//! ```
//!
//! ## Data Storage
//!
//! Tasks are saved to `data/meep.txt` under the working directory, one record
//! per line. Override with `--file` or the `MEEP_DB` environment variable.
//!
//! Diagnostics go to stderr; set `MEEP_LOG` (e.g. `MEEP_LOG=debug`) to see them.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use tracing_subscriber::EnvFilter;

use meep::commands::{Command, Response, Session, BANNER};
use meep::parser::{parse, Parsed};
use meep::storage::{db_path, Storage};
use meep::tui::run_tui;

#[derive(Parser)]
#[command(name = "meep")]
#[command(about = "Chatty line-oriented task tracker", long_about = None)]
struct Cli {
    /// Task file to save to and load from
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,
    /// Load saved tasks before the first prompt
    #[arg(short, long, global = true)]
    autoload: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat-style TUI
    Ui,
    /// Run command lines non-interactively and print JSON responses
    Exec {
        /// Command lines, e.g. "todo buy milk"
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        shell: String,
    },
}

fn init_logging(quiet_default: bool) {
    let fallback = if quiet_default { "off" } else { "warn" };
    let filter = EnvFilter::try_from_env("MEEP_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn print_json(response: &Response) {
    match serde_json::to_string(response) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to encode response: {}", e),
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(matches!(cli.command, Some(Commands::Ui)));

    let storage = Storage::new(cli.file.clone().unwrap_or_else(db_path));
    let mut session = Session::new(storage);

    match cli.command {
        None => {
            if let Err(e) = run_console(&mut session, cli.autoload) {
                eprintln!("Error running console: {}", e);
            }
        }
        Some(Commands::Ui) => {
            if let Err(e) = run_tui(session, cli.autoload) {
                eprintln!("Error running TUI: {}", e);
            }
        }
        Some(Commands::Exec { lines }) => {
            if cli.autoload {
                print_json(&session.execute(Command::Load));
            }
            for line in lines {
                print_json(&session.respond(&line));
            }
        }
        Some(Commands::Completions { shell }) => {
            let shell_enum = match shell.as_str() {
                "bash" => Shell::Bash,
                "zsh" => Shell::Zsh,
                "fish" => Shell::Fish,
                "powershell" => Shell::PowerShell,
                "elvish" => Shell::Elvish,
                _ => {
                    eprintln!("Unsupported shell: {}", shell);
                    return;
                }
            };
            let mut cmd = Cli::command();
            generate(shell_enum, &mut cmd, "meep", &mut io::stdout());
        }
    }
}

/// Prints a response framed by horizontal rules.
fn print_response(out: &mut impl Write, response: &str) -> io::Result<()> {
    let rule = "-".repeat(50);
    writeln!(out, "{}\n{}\n{}", rule, response, rule)
}

/// Reads lines until `bye` or end of input, printing each non-empty response.
fn run_console(session: &mut Session, autoload: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    print_response(&mut out, BANNER)?;
    if autoload {
        let response = Command::Load.execute(session);
        print_response(&mut out, &response)?;
    }

    for line in stdin.lock().lines() {
        let line = line?;
        let response = match parse(session, &line) {
            Parsed::Reply(text) => text,
            Parsed::Command(command) => {
                let exit = command.is_exit();
                let response = command.execute(session);
                if exit {
                    print_response(&mut out, &response)?;
                    return Ok(());
                }
                response
            }
        };
        if !response.is_empty() {
            print_response(&mut out, &response)?;
        }
    }
    Ok(())
}
