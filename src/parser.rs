use tracing::debug;

use crate::commands::{Command, Session};
use crate::error::ParseError;

/// Result of parsing a line in interactive mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// A command ready to execute.
    Command(Command),
    /// No command was built; show this text instead.
    Reply(String),
}

/// Parses a line typed at the prompt.
///
/// The raw line is always recorded as a message first. A non-numeric task
/// number is answered directly with `Invalid task number.`.
pub fn parse(session: &mut Session, line: &str) -> Parsed {
    Command::AddMessage(line.to_string()).execute(session);
    match dispatch(line) {
        Ok(command) => Parsed::Command(command),
        Err(e) => Parsed::Reply(e.to_string()),
    }
}

/// Parses a line without answering errors itself, for non-interactive callers.
///
/// Leading, trailing and repeated whitespace is collapsed before dispatch; the
/// raw line is still what gets recorded.
pub fn parse_quiet(session: &mut Session, line: &str) -> Result<Command, ParseError> {
    Command::AddMessage(line.to_string()).execute(session);
    let normalized = line.split_whitespace().collect::<Vec<_>>().join(" ");
    dispatch(&normalized)
}

fn dispatch(line: &str) -> Result<Command, ParseError> {
    let command = match line {
        "hello" => Command::Hello,
        "how are you?" => Command::HowAreYou,
        "list messages" => Command::ListMessages,
        "list" => Command::ListTasks,
        "help" => Command::Help,
        "bye" => Command::Bye,
        _ if line.starts_with("mark ") => Command::Mark(task_number(line)?),
        _ if line.starts_with("unmark ") => Command::Unmark(task_number(line)?),
        _ if line.starts_with("delete ") => Command::Delete(task_number(line)?),
        _ if matches!(first_token(line), "todo" | "deadline" | "event") => {
            Command::AddTask(line.to_string())
        }
        _ if line.starts_with("save") => Command::Save,
        _ if line.starts_with("load") => Command::Load,
        _ if line.starts_with("check due") => {
            Command::CheckDue(line.get("check due".len()..).unwrap_or_default().trim().to_string())
        }
        _ if line.starts_with("find ") => {
            Command::Find(line.split_once(' ').map(|(_, rest)| rest).unwrap_or_default().to_string())
        }
        _ => Command::Unknown(line.to_string()),
    };
    debug!(line, category = %command.category(), "dispatched");
    Ok(command)
}

fn first_token(line: &str) -> &str {
    line.split(' ').next().unwrap_or_default()
}

/// Reads the second space-separated token as a task number.
fn task_number(line: &str) -> Result<i64, ParseError> {
    line.split(' ')
        .nth(1)
        .and_then(|n| n.parse::<i64>().ok())
        .ok_or_else(|| ParseError::InvalidTaskNumber(line.to_string()))
}
