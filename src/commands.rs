use std::fmt;

use serde::Serialize;
use tracing::{debug, error};

use crate::dates::{display_raw, parse_date, INPUT_PATTERN};
use crate::error::TaskError;
use crate::lists::{MessageList, TaskList};
use crate::models::{Message, Task};
use crate::parser::parse_quiet;
use crate::storage::Storage;

pub const GREETING: &str = "Hello there!";
pub const HOW_ARE_YOU: &str = "I'm just a program, but thanks for asking!";
pub const FAREWELL: &str = "Bye. Hope to see you again soon!";
pub const BANNER: &str = "Hello from Meep!\nWhat can I do for you?";

/// Stable label for each kind of command, used by front-ends for styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    AddMessage,
    AddTask,
    Hello,
    HowAreYou,
    ListMessages,
    ListTasks,
    Mark,
    Unmark,
    Delete,
    Save,
    Load,
    CheckDue,
    Help,
    Find,
    Unknown,
    Error,
    Bye,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AddMessage => "AddMessage",
            Category::AddTask => "AddTask",
            Category::Hello => "Hello",
            Category::HowAreYou => "HowAreYou",
            Category::ListMessages => "ListMessages",
            Category::ListTasks => "ListTasks",
            Category::Mark => "Mark",
            Category::Unmark => "Unmark",
            Category::Delete => "Delete",
            Category::Save => "Save",
            Category::Load => "Load",
            Category::CheckDue => "CheckDue",
            Category::Help => "Help",
            Category::Find => "Find",
            Category::Unknown => "Unknown",
            Category::Error => "Error",
            Category::Bye => "Bye",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed user request, carrying its own validated arguments.
///
/// Task numbers are the 1-based positions the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddMessage(String),
    Hello,
    HowAreYou,
    ListMessages,
    ListTasks,
    Mark(i64),
    Unmark(i64),
    Delete(i64),
    AddTask(String),
    Save,
    Load,
    CheckDue(String),
    Find(String),
    Help,
    Unknown(String),
    Bye,
}

impl Command {
    pub fn category(&self) -> Category {
        match self {
            Command::AddMessage(_) => Category::AddMessage,
            Command::Hello => Category::Hello,
            Command::HowAreYou => Category::HowAreYou,
            Command::ListMessages => Category::ListMessages,
            Command::ListTasks => Category::ListTasks,
            Command::Mark(_) => Category::Mark,
            Command::Unmark(_) => Category::Unmark,
            Command::Delete(_) => Category::Delete,
            Command::AddTask(_) => Category::AddTask,
            Command::Save => Category::Save,
            Command::Load => Category::Load,
            Command::CheckDue(_) => Category::CheckDue,
            Command::Find(_) => Category::Find,
            Command::Help => Category::Help,
            Command::Unknown(_) => Category::Unknown,
            Command::Bye => Category::Bye,
        }
    }

    /// Whether the front-end should stop reading input after this command.
    pub fn is_exit(&self) -> bool {
        matches!(self, Command::Bye)
    }

    /// Runs the command against `session` and returns the text to show.
    ///
    /// An empty string means nothing should be displayed.
    pub fn execute(self, session: &mut Session) -> String {
        debug!(category = %self.category(), "executing command");
        match self {
            Command::AddMessage(text) => {
                session.messages.push(Message::new(text));
                String::new()
            }
            Command::Hello => GREETING.to_string(),
            Command::HowAreYou => HOW_ARE_YOU.to_string(),
            Command::ListMessages => list_messages(&session.messages),
            Command::ListTasks => list_tasks(&session.tasks),
            Command::Mark(n) => match task_mut(&mut session.tasks, n) {
                Some(task) => {
                    task.mark_done();
                    format!("Task {} marked as done.\n{}", n, task)
                }
                None => String::new(),
            },
            Command::Unmark(n) => match task_mut(&mut session.tasks, n) {
                Some(task) => {
                    task.mark_not_done();
                    format!("Task {} marked as not done.\n{}", n, task)
                }
                None => String::new(),
            },
            Command::Delete(n) => match task_index(&session.tasks, n)
                .and_then(|i| session.tasks.remove(i).ok())
            {
                Some(task) => {
                    debug!(task = %task, "deleted task");
                    format!("Task {} deleted.", n)
                }
                None => String::new(),
            },
            Command::AddTask(raw) => match Task::build(&raw) {
                Ok(task) => {
                    let shown = task.to_string();
                    session.tasks.push(task);
                    debug!(task = %shown, "added task");
                    format!(
                        "Got it. I've added this task:\n{}\nNow you have {} tasks in the list.",
                        shown,
                        session.tasks.len()
                    )
                }
                Err(e) => e.to_string(),
            },
            Command::Save => match session.storage.save(&session.tasks) {
                Ok(()) => "Tasks saved successfully.".to_string(),
                Err(e) => {
                    error!(error = %e, "failed to save tasks");
                    "Error saving tasks.".to_string()
                }
            },
            Command::Load => load(session),
            Command::CheckDue(date) => check_due(&session.tasks, &date),
            Command::Find(needle) => find(&session.tasks, &needle),
            Command::Help => help(),
            Command::Unknown(raw) => {
                let first = raw.split(' ').next().unwrap_or_default();
                format!("Unrecognised command: \"{}\" Parrotting...\n{}", first, raw)
            }
            Command::Bye => FAREWELL.to_string(),
        }
    }
}

/// Maps a 1-based task number to a valid 0-based index, if there is one.
///
/// Out-of-range numbers are swallowed: mark/unmark/delete respond with nothing.
fn task_index(tasks: &TaskList, n: i64) -> Option<usize> {
    let index = usize::try_from(n).ok()?.checked_sub(1)?;
    if index < tasks.len() {
        Some(index)
    } else {
        debug!(number = n, len = tasks.len(), "ignoring out-of-range task number");
        None
    }
}

fn task_mut(tasks: &mut TaskList, n: i64) -> Option<&mut Task> {
    let index = task_index(tasks, n)?;
    tasks.get_mut(index).ok()
}

fn list_messages(messages: &MessageList) -> String {
    let mut response = String::from("Here are all the messages I've received:");
    messages.for_each_indexed(|i, msg| {
        response.push_str(&format!("\n {}. {}", i + 1, msg));
    });
    response
}

fn list_tasks(tasks: &TaskList) -> String {
    let mut response = String::from("Here are all the tasks:");
    tasks.for_each_indexed(|i, task| {
        response.push_str(&format!("\n {}. {}", i + 1, task));
    });
    response.push_str(&format!("\nNow you have {} tasks in the list.", tasks.len()));
    response
}

fn load(session: &mut Session) -> String {
    match session.storage.load(&mut session.tasks) {
        Ok(report) if report.is_clean() => "Tasks loaded successfully.".to_string(),
        Ok(report) => {
            let mut response = String::new();
            for (line, e) in &report.skipped {
                response.push_str(&format!("Skipped line {}: {}\n", line, e));
            }
            response.push_str(&format!(
                "Loaded {} tasks; {} malformed lines skipped.",
                report.loaded,
                report.skipped.len()
            ));
            response
        }
        Err(e) => {
            error!(error = %e, "failed to load tasks");
            format!("{}\nError loading tasks.", e)
        }
    }
}

fn check_due(tasks: &TaskList, date: &str) -> String {
    if parse_date(date).is_none() {
        return TaskError::InvalidDate(date.to_string()).to_string();
    }
    let mut response = format!("Checking for due tasks on {}...", display_raw(date));
    for (_, task) in tasks.due_on(date) {
        response.push_str(&format!("\n{}", task));
    }
    response
}

fn find(tasks: &TaskList, needle: &str) -> String {
    let mut matches = tasks.matching(needle).peekable();
    if matches.peek().is_none() {
        return format!("No tasks found matching: \"{}\"", needle);
    }
    let mut response = format!("Found the following tasks matching: \"{}\":", needle);
    for (i, task) in matches {
        response.push_str(&format!("\n {}) {}", i + 1, task));
    }
    response
}

fn help() -> String {
    let entries = [
        ("hello", "Greet the program! be polite :)".to_string()),
        ("how are you?", "Ask the program how it is doing".to_string()),
        ("list messages", "List all messages received".to_string()),
        ("list", "List all tasks".to_string()),
        ("help", "Show this help message".to_string()),
        ("todo <todo description>", "Add a Todo Task to task list".to_string()),
        (
            "deadline <deadline description> /by <deadline time>",
            format!("Add a Deadline Task to task list (format: {})", INPUT_PATTERN),
        ),
        (
            "event <event description> /from <start time> /to <end time>",
            format!("Add an Event Task to task list (format: {})", INPUT_PATTERN),
        ),
        ("mark <task number>", "Mark a task as done".to_string()),
        ("unmark <task number>", "Mark a task as not done".to_string()),
        ("delete <task number>", "Delete a task".to_string()),
        (
            "check due <date>",
            format!(
                "Check for tasks that are due before the specified date (format: {})",
                INPUT_PATTERN
            ),
        ),
        ("find <keyword>", "Find tasks whose description contains the keyword".to_string()),
        ("save", "Save all tasks to disk".to_string()),
        ("load", "Replace the task list with the tasks saved on disk".to_string()),
        ("bye", "Exit the program".to_string()),
    ];
    let mut response = String::from("Here are the list of commands! [case-sensitive]\n");
    for (usage, about) in entries {
        response.push_str(&format!("\n{}:\n\t{}", usage, about));
    }
    response
}

/// Response text paired with the category of the command that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub response: String,
    pub category: Category,
}

/// Owns the task and message lists and the storage they persist to.
///
/// Nothing here is synchronised; hosts sharing a session across threads must
/// wrap the whole session in a lock.
#[derive(Debug)]
pub struct Session {
    pub tasks: TaskList,
    pub messages: MessageList,
    pub storage: Storage,
}

impl Session {
    pub fn new(storage: Storage) -> Self {
        Session {
            tasks: TaskList::new(),
            messages: MessageList::new(),
            storage,
        }
    }

    /// Executes an already-built command, tagging the text with its category.
    pub fn execute(&mut self, command: Command) -> Response {
        let category = command.category();
        Response {
            response: command.execute(self),
            category,
        }
    }

    /// Parses quietly and executes `line`, for non-interactive callers.
    ///
    /// Parse failures come back as an `Error` response rather than an `Err`.
    pub fn respond(&mut self, line: &str) -> Response {
        match parse_quiet(self, line) {
            Ok(command) => self.execute(command),
            Err(e) => Response {
                response: format!("Error: {}", e),
                category: Category::Error,
            },
        }
    }
}
