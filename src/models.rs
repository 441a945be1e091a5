use std::fmt;

use chrono::{Local, NaiveDate, NaiveDateTime};

use crate::dates::{
    format_input, format_output, is_overdue, parse_date, INPUT_PATTERN, TIMESTAMP_FORMAT,
};
use crate::error::{RecordError, TaskError};

/// The variant-specific part of a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskKind {
    /// A plain to-do item; never due.
    Todo,
    /// Must be done by the given date.
    Deadline { by: NaiveDate },
    /// Spans `from` to `to`, with `from` strictly before `to`.
    Event { from: NaiveDate, to: NaiveDate },
}

impl TaskKind {
    /// One-letter tag used both in display strings and save records.
    pub fn tag(&self) -> char {
        match self {
            TaskKind::Todo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }
}

/// Represents a single task in the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    completed: bool,
    kind: TaskKind,
}

impl Task {
    /// Creates a to-do task.
    pub fn todo(description: &str) -> Result<Task, TaskError> {
        Task::new(description, TaskKind::Todo)
    }

    /// Creates a deadline task from a raw date in the input format.
    pub fn deadline(description: &str, by: &str) -> Result<Task, TaskError> {
        let description = checked_description(description)?;
        if by.trim().is_empty() {
            return Err(TaskError::MissingDeadline);
        }
        let by = parse_required_date(by)?;
        Ok(Task {
            description,
            completed: false,
            kind: TaskKind::Deadline { by },
        })
    }

    /// Creates an event task from raw start and end dates in the input format.
    pub fn event(description: &str, from: &str, to: &str) -> Result<Task, TaskError> {
        let description = checked_description(description)?;
        if from.trim().is_empty() {
            return Err(TaskError::MissingEventStart);
        }
        if to.trim().is_empty() {
            return Err(TaskError::MissingEventEnd);
        }
        let from = parse_required_date(from)?;
        let to = parse_required_date(to)?;
        if from >= to {
            return Err(TaskError::EventOrder);
        }
        Ok(Task {
            description,
            completed: false,
            kind: TaskKind::Event { from, to },
        })
    }

    fn new(description: &str, kind: TaskKind) -> Result<Task, TaskError> {
        Ok(Task {
            description: checked_description(description)?,
            completed: false,
            kind,
        })
    }

    /// Builds a task from a `todo`, `deadline` or `event` command line.
    ///
    /// Parameters are introduced by `/by`, `/from` and `/to`. Anything before the
    /// first `/` is the description.
    pub fn build(line: &str) -> Result<Task, TaskError> {
        if let Some(rest) = line.strip_prefix("todo ") {
            return Task::todo(rest);
        }
        if let Some(rest) = line.strip_prefix("deadline ") {
            let rest = rest.trim();
            let by = extract_parameter(rest, "by")?;
            return Task::deadline(description_segment(rest), &by);
        }
        if let Some(rest) = line.strip_prefix("event ") {
            let rest = rest.trim();
            let from = extract_parameter(rest, "from")?;
            let to = extract_parameter(rest, "to")?;
            return Task::event(description_segment(rest), &from, &to);
        }
        Err(TaskError::UnknownKind(line.to_string()))
    }

    /// Reconstructs a task from one line of a save file.
    ///
    /// The same constructors are used as for user input, so a corrupted date or
    /// an inverted event range fails to load.
    pub fn deserialize(line: &str) -> Result<Task, RecordError> {
        let parts: Vec<&str> = line.split('|').collect();
        if parts.len() < 3 || parts[1].is_empty() {
            return Err(RecordError::Malformed(line.to_string()));
        }
        let completed = match parts[2] {
            "1" => true,
            "0" => false,
            other => return Err(RecordError::CompletionFlag(other.to_string())),
        };
        // Leading empty field, tag, flag, description, optional extra, trailing empty field.
        let expected = match parts[1] {
            "T" => 5,
            "D" | "E" => 6,
            other => return Err(RecordError::UnknownType(other.to_string())),
        };
        if parts.len() > expected {
            return Err(RecordError::Malformed(line.to_string()));
        }
        let field = |idx: usize, name: &'static str| {
            parts.get(idx).copied().ok_or_else(|| RecordError::MissingField {
                field: name,
                line: line.to_string(),
            })
        };

        let mut task = match parts[1] {
            "T" => Task::todo(field(3, "description")?)?,
            "D" => Task::deadline(field(3, "description")?, field(4, "deadline")?)?,
            "E" => {
                let description = field(3, "description")?;
                let (from, to) = split_range(field(4, "event range")?);
                Task::event(description, from, to)?
            }
            other => return Err(RecordError::UnknownType(other.to_string())),
        };
        if parts.len() < expected || !parts[expected - 1].is_empty() {
            return Err(RecordError::Malformed(line.to_string()));
        }
        task.completed = completed;
        Ok(task)
    }

    /// Serializes the task to a pipe-delimited record, e.g. `|D|1|desc|2025-01-01|`.
    pub fn serialize(&self) -> String {
        let mut parts = vec![
            self.kind.tag().to_string(),
            if self.completed { "1" } else { "0" }.to_string(),
            self.description.clone(),
        ];
        match &self.kind {
            TaskKind::Todo => {}
            TaskKind::Deadline { by } => parts.push(format_input(*by)),
            TaskKind::Event { from, to } => {
                parts.push(format!("{}-{}", format_input(*from), format_input(*to)))
            }
        }
        format!("|{}|", parts.join("|"))
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn mark_done(&mut self) {
        self.completed = true;
    }

    pub fn mark_not_done(&mut self) {
        self.completed = false;
    }

    /// Whether the task is overdue relative to `query` (a date in the input format).
    ///
    /// Deadlines compare against their due date, events against their end date.
    /// Todos are never due.
    pub fn is_due(&self, query: &str) -> bool {
        match self.kind {
            TaskKind::Todo => false,
            TaskKind::Deadline { by } => is_overdue(by, self.completed, query),
            TaskKind::Event { to, .. } => is_overdue(to, self.completed, query),
        }
    }

    /// Case-sensitive substring search over the description.
    pub fn description_contains(&self, needle: &str) -> bool {
        self.description.contains(needle)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { 'X' } else { ' ' };
        write!(f, "[{}][{}] {}", self.kind.tag(), mark, self.description)?;
        match &self.kind {
            TaskKind::Todo => Ok(()),
            TaskKind::Deadline { by } => write!(f, " (by: {})", format_output(*by)),
            TaskKind::Event { from, to } => write!(
                f,
                " (from: {} to: {})",
                format_output(*from),
                format_output(*to)
            ),
        }
    }
}

fn checked_description(description: &str) -> Result<String, TaskError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(TaskError::EmptyDescription);
    }
    if description.contains('|') {
        return Err(TaskError::PipeInDescription);
    }
    Ok(description.to_string())
}

fn parse_required_date(raw: &str) -> Result<NaiveDate, TaskError> {
    parse_date(raw).ok_or_else(|| TaskError::InvalidDate(raw.trim().to_string()))
}

fn description_segment(rest: &str) -> &str {
    rest.split('/').next().unwrap_or_default()
}

/// Finds the value of `/<marker> <value>` in the parameter segments of `rest`.
///
/// Returns an empty string when the marker is absent.
fn extract_parameter(rest: &str, marker: &'static str) -> Result<String, TaskError> {
    let mut found: Option<String> = None;
    for segment in rest.split('/').skip(1) {
        let Some(value) = segment.strip_prefix(marker) else {
            continue;
        };
        if !(value.is_empty() || value.starts_with(char::is_whitespace)) {
            continue;
        }
        if found.is_some() {
            return Err(TaskError::DuplicateParameter(marker));
        }
        found = Some(value.trim().to_string());
    }
    Ok(found.unwrap_or_default())
}

/// Splits `<start>-<end>` at the first hyphen where both halves are valid dates.
///
/// Otherwise splits after a date-length prefix (or at the first hyphen) so the
/// constructor reports which half is bad.
fn split_range(raw: &str) -> (&str, &str) {
    let hyphens: Vec<usize> = raw.match_indices('-').map(|(i, _)| i).collect();
    for &i in &hyphens {
        let (from, to) = (&raw[..i], &raw[i + 1..]);
        if parse_date(from).is_some() && parse_date(to).is_some() {
            return (from, to);
        }
    }
    let date_len = INPUT_PATTERN.len();
    let at = hyphens
        .iter()
        .copied()
        .find(|&i| i == date_len)
        .or_else(|| hyphens.first().copied());
    match at {
        Some(i) => (&raw[..i], &raw[i + 1..]),
        None => (raw, ""),
    }
}

/// A recorded line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    created_at: NaiveDateTime,
}

impl Message {
    /// Creates a message stamped with the current local time.
    pub fn new(text: impl Into<String>) -> Message {
        Message::at(text, Local::now().naive_local())
    }

    pub fn at(text: impl Into<String>, created_at: NaiveDateTime) -> Message {
        Message {
            text: text.into(),
            created_at,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.created_at.format(TIMESTAMP_FORMAT), self.text)
    }
}
