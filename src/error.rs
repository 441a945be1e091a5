use std::path::PathBuf;

use crate::dates::INPUT_PATTERN;

/// Validation failures when building a task from user input or a saved record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("Task description cannot be empty")]
    EmptyDescription,
    #[error("Task description cannot contain '|'")]
    PipeInDescription,
    #[error("Specify Task Description: {0} <task description>")]
    UnknownKind(String),
    #[error("Deadline cannot be empty: Please specify deadline time with /by")]
    MissingDeadline,
    #[error("Event start time cannot be empty: Please specify event start time with /from")]
    MissingEventStart,
    #[error("Event end time cannot be empty: Please specify event end time with /to")]
    MissingEventEnd,
    #[error("Invalid date format. Please use: {}", INPUT_PATTERN)]
    InvalidDate(String),
    #[error("Event start must be before end")]
    EventOrder,
    #[error("Multiple /{0} parameters specified")]
    DuplicateParameter(&'static str),
}

/// Errors raised while reading a persisted task record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("Invalid task save string: {0}")]
    Malformed(String),
    #[error("Unknown task type: {0}")]
    UnknownType(String),
    #[error("Invalid completion flag: {0}")]
    CompletionFlag(String),
    #[error("Missing {field} in task save string: {line}")]
    MissingField { field: &'static str, line: String },
    #[error(transparent)]
    Task(#[from] TaskError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ListError {
    #[error("index {index} is out of range for a list of {len} items")]
    OutOfRange { index: usize, len: usize },
}

/// Failures turning a raw line into a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Invalid task number.")]
    InvalidTaskNumber(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
