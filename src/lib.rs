pub mod commands;
pub mod dates;
pub mod error;
pub mod lists;
pub mod models;
pub mod parser;
pub mod storage;
pub mod tui;
