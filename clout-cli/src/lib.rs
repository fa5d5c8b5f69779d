pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod prompt;
pub mod stdio;
pub mod ui;
