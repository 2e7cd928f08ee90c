//! CLI subcommand implementations.

pub mod common;
pub mod config;
pub mod dashboard;
pub mod init;
pub mod run;
pub mod settings;
