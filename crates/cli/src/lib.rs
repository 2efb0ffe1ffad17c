//! `quantumstock` command-line front end over the inventory ledger.

pub mod app;
pub mod command;
pub mod config;

pub use app::App;
pub use command::{Command, USAGE, UsageError};
pub use config::AppConfig;
