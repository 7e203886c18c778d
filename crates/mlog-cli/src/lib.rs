//! Meal log CLI library.
//!
//! This crate provides the CLI interface for the meal log.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, DateArg, GoalsAction};
pub use config::Config;
