//! CLI subcommand implementations.

pub mod add;
pub mod classify;
pub mod clear;
pub mod comment;
pub mod delete;
pub mod export;
pub mod goals;
pub mod reclassify;
pub mod show;
pub mod status;
pub mod util;
pub mod week;
