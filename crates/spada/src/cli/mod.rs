//! CLI support for the `spada` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;
