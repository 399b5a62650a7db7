//! CLI subcommands.

pub mod browse;
pub mod list;
