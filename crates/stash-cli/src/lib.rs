//! Command-line front end for Stash: argument parsing, logging setup and
//! report rendering for the inventory and geocode runs.

pub mod cli;
pub mod logging;
pub mod report;

pub use cli::{OutputFormat, StashCli, StashCommand};
