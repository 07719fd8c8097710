//! Voyagecast CLI library.
//!
//! Configuration, logging setup, subcommand handlers, terminal styling and
//! output rendering for the `voyagecast` binary.

pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
pub mod terminal;
