//! Trailhead CLI library.
//!
//! Logging setup, output rendering and the subcommand handlers used by the
//! `trailhead` binary.

pub mod commands;
pub mod logging;
pub mod output;
