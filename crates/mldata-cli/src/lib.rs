//! mldata CLI library.
//!
//! This crate assembles the downloader registry, pre-parses the argument
//! list for `--extra`, builds one subcommand per registered dataset, and
//! dispatches to the selected download routine.

pub mod builtin;
pub mod extract;
pub mod registry;
pub mod run;
