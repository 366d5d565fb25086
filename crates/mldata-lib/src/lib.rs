//! MLData library entry points.
//!
//! This crate exposes the dataset file tables, the download engine that
//! fetches (or clears) dataset files, and the startup configuration. The CLI
//! crate should only depend on the items exported here instead of
//! reimplementing behavior.

#![deny(warnings)]

pub mod config;
pub mod datasets;
pub mod download;
pub mod error;

pub use config::Config;
pub use download::{DownloadPlan, FileSource};
pub use error::{Error, Result};
