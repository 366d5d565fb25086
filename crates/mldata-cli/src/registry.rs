//! The downloader registry and the provider table it is extended from.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{ArgMatches, Command};

use mldata_lib::{Error, Result};

/// Minimum Jaro-Winkler similarity before a registry name is suggested.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Maximum number of did-you-mean suggestions to surface.
const SUGGESTION_LIMIT: usize = 3;

/// Installs dataset-specific flags on a subcommand.
pub type ConfigureFn = fn(Command) -> Command;

/// A dataset's download routine.
pub type DownloadFn = fn(&DownloadRequest) -> Result<()>;

/// Parsed arguments handed to every download routine.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Where to save the downloaded files.
    pub directory: PathBuf,
    /// Remove the downloaded files instead of fetching them.
    pub clear: bool,
    matches: ArgMatches,
}

impl DownloadRequest {
    /// Build a request from the matches of a dataset subcommand.
    pub fn from_matches(matches: &ArgMatches) -> Self {
        let directory = matches
            .get_one::<String>("directory")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let clear = matches.get_flag("clear");
        Self {
            directory,
            clear,
            matches: matches.clone(),
        }
    }

    /// Value of a dataset-specific string flag installed by a configurator.
    ///
    /// Returns `None` when the flag is not defined for this subcommand or was
    /// not supplied.
    pub fn flag(&self, id: &str) -> Option<&str> {
        self.matches
            .try_get_one::<String>(id)
            .ok()
            .flatten()
            .map(String::as_str)
    }

    /// The shared `--url-prefix` flag, where a configurator installed it.
    pub fn url_prefix(&self) -> Option<&str> {
        self.flag("url-prefix")
    }
}

/// One registered dataset downloader.
#[derive(Debug, Clone, Copy)]
pub struct Downloader {
    /// Short description shown in the subcommand listing.
    pub about: &'static str,
    /// Adds dataset-specific flags to the subcommand.
    pub configure: ConfigureFn,
    /// Invoked once the subcommand is selected.
    pub run: DownloadFn,
}

/// Identity configurator for datasets without extra flags.
pub fn no_extra_flags(command: Command) -> Command {
    command
}

/// Mapping from dataset name to its downloader.
///
/// Backed by a `BTreeMap` so iteration (and therefore help output) is
/// deterministic.
#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<String, Downloader>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a downloader, rejecting duplicate names.
    pub fn insert(&mut self, name: impl Into<String>, downloader: Downloader) -> Result<()> {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(Error::DuplicateDownloader { name });
        }
        self.entries.insert(name, downloader);
        Ok(())
    }

    /// Merge `other` into this registry.
    ///
    /// Name collisions are a fatal configuration error; the check runs before
    /// any mutation so a failed merge leaves this registry untouched.
    pub fn merge(&mut self, other: Registry) -> Result<()> {
        if let Some(name) = other
            .entries
            .keys()
            .find(|name| self.entries.contains_key(*name))
        {
            return Err(Error::DuplicateDownloader { name: name.clone() });
        }
        self.entries.extend(other.entries);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Downloader> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Downloader)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds a registry when its name is requested via `--extra` or config.
pub type ProviderFn = fn() -> Registry;

/// Table of registry providers known at process start.
///
/// This replaces import-by-name plugin loading: every loadable registry is
/// registered here before argument parsing begins.
#[derive(Debug, Default)]
pub struct Providers {
    table: BTreeMap<String, ProviderFn>,
}

impl Providers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, rejecting duplicate names like [`Registry::insert`].
    pub fn register(&mut self, name: impl Into<String>, provider: ProviderFn) -> Result<()> {
        let name = name.into();
        if self.table.contains_key(&name) {
            return Err(Error::DuplicateRegistry { name });
        }
        self.table.insert(name, provider);
        Ok(())
    }

    /// Build the registry published under `name`.
    pub fn resolve(&self, name: &str) -> Result<Registry> {
        match self.table.get(name) {
            Some(provider) => Ok(provider()),
            None => Err(Error::UnknownRegistry {
                name: name.to_string(),
                suggestions: self.suggestions(name),
            }),
        }
    }

    fn suggestions(&self, name: &str) -> Vec<String> {
        let mut scored: Vec<(f64, &String)> = self
            .table
            .keys()
            .map(|candidate| (strsim::jaro_winkler(name, candidate), candidate))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(SUGGESTION_LIMIT)
            .map(|(_, candidate)| candidate.clone())
            .collect()
    }
}
