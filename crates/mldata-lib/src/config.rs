use std::env;

/// Environment variable naming extra downloader registries to merge in
/// before argument parsing. Comma separated; empty entries are skipped.
pub const EXTRA_DOWNLOADERS_ENV: &str = "MLDATA_EXTRA_DOWNLOADERS";

/// Startup configuration for the downloader CLI.
///
/// Built once in `main` and passed explicitly into the registry pipeline
/// instead of being read as ambient global state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Registry names merged into the built-in set, in order, before any
    /// `--extra` flag from the command line.
    pub extra_downloaders: Vec<String>,
}

impl Config {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_env_var(EXTRA_DOWNLOADERS_ENV)
    }

    fn from_env_var(key: &str) -> Self {
        let extra_downloaders = env::var(key)
            .map(|raw| split_names(&raw))
            .unwrap_or_default();
        Self { extra_downloaders }
    }
}

fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
