use std::env;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::blocking::Client;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Environment variable pointing at a local directory of dataset files.
///
/// When set, files are copied from that directory instead of being fetched
/// over HTTP. Used by the test suite to exercise downloads without network
/// access.
pub const SOURCE_DIR_ENV: &str = "MLDATA_SOURCE_DIR";

/// A single dataset file and where it can be fetched from.
///
/// Files without a URL require the user to supply a `--url-prefix`; see
/// [`DownloadPlan::with_url_prefix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    pub filename: String,
    pub url: Option<String>,
}

impl FileSource {
    pub fn new(filename: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: Some(url.into()),
        }
    }

    /// A file with no default download URL.
    pub fn unsourced(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            url: None,
        }
    }
}

/// The set of files a dataset downloader fetches or clears.
#[derive(Debug, Clone)]
pub struct DownloadPlan {
    pub dataset: String,
    pub files: Vec<FileSource>,
}

impl DownloadPlan {
    pub fn new(dataset: impl Into<String>, files: Vec<FileSource>) -> Self {
        Self {
            dataset: dataset.into(),
            files,
        }
    }

    /// Fill in missing URLs by prepending `prefix` to each filename.
    ///
    /// Files that already carry a URL are left untouched.
    pub fn with_url_prefix(mut self, prefix: Option<&str>) -> Self {
        if let Some(prefix) = prefix {
            for file in &mut self.files {
                if file.url.is_none() {
                    file.url = Some(format!("{}{}", prefix, file.filename));
                }
            }
        }
        self
    }

    /// Download every file in the plan into `directory`.
    ///
    /// Fails with [`Error::NeedUrlPrefix`] before any IO if a file still
    /// lacks a URL. Writes go through a temporary file and an atomic rename
    /// so an interrupted download never leaves a partial file behind.
    pub fn fetch(&self, directory: &Path) -> Result<Vec<PathBuf>> {
        if self.files.iter().any(|file| file.url.is_none()) {
            return Err(Error::NeedUrlPrefix {
                dataset: self.dataset.clone(),
            });
        }

        fs::create_dir_all(directory)?;

        if let Some(source_dir) = env::var_os(SOURCE_DIR_ENV) {
            let source_dir = PathBuf::from(source_dir);
            info!(
                dataset = %self.dataset,
                source = %source_dir.display(),
                "using local dataset source override"
            );
            return self.copy_from_source(&source_dir, directory);
        }

        let client = build_client()?;
        let mut downloaded = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let url = file.url.as_deref().expect("urls verified before fetch");
            let destination = directory.join(&file.filename);
            info!(
                dataset = %self.dataset,
                url = %url,
                path = %destination.display(),
                "downloading dataset file"
            );
            download_file(&client, url, &destination)?;
            downloaded.push(destination);
        }

        Ok(downloaded)
    }

    /// Remove the plan's files from `directory`.
    ///
    /// Missing files are skipped; clearing never touches the network.
    pub fn clear(&self, directory: &Path) -> Result<()> {
        for file in &self.files {
            let path = directory.join(&file.filename);
            if path.is_file() {
                info!(
                    dataset = %self.dataset,
                    path = %path.display(),
                    "removing downloaded file"
                );
                fs::remove_file(&path)?;
            } else {
                debug!(path = %path.display(), "file already absent");
            }
        }
        Ok(())
    }

    fn copy_from_source(&self, source_dir: &Path, directory: &Path) -> Result<Vec<PathBuf>> {
        let mut copied = Vec::with_capacity(self.files.len());
        for file in &self.files {
            let source = source_dir.join(&file.filename);
            let destination = directory.join(&file.filename);
            copy_file_atomic(&source, &destination)?;
            copied.push(destination);
        }
        Ok(copied)
    }
}

fn build_client() -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(user_agent())
        .build()
        .map_err(Error::Http)
}

fn user_agent() -> String {
    format!(
        "mldata-lib/{version} ({repo})",
        version = env!("CARGO_PKG_VERSION"),
        repo = "https://github.com/mldata/mldata-rs"
    )
}

fn download_file(client: &Client, url: &str, destination: &Path) -> Result<()> {
    let mut tmp = NamedTempFile::new_in(destination.parent().unwrap_or_else(|| Path::new(".")))?;
    let mut response = client.get(url).send()?.error_for_status()?;
    io::copy(&mut response, tmp.as_file_mut())?;
    tmp.flush()?;
    tmp.persist(destination).map_err(|err| err.error)?;
    Ok(())
}

fn copy_file_atomic(source: &Path, destination: &Path) -> Result<()> {
    if source == destination {
        return Ok(());
    }
    let parent = destination.parent().unwrap_or_else(|| Path::new("."));
    let mut reader = File::open(source)?;
    let mut tmp = NamedTempFile::new_in(parent)?;
    io::copy(&mut reader, tmp.as_file_mut())?;
    tmp.flush()?;
    if destination.exists() {
        fs::remove_file(destination)?;
    }
    tmp.persist(destination).map_err(|err| err.error)?;
    Ok(())
}
