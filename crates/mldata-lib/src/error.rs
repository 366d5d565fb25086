use thiserror::Error;

/// Convenient result alias for the mldata library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a dataset's files lack a default download URL and no
    /// `--url-prefix` was supplied.
    #[error("some files for the {dataset} dataset do not have a download URL")]
    NeedUrlPrefix { dataset: String },

    /// Raised when merging downloader registries that share a dataset name.
    #[error("extra downloaders conflict in name with existing downloaders: {name}")]
    DuplicateDownloader { name: String },

    /// Raised when two registry providers are registered under one name.
    #[error("a downloader registry provider named {name} is already registered")]
    DuplicateRegistry { name: String },

    /// Raised when an extra registry name does not match any known provider.
    #[error("unknown downloader registry: {name}{}", format_suggestions(.suggestions))]
    UnknownRegistry {
        name: String,
        suggestions: Vec<String>,
    },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for HTTP client errors.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
