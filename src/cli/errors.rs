use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing API key: pass --api-key, set KINOPOISK_API_KEY, or add api_key to the config file")]
    MissingApiKey,

    #[error("Cannot use config file {path:?}: {source}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: kinofetch::Error,
    },

    #[error("Output directory {path:?} is not usable: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Library(#[from] kinofetch::Error),
}
