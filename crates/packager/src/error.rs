//! Error types for module packaging.

use std::{path::PathBuf, result};

/// Errors that can occur while staging and zipping a module.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("font file '{path}' does not exist")]
    MissingFont { path: PathBuf },

    #[error("template directory '{path}' does not exist")]
    MissingTemplate { path: PathBuf },

    #[error("font path '{path}' has no file name")]
    NoFileName { path: PathBuf },

    #[error("failed to create staging directory: {0}")]
    Staging(#[source] std::io::Error),

    #[error("failed to copy '{path}': {source}")]
    Copy {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("staged path '{path}' is outside the staging tree")]
    OutsideStagingTree { path: PathBuf },

    #[error("failed to walk staged tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to build module archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error(transparent)]
    FontConfig(#[from] fontmod_fontconfig::Error),
}

pub type Result<T> = result::Result<T, Error>;
