//! Error types for font configuration processing.

use std::{path::PathBuf, result};

/// Errors that can occur while reading or rewriting a font configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read font config '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse font config: {0}")]
    Parse(#[from] quick_xml::Error),

    #[error("failed to write font config: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("invalid escape sequence: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    #[error("invalid UTF-8 in tag name: {0}")]
    TagName(#[from] std::str::Utf8Error),

    #[error("document has no root element")]
    NoRoot,

    #[error("unexpected closing tag")]
    UnbalancedTag,
}

pub type Result<T> = result::Result<T, Error>;
