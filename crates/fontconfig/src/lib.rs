//! Android font configuration parsing and rewriting.
//!
//! Reads a stock `fonts.xml`, then builds a new `familyset` that puts a
//! custom font first in the resolution order while keeping the original
//! families as fallback.

mod element;
mod error;
mod transform;

pub use element::Element;
pub use error::{Error, Result};
pub use transform::{merge_familyset, transform};
