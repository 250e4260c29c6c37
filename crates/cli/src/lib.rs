//! CLI for packaging custom fonts into flashable module archives.

pub mod cli;
