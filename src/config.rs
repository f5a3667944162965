// SPDX-License-Identifier: Unlicense
use crate::ast::DEFAULT_CAPACITY;

/// How the final tree is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented pre-order listing.
    #[default]
    Dump,
    /// pic diagram for groff.
    Draw,
}

/// Settings for a single compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Maximum number of nodes the store may hold.
    pub capacity: usize,
    pub fold: bool,
    pub rewrite: bool,
    pub cse: bool,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            fold: true,
            rewrite: true,
            cse: true,
            format: OutputFormat::Dump,
        }
    }
}

impl Config {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }
}
