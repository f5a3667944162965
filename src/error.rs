// SPDX-License-Identifier: Unlicense
use peg::{error::ParseError, str::LineCol};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("out of nodes: store capacity of {capacity} exceeded")]
    CapacityExceeded { capacity: usize },
    #[error("failed to parse: {0}")]
    MalformedInput(#[from] ParseError<LineCol>),
}

pub type Result<T> = std::result::Result<T, Error>;
