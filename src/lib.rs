// SPDX-License-Identifier: Unlicense
//! Parses small integer expressions and optimizes them with constant folding,
//! peephole rewriting and common subexpression elimination.
pub mod ast;
pub mod config;
pub mod cse;
pub mod draw;
pub mod driver;
pub mod dump;
pub mod error;
pub mod fold;
pub mod parser;
pub mod rewrite;

pub use error::{Error, Result};
