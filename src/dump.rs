// SPDX-License-Identifier: Unlicense
use crate::ast::{Id, NodeKind, Store};
use std::fmt;

/// Pre-order listing of a tree, one node per line, indented two spaces per
/// level.
#[derive(Debug, Clone, Copy)]
pub struct Listing<'a> {
    store: &'a Store,
    root: Id,
}

impl<'a> Listing<'a> {
    pub fn new(store: &'a Store, root: Id) -> Self {
        Self { store, root }
    }

    fn node(&self, f: &mut fmt::Formatter<'_>, id: Option<Id>, depth: usize) -> fmt::Result {
        let Some(id) = id else {
            return Ok(());
        };
        write!(f, "{:width$}", "", width = depth * 2)?;
        match self.store.kind(id) {
            NodeKind::Op(op) => writeln!(f, "{}", op.symbol())?,
            NodeKind::Const(v) => writeln!(f, "c({v})")?,
            NodeKind::Var(name) => writeln!(f, "v({name})")?,
        }
        self.node(f, self.store.left(id), depth + 1)?;
        self.node(f, self.store.right(id), depth + 1)
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.node(f, Some(self.root), 0)
    }
}

pub fn dump(store: &Store, root: Id) -> String {
    Listing::new(store, root).to_string()
}
