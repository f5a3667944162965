// SPDX-License-Identifier: Unlicense
//! Tree diagrams as pic programs, to be rendered with `groff -p`.
use crate::ast::{Id, NodeKind, Store};
use std::fmt;

/// Horizontal offset of the root's children, in thousandths of an inch.
const ROOT_SPREAD: u32 = 1800;
const ROOT_DIVISOR: u32 = 24;

#[derive(Debug, Clone, Copy)]
pub struct Diagram<'a> {
    store: &'a Store,
    root: Id,
}

impl<'a> Diagram<'a> {
    pub fn new(store: &'a Store, root: Id) -> Self {
        Self { store, root }
    }

    fn node(&self, f: &mut fmt::Formatter<'_>, id: Id, spread: u32, divisor: u32) -> fmt::Result {
        let name = id.index();
        match self.store.kind(id) {
            NodeKind::Const(v) => writeln!(f, "N{name}: box width 0.3i height 0.3i \"{v}\"")?,
            NodeKind::Var(c) => writeln!(f, "N{name}: box width 0.3i height 0.3i \"{c}\"")?,
            NodeKind::Op(op) => writeln!(f, "N{name}: circle radius 0.15i \"{}\"", op.symbol())?,
        }

        let (left, right) = (self.store.left(id), self.store.right(id));
        let offset = Inches(spread);
        if let Some(l) = left {
            writeln!(f, "move to N{name}")?;
            if right.is_some() {
                writeln!(f, "move down 0.5i left {offset}")?;
                self.node(f, l, spread / divisor, divisor + 1)?;
                writeln!(f, "arrow from left of N{name} to top of N{}", l.index())?;
            } else {
                writeln!(f, "move down 0.5i")?;
                self.node(f, l, spread / divisor, divisor + 1)?;
                writeln!(f, "arrow from bottom of N{name} to top of N{}", l.index())?;
            }
        }
        if let Some(r) = right {
            writeln!(f, "move to N{name}")?;
            if left.is_some() {
                writeln!(f, "move down 0.5i right {offset}")?;
                self.node(f, r, spread / divisor, divisor + 1)?;
                writeln!(f, "arrow from right of N{name} to top of N{}", r.index())?;
            } else {
                writeln!(f, "move down 0.5i")?;
                self.node(f, r, spread / divisor, divisor + 1)?;
                writeln!(f, "arrow from bottom of N{name} to top of N{}", r.index())?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, ".ft C\n.ps 12\n.PS")?;
        self.node(f, self.root, ROOT_SPREAD, ROOT_DIVISOR)?;
        writeln!(f, ".PE")
    }
}

struct Inches(u32);

impl fmt::Display for Inches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}i", self.0 / 1000, self.0 % 1000)
    }
}

pub fn draw(store: &Store, root: Id) -> String {
    Diagram::new(store, root).to_string()
}
