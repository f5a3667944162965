// SPDX-License-Identifier: Unlicense
//! Common subexpression elimination.
//!
//! The largest subtree that occurs twice is hoisted into the temporary
//! [`TEMP_VAR`]:
//!
//! ```text
//! (a+b)*(a+b)   =>   @ = a+b, @*@
//! ```
//!
//! Only one subexpression is hoisted per call.
use crate::ast::{Id, NodeKind, OpKind, Store, TEMP_VAR};
use crate::error::Result;
use log::{debug, trace};

/// Subtrees of this size or smaller are never hoisted.
const MIN_HOIST_SIZE: usize = 2;

/// True if some node of the tree at `tree`, other than `x` itself, is
/// structurally equal to `x`.
pub fn find(store: &Store, x: Id, tree: Option<Id>) -> bool {
    let Some(n) = tree else {
        return false;
    };
    (n != x && store.equal(Some(x), Some(n)))
        || find(store, x, store.left(n))
        || find(store, x, store.right(n))
}

#[derive(Debug, Default, Clone, Copy)]
struct Best {
    id: Option<Id>,
    size: usize,
}

fn search(store: &Store, root: Id, n: Option<Id>, best: &mut Best) {
    let Some(n) = n else {
        return;
    };
    if n != root {
        let size = store.size(Some(n));
        if size > MIN_HOIST_SIZE && size > best.size && find(store, n, Some(root)) {
            trace!("duplicate candidate {:?} of size {}", n, size);
            *best = Best { id: Some(n), size };
        }
    }
    search(store, root, store.left(n), best);
    search(store, root, store.right(n), best);
}

/// Finds the largest subtree of `root` that occurs at least twice.
///
/// Candidates are visited in pre-order and a later candidate must be strictly
/// larger to win, so among equally large duplicates the first one visited is
/// returned.
pub fn largest_duplicate(store: &Store, root: Id) -> Option<Id> {
    let mut best = Best::default();
    search(store, root, Some(root), &mut best);
    best.id
}

/// Copies the tree at `n`, replacing every subtree equal to `x` with a
/// reference to the temporary.
fn replace(store: &mut Store, x: Id, n: Id) -> Result<Id> {
    if store.equal(Some(x), Some(n)) {
        return store.var(TEMP_VAR);
    }
    let kind = store.kind(n);
    let left = store.left(n).map(|l| replace(store, x, l)).transpose()?;
    let right = store.right(n).map(|r| replace(store, x, r)).transpose()?;
    store.alloc(kind, left, right)
}

/// Hoists the largest repeated subexpression of `root`, returning the root of
/// `Seq(Assign(@, dup), rest)`, or `root` itself when nothing repeats.
pub fn eliminate(store: &mut Store, root: Id) -> Result<Id> {
    let Some(dup) = largest_duplicate(store, root) else {
        debug!("no common subexpression found");
        return Ok(root);
    };
    debug!(
        "hoisting common subexpression {:?} of size {}",
        dup,
        store.size(Some(dup))
    );

    let rest = replace(store, dup, root)?;
    let temp = store.var(TEMP_VAR)?;
    let assign = store.alloc(NodeKind::Op(OpKind::Assign), Some(temp), Some(dup))?;
    store.binary(OpKind::Seq, assign, rest)
}
