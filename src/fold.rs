// SPDX-License-Identifier: Unlicense
//! Constant folding.
//!
//! Children are folded before their parent, so by the time a node is looked
//! at every foldable operand below it has already collapsed into a `Const`.
use crate::ast::{Id, NodeKind, OpKind, Store};
use crate::error::Result;

/// Folds the tree rooted at `id` and returns the root of the folded tree.
pub fn fold(store: &mut Store, id: Id) -> Result<Id> {
    if let Some(left) = store.left(id) {
        let left = fold(store, left)?;
        store.set_left(id, Some(left));
    }
    if let Some(right) = store.right(id) {
        let right = fold(store, right)?;
        store.set_right(id, Some(right));
    }

    let NodeKind::Op(op) = store.kind(id) else {
        return Ok(id);
    };
    let (left, right) = (store.left(id), store.right(id));
    let lv = left.and_then(|l| store.const_value(l));
    let rv = right.and_then(|r| store.const_value(r));

    if right.is_none() {
        return match (op, lv) {
            (OpKind::Sub, Some(v)) => store.constant(v.wrapping_neg()),
            _ => Ok(id),
        };
    }

    if let (Some(l), Some(r)) = (lv, rv) {
        let value = match op {
            OpKind::Add => Some(l.wrapping_add(r)),
            OpKind::Sub => Some(l.wrapping_sub(r)),
            OpKind::Mul => Some(l.wrapping_mul(r)),
            // division by a literal zero is left for run time
            OpKind::Div if r != 0 => Some(l.wrapping_div(r)),
            _ => None,
        };
        if let Some(value) = value {
            return store.constant(value);
        }
    }

    let folded = match (op, lv, rv) {
        (OpKind::Add, Some(0), _) => right,
        (OpKind::Mul, Some(1), _) => right,
        (OpKind::Add | OpKind::Sub, _, Some(0)) => left,
        (OpKind::Mul | OpKind::Div, _, Some(1)) => left,
        (OpKind::Mul, Some(0), _) | (OpKind::Mul, _, Some(0)) => {
            return store.constant(0);
        }
        _ => None,
    };
    Ok(folded.unwrap_or(id))
}
