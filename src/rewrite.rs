// SPDX-License-Identifier: Unlicense
//! Peephole rewrites applied bottom-up after folding.
use crate::ast::{Id, NodeKind, OpKind, Store};
use crate::error::Result;

pub fn rewrite(store: &mut Store, id: Id) -> Result<Id> {
    if let Some(left) = store.left(id) {
        let left = rewrite(store, left)?;
        store.set_left(id, Some(left));
    }
    if let Some(right) = store.right(id) {
        let right = rewrite(store, right)?;
        store.set_right(id, Some(right));
    }

    let NodeKind::Op(op) = store.kind(id) else {
        return Ok(id);
    };
    let (left, right) = match (store.left(id), store.right(id)) {
        (Some(l), Some(r)) => (l, r),
        _ => return Ok(id),
    };

    match op {
        // keep the bigger operand on the left of a commutative op
        OpKind::Add | OpKind::Mul
            if store.is_leaf(Some(left)) && !store.is_leaf(Some(right)) =>
        {
            store.set_left(id, Some(right));
            store.set_right(id, Some(left));
            Ok(id)
        }
        // l + -r  =>  l - r
        OpKind::Add if store.is_neg(right) => match store.left(right) {
            Some(operand) => store.binary(OpKind::Sub, left, operand),
            None => Ok(id),
        },
        // 0 - r  =>  -r
        OpKind::Sub if store.const_value(left) == Some(0) => store.negate(right),
        // leaf * 2  =>  leaf + leaf
        OpKind::Mul if store.is_leaf(Some(left)) && store.const_value(right) == Some(2) => {
            store.binary(OpKind::Add, left, left)
        }
        _ => Ok(id),
    }
}
