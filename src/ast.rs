// SPDX-License-Identifier: Unlicense
use crate::error::{Error, Result};

/// Number of nodes a store accepts when no capacity is configured.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Variable name bound to a hoisted common subexpression.
pub const TEMP_VAR: char = '@';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Add,
    /// Binary minus, or unary minus when the right child is absent.
    Sub,
    Mul,
    Div,
    Assign,
    Seq,
}

impl OpKind {
    pub fn symbol(self) -> char {
        match self {
            OpKind::Add => '+',
            OpKind::Sub => '-',
            OpKind::Mul => '*',
            OpKind::Div => '/',
            OpKind::Assign => '=',
            OpKind::Seq => ',',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Op(OpKind),
    Const(i64),
    Var(char),
}

/// A tree node. `kind` is fixed at allocation; only the child slots are
/// rewritten by the passes.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeKind,
    left: Option<Id>,
    right: Option<Id>,
}

pub type Id = id_arena::Id<Node>;
pub type Arena = id_arena::Arena<Node>;

/// Append-only node arena for one compilation.
#[derive(Debug)]
pub struct Store {
    arena: Arena,
    capacity: usize,
}

impl Default for Store {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Arena::new(),
            capacity,
        }
    }

    pub fn alloc(&mut self, kind: NodeKind, left: Option<Id>, right: Option<Id>) -> Result<Id> {
        if self.arena.len() >= self.capacity {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        Ok(self.arena.alloc(Node { kind, left, right }))
    }

    pub fn constant(&mut self, value: i64) -> Result<Id> {
        self.alloc(NodeKind::Const(value), None, None)
    }

    pub fn var(&mut self, name: char) -> Result<Id> {
        self.alloc(NodeKind::Var(name), None, None)
    }

    pub fn binary(&mut self, op: OpKind, left: Id, right: Id) -> Result<Id> {
        self.alloc(NodeKind::Op(op), Some(left), Some(right))
    }

    pub fn negate(&mut self, operand: Id) -> Result<Id> {
        self.alloc(NodeKind::Op(OpKind::Sub), Some(operand), None)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn kind(&self, id: Id) -> NodeKind {
        self.arena[id].kind
    }

    pub fn const_value(&self, id: Id) -> Option<i64> {
        match self.arena[id].kind {
            NodeKind::Const(v) => Some(v),
            _ => None,
        }
    }

    pub fn left(&self, id: Id) -> Option<Id> {
        self.arena[id].left
    }

    pub fn right(&self, id: Id) -> Option<Id> {
        self.arena[id].right
    }

    pub fn set_left(&mut self, id: Id, child: Option<Id>) {
        self.arena[id].left = child;
    }

    pub fn set_right(&mut self, id: Id, child: Option<Id>) {
        self.arena[id].right = child;
    }

    pub fn is_leaf(&self, id: Option<Id>) -> bool {
        id.is_some_and(|id| matches!(self.kind(id), NodeKind::Const(_) | NodeKind::Var(_)))
    }

    /// True for a unary minus node.
    pub fn is_neg(&self, id: Id) -> bool {
        self.kind(id) == NodeKind::Op(OpKind::Sub) && self.right(id).is_none()
    }

    /// Structural equality: same shape and same leaves, wherever the nodes live.
    pub fn equal(&self, a: Option<Id>, b: Option<Id>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                self.kind(a) == self.kind(b)
                    && self.equal(self.left(a), self.left(b))
                    && self.equal(self.right(a), self.right(b))
            }
            _ => false,
        }
    }

    /// Node count of the subtree rooted at `id`.
    pub fn size(&self, id: Option<Id>) -> usize {
        match id {
            None => 0,
            Some(id) => 1 + self.size(self.left(id)) + self.size(self.right(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn store_should_reject_allocation_past_capacity() -> Result<()> {
        let mut store = Store::with_capacity(2);
        store.var('a')?;
        store.var('b')?;
        let err = store.var('c').unwrap_err();
        assert!(matches!(err, Error::CapacityExceeded { capacity: 2 }));
        assert_eq!(store.len(), 2);
        Ok(())
    }

    #[test]
    fn set_left_should_only_touch_the_child_slot() -> Result<()> {
        let mut store = Store::new();
        let a = store.var('a')?;
        let b = store.var('b')?;
        let c = store.var('c')?;
        let add = store.binary(OpKind::Add, a, b)?;
        store.set_left(add, Some(c));
        assert_eq!(store.kind(add), NodeKind::Op(OpKind::Add));
        assert_eq!(store.left(add), Some(c));
        assert_eq!(store.right(add), Some(b));
        Ok(())
    }

    #[test]
    fn equal_should_compare_structure_not_handles() -> Result<()> {
        let mut store = Store::new();
        let a1 = store.var('a')?;
        let b1 = store.var('b')?;
        let x = store.binary(OpKind::Add, a1, b1)?;
        let a2 = store.var('a')?;
        let b2 = store.var('b')?;
        let y = store.binary(OpKind::Add, a2, b2)?;
        let c = store.var('c')?;
        let z = store.binary(OpKind::Add, a2, c)?;

        assert_ne!(x, y);
        assert!(store.equal(Some(x), Some(y)));
        assert!(!store.equal(Some(x), Some(z)));
        assert!(store.equal(None, None));
        assert!(!store.equal(Some(x), None));
        Ok(())
    }

    #[test]
    fn neg_should_differ_from_binary_minus() -> Result<()> {
        let mut store = Store::new();
        let a = store.var('a')?;
        let zero = store.constant(0)?;
        let neg = store.negate(a)?;
        let sub = store.binary(OpKind::Sub, a, zero)?;
        assert!(store.is_neg(neg));
        assert!(!store.is_neg(sub));
        assert!(!store.equal(Some(neg), Some(sub)));
        Ok(())
    }

    #[test]
    fn size_should_count_every_node() -> Result<()> {
        let mut store = Store::new();
        let a = store.var('a')?;
        let b = store.constant(4)?;
        let mul = store.binary(OpKind::Mul, a, b)?;
        let neg = store.negate(mul)?;
        assert_eq!(store.size(Some(neg)), 4);
        assert_eq!(store.size(None), 0);
        assert!(store.is_leaf(Some(a)));
        assert!(!store.is_leaf(Some(mul)));
        assert!(!store.is_leaf(None));
        Ok(())
    }
}
