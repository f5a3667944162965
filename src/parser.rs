// SPDX-License-Identifier: Unlicense
use crate::ast::{Id, NodeKind, OpKind, Store};
use crate::error::{Error, Result};
use std::cell::{Cell, RefCell};

/// Deepest nesting of parentheses and unary minus the grammar accepts.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug)]
struct Context {
    store: RefCell<Store>,
    overflow: RefCell<Option<Error>>,
    depth: Cell<usize>,
}

impl Context {
    fn new(store: Store) -> Self {
        Self {
            store: RefCell::new(store),
            overflow: RefCell::new(None),
            depth: Cell::new(0),
        }
    }

    fn alloc(
        &self,
        kind: NodeKind,
        left: Option<Id>,
        right: Option<Id>,
    ) -> std::result::Result<Id, &'static str> {
        let mut store = self.store.borrow_mut();
        store.alloc(kind, left, right).map_err(|e| {
            *self.overflow.borrow_mut() = Some(e);
            "free node in store"
        })
    }

    /// Builds a left-associative chain `((first op a) op b) ...`.
    fn chain(&self, first: Id, rest: Vec<(OpKind, Id)>) -> std::result::Result<Id, &'static str> {
        rest.into_iter().try_fold(first, |lhs, (op, rhs)| {
            self.alloc(NodeKind::Op(op), Some(lhs), Some(rhs))
        })
    }

    fn enter(&self) -> std::result::Result<(), &'static str> {
        let depth = self.depth.get();
        if depth >= MAX_DEPTH {
            return Err("shallower nesting");
        }
        self.depth.set(depth + 1);
        Ok(())
    }

    fn leave(&self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

peg::parser! {
    grammar expr_parser(context: &Context) for str {
        rule _() = quiet!{[' '|'\t'|'\r'|'\n']*{}}

        rule enter() = "" {? context.enter() }

        rule leave() = "" { context.leave() }

        rule var() -> Id = c:['a'..='z' | 'A'..='Z'] {?
            context.alloc(NodeKind::Var(c), None, None)
        }

        rule number() -> Id = n:$(['0'..='9']+) {?
            match n.parse() {
                Ok(v) => context.alloc(NodeKind::Const(v), None, None),
                Err(_) => Err("integer literal within 64 bits"),
            }
        }

        // the nested rule is optional so that leave() runs on every path
        rule paren() -> Id = "(" enter() e:sum()? leave() _ ")" {?
            e.ok_or("expression")
        }

        rule neg() -> Id = "-" enter() f:factor()? leave() {?
            match f {
                Some(f) => context.alloc(NodeKind::Op(OpKind::Sub), Some(f), None),
                None => Err("operand"),
            }
        }

        rule factor() -> Id = _ n:(var() / number() / paren() / neg()) { n }

        rule term_op() -> OpKind = "*" { OpKind::Mul } / "/" { OpKind::Div }

        rule sum_op() -> OpKind = "+" { OpKind::Add } / "-" { OpKind::Sub }

        rule term() -> Id = first:factor() rest:(_ op:term_op() f:factor() { (op, f) })* {?
            context.chain(first, rest)
        }

        rule sum() -> Id = first:term() rest:(_ op:sum_op() t:term() { (op, t) })* {?
            context.chain(first, rest)
        }

        pub rule expression() -> Id = e:sum() _ { e }
    }
}

/// Parses `source` into `store` and returns the root of the new tree.
///
/// The syntax is checked against an unbounded scratch store first, so a
/// malformed expression is always [`Error::MalformedInput`] and
/// [`Error::CapacityExceeded`] only means that a well-formed expression needs
/// more nodes than `store` has left.
pub fn parse(store: &mut Store, source: &str) -> Result<Id> {
    let scratch = Context::new(Store::with_capacity(usize::MAX));
    expr_parser::expression(source, &scratch)?;

    let context = Context::new(std::mem::take(store));
    let parsed = expr_parser::expression(source, &context);
    *store = context.store.into_inner();

    if let Some(e) = context.overflow.into_inner() {
        return Err(e);
    }
    Ok(parsed?)
}
