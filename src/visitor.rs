//! Expression visitor pattern for tree traversal
//!
//! Provides a clean interface for walking the expression tree without
//! manually handling the recursive structure.

use crate::ast::{BinaryOp, UnaryOp};
use crate::param::{Param, ParamHandle};
use crate::{Expr, ExprKind};
use rustc_hash::FxHashSet;

/// Trait for visiting expression nodes
///
/// Each method returns a boolean indicating whether to continue visiting children.
/// Shared subtrees are visited once per occurrence.
///
/// # Example
/// ```
/// use param_expr::visitor::{ExprVisitor, walk_expr};
/// use param_expr::{BinaryOp, Expr, Param, ParamHandle, UnaryOp};
///
/// struct Leaves(usize);
///
/// impl ExprVisitor for Leaves {
///     fn visit_param(&mut self, _h: ParamHandle) -> bool { self.0 += 1; true }
///     fn visit_param_direct(&mut self, _p: &Param) -> bool { self.0 += 1; true }
///     fn visit_number(&mut self, _n: f64) -> bool { self.0 += 1; true }
///     fn visit_binary(&mut self, _op: BinaryOp, _l: &Expr, _r: &Expr) -> bool { true }
///     fn visit_unary(&mut self, _op: UnaryOp, _a: &Expr) -> bool { true }
/// }
///
/// let mut leaves = Leaves(0);
/// walk_expr(&(Expr::param(ParamHandle(1)) * 2.0), &mut leaves);
/// assert_eq!(leaves.0, 2);
/// ```
pub trait ExprVisitor {
    /// Visit a parameter referenced by handle
    fn visit_param(&mut self, handle: ParamHandle) -> bool;

    /// Visit a resolved parameter reference
    fn visit_param_direct(&mut self, param: &Param) -> bool;

    /// Visit a number literal
    fn visit_number(&mut self, n: f64) -> bool;

    /// Visit a binary operation, returns true to visit operands
    fn visit_binary(&mut self, op: BinaryOp, left: &Expr, right: &Expr) -> bool;

    /// Visit a unary operation, returns true to visit the operand
    fn visit_unary(&mut self, op: UnaryOp, operand: &Expr) -> bool;
}

/// Walk an expression tree with a visitor
///
/// Visits nodes in pre-order (parent before children).
/// The visitor methods return true to continue walking children, false to skip.
pub fn walk_expr<V: ExprVisitor + ?Sized>(expr: &Expr, visitor: &mut V) {
    match &expr.kind {
        ExprKind::Param(handle) => {
            visitor.visit_param(*handle);
        }
        ExprKind::ParamDirect(param) => {
            visitor.visit_param_direct(param);
        }
        ExprKind::Number(n) => {
            visitor.visit_number(*n);
        }
        _ => {
            if let Some((op, l, r)) = expr.as_binary() {
                if visitor.visit_binary(op, l, r) {
                    walk_expr(l, visitor);
                    walk_expr(r, visitor);
                }
            } else if let Some((op, a)) = expr.as_unary()
                && visitor.visit_unary(op, a)
            {
                walk_expr(a, visitor);
            }
        }
    }
}

/// A simple visitor that counts nodes
#[derive(Default)]
pub struct NodeCounter {
    pub count: usize,
}

impl ExprVisitor for NodeCounter {
    fn visit_param(&mut self, _handle: ParamHandle) -> bool {
        self.count += 1;
        true
    }

    fn visit_param_direct(&mut self, _param: &Param) -> bool {
        self.count += 1;
        true
    }

    fn visit_number(&mut self, _n: f64) -> bool {
        self.count += 1;
        true
    }

    fn visit_binary(&mut self, _op: BinaryOp, _left: &Expr, _right: &Expr) -> bool {
        self.count += 1;
        true
    }

    fn visit_unary(&mut self, _op: UnaryOp, _operand: &Expr) -> bool {
        self.count += 1;
        true
    }
}

/// Collects the handles of every parameter an expression refers to
///
/// Resolved references count by their record's handle.
#[derive(Default)]
pub struct ParamCollector {
    pub handles: FxHashSet<ParamHandle>,
}

impl ExprVisitor for ParamCollector {
    fn visit_param(&mut self, handle: ParamHandle) -> bool {
        self.handles.insert(handle);
        true
    }

    fn visit_param_direct(&mut self, param: &Param) -> bool {
        self.handles.insert(param.handle());
        true
    }

    fn visit_number(&mut self, _n: f64) -> bool {
        true
    }

    fn visit_binary(&mut self, _op: BinaryOp, _left: &Expr, _right: &Expr) -> bool {
        true
    }

    fn visit_unary(&mut self, _op: UnaryOp, _operand: &Expr) -> bool {
        true
    }
}

/// Stops at the first reference to one parameter
struct DependencyFinder {
    target: ParamHandle,
    found: bool,
}

impl ExprVisitor for DependencyFinder {
    fn visit_param(&mut self, handle: ParamHandle) -> bool {
        self.found |= handle == self.target;
        !self.found
    }

    fn visit_param_direct(&mut self, param: &Param) -> bool {
        self.found |= param.handle() == self.target;
        !self.found
    }

    fn visit_number(&mut self, _n: f64) -> bool {
        !self.found
    }

    fn visit_binary(&mut self, _op: BinaryOp, _left: &Expr, _right: &Expr) -> bool {
        !self.found
    }

    fn visit_unary(&mut self, _op: UnaryOp, _operand: &Expr) -> bool {
        !self.found
    }
}

/// Stops at the first resolved parameter reference
#[derive(Default)]
struct ResolvedFinder {
    found: bool,
}

impl ExprVisitor for ResolvedFinder {
    fn visit_param(&mut self, _handle: ParamHandle) -> bool {
        !self.found
    }

    fn visit_param_direct(&mut self, _param: &Param) -> bool {
        self.found = true;
        false
    }

    fn visit_number(&mut self, _n: f64) -> bool {
        !self.found
    }

    fn visit_binary(&mut self, _op: BinaryOp, _left: &Expr, _right: &Expr) -> bool {
        !self.found
    }

    fn visit_unary(&mut self, _op: UnaryOp, _operand: &Expr) -> bool {
        !self.found
    }
}

impl Expr {
    /// Whether the expression holds any [`ExprKind::ParamDirect`] node
    pub fn has_resolved_params(&self) -> bool {
        let mut finder = ResolvedFinder::default();
        walk_expr(self, &mut finder);
        finder.found
    }

    /// Handles of all parameters the expression refers to, in ascending order
    pub fn params_used(&self) -> Vec<ParamHandle> {
        let mut collector = ParamCollector::default();
        walk_expr(self, &mut collector);
        let mut handles: Vec<ParamHandle> = collector.handles.into_iter().collect();
        handles.sort_unstable();
        handles
    }

    /// Whether the expression refers to parameter `p`
    pub fn depends_on(&self, p: ParamHandle) -> bool {
        let mut finder = DependencyFinder {
            target: p,
            found: false,
        };
        walk_expr(self, &mut finder);
        finder.found
    }
}
