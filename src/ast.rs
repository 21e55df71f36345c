//! Expression tree over solver parameters

use std::ops::{Add, Deref, Div, Mul, Neg, Sub};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::param::{Param, ParamHandle};

/// Global counter for expression IDs
static EXPR_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    EXPR_ID_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// A node of an expression tree
///
/// Children are shared through `Arc`, so a tree produced by differentiation is in
/// general a DAG: the derivative reuses operand subtrees of its input. Nothing in
/// this crate mutates a node after construction.
#[derive(Debug, Clone)]
pub struct Expr {
    /// Unique ID for debugging (not used in equality comparisons)
    pub id: u64,
    pub kind: ExprKind,
}

impl Deref for Expr {
    type Target = ExprKind;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

// Structural equality on KIND only
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// Parameter referenced by handle, looked up in the store at evaluation time
    Param(ParamHandle),

    /// Parameter record resolved ahead of time; cannot be differentiated
    ParamDirect(Arc<Param>),

    /// Constant number
    Number(f64),

    // Binary operations
    Add(Arc<Expr>, Arc<Expr>),
    Sub(Arc<Expr>, Arc<Expr>),
    Mul(Arc<Expr>, Arc<Expr>),
    Div(Arc<Expr>, Arc<Expr>),

    // Unary operations
    Neg(Arc<Expr>),
    Sqrt(Arc<Expr>),
    /// `a * a`
    Square(Arc<Expr>),
    Sin(Arc<Expr>),
    Cos(Arc<Expr>),
}

/// Binary operator of an [`ExprKind`] node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }
}

/// Unary operator of an [`ExprKind`] node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Sqrt,
    Square,
    Sin,
    Cos,
}

impl UnaryOp {
    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Sqrt => "sqrt",
            UnaryOp::Square => "square",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
        }
    }
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Expr {
            id: next_id(),
            kind,
        }
    }

    // Leaf constructors

    /// Reference to a parameter by handle
    pub fn param(handle: ParamHandle) -> Self {
        Expr::new(ExprKind::Param(handle))
    }

    /// Direct reference to a resolved parameter record
    pub fn param_direct(param: Arc<Param>) -> Self {
        Expr::new(ExprKind::ParamDirect(param))
    }

    /// Create a number expression
    pub fn number(n: f64) -> Self {
        Expr::new(ExprKind::Number(n))
    }

    // Combinators. Operands may be owned or already shared.

    pub fn add_expr(left: impl Into<Arc<Expr>>, right: impl Into<Arc<Expr>>) -> Self {
        Expr::new(ExprKind::Add(left.into(), right.into()))
    }

    pub fn sub_expr(left: impl Into<Arc<Expr>>, right: impl Into<Arc<Expr>>) -> Self {
        Expr::new(ExprKind::Sub(left.into(), right.into()))
    }

    pub fn mul_expr(left: impl Into<Arc<Expr>>, right: impl Into<Arc<Expr>>) -> Self {
        Expr::new(ExprKind::Mul(left.into(), right.into()))
    }

    pub fn div_expr(left: impl Into<Arc<Expr>>, right: impl Into<Arc<Expr>>) -> Self {
        Expr::new(ExprKind::Div(left.into(), right.into()))
    }

    /// Build a binary node from an operator tag
    pub fn binary(op: BinaryOp, left: impl Into<Arc<Expr>>, right: impl Into<Arc<Expr>>) -> Self {
        match op {
            BinaryOp::Add => Expr::add_expr(left, right),
            BinaryOp::Sub => Expr::sub_expr(left, right),
            BinaryOp::Mul => Expr::mul_expr(left, right),
            BinaryOp::Div => Expr::div_expr(left, right),
        }
    }

    /// Build a unary node from an operator tag
    pub fn unary(op: UnaryOp, operand: impl Into<Arc<Expr>>) -> Self {
        let a = operand.into();
        Expr::new(match op {
            UnaryOp::Neg => ExprKind::Neg(a),
            UnaryOp::Sqrt => ExprKind::Sqrt(a),
            UnaryOp::Square => ExprKind::Square(a),
            UnaryOp::Sin => ExprKind::Sin(a),
            UnaryOp::Cos => ExprKind::Cos(a),
        })
    }

    pub fn negate(operand: impl Into<Arc<Expr>>) -> Self {
        Expr::new(ExprKind::Neg(operand.into()))
    }

    pub fn sqrt(operand: impl Into<Arc<Expr>>) -> Self {
        Expr::new(ExprKind::Sqrt(operand.into()))
    }

    pub fn square(operand: impl Into<Arc<Expr>>) -> Self {
        Expr::new(ExprKind::Square(operand.into()))
    }

    pub fn sin(operand: impl Into<Arc<Expr>>) -> Self {
        Expr::new(ExprKind::Sin(operand.into()))
    }

    pub fn cos(operand: impl Into<Arc<Expr>>) -> Self {
        Expr::new(ExprKind::Cos(operand.into()))
    }

    // Accessors

    /// Check if expression is a constant number and return its value
    pub fn as_number(&self) -> Option<f64> {
        match &self.kind {
            ExprKind::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Operator and children of a binary node
    pub fn as_binary(&self) -> Option<(BinaryOp, &Arc<Expr>, &Arc<Expr>)> {
        match &self.kind {
            ExprKind::Add(l, r) => Some((BinaryOp::Add, l, r)),
            ExprKind::Sub(l, r) => Some((BinaryOp::Sub, l, r)),
            ExprKind::Mul(l, r) => Some((BinaryOp::Mul, l, r)),
            ExprKind::Div(l, r) => Some((BinaryOp::Div, l, r)),
            _ => None,
        }
    }

    /// Operator and operand of a unary node
    pub fn as_unary(&self) -> Option<(UnaryOp, &Arc<Expr>)> {
        match &self.kind {
            ExprKind::Neg(a) => Some((UnaryOp::Neg, a)),
            ExprKind::Sqrt(a) => Some((UnaryOp::Sqrt, a)),
            ExprKind::Square(a) => Some((UnaryOp::Square, a)),
            ExprKind::Sin(a) => Some((UnaryOp::Sin, a)),
            ExprKind::Cos(a) => Some((UnaryOp::Cos, a)),
            _ => None,
        }
    }

    // Analysis methods

    /// Count the total number of nodes, counting shared subtrees once per occurrence
    pub fn node_count(&self) -> usize {
        if let Some((_, l, r)) = self.as_binary() {
            1 + l.node_count() + r.node_count()
        } else if let Some((_, a)) = self.as_unary() {
            1 + a.node_count()
        } else {
            1
        }
    }

    /// Get the maximum nesting depth of the tree
    pub fn max_depth(&self) -> usize {
        if let Some((_, l, r)) = self.as_binary() {
            1 + l.max_depth().max(r.max_depth())
        } else if let Some((_, a)) = self.as_unary() {
            1 + a.max_depth()
        } else {
            1
        }
    }

    /// Create a deep clone of the expression tree (no shared nodes)
    /// Note: This generates NEW IDs for everything
    pub fn deep_clone(&self) -> Expr {
        if let Some((op, l, r)) = self.as_binary() {
            Expr::binary(op, l.deep_clone(), r.deep_clone())
        } else if let Some((op, a)) = self.as_unary() {
            Expr::unary(op, a.deep_clone())
        } else {
            Expr::new(self.kind.clone())
        }
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::number(n)
    }
}

impl From<ParamHandle> for Expr {
    fn from(handle: ParamHandle) -> Self {
        Expr::param(handle)
    }
}

// ===== Operator overloading =====

macro_rules! impl_binary_ops {
    ($($trait:ident, $method:ident, $ctor:ident);* $(;)?) => {
        $(
            impl $trait for Expr {
                type Output = Expr;
                fn $method(self, rhs: Expr) -> Expr {
                    Expr::$ctor(self, rhs)
                }
            }

            impl $trait<&Expr> for &Expr {
                type Output = Expr;
                fn $method(self, rhs: &Expr) -> Expr {
                    Expr::$ctor(self.clone(), rhs.clone())
                }
            }

            impl $trait<f64> for Expr {
                type Output = Expr;
                fn $method(self, rhs: f64) -> Expr {
                    Expr::$ctor(self, Expr::number(rhs))
                }
            }

            impl $trait<f64> for &Expr {
                type Output = Expr;
                fn $method(self, rhs: f64) -> Expr {
                    Expr::$ctor(self.clone(), Expr::number(rhs))
                }
            }

            impl $trait<Expr> for f64 {
                type Output = Expr;
                fn $method(self, rhs: Expr) -> Expr {
                    Expr::$ctor(Expr::number(self), rhs)
                }
            }
        )*
    };
}

impl_binary_ops!(
    Add, add, add_expr;
    Sub, sub, sub_expr;
    Mul, mul, mul_expr;
    Div, div, div_expr;
);

impl Neg for Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::negate(self)
    }
}

impl Neg for &Expr {
    type Output = Expr;
    fn neg(self) -> Expr {
        Expr::negate(self.clone())
    }
}
