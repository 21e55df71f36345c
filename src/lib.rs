//! Parametric Expression Library
//!
//! Small arithmetic expression trees over numbered parameters, with
//! structural partial derivatives, a fully parenthesized printer and an
//! operator-precedence text parser.
//!
//! # Features
//! - Expression nodes: constants, parameter references (by handle or resolved),
//!   `+ - * /`, negation, `sqrt`, `square`, `sin`, `cos`
//! - Evaluation against any [`ParamStore`]
//! - Partial derivatives with respect to a single parameter, sharing subtrees
//!   with the differentiated expression
//! - **Builder pattern API** for parsing with explicit capacity limits
//!
//! # Usage Examples
//!
//! ## Building and differentiating
//! ```
//! use param_expr::{Expr, ParamHandle, ParamTable};
//!
//! let x = ParamHandle(1);
//! let f = Expr::square(Expr::param(x)) + Expr::sin(Expr::param(x));
//!
//! let params: ParamTable = [(x, 0.0)].into_iter().collect();
//! let df = f.partial_wrt(x);
//! assert_eq!(df.eval(&params), 1.0);
//! ```
//!
//! ## Parsing text
//! ```
//! use param_expr::{ParamTable, from_text};
//!
//! let expr = from_text("(2 + 3) * 4").unwrap();
//! assert_eq!(expr.eval(&ParamTable::new()), 20.0);
//! assert!(from_text("(2 + 3").is_none());
//! ```

mod ast;
mod builder;
mod differentiation;
mod display;
mod error;
mod evaluator;
mod helpers;
mod param;
mod parser;
pub mod visitor;

#[cfg(feature = "parallel")]
pub mod parallel;


// Re-export key types for easier usage
pub use ast::{BinaryOp, Expr, ExprKind, UnaryOp};
pub use builder::Parse;
pub use error::{ParseError, ParseResult, Span, StackKind};
pub use helpers::{eval_jacobian, eval_str, gradient, jacobian};
pub use param::{Param, ParamHandle, ParamStore, ParamTable};
pub use parser::parse;

/// Default maximum number of tokens in one input
pub const DEFAULT_MAX_TOKENS: usize = 1024;
/// Default capacity of each parser stack
pub const DEFAULT_STACK_CAPACITY: usize = 1024;
/// Default maximum nesting depth of parentheses
pub const DEFAULT_MAX_DEPTH: usize = 256;
/// Default maximum length of a number literal or name
pub const DEFAULT_MAX_LITERAL_LEN: usize = 30;

/// Parse arithmetic text into an expression tree
///
/// # Arguments
/// * `text` - Expression using numbers, `+ - * /`, parentheses, unary minus and `sqrt`
///
/// # Returns
/// The parsed tree, or `None` if the text does not form a single well-formed
/// expression. The reason is logged at debug level; use [`parse`] to get it back
/// as a [`ParseError`].
///
/// # Note
/// For other capacity limits, use the `Parse` builder:
/// ```
/// use param_expr::Parse;
/// assert!(Parse::new().stack_capacity(8).from_text("sqrt(2)").is_some());
/// ```
pub fn from_text(text: &str) -> Option<Expr> {
    Parse::new().from_text(text)
}
