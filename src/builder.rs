//! Builder pattern API for parsing
//!
//! Provides a fluent interface for configuring the capacity limits of the text parser.
//!
//! # Example
//! ```
//! use param_expr::Parse;
//!
//! let expr = Parse::new()
//!     .max_tokens(64)
//!     .stack_capacity(16)
//!     .max_literal_len(12)
//!     .parse_str("(1 + 2) * 3")
//!     .unwrap();
//! assert_eq!(expr.print(), "((1.000 + 2.000) * 3.000)");
//! ```

use crate::error::ParseResult;
use crate::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_LITERAL_LEN, DEFAULT_MAX_TOKENS, DEFAULT_STACK_CAPACITY, Expr,
    parser,
};

/// Builder for parse operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parse {
    max_tokens: usize,
    stack_capacity: usize,
    max_depth: usize,
    max_literal_len: usize,
}

impl Default for Parse {
    fn default() -> Self {
        Parse {
            max_tokens: DEFAULT_MAX_TOKENS,
            stack_capacity: DEFAULT_STACK_CAPACITY,
            max_depth: DEFAULT_MAX_DEPTH,
            max_literal_len: DEFAULT_MAX_LITERAL_LEN,
        }
    }
}

impl Parse {
    /// Create a new parse builder with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of tokens the input may lex into
    pub fn max_tokens(mut self, max: usize) -> Self {
        self.max_tokens = max;
        self
    }

    /// Maximum number of entries on each parser stack
    ///
    /// Every parenthesized group holds one operator-stack entry while open.
    pub fn stack_capacity(mut self, capacity: usize) -> Self {
        self.stack_capacity = capacity;
        self
    }

    /// Maximum nesting depth of parenthesized groups
    ///
    /// Each group is parsed by a recursive call, so this bounds native stack use
    /// independently of `stack_capacity`.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Maximum length of a single number literal or name
    pub fn max_literal_len(mut self, len: usize) -> Self {
        self.max_literal_len = len;
        self
    }

    /// Parse `input` into an expression tree
    pub fn parse_str(&self, input: &str) -> ParseResult<Expr> {
        parser::parse_with_limits(
            input,
            self.max_tokens,
            self.stack_capacity,
            self.max_depth,
            self.max_literal_len,
        )
    }

    /// Parse `input`, logging the diagnostic and returning `None` on failure
    pub fn from_text(&self, input: &str) -> Option<Expr> {
        match self.parse_str(input) {
            Ok(expr) => Some(expr),
            Err(err) => {
                tracing::debug!(input, error = %err, "parse/lex error");
                None
            }
        }
    }
}
