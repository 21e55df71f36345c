//! Parser module - converts text to expression trees
mod lexer;
mod shunting_yard;
mod tokens;

use crate::error::ParseResult;
use crate::{
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_LITERAL_LEN, DEFAULT_MAX_TOKENS, DEFAULT_STACK_CAPACITY, Expr,
};

/// Parse arithmetic text into an expression tree with default limits
///
/// Accepts numbers, `+ - * /`, parentheses, unary minus and `sqrt`.
/// Precedence from tightest: `sqrt` and unary minus, then `* /`, then `+ -`;
/// binary operators associate to the left.
///
/// # Example
/// ```
/// use param_expr::{ParamTable, parse};
///
/// let expr = parse("sqrt(2)/2").unwrap();
/// let value = expr.eval(&ParamTable::new());
/// assert!((value - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-15);
/// ```
///
/// # Errors
/// Returns a [`ParseError`](crate::ParseError) if the text contains an unknown
/// character or name, is incomplete, has unbalanced parentheses, or exceeds the
/// default capacity limits.
///
/// Text that continues after a complete expression is rejected with
/// [`ParseError::UnexpectedToken`](crate::ParseError::UnexpectedToken): `"2 3"` and
/// `"2+3)"` are errors, not the value of their first expression.
pub fn parse(input: &str) -> ParseResult<Expr> {
    parse_with_limits(
        input,
        DEFAULT_MAX_TOKENS,
        DEFAULT_STACK_CAPACITY,
        DEFAULT_MAX_DEPTH,
        DEFAULT_MAX_LITERAL_LEN,
    )
}

/// Pipeline: lex -> shunting-yard
pub(crate) fn parse_with_limits(
    input: &str,
    max_tokens: usize,
    stack_capacity: usize,
    max_depth: usize,
    max_literal_len: usize,
) -> ParseResult<Expr> {
    let limits = lexer::LexLimits {
        max_tokens,
        max_literal_len,
    };
    let tokens = lexer::lex(input, &limits)?;
    shunting_yard::parse_tokens(&tokens, stack_capacity, max_depth)
}
