//! Multi-parameter differentiation helpers
//!
//! Provides gradient and jacobian construction, jacobian evaluation, and a
//! one-shot text evaluation entry point.

use crate::{Expr, ParamHandle, ParamStore, ParseResult, parser};

/// Partial derivative that skips the structural walk for absent parameters
///
/// Trees with resolved references still take the full walk, so they panic the
/// same way [`Expr::partial_wrt`] does.
fn partial_or_zero(expr: &Expr, p: ParamHandle) -> Expr {
    if expr.depends_on(p) || expr.has_resolved_params() {
        expr.partial_wrt(p)
    } else {
        Expr::number(0.0)
    }
}

/// Compute the gradient of an expression with respect to several parameters
/// Returns a vector of partial derivatives [∂f/∂p₁, ∂f/∂p₂, ...]
///
/// Entries for parameters the expression does not refer to are the constant 0.
///
/// # Panics
/// Panics if the expression holds a resolved parameter reference, like
/// [`Expr::partial_wrt`].
///
/// # Example
/// ```
/// use param_expr::{Expr, ParamHandle, ParamTable, gradient};
///
/// let (x, y) = (ParamHandle(1), ParamHandle(2));
/// let f = Expr::square(Expr::param(x)) + Expr::param(x) * Expr::param(y);
/// let grad = gradient(&f, &[x, y]);
///
/// let params: ParamTable = [(x, 3.0), (y, 5.0)].into_iter().collect();
/// assert_eq!(grad[0].eval(&params), 11.0);
/// assert_eq!(grad[1].eval(&params), 3.0);
/// ```
pub fn gradient(expr: &Expr, params: &[ParamHandle]) -> Vec<Expr> {
    params.iter().map(|&p| partial_or_zero(expr, p)).collect()
}

/// Compute the Jacobian matrix of a system of expressions
/// Returns a 2D vector where J[i][j] = ∂fᵢ/∂pⱼ
#[tracing::instrument(skip_all, fields(equations = exprs.len(), params = params.len()))]
pub fn jacobian(exprs: &[Expr], params: &[ParamHandle]) -> Vec<Vec<Expr>> {
    exprs.iter().map(|expr| gradient(expr, params)).collect()
}

/// Evaluate every entry of a symbolic Jacobian against one parameter store
pub fn eval_jacobian<P: ParamStore + ?Sized>(jac: &[Vec<Expr>], params: &P) -> Vec<Vec<f64>> {
    jac.iter()
        .map(|row| row.iter().map(|entry| entry.eval(params)).collect())
        .collect()
}

/// Parse a formula and evaluate it against `params`
///
/// The text grammar has no parameter syntax, so the store only matters for
/// API symmetry with [`Expr::eval`].
///
/// # Example
/// ```
/// use param_expr::{ParamTable, eval_str};
///
/// assert_eq!(eval_str("2 - 3 - 4", &ParamTable::new()).unwrap(), -5.0);
/// assert!(eval_str("2 +", &ParamTable::new()).is_err());
/// ```
pub fn eval_str<P: ParamStore + ?Sized>(formula: &str, params: &P) -> ParseResult<f64> {
    let expr = parser::parse(formula)?;
    Ok(expr.eval(params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ParamTable;

    #[test]
    fn test_gradient() {
        let (x, y, z) = (ParamHandle(1), ParamHandle(2), ParamHandle(3));
        let f = Expr::sin(Expr::param(x)) * Expr::param(y);
        let grad = gradient(&f, &[x, y, z]);
        assert_eq!(grad.len(), 3);
        assert_eq!(grad[2], Expr::number(0.0));

        let params: ParamTable = [(x, 0.0), (y, 2.0)].into_iter().collect();
        assert_eq!(grad[0].eval(&params), 2.0);
        assert_eq!(grad[1].eval(&params), 0.0);
    }

    #[test]
    #[should_panic(expected = "cannot differentiate resolved parameter")]
    fn test_gradient_rejects_resolved_reference_to_other_param() {
        let (x, y) = (ParamHandle(1), ParamHandle(2));
        let params: ParamTable = [(x, 1.0), (y, 2.0)].into_iter().collect();
        let resolved_y = (Expr::param(y) * 3.0).resolve_params(&params);
        let _ = gradient(&resolved_y, &[x]);
    }

    #[test]
    fn test_jacobian() {
        let (x, y) = (ParamHandle(1), ParamHandle(2));
        let f1 = Expr::square(Expr::param(x)) + Expr::param(y);
        let f2 = Expr::param(x) * Expr::param(y);
        let jac = jacobian(&[f1, f2], &[x, y]);
        assert_eq!(jac.len(), 2);
        assert_eq!(jac[0].len(), 2);

        let params: ParamTable = [(x, 3.0), (y, 4.0)].into_iter().collect();
        let values = eval_jacobian(&jac, &params);
        assert_eq!(values, vec![vec![6.0, 1.0], vec![4.0, 3.0]]);
    }

    #[test]
    fn test_jacobian_sees_store_updates() {
        let x = ParamHandle(7);
        let mut params = ParamTable::new();
        params.insert(x, 1.0);
        let f = Expr::cos(Expr::param(x));
        let jac = jacobian(&[f], &[x]);

        assert_eq!(eval_jacobian(&jac, &params)[0][0], -(1.0f64.sin()));
        params.set(x, 0.0);
        assert_eq!(eval_jacobian(&jac, &params)[0][0], 0.0);
    }

    #[test]
    fn test_eval_str() {
        let params = ParamTable::new();
        assert_eq!(eval_str("2+3*4", &params).unwrap(), 14.0);
        assert_eq!(eval_str("sqrt(2+2)", &params).unwrap(), 2.0);
        assert!(eval_str("foo(2)", &params).is_err());
    }
}
