// Differentiation engine - applies calculus rules structurally
//
// No inline simplification: every rule builds its full textbook form, and
// operand subtrees of the input are shared into the result rather than copied.
// Repeated differentiation therefore grows the tree geometrically.

use crate::param::ParamHandle;
use crate::{Expr, ExprKind};
use std::sync::Arc;

impl Expr {
    /// Partial derivative of this expression with respect to parameter `p`
    ///
    /// # Panics
    /// Panics if the tree contains a [`ExprKind::ParamDirect`] node. A resolved
    /// reference is a frozen value, not a variable; reaching one here means the
    /// caller differentiated an expression prepared for evaluation only.
    ///
    /// # Example
    /// ```
    /// use param_expr::{Expr, ParamHandle, ParamTable};
    ///
    /// let x = ParamHandle(1);
    /// let params: ParamTable = [(x, 3.0)].into_iter().collect();
    /// let expr = Expr::square(Expr::param(x));
    /// assert_eq!(expr.partial_wrt(x).eval(&params), 6.0);
    /// ```
    pub fn partial_wrt(&self, p: ParamHandle) -> Expr {
        match &self.kind {
            ExprKind::ParamDirect(param) => panic!(
                "cannot differentiate resolved parameter reference p{}",
                param.handle()
            ),
            ExprKind::Param(handle) => Expr::number(if *handle == p { 1.0 } else { 0.0 }),

            ExprKind::Number(_) => Expr::number(0.0),

            // Sum rule: (u + v)' = u' + v'
            ExprKind::Add(u, v) => Expr::add_expr(u.partial_wrt(p), v.partial_wrt(p)),

            // Subtraction rule: (u - v)' = u' - v'
            ExprKind::Sub(u, v) => Expr::sub_expr(u.partial_wrt(p), v.partial_wrt(p)),

            // Product rule: (u * v)' = u * v' + v * u'
            ExprKind::Mul(u, v) => {
                let u_prime = u.partial_wrt(p);
                let v_prime = v.partial_wrt(p);
                Expr::add_expr(
                    Expr::mul_expr(Arc::clone(u), v_prime),
                    Expr::mul_expr(Arc::clone(v), u_prime),
                )
            }

            // Quotient rule: (u / v)' = (u' * v - u * v') / v^2
            ExprKind::Div(u, v) => {
                let u_prime = u.partial_wrt(p);
                let v_prime = v.partial_wrt(p);
                let numerator = Expr::sub_expr(
                    Expr::mul_expr(u_prime, Arc::clone(v)),
                    Expr::mul_expr(Arc::clone(u), v_prime),
                );
                Expr::div_expr(numerator, Expr::square(Arc::clone(v)))
            }

            // sqrt(u)' = 0.5 / sqrt(u) * u'
            ExprKind::Sqrt(u) => Expr::mul_expr(
                Expr::div_expr(Expr::number(0.5), Expr::sqrt(Arc::clone(u))),
                u.partial_wrt(p),
            ),

            // (u^2)' = 2 * u * u'
            ExprKind::Square(u) => Expr::mul_expr(
                Expr::mul_expr(Expr::number(2.0), Arc::clone(u)),
                u.partial_wrt(p),
            ),

            ExprKind::Neg(u) => Expr::negate(u.partial_wrt(p)),

            ExprKind::Sin(u) => Expr::mul_expr(Expr::cos(Arc::clone(u)), u.partial_wrt(p)),

            ExprKind::Cos(u) => Expr::negate(Expr::mul_expr(
                Expr::sin(Arc::clone(u)),
                u.partial_wrt(p),
            )),
        }
    }
}
