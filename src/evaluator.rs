//! Numeric evaluation of expression trees

use crate::param::ParamStore;
use crate::{Expr, ExprKind};

impl Expr {
    /// Evaluate the expression with parameter values taken from `params`
    ///
    /// Plain IEEE-754 arithmetic: no domain checks, so `sqrt` of a negative value
    /// or a division by zero yields NaN or an infinity. Shared subtrees are
    /// recomputed at every occurrence.
    ///
    /// # Example
    /// ```
    /// use param_expr::{Expr, ParamHandle, ParamTable};
    ///
    /// let p = ParamHandle(1);
    /// let params: ParamTable = [(p, 9.0)].into_iter().collect();
    /// let expr = Expr::sqrt(Expr::param(p)) - 1.0;
    /// assert_eq!(expr.eval(&params), 2.0);
    /// ```
    pub fn eval<P: ParamStore + ?Sized>(&self, params: &P) -> f64 {
        match &self.kind {
            ExprKind::Param(handle) => params.lookup(*handle),
            ExprKind::ParamDirect(param) => param.value(),
            ExprKind::Number(n) => *n,

            ExprKind::Add(a, b) => a.eval(params) + b.eval(params),
            ExprKind::Sub(a, b) => a.eval(params) - b.eval(params),
            ExprKind::Mul(a, b) => a.eval(params) * b.eval(params),
            ExprKind::Div(a, b) => a.eval(params) / b.eval(params),

            ExprKind::Neg(a) => -a.eval(params),
            ExprKind::Sqrt(a) => a.eval(params).sqrt(),
            ExprKind::Square(a) => {
                let r = a.eval(params);
                r * r
            }
            ExprKind::Sin(a) => a.eval(params).sin(),
            ExprKind::Cos(a) => a.eval(params).cos(),
        }
    }

    /// Copy of the expression with every parameter the store can resolve
    /// replaced by a direct reference to its record
    ///
    /// The result evaluates without store lookups but can no longer be
    /// differentiated. Handles the store does not know stay as [`ExprKind::Param`].
    pub fn resolve_params<P: ParamStore + ?Sized>(&self, params: &P) -> Expr {
        if let Some((op, l, r)) = self.as_binary() {
            Expr::binary(op, l.resolve_params(params), r.resolve_params(params))
        } else if let Some((op, a)) = self.as_unary() {
            Expr::unary(op, a.resolve_params(params))
        } else {
            match &self.kind {
                ExprKind::Param(handle) => match params.resolve_direct(*handle) {
                    Some(param) => Expr::param_direct(param),
                    None => Expr::param(*handle),
                },
                kind => Expr::new(kind.clone()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Expr, ExprKind, ParamHandle, ParamStore, ParamTable};
    use std::sync::Arc;

    fn table() -> ParamTable {
        [(ParamHandle(1), 3.0), (ParamHandle(2), -0.5)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_eval_leaves() {
        let params = table();
        assert_eq!(Expr::number(2.5).eval(&params), 2.5);
        assert_eq!(Expr::param(ParamHandle(1)).eval(&params), 3.0);
        let direct = params.resolve_direct(ParamHandle(2)).unwrap();
        assert_eq!(Expr::param_direct(direct).eval(&params), -0.5);
    }

    #[test]
    fn test_eval_operators() {
        let params = table();
        let x = Expr::param(ParamHandle(1));
        let y = Expr::param(ParamHandle(2));

        assert_eq!((&x + &y).eval(&params), 2.5);
        assert_eq!((&x - &y).eval(&params), 3.5);
        assert_eq!((&x * &y).eval(&params), -1.5);
        assert_eq!((&x / &y).eval(&params), -6.0);
        assert_eq!((-&x).eval(&params), -3.0);
        assert_eq!(Expr::square(x.clone()).eval(&params), 9.0);
        assert_eq!(Expr::sqrt(Expr::number(16.0)).eval(&params), 4.0);
        assert_eq!(Expr::sin(Expr::number(0.0)).eval(&params), 0.0);
        assert_eq!(Expr::cos(Expr::number(0.0)).eval(&params), 1.0);
    }

    #[test]
    fn test_eval_has_no_domain_checks() {
        let params = ParamTable::new();
        assert!(Expr::sqrt(Expr::number(-1.0)).eval(&params).is_nan());
        assert_eq!(
            Expr::div_expr(Expr::number(1.0), Expr::number(0.0)).eval(&params),
            f64::INFINITY
        );
        // Unknown handles come back from the store as NaN and flow through
        assert!((Expr::param(ParamHandle(99)) + 1.0).eval(&params).is_nan());
    }

    #[test]
    fn test_eval_shared_subtree() {
        let params = table();
        let a = Arc::new(Expr::param(ParamHandle(1)) + 1.0);
        let e = Expr::mul_expr(Arc::clone(&a), a);
        assert_eq!(e.eval(&params), 16.0);
    }

    #[test]
    fn test_direct_reference_tracks_store_updates() {
        let params = table();
        let e = (Expr::param(ParamHandle(1)) * 2.0).resolve_params(&params);
        assert_eq!(e.eval(&params), 6.0);
        params.set(ParamHandle(1), 10.0);
        assert_eq!(e.eval(&params), 20.0);
    }

    #[test]
    fn test_resolve_params_keeps_unknown_handles() {
        let params = table();
        let e = Expr::add_expr(Expr::param(ParamHandle(1)), Expr::param(ParamHandle(7)));
        let resolved = e.resolve_params(&params);
        match &resolved.kind {
            ExprKind::Add(l, r) => {
                assert!(matches!(l.kind, ExprKind::ParamDirect(_)));
                assert!(matches!(r.kind, ExprKind::Param(ParamHandle(7))));
            }
            _ => panic!("Expected Add"),
        }
    }
}
