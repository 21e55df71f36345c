//! Parallel batch evaluation using Rayon
//!
//! Enable with the `parallel` feature:
//! ```toml
//! param_expr = { version = "0.1", features = ["parallel"] }
//! ```

use crate::{Expr, ParamStore};
use rayon::prelude::*;

/// Evaluate every entry of a symbolic Jacobian, one row per task
///
/// Produces the same values as [`crate::eval_jacobian`].
pub fn eval_jacobian<P: ParamStore + Sync + ?Sized>(
    jac: &[Vec<Expr>],
    params: &P,
) -> Vec<Vec<f64>> {
    jac.par_iter()
        .map(|row| row.iter().map(|entry| entry.eval(params)).collect())
        .collect()
}

/// Evaluate several expressions at many parameter points
///
/// # Arguments
/// * `exprs` - Expressions to evaluate
/// * `points` - One parameter store per evaluation point
///
/// # Returns
/// `result[point_idx][expr_idx]`, in the order of `points`
///
/// # Example
/// ```
/// use param_expr::parallel::eval_batch;
/// use param_expr::{Expr, ParamHandle, ParamTable};
///
/// let x = ParamHandle(1);
/// let exprs = [Expr::square(Expr::param(x)), Expr::param(x) + 1.0];
/// let points: Vec<ParamTable> = (0..3)
///     .map(|i| [(x, f64::from(i))].into_iter().collect())
///     .collect();
///
/// let results = eval_batch(&exprs, &points);
/// assert_eq!(results, vec![vec![0.0, 1.0], vec![1.0, 2.0], vec![4.0, 3.0]]);
/// ```
pub fn eval_batch<P: ParamStore + Sync>(exprs: &[Expr], points: &[P]) -> Vec<Vec<f64>> {
    points
        .par_iter()
        .map(|params| exprs.iter().map(|expr| expr.eval(params)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ParamHandle, ParamTable, jacobian};

    #[test]
    fn test_parallel_matches_serial_jacobian() {
        let (x, y) = (ParamHandle(1), ParamHandle(2));
        let system = [
            Expr::sin(Expr::param(x)) * Expr::param(y),
            Expr::param(x) / Expr::sqrt(Expr::param(y)),
            Expr::square(Expr::param(y)) - Expr::param(x),
        ];
        let jac = jacobian(&system, &[x, y]);
        let params: ParamTable = [(x, 0.7), (y, 2.5)].into_iter().collect();

        assert_eq!(
            eval_jacobian(&jac, &params),
            crate::eval_jacobian(&jac, &params)
        );
    }

    #[test]
    fn test_eval_batch_empty() {
        let points: Vec<ParamTable> = Vec::new();
        assert!(eval_batch(&[Expr::number(1.0)], &points).is_empty());

        let points: Vec<ParamTable> = (0..2).map(|_| ParamTable::new()).collect();
        assert_eq!(eval_batch(&[], &points), vec![Vec::<f64>::new(); 2]);
    }

    #[test]
    fn test_eval_batch_unknown_param_is_nan() {
        let points = vec![ParamTable::new()];
        let results = eval_batch(&[Expr::param(ParamHandle(3))], &points);
        assert!(results[0][0].is_nan());
    }
}
