use param_expr::{Expr, ParamHandle, ParamStore, ParamTable, eval_jacobian, eval_str, jacobian};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let x = ParamHandle(1);
    let f = Expr::square(Expr::param(x)) - 2.0;
    let system = [f];
    let jac = jacobian(&system, &[x]);
    println!("f  = {}", system[0]);
    println!("f' = {}", jac[0][0]);

    let mut params = ParamTable::new();
    let guess = eval_str("(1 + 2) / 2", &params)?;
    params.insert(x, guess);

    for step in 0..6 {
        let value = system[0].eval(&params);
        let slope = eval_jacobian(&jac, &params)[0][0];
        let next = params.lookup(x) - value / slope;
        params.set(x, next);
        println!("step {step}: x = {next:.15}");
    }

    Ok(())
}
