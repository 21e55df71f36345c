// Display formatting for expression trees
//
// Output is fully parenthesized: binary nodes as `(l op r)`, unary nodes in
// prefix form `(sqrt a)`. Constants are written with three decimals, which loses
// precision; the text is meant for diagnostics and for re-entry by a user, not
// as a faithful serialization of the underlying doubles.
use crate::{Expr, ExprKind};
use std::fmt::{self, Write};

impl Expr {
    /// Append the textual form of this expression to `buf`
    ///
    /// # Example
    /// ```
    /// use param_expr::{Expr, ParamHandle};
    ///
    /// let mut buf = String::from("f = ");
    /// let e = Expr::param(ParamHandle(0x2a)) * Expr::sqrt(Expr::number(2.0));
    /// e.print_into(&mut buf);
    /// assert_eq!(buf, "f = (param(0000002a) * (sqrt 2.000))");
    /// ```
    pub fn print_into(&self, buf: &mut String) {
        // Writing into a String cannot fail
        let _ = self.write_to(buf);
    }

    /// Textual form of this expression; constants keep three decimals only
    pub fn print(&self) -> String {
        let mut buf = String::new();
        self.print_into(&mut buf);
        buf
    }

    fn write_to<W: Write>(&self, out: &mut W) -> fmt::Result {
        match &self.kind {
            ExprKind::Param(handle) => write!(out, "param({})", handle),
            ExprKind::ParamDirect(param) => write!(out, "param(p{})", param.handle()),
            ExprKind::Number(n) => write!(out, "{:.3}", n),
            _ => {
                if let Some((op, l, r)) = self.as_binary() {
                    out.write_char('(')?;
                    l.write_to(out)?;
                    write!(out, " {} ", op.symbol())?;
                    r.write_to(out)?;
                    out.write_char(')')
                } else if let Some((op, a)) = self.as_unary() {
                    write!(out, "({} ", op.name())?;
                    a.write_to(out)?;
                    out.write_char(')')
                } else {
                    unreachable!("leaf kinds are handled above")
                }
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Expr, ParamHandle, ParamTable};

    #[test]
    fn test_display_number() {
        assert_eq!(format!("{}", Expr::number(1.0)), "1.000");
        assert_eq!(format!("{}", Expr::number(-0.25)), "-0.250");
        // Lossy: only three decimals survive
        assert_eq!(format!("{}", Expr::number(1.23456)), "1.235");
    }

    #[test]
    fn test_display_params() {
        assert_eq!(Expr::param(ParamHandle(0xbeef)).print(), "param(0000beef)");

        let mut table = ParamTable::new();
        let direct = table.insert(ParamHandle(0x10), 1.0);
        assert_eq!(Expr::param_direct(direct).print(), "param(p00000010)");
    }

    #[test]
    fn test_display_binary() {
        let e = Expr::add_expr(
            Expr::number(1.0),
            Expr::mul_expr(Expr::number(2.0), Expr::number(3.0)),
        );
        assert_eq!(e.print(), "(1.000 + (2.000 * 3.000))");

        let e = Expr::div_expr(
            Expr::sub_expr(Expr::number(1.0), Expr::number(2.0)),
            Expr::number(4.0),
        );
        assert_eq!(e.print(), "((1.000 - 2.000) / 4.000)");
    }

    #[test]
    fn test_display_unary() {
        let one = || Expr::number(1.0);
        assert_eq!(Expr::negate(one()).print(), "(- 1.000)");
        assert_eq!(Expr::sqrt(one()).print(), "(sqrt 1.000)");
        assert_eq!(Expr::square(one()).print(), "(square 1.000)");
        assert_eq!(Expr::sin(one()).print(), "(sin 1.000)");
        assert_eq!(Expr::cos(one()).print(), "(cos 1.000)");
    }

    #[test]
    fn test_print_into_appends() {
        let mut buf = String::new();
        Expr::number(1.0).print_into(&mut buf);
        buf.push_str(", ");
        Expr::number(2.0).print_into(&mut buf);
        assert_eq!(buf, "1.000, 2.000");
    }

    #[test]
    fn test_display_matches_print() {
        let e = Expr::cos(Expr::param(ParamHandle(3))) / 2.0;
        assert_eq!(e.to_string(), e.print());
    }
}
