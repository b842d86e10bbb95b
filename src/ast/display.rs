use std::fmt;

use super::{Expr, Tag};

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Sym(s) => write!(f, "{}", s),
            Expr::Num(n) => write!(f, "{}", n),
            Expr::Str(s) => write!(f, "{:?}", s),
            Expr::QuoteVal(v) => write!(f, "{}", v),
            Expr::LineMarker => Ok(()),
            Expr::Nil => write!(f, "nil"),
            Expr::Node { head: Tag::Call, args } => {
                let mut iter = args.iter();
                if let Some(callee) = iter.next() {
                    write!(f, "{}(", callee)?;
                    let rest = iter.map(ToString::to_string).collect::<Vec<_>>().join(", ");
                    write!(f, "{})", rest)
                } else {
                    write!(f, "()")
                }
            }
            Expr::Node { head, args } => {
                write!(f, "{}(", head)?;
                let rest = args.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
                write!(f, "{})", rest)
            }
        }
    }
}
