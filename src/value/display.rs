use std::fmt;

use super::Value;

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::QuoteVal(e) => write!(f, "{}", e),
            Value::Nil => Ok(()),
            Value::Function(_) => write!(f, "<function>"),
            Value::FExpr(_) => write!(f, "<fexpr>"),
            Value::Macro(_) => write!(f, "<macro>"),
            Value::CallScopedEval(_) => write!(f, "<function>"),
            Value::HostCallable(..) => write!(f, "<primitive>"),
            Value::List(items) => {
                let rendered = items
                    .borrow()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                write!(f, "({})", rendered)
            }
        }
    }
}
