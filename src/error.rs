use std::fmt;

/// Multipurpose error type for the evaluator, environment, and surface parser.
#[derive(Debug, Clone)]
pub enum Error {
    UnboundSymbol {
        sym: String,
    },
    BadCallable {
        exp: String,
    },
    InvalidGlobal {
        exp: String,
    },
    Arity {
        expected: usize,
        given: usize,
    },
    Type {
        expected: &'static str,
        given: String,
    },
    MalformedAst {
        head: String,
        detail: &'static str,
    },
    Syntax {
        exp: String,
    },
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnboundSymbol { sym } => write!(f, "Undefined symbol: {}", sym),
            Error::BadCallable { exp } => write!(f, "{} is not callable.", exp),
            Error::InvalidGlobal { exp } => {
                write!(f, "Invalid `global` entry: {}", exp)
            }
            Error::Arity { expected, given } => write!(
                f,
                "Arity mismatch: expected {} parameters, got {}.",
                expected, given
            ),
            Error::Type { expected, given } => {
                write!(f, "Type error: expected {}, got {}", expected, given)
            }
            Error::MalformedAst { head, detail } => {
                write!(f, "Malformed `{}` expression: {}", head, detail)
            }
            Error::Syntax { exp } => write!(f, "Could not parse expression: {}", exp),
        }
    }
}

pub type Result<T = crate::value::Value> = std::result::Result<T, Error>;
