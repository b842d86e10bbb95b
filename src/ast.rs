//! The AST the evaluator runs: a tagged sum type of atoms and composite
//! `head`/`args` nodes, exactly as the surface parser (`crate::parse`)
//! produces it.

use std::fmt;
use std::rc::Rc;

use crate::value::Value;

mod display;

/// The fixed vocabulary of composite node heads. An unrecognized head
/// (`Tag::Other`) is still evaluated (see `crate::eval::eval`), it just
/// doesn't get special-form treatment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tag {
    Call,
    If,
    Elseif,
    Let,
    Assign,
    FExprDef,
    MacroDef,
    Interpolate,
    Global,
    Block,
    Toplevel,
    And,
    Or,
    Lambda,
    Quote,
    Other(String),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Tag::Call => write!(f, "call"),
            Tag::If => write!(f, "if"),
            Tag::Elseif => write!(f, "elseif"),
            Tag::Let => write!(f, "let"),
            Tag::Assign => write!(f, "="),
            Tag::FExprDef => write!(f, ":="),
            Tag::MacroDef => write!(f, "$="),
            Tag::Interpolate => write!(f, "$"),
            Tag::Global => write!(f, "global"),
            Tag::Block => write!(f, "begin"),
            Tag::Toplevel => write!(f, "toplevel"),
            Tag::And => write!(f, "and"),
            Tag::Or => write!(f, "or"),
            Tag::Lambda => write!(f, "->"),
            Tag::Quote => write!(f, "quote"),
            Tag::Other(s) => write!(f, "{}", s),
        }
    }
}

/// An expression node: either a leaf atom or a composite `{ head, args }`.
///
/// `Expr` is the only thing the evaluator ever walks; it never looks at
/// source text. Cloning is cheap for every variant except `Node`, whose
/// `args` vector is cloned structurally, acceptable here since the tree is
/// small and short-lived per call.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Sym(String),
    Num(f64),
    Str(String),
    /// A literal `Value` embedded directly in the tree. Evaluates to the
    /// wrapped payload with no further evaluation, even if that payload is
    /// itself a quoted, unevaluated expression.
    QuoteVal(Rc<Value>),
    LineMarker,
    Nil,
    Node { head: Tag, args: Vec<Expr> },
}

impl Expr {
    pub fn sym(s: impl Into<String>) -> Self {
        Expr::Sym(s.into())
    }

    pub fn str(s: impl Into<String>) -> Self {
        Expr::Str(s.into())
    }

    pub fn node(head: Tag, args: Vec<Expr>) -> Self {
        Expr::Node { head, args }
    }

    pub fn call(args: Vec<Expr>) -> Self {
        Expr::node(Tag::Call, args)
    }

    /// Wrap an already-evaluated `Value` as a literal leaf.
    pub fn quoted(v: Value) -> Self {
        Expr::QuoteVal(Rc::new(v))
    }

    pub fn as_sym(&self) -> Option<&str> {
        match self {
            Expr::Sym(s) => Some(s),
            _ => None,
        }
    }

    pub fn head(&self) -> Option<&Tag> {
        match self {
            Expr::Node { head, .. } => Some(head),
            _ => None,
        }
    }

    pub fn args(&self) -> &[Expr] {
        match self {
            Expr::Node { args, .. } => args,
            _ => &[],
        }
    }

    /// For the `Call(name, p0, ..., pk)` signature shape used by `FExprDef`,
    /// `MacroDef`, `Assign`-as-function-definition, and `Lambda`: the bound
    /// name (if any, `Lambda`'s signature has none) and the formal
    /// parameter symbols.
    pub fn as_signature(&self, named: bool) -> crate::error::Result<(Option<String>, Vec<String>)> {
        let args = match self {
            Expr::Node {
                head: Tag::Call,
                args,
            } => args,
            _ => {
                return Err(crate::error::Error::MalformedAst {
                    head: "call".to_string(),
                    detail: "expected a Call(name, params...) signature",
                })
            }
        };

        let mut iter = args.iter();
        let name = if named {
            match iter.next().and_then(Expr::as_sym) {
                Some(s) => Some(s.to_string()),
                None => {
                    return Err(crate::error::Error::Type {
                        expected: "symbol",
                        given: "non-symbol in name position".to_string(),
                    })
                }
            }
        } else {
            None
        };

        let params = iter
            .map(|e| {
                e.as_sym().map(str::to_string).ok_or(crate::error::Error::Type {
                    expected: "symbol",
                    given: "non-symbol in parameter position".to_string(),
                })
            })
            .collect::<crate::error::Result<Vec<_>>>()?;

        Ok((name, params))
    }
}
