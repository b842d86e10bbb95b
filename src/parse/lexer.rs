use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Eq,
    ColonEq,
    DollarEq,
    Arrow,
    Dollar,
    QuoteOpen,
    Plus,
    Minus,
    Star,
    Slash,
    EqEq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    Bang,
    KwIf,
    KwElseif,
    KwElse,
    KwLet,
    KwGlobal,
    KwAnd,
    KwOr,
    KwNil,
    KwQuote,
    Ident(String),
    Num(f64),
    Str(String),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '!' || c == '?'
}

pub fn lex(text: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    macro_rules! two_char {
        ($second:expr, $kind:expr) => {
            if i + 1 < chars.len() && chars[i + 1] == $second {
                tokens.push(Token { kind: $kind });
                i += 2;
                continue;
            }
        };
    }

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == ';' {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }

        if c == '"' {
            let mut j = i + 1;
            let mut s = String::new();
            let mut closed = false;
            while j < chars.len() {
                match chars[j] {
                    '"' => {
                        closed = true;
                        j += 1;
                        break;
                    }
                    '\\' if j + 1 < chars.len() => {
                        let esc = chars[j + 1];
                        s.push(match esc {
                            'n' => '\n',
                            't' => '\t',
                            'r' => '\r',
                            '0' => '\0',
                            other => other,
                        });
                        j += 2;
                    }
                    other => {
                        s.push(other);
                        j += 1;
                    }
                }
            }
            if !closed {
                return Err(Error::Syntax {
                    exp: format!("unterminated string literal starting at {}", i),
                });
            }
            tokens.push(Token {
                kind: TokenKind::Str(s),
            });
            i = j;
            continue;
        }

        if c.is_ascii_digit() {
            let mut j = i;
            while j < chars.len() && chars[j].is_ascii_digit() {
                j += 1;
            }
            if j < chars.len() && chars[j] == '.' && j + 1 < chars.len() && chars[j + 1].is_ascii_digit() {
                j += 1;
                while j < chars.len() && chars[j].is_ascii_digit() {
                    j += 1;
                }
            }
            let slice: String = chars[i..j].iter().collect();
            let n: f64 = slice.parse().map_err(|_| Error::Syntax {
                exp: format!("malformed number literal {:?}", slice),
            })?;
            tokens.push(Token {
                kind: TokenKind::Num(n),
            });
            i = j;
            continue;
        }

        if is_ident_start(c) {
            let mut j = i;
            while j < chars.len() && is_ident_char(chars[j]) {
                j += 1;
            }
            let word: String = chars[i..j].iter().collect();
            let kind = match word.as_str() {
                "if" => TokenKind::KwIf,
                "elseif" => TokenKind::KwElseif,
                "else" => TokenKind::KwElse,
                "let" => TokenKind::KwLet,
                "global" => TokenKind::KwGlobal,
                "and" => TokenKind::KwAnd,
                "or" => TokenKind::KwOr,
                "nil" => TokenKind::KwNil,
                "quote" => TokenKind::KwQuote,
                _ => TokenKind::Ident(word),
            };
            tokens.push(Token { kind });
            i = j;
            continue;
        }

        match c {
            ':' => {
                two_char!('=', TokenKind::ColonEq);
                two_char!('(', TokenKind::QuoteOpen);
                return Err(Error::Syntax {
                    exp: format!("unexpected ':' at position {}", i),
                });
            }
            '$' => {
                two_char!('=', TokenKind::DollarEq);
                tokens.push(Token {
                    kind: TokenKind::Dollar,
                });
                i += 1;
                continue;
            }
            '-' => {
                two_char!('>', TokenKind::Arrow);
                tokens.push(Token {
                    kind: TokenKind::Minus,
                });
                i += 1;
                continue;
            }
            '=' => {
                two_char!('=', TokenKind::EqEq);
                tokens.push(Token { kind: TokenKind::Eq });
                i += 1;
                continue;
            }
            '!' => {
                two_char!('=', TokenKind::Ne);
                tokens.push(Token {
                    kind: TokenKind::Bang,
                });
                i += 1;
                continue;
            }
            '<' => {
                two_char!('=', TokenKind::Le);
                tokens.push(Token { kind: TokenKind::Lt });
                i += 1;
                continue;
            }
            '>' => {
                two_char!('=', TokenKind::Ge);
                tokens.push(Token { kind: TokenKind::Gt });
                i += 1;
                continue;
            }
            '(' => {
                tokens.push(Token {
                    kind: TokenKind::LParen,
                });
                i += 1;
            }
            ')' => {
                tokens.push(Token {
                    kind: TokenKind::RParen,
                });
                i += 1;
            }
            '{' => {
                tokens.push(Token {
                    kind: TokenKind::LBrace,
                });
                i += 1;
            }
            '}' => {
                tokens.push(Token {
                    kind: TokenKind::RBrace,
                });
                i += 1;
            }
            '[' => {
                tokens.push(Token {
                    kind: TokenKind::LBracket,
                });
                i += 1;
            }
            ']' => {
                tokens.push(Token {
                    kind: TokenKind::RBracket,
                });
                i += 1;
            }
            ',' => {
                tokens.push(Token {
                    kind: TokenKind::Comma,
                });
                i += 1;
            }
            '+' => {
                tokens.push(Token {
                    kind: TokenKind::Plus,
                });
                i += 1;
            }
            '*' => {
                tokens.push(Token {
                    kind: TokenKind::Star,
                });
                i += 1;
            }
            '/' => {
                tokens.push(Token {
                    kind: TokenKind::Slash,
                });
                i += 1;
            }
            other => {
                return Err(Error::Syntax {
                    exp: format!("unexpected character {:?} at position {}", other, i),
                });
            }
        }
    }

    tokens.push(Token { kind: TokenKind::Eof });
    Ok(tokens)
}
