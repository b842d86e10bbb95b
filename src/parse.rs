//! The surface-syntax parser: turns line-oriented source text into the
//! `Expr` trees the evaluator runs. Tokenizes atoms, strings, and the fixed
//! set of special forms, built as a two-stage lex-then-parse pipeline.

use crate::ast::{Expr, Tag};
use crate::error::{Error, Result};

mod lexer;
#[cfg(test)]
mod tests;

use lexer::{Token, TokenKind};

/// Parse a whole program into a single `Toplevel` node.
pub fn parse(text: &str) -> Result<Expr> {
    let tokens = lexer::lex(text)?;
    let mut parser = Parser { tokens, pos: 0 };
    let mut statements = Vec::new();

    while !parser.at_eof() {
        statements.push(parser.statement()?);
    }

    Ok(Expr::node(Tag::Toplevel, statements))
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn at_eof(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn syntax_err(&self, detail: &str) -> Error {
        Error::Syntax {
            exp: format!("{} (near {:?})", detail, self.peek().kind),
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.peek_kind() == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.syntax_err(&format!("expected {:?}", kind)))
        }
    }

    fn eat_ident(&mut self) -> Result<String> {
        match self.peek_kind().clone() {
            TokenKind::Ident(s) => {
                self.advance();
                Ok(s)
            }
            _ => Err(self.syntax_err("expected identifier")),
        }
    }

    /// A statement is either `lhs = rhs`, `signature := body`,
    /// `signature $= body`, or a bare expression.
    fn statement(&mut self) -> Result<Expr> {
        let lhs = self.primary_chain()?;

        match self.peek_kind() {
            TokenKind::Eq => {
                self.advance();
                let rhs = self.expr()?;
                Ok(Expr::node(Tag::Assign, vec![lhs, rhs]))
            }
            TokenKind::ColonEq => {
                self.advance();
                let rhs = self.expr()?;
                Ok(Expr::node(Tag::FExprDef, vec![lhs, rhs]))
            }
            TokenKind::DollarEq => {
                self.advance();
                let rhs = self.expr()?;
                Ok(Expr::node(Tag::MacroDef, vec![lhs, rhs]))
            }
            _ => self.expr_from(lhs),
        }
    }

    /// A full expression, starting fresh (used for right-hand sides,
    /// call arguments, block contents, etc).
    fn expr(&mut self) -> Result<Expr> {
        let lhs = self.primary_chain()?;
        self.expr_from(lhs)
    }

    /// Continue precedence-climbing from an already-parsed primary.
    fn expr_from(&mut self, lhs: Expr) -> Result<Expr> {
        self.or_expr(lhs)
    }

    fn or_expr(&mut self, first: Expr) -> Result<Expr> {
        let first = self.and_expr(first)?;
        let mut terms = vec![first];
        while matches!(self.peek_kind(), TokenKind::KwOr) {
            self.advance();
            let next = self.primary_chain()?;
            let next = self.and_expr(next)?;
            terms.push(next);
        }
        if terms.len() == 1 {
            Ok(terms.pop().unwrap())
        } else {
            Ok(Expr::node(Tag::Or, terms))
        }
    }

    fn and_expr(&mut self, first: Expr) -> Result<Expr> {
        let first = self.equality(first)?;
        let mut terms = vec![first];
        while matches!(self.peek_kind(), TokenKind::KwAnd) {
            self.advance();
            let next = self.primary_chain()?;
            let next = self.equality(next)?;
            terms.push(next);
        }
        if terms.len() == 1 {
            Ok(terms.pop().unwrap())
        } else {
            Ok(Expr::node(Tag::And, terms))
        }
    }

    fn equality(&mut self, mut lhs: Expr) -> Result<Expr> {
        lhs = self.relational(lhs)?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::EqEq => "==",
                TokenKind::Ne => "!=",
                _ => break,
            };
            self.advance();
            let rhs = self.primary_chain()?;
            let rhs = self.relational(rhs)?;
            lhs = Expr::call(vec![Expr::sym(op), lhs, rhs]);
        }
        Ok(lhs)
    }

    fn relational(&mut self, mut lhs: Expr) -> Result<Expr> {
        lhs = self.additive(lhs)?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Lt => "<",
                TokenKind::Gt => ">",
                TokenKind::Le => "<=",
                TokenKind::Ge => ">=",
                _ => break,
            };
            self.advance();
            let rhs = self.primary_chain()?;
            let rhs = self.additive(rhs)?;
            lhs = Expr::call(vec![Expr::sym(op), lhs, rhs]);
        }
        Ok(lhs)
    }

    fn additive(&mut self, mut lhs: Expr) -> Result<Expr> {
        lhs = self.multiplicative(lhs)?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => "+",
                TokenKind::Minus => "-",
                _ => break,
            };
            self.advance();
            let rhs = self.primary_chain()?;
            let rhs = self.multiplicative(rhs)?;
            lhs = Expr::call(vec![Expr::sym(op), lhs, rhs]);
        }
        Ok(lhs)
    }

    fn multiplicative(&mut self, lhs: Expr) -> Result<Expr> {
        let mut lhs = lhs;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => "*",
                TokenKind::Slash => "/",
                _ => break,
            };
            self.advance();
            let rhs = self.primary_chain()?;
            lhs = Expr::call(vec![Expr::sym(op), lhs, rhs]);
        }
        Ok(lhs)
    }

    /// Entry point for the precedence tower: prefix `-`/`!`, binding tighter
    /// than any binary operator but looser than a trailing `(args)` call
    /// suffix, so `-f(1)` parses as `-(f(1))` rather than `(-f)(1)`.
    fn primary_chain(&mut self) -> Result<Expr> {
        self.unary()
    }

    fn unary(&mut self) -> Result<Expr> {
        match self.peek_kind().clone() {
            TokenKind::Minus => {
                self.advance();
                let operand = self.unary()?;
                Ok(Expr::call(vec![Expr::sym("-"), Expr::Num(0.0), operand]))
            }
            TokenKind::Bang => {
                self.advance();
                let operand = self.unary()?;
                Ok(Expr::call(vec![Expr::sym("!"), operand]))
            }
            _ => self.call_suffix(),
        }
    }

    /// A primary, followed by any number of `(args)` call suffixes.
    fn call_suffix(&mut self) -> Result<Expr> {
        let mut e = self.primary()?;
        while matches!(self.peek_kind(), TokenKind::LParen) {
            let args = self.paren_arg_list()?;
            let mut call_args = vec![e];
            call_args.extend(args);
            e = Expr::call(call_args);
        }
        Ok(e)
    }

    fn paren_arg_list(&mut self) -> Result<Vec<Expr>> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if !matches!(self.peek_kind(), TokenKind::RParen) {
            args.push(self.expr()?);
            while matches!(self.peek_kind(), TokenKind::Comma) {
                self.advance();
                args.push(self.expr()?);
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    /// `[e0, e1, ...]`, an unrecognized-head node (`Tag::Other("list")`),
    /// the surface form that exercises the evaluator's "map evaluation over
    /// args" fallback and produces a first-class `Value::List`.
    fn list_literal(&mut self) -> Result<Expr> {
        self.expect(&TokenKind::LBracket)?;
        let mut items = Vec::new();
        if !matches!(self.peek_kind(), TokenKind::RBracket) {
            items.push(self.expr()?);
            while matches!(self.peek_kind(), TokenKind::Comma) {
                self.advance();
                items.push(self.expr()?);
            }
        }
        self.expect(&TokenKind::RBracket)?;
        Ok(Expr::node(Tag::Other("list".to_string()), items))
    }

    fn block(&mut self) -> Result<Expr> {
        self.expect(&TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !matches!(self.peek_kind(), TokenKind::RBrace) {
            statements.push(self.statement()?);
        }
        self.expect(&TokenKind::RBrace)?;
        Ok(Expr::node(Tag::Block, statements))
    }

    fn primary(&mut self) -> Result<Expr> {
        match self.peek_kind().clone() {
            TokenKind::Num(n) => {
                self.advance();
                Ok(Expr::Num(n))
            }
            TokenKind::Str(s) => {
                self.advance();
                Ok(Expr::Str(s))
            }
            TokenKind::KwNil => {
                self.advance();
                Ok(Expr::Nil)
            }
            TokenKind::Dollar => {
                self.advance();
                let sym = self.eat_ident()?;
                Ok(Expr::node(Tag::Interpolate, vec![Expr::sym(sym)]))
            }
            TokenKind::QuoteOpen => {
                self.advance();
                let inner = self.expr()?;
                self.expect(&TokenKind::RParen)?;
                Ok(Expr::node(Tag::Quote, vec![inner]))
            }
            TokenKind::KwQuote => {
                self.advance();
                let block = self.block()?;
                Ok(Expr::node(Tag::Quote, block.args().to_vec()))
            }
            TokenKind::LBrace => self.block(),
            TokenKind::LBracket => self.list_literal(),
            TokenKind::KwGlobal => {
                self.advance();
                let block = self.block()?;
                Ok(Expr::node(Tag::Global, block.args().to_vec()))
            }
            TokenKind::KwLet => {
                self.advance();
                let bindings = self.block()?;
                let body = self.block()?;
                Ok(Expr::node(Tag::Let, vec![bindings, body]))
            }
            TokenKind::KwIf => {
                self.advance();
                self.if_tail(Tag::If)
            }
            TokenKind::LParen => self.paren_or_lambda(),
            TokenKind::Ident(name) => {
                self.advance();
                Ok(Expr::sym(name))
            }
            _ => Err(self.syntax_err("expected an expression")),
        }
    }

    fn if_tail(&mut self, tag: Tag) -> Result<Expr> {
        self.expect(&TokenKind::LParen)?;
        let cond = self.expr()?;
        self.expect(&TokenKind::RParen)?;
        let then_block = self.block()?;

        let mut args = vec![cond, then_block];

        match self.peek_kind() {
            TokenKind::KwElseif => {
                self.advance();
                args.push(self.if_tail(Tag::Elseif)?);
            }
            TokenKind::KwElse => {
                self.advance();
                args.push(self.block()?);
            }
            _ => {}
        }

        Ok(Expr::node(tag, args))
    }

    /// Disambiguates a parenthesized group `(expr)`, a lambda signature
    /// `(p0, p1) -> body`, and a call whose callee is itself a parenthesized
    /// expression.
    fn paren_or_lambda(&mut self) -> Result<Expr> {
        let start = self.pos;

        // try lambda signature: ( ident, ident, ... ) ->
        if let Some(params) = self.try_param_list() {
            if matches!(self.peek_kind(), TokenKind::Arrow) {
                self.advance();
                let body = self.lambda_body()?;
                let mut sig_args = Vec::with_capacity(params.len());
                sig_args.extend(params.into_iter().map(Expr::sym));
                let signature = Expr::call(sig_args);
                return Ok(Expr::node(Tag::Lambda, vec![signature, body]));
            }
        }

        self.pos = start;
        self.expect(&TokenKind::LParen)?;
        let inner = self.expr()?;
        self.expect(&TokenKind::RParen)?;
        Ok(inner)
    }

    fn lambda_body(&mut self) -> Result<Expr> {
        if matches!(self.peek_kind(), TokenKind::LBrace) {
            self.block()
        } else {
            self.expr()
        }
    }

    /// Speculatively parse `(ident, ident, ...)`. Restores position and
    /// returns `None` if the token stream doesn't match that shape.
    fn try_param_list(&mut self) -> Option<Vec<String>> {
        let start = self.pos;
        if !matches!(self.peek_kind(), TokenKind::LParen) {
            return None;
        }
        self.advance();

        let mut params = Vec::new();
        if matches!(self.peek_kind(), TokenKind::RParen) {
            self.advance();
            return Some(params);
        }

        loop {
            match self.peek_kind().clone() {
                TokenKind::Ident(s) => {
                    self.advance();
                    params.push(s);
                }
                _ => {
                    self.pos = start;
                    return None;
                }
            }

            match self.peek_kind() {
                TokenKind::Comma => {
                    self.advance();
                }
                TokenKind::RParen => {
                    self.advance();
                    break;
                }
                _ => {
                    self.pos = start;
                    return None;
                }
            }
        }

        Some(params)
    }
}
