//! Recursive descent parser for lox expressions.
//!
//! ```text
//! expression  = equality
//! equality    = comparison ( ( "!=" | "==" ) comparison )*
//! comparison  = term ( ( "<" | "<=" | ">" | ">=" ) term )*
//! term        = factor ( ( "-" | "+" ) factor )*
//! factor      = unary ( ( "/" | "*" ) unary )*
//! unary       = ( "!" | "-" ) unary | primary
//! primary     = NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")"
//! ```

mod expr;
mod printer;
mod stmt;

pub use expr::{Expr, LiteralValue, Visitor};
pub use printer::AstPrinter;
pub use stmt::{Stmt, StmtVisitor};

use errors::{LoxError, Reporter};
use scanner::{Token, TokenType};

use TokenType::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct ParserError<'a> {
    pub error: ParserErrorType,
    pub token: Token<'a>,
}

impl<'a> ParserError<'a> {
    fn new(error: ParserErrorType, token: Token<'a>) -> Self {
        Self { error, token }
    }
}

impl<'a> From<ParserError<'a>> for LoxError {
    fn from(e: ParserError<'a>) -> Self {
        let at = match e.token.ty() {
            Eof => None,
            _ => Some(e.token.lexeme()),
        };
        LoxError::at_token(e.token.line(), at, e.error)
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum ParserErrorType {
    #[error("Expect expression.")]
    ExpectedExpression,
    #[error("Expect ')' after expression.")]
    ExpectedRightParen,
    #[error("Expression nesting too deep.")]
    TooDeeplyNested,
}

pub type Result<'a, T> = std::result::Result<T, ParserError<'a>>;

/// How many unary operators and parentheses may be nested inside each other.
/// Keeps the recursion well away from the end of the stack.
pub const MAX_NESTING: usize = 256;

/// Parses a single expression. A syntax error is reported once and yields `None`.
pub fn parse<'a>(tokens: &[Token<'a>], reporter: &mut impl Reporter) -> Option<Expr<'a>> {
    Parser::new(tokens).parse(reporter)
}

#[derive(Debug)]
pub struct Parser<'t, 'a> {
    tokens: &'t [Token<'a>],
    current: usize,
    depth: usize,
}

impl<'t, 'a> Parser<'t, 'a> {
    /// `tokens` must end with an `Eof` token, as returned by [`scanner::scan`].
    pub fn new(tokens: &'t [Token<'a>]) -> Self {
        assert!(
            matches!(tokens.last(), Some(t) if t.ty() == Eof),
            "token stream must be terminated by Eof"
        );
        Self { tokens, current: 0, depth: 0 }
    }

    pub fn parse(&mut self, reporter: &mut impl Reporter) -> Option<Expr<'a>> {
        match self.expression() {
            Ok(expr) => {
                log::debug!("Parsed {expr}");
                Some(expr)
            }
            Err(e) => {
                log::trace!("Hit error: {:?}", e);
                reporter.report(e.into());
                None
            }
        }
    }

    fn expression(&mut self) -> Result<'a, Expr<'a>> {
        self.equality()
    }

    fn equality(&mut self) -> Result<'a, Expr<'a>> {
        let mut expr = self.comparison()?;

        while let Some(operator) = self.match_any(&[BangEqual, EqualEqual]) {
            let right = self.comparison()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<'a, Expr<'a>> {
        let mut expr = self.term()?;

        while let Some(operator) = self.match_any(&[Greater, GreaterEqual, Less, LessEqual]) {
            let right = self.term()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn term(&mut self) -> Result<'a, Expr<'a>> {
        let mut expr = self.factor()?;

        while let Some(operator) = self.match_any(&[Minus, Plus]) {
            let right = self.factor()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn factor(&mut self) -> Result<'a, Expr<'a>> {
        let mut expr = self.unary()?;

        while let Some(operator) = self.match_any(&[Slash, Star]) {
            let right = self.unary()?;
            expr = Expr::binary(expr, operator, right);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<'a, Expr<'a>> {
        if let Some(operator) = self.match_any(&[Bang, Minus]) {
            let right = self.nested(Self::unary)?;
            return Ok(Expr::unary(operator, right));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<'a, Expr<'a>> {
        let token = self.peek().clone();

        let value = match token.ty() {
            False => LiteralValue::Boolean(false),
            True => LiteralValue::Boolean(true),
            Nil => LiteralValue::Nil,
            LeftParen => {
                self.advance();
                let expr = self.nested(Self::expression)?;
                self.consume(RightParen, ParserErrorType::ExpectedRightParen)?;
                return Ok(Expr::grouping(expr));
            }
            _ => match token.literal() {
                Some(literal) => literal.into(),
                None => return Err(ParserError::new(ParserErrorType::ExpectedExpression, token)),
            },
        };

        self.advance();
        Ok(Expr::literal(value))
    }

    /// Skips tokens until a statement boundary: just past a `;`, or in front of a
    /// keyword that starts a statement. Not needed while only expressions are parsed.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().ty() == Semicolon {
                return;
            }
            if self.peek().ty().starts_statement() {
                return;
            }
            log::trace!("Syncing... skipping {:?}", self.peek());
            self.advance();
        }
    }
}

// Helpers
impl<'t, 'a> Parser<'t, 'a> {
    /// Runs `production` one nesting level deeper. Fails at the token that was just
    /// consumed (the operator or `(`) once `MAX_NESTING` is exceeded.
    fn nested<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<'a, T>,
    ) -> Result<'a, T> {
        if self.depth >= MAX_NESTING {
            return Err(ParserError::new(
                ParserErrorType::TooDeeplyNested,
                self.previous().clone(),
            ));
        }

        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }

    fn peek(&self) -> &'t Token<'a> {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &'t Token<'a> {
        &self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().ty() == Eof
    }

    fn check(&self, ty: TokenType) -> bool {
        !self.is_at_end() && self.peek().ty() == ty
    }

    /// Never moves past `Eof`.
    fn advance(&mut self) -> Token<'a> {
        if !self.is_at_end() {
            self.current += 1;
            self.previous().clone()
        } else {
            self.peek().clone()
        }
    }

    fn match_any(&mut self, types: &[TokenType]) -> Option<Token<'a>> {
        types.iter().any(|ty| self.check(*ty)).then(|| self.advance())
    }

    fn consume(&mut self, ty: TokenType, error: ParserErrorType) -> Result<'a, Token<'a>> {
        if self.check(ty) {
            Ok(self.advance())
        } else {
            Err(ParserError::new(error, self.peek().clone()))
        }
    }
}
