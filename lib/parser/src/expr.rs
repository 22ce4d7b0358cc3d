use std::fmt::Display;

use scanner::{Literal, Token};

use crate::AstPrinter;

#[derive(Debug, Clone, PartialEq)]
pub enum Expr<'a> {
    Binary { left: Box<Expr<'a>>, operator: Token<'a>, right: Box<Expr<'a>> },
    Grouping { expression: Box<Expr<'a>> },
    Unary { operator: Token<'a>, right: Box<Expr<'a>> },
    Literal { value: LiteralValue<'a> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
    Number(f64),
    Str(&'a str),
    Boolean(bool),
    Nil,
}

impl<'a> From<Literal<'a>> for LiteralValue<'a> {
    fn from(literal: Literal<'a>) -> Self {
        match literal {
            Literal::Number(n) => LiteralValue::Number(n),
            Literal::Str(s) => LiteralValue::Str(s),
        }
    }
}

/// One method per [`Expr`] variant, see [`Expr::accept`].
pub trait Visitor<'a, R> {
    fn visit_binary(&mut self, left: &Expr<'a>, operator: &Token<'a>, right: &Expr<'a>) -> R;
    fn visit_grouping(&mut self, expression: &Expr<'a>) -> R;
    fn visit_unary(&mut self, operator: &Token<'a>, right: &Expr<'a>) -> R;
    fn visit_literal(&mut self, value: &LiteralValue<'a>) -> R;
}

impl<'a> Expr<'a> {
    pub fn binary(left: Expr<'a>, operator: Token<'a>, right: Expr<'a>) -> Self {
        Expr::Binary { left: Box::new(left), operator, right: Box::new(right) }
    }

    pub fn grouping(expression: Expr<'a>) -> Self {
        Expr::Grouping { expression: Box::new(expression) }
    }

    pub fn unary(operator: Token<'a>, right: Expr<'a>) -> Self {
        Expr::Unary { operator, right: Box::new(right) }
    }

    pub fn literal(value: LiteralValue<'a>) -> Self {
        Expr::Literal { value }
    }

    pub fn accept<R>(&self, visitor: &mut impl Visitor<'a, R>) -> R {
        match self {
            Expr::Binary { left, operator, right } => visitor.visit_binary(left, operator, right),
            Expr::Grouping { expression } => visitor.visit_grouping(expression),
            Expr::Unary { operator, right } => visitor.visit_unary(operator, right),
            Expr::Literal { value } => visitor.visit_literal(value),
        }
    }
}

impl Display for Expr<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", AstPrinter.print(self))
    }
}
