use std::fmt::Display;

use crate::{AstPrinter, Expr};

// Not produced by the parser yet, only expressions are parsed for now.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt<'a> {
    Expression { expression: Expr<'a> },
    Print { expression: Expr<'a> },
}

pub trait StmtVisitor<'a, R> {
    fn visit_expression_stmt(&mut self, expression: &Expr<'a>) -> R;
    fn visit_print_stmt(&mut self, expression: &Expr<'a>) -> R;
}

impl<'a> Stmt<'a> {
    pub fn accept<R>(&self, visitor: &mut impl StmtVisitor<'a, R>) -> R {
        match self {
            Stmt::Expression { expression } => visitor.visit_expression_stmt(expression),
            Stmt::Print { expression } => visitor.visit_print_stmt(expression),
        }
    }
}

impl Display for Stmt<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", AstPrinter.print_stmt(self))
    }
}
