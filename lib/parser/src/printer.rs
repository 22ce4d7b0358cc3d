use itertools::Itertools;
use scanner::Token;

use crate::{Expr, LiteralValue, Stmt, StmtVisitor, Visitor};

/// Renders a tree in prefix notation, e.g. `(* (- 123.0) (group 45.67))`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    pub fn print_stmt(&mut self, stmt: &Stmt) -> String {
        stmt.accept(self)
    }

    fn parenthesize<'a>(&mut self, name: &str, exprs: &[&Expr<'a>]) -> String {
        format!("({name} {})", exprs.iter().map(|e| self.print(e)).join(" "))
    }
}

impl<'a> Visitor<'a, String> for AstPrinter {
    fn visit_binary(&mut self, left: &Expr<'a>, operator: &Token<'a>, right: &Expr<'a>) -> String {
        self.parenthesize(operator.lexeme(), &[left, right])
    }

    fn visit_grouping(&mut self, expression: &Expr<'a>) -> String {
        self.parenthesize("group", &[expression])
    }

    fn visit_unary(&mut self, operator: &Token<'a>, right: &Expr<'a>) -> String {
        self.parenthesize(operator.lexeme(), &[right])
    }

    fn visit_literal(&mut self, value: &LiteralValue<'a>) -> String {
        match value {
            // Debug formatting keeps the fractional part: `1.0`, not `1`
            LiteralValue::Number(n) => format!("{n:?}"),
            LiteralValue::Str(s) => s.to_string(),
            LiteralValue::Boolean(b) => b.to_string(),
            LiteralValue::Nil => "nil".to_string(),
        }
    }
}

impl<'a> StmtVisitor<'a, String> for AstPrinter {
    fn visit_expression_stmt(&mut self, expression: &Expr<'a>) -> String {
        self.parenthesize(";", &[expression])
    }

    fn visit_print_stmt(&mut self, expression: &Expr<'a>) -> String {
        self.parenthesize("print", &[expression])
    }
}
