//! Error reporting shared by the scanner and the parser.
//!
//! Neither stage keeps an error flag of its own: every problem is handed to a
//! [`Reporter`] as soon as it is found, and the reporter decides what to do
//! with it and whether later stages should run.

use std::{fmt::Display, ops::Deref};

use cursor::Line;
use itertools::Itertools;

#[derive(thiserror::Error, Clone, Debug, PartialEq)]
#[error("[line {line}] Error{}: {message}", if at.is_empty() { "".to_string() } else { format!(" at {at}") })]
pub struct LoxError {
    pub line: Line,
    pub at: String,
    pub message: String,
}

impl LoxError {
    /// An error that is only tied to a line, as the scanner reports them.
    pub fn at_line(line: Line, message: impl ToString) -> Self {
        Self { line, at: "".to_string(), message: message.to_string() }
    }

    /// An error located at a token. `lexeme` is `None` for the end of input.
    pub fn at_token(line: Line, lexeme: Option<&str>, message: impl ToString) -> Self {
        Self {
            line,
            at: match lexeme {
                Some(lexeme) => format!("'{lexeme}'"),
                None => "end".to_string(),
            },
            message: message.to_string(),
        }
    }
}

/// Sink for errors found while scanning and parsing.
pub trait Reporter {
    fn report(&mut self, error: LoxError);

    fn had_error(&self) -> bool;
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, error: LoxError) {
        (**self).report(error)
    }

    fn had_error(&self) -> bool {
        (**self).had_error()
    }
}

/// Keeps every reported error in order.
#[derive(Debug, Default, PartialEq)]
pub struct ErrorLog(pub Vec<LoxError>);

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for ErrorLog {
    fn report(&mut self, error: LoxError) {
        log::debug!("Collected error: {error}");
        self.0.push(error)
    }

    fn had_error(&self) -> bool {
        !self.0.is_empty()
    }
}

impl Deref for ErrorLog {
    type Target = Vec<LoxError>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ErrorLog {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join("\n"))
    }
}

/// Prints errors to stderr as they come in.
#[derive(Debug, Default)]
pub struct StderrReporter {
    had_error: bool,
}

impl StderrReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget earlier errors, e.g. between two lines of a REPL session.
    pub fn reset(&mut self) {
        self.had_error = false;
    }
}

impl Reporter for StderrReporter {
    fn report(&mut self, error: LoxError) {
        eprintln!("{error}");
        self.had_error = true;
    }

    fn had_error(&self) -> bool {
        self.had_error
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn formatting() {
        assert_eq!(
            LoxError::at_line(Line(3), "Unclosed string.").to_string(),
            "[line 3] Error: Unclosed string."
        );
        assert_eq!(
            LoxError::at_token(Line(1), Some(")"), "Expect expression.").to_string(),
            "[line 1] Error at ')': Expect expression."
        );
        assert_eq!(
            LoxError::at_token(Line(2), None, "Expect ')' after expression.").to_string(),
            "[line 2] Error at end: Expect ')' after expression."
        );
    }

    #[test]
    fn log_keeps_order() {
        let mut log = ErrorLog::new();
        assert!(!log.had_error());

        log.report(LoxError::at_line(Line(1), "first"));
        log.report(LoxError::at_line(Line(2), "second"));

        assert!(log.had_error());
        assert_eq!(log.len(), 2);
        assert_eq!(log.to_string(), "[line 1] Error: first\n[line 2] Error: second");
    }

    #[test]
    fn reporting_through_mut_ref() {
        fn report_twice(mut reporter: impl Reporter) {
            reporter.report(LoxError::at_line(Line(1), "a"));
            reporter.report(LoxError::at_line(Line(1), "b"));
        }

        let mut log = ErrorLog::new();
        report_twice(&mut log);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn stderr_reporter_tracks_errors() {
        let mut reporter = StderrReporter::new();
        assert!(!reporter.had_error());
        reporter.report(LoxError::at_line(Line(1), "oops"));
        assert!(reporter.had_error());
        reporter.reset();
        assert!(!reporter.had_error());
    }
}
