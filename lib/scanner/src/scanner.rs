use cursor::{Cursor, Line};
use errors::{LoxError, Reporter};

pub mod token;
pub use token::{Literal, Token, TokenData, TokenType};
use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanErrorType {
    #[cfg_attr(not(feature = "strict"), error("Unexpected character '{0}' [ASCII: {}]", code_point(.0)))]
    #[cfg_attr(feature = "strict", error("Unexpected character."))]
    UnexpectedCharacter(char),
    #[error("Unclosed string.")]
    UnclosedString,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("{error}")]
pub struct ScanError {
    pub error: ScanErrorType,
    pub line: Line,
}

impl From<ScanError> for LoxError {
    fn from(e: ScanError) -> Self {
        LoxError::at_line(e.line, e.error)
    }
}

#[cfg(not(feature = "strict"))]
fn code_point(c: &char) -> u32 {
    u32::from(*c)
}

type Result<T> = std::result::Result<T, ScanError>;

/// Turns source text into tokens. Errors go to `reporter` and scanning carries on,
/// so the result always ends with exactly one `Eof` token.
pub fn scan<'a>(source: &'a str, reporter: &mut impl Reporter) -> Vec<Token<'a>> {
    Scanner::new(source).scan_tokens(reporter)
}

#[derive(Debug)]
pub struct Scanner<'a> {
    start: Cursor<'a>,
    cursor: Cursor<'a>,
    tokens: Vec<Token<'a>>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        let cursor = Cursor::new(source);
        Self { start: cursor.clone(), cursor, tokens: Vec::new() }
    }

    pub fn scan_tokens(mut self, reporter: &mut impl Reporter) -> Vec<Token<'a>> {
        loop {
            self.start = self.cursor.clone();
            let Some(c) = self.cursor.next() else { break };

            match self.scan_token(c) {
                Ok(Some(data)) => self.add_token(data),
                Ok(None) => (),
                Err(e) => {
                    log::trace!("Scan error on line {}: {}", e.line, e.error);
                    reporter.report(e.into());
                }
            }
        }

        self.tokens.push(Token::eof(self.cursor.line()));
        log::debug!("Scanned {} tokens", self.tokens.len());
        self.tokens
    }

    fn add_token(&mut self, data: TokenData<'a>) {
        let token = Token::new(data, self.lexeme(), self.start.line());
        log::trace!("{:?} {:?} (line {})", token.ty(), token.lexeme, token.line);
        self.tokens.push(token);
    }

    fn lexeme(&self) -> &'a str {
        self.start.slice_until(&self.cursor)
    }

    fn error(&self, error: ScanErrorType) -> ScanError {
        ScanError { error, line: self.cursor.line() }
    }

    /// `Ok(None)` for input that produces no token (whitespace and comments).
    fn scan_token(&mut self, c: char) -> Result<Option<TokenData<'a>>> {
        let data = match c {
            '(' => LeftParen,
            ')' => RightParen,
            '{' => LeftBrace,
            '}' => RightBrace,
            ',' => Comma,
            '.' => Dot,
            '-' => Minus,
            '+' => Plus,
            ';' => Semicolon,
            '*' => Star,

            '!' => self.either('=', BangEqual, Bang),
            '=' => self.either('=', EqualEqual, Equal),
            '<' => self.either('=', LessEqual, Less),
            '>' => self.either('=', GreaterEqual, Greater),

            '/' => {
                if self.cursor.eat('/') {
                    // Comment, the newline is left for the next round so that it bumps the line
                    self.cursor.eat_while(|c| c != '\n');
                    return Ok(None);
                }
                Slash
            }

            ' ' | '\r' | '\t' | '\n' => return Ok(None),

            '"' => self.string()?,
            d if d.is_ascii_digit() => self.number(),
            a if is_alpha(a) => self.identifier(),

            c => return Err(self.error(ScanErrorType::UnexpectedCharacter(c))),
        };
        Ok(Some(data))
    }

    fn either(&mut self, next: char, matched: TokenData<'a>, single: TokenData<'a>) -> TokenData<'a> {
        if self.cursor.eat(next) {
            matched
        } else {
            single
        }
    }

    fn string(&mut self) -> Result<TokenData<'a>> {
        self.cursor.eat_while(|c| c != '"');
        if !self.cursor.eat('"') {
            return Err(self.error(ScanErrorType::UnclosedString));
        }

        let lexeme = self.lexeme();
        Ok(Str(&lexeme[1..lexeme.len() - 1]))
    }

    fn number(&mut self) -> TokenData<'a> {
        self.cursor.eat_while(|c| c.is_ascii_digit());

        // A trailing '.' without digits is not part of the number
        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.next();
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        Number(self.lexeme().parse().expect("digits with an optional fraction are a valid f64"))
    }

    fn identifier(&mut self) -> TokenData<'a> {
        self.cursor.eat_while(|c| is_alpha(c) || c.is_ascii_digit());
        TokenData::keyword(self.lexeme()).unwrap_or(Identifier)
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[cfg(test)]
mod tests {
    use errors::ErrorLog;
    use pretty_assertions::assert_eq;

    use super::*;

    fn tok(data: TokenData<'static>, lexeme: &'static str, line: usize) -> Token<'static> {
        Token::new(data, lexeme, Line(line))
    }

    fn eof(line: usize) -> Token<'static> {
        Token::eof(Line(line))
    }

    fn scan_ok(source: &str) -> Vec<Token> {
        let mut errors = ErrorLog::new();
        let tokens = scan(source, &mut errors);
        assert_eq!(errors, ErrorLog::new());
        tokens
    }

    #[test]
    fn string_literals() {
        assert_eq!(
            scan_ok("\"hello world\""),
            vec![tok(Str("hello world"), "\"hello world\"", 1), eof(1)]
        );

        let mut errors = ErrorLog::new();
        let tokens = scan("\"hello world", &mut errors);
        assert_eq!(tokens, vec![eof(1)]);
        assert_eq!(
            errors,
            ErrorLog(vec![LoxError::at_line(Line(1), ScanErrorType::UnclosedString)])
        );
    }

    #[test]
    fn multiline_string() {
        assert_eq!(scan_ok("\"ab\ncd\""), vec![tok(Str("ab\ncd"), "\"ab\ncd\"", 1), eof(2)]);
    }

    #[test]
    fn unclosed_string_reported_where_scanning_stopped() {
        let mut errors = ErrorLog::new();
        let tokens = scan("1 \"abc\ndef\n", &mut errors);
        assert_eq!(tokens, vec![tok(Number(1.0), "1", 1), eof(3)]);
        assert_eq!(errors.to_string(), "[line 3] Error: Unclosed string.");
    }

    #[test]
    fn two_char_tokens() {
        assert_eq!(
            scan_ok("! != = == < <= > >="),
            vec![
                tok(Bang, "!", 1),
                tok(BangEqual, "!=", 1),
                tok(Equal, "=", 1),
                tok(EqualEqual, "==", 1),
                tok(Less, "<", 1),
                tok(LessEqual, "<=", 1),
                tok(Greater, ">", 1),
                tok(GreaterEqual, ">=", 1),
                eof(1),
            ]
        );
    }

    #[test]
    fn single_char_tokens() {
        assert_eq!(
            scan_ok("=(){},.-+;*/!<>"),
            vec![
                tok(Equal, "=", 1),
                tok(LeftParen, "(", 1),
                tok(RightParen, ")", 1),
                tok(LeftBrace, "{", 1),
                tok(RightBrace, "}", 1),
                tok(Comma, ",", 1),
                tok(Dot, ".", 1),
                tok(Minus, "-", 1),
                tok(Plus, "+", 1),
                tok(Semicolon, ";", 1),
                tok(Star, "*", 1),
                tok(Slash, "/", 1),
                tok(Bang, "!", 1),
                tok(Less, "<", 1),
                tok(Greater, ">", 1),
                eof(1),
            ]
        );
    }

    #[test]
    fn lexemes_reconstruct_source() {
        let source = "( ) {}\t!= ==\r\n<=>= // trailing comment\n;*/";
        let tokens = scan_ok(source);
        let joined: String = tokens.iter().map(|t| t.lexeme).collect();
        assert_eq!(joined, "(){}!===<=>=;*/");
        assert_eq!(tokens.len() - 1, 11);
        assert_eq!(tokens.last().unwrap().line, Line(3));
    }

    #[test]
    fn comments() {
        assert_eq!(
            scan_ok("a // comment\nb"),
            vec![tok(Identifier, "a", 1), tok(Identifier, "b", 2), eof(2)]
        );
        assert_eq!(scan_ok("// only a comment"), vec![eof(1)]);
    }

    #[test]
    fn numbers() {
        assert_eq!(scan_ok("123.45"), vec![tok(Number(123.45), "123.45", 1), eof(1)]);
        assert_eq!(scan_ok("007"), vec![tok(Number(7.0), "007", 1), eof(1)]);

        // Too large for an f64, but still not an error
        let huge = "9".repeat(400);
        let tokens = scan_ok(&huge);
        assert_eq!(tokens[0].data, Number(f64::INFINITY));
        assert_eq!(tokens[0].lexeme, huge);
    }

    #[test]
    fn trailing_dot_is_not_part_of_number() {
        assert_eq!(scan_ok("5."), vec![tok(Number(5.0), "5", 1), tok(Dot, ".", 1), eof(1)]);
        assert_eq!(
            scan_ok("1.2.3"),
            vec![tok(Number(1.2), "1.2", 1), tok(Dot, ".", 1), tok(Number(3.0), "3", 1), eof(1)]
        );
    }

    #[test]
    fn identifiers_and_keywords() {
        assert_eq!(scan_ok("classify"), vec![tok(Identifier, "classify", 1), eof(1)]);
        assert_eq!(
            scan_ok("class _x1 nil or"),
            vec![
                tok(Class, "class", 1),
                tok(Identifier, "_x1", 1),
                tok(Nil, "nil", 1),
                tok(Or, "or", 1),
                eof(1)
            ]
        );
    }

    #[test]
    fn unexpected_characters_are_skipped() {
        let mut errors = ErrorLog::new();
        let tokens = scan("1 @\n# 2", &mut errors);
        assert_eq!(tokens, vec![tok(Number(1.0), "1", 1), tok(Number(2.0), "2", 2), eof(2)]);
        assert_eq!(
            errors,
            ErrorLog(vec![
                LoxError::at_line(Line(1), ScanErrorType::UnexpectedCharacter('@')),
                LoxError::at_line(Line(2), ScanErrorType::UnexpectedCharacter('#')),
            ])
        );
    }

    #[cfg(not(feature = "strict"))]
    #[test]
    fn unexpected_character_message() {
        assert_eq!(
            ScanErrorType::UnexpectedCharacter('@').to_string(),
            "Unexpected character '@' [ASCII: 64]"
        );
    }

    #[test]
    fn empty_source() {
        assert_eq!(scan_ok(""), vec![eof(1)]);
        assert_eq!(scan_ok("\n\n"), vec![eof(3)]);
    }
}
