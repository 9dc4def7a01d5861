//! Scanner for C-- source code tokenization.

use super::token::{lookup_keyword, Token, TokenKind};
use crate::diagnostics::DiagnosticReporter;
use crate::parser::Span;

/// Scanner that produces tokens from source code
pub struct Scanner<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_offset: usize,
    start_offset: usize,
    line: usize,
    column: usize,
    start_line: usize,
    start_column: usize,
    reporter: &'a mut DiagnosticReporter,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str, reporter: &'a mut DiagnosticReporter) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_offset: 0,
            start_offset: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
            reporter,
        }
    }

    /// Tokenize the entire source
    pub fn scan_tokens(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.scan_token();
            let is_eof = token.kind == TokenKind::Eof;

            if token.kind != TokenKind::Error {
                tokens.push(token);
            }

            if is_eof {
                break;
            }
        }

        tokens
    }

    /// Scan a single token
    fn scan_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();
        self.begin_token();

        match self.advance() {
            None => Token::eof(self.line, self.column),
            Some(c) => match c {
                '(' => self.make_token(TokenKind::LeftParen),
                ')' => self.make_token(TokenKind::RightParen),
                '{' => self.make_token(TokenKind::LeftBrace),
                '}' => self.make_token(TokenKind::RightBrace),
                ',' => self.make_token(TokenKind::Comma),
                ';' => self.make_token(TokenKind::Semicolon),
                '.' => self.make_token(TokenKind::Dot),
                '*' => self.make_token(TokenKind::Star),
                '/' => self.make_token(TokenKind::Slash),

                '+' => self.match_compound(&[('+', TokenKind::PlusPlus)], TokenKind::Plus),
                '-' => self.match_compound(&[('-', TokenKind::MinusMinus)], TokenKind::Minus),
                '!' => self.match_compound(&[('=', TokenKind::BangEqual)], TokenKind::Bang),
                '=' => self.match_compound(&[('=', TokenKind::EqualEqual)], TokenKind::Equal),

                '<' => self.match_compound(
                    &[('<', TokenKind::LessLess), ('=', TokenKind::LessEqual)],
                    TokenKind::Less,
                ),
                '>' => self.match_compound(
                    &[('>', TokenKind::GreaterGreater), ('=', TokenKind::GreaterEqual)],
                    TokenKind::Greater,
                ),

                '&' => {
                    if self.match_char('&') {
                        self.make_token(TokenKind::AmpersandAmpersand)
                    } else {
                        self.illegal_char('&')
                    }
                }
                '|' => {
                    if self.match_char('|') {
                        self.make_token(TokenKind::PipePipe)
                    } else {
                        self.illegal_char('|')
                    }
                }

                '"' => self.scan_string(),
                '0'..='9' => self.scan_number(),
                c if is_ident_start(c) => self.scan_identifier(),

                c => self.illegal_char(c),
            },
        }
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r' | '\n') => {
                    self.advance();
                }
                // Line comments begin with '//' or '#'
                Some('#') => {
                    while self.peek().map_or(false, |c| c != '\n') {
                        self.advance();
                    }
                }
                Some('/') if self.peek_next() == Some('/') => {
                    while self.peek().map_or(false, |c| c != '\n') {
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    /// Remember where the next token begins.
    fn begin_token(&mut self) {
        self.start_offset = self.current_offset;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    fn advance(&mut self) -> Option<char> {
        let (_, c) = self.chars.next()?;
        self.current_offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&mut self) -> Option<char> {
        let mut chars = self.chars.clone();
        chars.next();
        chars.peek().map(|(_, c)| *c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_compound(&mut self, options: &[(char, TokenKind)], default: TokenKind) -> Token {
        for (c, kind) in options {
            if self.match_char(*c) {
                return self.make_token(*kind);
            }
        }
        self.make_token(default)
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme = &self.source[self.start_offset..self.current_offset];
        Token::new(kind, lexeme, self.start_line, self.start_column)
    }

    fn token_span(&self) -> Span {
        Span::new(self.start_line, self.start_column)
    }

    fn illegal_char(&mut self, c: char) -> Token {
        let span = self.token_span();
        self.reporter
            .fatal(span, format!("ignoring illegal character: {}", c));
        Token::new(TokenKind::Error, c, self.start_line, self.start_column)
    }

    fn scan_identifier(&mut self) -> Token {
        while self.peek().map_or(false, is_ident_continue) {
            self.advance();
        }

        let lexeme = &self.source[self.start_offset..self.current_offset];
        let kind = lookup_keyword(lexeme).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    fn scan_number(&mut self) -> Token {
        while self.peek().map_or(false, |c| c.is_ascii_digit()) {
            self.advance();
        }
        self.make_token(TokenKind::IntLiteral)
    }

    /// Scan a string literal. The token keeps the surrounding quotes; the
    /// recognized escapes are \n \t \' \" \\ and \?.
    fn scan_string(&mut self) -> Token {
        let mut bad_escape = false;

        loop {
            match self.peek() {
                Some('"') => {
                    self.advance();
                    if bad_escape {
                        let span = self.token_span();
                        self.reporter
                            .fatal(span, "string literal with bad escaped character ignored");
                        return Token::new(
                            TokenKind::Error,
                            "",
                            self.start_line,
                            self.start_column,
                        );
                    }
                    return self.make_token(TokenKind::StringLiteral);
                }
                Some('\\') => {
                    self.advance();
                    match self.advance() {
                        Some('n' | 't' | '\'' | '"' | '\\' | '?') => {}
                        _ => bad_escape = true,
                    }
                }
                Some('\n') | None => {
                    let span = self.token_span();
                    let message = if bad_escape {
                        "unterminated string literal with bad escaped character ignored"
                    } else {
                        "unterminated string literal ignored"
                    };
                    self.reporter.fatal(span, message);
                    return Token::new(TokenKind::Error, "", self.start_line, self.start_column);
                }
                _ => {
                    self.advance();
                }
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c == '_' || unicode_xid::UnicodeXID::is_xid_start(c)
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || unicode_xid::UnicodeXID::is_xid_continue(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> (Vec<Token>, DiagnosticReporter) {
        let mut reporter = DiagnosticReporter::new();
        let tokens = Scanner::new(source, &mut reporter).scan_tokens();
        (tokens, reporter)
    }

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_and_identifiers() {
        let (tokens, reporter) = scan("int x; bool flag; struct Point p;");
        assert!(!reporter.has_errors());
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::Int,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Bool,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Struct,
                TokenKind::Identifier,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn compound_operators() {
        let (tokens, _) = scan("<< >> ++ -- == != <= >= && ||");
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::LessLess,
                TokenKind::GreaterGreater,
                TokenKind::PlusPlus,
                TokenKind::MinusMinus,
                TokenKind::EqualEqual,
                TokenKind::BangEqual,
                TokenKind::LessEqual,
                TokenKind::GreaterEqual,
                TokenKind::AmpersandAmpersand,
                TokenKind::PipePipe,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn line_and_column_tracking() {
        let (tokens, _) = scan("int x;\n  x = 3;\n");
        let x = &tokens[3];
        assert_eq!(x.kind, TokenKind::Identifier);
        assert_eq!((x.line, x.column), (2, 3));
    }

    #[test]
    fn comments_are_skipped() {
        let (tokens, reporter) = scan("// a comment\n# another\nint x;");
        assert!(!reporter.has_errors());
        assert_eq!(tokens[0].kind, TokenKind::Int);
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn unterminated_string_is_reported() {
        let (tokens, reporter) = scan("\"oops\nint x;");
        assert!(reporter.has_errors());
        assert_eq!(
            reporter.diagnostics()[0].message,
            "unterminated string literal ignored"
        );
        // scanning continues after the bad literal
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Int));
    }

    #[test]
    fn bad_escape_is_reported() {
        let (_, reporter) = scan("\"bad \\x escape\"");
        assert!(reporter.has_errors());
        assert_eq!(
            reporter.diagnostics()[0].message,
            "string literal with bad escaped character ignored"
        );
    }

    #[test]
    fn illegal_character_is_reported() {
        let (tokens, reporter) = scan("int $x;");
        assert!(reporter.has_errors());
        assert_eq!(
            reporter.diagnostics()[0].message,
            "ignoring illegal character: $"
        );
        assert!(tokens.iter().any(|t| t.kind == TokenKind::Identifier));
    }
}
