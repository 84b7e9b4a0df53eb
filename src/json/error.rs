//! Purpose: Error taxonomies for the JSON core.
//! Exports: `LexError`, `LexErrorKind`, `ParseError`, `ParseErrorKind`, `JsonError`.
//! Role: Diagnostics surfaced by tokenizing and tree building.
//! Invariants: Lexical and structural errors are distinct types, never conflated.
//! Invariants: First error wins; a pass reports at most one diagnostic.
use std::error::Error as StdError;
use std::fmt;

use crate::json::token::Token;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LexErrorKind {
    EmptyInput,
    UnterminatedString,
    InvalidBooleanLiteral,
    InvalidNullLiteral,
    UnexpectedEndOfInput,
    UnexpectedCharacter,
}

impl LexErrorKind {
    fn message(self) -> &'static str {
        match self {
            LexErrorKind::EmptyInput => "empty input",
            LexErrorKind::UnterminatedString => "unterminated string",
            LexErrorKind::InvalidBooleanLiteral => "invalid boolean literal",
            LexErrorKind::InvalidNullLiteral => "invalid null literal",
            LexErrorKind::UnexpectedEndOfInput => "unexpected end of input",
            LexErrorKind::UnexpectedCharacter => "unexpected character",
        }
    }
}

/// A lexical failure with the 1-based line/column of the offending byte.
/// `EmptyInput` carries line 0, column 0.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
    pub column: usize,
}

impl LexError {
    pub fn new(kind: LexErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.kind.message(),
            self.line,
            self.column
        )
    }
}

impl StdError for LexError {}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseErrorKind {
    NoTokenFound,
    InvalidIntegerLiteral,
    InvalidDoubleLiteral,
    ExpectedObjectKey,
    ExpectedEndOfObjectBrace,
    ExpectedEndOfArrayBrace,
    ExpectedColon,
    ExpectedComma,
    UnexpectedToken,
}

impl ParseErrorKind {
    fn message(self) -> &'static str {
        match self {
            ParseErrorKind::NoTokenFound => "expected token but none found",
            ParseErrorKind::InvalidIntegerLiteral => "invalid integer literal",
            ParseErrorKind::InvalidDoubleLiteral => "invalid double literal",
            ParseErrorKind::ExpectedObjectKey => "expected object key",
            ParseErrorKind::ExpectedEndOfObjectBrace => "expected end-of-object brace",
            ParseErrorKind::ExpectedEndOfArrayBrace => "expected end-of-array brace",
            ParseErrorKind::ExpectedColon => "expected colon after object key",
            ParseErrorKind::ExpectedComma => "expected comma",
            ParseErrorKind::UnexpectedToken => "unexpected token",
        }
    }
}

/// A structural failure carrying the offending token when one was available.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub token: Option<Token>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, token: Option<Token>) -> Self {
        Self { kind, token }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.token {
            Some(token) => write!(
                f,
                "{} at line {}, column {}",
                self.kind.message(),
                token.line,
                token.column
            ),
            None => write!(f, "{} at end of input", self.kind.message()),
        }
    }
}

impl StdError for ParseError {}

/// Outcome of a whole tokenize-then-parse pass. The two taxonomies stay
/// separate; this only lets a caller bubble either one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum JsonError {
    Lex(LexError),
    Parse(ParseError),
}

impl fmt::Display for JsonError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JsonError::Lex(err) => write!(f, "{err}"),
            JsonError::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl StdError for JsonError {}

impl From<LexError> for JsonError {
    fn from(err: LexError) -> Self {
        JsonError::Lex(err)
    }
}

impl From<ParseError> for JsonError {
    fn from(err: ParseError) -> Self {
        JsonError::Parse(err)
    }
}
