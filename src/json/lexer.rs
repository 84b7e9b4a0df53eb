//! Purpose: Scan raw input bytes into a flat, positioned token sequence.
//! Exports: `tokenize`.
//! Role: First stage of the import pipeline; the parser consumes its output.
//! Invariants: The whole input is consumed up front; tokenizing stops at the
//! first lexical error and the tokens accumulated so far are still returned.
//! Invariants: Strings have no escape handling; an embedded `\"` closes the
//! string early. Numbers accept stray extra dots; rejection is deferred to
//! the parser's strict conversion step.
use crate::json::error::{LexError, LexErrorKind};
use crate::json::token::{Token, TokenKind, TokenList};

/// Tokenizes `input` from the start. Returns every token recognized before
/// the first lexical error, plus the error itself when one was hit. A
/// completely empty input reports `empty input` with zero tokens.
pub fn tokenize(input: &[u8]) -> (TokenList, Option<LexError>) {
    let mut tokens = TokenList::new();
    let mut scanner = Scanner::new(input);
    let error = scanner.run(&mut tokens);
    (tokens, error)
}

struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
    // Line breaks consumed so far and bytes since the last break. Both are
    // zero-based here; token positions are reported 1-based.
    lines: usize,
    col: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a [u8]) -> Self {
        Self {
            input,
            pos: 0,
            lines: 0,
            col: 0,
        }
    }

    fn run(&mut self, tokens: &mut TokenList) -> Option<LexError> {
        while let Some(byte) = self.next_byte() {
            if byte.is_ascii_whitespace() {
                continue;
            }

            let start = self.pos - 1;
            let line = self.lines + 1;
            let column = self.col;

            let scanned = match byte {
                b'{' => Ok((TokenKind::CurlyOpen, start)),
                b'}' => Ok((TokenKind::CurlyClose, start)),
                b'[' => Ok((TokenKind::BracketOpen, start)),
                b']' => Ok((TokenKind::BracketClose, start)),
                b',' => Ok((TokenKind::Comma, start)),
                b':' => Ok((TokenKind::Colon, start)),
                b'"' => self.scan_string(),
                b'-' | b'0'..=b'9' => self.scan_number(),
                b't' => self.scan_keyword(b"rue", TokenKind::Boolean),
                b'f' => self.scan_keyword(b"alse", TokenKind::Boolean),
                b'n' => self.scan_keyword(b"ull", TokenKind::Null),
                _ => Err(LexErrorKind::UnexpectedCharacter),
            };

            match scanned {
                Ok((kind, end)) => tokens.push(Token {
                    kind,
                    start,
                    end,
                    line,
                    column,
                }),
                Err(kind) => return Some(LexError::new(kind, line, column)),
            }
        }

        if self.lines == 0 && self.col == 0 {
            return Some(LexError::new(LexErrorKind::EmptyInput, 0, 0));
        }
        None
    }

    /// Reads one byte, folding `\r\n` into a single line break and resetting
    /// the column counter on any break.
    fn next_byte(&mut self) -> Option<u8> {
        let byte = *self.input.get(self.pos)?;
        self.pos += 1;
        self.col += 1;
        if byte == b'\n' || byte == b'\r' {
            self.lines += 1;
            self.col = 0;
            if byte == b'\r' && self.input.get(self.pos) == Some(&b'\n') {
                self.pos += 1;
            }
        }
        Some(byte)
    }

    /// Reads one byte without line-break accounting. Token scanners use this;
    /// a break inside a string advances the column only, as the original
    /// positions are byte-based within the current token.
    fn take_byte(&mut self) -> Option<u8> {
        let byte = *self.input.get(self.pos)?;
        self.pos += 1;
        self.col += 1;
        Some(byte)
    }

    fn scan_string(&mut self) -> Result<(TokenKind, usize), LexErrorKind> {
        loop {
            match self.take_byte() {
                Some(b'"') => return Ok((TokenKind::Str, self.pos - 1)),
                Some(_) => {}
                None => return Err(LexErrorKind::UnterminatedString),
            }
        }
    }

    fn scan_number(&mut self) -> Result<(TokenKind, usize), LexErrorKind> {
        let mut is_double = false;
        loop {
            match self.input.get(self.pos).copied() {
                Some(b'.') => {
                    is_double = true;
                    self.pos += 1;
                    self.col += 1;
                }
                Some(byte) if byte.is_ascii_digit() => {
                    self.pos += 1;
                    self.col += 1;
                }
                Some(_) => break,
                // A number may not end the input; something must follow it.
                None => return Err(LexErrorKind::UnexpectedEndOfInput),
            }
        }
        let kind = if is_double {
            TokenKind::Double
        } else {
            TokenKind::Integer
        };
        Ok((kind, self.pos))
    }

    fn scan_keyword(
        &mut self,
        rest: &'static [u8],
        kind: TokenKind,
    ) -> Result<(TokenKind, usize), LexErrorKind> {
        let failure = match kind {
            TokenKind::Null => LexErrorKind::InvalidNullLiteral,
            _ => LexErrorKind::InvalidBooleanLiteral,
        };
        for &expected in rest {
            match self.take_byte() {
                Some(byte) if byte == expected => {}
                _ => return Err(failure),
            }
        }
        Ok((kind, self.pos))
    }
}
