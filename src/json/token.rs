// Positioned tokens, the token buffer, and span-based literal extraction.
use crate::json::cursor::TokenCursor;
use crate::json::seq::Seq;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    Null,
    Str,
    Integer,
    Double,
    Boolean,
    CurlyOpen,
    CurlyClose,
    BracketOpen,
    BracketClose,
    Comma,
    Colon,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Null => "null",
            TokenKind::Str => "string",
            TokenKind::Integer => "integer",
            TokenKind::Double => "double",
            TokenKind::Boolean => "boolean",
            TokenKind::CurlyOpen => "curly-open",
            TokenKind::CurlyClose => "curly-close",
            TokenKind::BracketOpen => "bracket-open",
            TokenKind::BracketClose => "bracket-close",
            TokenKind::Comma => "comma",
            TokenKind::Colon => "colon",
        }
    }
}

/// A classified slice of the input. `start`/`end` are byte offsets into the
/// original source; punctuation has `start == end`. `line` and `column` are
/// 1-based, with the column resetting on each line break.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    /// The literal text this token denotes, copied out of `source`. String
    /// spans exclude the delimiting quotes; every other kind is verbatim.
    /// Pure read: calling it repeatedly yields the same fresh buffer.
    pub fn literal(&self, source: &[u8]) -> String {
        let (start, end) = match self.kind {
            TokenKind::Str => (self.start + 1, self.end),
            _ => (self.start, self.end),
        };
        let bytes = source.get(start..end).unwrap_or_default();
        String::from_utf8_lossy(bytes).into_owned()
    }
}

/// Flat sequence of tokens produced by one tokenizing pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenList {
    items: Seq<Token>,
}

impl TokenList {
    pub fn new() -> Self {
        Self { items: Seq::new() }
    }

    pub fn push(&mut self, token: Token) {
        self.items.push(token);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Token> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.items.iter()
    }

    pub fn cursor(&self) -> TokenCursor<'_> {
        TokenCursor::new(self.items.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::{Token, TokenKind, TokenList};

    fn token(kind: TokenKind, start: usize, end: usize) -> Token {
        Token {
            kind,
            start,
            end,
            line: 1,
            column: 1,
        }
    }

    #[test]
    fn string_literal_excludes_quotes() {
        let source = b"{\"name\":true}";
        let tok = token(TokenKind::Str, 1, 6);
        assert_eq!(tok.literal(source), "name");
    }

    #[test]
    fn non_string_literal_is_verbatim() {
        let source = b"[-12.5]";
        let tok = token(TokenKind::Double, 1, 6);
        assert_eq!(tok.literal(source), "-12.5");
    }

    #[test]
    fn literal_extraction_is_repeatable() {
        let source = b"null";
        let tok = token(TokenKind::Null, 0, 4);
        assert_eq!(tok.literal(source), "null");
        assert_eq!(tok.literal(source), "null");
    }

    #[test]
    fn out_of_range_span_yields_empty_text() {
        let source = b"x";
        let tok = token(TokenKind::Integer, 5, 9);
        assert_eq!(tok.literal(source), "");
    }

    #[test]
    fn list_exposes_tokens_in_insertion_order() {
        let mut list = TokenList::new();
        list.push(token(TokenKind::CurlyOpen, 0, 0));
        list.push(token(TokenKind::CurlyClose, 1, 1));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0).unwrap().kind, TokenKind::CurlyOpen);
        assert_eq!(list.get(1).unwrap().kind, TokenKind::CurlyClose);
    }
}
