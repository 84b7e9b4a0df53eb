//! Purpose: Recursive-descent value tree builder over the token cursor.
//! Exports: `parse`.
//! Role: Second stage of the import pipeline; turns tokens into a `JsonNode` tree.
//! Invariants: First error wins; every recursive step propagates `Result` and
//! no further work happens after a failure.
//! Invariants: The cursor moves strictly forward except the single-step
//! push-back used to detect empty containers.
//! Invariants: Numeric conversion is strict; trailing garbage in a span is an
//! error, never a truncation.
use crate::json::cursor::TokenCursor;
use crate::json::error::{ParseError, ParseErrorKind};
use crate::json::token::{Token, TokenKind, TokenList};
use crate::json::value::{JsonNode, JsonValue};

/// Builds a value tree from a tokenized input. `source` is the original byte
/// stream the tokens were scanned from; leaf literals are materialized from
/// their spans. Grammar:
///
/// ```text
/// value  := object | array | string | integer | double | boolean | null
/// object := '{' '}' | '{' member (',' member)* '}'
/// member := string ':' value
/// array  := '[' ']' | '[' value (',' value)* ']'
/// ```
pub fn parse(tokens: &TokenList, source: &[u8]) -> Result<JsonNode, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::new(ParseErrorKind::NoTokenFound, None));
    }
    let mut builder = TreeBuilder {
        cursor: tokens.cursor(),
        source,
    };
    builder.parse_value()
}

struct TreeBuilder<'a> {
    cursor: TokenCursor<'a>,
    source: &'a [u8],
}

impl<'a> TreeBuilder<'a> {
    fn parse_value(&mut self) -> Result<JsonNode, ParseError> {
        let token = self
            .cursor
            .advance()
            .ok_or(ParseError::new(ParseErrorKind::NoTokenFound, None))?;
        match token.kind {
            TokenKind::CurlyOpen => self.parse_object(),
            TokenKind::BracketOpen => self.parse_array(),
            TokenKind::Str => Ok(JsonNode::new(JsonValue::Str(token.literal(self.source)))),
            TokenKind::Integer => self.parse_integer(token),
            TokenKind::Double => self.parse_double(token),
            TokenKind::Boolean => Ok(self.parse_boolean(token)),
            TokenKind::Null => Ok(JsonNode::new(JsonValue::Null)),
            _ => Err(ParseError::new(
                ParseErrorKind::UnexpectedToken,
                Some(*token),
            )),
        }
    }

    fn parse_object(&mut self) -> Result<JsonNode, ParseError> {
        let mut node = JsonNode::object();

        let token = self.expect_any(ParseErrorKind::ExpectedEndOfObjectBrace)?;
        if token.kind == TokenKind::CurlyClose {
            return Ok(node);
        }
        self.cursor.step_back();

        loop {
            let key_token = self.expect_any(ParseErrorKind::ExpectedObjectKey)?;
            if key_token.kind != TokenKind::Str {
                return Err(ParseError::new(
                    ParseErrorKind::ExpectedObjectKey,
                    Some(*key_token),
                ));
            }
            let key = key_token.literal(self.source);

            let colon = self.expect_any(ParseErrorKind::ExpectedColon)?;
            if colon.kind != TokenKind::Colon {
                return Err(ParseError::new(ParseErrorKind::ExpectedColon, Some(*colon)));
            }

            let mut value = self.parse_value()?;
            value.key = Some(key);
            node.attach(value);

            let token = self.expect_any(ParseErrorKind::ExpectedEndOfObjectBrace)?;
            match token.kind {
                TokenKind::CurlyClose => return Ok(node),
                TokenKind::Comma => {}
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedComma,
                        Some(*token),
                    ))
                }
            }
        }
    }

    fn parse_array(&mut self) -> Result<JsonNode, ParseError> {
        let mut node = JsonNode::array();

        let token = self.expect_any(ParseErrorKind::ExpectedEndOfArrayBrace)?;
        if token.kind == TokenKind::BracketClose {
            return Ok(node);
        }
        self.cursor.step_back();

        loop {
            let element = self.parse_value()?;
            node.attach(element);

            let token = self.expect_any(ParseErrorKind::ExpectedEndOfArrayBrace)?;
            match token.kind {
                TokenKind::BracketClose => return Ok(node),
                TokenKind::Comma => {}
                _ => {
                    return Err(ParseError::new(
                        ParseErrorKind::ExpectedComma,
                        Some(*token),
                    ))
                }
            }
        }
    }

    fn parse_integer(&self, token: &Token) -> Result<JsonNode, ParseError> {
        let text = token.literal(self.source);
        let value = text.parse::<i64>().map_err(|_| {
            ParseError::new(ParseErrorKind::InvalidIntegerLiteral, Some(*token))
        })?;
        Ok(JsonNode::new(JsonValue::Integer(value)))
    }

    fn parse_double(&self, token: &Token) -> Result<JsonNode, ParseError> {
        let text = token.literal(self.source);
        let value = text.parse::<f64>().map_err(|_| {
            ParseError::new(ParseErrorKind::InvalidDoubleLiteral, Some(*token))
        })?;
        Ok(JsonNode::new(JsonValue::Double(value)))
    }

    // The literal was validated lexically; the first byte settles the value.
    fn parse_boolean(&self, token: &Token) -> JsonNode {
        let truthy = self.source.get(token.start) == Some(&b't');
        JsonNode::new(JsonValue::Boolean(truthy))
    }

    fn expect_any(&mut self, missing: ParseErrorKind) -> Result<&'a Token, ParseError> {
        self.cursor
            .advance()
            .ok_or(ParseError::new(missing, None))
    }
}
