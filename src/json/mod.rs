//! Purpose: Self-contained JSON core: tokenizer, tree builder, renderer.
//! Exports: `tokenize`, `parse`, `parse_bytes`, token/tree types, error taxonomies.
//! Role: The only JSON reader in the crate; import files go through here.
//! Invariants: The dialect is a practical subset of JSON: no string escapes,
//! no exponents, at most one meaningful decimal point per number.
//! Invariants: Passes are single-threaded and fail-fast; the first lexical or
//! structural error ends the pass.
pub mod cursor;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod render;
pub mod seq;
pub mod token;
pub mod value;

pub use cursor::TokenCursor;
pub use error::{JsonError, LexError, LexErrorKind, ParseError, ParseErrorKind};
pub use lexer::tokenize;
pub use parser::parse;
pub use render::render;
pub use seq::{AllocError, Seq};
pub use token::{Token, TokenKind, TokenList};
pub use value::{JsonNode, JsonValue};

/// Tokenizes and parses `input` in one call, bubbling whichever taxonomy
/// failed first.
pub fn parse_bytes(input: &[u8]) -> Result<JsonNode, JsonError> {
    let (tokens, lex_error) = tokenize(input);
    if let Some(error) = lex_error {
        return Err(JsonError::Lex(error));
    }
    let root = parse(&tokens, input)?;
    Ok(root)
}
