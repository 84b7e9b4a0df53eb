// Single-pass read head over a token sequence with one-step push-back.
use crate::json::token::Token;

/// Strictly forward cursor. The only backward motion is `step_back`, used to
/// peek whether the next token closes an empty container before committing to
/// the element loop.
#[derive(Debug)]
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Returns the next token, or `None` once the sequence is exhausted.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Steps the cursor back by one position, so the last token returned by
    /// `advance` is delivered again.
    pub fn step_back(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}
