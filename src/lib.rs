//! Purpose: Shared library crate behind the `rosterlite` CLI and tests.
//! Exports: `json` (tokenizer, parser, renderer) and `core` (roster storage,
//! import/export, errors).
//! Role: Internal library backing the binary; not yet a stable public SDK.
//! Invariants: Modules prefer explicit inputs/outputs over hidden state.
pub mod core;
pub mod json;
