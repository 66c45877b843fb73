//! # phpcase
//!
//! Inspection and golden-fixture tooling for a PHP tokenizer/parser pair.
//!
//! The library wraps a reference tokenizer (`token_get_all` semantics) and a tolerant
//! lexer/parser, and renders their output as text dumps or JSON fixtures. See the
//! [php] module for the layout.

pub mod php;
