//! Reference tokenizer
//!
//! The reference tokenizer answers the question "what does PHP's own `token_get_all` say about
//! this file?". Its output is a flat list of [RawToken]s whose texts, concatenated, give back the
//! source unchanged. Most tokens carry a [TokenKind]; single-character punctuation (`;`, `(`,
//! `=` and friends) comes back bare, exactly as `token_get_all` returns plain strings for them.
//!
//! Callers talk to the tokenizer through the [ReferenceTokenizer] trait so the inspector can be
//! pointed at a different implementation in tests. [PhpTokenizer] is the built-in one, driven by
//! logos, see [base_tokenization].

pub mod base_tokenization;
pub mod kinds;

use std::borrow::Cow;

pub use kinds::TokenKind;

/// One token as the reference tokenizer reports it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawToken {
    Typed { kind: TokenKind, text: String },
    Bare(String),
}

impl RawToken {
    pub fn typed(kind: TokenKind, text: impl Into<String>) -> Self {
        RawToken::Typed {
            kind,
            text: text.into(),
        }
    }

    pub fn bare(text: impl Into<String>) -> Self {
        RawToken::Bare(text.into())
    }

    pub fn text(&self) -> &str {
        match self {
            RawToken::Typed { text, .. } => text,
            RawToken::Bare(text) => text,
        }
    }

    pub fn kind(&self) -> Option<TokenKind> {
        match self {
            RawToken::Typed { kind, .. } => Some(*kind),
            RawToken::Bare(_) => None,
        }
    }
}

/// Source of raw token streams for the `tokens` mode
pub trait ReferenceTokenizer {
    fn tokenize(&self, source: &str) -> Vec<RawToken>;

    /// Display name for a kind
    fn kind_name(&self, kind: TokenKind) -> Cow<'static, str> {
        Cow::Borrowed(kind.name())
    }
}

/// Built-in reference tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct PhpTokenizer;

impl PhpTokenizer {
    pub fn new() -> Self {
        PhpTokenizer
    }
}

impl ReferenceTokenizer for PhpTokenizer {
    fn tokenize(&self, source: &str) -> Vec<RawToken> {
        base_tokenization::tokenize(source)
    }
}
