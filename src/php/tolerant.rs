//! Tolerant lexer and parser
//!
//! The tolerant pipeline is the one under test. Unlike the reference tokenizer it keeps no text
//! in its tokens, only offsets, and it folds whitespace and comments into the leading trivia of
//! the next token. Every byte of the input belongs to exactly one token's full range:
//!
//!     <?php\n  $a = 1;
//!     |start tag|  $a| =| 1|;|EOF
//!
//! The parser never rejects input. Where the grammar expects a token that is not there it
//! inserts a zero-length missing token, and tokens it cannot place are kept as skipped tokens,
//! so the tree always spans the whole file.
//!
//! Both halves sit behind traits ([TolerantLexer], [SyntaxParser]) so the inspector and the
//! fixture harness can be driven by stand-ins in tests.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod token;

use serde::Serialize;

pub use ast::{Child, Node};
pub use lexer::TolerantScanner;
pub use parser::Parser;
pub use token::{Token, TokenError, TokenKind};

/// Produces the tolerant token stream for a file, ending with `EndOfFileToken`
pub trait TolerantLexer {
    fn get_tokens(&self, source: &str) -> Vec<Token>;
}

/// Produces a serializable syntax tree for a file
pub trait SyntaxParser {
    type Tree: Serialize;

    fn parse_source_file(&self, source: &str) -> Self::Tree;
}
