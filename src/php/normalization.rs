//! Newline normalization for reference token streams
//!
//! `token_get_all` folds line breaks into whatever token happens to contain them: the open tag
//! swallows one, whitespace runs span several lines, a heredoc body carries its own. That makes
//! raw dumps hard to diff line by line. Normalization re-segments the stream so every `\n` or
//! `\r\n` becomes a [Token::Newline] of its own, while the remaining pieces keep the kind of the
//! token they were cut from.
//!
//! Two kinds of token stay whole no matter what they contain:
//!
//!     T_CONSTANT_ENCAPSED_STRING     'multi
//!                                    line'
//!     anything starting with /*      /* block or
//!                                       doc comment */
//!
//! Splitting a string literal or a block comment would produce fragments that mean nothing on
//! their own.
//!
//! Normalization only moves boundaries. Concatenating the texts of the output gives the input
//! text back byte for byte, see [detokenize].

use crate::php::reference::{RawToken, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n|\n").unwrap());

/// A line terminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineBreak {
    Lf,
    CrLf,
}

impl LineBreak {
    pub fn as_str(self) -> &'static str {
        match self {
            LineBreak::Lf => "\n",
            LineBreak::CrLf => "\r\n",
        }
    }

    fn from_text(text: &str) -> Option<LineBreak> {
        match text {
            "\n" => Some(LineBreak::Lf),
            "\r\n" => Some(LineBreak::CrLf),
            _ => None,
        }
    }
}

/// A token after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Typed { kind: TokenKind, text: String },
    Bare { text: String },
    /// A line break isolated from the token it was cut out of
    Newline(LineBreak),
}

impl Token {
    pub fn text(&self) -> &str {
        match self {
            Token::Typed { text, .. } | Token::Bare { text } => text,
            Token::Newline(line_break) => line_break.as_str(),
        }
    }

    pub fn is_newline(&self) -> bool {
        matches!(self, Token::Newline(_))
    }

    /// Tokens that are never split
    fn is_atomic(&self) -> bool {
        match self {
            Token::Typed { kind, .. } if *kind == TokenKind::ConstantEncapsedString => true,
            Token::Newline(_) => true,
            other => other.text().starts_with("/*"),
        }
    }

    /// Same kind as `self`, different text
    fn with_text(&self, text: &str) -> Token {
        match self {
            Token::Typed { kind, .. } => Token::Typed {
                kind: *kind,
                text: text.to_string(),
            },
            _ => Token::Bare {
                text: text.to_string(),
            },
        }
    }
}

impl From<RawToken> for Token {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Typed { kind, text } => Token::Typed { kind, text },
            RawToken::Bare(text) => Token::Bare { text },
        }
    }
}

impl From<&RawToken> for Token {
    fn from(raw: &RawToken) -> Self {
        Token::from(raw.clone())
    }
}

/// Normalize a raw reference token stream
pub fn normalize(raw: &[RawToken]) -> Vec<Token> {
    let tokens: Vec<Token> = raw.iter().map(Token::from).collect();
    normalize_tokens(&tokens)
}

/// Normalize an already converted stream. Running this on its own output changes nothing.
pub fn normalize_tokens(tokens: &[Token]) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());

    for token in tokens {
        if token.is_atomic() {
            result.push(token.clone());
            continue;
        }

        let text = token.text();
        let mut last = 0;
        for found in LINE_BREAK.find_iter(text) {
            if found.start() > last {
                result.push(token.with_text(&text[last..found.start()]));
            }
            if let Some(line_break) = LineBreak::from_text(found.as_str()) {
                result.push(Token::Newline(line_break));
            }
            last = found.end();
        }
        if last < text.len() {
            result.push(token.with_text(&text[last..]));
        }
    }

    result
}

/// Concatenate token texts back into source
pub fn detokenize(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(kind: TokenKind, text: &str) -> RawToken {
        RawToken::typed(kind, text)
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(&[]), vec![]);
    }

    #[test]
    fn test_splits_whitespace_runs() {
        let tokens = normalize(&[typed(TokenKind::Whitespace, " \n\n  ")]);
        assert_eq!(
            tokens,
            vec![
                Token::Typed {
                    kind: TokenKind::Whitespace,
                    text: " ".to_string()
                },
                Token::Newline(LineBreak::Lf),
                Token::Newline(LineBreak::Lf),
                Token::Typed {
                    kind: TokenKind::Whitespace,
                    text: "  ".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_crlf_is_one_newline() {
        let tokens = normalize(&[typed(TokenKind::InlineHtml, "a\r\nb\rc")]);
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1], Token::Newline(LineBreak::CrLf));
        assert_eq!(tokens[2].text(), "b\rc");
    }

    #[test]
    fn test_atomic_tokens_are_untouched() {
        let raw = vec![
            typed(TokenKind::ConstantEncapsedString, "'a\nb'"),
            typed(TokenKind::Comment, "/* x\ny */"),
            typed(TokenKind::DocComment, "/** x\n */"),
        ];
        let tokens = normalize(&raw);
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| !t.is_newline()));
    }

    #[test]
    fn test_line_comments_are_split() {
        let tokens = normalize(&[typed(TokenKind::Comment, "// x\n")]);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1], Token::Newline(LineBreak::Lf));
    }

    #[test]
    fn test_bare_tokens_stay_bare() {
        let tokens = normalize(&[RawToken::bare(";")]);
        assert_eq!(
            tokens,
            vec![Token::Bare {
                text: ";".to_string()
            }]
        );
    }

    #[test]
    fn test_newline_only_token() {
        let tokens = normalize(&[typed(TokenKind::Whitespace, "\n")]);
        assert_eq!(tokens, vec![Token::Newline(LineBreak::Lf)]);
    }

    #[test]
    fn test_detokenize_round_trip() {
        let raw = vec![
            typed(TokenKind::OpenTag, "<?php\n"),
            typed(TokenKind::Whitespace, "\r\n\t"),
            typed(TokenKind::ConstantEncapsedString, "\"x\n\""),
        ];
        let source: String = raw.iter().map(|t| t.text()).collect();
        assert_eq!(detokenize(&normalize(&raw)), source);
    }
}
