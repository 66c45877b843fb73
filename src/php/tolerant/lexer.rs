//! Tolerant lexer
//!
//! Same division of labour as the reference tokenizer: HTML sections are found by scanning for
//! the open tag, script sections go through a logos machine, and comment, string and heredoc
//! bodies are scanned by hand. The differences are in what comes out:
//!
//! - whitespace and comments are never emitted, they become the leading trivia of the next token
//! - every token is a [Token] of offsets, with `length` covering trivia and text
//! - the stream always ends with an `EndOfFileToken` that owns any trailing trivia
//!
//! Offsets are byte offsets into the UTF-8 source.

use super::token::{self, Token, TokenKind};
use super::TolerantLexer;
use crate::php::reference::base_tokenization::{
    find_heredoc_end, find_open_tag, heredoc_header, ident_len, is_ident_start,
    line_comment_len, opening_len, single_quoted_len, yield_from_tail_len,
};
use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    // Bodies are scanned by hand
    #[token("//")]
    #[token("#")]
    LineComment,
    #[token("/*")]
    BlockComment,
    #[token("'")]
    #[token("b'")]
    #[token("B'")]
    SingleQuote,
    #[token("\"")]
    #[token("b\"")]
    #[token("B\"")]
    DoubleQuote,
    #[token("<<<")]
    HeredocStart,
    #[regex(r"[0-9]")]
    #[regex(r"\.[0-9]")]
    Number,

    #[regex(r"\$[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*")]
    Variable,
    #[regex(r"[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*")]
    Name,

    #[regex(r"\([ \t]*(?i:int|integer|bool|boolean|float|double|real|string|binary|array|object|unset)[ \t]*\)")]
    Cast,

    #[regex(r"\?>(\r\n|\n|\r)?")]
    CloseTag,

    #[token("[", |_| TokenKind::OpenBracketToken)]
    #[token("]", |_| TokenKind::CloseBracketToken)]
    #[token("(", |_| TokenKind::OpenParenToken)]
    #[token(")", |_| TokenKind::CloseParenToken)]
    #[token("{", |_| TokenKind::OpenBraceToken)]
    #[token("}", |_| TokenKind::CloseBraceToken)]
    #[token(".", |_| TokenKind::DotToken)]
    #[token("->", |_| TokenKind::ArrowToken)]
    #[token("=>", |_| TokenKind::DoubleArrowToken)]
    #[token("++", |_| TokenKind::PlusPlusToken)]
    #[token("--", |_| TokenKind::MinusMinusToken)]
    #[token("**", |_| TokenKind::AsteriskAsteriskToken)]
    #[token("*", |_| TokenKind::AsteriskToken)]
    #[token("+", |_| TokenKind::PlusToken)]
    #[token("-", |_| TokenKind::MinusToken)]
    #[token("~", |_| TokenKind::TildeToken)]
    #[token("!", |_| TokenKind::ExclamationToken)]
    #[token("$", |_| TokenKind::DollarToken)]
    #[token("/", |_| TokenKind::SlashToken)]
    #[token("%", |_| TokenKind::PercentToken)]
    #[token("<<", |_| TokenKind::LessThanLessThanToken)]
    #[token(">>", |_| TokenKind::GreaterThanGreaterThanToken)]
    #[token("<", |_| TokenKind::LessThanToken)]
    #[token(">", |_| TokenKind::GreaterThanToken)]
    #[token("<=", |_| TokenKind::LessThanEqualsToken)]
    #[token("<=>", |_| TokenKind::LessThanEqualsGreaterThanToken)]
    #[token(">=", |_| TokenKind::GreaterThanEqualsToken)]
    #[token("==", |_| TokenKind::EqualsEqualsToken)]
    #[token("===", |_| TokenKind::EqualsEqualsEqualsToken)]
    #[token("!=", |_| TokenKind::ExclamationEqualsToken)]
    #[token("!==", |_| TokenKind::ExclamationEqualsEqualsToken)]
    #[token("^", |_| TokenKind::CaretToken)]
    #[token("|", |_| TokenKind::BarToken)]
    #[token("&", |_| TokenKind::AmpersandToken)]
    #[token("&&", |_| TokenKind::AmpersandAmpersandToken)]
    #[token("||", |_| TokenKind::BarBarToken)]
    #[token("?", |_| TokenKind::QuestionToken)]
    #[token(":", |_| TokenKind::ColonToken)]
    #[token("::", |_| TokenKind::ColonColonToken)]
    #[token(";", |_| TokenKind::SemicolonToken)]
    #[token("=", |_| TokenKind::EqualsToken)]
    #[token("**=", |_| TokenKind::AsteriskAsteriskEqualsToken)]
    #[token("*=", |_| TokenKind::AsteriskEqualsToken)]
    #[token("/=", |_| TokenKind::SlashEqualsToken)]
    #[token("%=", |_| TokenKind::PercentEqualsToken)]
    #[token("+=", |_| TokenKind::PlusEqualsToken)]
    #[token("-=", |_| TokenKind::MinusEqualsToken)]
    #[token(".=", |_| TokenKind::DotEqualsToken)]
    #[token("<<=", |_| TokenKind::LessThanLessThanEqualsToken)]
    #[token(">>=", |_| TokenKind::GreaterThanGreaterThanEqualsToken)]
    #[token("&=", |_| TokenKind::AmpersandEqualsToken)]
    #[token("^=", |_| TokenKind::CaretEqualsToken)]
    #[token("|=", |_| TokenKind::BarEqualsToken)]
    #[token(",", |_| TokenKind::CommaToken)]
    #[token("??", |_| TokenKind::QuestionQuestionToken)]
    #[token("??=", |_| TokenKind::QuestionQuestionEqualsToken)]
    #[token("<>", |_| TokenKind::LessThanGreaterThanToken)]
    #[token("...", |_| TokenKind::DotDotDotToken)]
    #[token("\\", |_| TokenKind::BackslashToken)]
    #[token("@", |_| TokenKind::AtSymbolToken)]
    #[token("`", |_| TokenKind::BacktickToken)]
    Punctuator(TokenKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeMode {
    /// Top level, ends at `?>`
    Script,
    /// Inside `{$ ... }` or `${ ... }`, ends at the balancing `}`
    Embedded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Quote,
    End,
}

/// Built-in tolerant lexer
#[derive(Debug, Clone, Copy, Default)]
pub struct TolerantScanner;

impl TolerantScanner {
    pub fn new() -> Self {
        TolerantScanner
    }
}

impl TolerantLexer for TolerantScanner {
    fn get_tokens(&self, source: &str) -> Vec<Token> {
        tokenize(source)
    }
}

/// Lex a whole file
pub fn tokenize(source: &str) -> Vec<Token> {
    Scanner::new(source).run()
}

struct Scanner<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    /// Start of the trivia that the next pushed token will own
    trivia_start: usize,
}

impl<'s> Scanner<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            trivia_start: 0,
        }
    }

    fn push(&mut self, kind: TokenKind, start: usize, end: usize) {
        let full_start = self.trivia_start;
        self.tokens
            .push(Token::new(kind, full_start, start, end - full_start));
        self.trivia_start = end;
    }

    fn run(mut self) -> Vec<Token> {
        let source = self.source;
        let len = source.len();
        let mut pos = 0;

        while pos < len {
            let Some((offset, tag_len, _)) = find_open_tag(&source[pos..]) else {
                self.push(TokenKind::InlineHtml, pos, len);
                break;
            };
            if offset > 0 {
                self.push(TokenKind::InlineHtml, pos, pos + offset);
            }
            let tag_start = pos + offset;
            self.push(
                TokenKind::ScriptSectionStartTag,
                tag_start,
                tag_start + tag_len,
            );
            pos = self.script(tag_start + tag_len, len, CodeMode::Script);
        }

        self.push(TokenKind::EndOfFileToken, len, len);
        self.tokens
    }

    /// Lex code in `from..limit` until the mode's terminator. Returns where lexing stopped.
    fn script(&mut self, from: usize, limit: usize, mode: CodeMode) -> usize {
        let source = self.source;
        let src = &source[from..limit];
        let mut lexer = Lexeme::lexer(src);
        let mut depth = 0usize;
        let mut after_arrow = false;

        while let Some(result) = lexer.next() {
            let span = lexer.span();
            let (start, end) = (from + span.start, from + span.end);
            let Ok(lexeme) = result else {
                self.push(TokenKind::Unknown, start, end);
                after_arrow = false;
                continue;
            };

            match lexeme {
                Lexeme::Whitespace => continue,
                Lexeme::LineComment => {
                    lexer.bump(line_comment_len(lexer.remainder()));
                    continue;
                }
                Lexeme::BlockComment => {
                    let rest = lexer.remainder();
                    lexer.bump(rest.find("*/").map(|i| i + 2).unwrap_or(rest.len()));
                    continue;
                }
                Lexeme::SingleQuote => {
                    let (len, closed) = single_quoted_len(&src[span.start..]);
                    lexer.bump(len - (span.end - span.start));
                    let kind = if closed {
                        TokenKind::StringLiteralToken
                    } else {
                        TokenKind::EncapsedAndWhitespace
                    };
                    self.push(kind, start, start + len);
                }
                Lexeme::DoubleQuote => {
                    let string_end = self.double_quoted(start, limit);
                    lexer.bump(string_end - end);
                }
                Lexeme::HeredocStart => match self.heredoc(start, limit) {
                    Some(heredoc_end) => lexer.bump(heredoc_end - end),
                    None => {
                        self.push(TokenKind::LessThanLessThanToken, start, start + 2);
                        self.push(TokenKind::LessThanToken, start + 2, end);
                    }
                },
                Lexeme::Number => {
                    let (len, kind) = number(&src[span.start..]);
                    lexer.bump(len - (span.end - span.start));
                    self.push(kind, start, start + len);
                }
                Lexeme::Variable => self.push(TokenKind::VariableName, start, end),
                Lexeme::Name => {
                    let lower = lexer.slice().to_ascii_lowercase();
                    let kind = if after_arrow {
                        TokenKind::Name
                    } else if lower == "yield" {
                        match yield_from_tail_len(lexer.remainder()) {
                            Some(len) => {
                                lexer.bump(len);
                                TokenKind::YieldFromKeyword
                            }
                            None => TokenKind::YieldKeyword,
                        }
                    } else {
                        token::keyword(&lower)
                            .or_else(|| token::reserved_word(&lower))
                            .unwrap_or(TokenKind::Name)
                    };
                    self.push(kind, start, from + lexer.span().end);
                }
                Lexeme::Cast => self.push(cast(lexer.slice()), start, end),
                Lexeme::CloseTag => {
                    if mode == CodeMode::Script {
                        self.push(TokenKind::ScriptSectionEndTag, start, end);
                        return end;
                    }
                    // The optional line break stays behind as trivia
                    self.push(TokenKind::QuestionToken, start, start + 1);
                    self.push(TokenKind::GreaterThanToken, start + 1, start + 2);
                }
                Lexeme::Punctuator(kind) => {
                    if mode == CodeMode::Embedded {
                        match kind {
                            TokenKind::OpenBraceToken => depth += 1,
                            TokenKind::CloseBraceToken if depth == 0 => {
                                self.push(kind, start, end);
                                return end;
                            }
                            TokenKind::CloseBraceToken => depth -= 1,
                            _ => {}
                        }
                    }
                    self.push(kind, start, end);
                    after_arrow = kind == TokenKind::ArrowToken;
                    continue;
                }
            }
            after_arrow = false;
        }

        limit
    }

    /// Lex a double-quoted string at `at`. Returns the end offset.
    fn double_quoted(&mut self, at: usize, limit: usize) -> usize {
        let source = self.source;
        let body = at + opening_len(&source[at..], b'"');

        if let Some(close) = plain_string_end(&source.as_bytes()[..limit], body) {
            self.push(TokenKind::StringLiteralToken, at, close + 1);
            return close + 1;
        }

        self.push(TokenKind::DoubleQuoteToken, at, body);
        let (end, closed) = self.template(body, limit, Stop::Quote);
        if closed {
            self.push(TokenKind::DoubleQuoteToken, end, end + 1);
            end + 1
        } else {
            end
        }
    }

    /// Lex a heredoc or nowdoc at `at`. Returns `None` when there is no valid header.
    fn heredoc(&mut self, at: usize, limit: usize) -> Option<usize> {
        let source = self.source;
        let source = &source[..limit];
        let (header_len, label, nowdoc) = heredoc_header(&source[at..])?;
        let body = at + header_len;
        self.push(TokenKind::HeredocStart, at, body);

        let (body_end, marker_len) = match find_heredoc_end(source, body, label) {
            Some((line_start, marker_len)) => (line_start, Some(marker_len)),
            None => (limit, None),
        };

        if body_end > body {
            if nowdoc {
                self.push(TokenKind::EncapsedAndWhitespace, body, body_end);
            } else {
                self.template(body, body_end, Stop::End);
            }
        }

        match marker_len {
            Some(len) => {
                self.push(TokenKind::HeredocEnd, body_end, body_end + len);
                Some(body_end + len)
            }
            None => Some(limit),
        }
    }

    fn literal(&mut self, from: usize, to: usize) {
        if to > from {
            self.push(TokenKind::EncapsedAndWhitespace, from, to);
        }
    }

    /// Lex template pieces in `from..limit`. Returns the end of the body and whether the closing
    /// quote was found.
    fn template(&mut self, from: usize, limit: usize, stop: Stop) -> (usize, bool) {
        let source = self.source;
        let bytes = &source.as_bytes()[..limit];
        let mut literal_start = from;
        let mut i = from;

        while i < limit {
            match bytes[i] {
                b'\\' => i += 2,
                b'"' if stop == Stop::Quote => {
                    self.literal(literal_start, i);
                    return (i, true);
                }
                b'$' if bytes.get(i + 1).copied().is_some_and(is_ident_start) => {
                    self.literal(literal_start, i);
                    i = self.simple_interpolation(i, limit);
                    literal_start = i;
                }
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    self.literal(literal_start, i);
                    self.push(TokenKind::DollarOpenBraceToken, i, i + 2);
                    i += 2;
                    let name = ident_len(bytes, i);
                    if name > 0 && matches!(bytes.get(i + name), Some(b'[' | b'}')) {
                        self.push(TokenKind::StringVarname, i, i + name);
                        i += name;
                    }
                    i = self.script(i, limit, CodeMode::Embedded);
                    literal_start = i;
                }
                b'{' if bytes.get(i + 1) == Some(&b'$') => {
                    self.literal(literal_start, i);
                    self.push(TokenKind::OpenBraceDollarToken, i, i + 1);
                    i = self.script(i + 1, limit, CodeMode::Embedded);
                    literal_start = i;
                }
                _ => i += 1,
            }
        }

        let end = i.min(limit);
        self.literal(literal_start, end);
        (end, false)
    }

    /// `$name`, `$name[key]` or `$name->prop` inside a template
    fn simple_interpolation(&mut self, at: usize, limit: usize) -> usize {
        let source = self.source;
        let bytes = &source.as_bytes()[..limit];
        let mut i = at + 1 + ident_len(bytes, at + 1);
        self.push(TokenKind::VariableName, at, i);

        match bytes.get(i) {
            Some(b'[') => {
                self.push(TokenKind::OpenBracketToken, i, i + 1);
                i += 1;
                if bytes.get(i) == Some(&b'-') {
                    self.push(TokenKind::MinusToken, i, i + 1);
                    i += 1;
                }
                let key_start = i;
                match bytes.get(i) {
                    Some(b) if b.is_ascii_digit() => {
                        i += bytes[i..]
                            .iter()
                            .take_while(|b| b.is_ascii_alphanumeric())
                            .count();
                        self.push(TokenKind::IntegerLiteralToken, key_start, i);
                    }
                    Some(b'$') if bytes.get(i + 1).copied().is_some_and(is_ident_start) => {
                        i += 1 + ident_len(bytes, i + 1);
                        self.push(TokenKind::VariableName, key_start, i);
                    }
                    Some(b) if is_ident_start(*b) => {
                        i += ident_len(bytes, i);
                        self.push(TokenKind::Name, key_start, i);
                    }
                    _ => {}
                }
                if bytes.get(i) == Some(&b']') {
                    self.push(TokenKind::CloseBracketToken, i, i + 1);
                    i += 1;
                }
            }
            Some(b'-')
                if bytes.get(i + 1) == Some(&b'>')
                    && bytes.get(i + 2).copied().is_some_and(is_ident_start) =>
            {
                self.push(TokenKind::ArrowToken, i, i + 2);
                i += 2;
                let name = ident_len(bytes, i);
                self.push(TokenKind::Name, i, i + name);
                i += name;
            }
            _ => {}
        }
        i
    }
}

/// Offset of the closing quote of a string body starting at `from`, if the string is closed and
/// contains nothing to interpolate
fn plain_string_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            b'$' if bytes.get(i + 1).copied().is_some_and(is_ident_start) => return None,
            b'$' if bytes.get(i + 1) == Some(&b'{') => return None,
            b'{' if bytes.get(i + 1) == Some(&b'$') => return None,
            _ => i += 1,
        }
    }
    None
}

fn cast(text: &str) -> TokenKind {
    let inner = text
        .trim_start_matches('(')
        .trim_end_matches(')')
        .trim()
        .to_ascii_lowercase();
    match inner.as_str() {
        "int" | "integer" => TokenKind::IntCastToken,
        "bool" | "boolean" => TokenKind::BoolCastToken,
        "float" | "double" | "real" => TokenKind::DoubleCastToken,
        "string" | "binary" => TokenKind::StringCastToken,
        "array" => TokenKind::ArrayCastToken,
        "object" => TokenKind::ObjectCastToken,
        _ => TokenKind::UnsetCastToken,
    }
}

/// Length and kind of the numeric literal at the start of `text`
fn number(text: &str) -> (usize, TokenKind) {
    let bytes = text.as_bytes();
    let run = |from: usize, accept: fn(&u8) -> bool| -> usize {
        bytes[from..].iter().take_while(|b| accept(b)).count()
    };
    let alnum_tail = |from: usize| -> usize {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_alphanumeric() || **b == b'_')
            .count()
    };

    if bytes.len() > 1 && bytes[0] == b'0' && matches!(bytes[1], b'x' | b'X') {
        let digits = run(2, |b| b.is_ascii_hexdigit() || *b == b'_');
        let tail = alnum_tail(2 + digits);
        let kind = if digits > 0 && tail == 0 {
            TokenKind::HexadecimalLiteralToken
        } else {
            TokenKind::InvalidHexadecimalLiteral
        };
        return (2 + digits + tail, kind);
    }
    if bytes.len() > 1 && bytes[0] == b'0' && matches!(bytes[1], b'b' | b'B') {
        let digits = run(2, |b| matches!(*b, b'0' | b'1' | b'_'));
        let tail = alnum_tail(2 + digits);
        let kind = if digits > 0 && tail == 0 {
            TokenKind::BinaryLiteralToken
        } else {
            TokenKind::InvalidBinaryLiteral
        };
        return (2 + digits + tail, kind);
    }

    let decimal = |b: &u8| b.is_ascii_digit() || *b == b'_';
    let whole = run(0, decimal);
    let mut i = whole;
    let mut float = false;

    if bytes.get(i) == Some(&b'.') {
        let fraction = run(i + 1, decimal);
        if whole > 0 || fraction > 0 {
            float = true;
            i += 1 + fraction;
        }
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        let sign = usize::from(matches!(bytes.get(i + 1), Some(b'+' | b'-')));
        let exponent = run(i + 1 + sign, |b| b.is_ascii_digit());
        if exponent > 0 {
            float = true;
            i += 1 + sign + exponent;
        }
    }

    if float {
        return (i, TokenKind::FloatingLiteralToken);
    }
    if whole > 1 && bytes[0] == b'0' {
        let octal = bytes[..whole]
            .iter()
            .all(|b| matches!(*b, b'0'..=b'7' | b'_'));
        let kind = if octal {
            TokenKind::OctalLiteralToken
        } else {
            TokenKind::InvalidOctalLiteralToken
        };
        return (whole, kind);
    }
    (whole, TokenKind::IntegerLiteralToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).iter().map(|t| t.kind).collect()
    }

    fn texts(source: &str) -> Vec<(TokenKind, String)> {
        tokenize(source)
            .iter()
            .map(|t| (t.kind, t.text(source).to_string()))
            .collect()
    }

    fn assert_tiles(source: &str) {
        let tokens = tokenize(source);
        let mut expected = 0;
        for token in &tokens {
            assert_eq!(token.full_start, expected, "gap or overlap in {source:?}");
            assert!(token.start >= token.full_start);
            expected = token.end();
        }
        assert_eq!(expected, source.len());
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfFileToken));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            tokenize(""),
            vec![Token::new(TokenKind::EndOfFileToken, 0, 0, 0)]
        );
    }

    #[test]
    fn test_simple_statement() {
        let tokens = tokenize("<?php\n$x = 1;\n");
        assert_eq!(
            tokens,
            vec![
                Token::new(TokenKind::ScriptSectionStartTag, 0, 0, 6),
                Token::new(TokenKind::VariableName, 6, 6, 2),
                Token::new(TokenKind::EqualsToken, 8, 9, 2),
                Token::new(TokenKind::IntegerLiteralToken, 10, 11, 2),
                Token::new(TokenKind::SemicolonToken, 12, 12, 1),
                Token::new(TokenKind::EndOfFileToken, 13, 14, 1),
            ]
        );
    }

    #[test]
    fn test_comments_are_trivia() {
        let source = "<?php // one\n/* two */ $a;";
        let tokens = tokenize(source);
        assert_eq!(tokens[1].kind, TokenKind::VariableName);
        assert_eq!(tokens[1].full_start, 6);
        assert_eq!(tokens[1].text(source), "$a");
    }

    #[test]
    fn test_inline_html_around_script() {
        assert_eq!(
            kinds("<b><?php echo 1 ?>\n</b>"),
            vec![
                TokenKind::InlineHtml,
                TokenKind::ScriptSectionStartTag,
                TokenKind::EchoKeyword,
                TokenKind::IntegerLiteralToken,
                TokenKind::ScriptSectionEndTag,
                TokenKind::InlineHtml,
                TokenKind::EndOfFileToken,
            ]
        );
        let tokens = tokenize("<b><?php ?>\n</b>");
        assert_eq!(tokens[0].full_start, tokens[0].start);
        assert_eq!(tokens[2].text("<b><?php ?>\n</b>"), "?>\n");
    }

    #[test]
    fn test_short_echo_tag() {
        assert_eq!(
            texts("<?= $a ?>")[..2],
            [
                (TokenKind::ScriptSectionStartTag, "<?=".to_string()),
                (TokenKind::VariableName, "$a".to_string()),
            ]
        );
    }

    #[test]
    fn test_keywords_and_reserved_words() {
        assert_eq!(
            kinds("<?php IF true Int endwhile"),
            vec![
                TokenKind::ScriptSectionStartTag,
                TokenKind::IfKeyword,
                TokenKind::TrueReservedWord,
                TokenKind::IntReservedWord,
                TokenKind::EndWhileKeyword,
                TokenKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn test_member_names_after_arrow() {
        assert_eq!(kinds("<?php $a->if")[3], TokenKind::Name);
    }

    #[test]
    fn test_numbers() {
        let found = kinds("<?php 1 07 08 0x1F 0xZ 0b10 0b2 1.5 .5 1e3");
        assert_eq!(
            found[1..found.len() - 1],
            [
                TokenKind::IntegerLiteralToken,
                TokenKind::OctalLiteralToken,
                TokenKind::InvalidOctalLiteralToken,
                TokenKind::HexadecimalLiteralToken,
                TokenKind::InvalidHexadecimalLiteral,
                TokenKind::BinaryLiteralToken,
                TokenKind::InvalidBinaryLiteral,
                TokenKind::FloatingLiteralToken,
                TokenKind::FloatingLiteralToken,
                TokenKind::FloatingLiteralToken,
            ]
        );
    }

    #[test]
    fn test_operators_take_longest_match() {
        assert_eq!(
            kinds("<?php === <=> **= ... ??")[1..6],
            [
                TokenKind::EqualsEqualsEqualsToken,
                TokenKind::LessThanEqualsGreaterThanToken,
                TokenKind::AsteriskAsteriskEqualsToken,
                TokenKind::DotDotDotToken,
                TokenKind::QuestionQuestionToken,
            ]
        );
    }

    #[test]
    fn test_casts() {
        assert_eq!(kinds("<?php (int)$a")[1], TokenKind::IntCastToken);
        assert_eq!(kinds("<?php ( Boolean )$a")[1], TokenKind::BoolCastToken);
    }

    #[test]
    fn test_strings() {
        assert_eq!(kinds("<?php 'a'")[1], TokenKind::StringLiteralToken);
        assert_eq!(kinds("<?php \"a\\\"\"")[1], TokenKind::StringLiteralToken);
        assert_eq!(kinds("<?php 'abc")[1], TokenKind::EncapsedAndWhitespace);
    }

    #[test]
    fn test_template_pieces() {
        let source = "<?php \"a $b[0] {$c} ${d}\";";
        let found: Vec<_> = texts(source)
            .into_iter()
            .map(|(kind, text)| (kind, text.trim().to_string()))
            .collect();
        let expected = [
            (TokenKind::DoubleQuoteToken, "\""),
            (TokenKind::EncapsedAndWhitespace, "a"),
            (TokenKind::VariableName, "$b"),
            (TokenKind::OpenBracketToken, "["),
            (TokenKind::IntegerLiteralToken, "0"),
            (TokenKind::CloseBracketToken, "]"),
            (TokenKind::EncapsedAndWhitespace, ""),
            (TokenKind::OpenBraceDollarToken, "{"),
            (TokenKind::VariableName, "$c"),
            (TokenKind::CloseBraceToken, "}"),
            (TokenKind::EncapsedAndWhitespace, ""),
            (TokenKind::DollarOpenBraceToken, "${"),
            (TokenKind::StringVarname, "d"),
            (TokenKind::CloseBraceToken, "}"),
            (TokenKind::DoubleQuoteToken, "\""),
            (TokenKind::SemicolonToken, ";"),
        ];
        let expected: Vec<_> = expected
            .iter()
            .map(|(kind, text)| (*kind, text.to_string()))
            .collect();
        assert_eq!(found[1..found.len() - 1], expected[..]);
    }

    #[test]
    fn test_unterminated_template() {
        assert_eq!(
            kinds("<?php \"a $b"),
            vec![
                TokenKind::ScriptSectionStartTag,
                TokenKind::DoubleQuoteToken,
                TokenKind::EncapsedAndWhitespace,
                TokenKind::VariableName,
                TokenKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn test_heredoc() {
        assert_eq!(
            kinds("<?php <<<EOT\nhi $x\nEOT;"),
            vec![
                TokenKind::ScriptSectionStartTag,
                TokenKind::HeredocStart,
                TokenKind::EncapsedAndWhitespace,
                TokenKind::VariableName,
                TokenKind::EncapsedAndWhitespace,
                TokenKind::HeredocEnd,
                TokenKind::SemicolonToken,
                TokenKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn test_unknown_character() {
        assert_eq!(kinds("<?php \u{1}")[1], TokenKind::Unknown);
    }

    #[test]
    fn test_trailing_trivia_goes_to_eof() {
        let tokens = tokenize("<?php $a; // done\n");
        let eof = tokens[tokens.len() - 1];
        assert_eq!(eof.full_start, 9);
        assert_eq!(eof.start, 18);
        assert_eq!(eof.text_length(), 0);
    }

    #[test]
    fn test_tokens_tile_the_source() {
        let sources = [
            "",
            "plain html",
            "<?php\n$x = 1;\n",
            "<html><?php if ($a) { echo \"x{$y[1]}z\"; } ?>\r\n</html>",
            "<?php <<<A\n  a {$b\n  A . 'q'; // c",
            "<?php $é = 'ü'; \"$é\" /* open",
            "<?php \"{$a ?> ${",
            "<?php 0x 0b 1e 1.e5 ...5",
        ];
        for source in sources {
            assert_tiles(source);
        }
    }
}
