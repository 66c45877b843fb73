//! Base tokenization for the reference tokenizer
//!
//! A PHP file alternates between inline HTML and script sections. The HTML parts are found by a
//! plain scan for the open tag; script sections are run through the logos [Lexeme] machine.
//! Logos handles the regular part of the language (names, numbers, operators, whitespace).
//! Comments, strings and heredocs are not regular, so logos only recognises their opening
//! delimiter and the driver scans the body by hand, extending the token with `Lexer::bump`.
//!
//! Interpolating strings are split into pieces the way `token_get_all` does it:
//!
//!     "a $b {$c->d} ${e}"
//!
//!     "  T_ENCAPSED_AND_WHITESPACE  T_VARIABLE  T_ENCAPSED_AND_WHITESPACE
//!     T_CURLY_OPEN  T_VARIABLE  T_OBJECT_OPERATOR  T_STRING  }  ...
//!
//! Expressions inside `{$ ... }` and `${ ... }` are lexed recursively in embedded mode, which
//! ends at the brace that balances the opening one.
//!
//! The tokenizer never fails. Bytes that match nothing become `T_BAD_CHARACTER`, unterminated
//! comments and strings run to the end of the input.

use super::kinds::{self, TokenKind};
use super::RawToken;
use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;

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

    #[token("#[")]
    Attribute,

    #[regex(r"\$[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*")]
    Variable,
    #[regex(r"[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*")]
    Name,
    #[regex(r"[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*(\\[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*)+")]
    QualifiedName,
    #[regex(r"(\\[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*)+")]
    FullyQualifiedName,

    #[regex(r"0[xX][0-9a-fA-F]+(_[0-9a-fA-F]+)*|0[bB][01]+(_[01]+)*|0[oO][0-7]+(_[0-7]+)*|[0-9]+(_[0-9]+)*")]
    LNumber,
    #[regex(r"([0-9]+(_[0-9]+)*)?\.[0-9]+(_[0-9]+)*([eE][+-]?[0-9]+(_[0-9]+)*)?|[0-9]+(_[0-9]+)*\.([0-9]+(_[0-9]+)*)?([eE][+-]?[0-9]+(_[0-9]+)*)?|[0-9]+(_[0-9]+)*[eE][+-]?[0-9]+(_[0-9]+)*")]
    DNumber,

    #[regex(r"\([ \t]*(?i:int|integer|bool|boolean|float|double|real|string|binary|array|object|unset)[ \t]*\)")]
    Cast,

    #[regex(r"\?>(\r\n|\n)?")]
    CloseTag,

    #[token("==")]
    #[token("!=")]
    #[token("<>")]
    #[token("===")]
    #[token("!==")]
    #[token("<=")]
    #[token(">=")]
    #[token("<=>")]
    #[token("=>")]
    #[token("->")]
    #[token("?->")]
    #[token("::")]
    #[token("++")]
    #[token("--")]
    #[token("+=")]
    #[token("-=")]
    #[token("*=")]
    #[token("/=")]
    #[token(".=")]
    #[token("%=")]
    #[token("&=")]
    #[token("|=")]
    #[token("^=")]
    #[token("<<=")]
    #[token(">>=")]
    #[token("??=")]
    #[token("||")]
    #[token("&&")]
    #[token("??")]
    #[token("<<")]
    #[token(">>")]
    #[token("**")]
    #[token("**=")]
    #[token("...")]
    #[token("\\")]
    Operator,

    #[regex(r"[;:,.\[\]()|^&+\-/*=%!~$<>?@{}`]")]
    Punct,
}

/// How a run of script code ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CodeMode {
    /// Top level, ends at `?>`
    Script,
    /// Inside `{$ ... }` or `${ ... }`, ends at the balancing `}`
    Embedded,
}

/// How a string template ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    Quote,
    End,
}

const IDENT: &str = r"[a-zA-Z_\x{80}-\x{10FFFF}][a-zA-Z0-9_\x{80}-\x{10FFFF}]*";

static HEREDOC_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r#"^<<<[ \t]*(?:"({IDENT})"|'({IDENT})'|({IDENT}))(\r\n|\n)"#
    ))
    .unwrap()
});

static YIELD_FROM_TAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t\r\n]+(?i:from)").unwrap());

/// Tokenize a whole PHP file
pub fn tokenize(source: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < source.len() {
        let html = &source[pos..];
        let Some((offset, tag_len, kind)) = find_open_tag(html) else {
            tokens.push(RawToken::typed(TokenKind::InlineHtml, html));
            break;
        };
        if offset > 0 {
            tokens.push(RawToken::typed(TokenKind::InlineHtml, &html[..offset]));
        }
        tokens.push(RawToken::typed(kind, &html[offset..offset + tag_len]));
        pos += offset + tag_len;

        let (consumed, _) = lex_code(&source[pos..], CodeMode::Script, &mut tokens);
        pos += consumed;
    }

    tokens
}

/// Locate the next `<?php` or `<?=` tag. The returned length includes the single whitespace
/// character that must follow `<?php`, counting `\r\n` as one.
pub(crate) fn find_open_tag(html: &str) -> Option<(usize, usize, TokenKind)> {
    let mut from = 0;
    while let Some(rel) = html[from..].find("<?") {
        let at = from + rel;
        let rest = html[at..].as_bytes();
        if rest.starts_with(b"<?=") {
            return Some((at, 3, TokenKind::OpenTagWithEcho));
        }
        if rest.len() >= 5 && rest[..5].eq_ignore_ascii_case(b"<?php") {
            match rest.get(5) {
                None => return Some((at, 5, TokenKind::OpenTag)),
                Some(b' ' | b'\t' | b'\n') => return Some((at, 6, TokenKind::OpenTag)),
                Some(b'\r') => {
                    let len = if rest.get(6) == Some(&b'\n') { 7 } else { 6 };
                    return Some((at, len, TokenKind::OpenTag));
                }
                _ => {}
            }
        }
        from = at + 2;
    }
    None
}

/// Lex script code until the mode's terminator. Returns the number of bytes consumed and
/// whether the terminator was seen.
fn lex_code(src: &str, mode: CodeMode, out: &mut Vec<RawToken>) -> (usize, bool) {
    let mut lexer = Lexeme::lexer(src);
    let mut depth = 0usize;
    let mut after_arrow = false;

    while let Some(result) = lexer.next() {
        let start = lexer.span().start;
        let Ok(lexeme) = result else {
            out.push(RawToken::typed(TokenKind::BadCharacter, lexer.slice()));
            after_arrow = false;
            continue;
        };

        match lexeme {
            Lexeme::Whitespace => {
                out.push(RawToken::typed(TokenKind::Whitespace, lexer.slice()));
                continue;
            }
            Lexeme::LineComment => {
                let rest = lexer.remainder();
                let len = line_comment_len(rest);
                lexer.bump(len);
                out.push(RawToken::typed(TokenKind::Comment, lexer.slice()));
                continue;
            }
            Lexeme::BlockComment => {
                let rest = lexer.remainder();
                let len = rest.find("*/").map(|i| i + 2).unwrap_or(rest.len());
                lexer.bump(len);
                let text = lexer.slice();
                let kind = if is_doc_comment(text) {
                    TokenKind::DocComment
                } else {
                    TokenKind::Comment
                };
                out.push(RawToken::typed(kind, text));
                continue;
            }
            Lexeme::SingleQuote => {
                let (len, closed) = single_quoted_len(&src[start..]);
                lexer.bump(len - lexer.slice().len());
                let kind = if closed {
                    TokenKind::ConstantEncapsedString
                } else {
                    TokenKind::EncapsedAndWhitespace
                };
                out.push(RawToken::typed(kind, lexer.slice()));
            }
            Lexeme::DoubleQuote => {
                let len = lex_double_quoted(&src[start..], out);
                lexer.bump(len - lexer.slice().len());
            }
            Lexeme::HeredocStart => match lex_heredoc(&src[start..], out) {
                Some(len) => lexer.bump(len - lexer.slice().len()),
                None => {
                    // Not a heredoc header: `<<` followed by `<`
                    out.push(RawToken::typed(TokenKind::Sl, "<<"));
                    out.push(RawToken::bare("<"));
                }
            },
            Lexeme::Attribute => out.push(RawToken::typed(TokenKind::Attribute, lexer.slice())),
            Lexeme::Variable => out.push(RawToken::typed(TokenKind::Variable, lexer.slice())),
            Lexeme::Name => {
                let text = lexer.slice();
                let lower = text.to_ascii_lowercase();
                let kind = if after_arrow {
                    TokenKind::String
                } else if lower == "yield" {
                    match yield_from_tail_len(lexer.remainder()) {
                        Some(len) => {
                            lexer.bump(len);
                            TokenKind::YieldFrom
                        }
                        None => TokenKind::Yield,
                    }
                } else {
                    kinds::keyword(&lower).unwrap_or(TokenKind::String)
                };
                out.push(RawToken::typed(kind, lexer.slice()));
            }
            Lexeme::QualifiedName => {
                let text = lexer.slice();
                let first = text.split('\\').next().unwrap_or_default();
                let kind = if first.eq_ignore_ascii_case("namespace") {
                    TokenKind::NameRelative
                } else {
                    TokenKind::NameQualified
                };
                out.push(RawToken::typed(kind, text));
            }
            Lexeme::FullyQualifiedName => {
                out.push(RawToken::typed(TokenKind::NameFullyQualified, lexer.slice()))
            }
            Lexeme::LNumber => {
                let text = lexer.slice();
                let kind = if integer_fits(text) {
                    TokenKind::LNumber
                } else {
                    TokenKind::DNumber
                };
                out.push(RawToken::typed(kind, text));
            }
            Lexeme::DNumber => out.push(RawToken::typed(TokenKind::DNumber, lexer.slice())),
            Lexeme::Cast => {
                let text = lexer.slice();
                match kinds::cast(text) {
                    Some(kind) => out.push(RawToken::typed(kind, text)),
                    None => out.push(RawToken::bare(text)),
                }
            }
            Lexeme::CloseTag => {
                if mode == CodeMode::Script {
                    out.push(RawToken::typed(TokenKind::CloseTag, lexer.slice()));
                    return (lexer.span().end, true);
                }
                out.push(RawToken::bare("?"));
                out.push(RawToken::bare(">"));
                let extra = lexer.slice().len() - 2;
                if extra > 0 {
                    out.push(RawToken::typed(TokenKind::Whitespace, &lexer.slice()[2..]));
                }
            }
            Lexeme::Operator => {
                let text = lexer.slice();
                match kinds::operator(text) {
                    Some(kind) => {
                        out.push(RawToken::typed(kind, text));
                        after_arrow = matches!(
                            kind,
                            TokenKind::ObjectOperator | TokenKind::NullsafeObjectOperator
                        );
                        continue;
                    }
                    None => out.push(RawToken::bare(text)),
                }
            }
            Lexeme::Punct => {
                let text = lexer.slice();
                if mode == CodeMode::Embedded {
                    match text {
                        "{" => depth += 1,
                        "}" if depth == 0 => {
                            out.push(RawToken::bare(text));
                            return (lexer.span().end, true);
                        }
                        "}" => depth -= 1,
                        _ => {}
                    }
                }
                out.push(RawToken::bare(text));
            }
        }
        after_arrow = false;
    }

    (src.len(), false)
}

/// Length of the ` from` that turns a preceding `yield` into `yield from`
pub(crate) fn yield_from_tail_len(rest: &str) -> Option<usize> {
    let tail = YIELD_FROM_TAIL.find(rest)?;
    if starts_with_ident_char(&rest[tail.end()..]) {
        return None;
    }
    Some(tail.end())
}

/// Bytes of comment text after `//` or `#`, stopping before the line break or a `?>`
pub(crate) fn line_comment_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' | b'\r' => break,
            b'?' if bytes.get(i + 1) == Some(&b'>') => break,
            _ => i += 1,
        }
    }
    i
}

fn is_doc_comment(text: &str) -> bool {
    text.len() > 4
        && text.starts_with("/**")
        && matches!(text.as_bytes()[3], b' ' | b'\t' | b'\r' | b'\n')
}

/// Length of the opening delimiter, one for `'`, two for `b'`
pub(crate) fn opening_len(text: &str, quote: u8) -> usize {
    if text.as_bytes().first() == Some(&quote) {
        1
    } else {
        2
    }
}

/// Length of a single-quoted literal including its quotes, or the rest of the input when the
/// closing quote is missing
pub(crate) fn single_quoted_len(text: &str) -> (usize, bool) {
    let bytes = text.as_bytes();
    let mut i = opening_len(text, b'\'');
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\'' => return (i + 1, true),
            _ => i += 1,
        }
    }
    (bytes.len(), false)
}

/// Lex a double-quoted string starting at its opening quote. A string without interpolation is a
/// single `T_CONSTANT_ENCAPSED_STRING`; anything else is split into template pieces framed by
/// bare quotes.
fn lex_double_quoted(text: &str, out: &mut Vec<RawToken>) -> usize {
    let open = opening_len(text, b'"');
    let mut pieces = Vec::new();
    let (body_len, closed) = lex_template(&text[open..], Stop::Quote, &mut pieces);
    let end = open + body_len;

    let plain = pieces
        .iter()
        .all(|piece| piece.kind() == Some(TokenKind::EncapsedAndWhitespace));
    if closed && plain {
        out.push(RawToken::typed(
            TokenKind::ConstantEncapsedString,
            &text[..end + 1],
        ));
        return end + 1;
    }

    out.push(RawToken::bare(&text[..open]));
    out.append(&mut pieces);
    if closed {
        out.push(RawToken::bare("\""));
        end + 1
    } else {
        end
    }
}

/// Lex a heredoc or nowdoc starting at `<<<`. Returns `None` when the header is malformed.
fn lex_heredoc(text: &str, out: &mut Vec<RawToken>) -> Option<usize> {
    let (header_len, label, nowdoc) = heredoc_header(text)?;

    out.push(RawToken::typed(TokenKind::StartHeredoc, &text[..header_len]));

    let (body_end, closing) = match find_heredoc_end(text, header_len, label) {
        Some((line_start, marker_len)) => (line_start, Some(marker_len)),
        None => (text.len(), None),
    };

    let body = &text[header_len..body_end];
    if !body.is_empty() {
        if nowdoc {
            out.push(RawToken::typed(TokenKind::EncapsedAndWhitespace, body));
        } else {
            lex_template(body, Stop::End, out);
        }
    }

    match closing {
        Some(marker_len) => {
            out.push(RawToken::typed(
                TokenKind::EndHeredoc,
                &text[body_end..body_end + marker_len],
            ));
            Some(body_end + marker_len)
        }
        None => Some(text.len()),
    }
}

/// Parse a heredoc header at the start of `text`. Returns the header length including its line
/// break, the label and whether it is a nowdoc.
pub(crate) fn heredoc_header(text: &str) -> Option<(usize, &str, bool)> {
    let caps = HEREDOC_HEADER.captures(text)?;
    let header_len = caps.get(0)?.end();
    let nowdoc = caps.get(2).is_some();
    let label = caps.get(1).or(caps.get(2)).or(caps.get(3))?.as_str();
    Some((header_len, label, nowdoc))
}

/// Find the line closing a heredoc. Returns the line's start offset and the length of the
/// closing marker including its indentation.
pub(crate) fn find_heredoc_end(
    text: &str,
    body_start: usize,
    label: &str,
) -> Option<(usize, usize)> {
    let mut line_start = body_start;
    loop {
        let line = &text[line_start..];
        let indent = line
            .bytes()
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();
        if let Some(after) = line[indent..].strip_prefix(label) {
            if !starts_with_ident_char(after) {
                return Some((line_start, indent + label.len()));
            }
        }
        line_start += line.find('\n')? + 1;
    }
}

pub(crate) fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b >= 0x80
}

pub(crate) fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b >= 0x80
}

pub(crate) fn starts_with_ident_char(text: &str) -> bool {
    text.as_bytes().first().copied().is_some_and(is_ident_char)
}

pub(crate) fn ident_len(bytes: &[u8], from: usize) -> usize {
    bytes[from..].iter().take_while(|b| is_ident_char(**b)).count()
}

/// Lex the inside of an interpolating string. Returns the bytes consumed (not counting a closing
/// quote) and whether a closing quote was found.
fn lex_template(text: &str, stop: Stop, out: &mut Vec<RawToken>) -> (usize, bool) {
    let bytes = text.as_bytes();
    let mut literal_start = 0;
    let mut i = 0;

    let flush = |out: &mut Vec<RawToken>, from: usize, to: usize| {
        if to > from {
            out.push(RawToken::typed(
                TokenKind::EncapsedAndWhitespace,
                &text[from..to],
            ));
        }
    };

    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' if stop == Stop::Quote => {
                flush(out, literal_start, i);
                return (i, true);
            }
            b'$' if bytes.get(i + 1).copied().is_some_and(is_ident_start) => {
                flush(out, literal_start, i);
                i = lex_simple_interpolation(text, i, out);
                literal_start = i;
            }
            b'$' if bytes.get(i + 1) == Some(&b'{') => {
                flush(out, literal_start, i);
                out.push(RawToken::typed(TokenKind::DollarOpenCurlyBraces, "${"));
                i += 2;
                let name = ident_len(bytes, i);
                if name > 0 && matches!(bytes.get(i + name), Some(b'[' | b'}')) {
                    out.push(RawToken::typed(
                        TokenKind::StringVarname,
                        &text[i..i + name],
                    ));
                    i += name;
                }
                let (consumed, _) = lex_code(&text[i..], CodeMode::Embedded, out);
                i += consumed;
                literal_start = i;
            }
            b'{' if bytes.get(i + 1) == Some(&b'$') => {
                flush(out, literal_start, i);
                out.push(RawToken::typed(TokenKind::CurlyOpen, "{"));
                i += 1;
                let (consumed, _) = lex_code(&text[i..], CodeMode::Embedded, out);
                i += consumed;
                literal_start = i;
            }
            _ => i += 1,
        }
    }

    let end = i.min(bytes.len());
    flush(out, literal_start, end);
    (end, false)
}

/// Lex `$name`, `$name[key]` or `$name->prop` inside a template, starting at the `$`
fn lex_simple_interpolation(text: &str, at: usize, out: &mut Vec<RawToken>) -> usize {
    let bytes = text.as_bytes();
    let mut i = at + 1 + ident_len(bytes, at + 1);
    out.push(RawToken::typed(TokenKind::Variable, &text[at..i]));

    match bytes.get(i) {
        Some(b'[') => {
            out.push(RawToken::bare("["));
            i += 1;
            if bytes.get(i) == Some(&b'-') {
                out.push(RawToken::bare("-"));
                i += 1;
            }
            let key_start = i;
            match bytes.get(i) {
                Some(b) if b.is_ascii_digit() => {
                    i += bytes[i..].iter().take_while(|b| b.is_ascii_alphanumeric()).count();
                    out.push(RawToken::typed(TokenKind::NumString, &text[key_start..i]));
                }
                Some(b'$') if bytes.get(i + 1).copied().is_some_and(is_ident_start) => {
                    i += 1 + ident_len(bytes, i + 1);
                    out.push(RawToken::typed(TokenKind::Variable, &text[key_start..i]));
                }
                Some(b) if is_ident_start(*b) => {
                    i += ident_len(bytes, i);
                    out.push(RawToken::typed(TokenKind::String, &text[key_start..i]));
                }
                _ => {}
            }
            if bytes.get(i) == Some(&b']') {
                out.push(RawToken::bare("]"));
                i += 1;
            }
        }
        Some(b'-')
            if bytes.get(i + 1) == Some(&b'>')
                && bytes.get(i + 2).copied().is_some_and(is_ident_start) =>
        {
            out.push(RawToken::typed(TokenKind::ObjectOperator, "->"));
            i += 2;
            let name = ident_len(bytes, i);
            out.push(RawToken::typed(TokenKind::String, &text[i..i + name]));
            i += name;
        }
        Some(b'?')
            if bytes[i..].starts_with(b"?->")
                && bytes.get(i + 3).copied().is_some_and(is_ident_start) =>
        {
            out.push(RawToken::typed(TokenKind::NullsafeObjectOperator, "?->"));
            i += 3;
            let name = ident_len(bytes, i);
            out.push(RawToken::typed(TokenKind::String, &text[i..i + name]));
            i += name;
        }
        _ => {}
    }
    i
}

/// Whether an integer literal fits in a signed 64-bit value. Larger literals are floats.
fn integer_fits(text: &str) -> bool {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    let (radix, body) = if let Some(hex) = lower.strip_prefix("0x") {
        (16, hex)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        (2, bin)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        (8, oct)
    } else if lower.len() > 1 && lower.starts_with('0') {
        (8, &lower[1..])
    } else {
        (10, lower.as_str())
    };
    i64::from_str_radix(body, radix).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds_and_texts(source: &str) -> Vec<(Option<TokenKind>, String)> {
        tokenize(source)
            .into_iter()
            .map(|t| (t.kind(), t.text().to_string()))
            .collect()
    }

    fn concat(tokens: &[RawToken]) -> String {
        tokens.iter().map(|t| t.text()).collect()
    }

    #[test]
    fn test_inline_html_only() {
        let tokens = tokenize("<p>hi</p>\n");
        assert_eq!(
            tokens,
            vec![RawToken::typed(TokenKind::InlineHtml, "<p>hi</p>\n")]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(tokenize(""), vec![]);
    }

    #[test]
    fn test_open_tag_takes_one_newline() {
        let tokens = kinds_and_texts("<?php\n\n$x;");
        assert_eq!(tokens[0], (Some(TokenKind::OpenTag), "<?php\n".to_string()));
        assert_eq!(tokens[1], (Some(TokenKind::Whitespace), "\n".to_string()));
        assert_eq!(tokens[2], (Some(TokenKind::Variable), "$x".to_string()));
        assert_eq!(tokens[3], (None, ";".to_string()));
    }

    #[test]
    fn test_crlf_open_tag() {
        let tokens = kinds_and_texts("<?php\r\necho 1;");
        assert_eq!(tokens[0], (Some(TokenKind::OpenTag), "<?php\r\n".to_string()));
        assert_eq!(tokens[1], (Some(TokenKind::Echo), "echo".to_string()));
    }

    #[test]
    fn test_php_without_whitespace_is_html() {
        let tokens = kinds_and_texts("<?phpx");
        assert_eq!(tokens, vec![(Some(TokenKind::InlineHtml), "<?phpx".to_string())]);
    }

    #[test]
    fn test_close_tag_and_trailing_html() {
        let tokens = kinds_and_texts("a<?= $b ?>\nc");
        let kinds: Vec<_> = tokens.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                Some(TokenKind::InlineHtml),
                Some(TokenKind::OpenTagWithEcho),
                Some(TokenKind::Whitespace),
                Some(TokenKind::Variable),
                Some(TokenKind::Whitespace),
                Some(TokenKind::CloseTag),
                Some(TokenKind::InlineHtml),
            ]
        );
        assert_eq!(tokens[5].1, "?>\n");
    }

    #[test]
    fn test_comments() {
        let tokens = kinds_and_texts("<?php // hi\n# there\n/* a\nb */ /** doc */");
        assert_eq!(tokens[1], (Some(TokenKind::Comment), "// hi".to_string()));
        assert_eq!(tokens[2], (Some(TokenKind::Whitespace), "\n".to_string()));
        assert_eq!(tokens[3], (Some(TokenKind::Comment), "# there".to_string()));
        assert_eq!(tokens[5], (Some(TokenKind::Comment), "/* a\nb */".to_string()));
        assert_eq!(tokens[7], (Some(TokenKind::DocComment), "/** doc */".to_string()));
    }

    #[test]
    fn test_line_comment_stops_at_close_tag() {
        let tokens = kinds_and_texts("<?php // x ?>y");
        assert_eq!(tokens[1], (Some(TokenKind::Comment), "// x ".to_string()));
        assert_eq!(tokens[2], (Some(TokenKind::CloseTag), "?>".to_string()));
        assert_eq!(tokens[3], (Some(TokenKind::InlineHtml), "y".to_string()));
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_eof() {
        let tokens = kinds_and_texts("<?php /* open");
        assert_eq!(tokens[1], (Some(TokenKind::Comment), "/* open".to_string()));
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        let tokens = kinds_and_texts("<?php IF ElseIf die AND");
        assert_eq!(tokens[1].0, Some(TokenKind::If));
        assert_eq!(tokens[3].0, Some(TokenKind::ElseIf));
        assert_eq!(tokens[5].0, Some(TokenKind::Exit));
        assert_eq!(tokens[7].0, Some(TokenKind::LogicalAnd));
    }

    #[test]
    fn test_property_names_are_strings() {
        let tokens = kinds_and_texts("<?php $a->class");
        assert_eq!(tokens[2].0, Some(TokenKind::ObjectOperator));
        assert_eq!(tokens[3], (Some(TokenKind::String), "class".to_string()));
    }

    #[test]
    fn test_yield_from() {
        let tokens = kinds_and_texts("<?php yield  from $g;");
        assert_eq!(tokens[1], (Some(TokenKind::YieldFrom), "yield  from".to_string()));
    }

    #[test]
    fn test_names() {
        let tokens = kinds_and_texts("<?php Foo\\Bar \\Baz namespace\\Qux");
        assert_eq!(tokens[1], (Some(TokenKind::NameQualified), "Foo\\Bar".to_string()));
        assert_eq!(tokens[3], (Some(TokenKind::NameFullyQualified), "\\Baz".to_string()));
        assert_eq!(tokens[5], (Some(TokenKind::NameRelative), "namespace\\Qux".to_string()));
    }

    #[test]
    fn test_numbers() {
        let tokens = kinds_and_texts("<?php 1 0x1F 0b101 1_000 1.5 .5 1e3 9223372036854775808");
        let numbers: Vec<_> = tokens
            .iter()
            .filter(|(k, _)| *k != Some(TokenKind::Whitespace))
            .skip(1)
            .map(|(k, _)| k.unwrap())
            .collect();
        assert_eq!(
            numbers,
            vec![
                TokenKind::LNumber,
                TokenKind::LNumber,
                TokenKind::LNumber,
                TokenKind::LNumber,
                TokenKind::DNumber,
                TokenKind::DNumber,
                TokenKind::DNumber,
                TokenKind::DNumber,
            ]
        );
    }

    #[test]
    fn test_casts_and_operators() {
        let tokens = kinds_and_texts("<?php (int)$a === $b ?? $c->d;");
        assert_eq!(tokens[1], (Some(TokenKind::IntCast), "(int)".to_string()));
        assert_eq!(tokens[4].0, Some(TokenKind::IsIdentical));
        assert_eq!(tokens[8].0, Some(TokenKind::Coalesce));
        assert_eq!(tokens[11].0, Some(TokenKind::ObjectOperator));
        assert_eq!(tokens[13], (None, ";".to_string()));
    }

    #[test]
    fn test_plain_strings_are_atomic() {
        let tokens = kinds_and_texts("<?php 'a\\'b' \"c\\n\"");
        assert_eq!(
            tokens[1],
            (Some(TokenKind::ConstantEncapsedString), "'a\\'b'".to_string())
        );
        assert_eq!(
            tokens[3],
            (Some(TokenKind::ConstantEncapsedString), "\"c\\n\"".to_string())
        );
    }

    #[test]
    fn test_interpolated_string() {
        let tokens = kinds_and_texts("<?php \"a $b[0] {$c->d} ${e}\";");
        let expected: Vec<(Option<TokenKind>, &str)> = vec![
            (Some(TokenKind::OpenTag), "<?php "),
            (None, "\""),
            (Some(TokenKind::EncapsedAndWhitespace), "a "),
            (Some(TokenKind::Variable), "$b"),
            (None, "["),
            (Some(TokenKind::NumString), "0"),
            (None, "]"),
            (Some(TokenKind::EncapsedAndWhitespace), " "),
            (Some(TokenKind::CurlyOpen), "{"),
            (Some(TokenKind::Variable), "$c"),
            (Some(TokenKind::ObjectOperator), "->"),
            (Some(TokenKind::String), "d"),
            (None, "}"),
            (Some(TokenKind::EncapsedAndWhitespace), " "),
            (Some(TokenKind::DollarOpenCurlyBraces), "${"),
            (Some(TokenKind::StringVarname), "e"),
            (None, "}"),
            (None, "\""),
            (None, ";"),
        ];
        let expected: Vec<_> = expected
            .into_iter()
            .map(|(k, t)| (k, t.to_string()))
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn test_heredoc_and_nowdoc() {
        let tokens = kinds_and_texts("<?php <<<EOT\nhi $x\n  EOT;\n<<<'N'\nraw $y\nN;");
        assert_eq!(tokens[1], (Some(TokenKind::StartHeredoc), "<<<EOT\n".to_string()));
        assert_eq!(tokens[2], (Some(TokenKind::EncapsedAndWhitespace), "hi ".to_string()));
        assert_eq!(tokens[3], (Some(TokenKind::Variable), "$x".to_string()));
        assert_eq!(tokens[4], (Some(TokenKind::EncapsedAndWhitespace), "\n".to_string()));
        assert_eq!(tokens[5], (Some(TokenKind::EndHeredoc), "  EOT".to_string()));
        assert_eq!(tokens[8], (Some(TokenKind::StartHeredoc), "<<<'N'\n".to_string()));
        assert_eq!(
            tokens[9],
            (Some(TokenKind::EncapsedAndWhitespace), "raw $y\n".to_string())
        );
        assert_eq!(tokens[10], (Some(TokenKind::EndHeredoc), "N".to_string()));
    }

    #[test]
    fn test_unterminated_strings_run_to_eof() {
        let single = kinds_and_texts("<?php 'abc");
        assert_eq!(single[1], (Some(TokenKind::EncapsedAndWhitespace), "'abc".to_string()));

        let double = kinds_and_texts("<?php \"abc");
        assert_eq!(double[1], (None, "\"".to_string()));
        assert_eq!(double[2], (Some(TokenKind::EncapsedAndWhitespace), "abc".to_string()));
    }

    #[test]
    fn test_bad_character() {
        let tokens = kinds_and_texts("<?php \u{1}");
        assert_eq!(tokens[1], (Some(TokenKind::BadCharacter), "\u{1}".to_string()));
    }

    #[test]
    fn test_texts_reproduce_source() {
        let sources = [
            "<?php\n$x = 1;\n",
            "<html><?php if ($a) { echo \"x{$y[1]}z\"; } ?>\r\n</html>",
            "<?php <<<A\n  a\n  A . 'q'; // c",
            "<?php $é = 'ü'; \"$é\";",
        ];
        for source in sources {
            assert_eq!(concat(&tokenize(source)), source);
        }
    }
}
