//! Single-file inspection
//!
//! An [Inspector] owns one analyzer of each kind and renders a file in one of three modes:
//!
//!     tokens   reference tokenizer + newline normalization, as a text dump
//!     scan     tolerant lexer, as a JSON token array
//!     parse    tolerant parser, as an indented JSON tree
//!
//! The tokens dump starts with a banner holding the file content, then one line per token:
//!
//!     file:
//!      <?php
//!     echo 1;
//!
//!
//!     *******************
//!     T_OPEN_TAG: `<?php`
//!     T_NEW_LINE: `
//!     `
//!     T_ECHO: `echo`
//!     ...
//!     `;`
//!
//! Rendering never touches the filesystem beyond reading the source. Scan output style and token
//! form are fields of the inspector, set once by the caller.

use crate::php::error::PhpCaseError;
use crate::php::normalization::{normalize, Token};
use crate::php::reference::{PhpTokenizer, ReferenceTokenizer};
use crate::php::serialize::{self, JsonStyle, TokenForm};
use crate::php::tolerant::{Parser, SyntaxParser, TolerantLexer, TolerantScanner};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Display name of the isolated line break kind
pub const NEW_LINE_NAME: &str = "T_NEW_LINE";

const BANNER_RULE: &str = "*******************";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Tokens,
    Scan,
    Parse,
}

impl Mode {
    pub fn name(self) -> &'static str {
        match self {
            Mode::Tokens => "tokens",
            Mode::Scan => "scan",
            Mode::Parse => "parse",
        }
    }
}

pub struct Inspector<T, L, P> {
    tokenizer: T,
    lexer: L,
    parser: P,
    json_style: JsonStyle,
    token_form: TokenForm,
}

impl Inspector<PhpTokenizer, TolerantScanner, Parser> {
    /// Inspector wired to the analyzers shipped with the crate
    pub fn builtin() -> Self {
        Inspector::new(PhpTokenizer::new(), TolerantScanner::new(), Parser::new())
    }
}

impl Default for Inspector<PhpTokenizer, TolerantScanner, Parser> {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<T, L, P> Inspector<T, L, P>
where
    T: ReferenceTokenizer,
    L: TolerantLexer,
    P: SyntaxParser,
{
    pub fn new(tokenizer: T, lexer: L, parser: P) -> Self {
        Self {
            tokenizer,
            lexer,
            parser,
            json_style: JsonStyle::Compact,
            token_form: TokenForm::Full,
        }
    }

    pub fn with_json_style(mut self, style: JsonStyle) -> Self {
        self.json_style = style;
        self
    }

    pub fn with_token_form(mut self, form: TokenForm) -> Self {
        self.token_form = form;
        self
    }

    /// Read `path` and render it in `mode`
    pub fn inspect(&self, path: &Path, mode: Mode) -> Result<String, PhpCaseError> {
        debug!(target: "phpcase::inspect", mode = mode.name(), path = %path.display(), "inspecting");
        let source = read_source(path)?;
        self.render(&source, mode)
    }

    pub fn render(&self, source: &str, mode: Mode) -> Result<String, PhpCaseError> {
        let rendered = match mode {
            Mode::Tokens => self.tokens_dump(source),
            Mode::Scan => self.scan(source, self.json_style, self.token_form)?,
            Mode::Parse => self.parse(source)?,
        };
        Ok(rendered)
    }

    /// Banner followed by one line per normalized reference token
    pub fn tokens_dump(&self, source: &str) -> String {
        let tokens = normalize(&self.tokenizer.tokenize(source));
        let mut out = String::with_capacity(source.len() * 4);
        let _ = write!(out, "file:\n {source}\n\n{BANNER_RULE}\n");

        for token in &tokens {
            let _ = match token {
                Token::Typed { kind, text } => {
                    writeln!(out, "{}: `{}`", self.tokenizer.kind_name(*kind), text)
                }
                Token::Newline(line_break) => {
                    writeln!(out, "{NEW_LINE_NAME}: `{}`", line_break.as_str())
                }
                Token::Bare { text } => writeln!(out, "`{text}`"),
            };
        }
        out
    }

    /// Tolerant token stream as JSON
    pub fn scan(
        &self,
        source: &str,
        style: JsonStyle,
        form: TokenForm,
    ) -> Result<String, serde_json::Error> {
        let tokens = self.lexer.get_tokens(source);
        serialize::tokens_json(&tokens, style, form)
    }

    /// Tolerant syntax tree as indented JSON
    pub fn parse(&self, source: &str) -> Result<String, serde_json::Error> {
        let tree = self.parser.parse_source_file(source);
        serialize::tree_json(&tree)
    }
}

/// Read a source file. Bytes that are not valid UTF-8 are replaced, the analyzers only work on
/// text.
pub fn read_source(path: &Path) -> Result<String, PhpCaseError> {
    let bytes = fs::read(path).map_err(|source| PhpCaseError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::php::reference::{RawToken, TokenKind};
    use crate::php::tolerant::token::{Token as TolerantToken, TokenKind as TolerantKind};
    use insta::assert_snapshot;
    use std::borrow::Cow;

    /// Splits on spaces, the words become `T_STRING`
    struct WordTokenizer;

    impl ReferenceTokenizer for WordTokenizer {
        fn tokenize(&self, source: &str) -> Vec<RawToken> {
            source
                .split_inclusive(' ')
                .map(|word| RawToken::typed(TokenKind::String, word))
                .collect()
        }

        fn kind_name(&self, _kind: TokenKind) -> Cow<'static, str> {
            Cow::Borrowed("WORD")
        }
    }

    /// One token for the whole file
    struct WholeFileLexer;

    impl TolerantLexer for WholeFileLexer {
        fn get_tokens(&self, source: &str) -> Vec<TolerantToken> {
            vec![TolerantToken::new(
                TolerantKind::InlineHtml,
                0,
                0,
                source.len(),
            )]
        }
    }

    struct LengthParser;

    impl SyntaxParser for LengthParser {
        type Tree = serde_json::Value;

        fn parse_source_file(&self, source: &str) -> serde_json::Value {
            serde_json::json!({ "length": source.len() })
        }
    }

    fn stub() -> Inspector<WordTokenizer, WholeFileLexer, LengthParser> {
        Inspector::new(WordTokenizer, WholeFileLexer, LengthParser)
    }

    #[test]
    fn test_tokens_dump_layout() {
        let dump = Inspector::builtin().tokens_dump("<?php\n$x;");
        assert_snapshot!(dump, @r###"
        file:
         <?php
        $x;

        *******************
        T_OPEN_TAG: `<?php`
        T_NEW_LINE: `
        `
        T_VARIABLE: `$x`
        `;`
        "###);
    }

    #[test]
    fn test_tokens_dump_uses_tokenizer_names() {
        let dump = stub().tokens_dump("a b\nc");
        assert!(dump.contains("WORD: `a `\n"));
        assert!(dump.contains("WORD: `b`\nT_NEW_LINE: `\n`\nWORD: `c`\n"));
    }

    #[test]
    fn test_scan_honours_style_and_form() {
        let inspector = stub()
            .with_json_style(JsonStyle::Compact)
            .with_token_form(TokenForm::Short);
        assert_eq!(
            inspector.render("abc", Mode::Scan).unwrap(),
            r#"[{"kind":"InlineHtml","textLength":3}]"#
        );
    }

    #[test]
    fn test_parse_is_pretty() {
        assert_eq!(
            stub().render("abcd", Mode::Parse).unwrap(),
            "{\n    \"length\": 4\n}"
        );
    }

    #[test]
    fn test_builtin_scan() {
        let json = Inspector::builtin().render("<?php ", Mode::Scan).unwrap();
        assert_eq!(
            json,
            r#"[{"kind":"ScriptSectionStartTag","fullStart":0,"start":0,"length":6},{"kind":"EndOfFileToken","fullStart":6,"start":6,"length":0}]"#
        );
    }

    #[test]
    fn test_missing_file_is_file_access_error() {
        let err = stub()
            .inspect(Path::new("/no/such/file.php"), Mode::Tokens)
            .unwrap_err();
        assert!(matches!(err, PhpCaseError::FileAccess { .. }));
    }

    #[test]
    fn test_read_source_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("latin1.php");
        fs::write(&path, b"<?php '\xe9';").unwrap();
        let source = read_source(&path).unwrap();
        assert!(source.contains('\u{FFFD}'));
    }
}
