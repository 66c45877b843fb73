//! Reference tokenizer seen through the public trait, one case per construct

use phpcase::php::reference::{PhpTokenizer, RawToken, ReferenceTokenizer};
use rstest::rstest;

/// `NAME:text` for typed tokens, `text` for bare ones, whitespace dropped
fn describe(source: &str) -> Vec<String> {
    let tokenizer = PhpTokenizer::new();
    tokenizer
        .tokenize(source)
        .iter()
        .filter(|t| !t.text().trim().is_empty())
        .map(|t| match t {
            RawToken::Typed { kind, text } => format!("{}:{}", tokenizer.kind_name(*kind), text),
            RawToken::Bare(text) => text.clone(),
        })
        .collect()
}

#[rstest]
#[case("<?php $x = 1;", &["T_OPEN_TAG:<?php ", "T_VARIABLE:$x", "=", "T_LNUMBER:1", ";"])]
#[case("<?= $a ?>", &["T_OPEN_TAG_WITH_ECHO:<?=", "T_VARIABLE:$a", "T_CLOSE_TAG:?>"])]
#[case("<?php echo 'hi';", &["T_OPEN_TAG:<?php ", "T_ECHO:echo", "T_CONSTANT_ENCAPSED_STRING:'hi'", ";"])]
#[case("<?php if ($a) {}", &["T_OPEN_TAG:<?php ", "T_IF:if", "(", "T_VARIABLE:$a", ")", "{", "}"])]
#[case("<?php $a->b;", &["T_OPEN_TAG:<?php ", "T_VARIABLE:$a", "T_OBJECT_OPERATOR:->", "T_STRING:b", ";"])]
#[case("<?php /** d */", &["T_OPEN_TAG:<?php ", "T_DOC_COMMENT:/** d */"])]
#[case("x<?php", &["T_INLINE_HTML:x", "T_OPEN_TAG:<?php"])]
fn test_token_table(#[case] source: &str, #[case] expected: &[&str]) {
    assert_eq!(describe(source), expected);
}

#[rstest]
#[case("")]
#[case("plain html\n")]
#[case("<?php\r\n$a .= \"x$b\";\r\n?>\r\ntail")]
#[case("<?php $s = <<<EOT\nline $v\nEOT;\n")]
#[case("<?php 'unterminated")]
fn test_texts_reproduce_source(#[case] source: &str) {
    let text: String = PhpTokenizer::new()
        .tokenize(source)
        .iter()
        .map(RawToken::text)
        .collect();
    assert_eq!(text, source);
}
