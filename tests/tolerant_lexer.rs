//! Tolerant lexer coverage: the tokens' full spans tile the source, whatever the source is

use phpcase::php::tolerant::lexer::tokenize;
use phpcase::php::tolerant::{Token, TokenKind};
use proptest::prelude::*;

fn check_tiling(source: &str, tokens: &[Token]) -> Result<(), TestCaseError> {
    let mut expected = 0;
    for token in tokens {
        prop_assert_eq!(token.full_start, expected, "gap before {:?}", token);
        prop_assert!(token.start >= token.full_start);
        prop_assert!(token.start <= token.end());
        expected = token.end();
    }
    prop_assert_eq!(expected, source.len());
    prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfFileToken));
    Ok(())
}

/// Fragments that exercise every hand-written scanner in the lexer
fn php_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("<?php ".to_string()),
        Just("<?= ".to_string()),
        Just("?>".to_string()),
        Just("\n".to_string()),
        Just("\r\n".to_string()),
        Just("\"".to_string()),
        Just("'".to_string()),
        Just("{$".to_string()),
        Just("${".to_string()),
        Just("}".to_string()),
        Just("<<<EOT\n".to_string()),
        Just("EOT;".to_string()),
        Just("/*".to_string()),
        Just("*/".to_string()),
        Just("// ".to_string()),
        Just("->".to_string()),
        Just("(int)".to_string()),
        Just("\\".to_string()),
        "[a-z$0-9_.x]{1,6}",
        "[ =+*;,()\\[\\]#?:-]{1,3}",
        "[é中]{1,2}",
    ]
}

proptest! {
    #[test]
    fn test_fragments_tile(parts in prop::collection::vec(php_fragment(), 0..24)) {
        let source = parts.concat();
        check_tiling(&source, &tokenize(&source))?;
    }

    #[test]
    fn test_arbitrary_script_tiles(body in "\\PC{0,64}") {
        let source = format!("<?php {body}");
        check_tiling(&source, &tokenize(&source))?;
    }
}

#[test]
fn test_only_the_last_token_is_end_of_file() {
    let tokens = tokenize("<?php echo $a; ?>tail");
    let eof_count = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::EndOfFileToken)
        .count();
    assert_eq!(eof_count, 1);
    assert_eq!(tokens[tokens.len() - 2].kind, TokenKind::InlineHtml);
}
