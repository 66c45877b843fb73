//! Tolerant parser totality and tree shape

use phpcase::php::tolerant::{Parser, SyntaxParser};
use proptest::prelude::*;
use serde_json::Value;

fn parse(source: &str) -> Value {
    serde_json::to_value(Parser::new().parse_source_file(source)).unwrap()
}

/// Sum of the lengths of every token in the tree, missing tokens included
fn covered_length(value: &Value) -> u64 {
    match value {
        Value::Object(map) if map.contains_key("kind") && map.contains_key("length") => {
            map["length"].as_u64().unwrap_or(0)
        }
        Value::Object(map) => map.values().map(covered_length).sum(),
        Value::Array(items) => items.iter().map(covered_length).sum(),
        _ => 0,
    }
}

fn statement_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("if ($a) ".to_string()),
        Just("if ($a): ".to_string()),
        Just("elseif ($b): ".to_string()),
        Just("else ".to_string()),
        Just("endif; ".to_string()),
        Just("while (1): ".to_string()),
        Just("endwhile; ".to_string()),
        Just("{ ".to_string()),
        Just("} ".to_string()),
        Just("return ".to_string()),
        Just("echo ".to_string()),
        Just("print ".to_string()),
        Just("label: ".to_string()),
        Just("array(".to_string()),
        Just("[1 => &$x, ".to_string()),
        Just("\"a $b[0] {$c->d}\"".to_string()),
        Just("(int)".to_string()),
        Just("?> html <?php ".to_string()),
        "[$a-z0-9]{1,4}",
        "[-+*/=.?:;,()\\[\\]!@&|<>]{1,3}",
    ]
}

proptest! {
    #[test]
    fn test_statement_soup_parses(parts in prop::collection::vec(statement_fragment(), 0..32)) {
        let source = format!("<?php {}", parts.concat());
        let tree = parse(&source);
        let eof = &tree["SourceFileNode"]["endOfFileToken"];
        prop_assert_eq!(eof["kind"].as_str(), Some("EndOfFileToken"));
        prop_assert_eq!(covered_length(&tree), source.len() as u64);
    }

    #[test]
    fn test_arbitrary_input_parses(source in "\\PC{0,80}") {
        let tree = parse(&source);
        prop_assert!(tree["SourceFileNode"]["endOfFileToken"].is_object());
        prop_assert_eq!(covered_length(&tree), source.len() as u64);
    }
}

#[test]
fn test_alternative_syntax_if() {
    let tree = parse("<?php if ($a): echo 1; elseif ($b): echo 2; else: echo 3; endif;");
    let if_node = &tree["SourceFileNode"]["statementList"][1]["IfStatementNode"];
    assert_eq!(if_node["colon"]["kind"], "ColonToken");
    assert_eq!(if_node["elseIfClauses"].as_array().map(Vec::len), Some(1));
    assert_eq!(if_node["elseClause"]["ElseClauseNode"]["colon"]["kind"], "ColonToken");
    assert_eq!(if_node["endifKeyword"]["kind"], "EndIfKeyword");
    assert!(if_node["semicolon"]["error"].is_null());
}

#[test]
fn test_unclosed_block_gets_missing_brace() {
    let tree = parse("<?php { $a;");
    let block = &tree["SourceFileNode"]["statementList"][1]["CompoundStatementNode"];
    assert_eq!(block["closeBrace"]["error"], "MissingToken");
    assert_eq!(block["closeBrace"]["length"], 0);
}

#[test]
fn test_stray_close_brace_is_skipped() {
    let tree = parse("<?php } $a;");
    let stray = &tree["SourceFileNode"]["statementList"][1];
    assert_eq!(stray["error"], "SkippedToken");
    assert_eq!(stray["kind"], "CloseBraceToken");
}
