//! JSON rendering for tolerant analyzer output
//!
//! Two independent switches shape the `scan` output: [JsonStyle] picks compact or indented
//! JSON, [TokenForm] picks which fields each token carries. Both are passed explicitly to every
//! call. Tree output is always indented.
//!
//! Indentation is four spaces, and `/` is never escaped (serde_json does not escape it).

use crate::php::tolerant::token::{ShortToken, Token};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    Compact,
    Pretty,
}

/// Which fields a serialized token carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenForm {
    /// `{kind, fullStart, start, length}`
    #[default]
    Full,
    /// `{kind, textLength}`
    Short,
}

/// A token slice serialized in a chosen [TokenForm]
pub struct TokenArray<'a> {
    pub tokens: &'a [Token],
    pub form: TokenForm,
}

impl Serialize for TokenArray<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.tokens.len()))?;
        for token in self.tokens {
            match self.form {
                TokenForm::Full => seq.serialize_element(token)?,
                TokenForm::Short => seq.serialize_element(&ShortToken(token))?,
            }
        }
        seq.end()
    }
}

pub fn to_json<T: Serialize + ?Sized>(
    value: &T,
    style: JsonStyle,
) -> Result<String, serde_json::Error> {
    match style {
        JsonStyle::Compact => serde_json::to_string(value),
        JsonStyle::Pretty => {
            let mut out = Vec::new();
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
            value.serialize(&mut serializer)?;
            // serde_json only emits UTF-8
            Ok(String::from_utf8_lossy(&out).into_owned())
        }
    }
}

/// Render a tolerant token stream
pub fn tokens_json(
    tokens: &[Token],
    style: JsonStyle,
    form: TokenForm,
) -> Result<String, serde_json::Error> {
    to_json(&TokenArray { tokens, form }, style)
}

/// Render a syntax tree: indented, with `\r\n` folded to `\n`
pub fn tree_json<T: Serialize + ?Sized>(tree: &T) -> Result<String, serde_json::Error> {
    let json = to_json(tree, JsonStyle::Pretty)?;
    Ok(json.replace("\r\n", "\n"))
}
