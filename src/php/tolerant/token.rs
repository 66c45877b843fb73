//! Tokens produced by the tolerant lexer
//!
//! A tolerant token does not own its text. It records byte offsets into the source:
//!
//!     fullStart          start                     fullStart + length
//!     |  leading trivia  |  token text             |
//!
//! Whitespace and comments never become tokens of their own, they are the leading trivia of
//! the token that follows them. Tokens invented or dropped by the parser during error recovery
//! carry a [TokenError].

use serde::ser::{Serialize, SerializeStruct, Serializer};

macro_rules! token_kinds {
    ($($variant:ident,)*) => {
        /// Tolerant token category, named the way the JSON fixtures spell it
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TokenKind {
            $($variant,)*
        }

        impl TokenKind {
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$variant,)*];

            pub fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$variant => stringify!($variant),)*
                }
            }
        }
    };
}

token_kinds! {
    EndOfFileToken,
    Unknown,
    // Stands in for an expression the parser expected but did not find
    Expression,
    MemberName,

    Name,
    VariableName,
    InlineHtml,
    ScriptSectionStartTag,
    ScriptSectionEndTag,

    IntegerLiteralToken,
    FloatingLiteralToken,
    OctalLiteralToken,
    HexadecimalLiteralToken,
    BinaryLiteralToken,
    InvalidOctalLiteralToken,
    InvalidHexadecimalLiteral,
    InvalidBinaryLiteral,

    StringLiteralToken,
    EncapsedAndWhitespace,
    DoubleQuoteToken,
    OpenBraceDollarToken,
    DollarOpenBraceToken,
    StringVarname,
    HeredocStart,
    HeredocEnd,

    AbstractKeyword,
    AndKeyword,
    ArrayKeyword,
    AsKeyword,
    BreakKeyword,
    CallableKeyword,
    CaseKeyword,
    CatchKeyword,
    ClassKeyword,
    CloneKeyword,
    ConstKeyword,
    ContinueKeyword,
    DeclareKeyword,
    DefaultKeyword,
    DieKeyword,
    DoKeyword,
    EchoKeyword,
    ElseKeyword,
    ElseIfKeyword,
    EmptyKeyword,
    EndDeclareKeyword,
    EndForKeyword,
    EndForEachKeyword,
    EndIfKeyword,
    EndSwitchKeyword,
    EndWhileKeyword,
    EvalKeyword,
    ExitKeyword,
    ExtendsKeyword,
    FinalKeyword,
    FinallyKeyword,
    ForKeyword,
    ForeachKeyword,
    FunctionKeyword,
    GlobalKeyword,
    GotoKeyword,
    IfKeyword,
    ImplementsKeyword,
    IncludeKeyword,
    IncludeOnceKeyword,
    InstanceOfKeyword,
    InsteadOfKeyword,
    InterfaceKeyword,
    IsSetKeyword,
    ListKeyword,
    NamespaceKeyword,
    NewKeyword,
    OrKeyword,
    PrintKeyword,
    PrivateKeyword,
    ProtectedKeyword,
    PublicKeyword,
    RequireKeyword,
    RequireOnceKeyword,
    ReturnKeyword,
    StaticKeyword,
    SwitchKeyword,
    ThrowKeyword,
    TraitKeyword,
    TryKeyword,
    UnsetKeyword,
    UseKeyword,
    VarKeyword,
    WhileKeyword,
    XorKeyword,
    YieldKeyword,
    YieldFromKeyword,

    TrueReservedWord,
    FalseReservedWord,
    NullReservedWord,
    IntReservedWord,
    FloatReservedWord,
    BoolReservedWord,
    StringReservedWord,
    BinaryReservedWord,
    BooleanReservedWord,
    DoubleReservedWord,
    IntegerReservedWord,
    ObjectReservedWord,
    RealReservedWord,
    VoidReservedWord,

    ArrayCastToken,
    BoolCastToken,
    DoubleCastToken,
    IntCastToken,
    ObjectCastToken,
    StringCastToken,
    UnsetCastToken,

    OpenBracketToken,
    CloseBracketToken,
    OpenParenToken,
    CloseParenToken,
    OpenBraceToken,
    CloseBraceToken,
    DotToken,
    ArrowToken,
    DoubleArrowToken,
    PlusPlusToken,
    MinusMinusToken,
    AsteriskAsteriskToken,
    AsteriskToken,
    PlusToken,
    MinusToken,
    TildeToken,
    ExclamationToken,
    DollarToken,
    SlashToken,
    PercentToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    LessThanToken,
    GreaterThanToken,
    LessThanEqualsToken,
    LessThanEqualsGreaterThanToken,
    GreaterThanEqualsToken,
    EqualsEqualsToken,
    EqualsEqualsEqualsToken,
    ExclamationEqualsToken,
    ExclamationEqualsEqualsToken,
    CaretToken,
    BarToken,
    AmpersandToken,
    AmpersandAmpersandToken,
    BarBarToken,
    QuestionToken,
    ColonToken,
    ColonColonToken,
    SemicolonToken,
    EqualsToken,
    AsteriskAsteriskEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    DotEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    AmpersandEqualsToken,
    CaretEqualsToken,
    BarEqualsToken,
    CommaToken,
    QuestionQuestionToken,
    QuestionQuestionEqualsToken,
    LessThanGreaterThanToken,
    DotDotDotToken,
    BackslashToken,
    AtSymbolToken,
    BacktickToken,
}

impl TokenKind {
    pub fn is_keyword(self) -> bool {
        self.name().ends_with("Keyword")
    }

    pub fn is_reserved_word(self) -> bool {
        self.name().ends_with("ReservedWord")
    }

    pub fn is_numeric_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteralToken
                | TokenKind::FloatingLiteralToken
                | TokenKind::OctalLiteralToken
                | TokenKind::HexadecimalLiteralToken
                | TokenKind::BinaryLiteralToken
                | TokenKind::InvalidOctalLiteralToken
                | TokenKind::InvalidHexadecimalLiteral
                | TokenKind::InvalidBinaryLiteral
        )
    }

    pub fn is_cast(self) -> bool {
        matches!(
            self,
            TokenKind::ArrayCastToken
                | TokenKind::BoolCastToken
                | TokenKind::DoubleCastToken
                | TokenKind::IntCastToken
                | TokenKind::ObjectCastToken
                | TokenKind::StringCastToken
                | TokenKind::UnsetCastToken
        )
    }
}

impl Serialize for TokenKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Lowercased identifier to keyword
pub fn keyword(lower: &str) -> Option<TokenKind> {
    let kind = match lower {
        "abstract" => TokenKind::AbstractKeyword,
        "and" => TokenKind::AndKeyword,
        "array" => TokenKind::ArrayKeyword,
        "as" => TokenKind::AsKeyword,
        "break" => TokenKind::BreakKeyword,
        "callable" => TokenKind::CallableKeyword,
        "case" => TokenKind::CaseKeyword,
        "catch" => TokenKind::CatchKeyword,
        "class" => TokenKind::ClassKeyword,
        "clone" => TokenKind::CloneKeyword,
        "const" => TokenKind::ConstKeyword,
        "continue" => TokenKind::ContinueKeyword,
        "declare" => TokenKind::DeclareKeyword,
        "default" => TokenKind::DefaultKeyword,
        "die" => TokenKind::DieKeyword,
        "do" => TokenKind::DoKeyword,
        "echo" => TokenKind::EchoKeyword,
        "else" => TokenKind::ElseKeyword,
        "elseif" => TokenKind::ElseIfKeyword,
        "empty" => TokenKind::EmptyKeyword,
        "enddeclare" => TokenKind::EndDeclareKeyword,
        "endfor" => TokenKind::EndForKeyword,
        "endforeach" => TokenKind::EndForEachKeyword,
        "endif" => TokenKind::EndIfKeyword,
        "endswitch" => TokenKind::EndSwitchKeyword,
        "endwhile" => TokenKind::EndWhileKeyword,
        "eval" => TokenKind::EvalKeyword,
        "exit" => TokenKind::ExitKeyword,
        "extends" => TokenKind::ExtendsKeyword,
        "final" => TokenKind::FinalKeyword,
        "finally" => TokenKind::FinallyKeyword,
        "for" => TokenKind::ForKeyword,
        "foreach" => TokenKind::ForeachKeyword,
        "function" => TokenKind::FunctionKeyword,
        "global" => TokenKind::GlobalKeyword,
        "goto" => TokenKind::GotoKeyword,
        "if" => TokenKind::IfKeyword,
        "implements" => TokenKind::ImplementsKeyword,
        "include" => TokenKind::IncludeKeyword,
        "include_once" => TokenKind::IncludeOnceKeyword,
        "instanceof" => TokenKind::InstanceOfKeyword,
        "insteadof" => TokenKind::InsteadOfKeyword,
        "interface" => TokenKind::InterfaceKeyword,
        "isset" => TokenKind::IsSetKeyword,
        "list" => TokenKind::ListKeyword,
        "namespace" => TokenKind::NamespaceKeyword,
        "new" => TokenKind::NewKeyword,
        "or" => TokenKind::OrKeyword,
        "print" => TokenKind::PrintKeyword,
        "private" => TokenKind::PrivateKeyword,
        "protected" => TokenKind::ProtectedKeyword,
        "public" => TokenKind::PublicKeyword,
        "require" => TokenKind::RequireKeyword,
        "require_once" => TokenKind::RequireOnceKeyword,
        "return" => TokenKind::ReturnKeyword,
        "static" => TokenKind::StaticKeyword,
        "switch" => TokenKind::SwitchKeyword,
        "throw" => TokenKind::ThrowKeyword,
        "trait" => TokenKind::TraitKeyword,
        "try" => TokenKind::TryKeyword,
        "unset" => TokenKind::UnsetKeyword,
        "use" => TokenKind::UseKeyword,
        "var" => TokenKind::VarKeyword,
        "while" => TokenKind::WhileKeyword,
        "xor" => TokenKind::XorKeyword,
        "yield" => TokenKind::YieldKeyword,
        _ => return None,
    };
    Some(kind)
}

/// Lowercased identifier to reserved word
pub fn reserved_word(lower: &str) -> Option<TokenKind> {
    let kind = match lower {
        "true" => TokenKind::TrueReservedWord,
        "false" => TokenKind::FalseReservedWord,
        "null" => TokenKind::NullReservedWord,
        "int" => TokenKind::IntReservedWord,
        "float" => TokenKind::FloatReservedWord,
        "bool" => TokenKind::BoolReservedWord,
        "string" => TokenKind::StringReservedWord,
        "binary" => TokenKind::BinaryReservedWord,
        "boolean" => TokenKind::BooleanReservedWord,
        "double" => TokenKind::DoubleReservedWord,
        "integer" => TokenKind::IntegerReservedWord,
        "object" => TokenKind::ObjectReservedWord,
        "real" => TokenKind::RealReservedWord,
        "void" => TokenKind::VoidReservedWord,
        _ => return None,
    };
    Some(kind)
}

/// Recovery marker on a token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Expected by the grammar but absent from the source, always zero length
    MissingToken,
    /// Present in the source but not valid where it appeared
    SkippedToken,
}

impl TokenError {
    pub fn name(self) -> &'static str {
        match self {
            TokenError::MissingToken => "MissingToken",
            TokenError::SkippedToken => "SkippedToken",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub full_start: usize,
    pub start: usize,
    /// Length including the leading trivia
    pub length: usize,
    pub error: Option<TokenError>,
}

impl Token {
    pub fn new(kind: TokenKind, full_start: usize, start: usize, length: usize) -> Self {
        Self {
            kind,
            full_start,
            start,
            length,
            error: None,
        }
    }

    /// A zero-length placeholder for something the parser expected at `full_start`
    pub fn missing(kind: TokenKind, full_start: usize) -> Self {
        Self {
            kind,
            full_start,
            start: full_start,
            length: 0,
            error: Some(TokenError::MissingToken),
        }
    }

    pub fn skipped(self) -> Self {
        Self {
            error: Some(TokenError::SkippedToken),
            ..self
        }
    }

    pub fn is_missing(&self) -> bool {
        self.error == Some(TokenError::MissingToken)
    }

    /// Length of the token text without trivia
    pub fn text_length(&self) -> usize {
        self.length - (self.start - self.full_start)
    }

    pub fn end(&self) -> usize {
        self.full_start + self.length
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start..self.end()]
    }

    pub fn full_text<'s>(&self, source: &'s str) -> &'s str {
        &source[self.full_start..self.end()]
    }
}

impl Serialize for Token {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.error.is_some() { 5 } else { 4 };
        let mut state = serializer.serialize_struct("Token", len)?;
        if let Some(error) = self.error {
            state.serialize_field("error", error.name())?;
        }
        state.serialize_field("kind", &self.kind)?;
        state.serialize_field("fullStart", &self.full_start)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("length", &self.length)?;
        state.end()
    }
}

/// Short serialized form of a token, `{kind, textLength}`
#[derive(Debug, Clone, Copy)]
pub struct ShortToken<'a>(pub &'a Token);

impl Serialize for ShortToken<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Token", 2)?;
        state.serialize_field("kind", &self.0.kind)?;
        state.serialize_field("textLength", &self.0.text_length())?;
        state.end()
    }
}
