//! Token kinds reported by the reference tokenizer
//!
//! Each kind carries the numeric id and the `T_*` name that `token_get_all` / `token_name`
//! expose. Single-character punctuation has no kind at all: those tokens come back bare, see
//! [RawToken::Bare](super::RawToken::Bare).

macro_rules! token_kinds {
    ($($variant:ident = $id:literal => $name:literal,)*) => {
        /// A reference tokenizer category
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TokenKind {
            $($variant,)*
        }

        impl TokenKind {
            /// Every kind, in id order
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$variant,)*];

            /// Numeric id, as `token_get_all` reports it
            pub fn id(self) -> u16 {
                match self {
                    $(TokenKind::$variant => $id,)*
                }
            }

            /// Symbolic name, as `token_name` reports it
            pub fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $name,)*
                }
            }

            pub fn from_id(id: u16) -> Option<TokenKind> {
                match id {
                    $($id => Some(TokenKind::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

token_kinds! {
    LNumber = 260 => "T_LNUMBER",
    DNumber = 261 => "T_DNUMBER",
    String = 262 => "T_STRING",
    NameFullyQualified = 263 => "T_NAME_FULLY_QUALIFIED",
    NameRelative = 264 => "T_NAME_RELATIVE",
    NameQualified = 265 => "T_NAME_QUALIFIED",
    Variable = 266 => "T_VARIABLE",
    InlineHtml = 267 => "T_INLINE_HTML",
    EncapsedAndWhitespace = 268 => "T_ENCAPSED_AND_WHITESPACE",
    ConstantEncapsedString = 269 => "T_CONSTANT_ENCAPSED_STRING",
    StringVarname = 270 => "T_STRING_VARNAME",
    NumString = 271 => "T_NUM_STRING",
    Include = 272 => "T_INCLUDE",
    IncludeOnce = 273 => "T_INCLUDE_ONCE",
    Eval = 274 => "T_EVAL",
    Require = 275 => "T_REQUIRE",
    RequireOnce = 276 => "T_REQUIRE_ONCE",
    LogicalOr = 277 => "T_LOGICAL_OR",
    LogicalXor = 278 => "T_LOGICAL_XOR",
    LogicalAnd = 279 => "T_LOGICAL_AND",
    Print = 280 => "T_PRINT",
    Yield = 281 => "T_YIELD",
    YieldFrom = 282 => "T_YIELD_FROM",
    Instanceof = 283 => "T_INSTANCEOF",
    New = 284 => "T_NEW",
    Clone = 285 => "T_CLONE",
    Exit = 286 => "T_EXIT",
    If = 287 => "T_IF",
    ElseIf = 288 => "T_ELSEIF",
    Else = 289 => "T_ELSE",
    EndIf = 290 => "T_ENDIF",
    Echo = 291 => "T_ECHO",
    Do = 292 => "T_DO",
    While = 293 => "T_WHILE",
    EndWhile = 294 => "T_ENDWHILE",
    For = 295 => "T_FOR",
    EndFor = 296 => "T_ENDFOR",
    Foreach = 297 => "T_FOREACH",
    EndForeach = 298 => "T_ENDFOREACH",
    Declare = 299 => "T_DECLARE",
    EndDeclare = 300 => "T_ENDDECLARE",
    As = 301 => "T_AS",
    Switch = 302 => "T_SWITCH",
    EndSwitch = 303 => "T_ENDSWITCH",
    Case = 304 => "T_CASE",
    Default = 305 => "T_DEFAULT",
    Match = 306 => "T_MATCH",
    Break = 307 => "T_BREAK",
    Continue = 308 => "T_CONTINUE",
    Goto = 309 => "T_GOTO",
    Function = 310 => "T_FUNCTION",
    Fn = 311 => "T_FN",
    Const = 312 => "T_CONST",
    Return = 313 => "T_RETURN",
    Try = 314 => "T_TRY",
    Catch = 315 => "T_CATCH",
    Finally = 316 => "T_FINALLY",
    Throw = 317 => "T_THROW",
    Use = 318 => "T_USE",
    Insteadof = 319 => "T_INSTEADOF",
    Global = 320 => "T_GLOBAL",
    Static = 321 => "T_STATIC",
    Abstract = 322 => "T_ABSTRACT",
    Final = 323 => "T_FINAL",
    Private = 324 => "T_PRIVATE",
    Protected = 325 => "T_PROTECTED",
    Public = 326 => "T_PUBLIC",
    Readonly = 327 => "T_READONLY",
    Var = 328 => "T_VAR",
    Unset = 329 => "T_UNSET",
    Isset = 330 => "T_ISSET",
    Empty = 331 => "T_EMPTY",
    HaltCompiler = 332 => "T_HALT_COMPILER",
    Class = 333 => "T_CLASS",
    Trait = 334 => "T_TRAIT",
    Interface = 335 => "T_INTERFACE",
    Enum = 336 => "T_ENUM",
    Extends = 337 => "T_EXTENDS",
    Implements = 338 => "T_IMPLEMENTS",
    Namespace = 339 => "T_NAMESPACE",
    List = 340 => "T_LIST",
    Array = 341 => "T_ARRAY",
    Callable = 342 => "T_CALLABLE",
    Line = 343 => "T_LINE",
    File = 344 => "T_FILE",
    Dir = 345 => "T_DIR",
    ClassC = 346 => "T_CLASS_C",
    TraitC = 347 => "T_TRAIT_C",
    MethodC = 348 => "T_METHOD_C",
    FuncC = 349 => "T_FUNC_C",
    NsC = 350 => "T_NS_C",
    Attribute = 351 => "T_ATTRIBUTE",
    PlusEqual = 352 => "T_PLUS_EQUAL",
    MinusEqual = 353 => "T_MINUS_EQUAL",
    MulEqual = 354 => "T_MUL_EQUAL",
    DivEqual = 355 => "T_DIV_EQUAL",
    ConcatEqual = 356 => "T_CONCAT_EQUAL",
    ModEqual = 357 => "T_MOD_EQUAL",
    AndEqual = 358 => "T_AND_EQUAL",
    OrEqual = 359 => "T_OR_EQUAL",
    XorEqual = 360 => "T_XOR_EQUAL",
    SlEqual = 361 => "T_SL_EQUAL",
    SrEqual = 362 => "T_SR_EQUAL",
    CoalesceEqual = 363 => "T_COALESCE_EQUAL",
    BooleanOr = 364 => "T_BOOLEAN_OR",
    BooleanAnd = 365 => "T_BOOLEAN_AND",
    IsEqual = 366 => "T_IS_EQUAL",
    IsNotEqual = 367 => "T_IS_NOT_EQUAL",
    IsIdentical = 368 => "T_IS_IDENTICAL",
    IsNotIdentical = 369 => "T_IS_NOT_IDENTICAL",
    IsSmallerOrEqual = 370 => "T_IS_SMALLER_OR_EQUAL",
    IsGreaterOrEqual = 371 => "T_IS_GREATER_OR_EQUAL",
    Spaceship = 372 => "T_SPACESHIP",
    Sl = 373 => "T_SL",
    Sr = 374 => "T_SR",
    Inc = 375 => "T_INC",
    Dec = 376 => "T_DEC",
    IntCast = 377 => "T_INT_CAST",
    DoubleCast = 378 => "T_DOUBLE_CAST",
    StringCast = 379 => "T_STRING_CAST",
    ArrayCast = 380 => "T_ARRAY_CAST",
    ObjectCast = 381 => "T_OBJECT_CAST",
    BoolCast = 382 => "T_BOOL_CAST",
    UnsetCast = 383 => "T_UNSET_CAST",
    ObjectOperator = 384 => "T_OBJECT_OPERATOR",
    NullsafeObjectOperator = 385 => "T_NULLSAFE_OBJECT_OPERATOR",
    DoubleArrow = 386 => "T_DOUBLE_ARROW",
    Comment = 387 => "T_COMMENT",
    DocComment = 388 => "T_DOC_COMMENT",
    OpenTag = 389 => "T_OPEN_TAG",
    OpenTagWithEcho = 390 => "T_OPEN_TAG_WITH_ECHO",
    CloseTag = 391 => "T_CLOSE_TAG",
    Whitespace = 392 => "T_WHITESPACE",
    StartHeredoc = 393 => "T_START_HEREDOC",
    EndHeredoc = 394 => "T_END_HEREDOC",
    DollarOpenCurlyBraces = 395 => "T_DOLLAR_OPEN_CURLY_BRACES",
    CurlyOpen = 396 => "T_CURLY_OPEN",
    PaamayimNekudotayim = 397 => "T_PAAMAYIM_NEKUDOTAYIM",
    NsSeparator = 398 => "T_NS_SEPARATOR",
    Ellipsis = 399 => "T_ELLIPSIS",
    Coalesce = 400 => "T_COALESCE",
    Pow = 401 => "T_POW",
    PowEqual = 402 => "T_POW_EQUAL",
    BadCharacter = 405 => "T_BAD_CHARACTER",
}

/// Keyword lookup for an identifier, already lowercased by the caller
pub fn keyword(lower: &str) -> Option<TokenKind> {
    let kind = match lower {
        "abstract" => TokenKind::Abstract,
        "and" => TokenKind::LogicalAnd,
        "array" => TokenKind::Array,
        "as" => TokenKind::As,
        "break" => TokenKind::Break,
        "callable" => TokenKind::Callable,
        "case" => TokenKind::Case,
        "catch" => TokenKind::Catch,
        "class" => TokenKind::Class,
        "clone" => TokenKind::Clone,
        "const" => TokenKind::Const,
        "continue" => TokenKind::Continue,
        "declare" => TokenKind::Declare,
        "default" => TokenKind::Default,
        "die" | "exit" => TokenKind::Exit,
        "do" => TokenKind::Do,
        "echo" => TokenKind::Echo,
        "else" => TokenKind::Else,
        "elseif" => TokenKind::ElseIf,
        "empty" => TokenKind::Empty,
        "enddeclare" => TokenKind::EndDeclare,
        "endfor" => TokenKind::EndFor,
        "endforeach" => TokenKind::EndForeach,
        "endif" => TokenKind::EndIf,
        "endswitch" => TokenKind::EndSwitch,
        "endwhile" => TokenKind::EndWhile,
        "enum" => TokenKind::Enum,
        "eval" => TokenKind::Eval,
        "extends" => TokenKind::Extends,
        "final" => TokenKind::Final,
        "finally" => TokenKind::Finally,
        "fn" => TokenKind::Fn,
        "for" => TokenKind::For,
        "foreach" => TokenKind::Foreach,
        "function" => TokenKind::Function,
        "global" => TokenKind::Global,
        "goto" => TokenKind::Goto,
        "if" => TokenKind::If,
        "implements" => TokenKind::Implements,
        "include" => TokenKind::Include,
        "include_once" => TokenKind::IncludeOnce,
        "instanceof" => TokenKind::Instanceof,
        "insteadof" => TokenKind::Insteadof,
        "interface" => TokenKind::Interface,
        "isset" => TokenKind::Isset,
        "list" => TokenKind::List,
        "match" => TokenKind::Match,
        "namespace" => TokenKind::Namespace,
        "new" => TokenKind::New,
        "or" => TokenKind::LogicalOr,
        "print" => TokenKind::Print,
        "private" => TokenKind::Private,
        "protected" => TokenKind::Protected,
        "public" => TokenKind::Public,
        "readonly" => TokenKind::Readonly,
        "require" => TokenKind::Require,
        "require_once" => TokenKind::RequireOnce,
        "return" => TokenKind::Return,
        "static" => TokenKind::Static,
        "switch" => TokenKind::Switch,
        "throw" => TokenKind::Throw,
        "trait" => TokenKind::Trait,
        "try" => TokenKind::Try,
        "unset" => TokenKind::Unset,
        "use" => TokenKind::Use,
        "var" => TokenKind::Var,
        "while" => TokenKind::While,
        "xor" => TokenKind::LogicalXor,
        "yield" => TokenKind::Yield,
        "__halt_compiler" => TokenKind::HaltCompiler,
        "__class__" => TokenKind::ClassC,
        "__dir__" => TokenKind::Dir,
        "__file__" => TokenKind::File,
        "__function__" => TokenKind::FuncC,
        "__line__" => TokenKind::Line,
        "__method__" => TokenKind::MethodC,
        "__namespace__" => TokenKind::NsC,
        "__trait__" => TokenKind::TraitC,
        _ => return None,
    };
    Some(kind)
}

/// Kind of a multi-character operator lexeme
pub fn operator(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "==" => TokenKind::IsEqual,
        "!=" | "<>" => TokenKind::IsNotEqual,
        "===" => TokenKind::IsIdentical,
        "!==" => TokenKind::IsNotIdentical,
        "<=" => TokenKind::IsSmallerOrEqual,
        ">=" => TokenKind::IsGreaterOrEqual,
        "<=>" => TokenKind::Spaceship,
        "=>" => TokenKind::DoubleArrow,
        "->" => TokenKind::ObjectOperator,
        "?->" => TokenKind::NullsafeObjectOperator,
        "::" => TokenKind::PaamayimNekudotayim,
        "++" => TokenKind::Inc,
        "--" => TokenKind::Dec,
        "+=" => TokenKind::PlusEqual,
        "-=" => TokenKind::MinusEqual,
        "*=" => TokenKind::MulEqual,
        "/=" => TokenKind::DivEqual,
        ".=" => TokenKind::ConcatEqual,
        "%=" => TokenKind::ModEqual,
        "&=" => TokenKind::AndEqual,
        "|=" => TokenKind::OrEqual,
        "^=" => TokenKind::XorEqual,
        "<<=" => TokenKind::SlEqual,
        ">>=" => TokenKind::SrEqual,
        "??=" => TokenKind::CoalesceEqual,
        "||" => TokenKind::BooleanOr,
        "&&" => TokenKind::BooleanAnd,
        "??" => TokenKind::Coalesce,
        "<<" => TokenKind::Sl,
        ">>" => TokenKind::Sr,
        "**" => TokenKind::Pow,
        "**=" => TokenKind::PowEqual,
        "..." => TokenKind::Ellipsis,
        "\\" => TokenKind::NsSeparator,
        "#[" => TokenKind::Attribute,
        _ => return None,
    };
    Some(kind)
}

/// Kind of a `(type)` cast lexeme, whitespace and case insensitive
pub fn cast(text: &str) -> Option<TokenKind> {
    let inner = text
        .strip_prefix('(')?
        .strip_suffix(')')?
        .trim_matches(|c| c == ' ' || c == '\t')
        .to_ascii_lowercase();
    let kind = match inner.as_str() {
        "int" | "integer" => TokenKind::IntCast,
        "bool" | "boolean" => TokenKind::BoolCast,
        "float" | "double" | "real" => TokenKind::DoubleCast,
        "string" | "binary" => TokenKind::StringCast,
        "array" => TokenKind::ArrayCast,
        "object" => TokenKind::ObjectCast,
        "unset" => TokenKind::UnsetCast,
        _ => return None,
    };
    Some(kind)
}
