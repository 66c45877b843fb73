//! Syntax tree built by the tolerant parser
//!
//! Every node serializes as a single-key object naming its type, with the node's fields in
//! source order and camelCase keys:
//!
//!     {"ReturnStatement": {"returnKeyword": {...}, "expression": {...}, "semicolon": {...}}}
//!
//! A field holds a token, a node, `null` for an optional part that is absent, or a list. List
//! fields mix nodes and tokens (delimiters, skipped tokens), hence [Child].

use super::token::Token;
use serde::Serialize;

/// An element of the tree, either a node or a leaf token
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Child {
    Node(Box<Node>),
    Token(Token),
}

impl Child {
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            Child::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&Token> {
        match self {
            Child::Token(token) => Some(token),
            Child::Node(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.as_token().is_some_and(Token::is_missing)
    }
}

impl From<Token> for Child {
    fn from(token: Token) -> Self {
        Child::Token(token)
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(Box::new(node))
    }
}

/// A field that holds either a single element or a list of them, like the body of an `if`
/// that may be one statement or a `:` block
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(Child),
    Many(Vec<Child>),
}

macro_rules! nodes {
    ($($name:ident { $($field:ident: $ty:ty,)* })*) => {
        $(
            #[derive(Debug, Clone, PartialEq, Serialize)]
            #[serde(rename_all = "camelCase")]
            pub struct $name {
                $(pub $field: $ty,)*
            }

            impl From<$name> for Node {
                fn from(node: $name) -> Self {
                    Node::$name(node)
                }
            }

            impl From<$name> for Child {
                fn from(node: $name) -> Self {
                    Child::from(Node::$name(node))
                }
            }
        )*

        #[derive(Debug, Clone, PartialEq, Serialize)]
        pub enum Node {
            $($name($name),)*
        }

        impl Node {
            pub fn type_name(&self) -> &'static str {
                match self {
                    $(Node::$name(_) => stringify!($name),)*
                }
            }
        }
    };
}

nodes! {
    SourceFileNode {
        statement_list: Vec<Child>,
        end_of_file_token: Token,
    }
    InlineHtml {
        script_section_end_tag: Option<Token>,
        text: Option<Token>,
        script_section_start_tag: Option<Token>,
    }
    CompoundStatementNode {
        open_brace: Token,
        statements: Vec<Child>,
        close_brace: Token,
    }
    IfStatementNode {
        if_keyword: Token,
        open_paren: Token,
        expression: Child,
        close_paren: Token,
        colon: Option<Token>,
        statements: OneOrMany,
        else_if_clauses: Vec<Child>,
        else_clause: Option<Child>,
        endif_keyword: Option<Token>,
        semicolon: Option<Token>,
    }
    ElseIfClauseNode {
        else_if_keyword: Token,
        open_paren: Token,
        expression: Child,
        close_paren: Token,
        colon: Option<Token>,
        statements: OneOrMany,
    }
    ElseClauseNode {
        else_keyword: Token,
        colon: Option<Token>,
        statements: OneOrMany,
    }
    WhileStatement {
        while_token: Token,
        open_paren: Token,
        expression: Child,
        close_paren: Token,
        colon: Option<Token>,
        statements: OneOrMany,
        end_while: Option<Token>,
        semicolon: Option<Token>,
    }
    NamedLabelStatement {
        name: Token,
        colon: Token,
        statement: Child,
    }
    ReturnStatement {
        return_keyword: Token,
        expression: Option<Child>,
        semicolon: Option<Token>,
    }
    EmptyStatement {
        semicolon: Token,
    }
    ExpressionStatement {
        expression: Child,
        semicolon: Option<Token>,
    }
    BinaryExpression {
        left_operand: Child,
        operator: Token,
        right_operand: Child,
    }
    AssignmentExpression {
        left_operand: Child,
        operator: Token,
        by_ref: Option<Token>,
        right_operand: Child,
    }
    TernaryExpression {
        condition: Child,
        question_token: Token,
        if_expression: Option<Child>,
        colon_token: Token,
        else_expression: Child,
    }
    UnaryOpExpression {
        operator: Token,
        operand: Child,
    }
    ErrorControlExpression {
        operator: Token,
        operand: Child,
    }
    CastExpression {
        open_paren: Option<Token>,
        cast_type: Token,
        close_paren: Option<Token>,
        operand: Child,
    }
    PrefixUpdateExpression {
        increment_or_decrement_operator: Token,
        operand: Child,
    }
    PostfixUpdateExpression {
        operand: Child,
        increment_or_decrement_operator: Token,
    }
    CallExpression {
        callable_expression: Child,
        open_paren: Token,
        argument_expression_list: Option<Child>,
        close_paren: Token,
    }
    ArgumentExpressionList {
        children: Vec<Child>,
    }
    ArgumentExpression {
        by_ref_token: Option<Token>,
        dot_dot_dot_token: Option<Token>,
        expression: Child,
    }
    MemberAccessExpression {
        dereferencable_expression: Child,
        arrow_token: Token,
        member_name: Child,
    }
    SubscriptExpression {
        postfix_expression: Child,
        open_bracket_or_brace: Token,
        access_expression: Option<Child>,
        close_bracket_or_brace: Token,
    }
    Variable {
        dollar: Option<Token>,
        name: Child,
    }
    BracedExpression {
        open_brace: Token,
        expression: Child,
        close_brace: Token,
    }
    QualifiedName {
        global_specifier: Option<Token>,
        relative_specifier: Option<Child>,
        name_parts: Option<Vec<Child>>,
    }
    RelativeSpecifier {
        namespace_keyword: Token,
        backslash: Token,
    }
    NumericLiteral {
        children: Token,
    }
    StringLiteral {
        start_quote: Option<Token>,
        children: OneOrMany,
        end_quote: Option<Token>,
    }
    ReservedWord {
        children: Token,
    }
    ParenthesizedExpression {
        open_paren: Token,
        expression: Child,
        close_paren: Token,
    }
    ArrayCreationExpression {
        array_keyword: Option<Token>,
        open_paren_or_bracket: Token,
        array_elements: Option<Child>,
        close_paren_or_bracket: Token,
    }
    ArrayElementList {
        children: Vec<Child>,
    }
    ArrayElement {
        element_key: Option<Child>,
        arrow_token: Option<Token>,
        by_ref: Option<Token>,
        element_value: Child,
    }
    EchoExpression {
        echo_keyword: Token,
        expressions: Option<Child>,
    }
    ExpressionList {
        children: Vec<Child>,
    }
    PrintIntrinsicExpression {
        print_keyword: Token,
        expression: Child,
    }
}
