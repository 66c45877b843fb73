//! Tolerant recursive-descent parser
//!
//! The parser works on the full token vector from the tolerant lexer and never fails. Two
//! recovery rules keep it total:
//!
//! - `eat` on an unexpected token does not consume anything and returns a zero-length
//!   [Token::missing] placed at the current token's full start.
//! - A statement list that meets a token it cannot start a statement with asks every enclosing
//!   list whether the token means something there (a `}` closing a block, an `endif`). If one
//!   does, the inner list ends; otherwise the token is kept as a skipped token and parsing
//!   goes on.
//!
//! Binary expressions use precedence climbing over the table in [operator_precedence]:
//!
//!     or < xor < and < assignment < ?: < ?? < || < && < | < ^ < & < equality
//!        < relational < shifts < + - . < * / % < instanceof < **
//!
//! Non-associative operators (equality, relational, `instanceof`) do not chain: in
//! `$a == $b == $c` the second `==` is left for the caller.

use super::ast::{
    ArgumentExpression, ArgumentExpressionList, ArrayCreationExpression, ArrayElement,
    ArrayElementList, AssignmentExpression, BinaryExpression, BracedExpression, CallExpression,
    CastExpression, Child, CompoundStatementNode, EchoExpression, ElseClauseNode,
    ElseIfClauseNode, EmptyStatement, ErrorControlExpression, ExpressionList,
    ExpressionStatement, IfStatementNode, InlineHtml, MemberAccessExpression,
    NamedLabelStatement, Node, NumericLiteral, OneOrMany, ParenthesizedExpression,
    PostfixUpdateExpression, PrefixUpdateExpression, PrintIntrinsicExpression, QualifiedName,
    RelativeSpecifier, ReservedWord, ReturnStatement, SourceFileNode, StringLiteral,
    SubscriptExpression, TernaryExpression, UnaryOpExpression, Variable, WhileStatement,
};
use super::lexer;
use super::token::{Token, TokenKind};
use super::SyntaxParser;

/// Built-in tolerant parser
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }
}

impl SyntaxParser for Parser {
    type Tree = Node;

    fn parse_source_file(&self, source: &str) -> Node {
        ParseState::new(lexer::tokenize(source)).source_file()
    }
}

/// Lists that can be open while parsing. Each one knows which tokens end it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListContext {
    SourceElements,
    BlockStatements,
    IfClause2Elements,
    WhileStatementElements,
}

impl ListContext {
    const ALL: [ListContext; 4] = [
        ListContext::SourceElements,
        ListContext::BlockStatements,
        ListContext::IfClause2Elements,
        ListContext::WhileStatementElements,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }

    fn is_terminator(self, kind: TokenKind) -> bool {
        if kind == TokenKind::EndOfFileToken {
            return true;
        }
        match self {
            ListContext::SourceElements => false,
            ListContext::BlockStatements => kind == TokenKind::CloseBraceToken,
            ListContext::IfClause2Elements => matches!(
                kind,
                TokenKind::ElseIfKeyword | TokenKind::ElseKeyword | TokenKind::EndIfKeyword
            ),
            ListContext::WhileStatementElements => kind == TokenKind::EndWhileKeyword,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Associativity {
    None,
    Left,
    Right,
}

/// Binding strength of a binary operator token
fn operator_precedence(kind: TokenKind) -> Option<(u8, Associativity)> {
    use Associativity::{Left, None, Right};
    use TokenKind::*;

    let entry = match kind {
        OrKeyword => (6, Left),
        XorKeyword => (7, Left),
        AndKeyword => (8, Left),
        EqualsToken
        | PlusEqualsToken
        | MinusEqualsToken
        | AsteriskEqualsToken
        | AsteriskAsteriskEqualsToken
        | SlashEqualsToken
        | DotEqualsToken
        | PercentEqualsToken
        | AmpersandEqualsToken
        | BarEqualsToken
        | CaretEqualsToken
        | LessThanLessThanEqualsToken
        | GreaterThanGreaterThanEqualsToken
        | QuestionQuestionEqualsToken => (9, Right),
        QuestionToken => (10, Left),
        QuestionQuestionToken => (11, Right),
        BarBarToken => (12, Left),
        AmpersandAmpersandToken => (13, Left),
        BarToken => (14, Left),
        CaretToken => (15, Left),
        AmpersandToken => (16, Left),
        EqualsEqualsToken
        | ExclamationEqualsToken
        | LessThanGreaterThanToken
        | EqualsEqualsEqualsToken
        | ExclamationEqualsEqualsToken
        | LessThanEqualsGreaterThanToken => (17, None),
        LessThanToken | GreaterThanToken | LessThanEqualsToken | GreaterThanEqualsToken => {
            (18, None)
        }
        LessThanLessThanToken | GreaterThanGreaterThanToken => (19, Left),
        PlusToken | MinusToken | DotToken => (20, Left),
        AsteriskToken | SlashToken | PercentToken => (21, Left),
        InstanceOfKeyword => (22, None),
        AsteriskAsteriskToken => (23, Right),
        _ => return Option::None,
    };
    Some(entry)
}

/// The else branch of `?:` binds like an assignment
const TERNARY_ELSE_PRECEDENCE: u8 = 9;

const CAST_WORDS: &[TokenKind] = &[
    TokenKind::ArrayKeyword,
    TokenKind::BinaryReservedWord,
    TokenKind::BoolReservedWord,
    TokenKind::BooleanReservedWord,
    TokenKind::DoubleReservedWord,
    TokenKind::IntReservedWord,
    TokenKind::IntegerReservedWord,
    TokenKind::FloatReservedWord,
    TokenKind::ObjectReservedWord,
    TokenKind::RealReservedWord,
    TokenKind::StringReservedWord,
    TokenKind::UnsetKeyword,
];

struct ParseState {
    tokens: Vec<Token>,
    pos: usize,
    /// Bit set of open [ListContext]s
    contexts: u8,
}

impl ParseState {
    fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::EndOfFileToken) {
            let end = tokens.last().map_or(0, Token::end);
            tokens.push(Token::new(TokenKind::EndOfFileToken, end, end, 0));
        }
        Self {
            tokens,
            pos: 0,
            contexts: 0,
        }
    }

    fn token(&self) -> Token {
        self.peek(0)
    }

    fn peek(&self, offset: usize) -> Token {
        let last = self.tokens.len() - 1;
        self.tokens[(self.pos + offset).min(last)]
    }

    fn advance(&mut self) -> Token {
        let token = self.token();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.token().kind == kind
    }

    fn eat1(&mut self, kind: TokenKind) -> Token {
        let token = self.token();
        if token.kind == kind {
            self.advance()
        } else {
            Token::missing(kind, token.full_start)
        }
    }

    fn eat_optional1(&mut self, kind: TokenKind) -> Option<Token> {
        self.check(kind).then(|| self.advance())
    }

    /// `;` ends a statement unless a close tag does the job
    fn eat_semicolon_or_abort(&mut self) -> Option<Token> {
        if self.check(TokenKind::ScriptSectionEndTag) {
            None
        } else {
            Some(self.eat1(TokenKind::SemicolonToken))
        }
    }

    fn missing_expression(&self) -> Child {
        Child::Token(Token::missing(
            TokenKind::Expression,
            self.token().full_start,
        ))
    }

    fn source_file(mut self) -> Node {
        let mut statement_list = Vec::new();
        if !self.check(TokenKind::EndOfFileToken) {
            statement_list.push(self.inline_html());
        }
        statement_list.extend(self.list(ListContext::SourceElements));
        let end_of_file_token = self.eat1(TokenKind::EndOfFileToken);

        Node::from(SourceFileNode {
            statement_list,
            end_of_file_token,
        })
    }

    fn list(&mut self, context: ListContext) -> Vec<Child> {
        let saved = self.contexts;
        self.contexts |= context.bit();
        let mut children = Vec::new();

        loop {
            let token = self.token();
            if context.is_terminator(token.kind) {
                break;
            }

            if self.is_statement_start(token) {
                let before = self.pos;
                children.push(self.statement());
                if self.pos != before {
                    continue;
                }
            } else if self.is_valid_in_enclosing_contexts(token) {
                break;
            }

            // Nothing here can use this token, keep it and move on
            children.push(Child::Token(self.advance().skipped()));
        }

        self.contexts = saved;
        children
    }

    /// Every open list accepts the same statements, so only their terminators differ
    fn is_valid_in_enclosing_contexts(&self, token: Token) -> bool {
        ListContext::ALL
            .iter()
            .filter(|context| self.contexts & context.bit() != 0)
            .any(|context| context.is_terminator(token.kind))
    }

    fn is_statement_start(&self, token: Token) -> bool {
        matches!(
            token.kind,
            TokenKind::OpenBraceToken
                | TokenKind::IfKeyword
                | TokenKind::WhileKeyword
                | TokenKind::ReturnKeyword
                | TokenKind::SemicolonToken
                | TokenKind::ScriptSectionEndTag
                | TokenKind::Name
        ) || self.is_expression_start(token)
    }

    fn is_expression_start(&self, token: Token) -> bool {
        match token.kind {
            TokenKind::PlusToken
            | TokenKind::MinusToken
            | TokenKind::ExclamationToken
            | TokenKind::TildeToken
            | TokenKind::AtSymbolToken
            | TokenKind::PlusPlusToken
            | TokenKind::MinusMinusToken
            | TokenKind::VariableName
            | TokenKind::DollarToken
            | TokenKind::Name
            | TokenKind::BackslashToken
            | TokenKind::StringLiteralToken
            | TokenKind::EncapsedAndWhitespace
            | TokenKind::DoubleQuoteToken
            | TokenKind::HeredocStart
            | TokenKind::ArrayKeyword
            | TokenKind::OpenBracketToken
            | TokenKind::EchoKeyword
            | TokenKind::PrintKeyword
            | TokenKind::OpenParenToken => true,
            TokenKind::NamespaceKeyword => self.peek(1).kind == TokenKind::BackslashToken,
            kind => kind.is_numeric_literal() || kind.is_cast() || kind.is_reserved_word(),
        }
    }

    fn statement(&mut self) -> Child {
        match self.token().kind {
            TokenKind::OpenBraceToken => self.compound_statement(),
            TokenKind::Name if self.peek(1).kind == TokenKind::ColonToken => {
                self.named_label_statement()
            }
            TokenKind::IfKeyword => self.if_statement(),
            TokenKind::WhileKeyword => self.while_statement(),
            TokenKind::ReturnKeyword => self.return_statement(),
            TokenKind::SemicolonToken => Child::from(EmptyStatement {
                semicolon: self.advance(),
            }),
            TokenKind::ScriptSectionEndTag => self.inline_html(),
            _ => self.expression_statement(),
        }
    }

    fn inline_html(&mut self) -> Child {
        Child::from(InlineHtml {
            script_section_end_tag: self.eat_optional1(TokenKind::ScriptSectionEndTag),
            text: self.eat_optional1(TokenKind::InlineHtml),
            script_section_start_tag: self.eat_optional1(TokenKind::ScriptSectionStartTag),
        })
    }

    fn compound_statement(&mut self) -> Child {
        let open_brace = self.eat1(TokenKind::OpenBraceToken);
        let statements = self.list(ListContext::BlockStatements);
        let close_brace = self.eat1(TokenKind::CloseBraceToken);
        Child::from(CompoundStatementNode {
            open_brace,
            statements,
            close_brace,
        })
    }

    fn named_label_statement(&mut self) -> Child {
        let name = self.eat1(TokenKind::Name);
        let colon = self.eat1(TokenKind::ColonToken);
        let statement = self.statement();
        Child::from(NamedLabelStatement {
            name,
            colon,
            statement,
        })
    }

    /// Body of an `if`, `elseif`, `else` or `while`: a `:` list or a single statement
    fn clause_body(&mut self, colon: Option<Token>, context: ListContext) -> OneOrMany {
        if colon.is_some() {
            OneOrMany::Many(self.list(context))
        } else {
            OneOrMany::One(self.statement())
        }
    }

    fn if_statement(&mut self) -> Child {
        let if_keyword = self.eat1(TokenKind::IfKeyword);
        let open_paren = self.eat1(TokenKind::OpenParenToken);
        let expression = self.expression();
        let close_paren = self.eat1(TokenKind::CloseParenToken);
        let colon = self.eat_optional1(TokenKind::ColonToken);
        let statements = self.clause_body(colon, ListContext::IfClause2Elements);

        let mut else_if_clauses = Vec::new();
        while self.check(TokenKind::ElseIfKeyword) {
            else_if_clauses.push(self.else_if_clause());
        }
        let else_clause = self
            .check(TokenKind::ElseKeyword)
            .then(|| self.else_clause());

        let (endif_keyword, semicolon) = if colon.is_some() {
            let endif = self.eat1(TokenKind::EndIfKeyword);
            (Some(endif), self.eat_semicolon_or_abort())
        } else {
            (None, None)
        };

        Child::from(IfStatementNode {
            if_keyword,
            open_paren,
            expression,
            close_paren,
            colon,
            statements,
            else_if_clauses,
            else_clause,
            endif_keyword,
            semicolon,
        })
    }

    fn else_if_clause(&mut self) -> Child {
        let else_if_keyword = self.eat1(TokenKind::ElseIfKeyword);
        let open_paren = self.eat1(TokenKind::OpenParenToken);
        let expression = self.expression();
        let close_paren = self.eat1(TokenKind::CloseParenToken);
        let colon = self.eat_optional1(TokenKind::ColonToken);
        let statements = self.clause_body(colon, ListContext::IfClause2Elements);
        Child::from(ElseIfClauseNode {
            else_if_keyword,
            open_paren,
            expression,
            close_paren,
            colon,
            statements,
        })
    }

    fn else_clause(&mut self) -> Child {
        let else_keyword = self.eat1(TokenKind::ElseKeyword);
        let colon = self.eat_optional1(TokenKind::ColonToken);
        let statements = self.clause_body(colon, ListContext::IfClause2Elements);
        Child::from(ElseClauseNode {
            else_keyword,
            colon,
            statements,
        })
    }

    fn while_statement(&mut self) -> Child {
        let while_token = self.eat1(TokenKind::WhileKeyword);
        let open_paren = self.eat1(TokenKind::OpenParenToken);
        let expression = self.expression();
        let close_paren = self.eat1(TokenKind::CloseParenToken);
        let colon = self.eat_optional1(TokenKind::ColonToken);
        let statements = self.clause_body(colon, ListContext::WhileStatementElements);

        let (end_while, semicolon) = if colon.is_some() {
            let end = self.eat1(TokenKind::EndWhileKeyword);
            (Some(end), self.eat_semicolon_or_abort())
        } else {
            (None, None)
        };

        Child::from(WhileStatement {
            while_token,
            open_paren,
            expression,
            close_paren,
            colon,
            statements,
            end_while,
            semicolon,
        })
    }

    fn return_statement(&mut self) -> Child {
        let return_keyword = self.eat1(TokenKind::ReturnKeyword);
        let expression = self
            .is_expression_start(self.token())
            .then(|| self.expression());
        let semicolon = self.eat_semicolon_or_abort();
        Child::from(ReturnStatement {
            return_keyword,
            expression,
            semicolon,
        })
    }

    fn expression_statement(&mut self) -> Child {
        let expression = self.expression();
        let semicolon = self.eat_semicolon_or_abort();
        Child::from(ExpressionStatement {
            expression,
            semicolon,
        })
    }

    fn expression(&mut self) -> Child {
        if self.check(TokenKind::EndOfFileToken) {
            return self.missing_expression();
        }
        self.binary_expression(0)
    }

    fn binary_expression(&mut self, precedence: u8) -> Child {
        let mut left = self.unary_expression();
        let mut previous: Option<(u8, Associativity)> = None;

        loop {
            let token = self.token();
            let Some((new_precedence, associativity)) = operator_precedence(token.kind) else {
                break;
            };
            if previous == Some((new_precedence, Associativity::None)) {
                break;
            }
            let binds = match associativity {
                Associativity::Right => new_precedence >= precedence,
                _ => new_precedence > precedence,
            };
            if !binds {
                break;
            }
            self.advance();

            // `-$a ** 2` is `-($a ** 2)`
            let (operand, unary_operator) = if token.kind == TokenKind::AsteriskAsteriskToken {
                split_unary(left)
            } else {
                (left, None)
            };

            left = if token.kind == TokenKind::QuestionToken {
                self.ternary_expression(operand, token)
            } else {
                let by_ref = if token.kind == TokenKind::EqualsToken {
                    self.eat_optional1(TokenKind::AmpersandToken)
                } else {
                    None
                };
                let right_operand = self.binary_expression(new_precedence);
                make_binary(operand, token, by_ref, right_operand)
            };

            if let Some(operator) = unary_operator {
                left = Child::from(UnaryOpExpression {
                    operator,
                    operand: left,
                });
            }
            previous = Some((new_precedence, associativity));
        }

        left
    }

    fn ternary_expression(&mut self, condition: Child, question_token: Token) -> Child {
        let if_expression = self
            .is_expression_start(self.token())
            .then(|| self.expression());
        let colon_token = self.eat1(TokenKind::ColonToken);
        let else_expression = self.binary_expression(TERNARY_ELSE_PRECEDENCE);
        Child::from(TernaryExpression {
            condition,
            question_token,
            if_expression,
            colon_token,
            else_expression,
        })
    }

    fn unary_expression(&mut self) -> Child {
        let token = self.token();
        match token.kind {
            TokenKind::PlusToken
            | TokenKind::MinusToken
            | TokenKind::ExclamationToken
            | TokenKind::TildeToken => {
                let operator = self.advance();
                let operand = self.unary_expression();
                Child::from(UnaryOpExpression { operator, operand })
            }
            TokenKind::AtSymbolToken => {
                let operator = self.advance();
                let operand = self.unary_expression();
                Child::from(ErrorControlExpression { operator, operand })
            }
            TokenKind::PlusPlusToken | TokenKind::MinusMinusToken => {
                let increment_or_decrement_operator = self.advance();
                let mut operand = self.primary_expression();
                if !operand.is_missing() {
                    operand = self.postfix_expression_rest(operand, false);
                }
                Child::from(PrefixUpdateExpression {
                    increment_or_decrement_operator,
                    operand,
                })
            }
            kind if kind.is_cast() => {
                let cast_type = self.advance();
                let operand = self.unary_expression();
                Child::from(CastExpression {
                    open_paren: None,
                    cast_type,
                    close_paren: None,
                    operand,
                })
            }
            TokenKind::OpenParenToken
                if CAST_WORDS.contains(&self.peek(1).kind)
                    && self.peek(2).kind == TokenKind::CloseParenToken =>
            {
                let open_paren = self.advance();
                let cast_type = self.advance();
                let close_paren = self.advance();
                let operand = self.unary_expression();
                Child::from(CastExpression {
                    open_paren: Some(open_paren),
                    cast_type,
                    close_paren: Some(close_paren),
                    operand,
                })
            }
            _ => {
                let expression = self.primary_expression();
                self.postfix_expression_rest(expression, true)
            }
        }
    }

    fn postfix_expression_rest(&mut self, expression: Child, allow_update: bool) -> Child {
        if !accepts_postfix(&expression) {
            return expression;
        }

        let token = self.token();
        let expression = match token.kind {
            TokenKind::PlusPlusToken | TokenKind::MinusMinusToken if allow_update => {
                let increment_or_decrement_operator = self.advance();
                return Child::from(PostfixUpdateExpression {
                    operand: expression,
                    increment_or_decrement_operator,
                });
            }
            TokenKind::OpenBracketToken | TokenKind::OpenBraceToken => {
                self.subscript_expression(expression)
            }
            TokenKind::ArrowToken => self.member_access_expression(expression),
            TokenKind::OpenParenToken => self.call_expression(expression),
            _ => return expression,
        };
        self.postfix_expression_rest(expression, allow_update)
    }

    fn subscript_expression(&mut self, postfix_expression: Child) -> Child {
        let open_bracket_or_brace = self.advance();
        let access_expression = self
            .is_expression_start(self.token())
            .then(|| self.expression());
        let close_kind = if open_bracket_or_brace.kind == TokenKind::OpenBraceToken {
            TokenKind::CloseBraceToken
        } else {
            TokenKind::CloseBracketToken
        };
        let close_bracket_or_brace = self.eat1(close_kind);
        Child::from(SubscriptExpression {
            postfix_expression,
            open_bracket_or_brace,
            access_expression,
            close_bracket_or_brace,
        })
    }

    fn member_access_expression(&mut self, dereferencable_expression: Child) -> Child {
        let arrow_token = self.advance();
        let member_name = self.member_name();
        Child::from(MemberAccessExpression {
            dereferencable_expression,
            arrow_token,
            member_name,
        })
    }

    fn member_name(&mut self) -> Child {
        let token = self.token();
        match token.kind {
            TokenKind::Name => Child::Token(self.advance()),
            TokenKind::VariableName | TokenKind::DollarToken => self.simple_variable(),
            TokenKind::OpenBraceToken => self.braced_expression(),
            kind if kind.is_keyword() || kind.is_reserved_word() => Child::Token(Token {
                kind: TokenKind::Name,
                ..self.advance()
            }),
            _ => Child::Token(Token::missing(TokenKind::MemberName, token.full_start)),
        }
    }

    fn call_expression(&mut self, callable_expression: Child) -> Child {
        let open_paren = self.eat1(TokenKind::OpenParenToken);
        let argument_expression_list = self
            .delimited_list(
                TokenKind::CommaToken,
                Self::is_argument_start,
                Self::argument_expression,
                false,
            )
            .map(|children| Child::from(ArgumentExpressionList { children }));
        let close_paren = self.eat1(TokenKind::CloseParenToken);
        Child::from(CallExpression {
            callable_expression,
            open_paren,
            argument_expression_list,
            close_paren,
        })
    }

    fn is_argument_start(&self, token: Token) -> bool {
        matches!(
            token.kind,
            TokenKind::AmpersandToken | TokenKind::DotDotDotToken
        ) || self.is_expression_start(token)
    }

    fn argument_expression(&mut self) -> Child {
        let by_ref_token = self.eat_optional1(TokenKind::AmpersandToken);
        let dot_dot_dot_token = self.eat_optional1(TokenKind::DotDotDotToken);
        let expression = self.expression();
        Child::from(ArgumentExpression {
            by_ref_token,
            dot_dot_dot_token,
            expression,
        })
    }

    /// Elements separated by `delimiter`, delimiters included. `None` when nothing was parsed.
    fn delimited_list(
        &mut self,
        delimiter: TokenKind,
        is_element_start: fn(&Self, Token) -> bool,
        parse_element: fn(&mut Self) -> Child,
        allow_empty_elements: bool,
    ) -> Option<Vec<Child>> {
        let mut children = Vec::new();
        loop {
            let token = self.token();
            if is_element_start(self, token) {
                children.push(parse_element(self));
            } else if !allow_empty_elements || token.kind != delimiter {
                break;
            }
            match self.eat_optional1(delimiter) {
                Some(token) => children.push(Child::Token(token)),
                None => break,
            }
        }
        (!children.is_empty()).then_some(children)
    }

    fn primary_expression(&mut self) -> Child {
        let token = self.token();
        match token.kind {
            TokenKind::VariableName | TokenKind::DollarToken => self.simple_variable(),
            TokenKind::Name | TokenKind::BackslashToken | TokenKind::NamespaceKeyword => self
                .qualified_name()
                .unwrap_or_else(|| self.missing_expression()),
            kind if kind.is_numeric_literal() => Child::from(NumericLiteral {
                children: self.advance(),
            }),
            TokenKind::StringLiteralToken | TokenKind::EncapsedAndWhitespace => {
                Child::from(StringLiteral {
                    start_quote: None,
                    children: OneOrMany::One(Child::Token(self.advance())),
                    end_quote: None,
                })
            }
            TokenKind::DoubleQuoteToken | TokenKind::HeredocStart => self.template_string(),
            TokenKind::ArrayKeyword | TokenKind::OpenBracketToken => {
                self.array_creation_expression()
            }
            TokenKind::EchoKeyword => self.echo_expression(),
            TokenKind::PrintKeyword => {
                let print_keyword = self.advance();
                let expression = self.expression();
                Child::from(PrintIntrinsicExpression {
                    print_keyword,
                    expression,
                })
            }
            TokenKind::OpenParenToken => {
                let open_paren = self.advance();
                let expression = self.expression();
                let close_paren = self.eat1(TokenKind::CloseParenToken);
                Child::from(ParenthesizedExpression {
                    open_paren,
                    expression,
                    close_paren,
                })
            }
            TokenKind::TrueReservedWord
            | TokenKind::FalseReservedWord
            | TokenKind::NullReservedWord => {
                let qualified = matches!(
                    self.peek(1).kind,
                    TokenKind::BackslashToken
                        | TokenKind::ColonColonToken
                        | TokenKind::OpenParenToken
                );
                if qualified {
                    self.qualified_name()
                        .unwrap_or_else(|| self.missing_expression())
                } else {
                    Child::from(ReservedWord {
                        children: self.advance(),
                    })
                }
            }
            kind if kind.is_reserved_word() => self
                .qualified_name()
                .unwrap_or_else(|| self.missing_expression()),
            _ => self.missing_expression(),
        }
    }

    fn simple_variable(&mut self) -> Child {
        let token = self.token();
        match token.kind {
            TokenKind::DollarToken => {
                let dollar = self.advance();
                let name = match self.token().kind {
                    TokenKind::OpenBraceToken => self.braced_expression(),
                    TokenKind::VariableName
                    | TokenKind::StringVarname
                    | TokenKind::DollarToken => self.simple_variable(),
                    _ => Child::Token(Token::missing(
                        TokenKind::VariableName,
                        self.token().full_start,
                    )),
                };
                Child::from(Variable {
                    dollar: Some(dollar),
                    name,
                })
            }
            TokenKind::VariableName | TokenKind::StringVarname => Child::from(Variable {
                dollar: None,
                name: Child::Token(self.advance()),
            }),
            _ => Child::from(Variable {
                dollar: None,
                name: Child::Token(Token::missing(TokenKind::VariableName, token.full_start)),
            }),
        }
    }

    fn braced_expression(&mut self) -> Child {
        let open_brace = self.eat1(TokenKind::OpenBraceToken);
        let expression = self.expression();
        let close_brace = self.eat1(TokenKind::CloseBraceToken);
        Child::from(BracedExpression {
            open_brace,
            expression,
            close_brace,
        })
    }

    fn qualified_name(&mut self) -> Option<Child> {
        let global_specifier = self.eat_optional1(TokenKind::BackslashToken);
        let relative_specifier = if global_specifier.is_none()
            && self.check(TokenKind::NamespaceKeyword)
            && self.peek(1).kind == TokenKind::BackslashToken
        {
            let namespace_keyword = self.advance();
            let backslash = self.advance();
            Some(Child::from(RelativeSpecifier {
                namespace_keyword,
                backslash,
            }))
        } else {
            None
        };

        let mut name_parts = self.delimited_list(
            TokenKind::BackslashToken,
            Self::is_name_part_start,
            Self::name_part,
            false,
        );
        if name_parts.is_none() {
            if global_specifier.is_none() && relative_specifier.is_none() {
                return None;
            }
            let at = self.token().full_start;
            name_parts = Some(vec![Child::Token(Token::missing(TokenKind::Name, at))]);
        }

        Some(Child::from(QualifiedName {
            global_specifier,
            relative_specifier,
            name_parts,
        }))
    }

    fn is_name_part_start(&self, token: Token) -> bool {
        token.kind == TokenKind::Name || token.kind.is_keyword() || token.kind.is_reserved_word()
    }

    fn name_part(&mut self) -> Child {
        Child::Token(Token {
            kind: TokenKind::Name,
            ..self.advance()
        })
    }

    /// A double-quoted string or heredoc with interpolation
    fn template_string(&mut self) -> Child {
        let start_quote = self.advance();
        let end_kind = if start_quote.kind == TokenKind::HeredocStart {
            TokenKind::HeredocEnd
        } else {
            TokenKind::DoubleQuoteToken
        };

        let mut children = Vec::new();
        loop {
            let token = self.token();
            match token.kind {
                kind if kind == end_kind || kind == TokenKind::EndOfFileToken => break,
                TokenKind::DollarOpenBraceToken | TokenKind::OpenBraceDollarToken => {
                    children.push(Child::Token(self.advance()));
                    let inner = if token.kind == TokenKind::DollarOpenBraceToken
                        && self.check(TokenKind::StringVarname)
                    {
                        self.simple_variable()
                    } else {
                        self.expression()
                    };
                    children.push(inner);
                    children.push(Child::Token(self.eat1(TokenKind::CloseBraceToken)));
                }
                TokenKind::VariableName => children.push(self.template_expression()),
                _ => children.push(Child::Token(self.advance())),
            }
        }
        let end_quote = self.eat1(end_kind);

        Child::from(StringLiteral {
            start_quote: Some(start_quote),
            children: OneOrMany::Many(children),
            end_quote: Some(end_quote),
        })
    }

    /// `$name`, `$name[key]` or `$name->prop` inside a template
    fn template_expression(&mut self) -> Child {
        let variable = self.simple_variable();
        match self.token().kind {
            TokenKind::OpenBracketToken => {
                let open_bracket_or_brace = self.advance();
                let access_expression = self.template_subscript_key();
                let close_bracket_or_brace = self.eat1(TokenKind::CloseBracketToken);
                Child::from(SubscriptExpression {
                    postfix_expression: variable,
                    open_bracket_or_brace,
                    access_expression: Some(access_expression),
                    close_bracket_or_brace,
                })
            }
            TokenKind::ArrowToken => {
                let arrow_token = self.advance();
                let member_name = Child::Token(self.eat1(TokenKind::Name));
                Child::from(MemberAccessExpression {
                    dereferencable_expression: variable,
                    arrow_token,
                    member_name,
                })
            }
            _ => variable,
        }
    }

    fn template_subscript_key(&mut self) -> Child {
        match self.token().kind {
            TokenKind::VariableName => self.simple_variable(),
            TokenKind::IntegerLiteralToken => Child::from(NumericLiteral {
                children: self.advance(),
            }),
            TokenKind::MinusToken => {
                let operator = self.advance();
                let literal = self.eat1(TokenKind::IntegerLiteralToken);
                Child::from(UnaryOpExpression {
                    operator,
                    operand: Child::from(NumericLiteral { children: literal }),
                })
            }
            TokenKind::Name => Child::from(StringLiteral {
                start_quote: None,
                children: OneOrMany::One(Child::Token(self.advance())),
                end_quote: None,
            }),
            _ => self.missing_expression(),
        }
    }

    fn array_creation_expression(&mut self) -> Child {
        let array_keyword = self.eat_optional1(TokenKind::ArrayKeyword);
        let (open_kind, close_kind) = if array_keyword.is_some() {
            (TokenKind::OpenParenToken, TokenKind::CloseParenToken)
        } else {
            (TokenKind::OpenBracketToken, TokenKind::CloseBracketToken)
        };
        let open_paren_or_bracket = self.eat1(open_kind);
        let array_elements = self
            .delimited_list(
                TokenKind::CommaToken,
                Self::is_array_element_start,
                Self::array_element,
                true,
            )
            .map(|children| Child::from(ArrayElementList { children }));
        let close_paren_or_bracket = self.eat1(close_kind);

        Child::from(ArrayCreationExpression {
            array_keyword,
            open_paren_or_bracket,
            array_elements,
            close_paren_or_bracket,
        })
    }

    fn is_array_element_start(&self, token: Token) -> bool {
        token.kind == TokenKind::AmpersandToken || self.is_expression_start(token)
    }

    fn array_element(&mut self) -> Child {
        if let Some(by_ref) = self.eat_optional1(TokenKind::AmpersandToken) {
            let element_value = self.expression();
            return Child::from(ArrayElement {
                element_key: None,
                arrow_token: None,
                by_ref: Some(by_ref),
                element_value,
            });
        }

        let expression = self.expression();
        match self.eat_optional1(TokenKind::DoubleArrowToken) {
            Some(arrow_token) => {
                let by_ref = self.eat_optional1(TokenKind::AmpersandToken);
                let element_value = self.expression();
                Child::from(ArrayElement {
                    element_key: Some(expression),
                    arrow_token: Some(arrow_token),
                    by_ref,
                    element_value,
                })
            }
            None => Child::from(ArrayElement {
                element_key: None,
                arrow_token: None,
                by_ref: None,
                element_value: expression,
            }),
        }
    }

    fn echo_expression(&mut self) -> Child {
        let echo_keyword = self.advance();
        let expressions = self
            .delimited_list(
                TokenKind::CommaToken,
                Self::is_expression_start,
                Self::expression,
                false,
            )
            .map(|children| Child::from(ExpressionList { children }));
        Child::from(EchoExpression {
            echo_keyword,
            expressions,
        })
    }
}

/// Expressions that may be followed by `[`, `->`, `(` or a postfix `++`/`--`
fn accepts_postfix(expression: &Child) -> bool {
    matches!(
        expression.as_node(),
        Some(
            Node::Variable(_)
                | Node::ParenthesizedExpression(_)
                | Node::QualifiedName(_)
                | Node::CallExpression(_)
                | Node::MemberAccessExpression(_)
                | Node::SubscriptExpression(_)
                | Node::StringLiteral(_)
                | Node::ArrayCreationExpression(_)
        )
    )
}

/// Take a unary expression apart into its operand and operator
fn split_unary(expression: Child) -> (Child, Option<Token>) {
    match expression {
        Child::Node(node) => match *node {
            Node::UnaryOpExpression(unary) => (unary.operand, Some(unary.operator)),
            other => (Child::from(other), None),
        },
        token => (token, None),
    }
}

fn make_binary(
    left_operand: Child,
    operator: Token,
    by_ref: Option<Token>,
    right_operand: Child,
) -> Child {
    if operator.kind == TokenKind::EqualsToken {
        Child::from(AssignmentExpression {
            left_operand,
            operator,
            by_ref,
            right_operand,
        })
    } else {
        Child::from(BinaryExpression {
            left_operand,
            operator,
            right_operand,
        })
    }
}
