use std::collections::HashMap;
use lazy_static::lazy_static;
use crate::interpreter::ast::{BlockStatement, Expression, Identifier, Program, Statement};
use crate::interpreter::error::ParseFailure;
use crate::interpreter::lexer::Lexer;
use crate::interpreter::token::{Token, TokenType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

lazy_static! {
    static ref PRECEDENCES: HashMap<TokenType, Precedence> = HashMap::from([
        (TokenType::Equal, Precedence::Equals),
        (TokenType::NotEqual, Precedence::Equals),
        (TokenType::Less, Precedence::LessGreater),
        (TokenType::Greater, Precedence::LessGreater),
        (TokenType::Plus, Precedence::Sum),
        (TokenType::Minus, Precedence::Sum),
        (TokenType::Multiply, Precedence::Product),
        (TokenType::Divide, Precedence::Product),
        (TokenType::ParenthesisLeft, Precedence::Call),
        (TokenType::SquareBracketLeft, Precedence::Index),
    ]);
}

pub type ParseResult<T> = Result<T, ParseFailure>;

// `Ok(None)` means a syntax error was recorded and the enclosing statement is abandoned.
type PrefixParseFn<'source> = fn(&mut Parser<'source>) -> ParseResult<Option<Expression>>;
type InfixParseFn<'source> = fn(&mut Parser<'source>, Expression) -> ParseResult<Option<Expression>>;

pub struct Parser<'source> {
    lexer: Lexer<'source>,
    current: Token, peek: Token,

    prefix_parse_fns: HashMap<TokenType, PrefixParseFn<'source>>,
    infix_parse_fns: HashMap<TokenType, InfixParseFn<'source>>,

    errors: Vec<String>,
}

impl<'source> Parser<'source> {
    pub fn new(lexer: Lexer<'source>) -> Parser<'source> {
        let mut parser = Parser {
            lexer,
            current: Token::eof(), peek: Token::eof(),
            prefix_parse_fns: HashMap::new(),
            infix_parse_fns: HashMap::new(),
            errors: Vec::new(),
        };

        parser.register_prefix(TokenType::Identifier, Self::parse_identifier);
        parser.register_prefix(TokenType::Int, Self::parse_integer_literal);
        parser.register_prefix(TokenType::String, Self::parse_string_literal);
        parser.register_prefix(TokenType::True, Self::parse_boolean_literal);
        parser.register_prefix(TokenType::False, Self::parse_boolean_literal);
        parser.register_prefix(TokenType::Not, Self::parse_prefix_expression);
        parser.register_prefix(TokenType::Minus, Self::parse_prefix_expression);
        parser.register_prefix(TokenType::ParenthesisLeft, Self::parse_grouped_expression);
        parser.register_prefix(TokenType::If, Self::parse_if_expression);
        parser.register_prefix(TokenType::Function, Self::parse_function_literal);
        parser.register_prefix(TokenType::SquareBracketLeft, Self::parse_array_literal);
        parser.register_prefix(TokenType::BracketLeft, Self::parse_hash_literal);

        for operator in [TokenType::Plus, TokenType::Minus, TokenType::Multiply, TokenType::Divide,
            TokenType::Equal, TokenType::NotEqual, TokenType::Less, TokenType::Greater] {
            parser.register_infix(operator, Self::parse_infix_expression);
        }

        parser.register_infix(TokenType::ParenthesisLeft, Self::parse_call_expression);
        parser.register_infix(TokenType::SquareBracketLeft, Self::parse_index_expression);

        // Fill both current and peek
        parser.next_token();
        parser.next_token();
        parser
    }

    fn register_prefix(&mut self, token_type: TokenType, function: PrefixParseFn<'source>) {
        self.prefix_parse_fns.insert(token_type, function);
    }

    fn register_infix(&mut self, token_type: TokenType, function: InfixParseFn<'source>) {
        self.infix_parse_fns.insert(token_type, function);
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    // Statement parsing

    pub fn parse_program(&mut self) -> ParseResult<Program> {
        let mut program = Program::default();

        while !self.current_is(TokenType::Eof) {
            match self.parse_statement()? {
                Some(statement) => program.statements.push(statement),
                None => self.synchronize(false),
            }

            self.next_token();
        }

        Ok(program)
    }

    fn parse_statement(&mut self) -> ParseResult<Option<Statement>> {
        match self.current.token_type() {
            TokenType::Let => self.parse_let_statement(),
            TokenType::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_let_statement(&mut self) -> ParseResult<Option<Statement>> {
        let token = self.current.clone();

        if !self.expect_peek(TokenType::Identifier) {
            return Ok(None);
        }

        let name = Identifier::new(self.current.clone());

        if !self.expect_peek(TokenType::Assign) {
            return Ok(None);
        }

        self.next_token();
        let Some(value) = self.parse_expression(Precedence::Lowest)? else { return Ok(None) };
        self.skip_semicolon();

        Ok(Some(Statement::Let { token, name, value }))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Option<Statement>> {
        let token = self.current.clone();
        self.next_token();

        let Some(value) = self.parse_expression(Precedence::Lowest)? else { return Ok(None) };
        self.skip_semicolon();

        Ok(Some(Statement::Return { token, value }))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Option<Statement>> {
        let Some(expr) = self.parse_expression(Precedence::Lowest)? else { return Ok(None) };
        self.skip_semicolon();

        Ok(Some(Statement::Expression(expr)))
    }

    fn parse_block_statement(&mut self) -> ParseResult<Option<BlockStatement>> {
        let token = self.current.clone();
        let mut statements = Vec::new();

        self.next_token();

        while !self.current_is(TokenType::BracketRight) && !self.current_is(TokenType::Eof) {
            match self.parse_statement()? {
                Some(statement) => statements.push(statement),
                None => {
                    self.synchronize(true);

                    if self.current_is(TokenType::BracketRight) {
                        continue;
                    }
                },
            }

            self.next_token();
        }

        if self.current_is(TokenType::Eof) {
            self.error(format!("expected next token to be {}, got {}", TokenType::BracketRight, TokenType::Eof));
            return Ok(None);
        }

        Ok(Some(BlockStatement { token, statements }))
    }

    // Expression parsing

    pub fn parse_expression(&mut self, precedence: Precedence) -> ParseResult<Option<Expression>> {
        let Some(prefix) = self.prefix_parse_fns.get(&self.current.token_type()).copied() else {
            self.error(format!("no prefix parse function for {} found", self.current.token_type()));
            return Ok(None);
        };

        let Some(mut left) = prefix(self)? else { return Ok(None) };

        while !self.peek_is(TokenType::Semicolon) && precedence < self.peek_precedence() {
            let Some(infix) = self.infix_parse_fns.get(&self.peek.token_type()).copied() else {
                return Ok(Some(left));
            };

            self.next_token();

            left = match infix(self, left)? {
                Some(expr) => expr,
                None => return Ok(None),
            };
        }

        Ok(Some(left))
    }

    fn parse_identifier(&mut self) -> ParseResult<Option<Expression>> {
        Ok(Some(Expression::Identifier(Identifier::new(self.current.clone()))))
    }

    fn parse_integer_literal(&mut self) -> ParseResult<Option<Expression>> {
        let token = self.current.clone();
        let value = token.source().parse::<i64>()
            .map_err(|_| ParseFailure::InvalidInteger { literal: token.source().to_owned() })?;

        Ok(Some(Expression::IntegerLiteral { token, value }))
    }

    fn parse_string_literal(&mut self) -> ParseResult<Option<Expression>> {
        let token = self.current.clone();
        let value = token.source().to_owned();

        Ok(Some(Expression::StringLiteral { token, value }))
    }

    fn parse_boolean_literal(&mut self) -> ParseResult<Option<Expression>> {
        let token = self.current.clone();
        let value = token.is(TokenType::True);

        Ok(Some(Expression::BooleanLiteral { token, value }))
    }

    fn parse_prefix_expression(&mut self) -> ParseResult<Option<Expression>> {
        let operator = self.current.clone();
        self.next_token();

        let Some(operand) = self.parse_expression(Precedence::Prefix)? else { return Ok(None) };
        Ok(Some(Expression::Prefix { operator, operand: Box::new(operand) }))
    }

    fn parse_infix_expression(&mut self, left: Expression) -> ParseResult<Option<Expression>> {
        let operator = self.current.clone();
        let precedence = self.current_precedence();
        self.next_token();

        let Some(right) = self.parse_expression(precedence)? else { return Ok(None) };
        Ok(Some(Expression::Infix { left: Box::new(left), operator, right: Box::new(right) }))
    }

    fn parse_grouped_expression(&mut self) -> ParseResult<Option<Expression>> {
        self.next_token();

        let Some(expr) = self.parse_expression(Precedence::Lowest)? else { return Ok(None) };

        if !self.expect_peek(TokenType::ParenthesisRight) {
            return Ok(None);
        }

        Ok(Some(expr))
    }

    fn parse_if_expression(&mut self) -> ParseResult<Option<Expression>> {
        let token = self.current.clone();

        if !self.expect_peek(TokenType::ParenthesisLeft) {
            return Ok(None);
        }

        self.next_token();
        let Some(condition) = self.parse_expression(Precedence::Lowest)? else { return Ok(None) };

        if !self.expect_peek(TokenType::ParenthesisRight) || !self.expect_peek(TokenType::BracketLeft) {
            return Ok(None);
        }

        let Some(consequence) = self.parse_block_statement()? else { return Ok(None) };
        let mut alternative = None;

        if self.peek_is(TokenType::Else) {
            self.next_token();

            if !self.expect_peek(TokenType::BracketLeft) {
                return Ok(None);
            }

            let Some(block) = self.parse_block_statement()? else { return Ok(None) };
            alternative = Some(block);
        }

        Ok(Some(Expression::If { token, condition: Box::new(condition), consequence, alternative }))
    }

    fn parse_function_literal(&mut self) -> ParseResult<Option<Expression>> {
        let token = self.current.clone();

        if !self.expect_peek(TokenType::ParenthesisLeft) {
            return Ok(None);
        }

        let Some(parameters) = self.parse_function_parameters()? else { return Ok(None) };

        if !self.expect_peek(TokenType::BracketLeft) {
            return Ok(None);
        }

        let Some(body) = self.parse_block_statement()? else { return Ok(None) };
        Ok(Some(Expression::FunctionLiteral { token, parameters, body }))
    }

    fn parse_function_parameters(&mut self) -> ParseResult<Option<Vec<Identifier>>> {
        let mut parameters = Vec::new();

        if self.peek_is(TokenType::ParenthesisRight) {
            self.next_token();
            return Ok(Some(parameters));
        }

        if !self.expect_peek(TokenType::Identifier) {
            return Ok(None);
        }

        parameters.push(Identifier::new(self.current.clone()));

        while self.peek_is(TokenType::Comma) {
            self.next_token();

            if !self.expect_peek(TokenType::Identifier) {
                return Ok(None);
            }

            parameters.push(Identifier::new(self.current.clone()));
        }

        if !self.peek_is(TokenType::ParenthesisRight) {
            return Err(ParseFailure::UnterminatedParameters { got: self.peek.token_type() });
        }

        self.next_token();
        Ok(Some(parameters))
    }

    fn parse_call_expression(&mut self, callee: Expression) -> ParseResult<Option<Expression>> {
        let token = self.current.clone();
        let Some(arguments) = self.parse_expression_list(TokenType::ParenthesisRight)? else { return Ok(None) };

        Ok(Some(Expression::Call { callee: Box::new(callee), token, arguments }))
    }

    fn parse_index_expression(&mut self, collection: Expression) -> ParseResult<Option<Expression>> {
        let token = self.current.clone();
        self.next_token();

        let Some(index) = self.parse_expression(Precedence::Lowest)? else { return Ok(None) };

        if !self.expect_peek(TokenType::SquareBracketRight) {
            return Ok(None);
        }

        Ok(Some(Expression::Index { collection: Box::new(collection), token, index: Box::new(index) }))
    }

    fn parse_array_literal(&mut self) -> ParseResult<Option<Expression>> {
        let token = self.current.clone();
        let Some(elements) = self.parse_expression_list(TokenType::SquareBracketRight)? else { return Ok(None) };

        Ok(Some(Expression::ArrayLiteral { token, elements }))
    }

    fn parse_hash_literal(&mut self) -> ParseResult<Option<Expression>> {
        let token = self.current.clone();
        let mut pairs = Vec::new();

        while !self.peek_is(TokenType::BracketRight) {
            self.next_token();
            let Some(key) = self.parse_expression(Precedence::Lowest)? else { return Ok(None) };

            if !self.expect_peek(TokenType::Colon) {
                return Ok(None);
            }

            self.next_token();
            let Some(value) = self.parse_expression(Precedence::Lowest)? else { return Ok(None) };
            pairs.push((key, value));

            if !self.peek_is(TokenType::BracketRight) && !self.expect_peek(TokenType::Comma) {
                return Ok(None);
            }
        }

        self.next_token();
        Ok(Some(Expression::HashLiteral { token, pairs }))
    }

    fn parse_expression_list(&mut self, end: TokenType) -> ParseResult<Option<Vec<Expression>>> {
        let mut list = Vec::new();

        if self.peek_is(end) {
            self.next_token();
            return Ok(Some(list));
        }

        self.next_token();
        let Some(expr) = self.parse_expression(Precedence::Lowest)? else { return Ok(None) };
        list.push(expr);

        while self.peek_is(TokenType::Comma) {
            self.next_token();
            self.next_token();

            let Some(expr) = self.parse_expression(Precedence::Lowest)? else { return Ok(None) };
            list.push(expr);
        }

        if !self.peek_is(end) {
            return Err(ParseFailure::UnterminatedList { expected: end, got: self.peek.token_type() });
        }

        self.next_token();
        Ok(Some(list))
    }

    // Token handling

    fn next_token(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    fn expect_peek(&mut self, token_type: TokenType) -> bool {
        if self.peek_is(token_type) {
            self.next_token();
            return true;
        }

        self.error(format!("expected next token to be {}, got {}", token_type, self.peek.token_type()));
        false
    }

    fn skip_semicolon(&mut self) {
        if self.peek_is(TokenType::Semicolon) {
            self.next_token();
        }
    }

    #[inline]
    fn current_is(&self, token_type: TokenType) -> bool {
        self.current.is(token_type)
    }

    #[inline]
    fn peek_is(&self, token_type: TokenType) -> bool {
        self.peek.is(token_type)
    }

    fn peek_precedence(&self) -> Precedence {
        PRECEDENCES.get(&self.peek.token_type()).copied().unwrap_or(Precedence::Lowest)
    }

    fn current_precedence(&self) -> Precedence {
        PRECEDENCES.get(&self.current.token_type()).copied().unwrap_or(Precedence::Lowest)
    }

    // Error handling

    fn synchronize(&mut self, in_block: bool) {
        while !self.current_is(TokenType::Semicolon) && !self.current_is(TokenType::Eof) {
            if in_block && self.current_is(TokenType::BracketRight) {
                return;
            }

            self.next_token();
        }
    }

    fn error(&mut self, message: String) {
        tracing::debug!(%message, token = %self.current, "syntax error");
        self.errors.push(message);
    }
}

#[cfg(test)]
mod tests;
