use std::str::Chars;
use crate::interpreter::token::{self, Token, TokenType};
use crate::util;

pub struct Lexer<'source> {
    input: &'source str,

    chars: Chars<'source>,
    peek_1: Option<char>,

    start_index: usize,
    current_index: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Lexer<'source> {
        Lexer {
            input: source,

            chars: source.chars(),
            peek_1: None,

            start_index: 0,
            current_index: 0,
        }
    }

    /// Scans the next token. Once the input is exhausted every call returns `Eof`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();
        self.start_index = self.current_index;

        let c = match self.consume() {
            Some(c) => c,
            None => return Token::eof(),
        };

        match c {
            '(' => self.make_token(TokenType::ParenthesisLeft),
            ')' => self.make_token(TokenType::ParenthesisRight),
            '{' => self.make_token(TokenType::BracketLeft),
            '}' => self.make_token(TokenType::BracketRight),
            '[' => self.make_token(TokenType::SquareBracketLeft),
            ']' => self.make_token(TokenType::SquareBracketRight),
            ',' => self.make_token(TokenType::Comma),
            ';' => self.make_token(TokenType::Semicolon),
            ':' => self.make_token(TokenType::Colon),

            '=' => if self.expect('=') { self.make_token(TokenType::Equal) } else {
                self.make_token(TokenType::Assign)
            },
            '!' => if self.expect('=') { self.make_token(TokenType::NotEqual) } else {
                self.make_token(TokenType::Not)
            },
            '>' => self.make_token(TokenType::Greater),
            '<' => self.make_token(TokenType::Less),

            '+' => self.make_token(TokenType::Plus),
            '-' => self.make_token(TokenType::Minus),
            '*' => self.make_token(TokenType::Multiply),
            '/' => self.make_token(TokenType::Divide),

            '"' => self.scan_string(),
            c if util::is_numeric(c) => self.scan_number(),
            c if util::is_alphabetic(c) => self.scan_identifier(),

            _ => self.make_token(TokenType::Illegal),
        }
    }

    fn scan_string(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }

            self.consume();
        }

        if self.consume().is_none() {
            // Ran into the end of input before the closing '"'
            return self.make_token(TokenType::Illegal);
        }

        // Don't add leading and trailing '"' characters to token
        Token::new(TokenType::String, &self.input[(self.start_index + 1)..(self.current_index - 1)])
    }

    fn scan_number(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !util::is_numeric(c) {
                break;
            }

            self.consume();
        }

        self.make_token(TokenType::Int)
    }

    fn scan_identifier(&mut self) -> Token {
        while let Some(c) = self.peek() {
            if !util::is_alphabetic(c) {
                break;
            }

            self.consume();
        }

        let name = &self.input[self.start_index..self.current_index];
        Token::new(token::lookup_identifier(name), name)
    }

    fn make_token(&self, token_type: TokenType) -> Token {
        Token::new(token_type, &self.input[self.start_index..self.current_index])
    }

    fn consume(&mut self) -> Option<char> {
        let c = self.peek_1.take().or_else(|| self.chars.next())?;
        self.current_index += c.len_utf8();
        Some(c)
    }

    fn peek(&mut self) -> Option<char> {
        if self.peek_1.is_none() {
            self.peek_1 = self.chars.next();
        }

        self.peek_1
    }

    fn expect(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.consume();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !util::is_whitespace(c) {
                return;
            }

            self.consume();
        }
    }
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (!token.is(TokenType::Eof)).then_some(token)
    }
}
