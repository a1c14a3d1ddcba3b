use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenType {
    Illegal,

    ParenthesisLeft, ParenthesisRight,
    BracketLeft, BracketRight,
    SquareBracketLeft, SquareBracketRight,
    Comma, Semicolon, Colon,

    Assign, Equal,
    Not, NotEqual,
    Greater, Less,

    Plus, Minus,
    Multiply, Divide,

    Identifier,
    Int,
    String,

    // Keywords
    Function,
    Let,
    True, False,
    If, Else,
    Return,

    // EOF
    Eof,
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TokenType::Illegal => "ILLEGAL",
            TokenType::ParenthesisLeft => "(",
            TokenType::ParenthesisRight => ")",
            TokenType::BracketLeft => "{",
            TokenType::BracketRight => "}",
            TokenType::SquareBracketLeft => "[",
            TokenType::SquareBracketRight => "]",
            TokenType::Comma => ",",
            TokenType::Semicolon => ";",
            TokenType::Colon => ":",
            TokenType::Assign => "=",
            TokenType::Equal => "==",
            TokenType::Not => "!",
            TokenType::NotEqual => "!=",
            TokenType::Greater => ">",
            TokenType::Less => "<",
            TokenType::Plus => "+",
            TokenType::Minus => "-",
            TokenType::Multiply => "*",
            TokenType::Divide => "/",
            TokenType::Identifier => "IDENT",
            TokenType::Int => "INT",
            TokenType::String => "STRING",
            TokenType::Function => "FUNCTION",
            TokenType::Let => "LET",
            TokenType::True => "TRUE",
            TokenType::False => "FALSE",
            TokenType::If => "IF",
            TokenType::Else => "ELSE",
            TokenType::Return => "RETURN",
            TokenType::Eof => "END_OF_FILE",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    token_type: TokenType,
    source: String,
}

impl Token {
    pub fn new(token_type: TokenType, source: impl Into<String>) -> Token {
        Token { token_type, source: source.into() }
    }

    pub fn eof() -> Token {
        Token::new(TokenType::Eof, "")
    }

    pub fn token_type(&self) -> TokenType { self.token_type }
    pub fn source(&self) -> &str { &self.source }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type == token_type
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.token_type {
            TokenType::Eof => f.write_str("END_OF_FILE"),
            TokenType::String => write!(f, "STRING(\"{}\")", self.source),
            _ => write!(f, "{}({})", self.token_type, self.source),
        }
    }
}

/// Maps an identifier-shaped word to its keyword token type, or `Identifier` if it is none.
pub fn lookup_identifier(name: &str) -> TokenType {
    let mut chars = name.chars();

    match chars.next() {
        Some('e') => check_keyword(name, 1, "else", TokenType::Else),
        Some('f') => match chars.next() {
            Some('a') => check_keyword(name, 2, "false", TokenType::False),
            Some('n') => check_keyword(name, 2, "fn", TokenType::Function),
            _ => TokenType::Identifier,
        },
        Some('i') => check_keyword(name, 1, "if", TokenType::If),
        Some('l') => check_keyword(name, 1, "let", TokenType::Let),
        Some('r') => check_keyword(name, 1, "return", TokenType::Return),
        Some('t') => check_keyword(name, 1, "true", TokenType::True),
        _ => TokenType::Identifier,
    }
}

fn check_keyword(name: &str, start: usize, keyword: &'static str, token_type: TokenType) -> TokenType {
    if name.len() == keyword.len() && name[start..] == keyword[start..] {
        token_type
    } else {
        TokenType::Identifier
    }
}
