use thiserror::Error;
use crate::interpreter::object::ObjectType;
use crate::interpreter::token::TokenType;

/// A parser failure no tree can be recovered from. Ordinary syntax errors are collected
/// by the parser as messages instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseFailure {
    #[error("list was never closed: expected {expected}, got {got}")]
    UnterminatedList {
        expected: TokenType,
        got: TokenType,
    },
    #[error("parameter list was never closed: expected ), got {got}")]
    UnterminatedParameters {
        got: TokenType,
    },
    #[error("could not parse {literal} as integer")]
    InvalidInteger {
        literal: String,
    },
}

/// Everything that can go wrong while evaluating. The message of each variant is what
/// the user sees as the `Error` object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("type mismatch: {left} {operator} {right}")]
    TypeMismatch {
        left: ObjectType,
        operator: String,
        right: ObjectType,
    },
    #[error("unknown operator: {left} {operator} {right}")]
    UnknownInfixOperator {
        left: ObjectType,
        operator: String,
        right: ObjectType,
    },
    #[error("unknown operator: {operator}{operand}")]
    UnknownPrefixOperator {
        operator: String,
        operand: ObjectType,
    },
    #[error("identifier not found: {0}")]
    IdentifierNotFound(String),
    #[error("not a function: {0}")]
    NotAFunction(ObjectType),
    #[error("unusable as hashkey: {0}")]
    UnusableAsHashKey(ObjectType),
    #[error("index operator not supported: {0}")]
    IndexNotSupported(ObjectType),
    #[error("division by zero")]
    DivisionByZero,
    #[error("wrong number of arguments. want={want} but got={got}")]
    WrongArgumentCount {
        want: usize,
        got: usize,
    },
    #[error("argument to `{function}` not supported, got {got}")]
    UnsupportedArgument {
        function: &'static str,
        got: ObjectType,
    },
    #[error("argument to `{function}` must be ARRAY, got {got}")]
    ExpectedArray {
        function: &'static str,
        got: ObjectType,
    },
}
