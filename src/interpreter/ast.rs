use std::fmt::{Display, Formatter};
use crate::interpreter::token::Token;
use crate::util;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    pub token: Token,
}

impl Identifier {
    pub fn new(token: Token) -> Identifier {
        Identifier { token }
    }

    pub fn name(&self) -> &str {
        self.token.source()
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn token_literal(&self) -> &str {
        self.statements.first().map_or("", Statement::token_literal)
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (i, statement) in self.statements.iter().enumerate() {
            write!(f, "{}", statement)?;

            if needs_separator(&self.statements, i) {
                f.write_str(";")?;
            }

            f.write_str("\n")?;
        }

        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    Let {
        token: Token,
        name: Identifier,
        value: Expression,
    },
    Return {
        token: Token,
        value: Expression,
    },
    Expression(Expression),
}

impl Statement {
    pub fn token_literal(&self) -> &str {
        match self {
            Statement::Let { token, .. } | Statement::Return { token, .. } => token.source(),
            Statement::Expression(expr) => expr.token_literal(),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Statement::Let { name, value, .. } => write!(f, "let {} = {};", name, value),
            Statement::Return { value, .. } => write!(f, "return {};", value),
            Statement::Expression(expr) => write!(f, "{}", expr),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockStatement {
    pub token: Token,
    pub statements: Vec<Statement>,
}

impl BlockStatement {
    pub fn token_literal(&self) -> &str {
        self.token.source()
    }
}

impl Display for BlockStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.statements.is_empty() {
            return f.write_str("{ }");
        }

        f.write_str("{ ")?;

        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }

            write!(f, "{}", statement)?;

            if needs_separator(&self.statements, i) {
                f.write_str(";")?;
            }
        }

        f.write_str(" }")
    }
}

// An expression statement followed by another statement needs a ';',
// otherwise `(a)\n(b)` would read back as a call.
fn needs_separator(statements: &[Statement], index: usize) -> bool {
    matches!(statements[index], Statement::Expression(_)) && index + 1 < statements.len()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expression {
    Identifier(Identifier),
    IntegerLiteral {
        token: Token,
        value: i64,
    },
    BooleanLiteral {
        token: Token,
        value: bool,
    },
    StringLiteral {
        token: Token,
        value: String,
    },
    ArrayLiteral {
        token: Token,
        elements: Vec<Expression>,
    },
    HashLiteral {
        token: Token,
        pairs: Vec<(Expression, Expression)>,
    },

    Prefix {
        operator: Token,
        operand: Box<Expression>,
    },
    Infix {
        left: Box<Expression>,
        operator: Token,
        right: Box<Expression>,
    },
    If {
        token: Token,
        condition: Box<Expression>,
        consequence: BlockStatement,
        alternative: Option<BlockStatement>,
    },
    FunctionLiteral {
        token: Token,
        parameters: Vec<Identifier>,
        body: BlockStatement,
    },
    Call {
        callee: Box<Expression>,
        token: Token,
        arguments: Vec<Expression>,
    },
    Index {
        collection: Box<Expression>,
        token: Token,
        index: Box<Expression>,
    },
}

impl Expression {
    pub fn token_literal(&self) -> &str {
        match self {
            Expression::Identifier(identifier) => identifier.token.source(),
            Expression::Prefix { operator, .. } | Expression::Infix { operator, .. } => operator.source(),
            Expression::IntegerLiteral { token, .. }
            | Expression::BooleanLiteral { token, .. }
            | Expression::StringLiteral { token, .. }
            | Expression::ArrayLiteral { token, .. }
            | Expression::HashLiteral { token, .. }
            | Expression::If { token, .. }
            | Expression::FunctionLiteral { token, .. }
            | Expression::Call { token, .. }
            | Expression::Index { token, .. } => token.source(),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Expression::Identifier(identifier) => write!(f, "{}", identifier),
            Expression::IntegerLiteral { token, .. } | Expression::BooleanLiteral { token, .. } => f.write_str(token.source()),
            Expression::StringLiteral { value, .. } => write!(f, "\"{}\"", value),
            Expression::ArrayLiteral { elements, .. } => write!(f, "[{}]", util::join(elements, ", ")),
            Expression::HashLiteral { pairs, .. } => write!(f, "{{{}}}", pairs.iter()
                .map(|(key, value)| format!("{}: {}", key, value)).collect::<Vec<String>>()
                .join(", ")),

            Expression::Prefix { operator, operand } => write!(f, "({}{})", operator.source(), operand),
            Expression::Infix { left, operator, right } => write!(f, "({} {} {})", left, operator.source(), right),
            Expression::If { condition, consequence, alternative, .. } => {
                write!(f, "if ({}) {}", condition, consequence)?;

                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }

                Ok(())
            },
            Expression::FunctionLiteral { token, parameters, body } =>
                write!(f, "{}({}) {}", token.source(), util::join(parameters, ", "), body),
            Expression::Call { callee, arguments, .. } => write!(f, "{}({})", callee, util::join(arguments, ", ")),
            Expression::Index { collection, index, .. } => write!(f, "({}[{}])", collection, index),
        }
    }
}

/// A borrowed view of any evaluable node.
#[derive(Clone, Copy, Debug)]
pub enum Node<'a> {
    Program(&'a Program),
    Statement(&'a Statement),
    Block(&'a BlockStatement),
    Expression(&'a Expression),
}

impl<'a> Node<'a> {
    pub fn token_literal(&self) -> &'a str {
        match *self {
            Node::Program(program) => program.token_literal(),
            Node::Statement(statement) => statement.token_literal(),
            Node::Block(block) => block.token_literal(),
            Node::Expression(expr) => expr.token_literal(),
        }
    }
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self { Node::Program(program) }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self { Node::Statement(statement) }
}

impl<'a> From<&'a BlockStatement> for Node<'a> {
    fn from(block: &'a BlockStatement) -> Self { Node::Block(block) }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expr: &'a Expression) -> Self { Node::Expression(expr) }
}

impl Display for Node<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Program(program) => write!(f, "{}", program),
            Node::Statement(statement) => write!(f, "{}", statement),
            Node::Block(block) => write!(f, "{}", block),
            Node::Expression(expr) => write!(f, "{}", expr),
        }
    }
}
