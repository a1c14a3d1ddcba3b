use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use crate::interpreter::ast::{BlockStatement, Expression, Identifier, Node, Program, Statement};
use crate::interpreter::builtins;
use crate::interpreter::environment::Environment;
use crate::interpreter::error::RuntimeError;
use crate::interpreter::object::{Function, HashPair, Object, ObjectType};
use crate::interpreter::token::{Token, TokenType};

/// Result of a single evaluation step. `Err` carries a value that stops evaluation of the
/// enclosing statements: either a `ReturnValue` or an `Error`.
type Flow = Result<Rc<Object>, Rc<Object>>;

impl From<RuntimeError> for Rc<Object> {
    fn from(err: RuntimeError) -> Self {
        Rc::new(Object::Error(err.to_string()))
    }
}

/// Evaluates any node against `env`. Errors are returned as `Error` objects; a `return` at
/// the top of a program yields the returned value itself.
pub fn eval<'a>(node: impl Into<Node<'a>>, env: &Rc<RefCell<Environment>>) -> Rc<Object> {
    let result = match node.into() {
        Node::Program(program) => eval_program(program, env),
        Node::Statement(statement) => eval_statement(statement, env),
        Node::Block(block) => eval_block_statement(block, env),
        Node::Expression(expr) => eval_expression(expr, env),
    };

    match result {
        Ok(value) | Err(value) => value,
    }
}

#[tracing::instrument(level = "trace", skip_all, fields(statements = program.statements.len()))]
fn eval_program(program: &Program, env: &Rc<RefCell<Environment>>) -> Flow {
    let mut result = Object::null();

    for statement in &program.statements {
        result = match eval_statement(statement, env) {
            Ok(value) => value,
            Err(value) => return match &*value {
                Object::ReturnValue(inner) => Ok(Rc::clone(inner)),
                _ => Err(value),
            },
        };
    }

    Ok(result)
}

fn eval_block_statement(block: &BlockStatement, env: &Rc<RefCell<Environment>>) -> Flow {
    let mut result = Object::null();

    for statement in &block.statements {
        result = eval_statement(statement, env)?;
    }

    Ok(result)
}

fn eval_statement(statement: &Statement, env: &Rc<RefCell<Environment>>) -> Flow {
    match statement {
        Statement::Let { name, value, .. } => {
            let value = eval_expression(value, env)?;
            env.borrow_mut().set(name.name(), value);

            Ok(Object::null())
        },
        Statement::Return { value, .. } => {
            let value = eval_expression(value, env)?;
            Err(Rc::new(Object::ReturnValue(value)))
        },
        Statement::Expression(expr) => eval_expression(expr, env),
    }
}

fn eval_expression(expr: &Expression, env: &Rc<RefCell<Environment>>) -> Flow {
    match expr {
        Expression::Identifier(identifier) => eval_identifier(identifier, env),
        Expression::IntegerLiteral { value, .. } => Ok(Rc::new(Object::Integer(*value))),
        Expression::BooleanLiteral { value, .. } => Ok(Object::boolean(*value)),
        Expression::StringLiteral { value, .. } => Ok(Rc::new(Object::String(value.clone()))),
        Expression::ArrayLiteral { elements, .. } => {
            let elements = eval_expressions(elements, env)?;
            Ok(Rc::new(Object::Array(elements)))
        },
        Expression::HashLiteral { pairs, .. } => eval_hash_literal(pairs, env),

        Expression::Prefix { operator, operand } => {
            let operand = eval_expression(operand, env)?;
            Ok(eval_prefix_expression(operator, operand)?)
        },
        Expression::Infix { left, operator, right } => {
            let left = eval_expression(left, env)?;
            let right = eval_expression(right, env)?;
            Ok(eval_infix_expression(operator, left, right)?)
        },
        Expression::If { condition, consequence, alternative, .. } => {
            let condition = eval_expression(condition, env)?;

            if condition.is_truthy() {
                eval_block_statement(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block_statement(alternative, env)
            } else {
                Ok(Object::null())
            }
        },
        Expression::FunctionLiteral { parameters, body, .. } => Ok(Rc::new(Object::Function(Function {
            parameters: parameters.clone(),
            body: body.clone(),
            env: Rc::clone(env),
        }))),
        Expression::Call { callee, arguments, .. } => {
            let function = eval_expression(callee, env)?;
            let arguments = eval_expressions(arguments, env)?;

            apply_function(function, &arguments)
        },
        Expression::Index { collection, index, .. } => {
            let collection = eval_expression(collection, env)?;
            let index = eval_expression(index, env)?;

            Ok(eval_index_expression(&collection, &index)?)
        },
    }
}

fn eval_expressions(exprs: &[Expression], env: &Rc<RefCell<Environment>>) -> Result<Vec<Rc<Object>>, Rc<Object>> {
    exprs.iter().map(|expr| eval_expression(expr, env)).collect()
}

fn eval_identifier(identifier: &Identifier, env: &Rc<RefCell<Environment>>) -> Flow {
    if let Some(value) = env.borrow().get(identifier.name()) {
        return Ok(value);
    }

    match builtins::lookup(identifier.name()) {
        Some(builtin) => Ok(Rc::new(Object::Builtin(builtin))),
        None => Err(RuntimeError::IdentifierNotFound(identifier.name().to_owned()).into()),
    }
}

fn eval_prefix_expression(operator: &Token, operand: Rc<Object>) -> Result<Rc<Object>, RuntimeError> {
    match (operator.token_type(), &*operand) {
        (TokenType::Not, _) => Ok(Object::boolean(!operand.is_truthy())),
        (TokenType::Minus, Object::Integer(value)) => Ok(Rc::new(Object::Integer(value.wrapping_neg()))),
        _ => Err(RuntimeError::UnknownPrefixOperator {
            operator: operator.source().to_owned(),
            operand: operand.object_type(),
        }),
    }
}

fn eval_infix_expression(operator: &Token, left: Rc<Object>, right: Rc<Object>) -> Result<Rc<Object>, RuntimeError> {
    match (&*left, &*right) {
        (Object::Integer(left), Object::Integer(right)) => eval_integer_infix_expression(operator, *left, *right),
        (Object::String(left), Object::String(right)) => eval_string_infix_expression(operator, left, right),
        _ if operator.is(TokenType::Equal) => Ok(Object::boolean(is_same_object(&left, &right))),
        _ if operator.is(TokenType::NotEqual) => Ok(Object::boolean(!is_same_object(&left, &right))),
        _ if left.object_type() != right.object_type() => Err(RuntimeError::TypeMismatch {
            left: left.object_type(),
            operator: operator.source().to_owned(),
            right: right.object_type(),
        }),
        _ => Err(RuntimeError::UnknownInfixOperator {
            left: left.object_type(),
            operator: operator.source().to_owned(),
            right: right.object_type(),
        }),
    }
}

fn eval_integer_infix_expression(operator: &Token, left: i64, right: i64) -> Result<Rc<Object>, RuntimeError> {
    let value = match operator.token_type() {
        TokenType::Plus => left.wrapping_add(right),
        TokenType::Minus => left.wrapping_sub(right),
        TokenType::Multiply => left.wrapping_mul(right),
        TokenType::Divide => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero);
            }

            left.wrapping_div(right)
        },
        TokenType::Less => return Ok(Object::boolean(left < right)),
        TokenType::Greater => return Ok(Object::boolean(left > right)),
        TokenType::Equal => return Ok(Object::boolean(left == right)),
        TokenType::NotEqual => return Ok(Object::boolean(left != right)),
        _ => return Err(RuntimeError::UnknownInfixOperator {
            left: ObjectType::Integer,
            operator: operator.source().to_owned(),
            right: ObjectType::Integer,
        }),
    };

    Ok(Rc::new(Object::Integer(value)))
}

fn eval_string_infix_expression(operator: &Token, left: &str, right: &str) -> Result<Rc<Object>, RuntimeError> {
    if !operator.is(TokenType::Plus) {
        return Err(RuntimeError::UnknownInfixOperator {
            left: ObjectType::String,
            operator: operator.source().to_owned(),
            right: ObjectType::String,
        });
    }

    Ok(Rc::new(Object::String(format!("{}{}", left, right))))
}

// Booleans and null are shared singletons, so this is value equality for them
// and identity for everything else.
fn is_same_object(left: &Rc<Object>, right: &Rc<Object>) -> bool {
    match (&**left, &**right) {
        (Object::Boolean(left), Object::Boolean(right)) => left == right,
        (Object::Null, Object::Null) => true,
        _ => Rc::ptr_eq(left, right),
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Rc<RefCell<Environment>>) -> Flow {
    let mut hash = BTreeMap::new();

    for (key, value) in pairs {
        let key = eval_expression(key, env)?;
        let hash_key = key.hash_key().ok_or_else(|| RuntimeError::UnusableAsHashKey(key.object_type()))?;
        let value = eval_expression(value, env)?;

        hash.insert(hash_key, HashPair { key, value });
    }

    Ok(Rc::new(Object::Hash(hash)))
}

fn eval_index_expression(collection: &Object, index: &Object) -> Result<Rc<Object>, RuntimeError> {
    match (collection, index) {
        (Object::Array(elements), Object::Integer(index)) => Ok(usize::try_from(*index).ok()
            .and_then(|index| elements.get(index))
            .map_or_else(Object::null, Rc::clone)),
        (Object::Hash(pairs), _) => {
            let hash_key = index.hash_key().ok_or_else(|| RuntimeError::UnusableAsHashKey(index.object_type()))?;

            Ok(pairs.get(&hash_key).map_or_else(Object::null, |pair| Rc::clone(&pair.value)))
        },
        _ => Err(RuntimeError::IndexNotSupported(collection.object_type())),
    }
}

fn apply_function(function: Rc<Object>, arguments: &[Rc<Object>]) -> Flow {
    match &*function {
        Object::Function(function) => {
            if function.parameters.len() != arguments.len() {
                return Err(RuntimeError::WrongArgumentCount {
                    want: function.parameters.len(),
                    got: arguments.len(),
                }.into());
            }

            tracing::debug!(parameters = function.parameters.len(), "applying function");

            let env = Environment::new_enclosed(Rc::clone(&function.env));

            for (parameter, argument) in function.parameters.iter().zip(arguments) {
                env.borrow_mut().set(parameter.name(), Rc::clone(argument));
            }

            match eval_block_statement(&function.body, &env) {
                Ok(value) => Ok(value),
                Err(value) => match &*value {
                    Object::ReturnValue(inner) => Ok(Rc::clone(inner)),
                    _ => Err(value),
                },
            }
        },
        Object::Builtin(builtin) => {
            tracing::debug!(name = builtin.name, arguments = arguments.len(), "calling builtin");
            Ok((builtin.function)(arguments)?)
        },
        other => Err(RuntimeError::NotAFunction(other.object_type()).into()),
    }
}
