use std::collections::HashMap;
use std::rc::Rc;
use lazy_static::lazy_static;
use crate::interpreter::error::RuntimeError;
use crate::interpreter::object::{Builtin, BuiltinFunction, Object};

type BuiltinResult = Result<Rc<Object>, RuntimeError>;

lazy_static! {
    static ref BUILTINS: HashMap<&'static str, Builtin> = {
        let functions: [(&'static str, BuiltinFunction); 6] = [
            ("len", len),
            ("first", first),
            ("last", last),
            ("rest", rest),
            ("push", push),
            ("puts", puts),
        ];

        functions.into_iter().map(|(name, function)| (name, Builtin { name, function })).collect()
    };
}

/// Finds the builtin function bound to `name`, if there is one.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.get(name).copied()
}

fn check_argument_count(arguments: &[Rc<Object>], want: usize) -> Result<(), RuntimeError> {
    if arguments.len() != want {
        return Err(RuntimeError::WrongArgumentCount { want, got: arguments.len() });
    }

    Ok(())
}

fn array_argument<'a>(function: &'static str, argument: &'a Object) -> Result<&'a [Rc<Object>], RuntimeError> {
    match argument {
        Object::Array(elements) => Ok(elements),
        other => Err(RuntimeError::ExpectedArray { function, got: other.object_type() }),
    }
}

fn len(arguments: &[Rc<Object>]) -> BuiltinResult {
    check_argument_count(arguments, 1)?;

    match &*arguments[0] {
        Object::String(value) => Ok(Rc::new(Object::Integer(value.len() as i64))),
        Object::Array(elements) => Ok(Rc::new(Object::Integer(elements.len() as i64))),
        other => Err(RuntimeError::UnsupportedArgument { function: "len", got: other.object_type() }),
    }
}

fn first(arguments: &[Rc<Object>]) -> BuiltinResult {
    check_argument_count(arguments, 1)?;
    let elements = array_argument("first", &arguments[0])?;

    Ok(elements.first().map_or_else(Object::null, Rc::clone))
}

fn last(arguments: &[Rc<Object>]) -> BuiltinResult {
    check_argument_count(arguments, 1)?;
    let elements = array_argument("last", &arguments[0])?;

    Ok(elements.last().map_or_else(Object::null, Rc::clone))
}

fn rest(arguments: &[Rc<Object>]) -> BuiltinResult {
    check_argument_count(arguments, 1)?;
    let elements = array_argument("rest", &arguments[0])?;

    if elements.len() <= 1 {
        return Ok(Object::null());
    }

    Ok(Rc::new(Object::Array(elements[1..].to_vec())))
}

fn push(arguments: &[Rc<Object>]) -> BuiltinResult {
    check_argument_count(arguments, 2)?;
    let elements = array_argument("push", &arguments[0])?;

    let mut pushed = Vec::with_capacity(elements.len() + 1);
    pushed.extend(elements.iter().cloned());
    pushed.push(Rc::clone(&arguments[1]));

    Ok(Rc::new(Object::Array(pushed)))
}

fn puts(arguments: &[Rc<Object>]) -> BuiltinResult {
    for argument in arguments {
        println!("{}", argument.inspect());
    }

    Ok(Object::null())
}
