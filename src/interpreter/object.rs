use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use rustc_hash::FxHasher;
use crate::interpreter::ast::{BlockStatement, Identifier};
use crate::interpreter::environment::Environment;
use crate::interpreter::error::RuntimeError;
use crate::util;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ObjectType {
    Integer,
    Boolean,
    Null,
    String,
    Array,
    Hash,
    Function,
    Builtin,
    ReturnValue,
    Error,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::Null => "NULL",
            ObjectType::String => "STRING",
            ObjectType::Array => "ARRAY",
            ObjectType::Hash => "HASH",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Error => "ERROR",
        })
    }
}

/// Canonical key of a hashable value. Equal values of the same type always produce
/// equal keys, no matter which object they come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HashKey {
    pub object_type: ObjectType,
    pub value: u64,
}

#[derive(Clone, Debug)]
pub struct HashPair {
    pub key: Rc<Object>,
    pub value: Rc<Object>,
}

pub type BuiltinFunction = fn(&[Rc<Object>]) -> Result<Rc<Object>, RuntimeError>;

#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub function: BuiltinFunction,
}

impl Debug for Builtin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Builtin").field(&self.name).finish()
    }
}

pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: BlockStatement,
    pub env: Rc<RefCell<Environment>>,
}

impl Debug for Function {
    // The closure environment may contain this very function
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    Null,
    String(String),
    Array(Vec<Rc<Object>>),
    Hash(BTreeMap<HashKey, HashPair>),
    Function(Function),
    Builtin(Builtin),
    ReturnValue(Rc<Object>),
    Error(String),
}

thread_local! {
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
    static NULL: Rc<Object> = Rc::new(Object::Null);
}

impl Object {
    /// Returns the shared `true` or `false` object.
    pub fn boolean(value: bool) -> Rc<Object> {
        if value {
            TRUE.with(Rc::clone)
        } else {
            FALSE.with(Rc::clone)
        }
    }

    /// Returns the shared `null` object.
    pub fn null() -> Rc<Object> {
        NULL.with(Rc::clone)
    }

    pub fn object_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::Null => ObjectType::Null,
            Object::String(_) => ObjectType::String,
            Object::Array(_) => ObjectType::Array,
            Object::Hash(_) => ObjectType::Hash,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
        }
    }

    /// The key this value is stored under in a hash, or `None` if the value
    /// can't be used as a key.
    pub fn hash_key(&self) -> Option<HashKey> {
        let value = match self {
            Object::Integer(value) => *value as u64,
            Object::Boolean(value) => u64::from(*value),
            Object::String(value) => {
                let mut hasher = FxHasher::default();
                value.hash(&mut hasher);
                hasher.finish()
            },
            _ => return None,
        };

        Some(HashKey { object_type: self.object_type(), value })
    }

    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Null | Object::Boolean(false))
    }

    pub fn inspect(&self) -> String {
        self.to_string()
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::Null => f.write_str("null"),
            Object::String(value) => f.write_str(value),
            Object::Array(elements) => write!(f, "[{}]", util::join(elements, ", ")),
            Object::Hash(pairs) => write!(f, "{{{}}}", pairs.values()
                .map(|pair| format!("{}: {}", pair.key, pair.value)).collect::<Vec<String>>()
                .join(", ")),
            Object::Function(function) =>
                write!(f, "fn({}) {}", util::join(&function.parameters, ", "), function.body),
            Object::Builtin(builtin) => write!(f, "builtin function {}", builtin.name),
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "Error: {}", message),
        }
    }
}
