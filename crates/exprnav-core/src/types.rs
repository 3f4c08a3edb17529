//! Static types recorded by the type checker.
//!
//! The navigation layer never computes types; it only looks them up in the
//! [`TypeMap`] handed over by the checker. Ids without an entry resolve to the
//! [`DYN`] sentinel.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Mapping from expression id to the checker's resolved type.
pub type TypeMap = HashMap<i64, Type>;

/// Sentinel for expressions with no recorded static type.
pub static DYN: Type = Type::Dyn;

/// A resolved static type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    /// Dynamic or unknown type.
    Dyn,
    Null,
    Bool,
    Int,
    Uint,
    Double,
    String,
    Bytes,
    Duration,
    Timestamp,
    /// Type of an expression that failed to check.
    Error,
    List(Box<Type>),
    Map(Box<Type>, Box<Type>),
    /// Message (struct) type by fully-qualified name.
    Object(String),
    /// Unbound type parameter.
    TypeParam(String),
    /// The type of a type, e.g. `type(int)`.
    TypeOf(Box<Type>),
    /// Parameterized opaque type such as `optional_type(int)`.
    Opaque { name: String, params: Vec<Type> },
}

impl Type {
    /// Convenience constructor for `list(elem)`.
    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    /// Convenience constructor for `map(key, value)`.
    pub fn map(key: Type, value: Type) -> Self {
        Type::Map(Box::new(key), Box::new(value))
    }

    /// Returns true for the dynamic/unknown type.
    pub fn is_dyn(&self) -> bool {
        matches!(self, Type::Dyn)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Dyn => write!(f, "dyn"),
            Type::Null => write!(f, "null_type"),
            Type::Bool => write!(f, "bool"),
            Type::Int => write!(f, "int"),
            Type::Uint => write!(f, "uint"),
            Type::Double => write!(f, "double"),
            Type::String => write!(f, "string"),
            Type::Bytes => write!(f, "bytes"),
            Type::Duration => write!(f, "google.protobuf.Duration"),
            Type::Timestamp => write!(f, "google.protobuf.Timestamp"),
            Type::Error => write!(f, "*error*"),
            Type::List(elem) => write!(f, "list({})", elem),
            Type::Map(key, value) => write!(f, "map({}, {})", key, value),
            Type::Object(name) | Type::TypeParam(name) => write!(f, "{}", name),
            Type::TypeOf(inner) => write!(f, "type({})", inner),
            Type::Opaque { name, params } => {
                if params.is_empty() {
                    return write!(f, "{}", name);
                }
                write!(f, "{}(", name)?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, ")")
            }
        }
    }
}
