use std::{fmt::{self, Display, Formatter}, sync::Arc};
use tgp_error::Error;
use crate::{error::ValueMismatch, ops::Op};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[cfg(feature = "serde")]
fn serialize_op<S>(op: &Op, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(op.token())
}

#[cfg(feature = "serde")]
fn deserialize_op<'de, D>(deserializer: D) -> Result<Op, D::Error>
where
    D: Deserializer<'de>,
{
    let token = String::deserialize(deserializer)?;
    crate::ops::get(&token).ok_or_else(|| serde::de::Error::custom("unknown operation"))
}

/// Represents any value an expression can evaluate to.
///
/// Values are totally ordered: values of different kinds order by the declaration order of the
/// variants below, and values of the same kind order by their contents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// The absent value of an optional type.
    Nil,

    /// A boolean.
    Boolean(bool),

    /// An integer. Arithmetic on integers wraps around on overflow.
    Integer(i64),

    /// A string.
    String(Arc<str>),

    /// A list of values, shared between clones.
    List(Arc<[Value]>),

    /// An operation used as a value, for example as the argument of a higher-order operation.
    #[cfg_attr(feature = "serde", serde(
        serialize_with = "serialize_op",
        deserialize_with = "deserialize_op"
    ))]
    Function(Op),
}

impl Value {
    /// Returns the typename of this value.
    pub fn typename(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Function(_) => "function",
        }
    }

    /// Creates a list value from the given values.
    pub fn list(values: impl IntoIterator<Item = Value>) -> Self {
        Value::List(values.into_iter().collect())
    }

    /// Returns the inner integer, or an error if this is not an integer.
    pub fn as_integer(&self) -> Result<i64, Error> {
        match self {
            Value::Integer(n) => Ok(*n),
            _ => Err(self.mismatch("integer")),
        }
    }

    /// Returns the inner boolean, or an error if this is not a boolean.
    pub fn as_boolean(&self) -> Result<bool, Error> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(self.mismatch("boolean")),
        }
    }

    /// Returns the inner values, or an error if this is not a list.
    pub fn as_list(&self) -> Result<&Arc<[Value]>, Error> {
        match self {
            Value::List(values) => Ok(values),
            _ => Err(self.mismatch("list")),
        }
    }

    /// Returns the inner operation, or an error if this is not a function.
    pub fn as_function(&self) -> Result<Op, Error> {
        match self {
            Value::Function(op) => Ok(*op),
            _ => Err(self.mismatch("function")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::spanless(ValueMismatch { expected, found: self.typename() })
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(n) => write!(f, "{}", n),
            Value::String(s) => {
                // quotes and backslashes are escaped with a backslash
                write!(f, "\"")?;
                for c in s.chars() {
                    if matches!(c, '"' | '\\') {
                        write!(f, "\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                write!(f, "\"")
            },
            Value::List(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            },
            Value::Function(op) => write!(f, "{}", op.token()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<Op> for Value {
    fn from(op: Op) -> Self {
        Value::Function(op)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::ops;
    use super::*;

    #[test]
    fn display() {
        let list = Value::list([Value::Integer(-3), Value::Integer(7)]);
        assert_eq!(list.to_string(), "[-3 7]");
        assert_eq!(Value::from("abc").to_string(), "\"abc\"");
        assert_eq!(Value::Function(ops::ZERO).to_string(), "zero?");
        assert_eq!(Value::from(r#"a"b\c"#).to_string(), r#""a\"b\\c""#);
    }

    #[test]
    fn order_across_kinds() {
        assert!(Value::Nil < Value::Boolean(false));
        assert!(Value::Boolean(true) < Value::Integer(i64::MIN));
        assert!(Value::Integer(-1) < Value::Integer(0));
        assert!(Value::from("a") < Value::from("b"));
    }

    #[test]
    fn accessors_report_mismatch() {
        assert_eq!(Value::Integer(4).as_integer().unwrap(), 4);
        let err = Value::Boolean(true).as_integer().unwrap_err();
        let mismatch = err.downcast_ref::<ValueMismatch>().unwrap();
        assert_eq!(mismatch.expected, "integer");
        assert_eq!(mismatch.found, "boolean");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() {
        let value = Value::list([
            Value::Nil,
            Value::Integer(-4),
            Value::from("a\"b"),
            Value::Function(ops::ODD),
            Value::list([Value::Boolean(true)]),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&json).unwrap(), value);
        assert!(serde_json::from_str::<Value>(r#"{"Function":"odd"}"#).is_err());
    }
}
