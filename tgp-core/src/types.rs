//! The type system: value types, generic placeholders and operation signatures.

use std::{collections::HashMap, fmt::{self, Display, Formatter}};
use tgp_error::Error;
use crate::error::{ArgumentTypeMismatch, ArityMismatch};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generic placeholder names mapped to the types they were resolved to.
pub type Bindings = HashMap<&'static str, Type>;

/// The type of a value, or of the node that produces it.
///
/// Types are compared structurally: two types are equal if they are the same kind of type and
/// their parameter types are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    Boolean,
    Integer,
    String,

    /// An ordered collection of values of the inner type.
    List(Box<Type>),

    /// A value of the inner type that may be absent.
    Optional(Box<Type>),

    /// A function value, with its return type followed by its argument types.
    Function(Box<Type>, Vec<Type>),

    /// A placeholder in an operation signature, resolved when the operation is applied.
    #[cfg_attr(feature = "serde", serde(skip))]
    Generic(&'static str),
}

impl Type {
    /// Creates the type `list<inner>`.
    pub fn list(inner: Type) -> Self {
        Self::List(Box::new(inner))
    }

    /// Creates the type `optional<inner>`.
    pub fn optional(inner: Type) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Creates the type of a function returning `ret` from the given argument types.
    pub fn function(ret: Type, args: impl Into<Vec<Type>>) -> Self {
        Self::Function(Box::new(ret), args.into())
    }

    /// Returns true if this type contains a generic placeholder.
    pub fn is_generic(&self) -> bool {
        match self {
            Self::Generic(_) => true,
            Self::List(inner) | Self::Optional(inner) => inner.is_generic(),
            Self::Function(ret, args) => ret.is_generic() || args.iter().any(Type::is_generic),
            Self::Boolean | Self::Integer | Self::String => false,
        }
    }

    /// Returns the element type if this is a list type.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Self::List(inner) => Some(inner),
            _ => None,
        }
    }

    /// Matches this type, used as a pattern, against a concrete type. Generic placeholders that
    /// are not bound yet are bound to the corresponding part of `actual`; bound placeholders must
    /// match it exactly.
    ///
    /// Returns false if the types cannot be matched. `bindings` may have been extended anyway.
    pub fn unify(&self, actual: &Type, bindings: &mut Bindings) -> bool {
        match (self, actual) {
            (Self::Generic(name), _) => match bindings.get(name) {
                Some(bound) => bound == actual,
                None => {
                    bindings.insert(*name, actual.clone());
                    true
                },
            },
            (Self::List(pattern), Self::List(actual))
                | (Self::Optional(pattern), Self::Optional(actual)) => pattern.unify(actual, bindings),
            (Self::Function(pattern_ret, pattern_args), Self::Function(actual_ret, actual_args)) => {
                pattern_args.len() == actual_args.len()
                    && pattern_ret.unify(actual_ret, bindings)
                    && pattern_args.iter()
                        .zip(actual_args)
                        .all(|(pattern, actual)| pattern.unify(actual, bindings))
            },
            (pattern, actual) => pattern == actual,
        }
    }

    /// Replaces every bound generic placeholder in this type with its binding.
    pub fn substitute(&self, bindings: &Bindings) -> Type {
        match self {
            Self::Generic(name) => bindings.get(name).cloned().unwrap_or_else(|| self.clone()),
            Self::List(inner) => Self::list(inner.substitute(bindings)),
            Self::Optional(inner) => Self::optional(inner.substitute(bindings)),
            Self::Function(ret, args) => Self::function(
                ret.substitute(bindings),
                args.iter().map(|arg| arg.substitute(bindings)).collect::<Vec<_>>(),
            ),
            Self::Boolean | Self::Integer | Self::String => self.clone(),
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => write!(f, "boolean"),
            Self::Integer => write!(f, "integer"),
            Self::String => write!(f, "string"),
            Self::List(inner) => write!(f, "list<{}>", inner),
            Self::Optional(inner) => write!(f, "optional<{}>", inner),
            Self::Function(ret, args) => {
                write!(f, "function<{}", ret)?;
                for arg in args {
                    write!(f, ", {}", arg)?;
                }
                write!(f, ">")
            },
            Self::Generic(name) => write!(f, "{}", name),
        }
    }
}

/// The declared return type and ordered argument types of an operation.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    /// The type of the value the operation returns.
    pub ret: Type,

    /// The types of the arguments, in order.
    pub args: Vec<Type>,
}

impl Signature {
    /// Creates a new signature.
    pub fn new(ret: Type, args: impl Into<Vec<Type>>) -> Self {
        Self { ret, args: args.into() }
    }

    /// Returns the number of arguments the operation takes.
    pub fn arity(&self) -> usize {
        self.args.len()
    }

    /// Returns true if any part of the signature is a generic placeholder.
    pub fn is_generic(&self) -> bool {
        self.ret.is_generic() || self.args.iter().any(Type::is_generic)
    }

    /// Returns the type of a function value with this signature.
    pub fn as_type(&self) -> Type {
        Type::function(self.ret.clone(), self.args.clone())
    }

    /// Checks the given argument types against this signature, resolving generic placeholders,
    /// and returns the resolved return type.
    pub fn bind(&self, token: &'static str, args: &[Type]) -> Result<Type, Error> {
        if args.len() != self.args.len() {
            return Err(Error::spanless(ArityMismatch {
                token,
                expected: self.args.len(),
                found: args.len(),
            }));
        }

        let mut bindings = Bindings::new();
        for (index, (pattern, actual)) in self.args.iter().zip(args).enumerate() {
            if !pattern.unify(actual, &mut bindings) {
                return Err(Error::spanless(ArgumentTypeMismatch {
                    token,
                    index,
                    expected: pattern.substitute(&bindings),
                    found: actual.clone(),
                }));
            }
        }

        Ok(self.ret.substitute(&bindings))
    }
}
