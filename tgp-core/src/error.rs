//! Error kinds raised while building and evaluating expression trees.

use ariadne::Fmt;
use tgp_attrs::ErrorKind;
use tgp_error::{ErrorKind, EXPR};
use crate::types::Type;

/// An integer was divided by zero.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "division by zero",
    labels = ["this divisor evaluated to zero"],
    help = format!("guard the divisor, for example with `{}`", "(if (zero? d) .. (/ n d))".fg(EXPR)),
)]
pub struct DivisionByZero;

/// A variable was read that has no value in the assignments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("variable `v{}` is not assigned", id),
    labels = ["this variable"],
    help = format!("only {} value(s) were assigned", len),
)]
pub struct UnassignedVariable {
    /// The identifier of the variable.
    pub id: usize,

    /// The number of values that were assigned.
    pub len: usize,
}

/// A value or node had a different type than expected.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "type mismatch",
    labels = [format!("expected `{}`, found `{}`", expected, found)],
)]
pub struct TypeMismatch {
    /// The expected type.
    pub expected: Type,

    /// The type that was found.
    pub found: Type,
}

/// An operation was applied to the wrong number of arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("wrong number of arguments for `{}`", token),
    labels = [format!("this application has {} argument(s)", found)],
    help = format!("`{}` takes {} argument(s)", token.fg(EXPR), expected),
)]
pub struct ArityMismatch {
    /// The display token of the operation.
    pub token: &'static str,

    /// The number of arguments the operation takes.
    pub expected: usize,

    /// The number of arguments given.
    pub found: usize,
}

/// An argument of an operation had a type incompatible with the operation's signature.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("argument {} of `{}` has the wrong type", index + 1, token),
    labels = [String::new(), format!("expected `{}`, found `{}`", expected, found)],
)]
pub struct ArgumentTypeMismatch {
    /// The display token of the operation.
    pub token: &'static str,

    /// The index of the offending argument.
    pub index: usize,

    /// The (possibly partially resolved) type the signature requires.
    pub expected: Type,

    /// The type of the argument.
    pub found: Type,
}

/// A node was addressed with an index outside of the tree.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("index {} is out of range", index),
    labels = ["this tree"],
    help = format!("the tree has {} addressable node(s)", count),
)]
pub struct IndexOutOfRange {
    /// The requested index.
    pub index: usize,

    /// The number of nodes matching the predicate.
    pub count: usize,
}

/// A value of one kind was given where a value of another kind was required.
///
/// Trees built through the checked constructors never raise this error.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected value",
    labels = [format!("expected a {} value, found a {} value", expected, found)],
)]
pub struct ValueMismatch {
    /// The kind of value that was expected.
    pub expected: &'static str,

    /// The kind of value that was found.
    pub found: &'static str,
}
