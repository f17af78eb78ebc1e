//! Error kinds raised while reading source code into a tree.

use ariadne::Fmt;
use tgp_attrs::ErrorKind;
use tgp_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of file",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of file",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
    help = "only one expression can be read at a time",
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", self.expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", self.found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// The operation is not in the catalog.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` operation does not exist", self.name),
    labels = ["this operation"],
    help = if self.suggestions.is_empty() {
        "see the operation catalog for a list of available operations".to_string()
    } else if self.suggestions.len() == 1 {
        format!("did you mean the `{}` operation?", (&*self.suggestions[0]).fg(EXPR))
    } else {
        format!(
            "did you mean one of these operations? {}",
            self.suggestions
                .iter()
                .map(|s| format!("`{}`", s.fg(EXPR)))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
)]
pub struct UnknownOperation {
    /// The name that was read.
    pub name: String,

    /// The display tokens of similarly named operations, if any.
    pub suggestions: Vec<String>,
}

/// The variable has no declared type.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not declared", self.name),
    labels = ["this variable"],
    help = if self.count == 0 {
        "no variables were declared".to_string()
    } else {
        format!("the declared variables are `v0` to `v{}`", self.count - 1)
    },
)]
pub struct UnknownVariable {
    /// The name of the variable.
    pub name: String,

    /// The number of declared variables.
    pub count: usize,
}

/// The integer literal does not fit in 64 bits.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "integer literal out of range",
    labels = ["this literal"],
    help = format!("integers must be between {} and {}", i64::MIN, i64::MAX),
)]
pub struct InvalidInteger;

/// A generic operation was used as a function value, where its type cannot be resolved.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the `{}` operation cannot be used as a value", self.token),
    labels = ["this operation"],
    help = "only operations without generic types can be passed to higher-order operations",
)]
pub struct GenericFunctionValue {
    /// The display token of the operation.
    pub token: &'static str,
}

/// A list literal contains an element that is not a literal.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "list elements must be literals",
    labels = ["this element"],
    help = format!("use a {} to hold a list computed at evaluation time", "variable".fg(EXPR)),
)]
pub struct ExpectedLiteral;

/// The element type of an empty list literal cannot be inferred from where it is used.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "cannot infer the type of this empty list",
    labels = ["this list"],
    help = "an empty list can only be used as an argument that must be a list of a known type",
)]
pub struct UntypedEmptyList;

/// A type annotation could not be read.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown type `{}`", self.name),
    labels = ["this type"],
    help = format!(
        "valid types are {}, {}, {}, {}, {} and {}",
        "integer".fg(EXPR),
        "boolean".fg(EXPR),
        "string".fg(EXPR),
        "list<T>".fg(EXPR),
        "optional<T>".fg(EXPR),
        "function<R, A..>".fg(EXPR),
    ),
)]
pub struct UnknownType {
    /// The annotation that was read.
    pub name: String,
}
