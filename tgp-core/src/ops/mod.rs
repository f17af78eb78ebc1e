//! The operation catalog.
//!
//! Each operation is implemented as a unit `struct` implementing [`Operation`], and is shared by
//! every tree that applies it through the [`Op`] handle. Operations are identified by their
//! display token, which is unique within the catalog.
//!
//! | Module       | Tokens                                   |
//! | ------------ | ---------------------------------------- |
//! | [`math`]     | `+ - * /`                                |
//! | [`compare`]  | `= != < <= > >=`                         |
//! | [`logic`]    | `and or xor false?`                      |
//! | [`classify`] | `zero? pos? neg? even? odd?`             |
//! | [`choice`]   | `if or-else`                             |
//! | [`hof`]      | `map filter reduce any? all? none?`      |

pub mod choice;
pub mod classify;
pub mod compare;
pub mod hof;
pub mod logic;
pub mod math;

use once_cell::sync::Lazy;
use std::{
    cmp::Ordering,
    collections::HashMap,
    fmt::{self, Debug, Formatter},
    hash::{Hash, Hasher},
    ops::Deref,
};
use tgp_error::Error;
use crate::{
    error::ArityMismatch,
    eval::Assignments,
    node::Node,
    rules_engine::RulesEngine,
    simplify::step::Step,
    step_collector::StepCollector,
    types::Signature,
    value::Value,
};

/// A trait implemented by all operations.
pub trait Operation: Debug + Send + Sync {
    /// Returns the token used to display the operation.
    // NOTE: this is a `&self` method and not an associated constant to make the trait object-safe
    fn token(&self) -> &'static str;

    /// The operation's signature, which may contain generic placeholders.
    fn signature(&self) -> &'static Signature;

    /// Evaluates the operation on its unevaluated arguments. The operation decides whether, and
    /// in which order, each argument is evaluated.
    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error>;

    /// Given arguments that are already simplified (and not all constant), returns a
    /// structurally different node that evaluates identically for every assignment, or [`None`]
    /// if there is none.
    ///
    /// Every step taken is reported to the step collector.
    fn simplify(&self, _args: &[Node], _step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        None
    }

    /// Registers, in the given engine, the facts that follow from `node` (an application of this
    /// operation to `args`) evaluating to `true` or `false`.
    fn add_rules(&self, _node: &Node, _args: &[Node], _engine: &mut RulesEngine) {}

    /// Returns a node equivalent to the negation of this operation applied to `args`, if one
    /// exists that is simpler than wrapping the application in `false?`.
    fn negate(&self, _args: &[Node]) -> Option<Node> {
        None
    }

    /// Returns true if evaluating the operation can raise a domain error.
    fn is_fallible(&self) -> bool {
        false
    }
}

/// A handle to an operation of the catalog.
///
/// Handles are compared, hashed and ordered by the operation's display token.
#[derive(Clone, Copy)]
pub struct Op(pub &'static dyn Operation);

impl Deref for Op {
    type Target = dyn Operation;

    fn deref(&self) -> &Self::Target {
        self.0
    }
}

impl Debug for Op {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Op({})", self.token())
    }
}

impl PartialEq for Op {
    fn eq(&self, other: &Self) -> bool {
        self.token() == other.token()
    }
}

impl Eq for Op {}

impl Hash for Op {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.token().hash(state);
    }
}

impl Ord for Op {
    fn cmp(&self, other: &Self) -> Ordering {
        self.token().cmp(other.token())
    }
}

impl PartialOrd for Op {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub const ADD: Op = Op(&math::Add);
pub const SUBTRACT: Op = Op(&math::Subtract);
pub const MULTIPLY: Op = Op(&math::Multiply);
pub const DIVIDE: Op = Op(&math::Divide);

pub const EQUAL: Op = Op(&compare::Equal);
pub const NOT_EQUAL: Op = Op(&compare::NotEqual);
pub const LESS: Op = Op(&compare::Less);
pub const LESS_EQUAL: Op = Op(&compare::LessEqual);
pub const GREATER: Op = Op(&compare::Greater);
pub const GREATER_EQUAL: Op = Op(&compare::GreaterEqual);

pub const AND: Op = Op(&logic::And);
pub const OR: Op = Op(&logic::Or);
pub const XOR: Op = Op(&logic::Xor);
pub const NOT: Op = Op(&logic::IsFalse);

pub const ZERO: Op = Op(&classify::IsZero);
pub const POSITIVE: Op = Op(&classify::IsPositive);
pub const NEGATIVE: Op = Op(&classify::IsNegative);
pub const EVEN: Op = Op(&classify::IsEven);
pub const ODD: Op = Op(&classify::IsOdd);

pub const IF: Op = Op(&choice::If);
pub const OR_ELSE: Op = Op(&choice::OrElse);

pub const MAP: Op = Op(&hof::Map);
pub const FILTER: Op = Op(&hof::Filter);
pub const REDUCE: Op = Op(&hof::Reduce);
pub const ANY: Op = Op(&hof::IsAny);
pub const ALL: Op = Op(&hof::IsAll);
pub const NONE: Op = Op(&hof::IsNone);

/// Returns every operation of the catalog, keyed by display token.
pub fn all() -> HashMap<&'static str, Op> {
    macro_rules! build {
        ($($upname:ident),* $(,)?) => {
            [
                $(
                    ($upname.token(), $upname),
                )*
            ]
                .into_iter()
                .collect()
        };
    }

    build! {
        ADD, SUBTRACT, MULTIPLY, DIVIDE,
        EQUAL, NOT_EQUAL, LESS, LESS_EQUAL, GREATER, GREATER_EQUAL,
        AND, OR, XOR, NOT,
        ZERO, POSITIVE, NEGATIVE, EVEN, ODD,
        IF, OR_ELSE,
        MAP, FILTER, REDUCE, ANY, ALL, NONE,
    }
}

static CATALOG: Lazy<HashMap<&'static str, Op>> = Lazy::new(all);

/// Returns the operation with the given display token.
pub fn get(token: &str) -> Option<Op> {
    CATALOG.get(token).copied()
}

/// Evaluates every argument, in order, for operations that need all of their argument values.
pub(crate) fn evaluate_args<const N: usize>(
    token: &'static str,
    args: &[Node],
    assignments: &Assignments,
) -> Result<[Value; N], Error> {
    let values = args.iter()
        .map(|arg| arg.evaluate(assignments))
        .collect::<Result<Vec<_>, _>>()?;
    values.try_into()
        .map_err(|values: Vec<Value>| arity_mismatch(token, N, values.len()))
}

/// Returns the arguments as an array, for operations that evaluate their arguments themselves.
pub(crate) fn unpack<'a, const N: usize>(token: &'static str, args: &'a [Node]) -> Result<&'a [Node; N], Error> {
    args.try_into().map_err(|_| arity_mismatch(token, N, args.len()))
}

fn arity_mismatch(token: &'static str, expected: usize, found: usize) -> Error {
    Error::spanless(ArityMismatch { token, expected, found })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn catalog_is_keyed_by_token() {
        let catalog = all();
        assert_eq!(catalog.len(), 27);
        for (token, op) in catalog {
            assert_eq!(token, op.token());
            assert_eq!(get(token), Some(op));
        }
        assert_eq!(get("abs"), None);
    }

    #[test]
    fn handles_compare_by_token() {
        assert_eq!(ADD, get("+").unwrap());
        assert_ne!(ADD, SUBTRACT);
        assert!(ADD < SUBTRACT);
    }

    #[test]
    fn only_division_is_fallible() {
        let fallible = all().into_values().filter(|op| op.is_fallible()).collect::<Vec<_>>();
        assert_eq!(fallible, [DIVIDE]);
    }
}
