//! Implementation of the simplification rules.
//!
//! Each rule in this module is a function that takes the (already simplified) arguments of an
//! application as an argument, and returns `Some(node)` with the rewritten application if the rule
//! applies, or `None` if the rule does not apply. The `all` function of each module tries that
//! module's rules in order and returns the result of the first one that applies.

pub mod add;
pub mod choice;
pub mod compare;
pub mod divide;
pub mod hof;
pub mod logic;
pub mod multiply;
pub mod subtract;

use crate::{
    node::Node,
    ops::Op,
    simplify::step::Step,
    step_collector::StepCollector,
};

/// If there are exactly two arguments, calls the given transformation function with them.
///
/// Returns the result of the transformation, or `None` if it was not applied.
pub(crate) fn do_binary<T>(args: &[Node], f: impl Fn(&Node, &Node) -> Option<T>) -> Option<T> {
    match args {
        [a, b] => f(a, b),
        _ => None,
    }
}

/// If there is exactly one argument, calls the given transformation function with it.
///
/// Returns the result of the transformation, or `None` if it was not applied.
pub(crate) fn do_unary<T>(args: &[Node], f: impl Fn(&Node) -> Option<T>) -> Option<T> {
    match args {
        [a] => f(a),
        _ => None,
    }
}

/// If there are exactly three arguments, calls the given transformation function with them.
///
/// Returns the result of the transformation, or `None` if it was not applied.
pub(crate) fn do_ternary<T>(args: &[Node], f: impl Fn(&Node, &Node, &Node) -> Option<T>) -> Option<T> {
    match args {
        [a, b, c] => f(a, b, c),
        _ => None,
    }
}

/// Returns true if swapping the evaluation order of two strictly evaluated arguments cannot
/// change the outcome. At most one of them may fail.
pub(crate) fn can_swap(a: &Node, b: &Node) -> bool {
    a.is_infallible() || b.is_infallible()
}

/// Returns the first argument and the second argument if the node is an application of the
/// given binary operation.
pub(crate) fn binary_args(node: &Node, op: Op) -> Option<(&Node, &Node)> {
    match node.args_of(op)? {
        [a, b] => Some((a, b)),
        _ => None,
    }
}

/// `(op b a) = (op a b)` if `a` orders before `b`, for a commutative operation `op` that evaluates
/// both of its arguments.
pub fn reorder(op: Op, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        (b < a && can_swap(a, b))
            .then(|| Node::build(op, op.signature().ret.clone(), vec![b.clone(), a.clone()]))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Reorder);
    Some(opt)
}
