//! Simplification rules for comparisons.

use crate::{
    node::Node,
    ops::{self, Op},
    simplify::{rules::{can_swap, do_binary, reorder}, step::Step},
    step_collector::StepCollector,
    types::Type,
};

/// Compares a node with itself, which gives the given result.
///
/// `(= a a) = true`
/// `(< a a) = false`
fn reflexive(args: &[Node], result: bool, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| (a == b && a.is_infallible()).then(|| Node::boolean(result)))?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::Reflexive);
    Some(opt)
}

/// Rewrites `(> a b)` and `(>= a b)` to the given operation with swapped arguments.
///
/// `(> a b) = (< b a)`
/// `(>= a b) = (<= b a)`
pub fn swap(args: &[Node], op: Op, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        can_swap(a, b).then(|| Node::build(op, Type::Boolean, vec![b.clone(), a.clone()]))
    })?;

    step_collector.push(Step::SwapComparison);
    Some(opt)
}

/// Applies all rules for `=`.
pub fn equal(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    reorder(ops::EQUAL, args, step_collector)
        .or_else(|| reflexive(args, true, step_collector))
}

/// Applies all rules for `!=`.
pub fn not_equal(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    reorder(ops::NOT_EQUAL, args, step_collector)
        .or_else(|| reflexive(args, false, step_collector))
}

/// Applies all rules for `<`.
pub fn less(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    reflexive(args, false, step_collector)
}

/// Applies all rules for `<=`.
pub fn less_equal(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    reflexive(args, true, step_collector)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{simplify::simplify, test_util::*};
    use super::*;

    #[test]
    fn greater_is_swapped() {
        assert_eq!(
            simplify(&call(ops::GREATER, [int_var(0), int_var(1)])),
            call(ops::LESS, [int_var(1), int_var(0)]),
        );
        assert_eq!(
            simplify(&call(ops::GREATER_EQUAL, [int_var(0), int_var(1)])),
            call(ops::LESS_EQUAL, [int_var(1), int_var(0)]),
        );
    }

    #[test]
    fn equality_is_ordered() {
        assert_eq!(
            simplify(&call(ops::NOT_EQUAL, [int_var(1), int_var(0)])),
            call(ops::NOT_EQUAL, [int_var(0), int_var(1)]),
        );
    }

    #[test]
    fn self_comparison() {
        for (op, result) in [
            (ops::EQUAL, true),
            (ops::NOT_EQUAL, false),
            (ops::LESS, false),
            (ops::LESS_EQUAL, true),
            (ops::GREATER, false),
            (ops::GREATER_EQUAL, true),
        ] {
            assert_eq!(simplify(&call(op, [int_var(0), int_var(0)])), boolean(result));
        }

        let fallible = call(ops::LESS, [div(int(1), int_var(0)), div(int(1), int_var(0))]);
        assert_eq!(simplify(&fallible), fallible);
    }
}
