//! Simplification rules for boolean connectives.
//!
//! Beyond the usual identities, the rules for `and`, `or` and `xor` ask a [`RulesEngine`] what
//! follows from one argument holding (or not), to find arguments that imply, exclude or are
//! equivalent to each other. These rules only apply when no argument can fail, since they may
//! drop an argument or skip evaluating it.

use crate::{
    node::Node,
    ops::{self, logic::{and as and_node, not}, Op},
    rules_engine::RulesEngine,
    simplify::{rules::{do_binary, do_unary, reorder}, step::Step},
    step_collector::StepCollector,
};

/// The value of `(op a b)` if either argument has value `!unit`, where `unit` is the identity of
/// the connective `op`: `true` for `and`, `false` for `or`.
fn absorbing(unit: bool) -> Node {
    Node::boolean(!unit)
}

/// Returns the step explaining why a connective was replaced by its absorbing value.
fn absorbing_step(unit: bool) -> Step {
    if unit {
        Step::Contradiction
    } else {
        Step::Tautology
    }
}

/// `(and true a) = a`
/// `(and false a) = false`
/// `(or false a) = a`
/// `(or true a) = true`
fn identity(args: &[Node], unit: bool, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| match (a.as_boolean(), b.as_boolean()) {
        (Some(value), _) if value == unit => Some(b.clone()),
        (_, Some(value)) if value == unit => Some(a.clone()),
        (Some(_), _) => Some(absorbing(unit)),
        // the first argument is evaluated before the second one
        (_, Some(_)) if a.is_infallible() => Some(absorbing(unit)),
        _ => None,
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::BooleanIdentity);
    Some(opt)
}

/// `(and a a) = a`
/// `(or a a) = a`
fn idempotent(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| (a == b).then(|| a.clone()))?;

    step_collector.push(Step::Idempotent);
    Some(opt)
}

/// Orders the arguments of a short-circuiting connective, if neither argument can fail.
fn reorder_lazy(op: Op, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    if args.iter().all(Node::is_infallible) {
        reorder(op, args, step_collector)
    } else {
        None
    }
}

/// Uses the facts that follow from the arguments having value `unit` to find a simpler node.
///
/// `(and (= a b) (!= a b)) = false`
/// `(and (< a b) (<= a b)) = (< a b)`
/// `(and (<= a b) (<= b a)) = (= a b)`
/// `(or (< a b) (<= b a)) = true`
fn facts(args: &[Node], unit: bool, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let (node, step) = do_binary(args, |a, b| {
        if !a.is_infallible() || !b.is_infallible() {
            return None;
        }

        let engine_a = RulesEngine::build(a, unit);
        let engine_b = RulesEngine::build(b, unit);
        if engine_a.is_contradiction() || engine_b.is_contradiction() {
            return Some((absorbing(unit), absorbing_step(unit)));
        }

        match engine_a.value_of(b) {
            Some(value) if value == unit => return Some((a.clone(), Step::Redundant)),
            Some(_) => return Some((absorbing(unit), absorbing_step(unit))),
            None => {},
        }
        match engine_b.value_of(a) {
            Some(value) if value == unit => return Some((b.clone(), Step::Redundant)),
            Some(_) => return Some((absorbing(unit), absorbing_step(unit))),
            None => {},
        }

        let mut both = engine_a;
        both.add_fact(b.clone(), unit);
        if both.is_contradiction() {
            return Some((absorbing(unit), absorbing_step(unit)));
        }

        // look for a smaller node that has value `unit` exactly when both arguments do
        let size = 1 + a.node_count() + b.node_count();
        let mut candidates = both.facts()
            .iter()
            .filter(|&(node, &value)| {
                value == unit
                    && node != a
                    && node != b
                    && !node.is_constant()
                    && node.is_infallible()
                    && node.node_count() < size
            })
            .map(|(node, _)| node)
            .collect::<Vec<_>>();
        candidates.sort_by(|x, y| x.node_count().cmp(&y.node_count()).then_with(|| x.cmp(y)));

        candidates.into_iter()
            .find(|candidate| {
                let engine = RulesEngine::build(candidate, unit);
                engine.value_of(a) == Some(unit) && engine.value_of(b) == Some(unit)
            })
            .map(|candidate| (candidate.clone(), Step::Equivalent))
    })?;

    step_collector.push(step);
    Some(node)
}

/// Applies all rules for `and`.
pub fn and(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    identity(args, true, step_collector)
        .or_else(|| idempotent(args, step_collector))
        .or_else(|| reorder_lazy(ops::AND, args, step_collector))
        .or_else(|| facts(args, true, step_collector))
}

/// Applies all rules for `or`.
pub fn or(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    identity(args, false, step_collector)
        .or_else(|| idempotent(args, step_collector))
        .or_else(|| reorder_lazy(ops::OR, args, step_collector))
        .or_else(|| facts(args, false, step_collector))
}

/// `(xor false a) = a`
/// `(xor true a) = (false? a)`
pub fn xor_identity(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| match (a.as_boolean(), b.as_boolean()) {
        (Some(false), _) => Some(b.clone()),
        (_, Some(false)) => Some(a.clone()),
        (Some(true), _) => Some(not(b.clone())),
        (_, Some(true)) => Some(not(a.clone())),
        _ => None,
    })?;

    step_collector.push(Step::BooleanIdentity);
    Some(opt)
}

/// `(xor a a) = false`
pub fn xor_self(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| (a == b && a.is_infallible()).then(|| Node::boolean(false)))?;

    step_collector.push(Step::Contradiction);
    Some(opt)
}

/// Uses the facts that follow from each argument to decide the result, or to drop an argument
/// whose value is fixed.
///
/// `(xor (< a b) (<= b a)) = true`
/// `(xor (= a b) (>= b a)) = (< a b)` once the comparisons are in canonical form
pub fn xor_facts(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let (node, step) = do_binary(args, |a, b| {
        if !a.is_infallible() || !b.is_infallible() {
            return None;
        }

        // an argument that can only take one value is dropped
        for (fixed, other) in [(a, b), (b, a)] {
            if RulesEngine::build(fixed, true).is_contradiction() {
                return Some((other.clone(), Step::BooleanIdentity));
            }
            if RulesEngine::build(fixed, false).is_contradiction() {
                return Some((not(other.clone()), Step::BooleanIdentity));
            }
        }

        let when_true = RulesEngine::build(a, true).value_of(b);
        let when_false = RulesEngine::build(a, false).value_of(b);
        match (when_true, when_false) {
            (Some(true), Some(false)) => Some((Node::boolean(false), Step::Contradiction)),
            (Some(false), Some(true)) => Some((Node::boolean(true), Step::Tautology)),
            _ => None,
        }
    })?;

    step_collector.push(step);
    Some(node)
}

/// Applies all rules for `xor`.
pub fn xor(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    reorder(ops::XOR, args, step_collector)
        .or_else(|| xor_identity(args, step_collector))
        .or_else(|| xor_self(args, step_collector))
        .or_else(|| xor_facts(args, step_collector))
}

/// Replaces a negation by the cheaper equivalent its argument's operation provides, including
/// double negation.
///
/// `(false? (false? a)) = a`
/// `(false? (< a b)) = (<= b a)`
pub fn negate(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_unary(args, |inner| {
        let function = inner.as_function()?;
        let fallible = function.args().iter().filter(|arg| !arg.is_infallible()).count();
        // the replacement may evaluate the arguments in another order
        if fallible > 1 {
            return None;
        }
        function.op().negate(function.args())
    })?;

    step_collector.push(Step::Negate);
    Some(opt)
}

/// `(false? (or a b)) = (and (false? a) (false? b))`
pub fn de_morgan(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_unary(args, |inner| {
        let [a, b] = inner.args_of(ops::OR)? else { return None };
        Some(and_node(not(a.clone()), not(b.clone())))
    })?;

    step_collector.push(Step::DeMorgan);
    Some(opt)
}

/// Looks for a smaller node that holds exactly when the argument does not.
///
/// `(false? (and (<= a b) (<= b a))) = (!= a b)`
pub fn negated_equivalent(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_unary(args, |inner| {
        if !inner.is_infallible() {
            return None;
        }

        let size = 1 + inner.node_count();
        let engine = RulesEngine::build(inner, true);
        let mut candidates = engine.facts()
            .iter()
            .filter(|&(node, &value)| {
                !value && !node.is_constant() && node.is_infallible() && node.node_count() < size
            })
            .map(|(node, _)| node)
            .collect::<Vec<_>>();
        candidates.sort_by(|x, y| x.node_count().cmp(&y.node_count()).then_with(|| x.cmp(y)));

        candidates.into_iter()
            .find(|candidate| RulesEngine::build(candidate, false).value_of(inner) == Some(true))
            .cloned()
    })?;

    step_collector.push(Step::Equivalent);
    Some(opt)
}

/// Applies all rules for `false?`.
pub fn is_false(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    negate(args, step_collector)
        .or_else(|| de_morgan(args, step_collector))
        .or_else(|| negated_equivalent(args, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{simplify::simplify, test_util::*};
    use super::*;

    fn op(op: Op, a: Node, b: Node) -> Node {
        call(op, [a, b])
    }

    fn cmp(o: Op, a: usize, b: usize) -> Node {
        call(o, [int_var(a), int_var(b)])
    }

    #[test]
    fn identities() {
        let v0 = bool_var(0);
        assert_eq!(simplify(&op(ops::AND, boolean(true), v0.clone())), v0);
        assert_eq!(simplify(&op(ops::AND, v0.clone(), boolean(false))), boolean(false));
        assert_eq!(simplify(&op(ops::OR, v0.clone(), boolean(false))), v0);
        assert_eq!(simplify(&op(ops::OR, boolean(true), v0.clone())), boolean(true));
        assert_eq!(simplify(&op(ops::XOR, v0.clone(), boolean(true))), call(ops::NOT, [v0.clone()]));
        assert_eq!(simplify(&op(ops::AND, v0.clone(), v0.clone())), v0);
    }

    #[test]
    fn fallible_operand_is_kept() {
        // (and (zero? (/ 1 v0)) false) must still divide
        let tree = op(ops::AND, call(ops::ZERO, [div(int(1), int_var(0))]), boolean(false));
        assert_eq!(simplify(&tree), tree);
    }

    #[test]
    fn contradiction() {
        let tree = op(ops::AND, cmp(ops::EQUAL, 0, 1), cmp(ops::NOT_EQUAL, 0, 1));
        assert_eq!(simplify(&tree), boolean(false));

        let tree = op(ops::AND, cmp(ops::LESS, 0, 1), cmp(ops::GREATER, 0, 1));
        assert_eq!(simplify(&tree), boolean(false));
    }

    #[test]
    fn tautology() {
        let tree = op(ops::OR, cmp(ops::LESS, 0, 1), cmp(ops::GREATER_EQUAL, 0, 1));
        assert_eq!(simplify(&tree), boolean(true));

        let tree = op(ops::XOR, cmp(ops::LESS, 0, 1), cmp(ops::LESS_EQUAL, 1, 0));
        assert_eq!(simplify(&tree), boolean(true));
    }

    #[test]
    fn redundant_operand() {
        let tree = op(ops::AND, cmp(ops::LESS, 0, 1), cmp(ops::LESS_EQUAL, 0, 1));
        assert_eq!(simplify(&tree), cmp(ops::LESS, 0, 1));

        let tree = op(ops::OR, cmp(ops::LESS, 0, 1), cmp(ops::LESS_EQUAL, 0, 1));
        assert_eq!(simplify(&tree), cmp(ops::LESS_EQUAL, 0, 1));
    }

    #[test]
    fn equivalent_node() {
        let tree = op(ops::AND, cmp(ops::GREATER_EQUAL, 1, 0), cmp(ops::GREATER_EQUAL, 0, 1));
        assert_eq!(simplify(&tree), cmp(ops::EQUAL, 0, 1));

        let tree = op(ops::OR, cmp(ops::LESS, 0, 1), cmp(ops::EQUAL, 0, 1));
        assert_eq!(simplify(&tree), cmp(ops::LESS_EQUAL, 0, 1));

        // neither positive nor negative
        let tree = op(
            ops::AND,
            call(ops::NOT, [call(ops::POSITIVE, [int_var(0)])]),
            call(ops::NOT, [call(ops::NEGATIVE, [int_var(0)])]),
        );
        assert_eq!(simplify(&tree), call(ops::ZERO, [int_var(0)]));
    }

    #[test]
    fn negation() {
        let v0 = bool_var(0);
        assert_eq!(simplify(&call(ops::NOT, [call(ops::NOT, [v0.clone()])])), v0);
        assert_eq!(simplify(&call(ops::NOT, [cmp(ops::LESS, 0, 1)])), cmp(ops::LESS_EQUAL, 1, 0));
        assert_eq!(
            simplify(&call(ops::NOT, [call(ops::EVEN, [int_var(0)])])),
            call(ops::ODD, [int_var(0)]),
        );
    }

    #[test]
    fn de_morgan_over_or() {
        let tree = call(ops::NOT, [op(ops::OR, bool_var(0), bool_var(1))]);
        assert_eq!(
            simplify(&tree),
            op(ops::AND, call(ops::NOT, [bool_var(0)]), call(ops::NOT, [bool_var(1)])),
        );
    }
}
