//! Simplification rules for `if` and `or-else`.

use crate::{
    node::Node,
    ops::{self, choice, logic::not},
    rules_engine::RulesEngine,
    simplify::{rules::{binary_args, do_binary, do_ternary}, step::Step},
    step_collector::StepCollector,
    types::Type,
    value::Value,
};

/// `(if true a b) = a`
/// `(if false a b) = b`
pub fn constant_condition(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_ternary(args, |condition, then, otherwise| {
        let value = condition.as_boolean()?;
        Some(if value { then.clone() } else { otherwise.clone() })
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::ConstantCondition);
    Some(opt)
}

/// `(if c a a) = a`
pub fn equal_branches(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_ternary(args, |condition, then, otherwise| {
        (then == otherwise && condition.is_infallible()).then(|| then.clone())
    })?;

    step_collector.push(Step::EqualBranches);
    Some(opt)
}

/// `(if c true false) = c`
/// `(if c false true) = (false? c)`
pub fn boolean_branches(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_ternary(args, |condition, then, otherwise| {
        match (then.as_boolean()?, otherwise.as_boolean()?) {
            (true, false) => Some(condition.clone()),
            (false, true) => Some(not(condition.clone())),
            _ => None,
        }
    })?;

    step_collector.push(Step::BooleanIdentity);
    Some(opt)
}

/// `(if (false? c) a b) = (if c b a)`
pub fn negated_condition(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_ternary(args, |condition, then, otherwise| {
        let [inner] = condition.args_of(ops::NOT)? else { return None };
        Some(choice::if_then_else(inner.clone(), otherwise.clone(), then.clone()))
    })?;

    step_collector.push(Step::NegatedCondition);
    Some(opt)
}

/// Replaces the boolean nodes of a branch whose value is known from the facts with that value.
fn substitute(branch: &Node, engine: &RulesEngine) -> Node {
    let known = |node: &Node| {
        !node.is_constant()
            && node.ty() == &Type::Boolean
            && node.is_infallible()
            && engine.value_of(node).is_some()
    };
    let rewrite = |node: &Node| engine.value_of(node).map_or_else(|| node.clone(), Node::boolean);
    branch.replace_all(&known, &rewrite)
}

/// Inside each branch, the condition is known to be true (or false). Everything that follows from
/// it is substituted into the branch.
///
/// `(if (< a b) (<= a b) c) = (if (< a b) true c)`
/// `(if (= a b) c (!= a b)) = (if (= a b) c true)`
pub fn substitute_facts(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let (node, step) = do_ternary(args, |condition, then, otherwise| {
        let when_true = RulesEngine::build(condition, true);
        let when_false = RulesEngine::build(condition, false);

        // a condition that can only take one value
        if condition.is_infallible() {
            if when_true.is_contradiction() {
                return Some((otherwise.clone(), Step::ConstantCondition));
            }
            if when_false.is_contradiction() {
                return Some((then.clone(), Step::ConstantCondition));
            }
        }

        let new_then = substitute(then, &when_true);
        let new_otherwise = substitute(otherwise, &when_false);
        if new_then.ptr_eq(then) && new_otherwise.ptr_eq(otherwise) {
            return None;
        }
        Some((choice::if_then_else(condition.clone(), new_then, new_otherwise), Step::SubstituteFacts))
    })?;

    step_collector.push(step);
    Some(node)
}

/// Applies all rules for `if`.
pub fn if_then_else(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    constant_condition(args, step_collector)
        .or_else(|| equal_branches(args, step_collector))
        .or_else(|| boolean_branches(args, step_collector))
        .or_else(|| negated_condition(args, step_collector))
        .or_else(|| substitute_facts(args, step_collector))
}

/// `(or-else nil a) = a`
/// `(or-else 3 a) = 3`
pub fn constant_optional(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |optional, fallback| match optional.as_constant()? {
        Value::Nil => Some(fallback.clone()),
        value => Some(Node::constant(value.clone(), fallback.ty().clone())),
    })?;

    step_collector.push(Step::ConstantCondition);
    Some(opt)
}

/// Removes the repeated optionals of a chain of `or-else` applications. A repeated optional is
/// absent whenever it is reached, since it was absent the first time.
///
/// `(or-else a (or-else b (or-else a c))) = (or-else a (or-else b c))`
pub fn collapse_duplicates(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |first, rest| {
        let mut optionals = vec![first];
        let mut duplicates = false;
        let mut last = rest;
        while let Some((optional, next)) = binary_args(last, ops::OR_ELSE) {
            if optionals.contains(&optional) {
                duplicates = true;
            } else {
                optionals.push(optional);
            }
            last = next;
        }

        if !duplicates {
            return None;
        }
        Some(optionals.into_iter()
            .rev()
            .fold(last.clone(), |chain, optional| choice::or_else(optional.clone(), chain)))
    })?;

    step_collector.push(Step::CollapseDuplicates);
    Some(opt)
}

/// Applies all rules for `or-else`.
pub fn or_else(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    constant_optional(args, step_collector)
        .or_else(|| collapse_duplicates(args, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{simplify::simplify, test_util::*};
    use super::*;

    fn cond(condition: Node, then: Node, otherwise: Node) -> Node {
        call(ops::IF, [condition, then, otherwise])
    }

    fn less(a: usize, b: usize) -> Node {
        call(ops::LESS, [int_var(a), int_var(b)])
    }

    #[test]
    fn constant_and_equal_branches() {
        assert_eq!(simplify(&cond(boolean(true), int(7), int(8))), int(7));
        assert_eq!(simplify(&cond(boolean(false), int(7), int_var(0))), int_var(0));
        assert_eq!(simplify(&cond(call(ops::ZERO, [int_var(0)]), int(7), int(7))), int(7));

        // the condition may fail, so it must be kept
        let fallible = cond(call(ops::ZERO, [div(int(1), int_var(0))]), int(7), int(7));
        assert_eq!(simplify(&fallible), fallible);
    }

    #[test]
    fn negated_condition_swaps_branches() {
        let tree = cond(call(ops::NOT, [bool_var(0)]), int_var(1), int_var(2));
        assert_eq!(simplify(&tree), cond(bool_var(0), int_var(2), int_var(1)));
    }

    #[test]
    fn boolean_branches_are_the_condition() {
        assert_eq!(simplify(&cond(bool_var(0), boolean(true), boolean(false))), bool_var(0));
    }

    #[test]
    fn facts_are_substituted() {
        // (if (< v0 v1) (if (<= v0 v1) v2 v3) (if (= v0 v1) v4 v5))
        let tree = cond(
            less(0, 1),
            cond(call(ops::LESS_EQUAL, [int_var(0), int_var(1)]), int_var(2), int_var(3)),
            cond(call(ops::EQUAL, [int_var(0), int_var(1)]), int_var(4), int_var(5)),
        );
        assert_eq!(simplify(&tree), cond(less(0, 1), int_var(2), cond(
            call(ops::EQUAL, [int_var(0), int_var(1)]),
            int_var(4),
            int_var(5),
        )));

        // (if v0 (and v0 v1) v1)
        let tree = cond(bool_var(0), call(ops::AND, [bool_var(0), bool_var(1)]), bool_var(1));
        assert_eq!(simplify(&tree), bool_var(1));
    }

    #[test]
    fn or_else_constants() {
        let nil = Node::constant(Value::Nil, Type::optional(Type::Integer));
        assert_eq!(simplify(&call(ops::OR_ELSE, [nil, int_var(1)])), int_var(1));

        let some = Node::constant(Value::Integer(3), Type::optional(Type::Integer));
        assert_eq!(simplify(&call(ops::OR_ELSE, [some, int_var(1)])), int(3));
    }

    #[test]
    fn or_else_duplicates() {
        let optional = |id| Node::variable(id, Type::optional(Type::Integer));
        let chain = |ids: &[usize], last: Node| {
            ids.iter().rev().fold(last, |chain, &id| call(ops::OR_ELSE, [optional(id), chain]))
        };

        let tree = chain(&[0, 1, 0, 2, 1], int(5));
        assert_eq!(simplify(&tree), chain(&[0, 1, 2], int(5)));

        let unique = chain(&[0, 1, 2], int(5));
        assert_eq!(simplify(&unique), unique);
    }
}
