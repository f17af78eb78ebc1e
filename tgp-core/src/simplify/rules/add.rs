//! Simplification rules for additions.

use crate::{
    node::Node,
    ops::{self, math::{add, multiply, subtract}},
    simplify::{rules::{binary_args, do_binary, reorder}, step::Step},
    step_collector::StepCollector,
};

/// `(+ 0 a) = a`
pub fn add_zero(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| (a.as_integer() == Some(0)).then(|| b.clone()))?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `(+ a a) = (* 2 a)`
pub fn add_self(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| (a == b).then(|| multiply(Node::integer(2), a.clone())))?;

    step_collector.push(Step::AddSelf);
    Some(opt)
}

/// `(+ -3 a) = (- a 3)`
pub fn add_negative(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        let n = a.as_integer()?;
        // the negation of the minimum wraps around to itself
        (n < 0 && n != i64::MIN).then(|| subtract(b.clone(), Node::integer(-n)))
    })?;

    step_collector.push(Step::AddNegative);
    Some(opt)
}

/// `(+ 1 (+ 2 a)) = (+ 3 a)`
/// `(+ 1 (- 2 a)) = (- 3 a)`
/// `(+ 1 (- a 2)) = (+ -1 a)`
pub fn combine_constants(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        let n = a.as_integer()?;
        if let Some((lhs, rhs)) = binary_args(b, ops::ADD) {
            let m = lhs.as_integer()?;
            return Some(add(Node::integer(n.wrapping_add(m)), rhs.clone()));
        }

        let (lhs, rhs) = binary_args(b, ops::SUBTRACT)?;
        if let Some(m) = lhs.as_integer() {
            Some(subtract(Node::integer(n.wrapping_add(m)), rhs.clone()))
        } else {
            let m = rhs.as_integer()?;
            Some(add(Node::integer(n.wrapping_sub(m)), lhs.clone()))
        }
    })?;

    step_collector.push(Step::CombineConstants);
    Some(opt)
}

/// Moves the constant of a nested addition to the outer addition, where it can be combined with
/// other constants.
///
/// `(+ a (+ 1 b)) = (+ 1 (+ a b))`
/// `(+ (+ 1 a) b) = (+ 1 (+ a b))`
pub fn hoist_constant(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        if !a.is_constant() {
            if let Some((constant, rhs)) = binary_args(b, ops::ADD) {
                if constant.is_constant() {
                    return Some(add(constant.clone(), add(a.clone(), rhs.clone())));
                }
            }
        }

        let (constant, lhs) = binary_args(a, ops::ADD)?;
        constant.is_constant()
            .then(|| add(constant.clone(), add(lhs.clone(), b.clone())))
    })?;

    step_collector.push(Step::HoistConstant);
    Some(opt)
}

/// Applies all addition rules.
pub fn all(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    reorder(ops::ADD, args, step_collector)
        .or_else(|| add_zero(args, step_collector))
        .or_else(|| add_self(args, step_collector))
        .or_else(|| add_negative(args, step_collector))
        .or_else(|| combine_constants(args, step_collector))
        .or_else(|| hoist_constant(args, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{simplify::simplify, test_util::*};

    #[test]
    fn zero() {
        assert_eq!(simplify(&add(int(0), int_var(0))), int_var(0));
        assert_eq!(simplify(&add(int_var(0), int(0))), int_var(0));
    }

    #[test]
    fn self_addition() {
        assert_eq!(simplify(&add(int_var(0), int_var(0))), mul(int(2), int_var(0)));
    }

    #[test]
    fn canonical_order() {
        assert_eq!(simplify(&add(int_var(1), int_var(0))), add(int_var(0), int_var(1)));
        assert_eq!(simplify(&add(int_var(0), int(3))), add(int(3), int_var(0)));
    }

    #[test]
    fn negative_constant() {
        assert_eq!(simplify(&add(int(-3), int_var(0))), sub(int_var(0), int(3)));
        assert_eq!(simplify(&add(int_var(0), int(-3))), sub(int_var(0), int(3)));

        let min = add(int(i64::MIN), int_var(0));
        assert_eq!(simplify(&min), min);
    }

    #[test]
    fn constants_combine() {
        // (+ 1 (+ v0 2)) = (+ 3 v0)
        assert_eq!(simplify(&add(int(1), add(int_var(0), int(2)))), add(int(3), int_var(0)));

        // (+ 1 (- 2 v0)) = (- 3 v0)
        assert_eq!(simplify(&add(int(1), sub(int(2), int_var(0)))), sub(int(3), int_var(0)));

        // (+ 5 (- v0 2)) = (+ 3 v0)
        assert_eq!(simplify(&add(int(5), sub(int_var(0), int(2)))), add(int(3), int_var(0)));
    }

    #[test]
    fn constants_hoist() {
        // (+ v0 (+ 1 v1)) = (+ 1 (+ v0 v1))
        assert_eq!(
            simplify(&add(int_var(0), add(int(1), int_var(1)))),
            add(int(1), add(int_var(0), int_var(1))),
        );

        // (+ (+ 1 v1) (+ 2 v0)) = (+ 3 (+ v0 v1))
        assert_eq!(
            simplify(&add(add(int(1), int_var(1)), add(int(2), int_var(0)))),
            add(int(3), add(int_var(0), int_var(1))),
        );
    }
}
