//! Simplification rules for subtractions.

use crate::{
    node::Node,
    ops::{self, math::{add, multiply, subtract}},
    simplify::{rules::{binary_args, can_swap, do_binary}, step::Step},
    step_collector::StepCollector,
};

/// `(- a a) = 0`
pub fn subtract_self(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| (a == b && a.is_infallible()).then(|| Node::integer(0)))?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::SubtractSelf);
    Some(opt)
}

/// `(- a 0) = a`
pub fn subtract_zero(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| (b.as_integer() == Some(0)).then(|| a.clone()))?;

    step_collector.push(Step::SubtractZero);
    Some(opt)
}

/// `(- a -3) = (+ 3 a)`
pub fn subtract_negative(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        let n = b.as_integer()?;
        (n < 0 && n != i64::MIN).then(|| add(Node::integer(-n), a.clone()))
    })?;

    step_collector.push(Step::SubtractNegative);
    Some(opt)
}

/// `(- 0 (- a b)) = (- b a)`
pub fn negate_difference(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        if a.as_integer() != Some(0) {
            return None;
        }
        let (lhs, rhs) = binary_args(b, ops::SUBTRACT)?;
        can_swap(lhs, rhs).then(|| subtract(rhs.clone(), lhs.clone()))
    })?;

    step_collector.push(Step::NegateDifference);
    Some(opt)
}

/// `(- 0 (* 3 a)) = (* -3 a)`
pub fn negate_product(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        if a.as_integer() != Some(0) {
            return None;
        }
        let (factor, rhs) = binary_args(b, ops::MULTIPLY)?;
        let n = factor.as_integer()?;
        Some(multiply(Node::integer(n.wrapping_neg()), rhs.clone()))
    })?;

    step_collector.push(Step::NegateProduct);
    Some(opt)
}

/// `(- 5 (- 2 a)) = (+ 3 a)`
/// `(- 5 (+ 2 a)) = (- 3 a)`
/// `(- (+ 5 a) 2) = (+ 3 a)`
/// `(- (- 5 a) 2) = (- 3 a)`
/// `(- (- a 5) 2) = (- a 7)`
pub fn combine_constants(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        if let Some(n) = a.as_integer() {
            if let Some((lhs, rhs)) = binary_args(b, ops::SUBTRACT) {
                let m = lhs.as_integer()?;
                return Some(add(Node::integer(n.wrapping_sub(m)), rhs.clone()));
            }
            let (lhs, rhs) = binary_args(b, ops::ADD)?;
            let m = lhs.as_integer()?;
            return Some(subtract(Node::integer(n.wrapping_sub(m)), rhs.clone()));
        }

        let m = b.as_integer()?;
        if let Some((lhs, rhs)) = binary_args(a, ops::ADD) {
            let n = lhs.as_integer()?;
            return Some(add(Node::integer(n.wrapping_sub(m)), rhs.clone()));
        }
        let (lhs, rhs) = binary_args(a, ops::SUBTRACT)?;
        match (lhs.as_integer(), rhs.as_integer()) {
            (Some(n), _) => Some(subtract(Node::integer(n.wrapping_sub(m)), rhs.clone())),
            (_, Some(n)) => Some(subtract(lhs.clone(), Node::integer(n.wrapping_add(m)))),
            _ => None,
        }
    })?;

    step_collector.push(Step::CombineConstants);
    Some(opt)
}

/// Applies all subtraction rules.
pub fn all(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    subtract_self(args, step_collector)
        .or_else(|| subtract_zero(args, step_collector))
        .or_else(|| subtract_negative(args, step_collector))
        .or_else(|| negate_difference(args, step_collector))
        .or_else(|| negate_product(args, step_collector))
        .or_else(|| combine_constants(args, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{simplify::simplify, test_util::*};

    #[test]
    fn self_subtraction() {
        assert_eq!(simplify(&sub(int_var(0), int_var(0))), int(0));

        // (/ 1 v0) may fail, so it must be kept
        let fallible = sub(div(int(1), int_var(0)), div(int(1), int_var(0)));
        assert_eq!(simplify(&fallible), fallible);
    }

    #[test]
    fn zero() {
        assert_eq!(simplify(&sub(int_var(0), int(0))), int_var(0));
    }

    #[test]
    fn negative_constant() {
        assert_eq!(simplify(&sub(int_var(0), int(-3))), add(int(3), int_var(0)));
    }

    #[test]
    fn negation() {
        assert_eq!(simplify(&sub(int(0), sub(int_var(0), int_var(1)))), sub(int_var(1), int_var(0)));
        assert_eq!(simplify(&sub(int(0), mul(int(3), int_var(0)))), mul(int(-3), int_var(0)));
        assert_eq!(simplify(&sub(int(0), mul(int(-1), int_var(0)))), int_var(0));
    }

    #[test]
    fn constants_combine() {
        assert_eq!(simplify(&sub(int(5), sub(int(2), int_var(0)))), add(int(3), int_var(0)));
        assert_eq!(simplify(&sub(int(5), add(int(2), int_var(0)))), sub(int(3), int_var(0)));
        assert_eq!(simplify(&sub(add(int(5), int_var(0)), int(2))), add(int(3), int_var(0)));
        assert_eq!(simplify(&sub(sub(int(5), int_var(0)), int(2))), sub(int(3), int_var(0)));
        assert_eq!(simplify(&sub(sub(int_var(0), int(5)), int(2))), sub(int_var(0), int(7)));
    }
}
