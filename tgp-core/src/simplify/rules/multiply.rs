//! Simplification rules for multiplications.

use crate::{
    node::Node,
    ops::{self, math::multiply},
    simplify::{rules::{binary_args, do_binary, reorder}, step::Step},
    step_collector::StepCollector,
};

/// `(* 0 a) = 0`
pub fn multiply_zero(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        (a.as_integer() == Some(0) && b.is_infallible()).then(|| Node::integer(0))
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::MultiplyZero);
    Some(opt)
}

/// `(* 1 a) = a`
pub fn multiply_one(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| (a.as_integer() == Some(1)).then(|| b.clone()))?;

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `(* 2 (* 3 a)) = (* 6 a)`
pub fn combine_constants(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        let n = a.as_integer()?;
        let (lhs, rhs) = binary_args(b, ops::MULTIPLY)?;
        let m = lhs.as_integer()?;
        Some(multiply(Node::integer(n.wrapping_mul(m)), rhs.clone()))
    })?;

    step_collector.push(Step::CombineConstants);
    Some(opt)
}

/// Distributes a constant factor over an addition or subtraction.
///
/// `(* 2 (+ 3 a)) = (+ 6 (* 2 a))`
/// `(* 2 (- a b)) = (- (* 2 a) (* 2 b))`
pub fn distribute(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        let n = a.as_integer()?;
        let function = b.as_function()?;
        let op = function.op();
        if op != ops::ADD && op != ops::SUBTRACT {
            return None;
        }

        let [lhs, rhs] = function.args() else { return None };
        let lhs = match lhs.as_integer() {
            Some(m) => Node::integer(n.wrapping_mul(m)),
            None => multiply(a.clone(), lhs.clone()),
        };
        Some(Node::build(op, b.ty().clone(), vec![lhs, multiply(a.clone(), rhs.clone())]))
    })?;

    step_collector.push(Step::Distribute);
    Some(opt)
}

/// Applies all multiplication rules.
pub fn all(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    reorder(ops::MULTIPLY, args, step_collector)
        .or_else(|| multiply_zero(args, step_collector))
        .or_else(|| multiply_one(args, step_collector))
        .or_else(|| combine_constants(args, step_collector))
        .or_else(|| distribute(args, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{simplify::simplify, test_util::*};

    #[test]
    fn zero_and_one() {
        assert_eq!(simplify(&mul(int_var(0), int(0))), int(0));
        assert_eq!(simplify(&mul(int_var(0), int(1))), int_var(0));

        let fallible = mul(int(0), div(int(1), int_var(0)));
        assert_eq!(simplify(&fallible), fallible);
    }

    #[test]
    fn constants_combine() {
        assert_eq!(simplify(&mul(int(2), mul(int_var(0), int(3)))), mul(int(6), int_var(0)));
    }

    #[test]
    fn distributes_constants() {
        // (* 2 (+ 3 v0)) = (+ 6 (* 2 v0))
        assert_eq!(simplify(&mul(int(2), add(int(3), int_var(0)))), add(int(6), mul(int(2), int_var(0))));

        // (* 2 (- v0 v1)) = (- (* 2 v0) (* 2 v1))
        assert_eq!(
            simplify(&mul(int(2), sub(int_var(0), int_var(1)))),
            sub(mul(int(2), int_var(0)), mul(int(2), int_var(1))),
        );
    }
}
