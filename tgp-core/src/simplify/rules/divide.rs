//! Simplification rules for divisions.

use crate::{
    node::Node,
    ops::math::subtract,
    simplify::{rules::do_binary, step::Step},
    step_collector::StepCollector,
};

/// `(/ a 1) = a`
pub fn divide_one(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| (b.as_integer() == Some(1)).then(|| a.clone()))?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::DivideOne);
    Some(opt)
}

/// `(/ a -1) = (- 0 a)`
pub fn divide_negative_one(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |a, b| {
        (b.as_integer() == Some(-1)).then(|| subtract(Node::integer(0), a.clone()))
    })?;

    step_collector.push(Step::DivideNegativeOne);
    Some(opt)
}

/// Applies all division rules.
pub fn all(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    divide_one(args, step_collector)
        .or_else(|| divide_negative_one(args, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{simplify::simplify, test_util::*};

    #[test]
    fn unit_divisors() {
        assert_eq!(simplify(&div(int_var(0), int(1))), int_var(0));
        assert_eq!(simplify(&div(int_var(0), int(-1))), sub(int(0), int_var(0)));

        let unknown = div(int_var(0), int_var(1));
        assert_eq!(simplify(&unknown), unknown);
    }
}
