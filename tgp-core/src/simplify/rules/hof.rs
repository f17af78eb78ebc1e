//! Simplification rules for higher-order operations.
//!
//! The only rules apply to an empty literal list, where the function argument is never applied.
//! The function argument is dropped, so it must not be able to fail when evaluated.

use crate::{
    node::Node,
    simplify::{rules::{do_binary, do_ternary}, step::Step},
    step_collector::StepCollector,
    types::Type,
    value::Value,
};

/// Returns true if the node is the constant empty list.
fn is_empty_list(node: &Node) -> bool {
    matches!(node.as_constant(), Some(Value::List(values)) if values.is_empty())
}

/// Returns true if evaluating the node holding a function value cannot fail. A variable or a
/// constant only fails when applied.
fn can_drop(function: &Node) -> bool {
    function.is_terminal() || function.is_infallible()
}

/// Builds the constant empty list with the given element type.
fn empty_list(element: Type) -> Node {
    Node::constant(Value::list([]), Type::list(element))
}

/// `(map f []) = []`
pub fn map(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |f, list| {
        if !is_empty_list(list) || !can_drop(f) {
            return None;
        }
        match f.ty() {
            Type::Function(ret, _) => Some(empty_list((**ret).clone())),
            _ => None,
        }
    })?;

    // keep the step collection logic outside of the closure to make it implement `Fn`
    step_collector.push(Step::EmptyList);
    Some(opt)
}

/// `(filter f []) = []`
pub fn filter(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |f, list| {
        (is_empty_list(list) && can_drop(f)).then(|| list.clone())
    })?;

    step_collector.push(Step::EmptyList);
    Some(opt)
}

/// `(reduce f init []) = init`
pub fn reduce(args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_ternary(args, |f, init, list| {
        (is_empty_list(list) && can_drop(f)).then(|| init.clone())
    })?;

    step_collector.push(Step::EmptyList);
    Some(opt)
}

/// `(any? f []) = false`
/// `(all? f []) = true`
/// `(none? f []) = true`
pub fn quantifier(args: &[Node], empty: bool, step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
    let opt = do_binary(args, |f, list| {
        (is_empty_list(list) && can_drop(f)).then(|| Node::boolean(empty))
    })?;

    step_collector.push(Step::EmptyList);
    Some(opt)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{ops, simplify::simplify, test_util::*};
    use super::*;

    fn f(ret: Type, args: Vec<Type>) -> Node {
        Node::variable(0, Type::function(ret, args))
    }

    #[test]
    fn empty_lists() {
        let tree = call(ops::MAP, [f(Type::Boolean, vec![Type::Integer]), int_list([])]);
        assert_eq!(simplify(&tree), empty_list(Type::Boolean));

        let tree = call(ops::FILTER, [f(Type::Boolean, vec![Type::Integer]), int_list([])]);
        assert_eq!(simplify(&tree), int_list([]));

        let tree = call(ops::REDUCE, [f(Type::Integer, vec![Type::Integer, Type::Integer]), int_var(1), int_list([])]);
        assert_eq!(simplify(&tree), int_var(1));

        for (op, empty) in [(ops::ANY, false), (ops::ALL, true), (ops::NONE, true)] {
            let tree = call(op, [f(Type::Boolean, vec![Type::Integer]), int_list([])]);
            assert_eq!(simplify(&tree), boolean(empty));
        }
    }

    #[test]
    fn non_empty_lists_are_kept() {
        let tree = call(ops::ANY, [f(Type::Boolean, vec![Type::Integer]), int_list([1])]);
        assert_eq!(simplify(&tree), tree);
    }
}
