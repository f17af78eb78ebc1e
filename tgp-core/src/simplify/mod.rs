//! Simplification of expression trees.
//!
//! A tree is simplified from the bottom up. The arguments of an application are simplified
//! first; if they are then all constant, the application is folded into the constant it
//! evaluates to. Otherwise, the operation's rules (see [`rules`]) are given the chance to rewrite
//! the application, and whatever they produce is simplified again, until no rule applies. The
//! result is therefore a fixed point: simplifying it again returns it unchanged.
//!
//! Every rule is sound: the simplified tree evaluates to the same value as the original for
//! every assignment of its variables, and raises the same kind of error where the original does.
//! In particular, constant folding that raises a domain error leaves the application as it is.
//!
//! ```
//! use tgp_core::{node::Node, ops, simplify::simplify, types::Type};
//!
//! // (+ v0 v0)
//! let v0 = Node::variable(0, Type::Integer);
//! let tree = Node::function(ops::ADD, [v0.clone(), v0.clone()]).unwrap();
//!
//! let simplified = simplify(&tree);
//! assert_eq!(simplified.to_string(), "(* 2 v0)");
//! assert_eq!(simplify(&simplified), simplified);
//! ```

pub mod rules;
pub mod step;

use step::Step;
use tracing::{debug, trace};
use crate::{eval::Assignments, node::Node, step_collector::StepCollector};

/// Simplifies the given tree.
///
/// If the tree cannot be simplified, the returned node is the given node itself (see
/// [`Node::ptr_eq`]).
pub fn simplify(node: &Node) -> Node {
    simplify_with_steps(node, &mut ())
}

/// Simplifies the given tree, reporting every step taken to the step collector.
pub fn simplify_with_steps(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Node {
    debug!(%node, "simplifying");
    simplify_node(node, step_collector)
}

fn simplify_node(node: &Node, step_collector: &mut dyn StepCollector<Step>) -> Node {
    let Node::Function(function) = node else {
        return node.clone();
    };

    let args = function.args()
        .iter()
        .map(|arg| simplify_node(arg, step_collector))
        .collect::<Vec<_>>();
    let changed = args.iter()
        .zip(function.args())
        .any(|(new, old)| !new.ptr_eq(old));
    let current = if changed {
        Node::build(function.op(), function.ty().clone(), args.clone())
    } else {
        node.clone()
    };

    if args.iter().all(Node::is_constant) {
        return match current.evaluate(&Assignments::default()) {
            Ok(value) => {
                step_collector.push(Step::ConstantFold);
                Node::constant(value, function.ty().clone())
            },
            // keep the error for evaluation time
            Err(_) => current,
        };
    }

    let op = function.op();
    match op.simplify(&args, step_collector) {
        Some(replacement) => {
            trace!(op = op.token(), before = %current, after = %replacement, "rule applied");
            simplify_node(&replacement, step_collector)
        },
        None => current,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{ops, test_util::*, types::Type, value::Value};
    use super::*;

    #[test]
    fn unchanged_tree_is_shared() {
        let tree = add(int_var(0), mul(int(3), int_var(1)));
        assert!(simplify(&tree).ptr_eq(&tree));
    }

    #[test]
    fn folds_constants() {
        // (* (+ 2 3) v0) = (* 5 v0)
        let mut steps = Vec::new();
        let simplified = simplify_with_steps(&mul(add(int(2), int(3)), int_var(0)), &mut steps);
        assert_eq!(simplified, mul(int(5), int_var(0)));
        assert_eq!(steps, [Step::ConstantFold]);
    }

    #[test]
    fn folds_higher_order_applications() {
        let tree = call(ops::MAP, [Node::operation(ops::EVEN), int_list([1, 2])]);
        let simplified = simplify(&tree);
        assert_eq!(simplified, Node::constant(
            Value::list([Value::Boolean(false), Value::Boolean(true)]),
            Type::list(Type::Boolean),
        ));
    }

    #[test]
    fn keeps_domain_errors() {
        let tree = add(int_var(0), div(int(1), int(0)));
        let simplified = simplify(&tree);
        assert_eq!(simplified, tree);
    }

    #[test]
    fn replacements_are_simplified_again() {
        // (+ v0 (+ 0 v0)) = (+ v0 v0) = (* 2 v0)
        let mut steps = Vec::new();
        let simplified = simplify_with_steps(&add(int_var(0), add(int(0), int_var(0))), &mut steps);
        assert_eq!(simplified, mul(int(2), int_var(0)));
        assert_eq!(steps, [Step::AddZero, Step::AddSelf]);
    }
}
