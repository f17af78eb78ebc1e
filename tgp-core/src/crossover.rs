//! Alignment of two trees for crossover.
//!
//! Two trees are walked in lock-step from their roots. A pair of nodes is a common position if
//! both nodes have the same type and are either both terminals or both applications. The walk
//! only descends into pairs of applications with the same number of arguments, pairing their
//! arguments in order. Common positions are numbered in pre-order: the roots first, then the
//! positions of the first argument pair, and so on.

use crate::node::Node;

/// Returns the number of common positions of the two trees.
///
/// The result is at most the node count of either tree.
pub fn common_node_count(n1: &Node, n2: &Node) -> usize {
    match (n1, n2) {
        (Node::Function(f1), Node::Function(f2)) => {
            let root = usize::from(f1.ty() == f2.ty());
            if f1.args().len() != f2.args().len() {
                return root;
            }
            root + f1.args()
                .iter()
                .zip(f2.args())
                .map(|(a1, a2)| common_node_count(a1, a2))
                .sum::<usize>()
        },
        (Node::Function(_), _) | (_, Node::Function(_)) => 0,
        _ => usize::from(n1.ty() == n2.ty()),
    }
}

/// Returns a copy of `n1` where the sub-tree at the given common position is replaced by the
/// sub-tree of `n2` at the same position.
///
/// The replacement has the same type as the sub-tree it replaces. If `index` is not less than
/// [`common_node_count`], `n1` is returned unchanged, with one exception: when the roots have the
/// same type, index 0 always selects the whole of `n2`. This holds even if one root is a terminal
/// and the other an application, in which case the two trees have no common positions at all.
pub fn crossover_at(n1: &Node, n2: &Node, index: usize) -> Node {
    let same_type = n1.ty() == n2.ty();
    if same_type && index == 0 {
        return n2.clone();
    }

    if let (Node::Function(f1), Node::Function(f2)) = (n1, n2) {
        if f1.args().len() == f2.args().len() {
            let mut total = usize::from(same_type);
            for (i, (a1, a2)) in f1.args().iter().zip(f2.args()).enumerate() {
                let count = common_node_count(a1, a2);
                if total + count > index {
                    let mut args = f1.args().to_vec();
                    args[i] = crossover_at(a1, a2, index - total);
                    return Node::build(f1.op(), f1.ty().clone(), args);
                }
                total += count;
            }
        }
    }

    n1.clone()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{ops, test_util::*};
    use super::*;

    /// (+ (* v0 v1) (+ v2 1))
    fn first() -> Node {
        add(mul(int_var(0), int_var(1)), add(int_var(2), int(1)))
    }

    #[test]
    fn roots_only() {
        // (+ v3 v4): the roots match, but (* v0 v1) is not a terminal
        let second = add(int_var(3), int_var(4));
        assert_eq!(common_node_count(&first(), &second), 1);
        assert_eq!(crossover_at(&first(), &second, 0), second);
    }

    #[test]
    fn aligned_positions() {
        // (- (* v3 v4) v5)
        let second = sub(mul(int_var(3), int_var(4)), int_var(5));
        assert_eq!(common_node_count(&first(), &second), 4);

        let expected = [
            second.clone(),
            add(mul(int_var(3), int_var(4)), add(int_var(2), int(1))),
            add(mul(int_var(3), int_var(1)), add(int_var(2), int(1))),
            add(mul(int_var(0), int_var(4)), add(int_var(2), int(1))),
        ];
        for (index, expected) in expected.into_iter().enumerate() {
            assert_eq!(crossover_at(&first(), &second, index), expected);
        }

        assert_eq!(crossover_at(&first(), &second, 4), first());
    }

    #[test]
    fn same_type_roots_always_swap() {
        // (and v0 v0) and v0 share no position, but their roots have the same type
        let n1 = call(ops::AND, [bool_var(0), bool_var(0)]);
        let n2 = bool_var(0);
        assert_eq!(common_node_count(&n1, &n2), 0);
        assert_eq!(crossover_at(&n1, &n2, 0), n2);
        assert_eq!(crossover_at(&n2, &n1, 0), n1);
        assert_eq!(crossover_at(&n1, &n2, 1), n1);
    }

    #[test]
    fn types_must_match() {
        // (zero? v0) and (+ v0 v1) share no type at the root
        let n1 = call(ops::ZERO, [int_var(0)]);
        let n2 = add(int_var(0), int_var(1));
        assert_eq!(common_node_count(&n1, &n2), 0);
        assert_eq!(common_node_count(&n1, &bool_var(0)), 0);
        assert_eq!(common_node_count(&int_var(0), &int(3)), 1);
        assert_eq!(common_node_count(&int_var(0), &bool_var(0)), 0);
    }
}
