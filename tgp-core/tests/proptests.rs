//! Property-based tests over random well-typed trees.
//!
//! Integer variables are `v0` to `v2` and boolean variables are `v3` and `v4`. Variables are
//! assigned small integers, so that divisions by zero and equal operands are common.

use proptest::{prelude::*, sample::{select, Index}};
use tgp_core::{
    crossover::{common_node_count, crossover_at},
    error::DivisionByZero,
    eval::Assignments,
    node::Node,
    ops::{self, Op},
    simplify::simplify,
    types::Type,
    value::Value,
};

const INTEGER_VARIABLES: usize = 3;
const BOOLEAN_VARIABLES: usize = 2;

// ===== Strategies =====

fn apply(op: Op, args: Vec<Node>) -> Node {
    Node::function(op, args).expect("well-typed application")
}

fn arb_integer_leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        3 => (0..INTEGER_VARIABLES).prop_map(|id| Node::variable(id, Type::Integer)),
        3 => (-3i64..=3).prop_map(Node::integer),
        1 => select(vec![i64::MIN, i64::MAX]).prop_map(Node::integer),
    ]
}

/// Integer trees, with or without division.
fn arb_integer(division: bool) -> BoxedStrategy<Node> {
    let mut arithmetic = vec![ops::ADD, ops::SUBTRACT, ops::MULTIPLY];
    if division {
        arithmetic.push(ops::DIVIDE);
    }

    arb_integer_leaf()
        .prop_recursive(4, 48, 3, move |inner| {
            prop_oneof![
                4 => (select(arithmetic.clone()), inner.clone(), inner.clone())
                    .prop_map(|(op, a, b)| apply(op, vec![a, b])),
                1 => (select(vec![ops::LESS, ops::EQUAL, ops::GREATER_EQUAL]), inner.clone(), inner.clone(), inner.clone(), inner.clone())
                    .prop_map(|(op, a, b, then, otherwise)| {
                        apply(ops::IF, vec![apply(op, vec![a, b]), then, otherwise])
                    }),
            ]
        })
        .boxed()
}

/// Boolean trees over comparisons and classifications of integer trees.
fn arb_boolean(division: bool) -> BoxedStrategy<Node> {
    let integer = arb_integer(division);
    let comparisons = vec![
        ops::EQUAL, ops::NOT_EQUAL, ops::LESS, ops::LESS_EQUAL, ops::GREATER, ops::GREATER_EQUAL,
    ];
    let classifications = vec![ops::ZERO, ops::POSITIVE, ops::NEGATIVE, ops::EVEN, ops::ODD];

    let leaf = prop_oneof![
        2 => (INTEGER_VARIABLES..INTEGER_VARIABLES + BOOLEAN_VARIABLES)
            .prop_map(|id| Node::variable(id, Type::Boolean)),
        1 => any::<bool>().prop_map(Node::boolean),
        3 => (select(comparisons), integer.clone(), integer.clone())
            .prop_map(|(op, a, b)| apply(op, vec![a, b])),
        2 => (select(classifications), integer)
            .prop_map(|(op, a)| apply(op, vec![a])),
    ];

    leaf.prop_recursive(3, 32, 3, |inner| {
        prop_oneof![
            3 => (select(vec![ops::AND, ops::OR, ops::XOR]), inner.clone(), inner.clone())
                .prop_map(|(op, a, b)| apply(op, vec![a, b])),
            1 => inner.clone().prop_map(|a| apply(ops::NOT, vec![a])),
            1 => (inner.clone(), inner.clone(), inner.clone())
                .prop_map(|(c, then, otherwise)| apply(ops::IF, vec![c, then, otherwise])),
        ]
    })
    .boxed()
}

fn arb_assignments() -> impl Strategy<Value = Assignments> {
    (
        prop::collection::vec(-3i64..=3, INTEGER_VARIABLES),
        prop::collection::vec(any::<bool>(), BOOLEAN_VARIABLES),
    )
        .prop_map(|(integers, booleans)| {
            integers.into_iter()
                .map(Value::Integer)
                .chain(booleans.into_iter().map(Value::Boolean))
                .collect()
        })
}

// ===== Helpers =====

/// Evaluates the tree, mapping a division by zero to `None`. No other error can happen.
fn outcome(node: &Node, assignments: &Assignments) -> Option<Value> {
    match node.evaluate(assignments) {
        Ok(value) => Some(value),
        Err(err) => {
            assert!(err.is::<DivisionByZero>(), "unexpected error evaluating {}: {}", node, err);
            None
        },
    }
}

/// Returns true if every application in the tree passes the checked constructor.
fn well_typed(node: &Node) -> bool {
    match node.as_function() {
        Some(function) => function.args().iter().all(well_typed)
            && Node::function(function.op(), function.args().to_vec())
                .map_or(false, |rebuilt| rebuilt.ty() == node.ty()),
        None => true,
    }
}

// ===== Property Tests =====

proptest! {
    #[test]
    fn evaluation_is_deterministic(tree in arb_boolean(true), assignments in arb_assignments()) {
        prop_assert_eq!(outcome(&tree, &assignments), outcome(&tree, &assignments));
    }

    #[test]
    fn integer_simplification_is_sound(
        tree in arb_integer(true),
        assignments in prop::collection::vec(arb_assignments(), 8),
    ) {
        let simplified = simplify(&tree);
        prop_assert!(well_typed(&simplified));
        for assignments in &assignments {
            prop_assert_eq!(
                outcome(&tree, assignments),
                outcome(&simplified, assignments),
                "{} simplified to {}", tree, simplified
            );
        }
    }

    #[test]
    fn boolean_simplification_is_sound(
        tree in arb_boolean(true),
        assignments in prop::collection::vec(arb_assignments(), 8),
    ) {
        let simplified = simplify(&tree);
        prop_assert!(well_typed(&simplified));
        for assignments in &assignments {
            prop_assert_eq!(
                outcome(&tree, assignments),
                outcome(&simplified, assignments),
                "{} simplified to {}", tree, simplified
            );
        }
    }

    #[test]
    fn simplification_reaches_a_fixed_point(tree in arb_boolean(true)) {
        let simplified = simplify(&tree);
        let again = simplify(&simplified);
        prop_assert!(again.ptr_eq(&simplified), "{} simplified to {}", simplified, again);
    }

    #[test]
    fn commutative_arithmetic_converges(
        op in select(vec![ops::ADD, ops::MULTIPLY, ops::EQUAL, ops::NOT_EQUAL]),
        a in arb_integer(false),
        b in arb_integer(false),
    ) {
        let ab = simplify(&apply(op, vec![a.clone(), b.clone()]));
        let ba = simplify(&apply(op, vec![b, a]));
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn commutative_connectives_converge(
        op in select(vec![ops::AND, ops::OR, ops::XOR]),
        a in arb_boolean(false),
        b in arb_boolean(false),
    ) {
        let ab = simplify(&apply(op, vec![a.clone(), b.clone()]));
        let ba = simplify(&apply(op, vec![b, a]));
        prop_assert_eq!(ab, ba);
    }

    #[test]
    fn addressing_round_trip(tree in arb_boolean(true), index in any::<Index>()) {
        let i = index.index(tree.node_count());
        prop_assert_eq!(tree.replace_at(i, Node::clone).unwrap(), tree.clone());

        // replacing a terminal by a terminal keeps the numbering
        let replacement = |node: &Node| match node.ty() {
            Type::Integer => Node::integer(7),
            _ => Node::boolean(true),
        };
        let j = index.index(tree.node_count_where(Node::is_terminal));
        let replaced = tree.replace_at_where(j, replacement, Node::is_terminal).unwrap();
        let original = tree.at_where(j, Node::is_terminal).unwrap();
        prop_assert_eq!(replaced.at_where(j, Node::is_terminal).unwrap(), &replacement(original));
        prop_assert_eq!(replaced.node_count(), tree.node_count());
        prop_assert!(well_typed(&replaced));
    }

    #[test]
    fn crossover_is_aligned(n1 in arb_boolean(true), n2 in arb_boolean(true)) {
        let count = common_node_count(&n1, &n2);
        prop_assert!(count <= n1.node_count().min(n2.node_count()));
        prop_assert_eq!(count, common_node_count(&n2, &n1));

        for k in 0..count {
            let child = crossover_at(&n1, &n2, k);
            prop_assert!(well_typed(&child));
            prop_assert_eq!(child.ty(), n1.ty());
        }

        // a terminal and an application of the same type only swap at the root
        if count == 0 && n1.ty() == n2.ty() {
            prop_assert_eq!(crossover_at(&n1, &n2, 0), n2.clone());
            prop_assert_eq!(crossover_at(&n1, &n2, 1), n1.clone());
        } else {
            prop_assert_eq!(crossover_at(&n1, &n2, count), n1.clone());
        }
    }
}
