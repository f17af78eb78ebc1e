//! Predicates that classify an integer.
//!
//! Exactly one of `zero?`, `pos?` and `neg?` holds for any integer, and exactly one of `even?`
//! and `odd?`. The fact rules of these operations encode both facts, along with zero being even.

use once_cell::sync::Lazy;
use tgp_error::Error;
use crate::{
    eval::Assignments,
    node::Node,
    rules_engine::RulesEngine,
    types::{Signature, Type},
    value::Value,
};
use super::{evaluate_args, Op, Operation, EVEN, NEGATIVE, ODD, POSITIVE, ZERO};

static PREDICATE: Lazy<Signature> = Lazy::new(|| Signature::new(Type::Boolean, [Type::Integer]));

/// Evaluates the single argument as an integer.
fn integer(token: &'static str, args: &[Node], assignments: &Assignments) -> Result<i64, Error> {
    let [n] = evaluate_args(token, args, assignments)?;
    n.as_integer()
}

/// Builds `(op x)` for one of the classification predicates.
fn classify(op: Op, x: &Node) -> Node {
    Node::build(op, Type::Boolean, vec![x.clone()])
}

/// Registers the rules of one of the three sign predicates.
fn sign_rules(this: Op, node: &Node, x: &Node, engine: &mut RulesEngine) {
    let (first, second) = if this == ZERO {
        (POSITIVE, NEGATIVE)
    } else if this == POSITIVE {
        (ZERO, NEGATIVE)
    } else {
        (ZERO, POSITIVE)
    };
    let x = x.clone();
    engine.add_rule(node.clone(), move |engine, value| {
        if value {
            engine.add_fact(classify(first, &x), false);
            engine.add_fact(classify(second, &x), false);
            if this == ZERO {
                engine.add_fact(classify(EVEN, &x), true);
            }
        } else {
            // one of the other two holds
            let third = classify(second, &x);
            engine.add_rule(classify(first, &x), move |engine, value| {
                if !value {
                    engine.add_fact(third.clone(), true);
                }
            });
            let third = classify(first, &x);
            engine.add_rule(classify(second, &x), move |engine, value| {
                if !value {
                    engine.add_fact(third.clone(), true);
                }
            });
        }
    });
}

/// Registers the rules of one of the two parity predicates.
fn parity_rules(this: Op, node: &Node, x: &Node, engine: &mut RulesEngine) {
    let opposite = classify(if this == EVEN { ODD } else { EVEN }, x);
    let zero = classify(ZERO, x);
    engine.add_rule(node.clone(), move |engine, value| {
        engine.add_fact(opposite.clone(), !value);

        // zero is even
        if value != (this == EVEN) {
            engine.add_fact(zero.clone(), false);
        }
    });
}

/// `(zero? n)`
#[derive(Debug)]
pub struct IsZero;

impl Operation for IsZero {
    fn token(&self) -> &'static str {
        "zero?"
    }

    fn signature(&self) -> &'static Signature {
        &PREDICATE
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        Ok(Value::Boolean(integer(self.token(), args, assignments)? == 0))
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [x] = args else { return };
        sign_rules(ZERO, node, x, engine);
    }
}

/// `(pos? n)`, true if `n` is greater than zero.
#[derive(Debug)]
pub struct IsPositive;

impl Operation for IsPositive {
    fn token(&self) -> &'static str {
        "pos?"
    }

    fn signature(&self) -> &'static Signature {
        &PREDICATE
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        Ok(Value::Boolean(integer(self.token(), args, assignments)? > 0))
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [x] = args else { return };
        sign_rules(POSITIVE, node, x, engine);
    }
}

/// `(neg? n)`, true if `n` is less than zero.
#[derive(Debug)]
pub struct IsNegative;

impl Operation for IsNegative {
    fn token(&self) -> &'static str {
        "neg?"
    }

    fn signature(&self) -> &'static Signature {
        &PREDICATE
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        Ok(Value::Boolean(integer(self.token(), args, assignments)? < 0))
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [x] = args else { return };
        sign_rules(NEGATIVE, node, x, engine);
    }
}

/// `(even? n)`
#[derive(Debug)]
pub struct IsEven;

impl Operation for IsEven {
    fn token(&self) -> &'static str {
        "even?"
    }

    fn signature(&self) -> &'static Signature {
        &PREDICATE
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        Ok(Value::Boolean(integer(self.token(), args, assignments)? % 2 == 0))
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [x] = args else { return };
        parity_rules(EVEN, node, x, engine);
    }

    fn negate(&self, args: &[Node]) -> Option<Node> {
        let [x] = args else { return None };
        Some(classify(ODD, x))
    }
}

/// `(odd? n)`
#[derive(Debug)]
pub struct IsOdd;

impl Operation for IsOdd {
    fn token(&self) -> &'static str {
        "odd?"
    }

    fn signature(&self) -> &'static Signature {
        &PREDICATE
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        Ok(Value::Boolean(integer(self.token(), args, assignments)? % 2 != 0))
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [x] = args else { return };
        parity_rules(ODD, node, x, engine);
    }

    fn negate(&self, args: &[Node]) -> Option<Node> {
        let [x] = args else { return None };
        Some(classify(EVEN, x))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{ops, test_util::*};
    use super::*;

    fn eval(op: Op, n: i64) -> bool {
        call(op, [int(n)]).evaluate(&Assignments::default()).unwrap().as_boolean().unwrap()
    }

    #[test]
    fn evaluate() {
        for n in [-3, -2, 0, 1, 4, i64::MIN, i64::MAX] {
            assert_eq!(eval(ops::ZERO, n), n == 0);
            assert_eq!(eval(ops::POSITIVE, n), n > 0);
            assert_eq!(eval(ops::NEGATIVE, n), n < 0);
            assert_eq!(eval(ops::EVEN, n), n.rem_euclid(2) == 0);
            assert_eq!(eval(ops::ODD, n), n.rem_euclid(2) == 1);
        }
    }
}
