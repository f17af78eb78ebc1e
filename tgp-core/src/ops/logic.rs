//! Boolean connectives. `and` and `or` evaluate their second argument only when the first one
//! does not decide the result.

use once_cell::sync::Lazy;
use tgp_error::Error;
use crate::{
    eval::Assignments,
    node::Node,
    rules_engine::RulesEngine,
    simplify::{rules, step::Step},
    step_collector::StepCollector,
    types::{Signature, Type},
    value::Value,
};
use super::{evaluate_args, unpack, Operation, AND, NOT};

static BINARY: Lazy<Signature> = Lazy::new(|| Signature::new(Type::Boolean, [Type::Boolean, Type::Boolean]));
static UNARY: Lazy<Signature> = Lazy::new(|| Signature::new(Type::Boolean, [Type::Boolean]));

/// Builds `(and a b)`.
pub(crate) fn and(a: Node, b: Node) -> Node {
    Node::build(AND, Type::Boolean, vec![a, b])
}

/// Builds `(false? node)`.
pub(crate) fn not(node: Node) -> Node {
    Node::build(NOT, Type::Boolean, vec![node])
}

/// `(and a b)`
#[derive(Debug)]
pub struct And;

impl Operation for And {
    fn token(&self) -> &'static str {
        "and"
    }

    fn signature(&self) -> &'static Signature {
        &BINARY
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let [a, b] = unpack(self.token(), args)?;
        if !a.evaluate(assignments)?.as_boolean()? {
            return Ok(Value::Boolean(false));
        }
        b.evaluate(assignments)
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::logic::and(args, step_collector)
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [a, b] = args else { return };
        let (a, b) = (a.clone(), b.clone());
        engine.add_rule(node.clone(), move |engine, value| {
            if value {
                engine.add_fact(a.clone(), true);
                engine.add_fact(b.clone(), true);
            } else {
                // at most one of the arguments holds
                let other = b.clone();
                engine.add_rule(a.clone(), move |engine, value| {
                    if value {
                        engine.add_fact(other.clone(), false);
                    }
                });
                let other = a.clone();
                engine.add_rule(b.clone(), move |engine, value| {
                    if value {
                        engine.add_fact(other.clone(), false);
                    }
                });
            }
        });
    }
}

/// `(or a b)`
#[derive(Debug)]
pub struct Or;

impl Operation for Or {
    fn token(&self) -> &'static str {
        "or"
    }

    fn signature(&self) -> &'static Signature {
        &BINARY
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let [a, b] = unpack(self.token(), args)?;
        if a.evaluate(assignments)?.as_boolean()? {
            return Ok(Value::Boolean(true));
        }
        b.evaluate(assignments)
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::logic::or(args, step_collector)
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [a, b] = args else { return };
        let (a, b) = (a.clone(), b.clone());
        engine.add_rule(node.clone(), move |engine, value| {
            if !value {
                engine.add_fact(a.clone(), false);
                engine.add_fact(b.clone(), false);
            } else {
                // at least one of the arguments holds
                let other = b.clone();
                engine.add_rule(a.clone(), move |engine, value| {
                    if !value {
                        engine.add_fact(other.clone(), true);
                    }
                });
                let other = a.clone();
                engine.add_rule(b.clone(), move |engine, value| {
                    if !value {
                        engine.add_fact(other.clone(), true);
                    }
                });
            }
        });
    }
}

/// `(xor a b)`
#[derive(Debug)]
pub struct Xor;

impl Operation for Xor {
    fn token(&self) -> &'static str {
        "xor"
    }

    fn signature(&self) -> &'static Signature {
        &BINARY
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let [a, b] = evaluate_args(self.token(), args, assignments)?;
        Ok(Value::Boolean(a.as_boolean()? != b.as_boolean()?))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::logic::xor(args, step_collector)
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [a, b] = args else { return };
        let (a, b) = (a.clone(), b.clone());
        engine.add_rule(node.clone(), move |engine, value| {
            let other = b.clone();
            engine.add_rule(a.clone(), move |engine, known| engine.add_fact(other.clone(), known != value));
            let other = a.clone();
            engine.add_rule(b.clone(), move |engine, known| engine.add_fact(other.clone(), known != value));
        });
    }
}

/// `(false? a)`, the negation of `a`.
#[derive(Debug)]
pub struct IsFalse;

impl Operation for IsFalse {
    fn token(&self) -> &'static str {
        "false?"
    }

    fn signature(&self) -> &'static Signature {
        &UNARY
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let [a] = evaluate_args(self.token(), args, assignments)?;
        Ok(Value::Boolean(!a.as_boolean()?))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::logic::is_false(args, step_collector)
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [inner] = args else { return };
        let target = inner.clone();
        engine.add_rule(node.clone(), move |engine, value| engine.add_fact(target.clone(), !value));
        let target = node.clone();
        engine.add_rule(inner.clone(), move |engine, value| engine.add_fact(target.clone(), !value));
    }

    fn negate(&self, args: &[Node]) -> Option<Node> {
        let [inner] = args else { return None };
        Some(inner.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::{ops::{self, Op}, test_util::*};
    use super::*;

    fn eval(op: Op, args: &[Node], assignments: &Assignments) -> Result<bool, Error> {
        Node::function(op, args.to_vec())?.evaluate(assignments)?.as_boolean()
    }

    #[test]
    fn truth_tables() {
        let none = Assignments::default();
        for a in [false, true] {
            for b in [false, true] {
                let args = [boolean(a), boolean(b)];
                assert_eq!(eval(ops::AND, &args, &none).unwrap(), a && b);
                assert_eq!(eval(ops::OR, &args, &none).unwrap(), a || b);
                assert_eq!(eval(ops::XOR, &args, &none).unwrap(), a != b);
            }
            assert_eq!(eval(ops::NOT, &[boolean(a)], &none).unwrap(), !a);
        }
    }

    #[test]
    fn or_short_circuits() {
        // (or true (zero? (/ 1 v0))) never divides
        let args = [boolean(true), call(ops::ZERO, [div(int(1), int_var(0))])];
        let assignments = Assignments::new([Value::Integer(0)]);
        assert!(eval(ops::OR, &args, &assignments).unwrap());
        assert!(eval(ops::XOR, &args, &assignments).is_err());
    }
}
