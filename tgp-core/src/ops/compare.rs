//! Comparison of two values of the same type, using the total order over [`Value`]s.
//!
//! After simplification only `=`, `!=`, `<` and `<=` remain: `(> a b)` is rewritten to
//! `(< b a)` and `(>= a b)` to `(<= b a)`.

use once_cell::sync::Lazy;
use std::cmp::Ordering;
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
use super::{evaluate_args, Operation, EQUAL, LESS, LESS_EQUAL, NOT_EQUAL};

static COMPARISON: Lazy<Signature> = Lazy::new(|| {
    Signature::new(Type::Boolean, [Type::Generic("T"), Type::Generic("T")])
});

/// Evaluates both arguments and compares them.
fn compare(token: &'static str, args: &[Node], assignments: &Assignments) -> Result<Ordering, Error> {
    let [a, b] = evaluate_args(token, args, assignments)?;
    Ok(a.cmp(&b))
}

/// Builds `(< a b)`.
pub(crate) fn lt(a: &Node, b: &Node) -> Node {
    Node::build(LESS, Type::Boolean, vec![a.clone(), b.clone()])
}

/// Builds `(<= a b)`.
pub(crate) fn le(a: &Node, b: &Node) -> Node {
    Node::build(LESS_EQUAL, Type::Boolean, vec![a.clone(), b.clone()])
}

/// Builds `(= a b)`, with the arguments in canonical order.
pub(crate) fn eq(a: &Node, b: &Node) -> Node {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    Node::build(EQUAL, Type::Boolean, vec![a.clone(), b.clone()])
}

/// Builds `(!= a b)`, with the arguments in canonical order.
pub(crate) fn ne(a: &Node, b: &Node) -> Node {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    Node::build(NOT_EQUAL, Type::Boolean, vec![a.clone(), b.clone()])
}

/// `(= a b)`
#[derive(Debug)]
pub struct Equal;

impl Operation for Equal {
    fn token(&self) -> &'static str {
        "="
    }

    fn signature(&self) -> &'static Signature {
        &COMPARISON
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        Ok(Value::Boolean(compare(self.token(), args, assignments)?.is_eq()))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::compare::equal(args, step_collector)
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [a, b] = args else { return };
        let (a, b) = (a.clone(), b.clone());
        engine.add_rule(node.clone(), move |engine, value| {
            engine.add_fact(ne(&a, &b), !value);
            if value {
                engine.add_fact(le(&a, &b), true);
                engine.add_fact(le(&b, &a), true);
            }
        });
    }

    fn negate(&self, args: &[Node]) -> Option<Node> {
        let [a, b] = args else { return None };
        Some(ne(a, b))
    }
}

/// `(!= a b)`
#[derive(Debug)]
pub struct NotEqual;

impl Operation for NotEqual {
    fn token(&self) -> &'static str {
        "!="
    }

    fn signature(&self) -> &'static Signature {
        &COMPARISON
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        Ok(Value::Boolean(compare(self.token(), args, assignments)?.is_ne()))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::compare::not_equal(args, step_collector)
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [a, b] = args else { return };
        let equal = eq(a, b);
        engine.add_rule(node.clone(), move |engine, value| {
            engine.add_fact(equal.clone(), !value);
        });
    }

    fn negate(&self, args: &[Node]) -> Option<Node> {
        let [a, b] = args else { return None };
        Some(eq(a, b))
    }
}

/// `(< a b)`
#[derive(Debug)]
pub struct Less;

impl Operation for Less {
    fn token(&self) -> &'static str {
        "<"
    }

    fn signature(&self) -> &'static Signature {
        &COMPARISON
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        Ok(Value::Boolean(compare(self.token(), args, assignments)?.is_lt()))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::compare::less(args, step_collector)
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [a, b] = args else { return };
        let (a, b) = (a.clone(), b.clone());
        engine.add_rule(node.clone(), move |engine, value| {
            // a < b exactly when b <= a does not hold
            engine.add_fact(le(&b, &a), !value);
            if value {
                engine.add_fact(le(&a, &b), true);
                engine.add_fact(ne(&a, &b), true);
            }
        });
    }

    fn negate(&self, args: &[Node]) -> Option<Node> {
        let [a, b] = args else { return None };
        Some(le(b, a))
    }
}

/// `(<= a b)`
#[derive(Debug)]
pub struct LessEqual;

impl Operation for LessEqual {
    fn token(&self) -> &'static str {
        "<="
    }

    fn signature(&self) -> &'static Signature {
        &COMPARISON
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        Ok(Value::Boolean(compare(self.token(), args, assignments)?.is_le()))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::compare::less_equal(args, step_collector)
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [a, b] = args else { return };
        let (a, b) = (a.clone(), b.clone());
        engine.add_rule(node.clone(), move |engine, value| {
            engine.add_fact(lt(&b, &a), !value);
            if value {
                // antisymmetry: a <= b and b <= a means a = b
                let (a1, b1) = (a.clone(), b.clone());
                engine.add_rule(le(&b, &a), move |engine, value| {
                    if value {
                        engine.add_fact(eq(&a1, &b1), true);
                    }
                });

                // a <= b and a != b means a < b
                let (a2, b2) = (a.clone(), b.clone());
                engine.add_rule(eq(&a, &b), move |engine, value| {
                    if !value {
                        engine.add_fact(lt(&a2, &b2), true);
                    }
                });
            }
        });
    }

    fn negate(&self, args: &[Node]) -> Option<Node> {
        let [a, b] = args else { return None };
        Some(lt(b, a))
    }
}

/// `(> a b)`, simplified to `(< b a)`.
#[derive(Debug)]
pub struct Greater;

impl Operation for Greater {
    fn token(&self) -> &'static str {
        ">"
    }

    fn signature(&self) -> &'static Signature {
        &COMPARISON
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        Ok(Value::Boolean(compare(self.token(), args, assignments)?.is_gt()))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::compare::swap(args, LESS, step_collector)
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [a, b] = args else { return };
        equivalent(node, lt(b, a), engine);
    }

    fn negate(&self, args: &[Node]) -> Option<Node> {
        let [a, b] = args else { return None };
        Some(le(a, b))
    }
}

/// `(>= a b)`, simplified to `(<= b a)`.
#[derive(Debug)]
pub struct GreaterEqual;

impl Operation for GreaterEqual {
    fn token(&self) -> &'static str {
        ">="
    }

    fn signature(&self) -> &'static Signature {
        &COMPARISON
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        Ok(Value::Boolean(compare(self.token(), args, assignments)?.is_ge()))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::compare::swap(args, LESS_EQUAL, step_collector)
    }

    fn add_rules(&self, node: &Node, args: &[Node], engine: &mut RulesEngine) {
        let [a, b] = args else { return };
        equivalent(node, le(b, a), engine);
    }

    fn negate(&self, args: &[Node]) -> Option<Node> {
        let [a, b] = args else { return None };
        Some(lt(a, b))
    }
}

/// Registers rules that give `node` and `other` the same truth value.
fn equivalent(node: &Node, other: Node, engine: &mut RulesEngine) {
    let target = other.clone();
    engine.add_rule(node.clone(), move |engine, value| engine.add_fact(target.clone(), value));
    let target = node.clone();
    engine.add_rule(other, move |engine, value| engine.add_fact(target.clone(), value));
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{ops::{self, Op}, test_util::*};
    use super::*;

    fn eval(op: Op, a: Node, b: Node) -> bool {
        call(op, [a, b]).evaluate(&Assignments::default()).unwrap().as_boolean().unwrap()
    }

    #[test]
    fn evaluate() {
        assert!(eval(ops::EQUAL, int(3), int(3)));
        assert!(eval(ops::NOT_EQUAL, int(3), int(4)));
        assert!(eval(ops::LESS, int(-3), int(4)));
        assert!(!eval(ops::LESS, int(4), int(4)));
        assert!(eval(ops::LESS_EQUAL, int(4), int(4)));
        assert!(eval(ops::GREATER, string("b"), string("a")));
        assert!(eval(ops::GREATER_EQUAL, boolean(true), boolean(false)));
    }

    #[test]
    fn comparison_is_generic() {
        assert!(Node::function(ops::LESS, [int(1), boolean(true)]).is_err());
        assert_eq!(call(ops::EQUAL, [string("a"), string("b")]).ty(), &Type::Boolean);
    }

    #[test]
    fn canonical_builders() {
        assert_eq!(eq(&int_var(1), &int_var(0)).to_string(), "(= v0 v1)");
        assert_eq!(ne(&int_var(1), &int_var(0)).to_string(), "(!= v0 v1)");
        assert_eq!(lt(&int_var(1), &int_var(0)).to_string(), "(< v1 v0)");
    }

    #[test]
    fn negations() {
        let (a, b) = (int_var(0), int_var(1));
        assert_eq!(Less.negate(&[a.clone(), b.clone()]).unwrap().to_string(), "(<= v1 v0)");
        assert_eq!(LessEqual.negate(&[a.clone(), b.clone()]).unwrap().to_string(), "(< v1 v0)");
        assert_eq!(Greater.negate(&[a.clone(), b.clone()]).unwrap().to_string(), "(<= v0 v1)");
        assert_eq!(Equal.negate(&[b.clone(), a.clone()]).unwrap().to_string(), "(!= v0 v1)");
    }
}
