//! Integer arithmetic. Every operation except division is total: results wrap around on
//! overflow.

use once_cell::sync::Lazy;
use tgp_error::Error;
use crate::{
    error::DivisionByZero,
    eval::Assignments,
    node::Node,
    simplify::{rules, step::Step},
    step_collector::StepCollector,
    types::{Signature, Type},
    value::Value,
};
use super::{evaluate_args, Operation, ADD, MULTIPLY, SUBTRACT};

static BINARY: Lazy<Signature> = Lazy::new(|| Signature::new(Type::Integer, [Type::Integer, Type::Integer]));

/// Evaluates both arguments as integers.
fn integers(token: &'static str, args: &[Node], assignments: &Assignments) -> Result<(i64, i64), Error> {
    let [a, b] = evaluate_args(token, args, assignments)?;
    Ok((a.as_integer()?, b.as_integer()?))
}

/// `(+ a b)`
#[derive(Debug)]
pub struct Add;

impl Operation for Add {
    fn token(&self) -> &'static str {
        "+"
    }

    fn signature(&self) -> &'static Signature {
        &BINARY
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let (a, b) = integers(self.token(), args, assignments)?;
        Ok(Value::Integer(a.wrapping_add(b)))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::add::all(args, step_collector)
    }
}

/// `(- a b)`
#[derive(Debug)]
pub struct Subtract;

impl Operation for Subtract {
    fn token(&self) -> &'static str {
        "-"
    }

    fn signature(&self) -> &'static Signature {
        &BINARY
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let (a, b) = integers(self.token(), args, assignments)?;
        Ok(Value::Integer(a.wrapping_sub(b)))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::subtract::all(args, step_collector)
    }
}

/// `(* a b)`
#[derive(Debug)]
pub struct Multiply;

impl Operation for Multiply {
    fn token(&self) -> &'static str {
        "*"
    }

    fn signature(&self) -> &'static Signature {
        &BINARY
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let (a, b) = integers(self.token(), args, assignments)?;
        Ok(Value::Integer(a.wrapping_mul(b)))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::multiply::all(args, step_collector)
    }
}

/// `(/ a b)`, truncating towards zero. Raises [`DivisionByZero`] if `b` is zero.
#[derive(Debug)]
pub struct Divide;

impl Operation for Divide {
    fn token(&self) -> &'static str {
        "/"
    }

    fn signature(&self) -> &'static Signature {
        &BINARY
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let (a, b) = integers(self.token(), args, assignments)?;
        if b == 0 {
            return Err(Error::spanless(DivisionByZero));
        }
        Ok(Value::Integer(a.wrapping_div(b)))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::divide::all(args, step_collector)
    }

    fn is_fallible(&self) -> bool {
        true
    }
}

/// Builds `(+ a b)`.
pub(crate) fn add(a: Node, b: Node) -> Node {
    Node::build(ADD, Type::Integer, vec![a, b])
}

/// Builds `(- a b)`.
pub(crate) fn subtract(a: Node, b: Node) -> Node {
    Node::build(SUBTRACT, Type::Integer, vec![a, b])
}

/// Builds `(* a b)`.
pub(crate) fn multiply(a: Node, b: Node) -> Node {
    Node::build(MULTIPLY, Type::Integer, vec![a, b])
}
