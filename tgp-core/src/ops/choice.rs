//! Operations that choose between their arguments. Only the chosen argument is evaluated.

use once_cell::sync::Lazy;
use tgp_error::Error;
use crate::{
    eval::Assignments,
    node::Node,
    simplify::{rules, step::Step},
    step_collector::StepCollector,
    types::{Signature, Type},
    value::Value,
};
use super::{unpack, Operation, IF, OR_ELSE};

static IF_SIGNATURE: Lazy<Signature> = Lazy::new(|| {
    let t = Type::Generic("T");
    Signature::new(t.clone(), [Type::Boolean, t.clone(), t])
});

static OR_ELSE_SIGNATURE: Lazy<Signature> = Lazy::new(|| {
    let t = Type::Generic("T");
    Signature::new(t.clone(), [Type::optional(t.clone()), t])
});

/// Builds `(if condition then otherwise)`, where both branches have type `ty`.
pub(crate) fn if_then_else(condition: Node, then: Node, otherwise: Node) -> Node {
    let ty = then.ty().clone();
    Node::build(IF, ty, vec![condition, then, otherwise])
}

/// Builds `(or-else optional fallback)`.
pub(crate) fn or_else(optional: Node, fallback: Node) -> Node {
    let ty = fallback.ty().clone();
    Node::build(OR_ELSE, ty, vec![optional, fallback])
}

/// `(if condition then else)`
#[derive(Debug)]
pub struct If;

impl Operation for If {
    fn token(&self) -> &'static str {
        "if"
    }

    fn signature(&self) -> &'static Signature {
        &IF_SIGNATURE
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let [condition, then, otherwise] = unpack(self.token(), args)?;
        if condition.evaluate(assignments)?.as_boolean()? {
            then.evaluate(assignments)
        } else {
            otherwise.evaluate(assignments)
        }
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::choice::if_then_else(args, step_collector)
    }
}

/// `(or-else optional fallback)`, the value of `optional` unless it is absent.
#[derive(Debug)]
pub struct OrElse;

impl Operation for OrElse {
    fn token(&self) -> &'static str {
        "or-else"
    }

    fn signature(&self) -> &'static Signature {
        &OR_ELSE_SIGNATURE
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let [optional, fallback] = unpack(self.token(), args)?;
        match optional.evaluate(assignments)? {
            Value::Nil => fallback.evaluate(assignments),
            value => Ok(value),
        }
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::choice::or_else(args, step_collector)
    }
}
