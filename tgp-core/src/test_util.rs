//! Shorthands for building trees in tests.

use crate::{node::Node, ops::{self, Op}, types::Type, value::Value};

pub fn int(n: i64) -> Node {
    Node::integer(n)
}

pub fn boolean(b: bool) -> Node {
    Node::boolean(b)
}

pub fn string(s: &str) -> Node {
    Node::constant(s, Type::String)
}

pub fn int_list<const N: usize>(values: [i64; N]) -> Node {
    Node::constant(Value::list(values.map(Value::Integer)), Type::list(Type::Integer))
}

pub fn int_var(id: usize) -> Node {
    Node::variable(id, Type::Integer)
}

pub fn bool_var(id: usize) -> Node {
    Node::variable(id, Type::Boolean)
}

pub fn call<const N: usize>(op: Op, args: [Node; N]) -> Node {
    Node::function(op, args).unwrap()
}

pub fn add(a: Node, b: Node) -> Node {
    call(ops::ADD, [a, b])
}

pub fn sub(a: Node, b: Node) -> Node {
    call(ops::SUBTRACT, [a, b])
}

pub fn mul(a: Node, b: Node) -> Node {
    call(ops::MULTIPLY, [a, b])
}

pub fn div(a: Node, b: Node) -> Node {
    call(ops::DIVIDE, [a, b])
}
