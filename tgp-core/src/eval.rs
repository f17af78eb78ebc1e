//! Evaluation of expression trees.

use tgp_error::Error;
use crate::{error::UnassignedVariable, node::Node, value::Value};

/// The values of the variables of an expression, indexed by variable identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignments {
    values: Vec<Value>,
}

impl Assignments {
    /// Creates assignments from the given values; `v0` is the first value.
    pub fn new(values: impl Into<Vec<Value>>) -> Self {
        Self { values: values.into() }
    }

    /// Returns the value of the variable with the given identifier.
    pub fn get(&self, id: usize) -> Result<&Value, Error> {
        self.values
            .get(id)
            .ok_or_else(|| Error::spanless(UnassignedVariable { id, len: self.values.len() }))
    }

    /// Returns the number of assigned values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no value is assigned.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Value> for Assignments {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self { values: iter.into_iter().collect() }
    }
}

impl Node {
    /// Evaluates this node with the given variable assignments.
    ///
    /// Applications hand their unevaluated arguments to the operation, which decides which of
    /// them to evaluate and in which order. The only errors are domain errors raised by an
    /// operation (such as division by zero) and reads of unassigned variables; both are returned
    /// unchanged.
    pub fn evaluate(&self, assignments: &Assignments) -> Result<Value, Error> {
        match self {
            Node::Constant { value, .. } => Ok(value.clone()),
            Node::Variable { id, .. } => assignments.get(*id).cloned(),
            Node::Function(function) => function.op().evaluate(function.args(), assignments),
        }
    }
}
