//! Strongly-typed expression trees for genetic programming.
//!
//! Programs are immutable trees of [`Node`]s: typed constants, typed variables and applications
//! of the operations in [`ops`]. Trees are built through checked constructors that reject
//! ill-typed applications, evaluated with [`Assignments`] for their variables, reduced to a
//! canonical form by [`simplify()`], and recombined with [`crossover`].
//!
//! ```
//! use tgp_core::{eval::Assignments, node::Node, ops, simplify::simplify, value::Value};
//!
//! // (* (+ 2 3) 4)
//! let sum = Node::function(ops::ADD, [Node::integer(2), Node::integer(3)]).unwrap();
//! let product = Node::function(ops::MULTIPLY, [sum, Node::integer(4)]).unwrap();
//!
//! assert_eq!(product.evaluate(&Assignments::default()).unwrap(), Value::Integer(20));
//! assert_eq!(simplify(&product), Node::integer(20));
//! ```
//!
//! # Features
//!
//! - `serde`: Derives [`serde`] traits for [`Type`](types::Type) and [`Value`](value::Value).

pub mod crossover;
pub mod error;
pub mod eval;
pub mod node;
pub mod ops;
pub mod rules_engine;
pub mod simplify;
pub mod step_collector;
pub mod types;
pub mod value;

#[cfg(test)]
mod test_util;

pub use eval::Assignments;
pub use node::Node;
pub use ops::{Op, Operation};
pub use simplify::{simplify, simplify_with_steps};
pub use step_collector::StepCollector;
pub use types::{Signature, Type};
pub use value::Value;
