//! Higher-order operations over lists.
//!
//! The first argument of each operation is a function value: a constant holding an operation,
//! or any node of function type. It is applied to each element by handing the operation
//! constant nodes typed after the function's parameter types.

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
use super::{unpack, Op, Operation};

static MAP_SIGNATURE: Lazy<Signature> = Lazy::new(|| {
    let (t, u) = (Type::Generic("T"), Type::Generic("U"));
    Signature::new(Type::list(u.clone()), [Type::function(u, [t.clone()]), Type::list(t)])
});

static FILTER_SIGNATURE: Lazy<Signature> = Lazy::new(|| {
    let t = Type::Generic("T");
    Signature::new(Type::list(t.clone()), [Type::function(Type::Boolean, [t.clone()]), Type::list(t)])
});

static REDUCE_SIGNATURE: Lazy<Signature> = Lazy::new(|| {
    let t = Type::Generic("T");
    Signature::new(t.clone(), [Type::function(t.clone(), [t.clone(), t.clone()]), t.clone(), Type::list(t)])
});

static QUANTIFIER_SIGNATURE: Lazy<Signature> = Lazy::new(|| {
    let t = Type::Generic("T");
    Signature::new(Type::Boolean, [Type::function(Type::Boolean, [t.clone()]), Type::list(t)])
});

/// A function value ready to be applied to argument values.
struct Callable<'a> {
    op: Op,
    params: &'a [Type],
}

impl<'a> Callable<'a> {
    /// Evaluates the node holding the function value.
    fn new(node: &'a Node, assignments: &Assignments) -> Result<Self, Error> {
        let op = node.evaluate(assignments)?.as_function()?;
        let params: &[Type] = match node.ty() {
            Type::Function(_, params) => &params[..],
            _ => &[],
        };
        Ok(Self { op, params })
    }

    /// Applies the function to the given values.
    fn call<const N: usize>(&self, values: [Value; N], assignments: &Assignments) -> Result<Value, Error> {
        let args = values.into_iter()
            .zip(self.params)
            .map(|(value, ty)| Node::constant(value, ty.clone()))
            .collect::<Vec<_>>();
        self.op.evaluate(&args, assignments)
    }

    /// Applies the function, which must return a boolean, to a single value.
    fn test(&self, value: &Value, assignments: &Assignments) -> Result<bool, Error> {
        self.call([value.clone()], assignments)?.as_boolean()
    }
}

/// Evaluates the function and list arguments shared by most operations of this module.
fn function_and_list<'a>(
    token: &'static str,
    args: &'a [Node],
    assignments: &Assignments,
) -> Result<(Callable<'a>, Value), Error> {
    let [f, list] = unpack(token, args)?;
    let f = Callable::new(f, assignments)?;
    let list = list.evaluate(assignments)?;
    Ok((f, list))
}

/// `(map f list)`, the list of `f` applied to each element.
#[derive(Debug)]
pub struct Map;

impl Operation for Map {
    fn token(&self) -> &'static str {
        "map"
    }

    fn signature(&self) -> &'static Signature {
        &MAP_SIGNATURE
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let (f, list) = function_and_list(self.token(), args, assignments)?;
        let values = list.as_list()?
            .iter()
            .map(|element| f.call([element.clone()], assignments))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Value::list(values))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::hof::map(args, step_collector)
    }
}

/// `(filter f list)`, the elements of the list for which `f` holds, in order.
#[derive(Debug)]
pub struct Filter;

impl Operation for Filter {
    fn token(&self) -> &'static str {
        "filter"
    }

    fn signature(&self) -> &'static Signature {
        &FILTER_SIGNATURE
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let (f, list) = function_and_list(self.token(), args, assignments)?;
        let mut kept = Vec::new();
        for element in list.as_list()?.iter() {
            if f.test(element, assignments)? {
                kept.push(element.clone());
            }
        }
        Ok(Value::list(kept))
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::hof::filter(args, step_collector)
    }
}

/// `(reduce f init list)`, folding the list from the left: each element `e` replaces the
/// accumulator `acc` with `(f acc e)`.
#[derive(Debug)]
pub struct Reduce;

impl Operation for Reduce {
    fn token(&self) -> &'static str {
        "reduce"
    }

    fn signature(&self) -> &'static Signature {
        &REDUCE_SIGNATURE
    }

    fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
        let [f, init, list] = unpack(self.token(), args)?;
        let f = Callable::new(f, assignments)?;
        let mut acc = init.evaluate(assignments)?;
        for element in list.evaluate(assignments)?.as_list()?.iter() {
            acc = f.call([acc, element.clone()], assignments)?;
        }
        Ok(acc)
    }

    fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
        rules::hof::reduce(args, step_collector)
    }
}

/// Defines a quantifier over the elements of a list. The quantifier stops at the first element
/// for which `f` returns `stop`, and returns `found` if there is one.
macro_rules! quantifier {
    ($(#[$attr:meta])* $name:ident, $token:literal, stop = $stop:literal, found = $found:literal) => {
        $(#[$attr])*
        #[derive(Debug)]
        pub struct $name;

        impl Operation for $name {
            fn token(&self) -> &'static str {
                $token
            }

            fn signature(&self) -> &'static Signature {
                &QUANTIFIER_SIGNATURE
            }

            fn evaluate(&self, args: &[Node], assignments: &Assignments) -> Result<Value, Error> {
                let (f, list) = function_and_list(self.token(), args, assignments)?;
                for element in list.as_list()?.iter() {
                    if f.test(element, assignments)? == $stop {
                        return Ok(Value::Boolean($found));
                    }
                }
                Ok(Value::Boolean(!$found))
            }

            fn simplify(&self, args: &[Node], step_collector: &mut dyn StepCollector<Step>) -> Option<Node> {
                rules::hof::quantifier(args, !$found, step_collector)
            }
        }
    };
}

quantifier!(
    /// `(any? f list)`, true if `f` holds for some element.
    IsAny, "any?", stop = true, found = true
);

quantifier!(
    /// `(all? f list)`, true if `f` holds for every element.
    IsAll, "all?", stop = false, found = false
);

quantifier!(
    /// `(none? f list)`, true if `f` holds for no element.
    IsNone, "none?", stop = true, found = false
);
