//! Propagation of boolean facts.
//!
//! A [`RulesEngine`] holds a table of facts: nodes known to evaluate to `true` or `false`. When a
//! fact about an application is added for the first time, its operation registers rules (see
//! [`Operation::add_rules`](crate::ops::Operation::add_rules)) describing what else follows from
//! that application being true or false. Rules are attached to the node they depend on, and run
//! as soon as a fact about that node is known. Adding a fact that conflicts with a known fact
//! marks the engine as contradictory, which means the facts it started from cannot all hold.
//!
//! ```
//! use tgp_core::{node::Node, ops, rules_engine::RulesEngine, types::Type};
//!
//! // (< v0 v1)
//! let v0 = Node::variable(0, Type::Integer);
//! let v1 = Node::variable(1, Type::Integer);
//! let less = Node::function(ops::LESS, [v0.clone(), v1.clone()]).unwrap();
//!
//! let engine = RulesEngine::build(&less, true);
//! let not_equal = Node::function(ops::NOT_EQUAL, [v0, v1]).unwrap();
//! assert_eq!(engine.value_of(&not_equal), Some(true));
//! assert!(!engine.is_contradiction());
//! ```

use std::{
    collections::{HashMap, HashSet},
    fmt::{self, Debug, Formatter},
    rc::Rc,
};
use tracing::debug;
use crate::{node::Node, ops};

/// A rule, run with the truth value of the node it is attached to.
type Rule = Rc<dyn Fn(&mut RulesEngine, bool)>;

/// A table of facts, with the rules that derive new facts from known ones.
#[derive(Default)]
pub struct RulesEngine {
    facts: HashMap<Node, bool>,
    rules: HashMap<Node, Vec<Rule>>,

    /// Nodes whose operation has already registered its rules.
    expanded: HashSet<Node>,

    contradiction: bool,
}

impl RulesEngine {
    /// Creates an engine with no facts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine holding every fact that follows from `node` evaluating to `value`.
    pub fn build(node: &Node, value: bool) -> Self {
        let mut engine = Self::new();
        engine.add_fact(node.clone(), value);
        engine
    }

    /// Adds the fact that `node` evaluates to `value`, and everything that follows from it.
    pub fn add_fact(&mut self, node: Node, value: bool) {
        if self.contradiction {
            return;
        }

        let known = node.as_boolean().or_else(|| self.facts.get(&node).copied());
        if let Some(known) = known {
            if known != value {
                debug!(%node, value, "contradiction");
                self.contradiction = true;
            }
            return;
        }

        // rules registered while expanding run as soon as they are added
        self.facts.insert(node.clone(), value);
        let rules = self.rules.get(&node).cloned().unwrap_or_default();
        self.expand(&node);
        for rule in rules {
            if self.contradiction {
                return;
            }
            rule(self, value);
        }
    }

    /// Attaches a rule to `node`. If the value of `node` is already known, the rule runs
    /// immediately.
    pub fn add_rule(&mut self, node: Node, rule: impl Fn(&mut RulesEngine, bool) + 'static) {
        if self.contradiction {
            return;
        }

        if let Some(value) = node.as_boolean() {
            rule(self, value);
            return;
        }

        let rule: Rule = Rc::new(rule);
        let known = self.facts.get(&node).copied();
        self.rules.entry(node).or_default().push(Rc::clone(&rule));
        if let Some(value) = known {
            rule(self, value);
        }
    }

    /// Registers the rules of the operation applied by `node`, once.
    fn expand(&mut self, node: &Node) {
        if !self.expanded.insert(node.clone()) {
            return;
        }
        if let Node::Function(function) = node {
            function.op().add_rules(node, function.args(), self);
        }
    }

    /// Returns the value `node` is known to evaluate to.
    ///
    /// Besides the facts of the table and boolean constants, the value of a boolean connective is
    /// known if it follows from the known values of its arguments.
    pub fn value_of(&self, node: &Node) -> Option<bool> {
        if let Some(value) = node.as_boolean().or_else(|| self.facts.get(node).copied()) {
            return Some(value);
        }

        let function = node.as_function()?;
        let op = function.op();
        match function.args() {
            [a] if op == ops::NOT => self.value_of(a).map(|a| !a),
            [a, b] if op == ops::AND => match (self.value_of(a), self.value_of(b)) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            },
            [a, b] if op == ops::OR => match (self.value_of(a), self.value_of(b)) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            },
            [a, b] if op == ops::XOR => Some(self.value_of(a)? != self.value_of(b)?),
            _ => None,
        }
    }

    /// Returns the known facts.
    pub fn facts(&self) -> &HashMap<Node, bool> {
        &self.facts
    }

    /// Returns true if the facts added to the engine cannot all hold at once.
    pub fn is_contradiction(&self) -> bool {
        self.contradiction
    }
}

impl Debug for RulesEngine {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RulesEngine")
            .field("facts", &self.facts)
            .field("contradiction", &self.contradiction)
            .finish()
    }
}
