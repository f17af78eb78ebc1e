//! The expression tree.
//!
//! A tree is made of three kinds of [`Node`]s: constants, variables and applications of an
//! [`Operation`](crate::ops::Operation) to argument nodes. Nodes are immutable; every edit
//! produces a new tree that shares its untouched sub-trees with the original.
//!
//! Nodes are addressed by their position in a left-to-right post-order traversal (children
//! before their parent), optionally counting only the nodes that match a predicate. The root is
//! always the last addressable node:
//!
//! ```
//! use tgp_core::{node::Node, ops, types::Type};
//!
//! let v0 = Node::variable(0, Type::Integer);
//! let tree = Node::function(ops::ADD, [v0.clone(), Node::integer(1)]).unwrap();
//! assert_eq!(tree.node_count(), 3);
//! assert_eq!(tree.at(0).unwrap(), &v0);
//! assert_eq!(tree.at(2).unwrap(), &tree);
//! ```

pub mod iter;

use iter::NodeIter;
use std::{
    cmp::Ordering,
    collections::hash_map::DefaultHasher,
    fmt::{self, Display, Formatter},
    hash::{Hash, Hasher},
    sync::Arc,
};
use tgp_error::Error;
use crate::{
    error::{IndexOutOfRange, TypeMismatch},
    ops::Op,
    types::Type,
    value::Value,
};

/// A single node of an expression tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    /// A literal value and its type.
    Constant {
        value: Value,
        ty: Type,
    },

    /// A variable, identified by its position in the [`Assignments`](crate::eval::Assignments)
    /// an expression is evaluated with.
    Variable {
        id: usize,
        ty: Type,
    },

    /// The application of an operation to its arguments.
    Function(Arc<FunctionNode>),
}

/// The application of an operation to a fixed number of argument nodes.
///
/// The hash, node count and depth of the application are computed once, when it is built.
#[derive(Debug)]
pub struct FunctionNode {
    op: Op,
    ty: Type,
    args: Box<[Node]>,
    hash: u64,
    node_count: usize,
    depth: usize,
    infallible: bool,
}

impl FunctionNode {
    fn new(op: Op, ty: Type, args: Vec<Node>) -> Self {
        let mut hasher = DefaultHasher::new();
        op.hash(&mut hasher);
        ty.hash(&mut hasher);
        args.hash(&mut hasher);

        Self {
            node_count: 1 + args.iter().map(Node::node_count).sum::<usize>(),
            depth: 1 + args.iter().map(Node::depth).max().unwrap_or(0),
            infallible: !op.is_fallible() && args.iter().all(Node::is_infallible),
            hash: hasher.finish(),
            op,
            ty,
            args: args.into_boxed_slice(),
        }
    }

    /// Returns the applied operation.
    pub fn op(&self) -> Op {
        self.op
    }

    /// Returns the type of the value this application evaluates to.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Returns the argument nodes.
    pub fn args(&self) -> &[Node] {
        &self.args
    }
}

impl PartialEq for FunctionNode {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self, other)
            || (self.hash == other.hash
                && self.op == other.op
                && self.ty == other.ty
                && self.args == other.args)
    }
}

impl Eq for FunctionNode {}

impl Hash for FunctionNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl Node {
    /// Creates a constant node.
    pub fn constant(value: impl Into<Value>, ty: Type) -> Self {
        Node::Constant { value: value.into(), ty }
    }

    /// Creates an integer constant node.
    pub fn integer(n: i64) -> Self {
        Node::constant(n, Type::Integer)
    }

    /// Creates a boolean constant node.
    pub fn boolean(b: bool) -> Self {
        Node::constant(b, Type::Boolean)
    }

    /// Creates a constant node holding an operation as a function value.
    pub fn operation(op: Op) -> Self {
        Node::constant(op, op.signature().as_type())
    }

    /// Creates a variable node.
    pub fn variable(id: usize, ty: Type) -> Self {
        Node::Variable { id, ty }
    }

    /// Applies the given operation to the given arguments.
    ///
    /// The argument types are checked against the operation's signature, and the type of the new
    /// node is the signature's return type with its generic placeholders resolved. Returns an
    /// error if the number or types of the arguments do not match the signature.
    pub fn function(op: Op, args: impl Into<Vec<Node>>) -> Result<Self, Error> {
        let args = args.into();
        let types = args.iter().map(|arg| arg.ty().clone()).collect::<Vec<_>>();
        let ty = op.signature().bind(op.token(), &types)?;
        Ok(Node::build(op, ty, args))
    }

    /// Applies the given operation to the given arguments without checking them against the
    /// operation's signature. `ty` must be the type the signature resolves to.
    pub(crate) fn build(op: Op, ty: Type, args: Vec<Node>) -> Self {
        Node::Function(Arc::new(FunctionNode::new(op, ty, args)))
    }

    /// Returns the type of the value this node evaluates to.
    pub fn ty(&self) -> &Type {
        match self {
            Node::Constant { ty, .. } | Node::Variable { ty, .. } => ty,
            Node::Function(function) => &function.ty,
        }
    }

    /// Returns true if this node is a constant.
    pub fn is_constant(&self) -> bool {
        matches!(self, Node::Constant { .. })
    }

    /// Returns true if this node is a variable.
    pub fn is_variable(&self) -> bool {
        matches!(self, Node::Variable { .. })
    }

    /// Returns true if this node is the application of an operation.
    pub fn is_function(&self) -> bool {
        matches!(self, Node::Function(_))
    }

    /// Returns true if this node is a constant or a variable.
    pub fn is_terminal(&self) -> bool {
        !self.is_function()
    }

    /// Returns the value of this node if it is a constant.
    pub fn as_constant(&self) -> Option<&Value> {
        match self {
            Node::Constant { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Returns the value of this node if it is an integer constant.
    pub fn as_integer(&self) -> Option<i64> {
        match self.as_constant()? {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the value of this node if it is a boolean constant.
    pub fn as_boolean(&self) -> Option<bool> {
        match self.as_constant()? {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the application if this node is one.
    pub fn as_function(&self) -> Option<&FunctionNode> {
        match self {
            Node::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Returns the arguments of this node if it is an application of `op`.
    pub fn args_of(&self, op: Op) -> Option<&[Node]> {
        self.as_function()
            .filter(|function| function.op == op)
            .map(FunctionNode::args)
    }

    /// Returns true if both nodes are the same allocation, or equal terminals.
    ///
    /// The simplifier returns the very node it was given when nothing could be simplified, which
    /// callers can detect with this method.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Function(a), Node::Function(b)) => Arc::ptr_eq(a, b),
            (Node::Function(_), _) | (_, Node::Function(_)) => false,
            _ => self == other,
        }
    }

    /// Returns true if evaluating this node can never raise a domain error, given that every
    /// variable is assigned.
    ///
    /// Operations held as function values count as if they were applied, and so do variables of
    /// function type, which may hold any operation.
    pub fn is_infallible(&self) -> bool {
        match self {
            Node::Constant { value: Value::Function(op), .. } => !op.is_fallible(),
            Node::Constant { .. } => true,
            Node::Variable { ty, .. } => !matches!(ty, Type::Function(..)),
            Node::Function(function) => function.infallible,
        }
    }

    /// Returns an iterator over the nodes of this tree, in the order they are addressed by
    /// [`Node::at`].
    pub fn iter(&self) -> NodeIter<'_> {
        NodeIter::new(self)
    }

    /// Returns the total number of nodes in this tree.
    pub fn node_count(&self) -> usize {
        match self {
            Node::Constant { .. } | Node::Variable { .. } => 1,
            Node::Function(function) => function.node_count,
        }
    }

    /// Returns the number of nodes in this tree that match the predicate.
    pub fn node_count_where(&self, predicate: impl Fn(&Node) -> bool) -> usize {
        self.iter().filter(|node| predicate(node)).count()
    }

    /// Returns the number of nodes on the longest path from this node to a leaf. A leaf has
    /// depth 1.
    pub fn depth(&self) -> usize {
        match self {
            Node::Constant { .. } | Node::Variable { .. } => 1,
            Node::Function(function) => function.depth,
        }
    }

    /// Returns the node at the given post-order index.
    pub fn at(&self, index: usize) -> Result<&Node, Error> {
        self.at_where(index, |_| true)
    }

    /// Returns the node at the given post-order index, counting only the nodes that match the
    /// predicate.
    pub fn at_where(&self, index: usize, predicate: impl Fn(&Node) -> bool) -> Result<&Node, Error> {
        self.iter()
            .filter(|node| predicate(node))
            .nth(index)
            .ok_or_else(|| out_of_range(index, self.node_count_where(&predicate)))
    }

    /// Returns a new tree where the node at the given post-order index is replaced by
    /// `rewrite(node)`. Only the nodes on the path from the root to the replaced node are
    /// rebuilt.
    ///
    /// Returns an error if the index is out of range, or if the replacement has a different type
    /// than the node it replaces.
    pub fn replace_at(&self, index: usize, rewrite: impl FnOnce(&Node) -> Node) -> Result<Node, Error> {
        self.replace_at_where(index, rewrite, |_| true)
    }

    /// Like [`Node::replace_at`], but counting only the nodes that match the predicate.
    pub fn replace_at_where(
        &self,
        index: usize,
        rewrite: impl FnOnce(&Node) -> Node,
        predicate: impl Fn(&Node) -> bool,
    ) -> Result<Node, Error> {
        let count = self.node_count_where(&predicate);
        if index >= count {
            return Err(out_of_range(index, count));
        }

        self.replace_located(index, rewrite, &predicate)
    }

    /// Replaces the node at the given index, which must be in range.
    fn replace_located<F>(&self, mut index: usize, rewrite: F, predicate: &dyn Fn(&Node) -> bool) -> Result<Node, Error>
    where
        F: FnOnce(&Node) -> Node,
    {
        if let Node::Function(function) = self {
            for (i, arg) in function.args.iter().enumerate() {
                let count = arg.node_count_where(predicate);
                if index < count {
                    let mut args = function.args.to_vec();
                    args[i] = arg.replace_located(index, rewrite, predicate)?;
                    return Ok(Node::build(function.op, function.ty.clone(), args));
                }
                index -= count;
            }
        }

        let replacement = rewrite(self);
        if replacement.ty() != self.ty() {
            return Err(Error::spanless(TypeMismatch {
                expected: self.ty().clone(),
                found: replacement.ty().clone(),
            }));
        }
        Ok(replacement)
    }

    /// Returns a new tree where every node matching the predicate is replaced by
    /// `rewrite(node)`. The tree is searched from the root down; the replacements themselves are
    /// not searched. `rewrite` must return a node of the same type as its input.
    ///
    /// If no node matches, the returned node is this very node (see [`Node::ptr_eq`]).
    pub fn replace_all(&self, predicate: &dyn Fn(&Node) -> bool, rewrite: &dyn Fn(&Node) -> Node) -> Node {
        if predicate(self) {
            return rewrite(self);
        }

        match self {
            Node::Function(function) => {
                let args = function.args.iter()
                    .map(|arg| arg.replace_all(predicate, rewrite))
                    .collect::<Vec<_>>();
                if args.iter().zip(function.args.iter()).all(|(new, old)| new.ptr_eq(old)) {
                    self.clone()
                } else {
                    Node::build(function.op, function.ty.clone(), args)
                }
            },
            _ => self.clone(),
        }
    }

    /// Returns true if the given node occurs anywhere in this tree.
    pub fn contains(&self, needle: &Node) -> bool {
        self.iter().any(|node| node == needle)
    }

    /// Rank of the node kind in the total order over nodes.
    fn rank(&self) -> u8 {
        match self {
            Node::Constant { .. } => 0,
            Node::Variable { .. } => 1,
            Node::Function(_) => 2,
        }
    }
}

fn out_of_range(index: usize, count: usize) -> Error {
    Error::spanless(IndexOutOfRange { index, count })
}

/// The total order used to canonicalize the arguments of commutative operations.
///
/// Constants order before variables, and variables before applications. Nodes of the same kind
/// order by type, then by value, identifier, or operation token followed by arguments.
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.ptr_eq(other) {
            return Ordering::Equal;
        }

        self.rank().cmp(&other.rank())
            .then_with(|| self.ty().cmp(other.ty()))
            .then_with(|| match (self, other) {
                (Node::Constant { value: a, .. }, Node::Constant { value: b, .. }) => a.cmp(b),
                (Node::Variable { id: a, .. }, Node::Variable { id: b, .. }) => a.cmp(b),
                (Node::Function(a), Node::Function(b)) => a.op.cmp(&b.op)
                    .then_with(|| a.args.cmp(&b.args)),
                _ => Ordering::Equal,
            })
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Renders the node in prefix notation, such as `(+ v0 (* 2 v1))`.
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Constant { value, .. } => write!(f, "{}", value),
            Node::Variable { id, .. } => write!(f, "v{}", id),
            Node::Function(function) => {
                write!(f, "({}", function.op.token())?;
                for arg in function.args.iter() {
                    write!(f, " {}", arg)?;
                }
                write!(f, ")")
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{error::ArgumentTypeMismatch, ops, test_util::*};
    use super::*;

    /// `(+ (* v0 v1) (+ v2 1))`
    fn sample() -> Node {
        add(mul(int_var(0), int_var(1)), add(int_var(2), int(1)))
    }

    #[test]
    fn count_and_depth() {
        let tree = mul(int(7), int(7));
        assert_eq!((tree.node_count(), tree.depth()), (3, 2));

        // (zero? (+ (* 4 5) (- 6 (+ 7 8))))
        let tree = call(ops::ZERO, [add(mul(int(4), int(5)), sub(int(6), add(int(7), int(8))))]);
        assert_eq!((tree.node_count(), tree.depth()), (10, 5));

        // (if (zero? v0) v1 (+ v0 (* v1 v2)))
        let tree = call(ops::IF, [
            call(ops::ZERO, [int_var(0)]),
            int_var(1),
            add(int_var(0), mul(int_var(1), int_var(2))),
        ]);
        assert_eq!((tree.node_count(), tree.depth()), (9, 4));

        assert_eq!((int_var(0).node_count(), int_var(0).depth()), (1, 1));
    }

    #[test]
    fn count_where() {
        // (+ (+ 1 v0) (+ (+ v0 v1) 2))
        let tree = add(add(int(1), int_var(0)), add(add(int_var(0), int_var(1)), int(2)));
        assert_eq!(tree.node_count_where(Node::is_variable), 3);
        assert_eq!(tree.node_count_where(Node::is_constant), 2);
        assert_eq!(tree.node_count_where(Node::is_function), 4);
    }

    #[test]
    fn at_post_order() {
        let tree = sample();
        let expected = [
            "v0",
            "v1",
            "(* v0 v1)",
            "v2",
            "1",
            "(+ v2 1)",
            "(+ (* v0 v1) (+ v2 1))",
        ];
        for (i, expected) in expected.iter().enumerate() {
            assert_eq!(tree.at(i).unwrap().to_string(), *expected);
        }
        assert!(tree.at(7).unwrap_err().is::<IndexOutOfRange>());
    }

    #[test]
    fn at_where_terminals() {
        let tree = sample();
        assert_eq!(tree.at_where(2, Node::is_terminal).unwrap(), &int_var(2));
        assert_eq!(tree.at_where(1, Node::is_function).unwrap().to_string(), "(+ v2 1)");
        let err = tree.at_where(3, Node::is_function).unwrap_err();
        let out_of_range = err.downcast_ref::<IndexOutOfRange>().unwrap();
        assert_eq!((out_of_range.index, out_of_range.count), (3, 3));
    }

    #[test]
    fn replace_at_rebuilds_path_only() {
        let tree = sample();
        let replaced = tree.replace_at(3, |_| int(9)).unwrap();
        assert_eq!(replaced.to_string(), "(+ (* v0 v1) (+ 9 1))");

        // the untouched sibling is shared with the original tree
        let Node::Function(old) = &tree else { unreachable!() };
        let Node::Function(new) = &replaced else { unreachable!() };
        assert!(old.args()[0].ptr_eq(&new.args()[0]));
        assert!(!old.args()[1].ptr_eq(&new.args()[1]));
    }

    #[test]
    fn replace_at_root() {
        let tree = sample();
        let replaced = tree.replace_at(6, |_| int_var(5)).unwrap();
        assert_eq!(replaced, int_var(5));
    }

    #[test]
    fn replace_at_where_functions() {
        let tree = sample();
        let replaced = tree.replace_at_where(0, |node| sub(node.clone(), int(1)), Node::is_function).unwrap();
        assert_eq!(replaced.to_string(), "(+ (- (* v0 v1) 1) (+ v2 1))");
    }

    #[test]
    fn replace_at_identity_round_trip() {
        let tree = sample();
        for i in 0..tree.node_count() {
            assert_eq!(tree.replace_at(i, Node::clone).unwrap(), tree);
        }
    }

    #[test]
    fn replace_at_rejects_type_change() {
        let tree = sample();
        assert!(tree.replace_at(0, |_| boolean(true)).unwrap_err().is::<TypeMismatch>());
        assert!(tree.replace_at(7, Node::clone).unwrap_err().is::<IndexOutOfRange>());
    }

    #[test]
    fn replace_all_shares_when_nothing_matches() {
        let tree = sample();
        let same = tree.replace_all(&|node| node == &int_var(9), &|_| int(0));
        assert!(same.ptr_eq(&tree));

        let replaced = tree.replace_all(&|node| node == &int_var(2), &|_| int(0));
        assert_eq!(replaced.to_string(), "(+ (* v0 v1) (+ 0 1))");
    }

    #[test]
    fn checked_construction() {
        let err = Node::function(ops::ADD, [int(1), boolean(true)]).unwrap_err();
        let mismatch = err.downcast_ref::<ArgumentTypeMismatch>().unwrap();
        assert_eq!(mismatch.index, 1);

        let node = Node::function(ops::IF, [boolean(true), string("a"), string("b")]).unwrap();
        assert_eq!(node.ty(), &Type::String);
    }

    #[test]
    fn equality_and_hash_agree() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(sample());
        assert!(set.contains(&sample()));
        assert_ne!(int_var(0), Node::variable(0, Type::Boolean));
        assert_ne!(int(1), Node::constant(1, Type::optional(Type::Integer)));
    }

    #[test]
    fn ordering() {
        assert!(int(100) < int_var(0));
        assert!(int_var(3) < add(int(1), int(1)));
        assert!(int_var(0) < int_var(1));
        assert!(boolean(true) < int(0));
        assert!(add(int_var(0), int_var(1)) < add(int_var(0), int_var(2)));
        assert_eq!(sample().cmp(&sample()), Ordering::Equal);
    }

    #[test]
    fn infallible() {
        assert!(sample().is_infallible());
        assert!(!div(int_var(0), int_var(1)).is_infallible());
        assert!(!add(int(1), div(int_var(0), int_var(1))).is_infallible());
        assert!(!Node::operation(ops::DIVIDE).is_infallible());
        assert!(Node::operation(ops::ADD).is_infallible());
    }

    #[test]
    fn display() {
        assert_eq!(sample().to_string(), "(+ (* v0 v1) (+ v2 1))");
        assert_eq!(call(ops::ANY, [Node::operation(ops::ZERO), int_list([0, 1])]).to_string(), "(any? zero? [0 1])");
    }
}
