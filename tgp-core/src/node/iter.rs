use super::Node;

/// An iterator that iteratively traverses a tree of nodes in left-to-right post-order (children
/// before their parent), which is the order used to address nodes with [`Node::at`].
///
/// This iterator is created by [`Node::iter`].
pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
    last_visited: Option<&'a Node>,
}

impl<'a> NodeIter<'a> {
    /// Creates a new iterator that traverses the given tree in left-to-right post-order.
    pub fn new(node: &'a Node) -> Self {
        Self {
            stack: vec![node],
            last_visited: None,
        }
    }

    /// Pops the current node in the stack and marks it as the last visited node.
    fn visit(&mut self) -> Option<&'a Node> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given node is the node that was visited last.
    ///
    /// This compares the location of the nodes, not their contents, so that a sub-tree shared by
    /// two parents is still traversed once per parent.
    fn is_last_visited(&self, node: &'a Node) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, node),
            None => false,
        }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = *self.stack.last()?;
            match node {
                Node::Function(function) => match function.args().last() {
                    Some(last) if !self.is_last_visited(last) => {
                        for arg in function.args().iter().rev() {
                            self.stack.push(arg);
                        }
                    },
                    _ => return self.visit(),
                },
                Node::Constant { .. } | Node::Variable { .. } => return self.visit(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::test_util::*;

    #[test]
    fn post_order() {
        // (+ (* v0 v1) (+ v2 1))
        let tree = add(mul(int_var(0), int_var(1)), add(int_var(2), int(1)));
        let order = tree.iter().map(|node| node.to_string()).collect::<Vec<_>>();
        assert_eq!(order, [
            "v0",
            "v1",
            "(* v0 v1)",
            "v2",
            "1",
            "(+ v2 1)",
            "(+ (* v0 v1) (+ v2 1))",
        ]);
    }

    #[test]
    fn shared_sub_trees_are_visited_per_occurrence() {
        let shared = mul(int_var(0), int_var(1));
        let tree = add(shared.clone(), shared);
        assert_eq!(tree.iter().count(), 7);
    }
}
