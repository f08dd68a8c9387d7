use super::IdentifierTree;

/// Read-only handle to a node inside an [`IdentifierTree`].
///
/// Handles borrow the tree, so structure can only change through the tree's
/// own append operation.
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a IdentifierTree,
    slot: usize,
}

impl<'a> NodeRef<'a> {
    pub(super) fn new(tree: &'a IdentifierTree, slot: usize) -> Self {
        Self { tree, slot }
    }

    pub fn id(&self) -> &'a str {
        &self.tree.nodes[self.slot].id
    }

    pub fn is_root(&self) -> bool {
        self.tree.nodes[self.slot].parent.is_none()
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.tree.nodes[self.slot]
            .parent
            .map(|parent| NodeRef::new(self.tree, parent))
    }

    /// Children in append order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        tree.nodes[self.slot]
            .children
            .iter()
            .map(move |&child| NodeRef::new(tree, child))
    }

    pub fn child_ids(&self) -> Vec<&'a str> {
        self.children().map(|child| child.id()).collect()
    }

    pub fn child_count(&self) -> usize {
        self.tree.nodes[self.slot].children.len()
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id())
            .field("children", &self.child_ids())
            .finish()
    }
}
