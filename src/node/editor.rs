use super::*;

/// Exclusive access to the child slots of one node.
///
/// Every attach and detach goes through here. The node's structure stays
/// mutably borrowed for the editor's whole life, so nobody can observe a child
/// whose back-reference has not been rewired yet.
pub struct Editor<'a, T> {
    node: &'a Rc<NodeCore<T>>,
    family: RefMut<'a, Family<T>>,
}

impl<'a, T> Editor<'a, T> {
    pub(super) fn new(node: &'a Rc<NodeCore<T>>, family: RefMut<'a, Family<T>>) -> Self {
        Editor { node, family }
    }

    pub fn has_child(&self, side: Side) -> bool {
        self.family.slot(side).is_some()
    }

    /// Installs `child` on the given side, pointing its back-reference at this
    /// node, and returns the former child with its back-reference cleared.
    pub fn replace(&mut self, side: Side, child: Option<TreeNode<T>>) -> Option<TreeNode<T>> {
        if let Some(child) = &child {
            child.set_parent(Rc::downgrade(self.node));
        }
        let old = std::mem::replace(self.family.slot_mut(side), child);
        if let Some(old) = &old {
            old.set_parent(Weak::new());
        }
        trace_log!(
            side = ?side,
            attached = self.family.slot(side).is_some(),
            detached = old.is_some(),
            "replaced child"
        );
        old
    }

    pub fn replace_with_leaf(&mut self, side: Side, value: T) -> Option<TreeNode<T>> {
        self.replace(side, Some(TreeNode::leaf(value)))
    }

    pub fn remove(&mut self, side: Side) -> Option<TreeNode<T>> {
        self.replace(side, None)
    }

    /// Exchanges the left and right subtrees.
    pub fn swap_children(&mut self) {
        let family = &mut *self.family;
        std::mem::swap(&mut family.left, &mut family.right);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_edit_rewires_every_subtree() {
        let root = TreeNode::leaf(0);
        let (old_left, old_right) = {
            let mut editor = root.edit();
            assert!(!editor.has_child(Side::Left));
            let old_left = editor.replace_with_leaf(Side::Left, 1);
            let old_right = editor.replace(Side::Right, Some(TreeNode::fork(2, None, None)));
            (old_left, old_right)
        };
        assert!(old_left.is_none());
        assert!(old_right.is_none());
        assert!(root.left().unwrap().parent().unwrap().ptr_eq(&root));
        assert!(root.right().unwrap().parent().unwrap().ptr_eq(&root));
    }

    #[test]
    fn swapped_children_keep_their_parent() {
        let root = TreeNode::fork(0, Some(TreeNode::leaf(1)), None);
        root.edit().swap_children();
        assert!(!root.has_left());
        let right = root.right().unwrap();
        assert_eq!(*right.value(), 1);
        assert_eq!(right.side_in_parent(), Some(Side::Right));
    }

    #[test]
    fn edit_is_refused_while_a_child_is_viewed() {
        let root = TreeNode::fork(1, Some(TreeNode::leaf(2)), None);
        let left = root.left().unwrap();
        assert!(matches!(root.try_edit(), Err(TreeError::BorrowMut(_))));
        // the same conflict reached through the parent view
        let parent = left.parent().unwrap();
        assert!(matches!(parent.try_edit(), Err(TreeError::BorrowMut(_))));
        drop(parent);
        drop(left);
        assert!(root.try_edit().is_ok());
    }

    #[test]
    fn nested_edit_is_refused() {
        let root = TreeNode::leaf(1);
        let _editor = root.edit();
        assert!(root.try_edit().is_err());
        // the payload lives in its own cell
        assert_eq!(*root.value(), 1);
    }

    #[test]
    fn detached_child_is_handed_back_whole() {
        let root = TreeNode::fork(
            1,
            Some(TreeNode::fork(2, Some(TreeNode::leaf(3)), None)),
            None,
        );
        let detached = root.edit().remove(Side::Left).unwrap();
        assert!(!root.has_left());
        assert!(detached.is_root());
        let grandchild = detached.left().unwrap();
        assert!(grandchild.parent().unwrap().ptr_eq(&detached));
    }
}
