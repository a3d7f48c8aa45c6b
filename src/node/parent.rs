use std::marker::PhantomData;
use std::ops::Deref;

use super::*;

/// A borrowed view of a node's parent, returned by [`TreeNode::parent`].
///
/// It dereferences to the parent node, so the parent can be read and edited,
/// but it lives no longer than the borrow of the child it was obtained from
/// and can never become an owning handle.
pub struct Parent<'a, T> {
    node: TreeNode<T>,
    child: PhantomData<&'a TreeNode<T>>,
}

impl<'a, T> Parent<'a, T> {
    pub(super) fn new(core: Rc<NodeCore<T>>) -> Self {
        Parent {
            node: TreeNode { core },
            child: PhantomData,
        }
    }
}

impl<T> Deref for Parent<'_, T> {
    type Target = TreeNode<T>;
    fn deref(&self) -> &TreeNode<T> {
        &self.node
    }
}

impl<T: fmt::Debug> fmt::Debug for Parent<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node.try_value() {
            Ok(value) => f.debug_tuple("Parent").field(&*value).finish(),
            Err(_) => f.debug_tuple("Parent").field(&format_args!("<borrowed>")).finish(),
        }
    }
}
