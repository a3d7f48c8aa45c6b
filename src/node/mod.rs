//! The node module.
//!
//! Every node lives in its own `Rc` allocation. The only strong handle to an
//! attached node is stored in its parent's child slot; the back-reference from
//! child to parent is a `Weak`, so parent and child never keep each other alive.
//! Payload, back-reference and child slots sit in separate cells, so reading a
//! value or asking for the parent never conflicts with viewing or editing the
//! node's children.

mod deallocator;
mod editor;
mod parent;

pub use editor::Editor;
pub use parent::Parent;

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::TreeError;
use crate::side::Side;
use crate::tracing_helpers::trace_log;

const UNIQUE_OWNER_ERROR: &str = "invariant violated: an owned node must have a single strong handle";

/// The shared allocation behind a [`TreeNode`].
#[derive(destructure)]
pub(crate) struct NodeCore<T> {
    value: RefCell<T>,
    parent: RefCell<Weak<NodeCore<T>>>,
    family: RefCell<Family<T>>,
}

// The compiler-generated drop glue would recurse once per level.
impl<T> Drop for NodeCore<T> {
    fn drop(&mut self) {
        deallocator::deallocate_iteratively(self.family.get_mut());
    }
}

/// The child slots of a node.
pub(crate) struct Family<T> {
    left: Option<TreeNode<T>>,
    right: Option<TreeNode<T>>,
}

impl<T> Family<T> {
    fn new() -> Self {
        Family {
            left: None,
            right: None,
        }
    }

    fn slot(&self, side: Side) -> &Option<TreeNode<T>> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<TreeNode<T>> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

/// An owning handle to a binary tree node.
///
/// Holding a `TreeNode` by value means being its only owner: either it is a
/// root held by the caller, or it sits in a child slot of its parent. Attached
/// nodes are only ever reachable through borrowed views ([`Ref`]s returned by
/// [`left`](TreeNode::left)/[`right`](TreeNode::right) and the [`Parent`]
/// view), and `TreeNode` is not `Clone`. Attaching a subtree that already has
/// a parent is therefore rejected at compile time:
///
/// ```compile_fail
/// use parented_tree::TreeNode;
///
/// let root = TreeNode::fork(1, Some(TreeNode::leaf(2)), None);
/// let other = TreeNode::leaf(3);
/// let child = root.left().unwrap();
/// other.replace_left(Some(*child));
/// ```
///
/// ```compile_fail
/// use parented_tree::TreeNode;
///
/// let root = TreeNode::fork(1, Some(TreeNode::leaf(2)), None);
/// let other = TreeNode::leaf(3);
/// other.replace_left(Some(root.left().unwrap().clone()));
/// ```
///
/// Nodes are single-threaded and cannot be sent to another thread:
///
/// ```compile_fail
/// use parented_tree::TreeNode;
///
/// let root = TreeNode::leaf(1);
/// std::thread::spawn(move || drop(root));
/// ```
pub struct TreeNode<T> {
    core: Rc<NodeCore<T>>,
}

impl<T> TreeNode<T> {
    /// Creates a node with no children and no parent.
    pub fn leaf(value: T) -> Self {
        TreeNode {
            core: Rc::new(NodeCore {
                value: RefCell::new(value),
                parent: RefCell::new(Weak::new()),
                family: RefCell::new(Family::new()),
            }),
        }
    }

    /// Creates a node owning the given subtrees.
    /// Both subtrees point back at the new node by the time it is returned.
    pub fn fork(value: T, left: Option<TreeNode<T>>, right: Option<TreeNode<T>>) -> Self {
        let node = TreeNode::leaf(value);
        {
            let mut editor = node.edit();
            editor.replace(Side::Left, left);
            editor.replace(Side::Right, right);
        }
        trace_log!(
            has_left = node.has_left(),
            has_right = node.has_right(),
            "forked node"
        );
        node
    }

    /// # Panics
    ///
    /// Panics if the node's structure is being edited, as do
    /// [`has_right`](TreeNode::has_right), [`has_child`](TreeNode::has_child)
    /// and [`is_leaf`](TreeNode::is_leaf).
    pub fn has_left(&self) -> bool {
        self.has_child(Side::Left)
    }

    pub fn has_right(&self) -> bool {
        self.has_child(Side::Right)
    }

    /// # Panics
    ///
    /// Panics if the node's structure is being edited.
    pub fn has_child(&self, side: Side) -> bool {
        self.core.family.borrow().slot(side).is_some()
    }

    /// Returns true iff the parent back-reference resolves to a live node.
    /// Never conflicts with an edit of this node or of its parent.
    pub fn has_parent(&self) -> bool {
        self.core.parent.borrow().strong_count() > 0
    }

    pub fn is_leaf(&self) -> bool {
        !self.has_left() && !self.has_right()
    }

    pub fn is_root(&self) -> bool {
        !self.has_parent()
    }

    /// Borrows the payload.
    ///
    /// # Panics
    ///
    /// Panics if the payload is currently borrowed mutably.
    /// To avoid panicking, use [`try_value`](TreeNode::try_value).
    pub fn value(&self) -> Ref<'_, T> {
        self.core.value.borrow()
    }

    pub fn try_value(&self) -> Result<Ref<'_, T>, TreeError> {
        Ok(self.core.value.try_borrow()?)
    }

    /// Borrows the payload mutably.
    ///
    /// # Panics
    ///
    /// Panics if the payload is currently borrowed.
    /// To avoid panicking, use [`try_value_mut`](TreeNode::try_value_mut).
    pub fn value_mut(&self) -> RefMut<'_, T> {
        self.core.value.borrow_mut()
    }

    pub fn try_value_mut(&self) -> Result<RefMut<'_, T>, TreeError> {
        Ok(self.core.value.try_borrow_mut()?)
    }

    /// Replaces the payload, returning the old one.
    pub fn set_value(&self, value: T) -> T {
        std::mem::replace(&mut *self.value_mut(), value)
    }

    /// # Panics
    ///
    /// Panics if the node's structure is being edited, as do
    /// [`right`](TreeNode::right) and [`child`](TreeNode::child).
    pub fn left(&self) -> Option<Ref<'_, TreeNode<T>>> {
        self.child(Side::Left)
    }

    pub fn right(&self) -> Option<Ref<'_, TreeNode<T>>> {
        self.child(Side::Right)
    }

    /// Returns a view of the child on the given side.
    ///
    /// While the view is alive this node's structure cannot be edited,
    /// so the child cannot be detached from under it.
    pub fn child(&self, side: Side) -> Option<Ref<'_, TreeNode<T>>> {
        Ref::filter_map(self.core.family.borrow(), |family| family.slot(side).as_ref()).ok()
    }

    /// Returns a view of the parent, or `None` if there is no live parent.
    ///
    /// The view is tied to the borrow of `self` and cannot be turned
    /// into an owning handle.
    pub fn parent(&self) -> Option<Parent<'_, T>> {
        let parent = self.core.parent.borrow().upgrade()?;
        Some(Parent::new(parent))
    }

    /// Returns which child slot of its parent this node occupies.
    ///
    /// # Panics
    ///
    /// Panics if the parent's structure is being edited.
    pub fn side_in_parent(&self) -> Option<Side> {
        let parent = self.parent()?;
        let family = parent.core.family.borrow();
        Side::BOTH.iter().copied().find(|&side| {
            family
                .slot(side)
                .as_ref()
                .map_or(false, |child| child.ptr_eq(self))
        })
    }

    /// Returns true if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &TreeNode<T>) -> bool {
        Rc::ptr_eq(&self.core, &other.core)
    }

    /// Starts a structural edit of this node.
    ///
    /// # Panics
    ///
    /// Panics if the node's structure is borrowed, e.g. through a view of one
    /// of its children. To avoid panicking, use [`try_edit`](TreeNode::try_edit).
    pub fn edit(&self) -> Editor<'_, T> {
        Editor::new(&self.core, self.core.family.borrow_mut())
    }

    pub fn try_edit(&self) -> Result<Editor<'_, T>, TreeError> {
        Ok(Editor::new(&self.core, self.core.family.try_borrow_mut()?))
    }

    /// Installs `child` on the given side and returns the detached former child.
    /// Passing `None` removes the subtree on that side.
    ///
    /// # Panics
    ///
    /// Same as [`edit`](TreeNode::edit).
    pub fn replace(&self, side: Side, child: Option<TreeNode<T>>) -> Option<TreeNode<T>> {
        self.edit().replace(side, child)
    }

    pub fn replace_left(&self, child: Option<TreeNode<T>>) -> Option<TreeNode<T>> {
        self.replace(Side::Left, child)
    }

    pub fn replace_right(&self, child: Option<TreeNode<T>>) -> Option<TreeNode<T>> {
        self.replace(Side::Right, child)
    }

    pub fn replace_left_with_leaf(&self, value: T) -> Option<TreeNode<T>> {
        self.replace_left(Some(TreeNode::leaf(value)))
    }

    pub fn replace_right_with_leaf(&self, value: T) -> Option<TreeNode<T>> {
        self.replace_right(Some(TreeNode::leaf(value)))
    }

    pub fn remove(&self, side: Side) -> Option<TreeNode<T>> {
        self.replace(side, None)
    }

    pub fn remove_left(&self) -> Option<TreeNode<T>> {
        self.remove(Side::Left)
    }

    pub fn remove_right(&self) -> Option<TreeNode<T>> {
        self.remove(Side::Right)
    }

    /// Dismantles the node into its payload and its detached subtrees.
    pub fn into_parts(self) -> (T, Option<TreeNode<T>>, Option<TreeNode<T>>) {
        let core = Rc::try_unwrap(self.core).ok().expect(UNIQUE_OWNER_ERROR);
        let (value, _parent, family) = core.destructure();
        let Family { left, right } = family.into_inner();
        for child in left.iter().chain(right.iter()) {
            child.set_parent(Weak::new());
        }
        (value.into_inner(), left, right)
    }

    /// Consumes the node, dropping its subtrees.
    pub fn into_value(self) -> T {
        self.into_parts().0
    }

    // The only way a back-reference gets written.
    fn set_parent(&self, parent: Weak<NodeCore<T>>) {
        *self.core.parent.borrow_mut() = parent;
    }
}

impl<T> From<T> for TreeNode<T> {
    fn from(value: T) -> Self {
        TreeNode::leaf(value)
    }
}

// Only the node itself is printed, so formatting a degenerate tree stays shallow.
impl<T: fmt::Debug> fmt::Debug for TreeNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TreeNode");
        match self.core.value.try_borrow() {
            Ok(value) => s.field("value", &*value),
            Err(_) => s.field("value", &format_args!("<borrowed>")),
        };
        match self.core.family.try_borrow() {
            Ok(family) => s
                .field("has_left", &family.left.is_some())
                .field("has_right", &family.right.is_some()),
            Err(_) => s.field("children", &format_args!("<borrowed>")),
        };
        s.field("has_parent", &self.has_parent()).finish()
    }
}
