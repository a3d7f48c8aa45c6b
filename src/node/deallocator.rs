use super::*;
use crate::tracing_helpers::debug_log;

/// The auto-generated deallocation code for nodes is recursive.
/// Since a tree can have arbitrary depth (a degenerate tree is just a list),
/// dropping a large tree could overflow the stack.
///
/// Therefore, we have this tiny struct in order to deallocate subtrees in an iterative way.
struct IterativeDeallocator<T> {
    stack: Vec<TreeNode<T>>,
}

impl<T> IterativeDeallocator<T> {
    fn step(&mut self) -> Option<()> {
        let node = self.stack.pop()?;
        // A `Parent` view may still share this node; it finishes the job when dropped.
        if let Ok(mut core) = Rc::try_unwrap(node.core) {
            self.push_children(core.family.get_mut());
        }
        Some(())
    }

    fn push_children(&mut self, family: &mut Family<T>) {
        self.stack.extend(family.left.take());
        self.stack.extend(family.right.take());
    }
}

/// Empties the child slots and deallocates the subtrees iteratively.
/// Input is a reference and not an owned value so that this function can get
/// called in `Drop` implementations.
pub(super) fn deallocate_iteratively<T>(family: &mut Family<T>) {
    if family.left.is_none() && family.right.is_none() {
        return;
    }
    let mut deallocator = IterativeDeallocator { stack: vec![] };
    deallocator.push_children(family);
    debug_log!("deallocating subtrees iteratively");
    while deallocator.step().is_some() {}
}
