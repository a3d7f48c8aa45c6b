//! Binary tree nodes with explicit ownership direction.
//!
//! A [`TreeNode`] owns its left and right subtrees. Each subtree keeps a
//! non-owning back-reference to the node holding it, so a node can always ask
//! for its parent, but that question never keeps the parent alive: once the
//! parent is gone the answer is simply "no parent".
//!
//! ```
//! use parented_tree::{Side, TreeNode};
//!
//! let root = TreeNode::fork(5, Some(TreeNode::leaf(3)), Some(TreeNode::leaf(8)));
//! assert_eq!(*root.left().unwrap().value(), 3);
//! assert_eq!(*root.left().unwrap().parent().unwrap().value(), 5);
//! assert_eq!(root.right().unwrap().side_in_parent(), Some(Side::Right));
//!
//! // detaching hands the old subtree back instead of destroying it
//! let old = root.replace_right_with_leaf(99).unwrap();
//! assert_eq!(*old.value(), 8);
//! assert!(!old.has_parent());
//! assert_eq!(*root.right().unwrap().value(), 99);
//! ```
//!
//! Logging of structural events is available through the `tracing` feature.

#[macro_use]
extern crate derive_destructure;

mod tracing_helpers;

pub mod error;
pub mod node;
pub mod side;

pub use error::TreeError;
pub use node::*;
pub use side::Side;
