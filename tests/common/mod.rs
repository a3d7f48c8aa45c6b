//! Common test utilities.
//!
//! Set `RUST_LOG=parented_tree=trace` and build with `--features tracing`
//! to see the structural events while a test runs.

#![allow(dead_code)]

use std::cell::Cell;
use std::rc::Rc;

use parented_tree::{Side, TreeNode};
use rand::Rng;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Counts how many [`Tracked`] payloads created by it are still alive.
#[derive(Clone, Default)]
pub struct LiveCounter(Rc<Cell<usize>>);

impl LiveCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(&self, value: i32) -> Tracked {
        self.0.set(self.0.get() + 1);
        Tracked {
            value,
            live: self.0.clone(),
        }
    }

    pub fn leaf(&self, value: i32) -> TreeNode<Tracked> {
        TreeNode::leaf(self.track(value))
    }

    pub fn live(&self) -> usize {
        self.0.get()
    }
}

/// A payload that reports its own destruction.
#[derive(Debug)]
pub struct Tracked {
    pub value: i32,
    live: Rc<Cell<usize>>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

pub fn random_side<R: Rng>(rng: &mut R) -> Side {
    if rng.gen() {
        Side::Left
    } else {
        Side::Right
    }
}

/// Counts the nodes of a subtree.
pub fn count_nodes<T>(node: &TreeNode<T>) -> usize {
    1 + Side::BOTH
        .iter()
        .filter_map(|&side| node.child(side).map(|child| count_nodes(&*child)))
        .sum::<usize>()
}

/// Checks, for every node below `node`, that the child's back-reference
/// resolves to the node holding it and names the slot it sits in.
pub fn assert_links<T>(node: &TreeNode<T>) {
    for &side in Side::BOTH.iter() {
        if let Some(child) = node.child(side) {
            let parent = child.parent().expect("attached child lost its parent");
            assert!(parent.ptr_eq(node));
            assert_eq!(child.side_in_parent(), Some(side));
            assert_links(&*child);
        }
    }
}
