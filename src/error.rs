//! Errors surfaced by the fallible (`try_*`) node accessors.
//!
//! Attaching a subtree that already has a parent is not an error here: an
//! attached node can only be reached through borrowed views, so such a call
//! does not type-check in the first place.

use std::cell::{BorrowError, BorrowMutError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    /// The payload or the structure of the node is currently being mutated.
    #[error("node is being mutated and cannot be read")]
    Borrow(#[from] BorrowError),

    /// The payload or the structure of the node is currently borrowed,
    /// for example through a view of one of its children.
    #[error("node is borrowed and cannot be mutated")]
    BorrowMut(#[from] BorrowMutError),
}
