//! An ordered key set stored as an unbalanced binary search tree whose nodes link back to their
//! parents.
//!
//! Nodes live in a slab and refer to each other by index, so a node can reach its children as well
//! as its parent. That makes in-place successor/predecessor navigation cheap, and lets removal
//! splice subtrees around without recursion.

#![allow(clippy::upper_case_acronyms)]

mod slab;

pub mod set;
pub mod session;

pub use set::{BSTSet, InvariantViolation, Node};
pub use session::{Command, Outcome, Session, SessionConfig, SessionError};

#[macro_export(local_inner_macros)]
macro_rules! bstset {
    (@single $($x:tt)*) => (());
    (@count $($rest:expr),*) => (<[()]>::len(&[$(bstset!(@single $rest)),*]));

    ($($key:expr,)+) => { bstset!($($key),+) };
    ($($key:expr),*) => {
        {
            let _cap = bstset!(@count $($key),*);
            let mut _set = $crate::BSTSet::with_capacity(_cap);
            $(
                let _ = _set.insert($key);
            )*
            _set
        }
    };
}
