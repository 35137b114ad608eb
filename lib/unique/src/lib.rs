//! # Exclusive ownership.
//!
//! [Unique] owns at most one resource and releases it exactly once, through its
//! [Deleter]. Ownership moves only explicitly: `Unique` is never `Clone`, and
//! [Unique::take] / [Unique::assign] leave the source empty.
//!
//! [Pool] hands out `Unique` handles whose resource is a slot in a
//! fixed-capacity pool rather than a heap allocation.

#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
extern crate alloc;

mod deleter;
mod error;
mod pool;
mod unique;

pub use deleter::{BoxDeleter, Deleter, FnDeleter};
pub use error::{PoolError, UniqueError};
pub use pool::{Pool, PoolDeleter, Pooled};
pub use unique::Unique;
