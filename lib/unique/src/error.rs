//! Recoverable errors. Contract violations panic instead.

use core::fmt::{Display, Formatter};

/// Errors from checked access to a [Unique](crate::Unique).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueError {
    /// The handle owns nothing.
    Empty,
}

impl Display for UniqueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            UniqueError::Empty => f.write_str("handle owns no resource"),
        }
    }
}

impl core::error::Error for UniqueError {}

/// Slot pool errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    /// Every slot is live.
    Exhausted {
        /// Capacity of the pool that ran out.
        capacity: usize,
    },
}

impl Display for PoolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PoolError::Exhausted { capacity } => {
                write!(f, "all {} pool slots are in use", capacity)
            }
        }
    }
}

impl core::error::Error for PoolError {}
