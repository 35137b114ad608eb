//! Build-time configuration for the workspace.
//!
//! Values come from `flags.json` at the workspace root, one section per build
//! profile (`debug`, `release`). The build script turns every entry of the
//! active section into a `usize` constant in [build_flags].

#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

/// Constants generated from `flags.json`.
pub mod build_flags {
    include!(concat!(env!("OUT_DIR"), "/build_flags.rs"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_slots_is_nonzero() {
        assert!(build_flags::POOL_SLOTS > 0);
    }
}
