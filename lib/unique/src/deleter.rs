//! Release strategies for [Unique](crate::Unique).

use alloc::boxed::Box;
use core::{fmt::Debug, ptr::NonNull};

/// Trait for releasing a resource owned by a [Unique](crate::Unique).
pub trait Deleter<T: ?Sized> {
    /// Release the resource behind `ptr`.
    ///
    /// The function is **unsafe** because `ptr` must be a resource this deleter
    /// knows how to release, **and it must not be released again afterwards.**
    unsafe fn delete(&mut self, ptr: NonNull<T>);
}

/// Default [Deleter]: the pointer came from [Box::into_raw].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoxDeleter;

impl<T: ?Sized> Deleter<T> for BoxDeleter {
    unsafe fn delete(&mut self, ptr: NonNull<T>) {
        drop(unsafe { Box::from_raw(ptr.as_ptr()) });
    }
}

/// [Deleter] backed by a closure.
#[derive(Clone, Copy, Default)]
pub struct FnDeleter<F>(pub F);

impl<T: ?Sized, F: FnMut(NonNull<T>)> Deleter<T> for FnDeleter<F> {
    unsafe fn delete(&mut self, ptr: NonNull<T>) {
        (self.0)(ptr)
    }
}

impl<F> Debug for FnDeleter<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("FnDeleter")
    }
}
