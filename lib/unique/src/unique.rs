//! The exclusive owning handle.

use crate::{
    deleter::{BoxDeleter, Deleter},
    error::UniqueError,
};
use alloc::boxed::Box;
use core::{
    fmt::Debug,
    marker::PhantomData,
    ops::{Deref, DerefMut},
    ptr::NonNull,
};

/// A handle owning at most one `T`, released through `D` exactly once.
///
/// A `Unique` is either *present* (owns one resource) or *empty*. Dropping a
/// present handle, resetting it, or assigning into it releases the previous
/// resource. Ownership only moves by an explicit move:
///
/// ```
/// use unique::Unique;
///
/// let mut a = Unique::from_value(42);
/// let b = a.take();
/// assert!(!a.is_present());
/// assert_eq!(*b, 42);
/// ```
///
/// Inherent methods (`get`, `take`, `reset`, `release`, `as_ref`, ...) take
/// precedence over methods of the same name on `T`. Reach those through an
/// explicit dereference:
///
/// ```
/// use unique::Unique;
///
/// let mut list = Unique::from_value(vec![1, 2]);
/// assert_eq!((*list).get(0), Some(&1));
/// (*list).as_mut_slice()[1] = 3;
/// assert!(list.is_present());
/// assert!(!list.is_empty());
/// ```
///
/// `Unique` cannot be duplicated:
///
/// ```compile_fail
/// use unique::Unique;
///
/// struct Resource;
/// let a = Unique::from_value(Resource);
/// let b: Unique<Resource> = Clone::clone(&a);
/// ```
pub struct Unique<T: ?Sized, D: Deleter<T> = BoxDeleter> {
    ptr: Option<NonNull<T>>,
    deleter: D,
    _owns: PhantomData<T>,
}

impl<T: ?Sized, D: Deleter<T> + Default> Unique<T, D> {
    /// Create an empty handle.
    pub fn new() -> Self {
        Self::empty_with(D::default())
    }

    /// Take ownership of `ptr`; a null pointer gives an empty handle.
    ///
    /// The function is marked as **unsafe** because `ptr` must be releasable by
    /// `D`, **and nothing else may release it afterwards.**
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        unsafe { Self::from_raw_with(ptr, D::default()) }
    }
}

impl<T: ?Sized, D: Deleter<T>> Unique<T, D> {
    /// Create an empty handle using `deleter`.
    pub fn empty_with(deleter: D) -> Self {
        Unique {
            ptr: None,
            deleter,
            _owns: PhantomData,
        }
    }

    /// Take ownership of `ptr`, to be released by `deleter`.
    ///
    /// The function is marked as **unsafe** for the same reason as [Unique::from_raw].
    pub unsafe fn from_raw_with(ptr: *mut T, deleter: D) -> Self {
        Unique {
            ptr: NonNull::new(ptr),
            deleter,
            _owns: PhantomData,
        }
    }

    /// Whether the handle owns a resource.
    pub fn is_present(&self) -> bool {
        self.ptr.is_some()
    }

    /// The raw pointer, still owned by the handle.
    pub fn get(&self) -> Option<NonNull<T>> {
        self.ptr
    }

    /// Borrow the resource, if any.
    pub fn as_ref(&self) -> Option<&T> {
        self.ptr.as_ref().map(|ptr| unsafe { ptr.as_ref() })
    }

    /// Mutably borrow the resource, if any.
    pub fn as_mut(&mut self) -> Option<&mut T> {
        self.ptr.as_mut().map(|ptr| unsafe { ptr.as_mut() })
    }

    /// Checked dereference.
    pub fn try_deref(&self) -> Result<&T, UniqueError> {
        self.as_ref().ok_or(UniqueError::Empty)
    }

    /// Give up ownership without releasing.
    ///
    /// The handle is left empty and the caller becomes responsible for
    /// releasing the returned pointer. Returns `None` if already empty.
    #[must_use = "the released resource leaks unless it is released by the caller"]
    pub fn release(&mut self) -> Option<NonNull<T>> {
        self.ptr.take()
    }

    /// Consume the handle and give up ownership without releasing.
    #[must_use = "the released resource leaks unless it is released by the caller"]
    pub fn into_raw(mut self) -> Option<NonNull<T>> {
        self.ptr.take()
    }

    /// Release the current resource, if any, leaving the handle empty.
    pub fn reset(&mut self) {
        if let Some(old) = self.ptr.take() {
            unsafe { self.deleter.delete(old) };
        }
    }

    /// Release the current resource, then take ownership of `ptr`.
    ///
    /// The function is marked as **unsafe** for the same reason as [Unique::from_raw].
    /// **Passing the pointer the handle already owns violates that contract**: it
    /// is released and the handle is left dangling. Debug builds assert against it.
    pub unsafe fn reset_raw(&mut self, ptr: *mut T) {
        let new = NonNull::new(ptr);
        debug_assert!(
            !matches!((new, self.ptr), (Some(a), Some(b)) if core::ptr::addr_eq(a.as_ptr(), b.as_ptr())),
            "reset to the pointer already owned"
        );
        self.reset();
        self.ptr = new;
    }

    /// Move ownership into a new handle, leaving `self` empty.
    ///
    /// Nothing is released.
    pub fn take(&mut self) -> Self
    where
        D: Clone,
    {
        Unique {
            ptr: self.ptr.take(),
            deleter: self.deleter.clone(),
            _owns: PhantomData,
        }
    }

    /// Move-assign from `source`.
    ///
    /// Releases whatever `self` owns, then adopts the resource and deleter of
    /// `source`, which is left empty. `&mut` exclusivity guarantees `source`
    /// is a different handle.
    pub fn assign(&mut self, source: &mut Self) -> &mut Self
    where
        D: Clone,
    {
        self.reset();
        self.ptr = source.ptr.take();
        self.deleter = source.deleter.clone();
        self
    }
}

impl<T> Unique<T> {
    /// Box `value` and own it.
    pub fn from_value(value: T) -> Self {
        Self::from_box(Box::new(value))
    }
}

impl<T: ?Sized> Unique<T> {
    /// Own a boxed value.
    pub fn from_box(value: Box<T>) -> Self {
        unsafe { Self::from_raw(Box::into_raw(value)) }
    }

    /// Release the current resource, then own `value`.
    pub fn reset_box(&mut self, value: Box<T>) {
        self.reset();
        self.ptr = Some(NonNull::from(Box::leak(value)));
    }

    /// Give up ownership as a [Box].
    pub fn into_box(self) -> Option<Box<T>> {
        self.into_raw()
            .map(|ptr| unsafe { Box::from_raw(ptr.as_ptr()) })
    }
}

impl<T: ?Sized, D: Deleter<T>> Drop for Unique<T, D> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: ?Sized, D: Deleter<T> + Default> Default for Unique<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> From<Box<T>> for Unique<T> {
    fn from(value: Box<T>) -> Self {
        Self::from_box(value)
    }
}

impl<T: ?Sized, D: Deleter<T>> Deref for Unique<T, D> {
    type Target = T;

    #[track_caller]
    fn deref(&self) -> &T {
        match self.as_ref() {
            Some(value) => value,
            None => panic!("dereferenced an empty Unique"),
        }
    }
}

impl<T: ?Sized, D: Deleter<T>> DerefMut for Unique<T, D> {
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.as_mut() {
            Some(value) => value,
            None => panic!("dereferenced an empty Unique"),
        }
    }
}

impl<T: ?Sized + Debug, D: Deleter<T>> Debug for Unique<T, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.as_ref() {
            Some(value) => f.debug_tuple("Unique").field(&value).finish(),
            None => f.write_str("Unique(<empty>)"),
        }
    }
}

// Same rules as `Box<T>`: the handle is the only path to the resource.
unsafe impl<T: ?Sized + Send, D: Deleter<T> + Send> Send for Unique<T, D> {}
unsafe impl<T: ?Sized + Sync, D: Deleter<T> + Sync> Sync for Unique<T, D> {}
