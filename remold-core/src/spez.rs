//! Specialization utilities
//!
//! Autoref-based specialization: the derive macro has to emit code that calls
//! `Default::default()` for the model type *without requiring* the type to
//! implement `Default` — whether the constructor exists is supposed to be
//! discovered at first use, not at expansion time. The emitted code gates the
//! call behind a const `IMPLS` probe, but both arms of that gate still have
//! to typecheck, so the call itself goes through the usual two-trait autoref
//! dance below: the `&SpezEmpty<T>` impl wins when `T: Default`, the
//! by-value fallback otherwise.

use core::marker::PhantomData;

use crate::{PtrMut, PtrUninit};

/// A probe value carrying only a type, used as `(&&SpezEmpty::<T>::SPEZ)` in
/// generated code.
pub struct SpezEmpty<T>(PhantomData<T>);

impl<T> SpezEmpty<T> {
    /// The probe instance for `T`.
    pub const SPEZ: Self = SpezEmpty(PhantomData);
}

/// Default-in-place for types that implement [`Default`].
pub trait SpezDefaultInPlace<T> {
    /// Writes `T::default()` into `target`.
    ///
    /// # Safety
    ///
    /// `target` must be properly aligned for `T` and valid for writes of
    /// `size_of::<T>()` bytes.
    unsafe fn spez_default_in_place<'mem>(&self, target: PtrUninit<'mem>) -> PtrMut<'mem>;
}

impl<T: Default> SpezDefaultInPlace<T> for &SpezEmpty<T> {
    unsafe fn spez_default_in_place<'mem>(&self, target: PtrUninit<'mem>) -> PtrMut<'mem> {
        unsafe { target.put(T::default()) }
    }
}

/// Fallback for types that do not implement [`Default`]. Exists so the
/// generated call compiles for every type; the const gate in the generated
/// code guarantees it is never reached.
pub trait SpezDefaultInPlaceFallback<T> {
    /// See [`SpezDefaultInPlace::spez_default_in_place`].
    ///
    /// # Safety
    ///
    /// Never actually called; panics if it is.
    unsafe fn spez_default_in_place<'mem>(&self, target: PtrUninit<'mem>) -> PtrMut<'mem>;
}

impl<T> SpezDefaultInPlaceFallback<T> for SpezEmpty<T> {
    unsafe fn spez_default_in_place<'mem>(&self, _target: PtrUninit<'mem>) -> PtrMut<'mem> {
        unreachable!("spez_default_in_place called for a type without a Default impl")
    }
}
