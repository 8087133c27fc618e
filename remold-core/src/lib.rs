#![cfg_attr(not(feature = "std"), no_std)]
#![feature(const_type_name)]
#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![doc = include_str!("../README.md")]

#[cfg(feature = "alloc")]
extern crate alloc;

// Opaque pointer utilities
mod ptr;
pub use ptr::*;

// Specialization utilities
pub mod spez;

// Const type id
mod typeid;
pub use typeid::*;

// Type definitions
mod types;
pub use types::*;

/// Allows querying the [`ModelShape`] of a model type: its declared fields,
/// their accessor vtables, and how to construct a fresh instance.
///
/// Implemented exclusively through `#[derive(Model)]` — the derive emits the
/// descriptor table as a `const`, so all accessor function pointers are
/// monomorphic and reusable for the lifetime of the process.
///
/// # Safety
///
/// The shape must describe `Self` truthfully: every accessor function pointer
/// in it must operate on values of exactly the types it claims to. Everything
/// built on top (the accessor cache, the builder) relies on this.
pub unsafe trait Model: Sized + 'static {
    /// The shape of this model type.
    const SHAPE: &'static ModelShape;
}
