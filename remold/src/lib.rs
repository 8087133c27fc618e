#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub use remold_core::*;

pub use remold_reflect::*;

pub use remold_reflect::field;

/// Derive the [`Model`] trait for a struct with named fields.
///
/// The derive emits the type's [`ModelShape`] as a `const`: every declared
/// field in declaration order with its accessor function pointers, plus a
/// constructor invoker when the type implements [`Default`]. Whether that
/// constructor exists is deliberately *not* checked at expansion time — a
/// type without `Default` derives fine and only fails (with
/// `NoParameterlessConstructor`) when a builder first touches it.
///
/// ```rust
/// # use remold::Model;
/// #[derive(Model, Default)]
/// struct FooBar {
///     foo: u32,
///     bar: String,
/// }
/// ```
///
/// # Field Attributes
///
/// * `#[model(skip)]` — declare the field but exclude it from building and
///   cloning: it cannot be `set`, does not count toward required fields, and
///   keeps its default value in clones. Skipped fields are also exempt from
///   the `Clone` requirement the per-field copier places on every other
///   field's type.
///
/// # Limitations
///
/// Only non-generic structs with named fields can derive `Model`; field
/// types must be `'static`, and eligible field types must be `Clone`.
pub use remold_macros::Model;
