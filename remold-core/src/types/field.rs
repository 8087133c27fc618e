use bitflags::bitflags;

use super::TypeRef;
use crate::{PtrConst, PtrMut};

/// Moves a value into one specific field of a model, dropping the previous
/// value. Bound to exactly one field; compiled once and reused forever.
///
/// The value pointer is consumed: after the call the value belongs to the
/// model and the source location must not be read or dropped again.
pub type FieldSetFn = for<'mem, 'val> unsafe fn(model: PtrMut<'mem>, value: PtrMut<'val>);

/// Clones one specific field's value from a source model into a destination
/// model, dropping the destination's previous value.
pub type FieldCopyFn = for<'src, 'dst> unsafe fn(src: PtrConst<'src>, dst: PtrMut<'dst>);

/// Describes a declared field of a model type
#[derive(Clone, Copy, PartialEq, Debug)]
#[repr(C)]
#[non_exhaustive]
pub struct Field {
    /// key for the struct field
    pub name: &'static str,

    /// the field's value type
    pub value: TypeRef,

    /// flags for the field (e.g. skip)
    pub flags: FieldFlags,

    /// accessor vtable; `None` for ineligible fields (`#[model(skip)]`),
    /// which are declared but cannot be set or copied
    pub vtable: Option<&'static FieldVTable>,
}

impl Field {
    /// Returns a builder for [`Field`]
    pub const fn builder() -> FieldBuilder {
        FieldBuilder::new()
    }

    /// True if this field takes part in building and cloning.
    pub fn is_eligible(&self) -> bool {
        self.vtable.is_some() && !self.flags.contains(FieldFlags::SKIP)
    }
}

/// Vtable of accessor functions for one field
#[derive(Clone, Copy, PartialEq, Debug)]
#[repr(C)]
pub struct FieldVTable {
    /// cf. [`FieldSetFn`]
    pub set: FieldSetFn,

    /// cf. [`FieldCopyFn`]
    pub copy: FieldCopyFn,
}

/// Builder for [`Field`]
pub struct FieldBuilder {
    name: Option<&'static str>,
    value: Option<TypeRef>,
    flags: Option<FieldFlags>,
    vtable: Option<&'static FieldVTable>,
}

impl FieldBuilder {
    /// Creates a new FieldBuilder
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            name: None,
            value: None,
            flags: None,
            vtable: None,
        }
    }

    /// Sets the name for the Field
    pub const fn name(mut self, name: &'static str) -> Self {
        self.name = Some(name);
        self
    }

    /// Sets the value type for the Field
    pub const fn value(mut self, value: TypeRef) -> Self {
        self.value = Some(value);
        self
    }

    /// Sets the flags for the Field
    pub const fn flags(mut self, flags: FieldFlags) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Sets the accessor vtable for the Field
    pub const fn vtable(mut self, vtable: &'static FieldVTable) -> Self {
        self.vtable = Some(vtable);
        self
    }

    /// Builds the Field
    pub const fn build(self) -> Field {
        Field {
            name: self.name.unwrap(),
            value: self.value.unwrap(),
            flags: match self.flags {
                Some(flags) => flags,
                None => FieldFlags::EMPTY,
            },
            vtable: self.vtable,
        }
    }
}

bitflags! {
    /// Flags that can be applied to fields to modify their behavior
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FieldFlags: u64 {
        /// An empty set of flags
        const EMPTY = 0;

        /// Flag indicating this field is excluded from building and cloning
        const SKIP = 1 << 0;
    }
}

impl Default for FieldFlags {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Errors encountered when resolving or assigning a field
#[derive(Debug, Copy, Clone, PartialEq)]
#[non_exhaustive]
pub enum FieldError {
    /// No declared field with the given key.
    NoSuchField,

    /// The supplied value's type does not match the field's declared type.
    TypeMismatch {
        /// the declared type of the field
        expected: TypeRef,

        /// what someone tried to write into it
        actual: TypeRef,
    },
}

impl core::error::Error for FieldError {}

impl core::fmt::Display for FieldError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldError::NoSuchField => write!(f, "No such field"),
            FieldError::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {expected}, got {actual}")
            }
        }
    }
}
