//! Structs and vtable definitions used by remold

use core::alloc::Layout;

mod field;
pub use field::*;

use crate::{ConstTypeId, PtrMut, PtrUninit};

/// Function which constructs a default value of a model type in place.
///
/// Emitted by the derive only when the type implements [`Default`]; its
/// absence on a [`ModelShape`] means the type has no reachable parameterless
/// constructor.
pub type DefaultInPlaceFn = for<'mem> unsafe fn(target: PtrUninit<'mem>) -> PtrMut<'mem>;

/// Reference to a field's value type: its identity plus a printable name.
#[derive(Clone, Copy, Debug)]
#[repr(C)]
pub struct TypeRef {
    /// Unique type identifier
    pub id: ConstTypeId,

    /// Full type name, for diagnostics only
    pub name: &'static str,
}

impl TypeRef {
    /// Returns the [`TypeRef`] for the given type.
    pub const fn of<T: 'static>() -> Self {
        Self {
            id: ConstTypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeRef {}

impl core::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name)
    }
}

/// Schema for one model type: everything the accessor cache needs to compile
/// its constructor, cloner and setters.
#[derive(Clone, Copy)]
#[repr(C)]
#[non_exhaustive]
pub struct ModelShape {
    /// Unique type identifier, provided by the compiler.
    pub id: ConstTypeId,

    /// Size and alignment — enough to allocate a value of this type
    /// (but not initialize it.)
    pub layout: Layout,

    /// The type's name, without generic parameters.
    pub type_identifier: &'static str,

    /// All declared fields, in declaration order.
    pub fields: &'static [Field],

    /// Constructs a default value in place. `None` when the type has no
    /// `Default` impl — a hard failure at first accessor compilation.
    pub default_in_place: Option<DefaultInPlaceFn>,
}

impl ModelShape {
    /// Returns a builder for [`ModelShape`].
    pub const fn builder() -> ModelShapeBuilder {
        ModelShapeBuilder::new()
    }

    /// Looks up a declared field by name.
    pub fn field_by_name(&self, name: &str) -> Result<&'static Field, FieldError> {
        match self.fields.iter().find(|f| f.name == name) {
            Some(field) => Ok(field),
            None => Err(FieldError::NoSuchField),
        }
    }

    /// Heap-allocate an uninitialized value of this shape.
    ///
    /// For zero-sized types this returns a dangling, well-aligned pointer,
    /// which is what `Box` expects for ZSTs.
    #[cfg(feature = "alloc")]
    pub fn allocate(&self) -> PtrUninit<'static> {
        PtrUninit::new(if self.layout.size() == 0 {
            core::ptr::without_provenance_mut::<u8>(self.layout.align())
        } else {
            // SAFETY: layout has non-zero size
            let ptr = unsafe { alloc::alloc::alloc(self.layout) };
            if ptr.is_null() {
                alloc::alloc::handle_alloc_error(self.layout);
            }
            ptr
        })
    }
}

impl PartialEq for ModelShape {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ModelShape {}

impl core::hash::Hash for ModelShape {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl core::fmt::Display for ModelShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.type_identifier)
    }
}

impl core::fmt::Debug for ModelShape {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModelShape")
            .field("type", &self.type_identifier)
            .field("fields", &self.fields.len())
            .finish()
    }
}

/// Builder for [`ModelShape`]
pub struct ModelShapeBuilder {
    id: Option<ConstTypeId>,
    layout: Option<Layout>,
    type_identifier: Option<&'static str>,
    fields: &'static [Field],
    default_in_place: Option<DefaultInPlaceFn>,
}

impl ModelShapeBuilder {
    /// Creates a new `ModelShapeBuilder` with all fields unset.
    #[allow(clippy::new_without_default)]
    pub const fn new() -> Self {
        Self {
            id: None,
            layout: None,
            type_identifier: None,
            fields: &[],
            default_in_place: None,
        }
    }

    /// Sets the id for the shape.
    pub const fn id(mut self, id: ConstTypeId) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the layout for the shape.
    pub const fn layout(mut self, layout: Layout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Sets the type identifier for the shape.
    pub const fn type_identifier(mut self, type_identifier: &'static str) -> Self {
        self.type_identifier = Some(type_identifier);
        self
    }

    /// Sets the declared fields for the shape.
    pub const fn fields(mut self, fields: &'static [Field]) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the in-place default constructor for the shape.
    pub const fn default_in_place(mut self, f: DefaultInPlaceFn) -> Self {
        self.default_in_place = Some(f);
        self
    }

    /// Builds the [`ModelShape`].
    ///
    /// # Panics
    ///
    /// Panics if `id`, `layout` or `type_identifier` was not set.
    pub const fn build(self) -> ModelShape {
        ModelShape {
            id: self.id.unwrap(),
            layout: self.layout.unwrap(),
            type_identifier: self.type_identifier.unwrap(),
            fields: self.fields,
            default_in_place: self.default_in_place,
        }
    }
}
