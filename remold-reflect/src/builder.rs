//! Fluent construction, cloning and mutation of model values
//!
//! A [`Builder`] owns a work-in-progress instance of one model type, writes
//! field values into it through the type's compiled setters, and keeps an
//! insertion-ordered record of which fields have been assigned. Accessors are
//! fetched once per builder from the process-wide cache, so constructing many
//! builders for the same type stays cheap.
//!
//! ```ignore
//! #[derive(Model, Default)]
//! struct Person { name: String, age: u32 }
//!
//! let mut builder = Builder::<Person>::new()?;
//! builder
//!     .set(field!(Person, name), "Kovalski".to_string())?
//!     .set(field!(Person, age), 29)?;
//! let person = builder.build()?;
//!
//! // a modified copy, without touching `person`
//! let older = Builder::change(&person, field!(Person, age), 30)?;
//! ```

use core::marker::PhantomData;
use core::mem::ManuallyDrop;

use remold_core::{FieldError, Model, PtrMut, TypeRef};

use crate::assigned::AssignedFields;
use crate::{BuilderError, ModelAccessors, accessors_for};

/// A typed handle to one field of a model type: the Rust stand-in for a
/// property-access expression. Usually produced by [`field!`](crate::field),
/// which ties `V` to the field's actual type so that a mistyped selector
/// fails to compile.
pub struct FieldRef<T, V> {
    name: &'static str,
    _marker: PhantomData<fn(&T) -> &V>,
}

impl<T, V> FieldRef<T, V> {
    /// Creates a handle from a field name and an access function.
    ///
    /// The access function is never called; it exists so the compiler checks
    /// that `T` really has a field of that name and type.
    pub const fn new(name: &'static str, _access: fn(&T) -> &V) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    /// The field name this handle selects.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}

impl<T, V> Clone for FieldRef<T, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for FieldRef<T, V> {}

/// Produces a typed [`FieldRef`] for a field of a model type:
/// `field!(Person, age)`.
///
/// Selecting a field that does not exist, or later supplying a value of the
/// wrong type, is a compile error. Note that a field excluded with
/// `#[model(skip)]` still exists as far as the compiler is concerned — for
/// those, resolution fails at the `set` call with `UnknownField`.
#[macro_export]
macro_rules! field {
    ($model:ty, $field:ident) => {
        $crate::FieldRef::new(::core::stringify!($field), |model: &$model| &model.$field)
    };
}

/// Accumulates field assignments for a model type and produces populated
/// instances; also the home of the [`clone_shallow`](Builder::clone_shallow)
/// and [`change`](Builder::change) conveniences.
///
/// A builder exclusively owns its target instance and its assignment record;
/// builders for the same type never share state and may be used from
/// different threads independently. A single builder is `&mut self` all the
/// way through — concurrent mutation is a compile error, not a runtime
/// hazard.
pub struct Builder<T: Model> {
    accessors: &'static ModelAccessors,
    target: Box<T>,
    assigned: AssignedFields,
    require_all_fields: bool,
}

impl<T: Model> Builder<T> {
    /// Creates a builder whose `build` never fails on incomplete coverage.
    ///
    /// Fails with `NoParameterlessConstructor` if the model type has no
    /// `Default` impl — this is the "first use" of the type's accessors.
    pub fn new() -> Result<Self, BuilderError> {
        Self::with_require_all_fields(false)
    }

    /// Creates a builder that requires every catalog field to be assigned
    /// before [`build`](Builder::build) succeeds.
    pub fn strict() -> Result<Self, BuilderError> {
        Self::with_require_all_fields(true)
    }

    /// Creates a builder with an explicit completeness requirement.
    pub fn with_require_all_fields(require_all_fields: bool) -> Result<Self, BuilderError> {
        let accessors = accessors_for::<T>()?;
        Ok(Self {
            accessors,
            target: accessors.construct::<T>(),
            assigned: AssignedFields::default(),
            require_all_fields,
        })
    }

    /// Creates a builder whose target starts as a shallow clone of `model`
    /// (the caller's instance is never aliased), with every catalog field
    /// already marked assigned.
    pub fn from_model(model: &T) -> Result<Self, BuilderError> {
        let accessors = accessors_for::<T>()?;
        let mut assigned = AssignedFields::default();
        assigned.fill(accessors.field_count());
        Ok(Self {
            accessors,
            target: accessors.clone_from(model),
            assigned,
            require_all_fields: false,
        })
    }

    /// Assigns one field through its compiled setter and records it.
    ///
    /// Fails with `UnknownField` if the handle does not resolve to an
    /// eligible field; a failed call leaves the target untouched.
    pub fn set<V: 'static>(
        &mut self,
        field: FieldRef<T, V>,
        value: V,
    ) -> Result<&mut Self, BuilderError> {
        self.set_by_name(field.name(), value)
    }

    /// The name-based assignment path, for dynamic callers. Same contract as
    /// [`set`](Builder::set), plus a runtime `FieldTypeMismatch` check since
    /// nothing ties `V` to the field here.
    pub fn set_by_name<V: 'static>(
        &mut self,
        name: &str,
        value: V,
    ) -> Result<&mut Self, BuilderError> {
        let shape = self.accessors.shape();
        let Some((index, field)) = self.accessors.field_named(name) else {
            return Err(BuilderError::UnknownField {
                shape,
                name: name.to_string(),
            });
        };

        let actual = TypeRef::of::<V>();
        if field.value != actual {
            return Err(BuilderError::FieldTypeMismatch {
                shape,
                field: field.name,
                field_error: FieldError::TypeMismatch {
                    expected: field.value,
                    actual,
                },
            });
        }

        let vtable = field.vtable.expect("eligible fields carry accessor vtables");
        let mut value = ManuallyDrop::new(value);
        // SAFETY: target is a live T; the value's type was checked against
        // the field descriptor above, and ManuallyDrop hands its ownership
        // to the setter
        unsafe {
            (vtable.set)(
                PtrMut::new(&mut *self.target as *mut T),
                PtrMut::new(&mut *value as *mut V),
            )
        };
        self.assigned.add(index);
        Ok(self)
    }

    /// Resets the builder: forgets all assignments and replaces the target
    /// with a freshly constructed instance.
    pub fn clear(&mut self) -> &mut Self {
        self.assigned.clear();
        self.target = self.accessors.construct::<T>();
        self
    }

    /// Returns the built instance, by move — no copy is made.
    ///
    /// On a [`strict`](Builder::strict) builder this fails with
    /// `IncompleteBuild` unless every catalog field was assigned since the
    /// last [`clear`](Builder::clear) (or from-model initialization).
    pub fn build(self) -> Result<T, BuilderError> {
        if self.require_all_fields && !self.assigned.all_set(self.accessors.field_count()) {
            return Err(BuilderError::IncompleteBuild {
                shape: self.accessors.shape(),
                set_fields: self.set_field_names(),
            });
        }
        Ok(*self.target)
    }

    /// Shallow-clones `model` through the compiled cloner, skipping all
    /// builder bookkeeping. Equivalent to
    /// `Builder::from_model(model)?.build()`.
    pub fn clone_shallow(model: &T) -> Result<T, BuilderError> {
        let accessors = accessors_for::<T>()?;
        Ok(*accessors.clone_from(model))
    }

    /// Clones `model`, assigns one field on the clone, and returns it. The
    /// original is never mutated.
    pub fn change<V: 'static>(
        model: &T,
        field: FieldRef<T, V>,
        value: V,
    ) -> Result<T, BuilderError> {
        let mut builder = Self::from_model(model)?;
        builder.set(field, value)?;
        builder.build()
    }

    /// Names of the fields assigned so far, in assignment order.
    pub fn set_field_names(&self) -> Vec<&'static str> {
        let names = self.accessors.field_names();
        self.assigned.iter().map(|index| names[index]).collect()
    }

    /// Names of the catalog fields not yet assigned, in catalog order.
    pub fn unset_field_names(&self) -> Vec<&'static str> {
        self.accessors
            .field_names()
            .iter()
            .enumerate()
            .filter(|(index, _)| !self.assigned.is_set(*index))
            .map(|(_, name)| *name)
            .collect()
    }

    /// True once every catalog field has been assigned.
    pub fn are_all_fields_set(&self) -> bool {
        self.assigned.all_set(self.accessors.field_count())
    }
}

impl<T: Model> core::fmt::Debug for Builder<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Builder")
            .field("model", &self.accessors.shape().type_identifier)
            .field("assigned", &self.set_field_names())
            .field("require_all_fields", &self.require_all_fields)
            .finish_non_exhaustive()
    }
}
