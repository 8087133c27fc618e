use std::collections::HashMap;

use remold_core::{DefaultInPlaceFn, Field, Model, ModelShape, PtrConst, PtrMut};

use crate::BuilderError;

/// The compiled accessor set for one model type: the eligible field catalog,
/// the name index, and the constructor invoker. Compiled at most once per
/// type (see [`crate::accessors_for`]) and reused for the life of the
/// process; the cloner and setters are reached through the catalog's
/// per-field vtables.
#[derive(Debug)]
pub struct ModelAccessors {
    shape: &'static ModelShape,
    fields: Vec<&'static Field>,
    names: Vec<&'static str>,
    by_name: HashMap<&'static str, usize>,
    construct_in_place: DefaultInPlaceFn,
}

impl ModelAccessors {
    /// Compiles the accessor set from a derive-emitted shape.
    ///
    /// This is the only place a missing parameterless constructor is
    /// discovered; the error propagates to whoever touched the type first.
    pub(crate) fn compile(shape: &'static ModelShape) -> Result<Self, BuilderError> {
        let Some(construct_in_place) = shape.default_in_place else {
            return Err(BuilderError::NoParameterlessConstructor { shape });
        };

        let fields: Vec<&'static Field> =
            shape.fields.iter().filter(|f| f.is_eligible()).collect();
        let names: Vec<&'static str> = fields.iter().map(|f| f.name).collect();
        let by_name: HashMap<&'static str, usize> = fields
            .iter()
            .enumerate()
            .map(|(index, f)| (f.name, index))
            .collect();

        log::trace!(
            "compiled accessors for {} ({} eligible of {} declared fields)",
            shape.type_identifier,
            fields.len(),
            shape.fields.len(),
        );

        Ok(Self {
            shape,
            fields,
            names,
            by_name,
            construct_in_place,
        })
    }

    /// The shape these accessors were compiled from.
    pub fn shape(&self) -> &'static ModelShape {
        self.shape
    }

    /// The eligible fields, in declaration order.
    pub fn fields(&self) -> &[&'static Field] {
        &self.fields
    }

    /// The eligible field names, in declaration order.
    pub fn field_names(&self) -> &[&'static str] {
        &self.names
    }

    /// Number of eligible fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Resolves an eligible field by name, together with its catalog index.
    pub fn field_named(&self, name: &str) -> Option<(usize, &'static Field)> {
        self.by_name.get(name).map(|&index| (index, self.fields[index]))
    }

    /// Invokes the compiled constructor: a fresh, default-initialized `T`.
    pub fn construct<T: Model>(&self) -> Box<T> {
        self.assert_is::<T>();
        let uninit = self.shape.allocate();
        // SAFETY: freshly allocated with T's layout; the shape's constructor
        // fully initializes it
        let init = unsafe { (self.construct_in_place)(uninit) };
        // SAFETY: allocated by the global allocator with T's layout, now
        // initialized; for ZSTs `allocate` returned the aligned dangling
        // pointer Box expects
        unsafe { Box::from_raw(init.as_mut_byte_ptr() as *mut T) }
    }

    /// Invokes the compiled cloner: constructs a fresh instance, then copies
    /// every eligible field from `source` in catalog order. The copy is
    /// shallow — each field value is cloned once, with no recursive graph
    /// duplication, so shared-pointer fields keep pointing at the same
    /// referent. Skipped fields retain their default-constructed value.
    pub fn clone_from<T: Model>(&self, source: &T) -> Box<T> {
        let mut clone = self.construct::<T>();
        let src = PtrConst::new(source as *const T);
        let dst = PtrMut::new(&mut *clone as *mut T);
        for field in &self.fields {
            let vtable = field.vtable.expect("eligible fields carry accessor vtables");
            // SAFETY: src and dst point to live values of T, the fields'
            // declaring type
            unsafe { (vtable.copy)(src, dst) };
        }
        clone
    }

    fn assert_is<T: Model>(&self) {
        debug_assert!(
            self.shape.id == T::SHAPE.id,
            "accessor set for {} used with a different model type",
            self.shape.type_identifier,
        );
    }
}
