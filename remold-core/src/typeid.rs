use core::any::TypeId;

/// A wrapper over [`core::any::TypeId`] that can be produced in `const`
/// contexts, where `TypeId::of` cannot be called directly yet.
///
/// The trick is to store the (const-coercible) function pointer and only call
/// it at runtime, which is when identity actually gets compared.
#[derive(Clone, Copy, Debug)]
pub struct ConstTypeId {
    type_id_fn: fn() -> TypeId,
}

impl ConstTypeId {
    /// Returns the [`ConstTypeId`] for the given type.
    pub const fn of<T: ?Sized + 'static>() -> Self {
        Self {
            type_id_fn: TypeId::of::<T>,
        }
    }

    /// Resolves to the runtime [`TypeId`].
    #[inline]
    pub fn get(self) -> TypeId {
        (self.type_id_fn)()
    }
}

impl PartialEq for ConstTypeId {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl Eq for ConstTypeId {}

impl core::hash::Hash for ConstTypeId {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.get().hash(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_per_type() {
        const STRING_A: ConstTypeId = ConstTypeId::of::<alloc::string::String>();
        const STRING_B: ConstTypeId = ConstTypeId::of::<alloc::string::String>();
        const UNIT: ConstTypeId = ConstTypeId::of::<()>();

        assert_eq!(STRING_A, STRING_B);
        assert_ne!(STRING_A, UNIT);
        assert_eq!(STRING_A.get(), TypeId::of::<alloc::string::String>());
    }
}
