use std::sync::LazyLock;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use remold_core::{ConstTypeId, Model};

use crate::{BuilderError, ModelAccessors};

/// Process-wide registry of compiled accessor sets, keyed by model type
/// identity. Entries are compiled at most once and never evicted — bounded by
/// the number of distinct model types the process touches.
static REGISTRY: LazyLock<DashMap<ConstTypeId, &'static ModelAccessors>> =
    LazyLock::new(DashMap::new);

/// Returns the compiled accessor set for `T`, compiling it on first use.
///
/// Exactly-once: the first compilation for a type is the only one ever
/// published, and concurrent first-users block on the entry until the winner
/// has stored it, so every caller observes the same canonical set (observable
/// by pointer identity). Failed compilations are not cached: the failure is a
/// deterministic property of the type and reproduces on every call.
pub fn accessors_for<T: Model>() -> Result<&'static ModelAccessors, BuilderError> {
    let id = T::SHAPE.id;
    if let Some(hit) = REGISTRY.get(&id) {
        return Ok(*hit);
    }

    match REGISTRY.entry(id) {
        Entry::Occupied(entry) => Ok(*entry.get()),
        Entry::Vacant(entry) => {
            let accessors = ModelAccessors::compile(T::SHAPE)?;
            let accessors: &'static ModelAccessors = Box::leak(Box::new(accessors));
            entry.insert(accessors);
            Ok(accessors)
        }
    }
}
