use std::thread;

use eyre::Result;
use remold::{Builder, BuilderError, Model, accessors_for};

#[derive(Model, Default, Debug)]
struct CachedModel {
    label: String,
    count: u64,
}

// No Default impl: the constructor slot in the shape stays empty, and that
// is only allowed to surface at first use.
#[derive(Model, Debug)]
struct Sealed {
    token: String,
}

#[test]
fn accessors_are_compiled_once_and_reused() -> Result<()> {
    remold_testhelpers::setup();

    let first = accessors_for::<CachedModel>()?;
    let second = accessors_for::<CachedModel>()?;

    assert!(std::ptr::eq(first, second));
    Ok(())
}

#[test]
fn catalog_metadata_is_deterministic() -> Result<()> {
    remold_testhelpers::setup();

    let accessors = accessors_for::<CachedModel>()?;
    assert_eq!(accessors.field_count(), 2);
    assert_eq!(accessors.field_names(), &["label", "count"]);

    let (index, field) = accessors.field_named("count").unwrap();
    assert_eq!(index, 1);
    assert_eq!(field.name, "count");
    assert!(accessors.field_named("missing").is_none());
    Ok(())
}

#[test]
fn concurrent_first_use_converges_on_one_accessor_set() {
    remold_testhelpers::setup();

    #[derive(Model, Default, Debug)]
    struct Contended {
        payload: Vec<u8>,
    }

    let pointers: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    accessors_for::<Contended>().unwrap() as *const _ as usize
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(pointers.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn missing_constructor_fails_identically_on_every_use() {
    remold_testhelpers::setup();

    for _ in 0..2 {
        let err = Builder::<Sealed>::new().unwrap_err();
        match err {
            BuilderError::NoParameterlessConstructor { shape } => {
                assert_eq!(shape.type_identifier, "Sealed");
            }
            other => panic!("expected NoParameterlessConstructor, got {other:?}"),
        }
    }

    let err = accessors_for::<Sealed>().unwrap_err();
    assert!(err.to_string().contains("Parameterless constructor"));
}
