use remold::{ConstTypeId, FieldError, FieldFlags, Model, TypeRef};

#[derive(Model, Default, Debug)]
struct Point {
    x: f32,
    y: f32,
}

#[derive(Model, Debug)]
struct Sealed {
    token: String,
}

#[derive(Model, Default, Debug)]
struct Cached {
    value: String,
    #[model(skip)]
    generation: u64,
}

#[test]
fn shape_reports_declared_fields_in_order() {
    remold_testhelpers::setup();

    let shape = <Point as Model>::SHAPE;
    assert_eq!(shape.type_identifier, "Point");
    assert_eq!(shape.id, ConstTypeId::of::<Point>());
    assert_eq!(shape.layout, core::alloc::Layout::new::<Point>());

    assert_eq!(shape.fields.len(), 2);
    assert_eq!(shape.fields[0].name, "x");
    assert_eq!(shape.fields[1].name, "y");
    assert_eq!(shape.fields[0].value, TypeRef::of::<f32>());
    assert!(shape.fields.iter().all(|f| f.is_eligible()));
}

#[test]
fn default_impl_populates_the_constructor_slot() {
    remold_testhelpers::setup();

    assert!(<Point as Model>::SHAPE.default_in_place.is_some());
    // deriving is allowed without Default; only the slot stays empty
    assert!(<Sealed as Model>::SHAPE.default_in_place.is_none());
}

#[test]
fn skipped_fields_are_declared_but_carry_no_accessors() {
    remold_testhelpers::setup();

    let shape = <Cached as Model>::SHAPE;
    assert_eq!(shape.fields.len(), 2);

    let generation = &shape.fields[1];
    assert_eq!(generation.name, "generation");
    assert!(generation.flags.contains(FieldFlags::SKIP));
    assert!(generation.vtable.is_none());
    assert!(!generation.is_eligible());
}

#[test]
fn declared_fields_resolve_by_name() {
    remold_testhelpers::setup();

    let shape = <Point as Model>::SHAPE;
    assert_eq!(shape.field_by_name("x").unwrap().name, "x");
    assert_eq!(shape.field_by_name("z"), Err(FieldError::NoSuchField));
}

#[test]
fn constructor_initializes_in_place() {
    remold_testhelpers::setup();

    let shape = <Point as Model>::SHAPE;
    let default_in_place = shape.default_in_place.unwrap();

    let mut slot = core::mem::MaybeUninit::<Point>::uninit();
    // SAFETY: the slot is aligned storage for Point, and the shape's
    // constructor fully initializes it
    let point = unsafe {
        default_in_place(remold::PtrUninit::from_maybe_uninit(&mut slot));
        slot.assume_init()
    };
    assert_eq!(point.x, 0.0);
    assert_eq!(point.y, 0.0);
}
