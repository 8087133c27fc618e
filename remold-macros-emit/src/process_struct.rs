use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use remold_macros_parse::{ParsedField, ParsedStruct};

/// Processes a struct with named fields to implement Model
///
/// Example input:
/// ```rust
/// struct Person {
///     name: String,
///     age: u32,
/// }
/// ```
pub fn process_struct(parsed: ParsedStruct) -> TokenStream {
    let struct_name = &parsed.name;
    let struct_name_str = struct_name.to_string();
    let shape_static = format_ident!("{}_SHAPE", screaming_snake(&struct_name_str));

    let fields = parsed
        .fields
        .iter()
        .map(|field| gen_struct_field(struct_name, field))
        .collect::<Vec<_>>();

    // Whether the type has a parameterless constructor (a Default impl) is
    // only discoverable at first use of the accessor cache, so the derive
    // must not require it: the const probe decides whether the constructor
    // slot is populated, and the spez call keeps the gated arm compiling
    // for types without the impl.
    quote! {
        #[used]
        static #shape_static: &'static ::remold::ModelShape = <#struct_name as ::remold::Model>::SHAPE;

        #[automatically_derived]
        unsafe impl ::remold::Model for #struct_name {
            const SHAPE: &'static ::remold::ModelShape = &const {
                let fields: &'static [::remold::Field] = &const { [ #(#fields),* ] };

                let mut builder = ::remold::ModelShape::builder()
                    .id(::remold::ConstTypeId::of::<Self>())
                    .layout(::core::alloc::Layout::new::<Self>())
                    .type_identifier(#struct_name_str)
                    .fields(fields);

                if {
                    /// Fallback trait with `false` for `IMPLS` if the type
                    /// does not implement `Default`.
                    trait DoesNotImpl {
                        const IMPLS: bool = false;
                    }
                    impl<T: ?Sized> DoesNotImpl for T {}
                    /// Concrete type with `true` for `IMPLS` if the type
                    /// implements `Default`; falls back to `DoesNotImpl`
                    /// otherwise.
                    struct Wrapper<T: ?Sized>(::core::marker::PhantomData<T>);
                    #[allow(dead_code)]
                    impl<T: ?Sized + ::core::default::Default> Wrapper<T> {
                        const IMPLS: bool = true;
                    }
                    <Wrapper<Self>>::IMPLS
                } {
                    builder = builder.default_in_place(|target| unsafe {
                        use ::remold::spez::*;
                        (&&SpezEmpty::<Self>::SPEZ).spez_default_in_place(target)
                    });
                }

                builder.build()
            };
        }
    }
}

/// Generates one `::remold::Field` expression, including the field's
/// monomorphic accessor functions unless the field is skipped.
fn gen_struct_field(struct_name: &Ident, field: &ParsedField) -> TokenStream {
    let field_name = &field.name;
    let field_name_str = field_name.to_string();
    let ty = &field.ty;

    if field.skip {
        // ineligible: declared, but no accessor vtable
        return quote! {
            ::remold::Field::builder()
                .name(#field_name_str)
                .value(::remold::TypeRef::of::<#ty>())
                .flags(::remold::FieldFlags::SKIP)
                .build()
        };
    }

    quote! {
        {
            unsafe fn set(model: ::remold::PtrMut<'_>, value: ::remold::PtrMut<'_>) {
                let model = unsafe { model.as_mut::<#struct_name>() };
                model.#field_name = unsafe { value.read::<#ty>() };
            }
            unsafe fn copy(src: ::remold::PtrConst<'_>, dst: ::remold::PtrMut<'_>) {
                let src = unsafe { src.get::<#struct_name>() };
                let dst = unsafe { dst.as_mut::<#struct_name>() };
                dst.#field_name = ::core::clone::Clone::clone(&src.#field_name);
            }
            ::remold::Field::builder()
                .name(#field_name_str)
                .value(::remold::TypeRef::of::<#ty>())
                .vtable(&const { ::remold::FieldVTable { set, copy } })
                .build()
        }
    }
}

/// `CreditCard` -> `CREDIT_CARD`, for the exported shape static.
fn screaming_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() && prev_lower {
            out.push('_');
        }
        prev_lower = ch.is_lowercase();
        out.push(ch.to_ascii_uppercase());
    }
    out
}
