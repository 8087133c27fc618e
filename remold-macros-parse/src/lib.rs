//! Parsing for the `#[derive(Model)]` input.
//!
//! Model types are plain structs with named fields, so the grammar here stays
//! deliberately small: a skip-until pass locates the `struct` keyword and the
//! body group, then a token-level splitter takes the body apart field by
//! field. Anything outside that subset (enums, tuple structs, generics) is
//! rejected with a panic, which the compiler reports at the derive site.

use proc_macro2::{Delimiter, TokenStream};
use unsynn::*;

keyword! {
    /// The "struct" keyword.
    pub KStruct = "struct";
}

unsynn! {
    /// Everything before the `struct` keyword: outer attributes, doc
    /// comments, visibility.
    pub struct Preamble {
        /// The raw preamble tokens.
        pub items: Any<Cons<Except<KStruct>, TokenTree>>,
    }

    /// Everything between the type name and the body: generic parameters and
    /// where clauses, neither of which is supported.
    pub struct UntilBody {
        /// The raw tokens, if any.
        pub items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    /// A `struct` declaration as handed to the derive.
    pub struct StructDecl {
        /// Attributes and visibility.
        pub preamble: Preamble,
        /// The "struct" keyword.
        pub _kw_struct: KStruct,
        /// The type name.
        pub name: Ident,
        /// Generics / where clause, rejected later.
        pub until_body: UntilBody,
        /// The field list; absent for unit and tuple structs.
        pub body: Option<BraceGroup>,
    }
}

/// One named field of the model struct.
pub struct ParsedField {
    /// The field name.
    pub name: Ident,
    /// The field's type, verbatim.
    pub ty: TokenStream,
    /// Whether the field carried `#[model(skip)]`.
    pub skip: bool,
}

/// The parsed derive input.
pub struct ParsedStruct {
    /// The struct name.
    pub name: Ident,
    /// The named fields, in declaration order.
    pub fields: Vec<ParsedField>,
}

/// Parses the full `#[derive(Model)]` input.
///
/// # Panics
///
/// Panics (surfacing as a compile error at the derive site) when the input is
/// not a non-generic struct with named fields, or when it carries an unknown
/// `model(..)` attribute.
pub fn parse_model_struct(input: TokenStream) -> ParsedStruct {
    let mut it = input.to_token_iter();
    let decl = match it.parse::<Cons<StructDecl, EndOfStream>>() {
        Ok(decl) => decl.first,
        Err(err) => panic!(
            "#[derive(Model)] expects a struct declaration (enums are not supported): {err}"
        ),
    };

    reject_container_attributes(&decl.preamble.to_token_stream());

    let between = decl.until_body.to_token_stream();
    if !between.is_empty() {
        panic!(
            "#[derive(Model)] does not support generic parameters or where clauses (found `{between}`)"
        );
    }

    let Some(body) = decl.body else {
        panic!("#[derive(Model)] only supports structs with named fields");
    };

    ParsedStruct {
        name: decl.name,
        fields: split_fields(body.0.stream()),
    }
}

/// The derive has no container-level `model(..)` attributes; using one is a
/// mistake worth flagging rather than ignoring.
fn reject_container_attributes(preamble: &TokenStream) {
    let mut toks = preamble.clone().into_iter().peekable();
    while let Some(tok) = toks.next() {
        let TokenTree::Punct(punct) = &tok else {
            continue;
        };
        if punct.as_char() != '#' {
            continue;
        }
        if let Some(TokenTree::Group(group)) = toks.peek() {
            if group.delimiter() == Delimiter::Bracket {
                if let Some(inner) = model_attribute(&group.stream()) {
                    panic!("#[derive(Model)]: `model({inner})` is not a container attribute");
                }
            }
        }
    }
}

/// Splits the struct body into fields: `[attrs] [vis] name : type ,`
fn split_fields(body: TokenStream) -> Vec<ParsedField> {
    let mut fields = Vec::new();
    let mut toks = body.into_iter().peekable();

    loop {
        // outer attributes; only `#[model(skip)]` is meaningful
        let mut skip = false;
        while matches!(toks.peek(), Some(TokenTree::Punct(p)) if p.as_char() == '#') {
            toks.next();
            let group = match toks.next() {
                Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Bracket => g,
                other => panic!("#[derive(Model)]: malformed field attribute: {other:?}"),
            };
            if let Some(inner) = model_attribute(&group.stream()) {
                match inner.as_str() {
                    "skip" => skip = true,
                    other => panic!("#[derive(Model)]: unknown attribute `model({other})`"),
                }
            }
        }

        if toks.peek().is_none() {
            if skip {
                panic!("#[derive(Model)]: dangling attribute at the end of the field list");
            }
            break;
        }

        // visibility: `pub` with an optional restriction group
        if matches!(toks.peek(), Some(TokenTree::Ident(id)) if id == "pub") {
            toks.next();
            if matches!(toks.peek(), Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Parenthesis)
            {
                toks.next();
            }
        }

        let name = match toks.next() {
            Some(TokenTree::Ident(id)) => id,
            other => panic!("#[derive(Model)]: expected a field name, got {other:?}"),
        };
        match toks.next() {
            Some(TokenTree::Punct(p)) if p.as_char() == ':' => {}
            other => panic!("#[derive(Model)]: expected `:` after field `{name}`, got {other:?}"),
        }

        // The type runs until a comma at angle-bracket depth zero. Generic
        // argument lists are not token groups, so `<`/`>` have to be counted
        // by hand; a `>` closing a `->` (fn-pointer return) doesn't count.
        let mut ty = TokenStream::new();
        let mut depth = 0usize;
        let mut prev_dash = false;
        loop {
            let at_field_end = matches!(
                toks.peek(),
                Some(TokenTree::Punct(p)) if p.as_char() == ',' && depth == 0
            );
            if at_field_end {
                toks.next();
                break;
            }
            let Some(tok) = toks.next() else { break };
            if let TokenTree::Punct(p) = &tok {
                match p.as_char() {
                    '<' => depth += 1,
                    '>' if !prev_dash => depth = depth.saturating_sub(1),
                    _ => {}
                }
                prev_dash = p.as_char() == '-';
            } else {
                prev_dash = false;
            }
            ty.extend([tok]);
        }
        if ty.is_empty() {
            panic!("#[derive(Model)]: field `{name}` has an empty type");
        }

        fields.push(ParsedField { name, ty, skip });
    }

    fields
}

/// Returns the content of a `model(...)` attribute, `None` for any other
/// attribute (docs, serde, ...).
fn model_attribute(attr: &TokenStream) -> Option<String> {
    let mut it = attr.clone().into_iter();
    match it.next() {
        Some(TokenTree::Ident(id)) if id == "model" => {}
        _ => return None,
    }
    match it.next() {
        Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Parenthesis => {
            Some(g.stream().to_string().trim().to_string())
        }
        _ => panic!("#[derive(Model)]: expected `model(...)` attribute syntax"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn parses_a_plain_struct() {
        let parsed = parse_model_struct(quote! {
            pub struct Person {
                pub name: String,
                pub age: u32,
            }
        });

        assert_eq!(parsed.name.to_string(), "Person");
        assert_eq!(parsed.fields.len(), 2);
        assert_eq!(parsed.fields[0].name.to_string(), "name");
        assert_eq!(parsed.fields[0].ty.to_string(), "String");
        assert!(!parsed.fields[0].skip);
        assert_eq!(parsed.fields[1].name.to_string(), "age");
        assert_eq!(parsed.fields[1].ty.to_string(), "u32");
    }

    #[test]
    fn commas_inside_generic_arguments_do_not_split_fields() {
        let parsed = parse_model_struct(quote! {
            struct Lookup {
                table: std::collections::HashMap<String, Vec<u8>>,
                fallback: Option<String>,
            }
        });

        assert_eq!(parsed.fields.len(), 2);
        assert_eq!(
            parsed.fields[0].ty.to_string().replace(' ', ""),
            "std::collections::HashMap<String,Vec<u8>>"
        );
    }

    #[test]
    fn skip_attribute_is_recognized() {
        let parsed = parse_model_struct(quote! {
            struct Cached {
                value: String,
                #[model(skip)]
                scratch: Vec<u8>,
            }
        });

        assert!(!parsed.fields[0].skip);
        assert!(parsed.fields[1].skip);
    }

    #[test]
    fn doc_comments_and_trailing_comma_are_tolerated() {
        let parsed = parse_model_struct(quote! {
            /// A documented struct.
            pub(crate) struct Doc {
                /// A documented field.
                field: bool,
            }
        });

        assert_eq!(parsed.fields.len(), 1);
        assert_eq!(parsed.fields[0].name.to_string(), "field");
    }

    #[test]
    #[should_panic(expected = "generic parameters")]
    fn generics_are_rejected() {
        parse_model_struct(quote! {
            struct Wrapper<T> {
                inner: T,
            }
        });
    }

    #[test]
    #[should_panic(expected = "named fields")]
    fn tuple_structs_are_rejected() {
        parse_model_struct(quote! {
            struct Pair(u32, u32);
        });
    }

    #[test]
    #[should_panic(expected = "unknown attribute")]
    fn unknown_model_attributes_are_rejected() {
        parse_model_struct(quote! {
            struct Odd {
                #[model(rename = "x")]
                field: bool,
            }
        });
    }
}
