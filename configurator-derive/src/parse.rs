//! Parsing and validation logic for the `#[configuration]` attribute.
//!
//! This module checks that the annotated item can describe a configuration
//! and parses the attribute's own arguments.

use syn::meta::ParseNestedMeta;
use syn::{Data, DeriveInput, Fields};

/// Names taken by the generated reader and builder methods.
pub const RESERVED: &[&str] = &[
    "done",
    "clone_builder",
    "to_string",
    "eq",
    "hash_code",
    "__value_map",
    "builder",
    "synthesizer",
    "reader_description",
    "builder_description",
    "from_reader",
    "as_reader",
    "as_builder",
    "__reader",
];

/// Arguments of `#[configuration(...)]`.
#[derive(Default)]
pub struct ConfigurationArgs {
    /// Overrides the `{StructName}Builder` default.
    pub builder: Option<syn::Ident>,
}

impl ConfigurationArgs {
    pub fn parse(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("builder") {
            self.builder = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("unsupported configuration argument, expected `builder = Name`"))
        }
    }
}

/// Validates that the input is a non-generic struct with named fields and
/// no derives of its own.
pub fn validate_struct(input: &DeriveInput) -> syn::Result<()> {
    match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(_) => {}
            Fields::Unnamed(_) => {
                return Err(syn::Error::new_spanned(
                    input,
                    "configuration requires named fields, not a tuple struct",
                ))
            }
            Fields::Unit => {
                return Err(syn::Error::new_spanned(
                    input,
                    "configuration cannot be a unit struct",
                ))
            }
        },
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "configuration can only be applied to structs, not enums",
            ))
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                input,
                "configuration can only be applied to structs, not unions",
            ))
        }
    }

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "configuration structs cannot be generic",
        ));
    }

    if let Some(attr) = input.attrs.iter().find(|attr| attr.path().is_ident("derive")) {
        return Err(syn::Error::new_spanned(
            attr,
            "configuration generates its own Clone, Debug, PartialEq, Eq and Hash impls",
        ));
    }
    Ok(())
}

/// Extracts the named fields from a struct.
///
/// Assumes the input has already been validated with `validate_struct()`.
pub fn extract_fields(
    input: &DeriveInput,
) -> syn::Result<&syn::punctuated::Punctuated<syn::Field, syn::token::Comma>> {
    match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields_named) => Ok(&fields_named.named),
            _ => Err(syn::Error::new_spanned(input, "Expected named fields")),
        },
        _ => Err(syn::Error::new_spanned(input, "Expected a struct")),
    }
}
