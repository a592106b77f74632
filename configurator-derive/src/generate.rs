//! Code generation for `#[configuration]`.
//!
//! This module uses the `quote` crate to generate the reader struct, the
//! builder struct, the interface descriptions handed to the engine, and
//! the typed methods delegating to it.

use crate::field::PropertyInfo;
use crate::parse::{extract_fields, validate_struct, ConfigurationArgs};
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

/// Generates the complete configuration for a struct.
pub fn impl_configuration(
    args: &ConfigurationArgs,
    input: &DeriveInput,
) -> syn::Result<TokenStream> {
    validate_struct(input)?;

    let fields = extract_fields(input)?;
    let properties: Result<Vec<_>, _> = fields.iter().map(PropertyInfo::from_field).collect();
    let properties = properties?;

    let reader_name = &input.ident;
    let builder_name = args
        .builder
        .clone()
        .unwrap_or_else(|| quote::format_ident!("{}Builder", reader_name));
    let vis = &input.vis;
    let attrs = &input.attrs;

    let accessor_fields = properties.iter().map(|p| {
        let name = &p.name;
        let ty = &p.ty;
        quote! { #name: #ty }
    });

    let reader_description = generate_reader_description(reader_name, &builder_name, &properties);
    let builder_description = generate_builder_description(reader_name, &builder_name, &properties);
    let from_reader = generate_from_reader(&properties);
    let accessors = generate_accessors(&properties);
    let setters = generate_setters(&properties);
    let debug_impl = generate_debug(reader_name, &properties);

    Ok(quote! {
        #(#attrs)*
        #[derive(Clone)]
        #vis struct #reader_name {
            #(#accessor_fields,)*
            __reader: ::configurator::Reader,
        }

        #[derive(Clone, Debug)]
        #vis struct #builder_name {
            __builder: ::configurator::Builder,
        }

        impl #reader_name {
            #reader_description

            #builder_description

            /// The validated engine for this configuration, built once.
            pub fn synthesizer() -> ::configurator::ConfigResult<::configurator::Synthesizer> {
                static SYNTHESIZER: ::std::sync::OnceLock<
                    ::configurator::ConfigResult<::configurator::Synthesizer>,
                > = ::std::sync::OnceLock::new();
                SYNTHESIZER
                    .get_or_init(|| {
                        ::configurator::Synthesizer::new(
                            &Self::reader_description(),
                            &Self::builder_description(),
                        )
                    })
                    .clone()
            }

            /// An empty builder.
            #vis fn builder() -> ::configurator::ConfigResult<#builder_name> {
                ::std::result::Result::Ok(#builder_name {
                    __builder: Self::synthesizer()?.make_builder(),
                })
            }

            #from_reader

            /// A builder seeded with this configuration's values.
            pub fn clone_builder(&self) -> #builder_name {
                #builder_name {
                    __builder: self.__reader.clone_builder(),
                }
            }

            pub fn as_reader(&self) -> &::configurator::Reader {
                &self.__reader
            }

            #accessors
        }

        impl #builder_name {
            #setters

            /// Finishes the configuration; fails if a required property is unset.
            pub fn done(&self) -> ::configurator::ConfigResult<#reader_name> {
                #reader_name::from_reader(self.__builder.done()?)
            }

            pub fn as_builder(&self) -> &::configurator::Builder {
                &self.__builder
            }
        }

        impl ::std::convert::TryFrom<::configurator::Reader> for #reader_name {
            type Error = ::configurator::ConfigError;

            fn try_from(reader: ::configurator::Reader) -> ::configurator::ConfigResult<Self> {
                Self::from_reader(reader)
            }
        }

        impl ::std::convert::AsRef<::configurator::Reader> for #reader_name {
            fn as_ref(&self) -> &::configurator::Reader {
                &self.__reader
            }
        }

        impl ::std::cmp::PartialEq for #reader_name {
            fn eq(&self, other: &Self) -> bool {
                self.__reader == other.__reader
            }
        }

        impl ::std::cmp::Eq for #reader_name {}

        impl ::std::hash::Hash for #reader_name {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                ::std::hash::Hash::hash(&self.__reader, state);
            }
        }

        impl ::std::fmt::Display for #reader_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.__reader, f)
            }
        }

        #debug_impl
    })
}

/// Generates `reader_description()`: one accessor per field plus
/// `clone_builder`.
fn generate_reader_description(
    reader_name: &syn::Ident,
    builder_name: &syn::Ident,
    properties: &[PropertyInfo],
) -> TokenStream {
    let reader_str = reader_name.to_string();
    let builder_str = builder_name.to_string();

    let methods = properties.iter().map(|p| {
        let name_str = p.property_name();
        let ty = &p.ty;
        let ty_str = quote!(#ty).to_string();

        let transform = p.transform.as_ref().map(|transform| {
            quote! { .transform_by(::configurator::TransformRef::of::<#transform>()) }
        });
        let default = match (&p.default, p.is_optional()) {
            (Some(expr), _) => Some(quote! {
                .defaults_to(::configurator::Value::new::<#ty>(::std::convert::Into::into(#expr)))
            }),
            (None, true) => Some(quote! {
                .defaults_to(::configurator::Value::new::<#ty>(::std::option::Option::None))
            }),
            (None, false) => None,
        };

        quote! {
            .method(::configurator::MethodDescription::new(#name_str, #ty_str) #transform #default)
        }
    });

    quote! {
        pub fn reader_description() -> ::configurator::InterfaceDescription {
            ::configurator::InterfaceDescription::interface(#reader_str)
                #(#methods)*
                .clone_builder(#builder_str)
        }
    }
}

/// Generates `builder_description()`: one setter per field plus `done`.
fn generate_builder_description(
    reader_name: &syn::Ident,
    builder_name: &syn::Ident,
    properties: &[PropertyInfo],
) -> TokenStream {
    let reader_str = reader_name.to_string();
    let builder_str = builder_name.to_string();

    let setters = properties.iter().map(|p| {
        let name_str = p.property_name();
        let ty = p.assigned_type();
        let ty_str = quote!(#ty).to_string();
        quote! { .setter(#name_str, #ty_str) }
    });

    quote! {
        pub fn builder_description() -> ::configurator::InterfaceDescription {
            ::configurator::InterfaceDescription::interface(#builder_str)
                #(#setters)*
                .done(#reader_str)
        }
    }
}

/// Generates `from_reader()`, copying each value out of the engine's reader.
fn generate_from_reader(properties: &[PropertyInfo]) -> TokenStream {
    let names: Vec<_> = properties.iter().map(|p| &p.name).collect();
    let reads = properties.iter().map(|p| {
        let name = &p.name;
        let name_str = p.property_name();
        let ty = &p.ty;
        quote! {
            let #name = ::std::clone::Clone::clone(__reader.get_as::<#ty>(#name_str)?);
        }
    });

    quote! {
        /// Wraps an engine reader, checking every property's type.
        pub fn from_reader(__reader: ::configurator::Reader) -> ::configurator::ConfigResult<Self> {
            #(#reads)*
            ::std::result::Result::Ok(Self {
                #(#names,)*
                __reader,
            })
        }
    }
}

/// Generates one accessor per field.
fn generate_accessors(properties: &[PropertyInfo]) -> TokenStream {
    let accessors = properties.iter().map(|p| {
        let name = &p.name;
        let attrs = &p.attrs;
        match &p.inner_type {
            Some(inner) => quote! {
                #(#attrs)*
                pub fn #name(&self) -> ::std::option::Option<&#inner> {
                    self.#name.as_ref()
                }
            },
            None => {
                let ty = &p.ty;
                quote! {
                    #(#attrs)*
                    pub fn #name(&self) -> &#ty {
                        &self.#name
                    }
                }
            }
        }
    });

    quote! {
        #(#accessors)*
    }
}

/// Generates chained setters for each field.
fn generate_setters(properties: &[PropertyInfo]) -> TokenStream {
    let setters = properties.iter().map(|p| {
        let name = &p.name;
        let name_str = p.property_name();
        let param_ty = p.setter_param_type();
        let value = if p.is_optional() && p.input.is_none() {
            quote! { ::std::option::Option::Some(value) }
        } else {
            quote! { value }
        };

        quote! {
            pub fn #name(mut self, value: #param_ty) -> Self {
                self.__builder.assign(#name_str, ::configurator::Value::new(#value));
                self
            }
        }
    });

    quote! {
        #(#setters)*
    }
}

/// Generates a `Debug` impl listing the properties by field name.
fn generate_debug(reader_name: &syn::Ident, properties: &[PropertyInfo]) -> TokenStream {
    let reader_str = reader_name.to_string();
    let fields = properties.iter().map(|p| {
        let name = &p.name;
        let name_str = p.property_name();
        quote! { .field(#name_str, &self.#name) }
    });

    quote! {
        impl ::std::fmt::Debug for #reader_name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(#reader_str)
                    #(#fields)*
                    .finish()
            }
        }
    }
}
