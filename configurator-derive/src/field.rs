//! Field analysis for configuration generation.
//!
//! Each named field becomes one property. This module reads the field's
//! type and its `#[property(...)]` attribute.

use syn::ext::IdentExt;
use syn::{Attribute, Expr, Field, GenericArgument, PathArguments, Type};

use crate::parse::RESERVED;

/// Information about a field extracted for configuration generation.
pub struct PropertyInfo {
    /// The field's identifier
    pub name: syn::Ident,
    /// The field's type as declared, which is the type the reader stores
    pub ty: Type,
    /// The inner type T if this is Option<T>, otherwise None
    pub inner_type: Option<Type>,
    /// `#[property(transform = ...)]`
    pub transform: Option<Type>,
    /// `#[property(input = ...)]`
    pub input: Option<Type>,
    /// `#[property(default = ...)]`
    pub default: Option<Expr>,
    /// Attributes other than `#[property]`, forwarded to the accessor
    pub attrs: Vec<Attribute>,
}

impl PropertyInfo {
    /// Analyzes a field and extracts information needed for generation.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let name = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new_spanned(field, "Field must have a name"))?;

        if RESERVED.contains(&name.unraw().to_string().as_str()) {
            return Err(syn::Error::new_spanned(
                &name,
                format!("`{}` is reserved and cannot name a property", name.unraw()),
            ));
        }

        let ty = field.ty.clone();
        let inner_type = extract_option_inner_type(&ty);

        let mut info = PropertyInfo {
            name,
            ty,
            inner_type,
            transform: None,
            input: None,
            default: None,
            attrs: Vec::new(),
        };

        for attr in &field.attrs {
            if !attr.path().is_ident("property") {
                info.attrs.push(attr.clone());
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("transform") {
                    info.transform = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("input") {
                    info.input = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("default") {
                    info.default = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error(
                        "unsupported property argument, expected `transform`, `input` or `default`",
                    ));
                }
                Ok(())
            })?;
        }

        if info.input.is_some() && info.transform.is_none() {
            return Err(syn::Error::new_spanned(
                &info.name,
                "`input` changes the setter type and requires a `transform`",
            ));
        }
        Ok(info)
    }

    /// The property name as seen by the schema.
    pub fn property_name(&self) -> String {
        self.name.unraw().to_string()
    }

    pub fn is_optional(&self) -> bool {
        self.inner_type.is_some()
    }

    /// Gets the type to use for the setter method parameter.
    ///
    /// An explicit `input` type wins; for Option<T> fields this returns T
    /// (unwrapped); otherwise the declared type.
    pub fn setter_param_type(&self) -> &Type {
        if let Some(input) = &self.input {
            input
        } else if let Some(inner) = &self.inner_type {
            inner
        } else {
            &self.ty
        }
    }

    /// The value type the builder hands to the engine, before any
    /// transformation.
    pub fn assigned_type(&self) -> &Type {
        self.input.as_ref().unwrap_or(&self.ty)
    }
}

/// Checks if a type is `Option<T>` and extracts the inner type T.
fn extract_option_inner_type(ty: &Type) -> Option<Type> {
    if let Type::Path(type_path) = ty {
        if type_path.qself.is_none() {
            if let Some(segment) = type_path.path.segments.last() {
                if segment.ident == "Option" {
                    if let PathArguments::AngleBracketed(args) = &segment.arguments {
                        if let Some(GenericArgument::Type(inner_ty)) = args.args.first() {
                            return Some(inner_ty.clone());
                        }
                    }
                }
            }
        }
    }
    None
}
