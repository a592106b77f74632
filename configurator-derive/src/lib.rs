//! # configurator-derive
//!
//! The `#[configuration]` attribute turns a struct declaration into a typed
//! configuration reader and its builder, both backed by the dynamic
//! `configurator` engine.
//!
//! ## Example
//!
//! ```rust,ignore
//! use configurator::configuration;
//!
//! #[configuration]
//! pub struct Server {
//!     host: String,
//!     port: u16,
//!     #[property(default = 4usize)]
//!     workers: usize,
//!     banner: Option<String>,
//! }
//!
//! let server = Server::builder()?
//!     .host("localhost".to_string())
//!     .port(8080)
//!     .done()?;
//! assert_eq!(*server.workers(), 4);
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod field;
mod generate;
mod parse;

/// Generates a typed configuration from a struct with named fields.
///
/// The struct is replaced by a reader type of the same name with one
/// accessor per field, and a builder named `{StructName}Builder` (or the
/// name given as `#[configuration(builder = Name)]`) with one chained
/// setter per field and a `done()` method.
///
/// ## Field attributes
///
/// - `#[property(transform = Type)]`: applies `Type` (a `Transformer +
///   Default`) to every value assigned to the property
/// - `#[property(input = Type)]`: setter parameter type when the
///   transformation produces a different type
/// - `#[property(default = expr)]`: value used when the property is never set
///
/// `Option<T>` fields are optional: the setter takes `T`, the accessor
/// returns `Option<&T>`, and an unset field reads as `None`.
///
/// Every field type must be `Clone + Debug + PartialEq + Hash + Send + Sync`.
/// Floats are not `Hash`; wrap them in a newtype that hashes `to_bits()`.
#[proc_macro_attribute]
pub fn configuration(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut config_args = parse::ConfigurationArgs::default();
    let args_parser = syn::meta::parser(|meta| config_args.parse(meta));
    parse_macro_input!(args with args_parser);

    let input = parse_macro_input!(input as DeriveInput);

    match generate::impl_configuration(&config_args, &input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
