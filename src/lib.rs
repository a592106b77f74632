//! # configurator
//!
//! Immutable, typed configuration values synthesized from two paired
//! descriptions: a read-only *reader* (one accessor per property) and a
//! *builder* (one chained setter per property, finished by `done`).
//!
//! The descriptions are cross-checked once into a [`Schema`]. A
//! [`Synthesizer`] then hands out [`Builder`]s that record assignments and
//! [`Reader`]s that serve them back, compare by value, and can be turned
//! back into a builder with `clone_builder`.
//!
//! ## Example
//!
//! ```rust
//! use configurator::{config_builder_for, InterfaceDescription, Value};
//!
//! let reader = InterfaceDescription::interface("Server")
//!     .accessor("host", "String")
//!     .accessor("port", "u16")
//!     .clone_builder("ServerBuilder");
//! let builder = InterfaceDescription::interface("ServerBuilder")
//!     .setter("host", "String")
//!     .setter("port", "u16")
//!     .done("Server");
//!
//! let mut server = config_builder_for(&reader, &builder).unwrap();
//! server
//!     .set("host", Value::new("localhost".to_string()))
//!     .unwrap()
//!     .set("port", Value::new(8080u16))
//!     .unwrap();
//! let server = server.done().unwrap();
//!
//! assert_eq!(server.get_as::<u16>("port").unwrap(), &8080);
//! ```
//!
//! The [`configuration`] attribute generates typed wrappers for a struct
//! declaration, so most code never touches the dynamic API directly.

mod builder;
mod describe;
mod error;
mod reader;
mod schema;
mod synthesizer;
mod transform;
mod value;

pub use builder::{Builder, BuilderReply};
pub use configurator_derive::configuration;
pub use describe::{
    is_reserved, DescriptionKind, InterfaceDescription, MethodDescription, CLONE_BUILDER, DONE,
    EQUALS, HASH_CODE, RESERVED, TO_STRING, VALUE_MAP,
};
pub use error::{ConfigError, ConfigResult};
pub use reader::{Reader, ReaderReply};
pub use schema::{Property, Schema};
pub use synthesizer::Synthesizer;
pub use transform::{Identity, Transform, TransformRef, Transformer};
pub use value::{PropertyValue, Value, ValueMap};

/// Validates the pair of descriptions and returns an empty builder.
pub fn config_builder_for(
    reader: &InterfaceDescription,
    builder: &InterfaceDescription,
) -> ConfigResult<Builder> {
    Ok(Synthesizer::new(reader, builder)?.make_builder())
}
