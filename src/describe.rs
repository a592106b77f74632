//! Interface descriptions: the reader and builder contracts a configuration
//! is synthesized from.
//!
//! A reader description lists zero-argument accessors, one per property,
//! plus an optional `clone_builder`. A builder description lists
//! one-argument setters returning the builder, plus a `done` returning the
//! reader. Types are referred to by name.

use crate::transform::TransformRef;
use crate::value::Value;

/// Terminal builder method yielding the reader.
pub const DONE: &str = "done";
/// Reader method re-entering the builder phase.
pub const CLONE_BUILDER: &str = "clone_builder";
pub const TO_STRING: &str = "to_string";
pub const EQUALS: &str = "eq";
pub const HASH_CODE: &str = "hash_code";
/// Raw value map access, used by reader equality.
pub const VALUE_MAP: &str = "__value_map";

/// Method names handled by the dispatchers themselves; never property names.
pub const RESERVED: &[&str] = &[DONE, CLONE_BUILDER, TO_STRING, EQUALS, HASH_CODE, VALUE_MAP];

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptionKind {
    Interface,
    Concrete,
}

#[derive(Debug, Clone)]
pub struct MethodDescription {
    name: String,
    params: Vec<String>,
    returns: String,
    transform: Option<TransformRef>,
    default: Option<Value>,
}

impl MethodDescription {
    pub fn new(name: impl Into<String>, returns: impl Into<String>) -> Self {
        MethodDescription {
            name: name.into(),
            params: Vec::new(),
            returns: returns.into(),
            transform: None,
            default: None,
        }
    }

    pub fn param(mut self, ty: impl Into<String>) -> Self {
        self.params.push(ty.into());
        self
    }

    /// Declares the function applied to values assigned to this property.
    pub fn transform_by(mut self, transform: TransformRef) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Declares the value used when the property is never set.
    pub fn defaults_to(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }

    pub fn returns(&self) -> &str {
        &self.returns
    }

    pub fn transform(&self) -> Option<&TransformRef> {
        self.transform.as_ref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct InterfaceDescription {
    name: String,
    kind: DescriptionKind,
    methods: Vec<MethodDescription>,
}

impl InterfaceDescription {
    pub fn interface(name: impl Into<String>) -> Self {
        InterfaceDescription {
            name: name.into(),
            kind: DescriptionKind::Interface,
            methods: Vec::new(),
        }
    }

    /// A description of a concrete type. Never valid as a builder or reader.
    pub fn concrete(name: impl Into<String>) -> Self {
        InterfaceDescription {
            kind: DescriptionKind::Concrete,
            ..InterfaceDescription::interface(name)
        }
    }

    pub fn method(mut self, method: MethodDescription) -> Self {
        self.methods.push(method);
        self
    }

    /// Adds a zero-argument reader accessor.
    pub fn accessor(self, name: impl Into<String>, returns: impl Into<String>) -> Self {
        self.method(MethodDescription::new(name, returns))
    }

    /// Adds a builder setter taking `ty` and returning this description's type.
    pub fn setter(self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        let returns = self.name.clone();
        self.method(MethodDescription::new(name, returns).param(ty))
    }

    /// Adds the terminal `done` method returning `reader`.
    pub fn done(self, reader: impl Into<String>) -> Self {
        self.method(MethodDescription::new(DONE, reader))
    }

    /// Adds the `clone_builder` method returning `builder`.
    pub fn clone_builder(self, builder: impl Into<String>) -> Self {
        self.method(MethodDescription::new(CLONE_BUILDER, builder))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> DescriptionKind {
        self.kind
    }

    pub fn is_interface(&self) -> bool {
        self.kind == DescriptionKind::Interface
    }

    pub fn methods(&self) -> &[MethodDescription] {
        &self.methods
    }
}
