//! Per-property transformation functions.

use std::any;
use std::fmt;
use std::sync::Arc;

use crate::value::Value;

/// A pure function applied to a property value when it is assigned.
pub trait Transformer: Send + Sync {
    fn apply(&self, input: Value) -> Value;
}

/// Leaves the value untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl Transformer for Identity {
    fn apply(&self, input: Value) -> Value {
        input
    }
}

/// A reference to a transformer type, instantiated with no arguments when
/// the schema is validated.
#[derive(Clone, Copy)]
pub struct TransformRef {
    type_name: &'static str,
    instantiate: fn() -> Arc<dyn Transformer>,
}

fn construct<T: Transformer + Default + 'static>() -> Arc<dyn Transformer> {
    Arc::new(T::default())
}

impl TransformRef {
    pub fn of<T: Transformer + Default + 'static>() -> Self {
        TransformRef {
            type_name: any::type_name::<T>(),
            instantiate: construct::<T>,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn instantiate(&self) -> Transform {
        Transform {
            type_name: self.type_name,
            function: (self.instantiate)(),
        }
    }
}

impl fmt::Debug for TransformRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TransformRef").field(&self.type_name).finish()
    }
}

/// An instantiated transformer owned by a schema property.
#[derive(Clone)]
pub struct Transform {
    type_name: &'static str,
    function: Arc<dyn Transformer>,
}

impl Transform {
    pub fn apply(&self, input: Value) -> Value {
        self.function.apply(input)
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Transform").field(&self.type_name).finish()
    }
}
