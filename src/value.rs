//! Type-erased property values.
//!
//! A [`Value`] wraps any `'static` type that can be compared, hashed and
//! printed. Values are immutable once wrapped and cheap to clone, so copying
//! a value map never copies the values themselves.

use std::any::{self, Any, TypeId};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Property values keyed by property name.
pub type ValueMap = BTreeMap<String, Value>;

/// Object-safe view of a value that can live in a [`ValueMap`].
///
/// Implemented for every `Any + Debug + PartialEq + Hash + Send + Sync` type;
/// there is no need to implement it by hand.
///
/// `f32` and `f64` are not `Hash`, so they cannot be values directly. Wrap
/// them in a newtype that compares and hashes the bit pattern:
///
/// ```
/// use std::hash::{Hash, Hasher};
/// use configurator::Value;
///
/// #[derive(Debug, Clone, Copy)]
/// struct Ratio(f64);
///
/// impl PartialEq for Ratio {
///     fn eq(&self, other: &Self) -> bool {
///         self.0.to_bits() == other.0.to_bits()
///     }
/// }
///
/// impl Hash for Ratio {
///     fn hash<H: Hasher>(&self, state: &mut H) {
///         self.0.to_bits().hash(state);
///     }
/// }
///
/// assert_eq!(Value::new(Ratio(0.5)), Value::new(Ratio(0.5)));
/// ```
pub trait PropertyValue: Any + fmt::Debug + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    /// Equal only when `other` has the same concrete type and compares equal.
    fn dyn_eq(&self, other: &dyn PropertyValue) -> bool;

    fn dyn_hash(&self, state: &mut dyn Hasher);

    fn type_name(&self) -> &'static str;
}

impl<T> PropertyValue for T
where
    T: Any + fmt::Debug + PartialEq + Hash + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn PropertyValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn dyn_hash(&self, mut state: &mut dyn Hasher) {
        TypeId::of::<T>().hash(&mut state);
        self.hash(&mut state);
    }

    fn type_name(&self) -> &'static str {
        any::type_name::<T>()
    }
}

/// A shared, immutable property value.
#[derive(Clone)]
pub struct Value(Arc<dyn PropertyValue>);

impl Value {
    /// Wraps `value`. Wrapping a `Value` returns it unchanged.
    pub fn new<T: PropertyValue>(value: T) -> Self {
        if let Some(value) = (&value as &dyn Any).downcast_ref::<Value>() {
            return value.clone();
        }
        Value(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        (*self.0).as_any().downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        (*self.0).as_any().is::<T>()
    }

    /// Name of the wrapped concrete type.
    pub fn type_name(&self) -> &'static str {
        (*self.0).type_name()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        (*self.0).dyn_eq(&*other.0)
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (*self.0).dyn_hash(state);
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}
