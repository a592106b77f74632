use std::any::{self, Any};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::builder::Builder;
use crate::describe::{CLONE_BUILDER, EQUALS, HASH_CODE, TO_STRING, VALUE_MAP};
use crate::error::{ConfigError, ConfigResult};
use crate::schema::Schema;
use crate::synthesizer::Synthesizer;
use crate::value::{Value, ValueMap};

/// Result of a raw reader call.
#[derive(Debug)]
pub enum ReaderReply<'a> {
    Builder(Builder),
    Text(String),
    Equals(bool),
    HashCode(u64),
    ValueMap(&'a ValueMap),
    Value(&'a Value),
}

/// An immutable, complete configuration.
///
/// Equality and hashing depend only on the property values, never on
/// which builder produced the reader.
#[derive(Clone)]
pub struct Reader {
    synthesizer: Synthesizer,
    values: Arc<ValueMap>,
}

impl Reader {
    /// `values` must hold every schema property; see
    /// [`Synthesizer::build_reader`].
    pub(crate) fn new(synthesizer: Synthesizer, values: ValueMap) -> Self {
        Reader {
            synthesizer,
            values: Arc::new(values),
        }
    }

    /// Dispatches a call by method name.
    ///
    /// `eq` compares against a `Reader` argument; any other value is
    /// unequal. A typed `#[configuration]` wraps its reader, so pass
    /// `as_reader().clone()` (or `AsRef<Reader>`) rather than the typed value.
    pub fn invoke(&self, method: &str, args: &[Value]) -> ConfigResult<ReaderReply<'_>> {
        match method {
            CLONE_BUILDER => {
                ConfigError::check_arity(method, 0, args.len())?;
                Ok(ReaderReply::Builder(self.clone_builder()))
            }
            TO_STRING => {
                ConfigError::check_arity(method, 0, args.len())?;
                Ok(ReaderReply::Text(self.to_string()))
            }
            VALUE_MAP => {
                ConfigError::check_arity(method, 0, args.len())?;
                Ok(ReaderReply::ValueMap(self.value_map()))
            }
            EQUALS => {
                ConfigError::check_arity(method, 1, args.len())?;
                let equal = args
                    .first()
                    .and_then(|other| other.downcast_ref::<Reader>())
                    .is_some_and(|other| self.value_map() == other.value_map());
                Ok(ReaderReply::Equals(equal))
            }
            HASH_CODE => {
                ConfigError::check_arity(method, 0, args.len())?;
                Ok(ReaderReply::HashCode(self.hash_code()))
            }
            _ => {
                ConfigError::check_arity(method, 0, args.len())?;
                self.get(method).map(ReaderReply::Value)
            }
        }
    }

    pub fn get(&self, name: &str) -> ConfigResult<&Value> {
        self.values
            .get(name)
            .ok_or_else(|| ConfigError::PropertyNotSet(name.to_string()))
    }

    /// Reads a property as a concrete type.
    pub fn get_as<T: Any>(&self, name: &str) -> ConfigResult<&T> {
        let value = self.get(name)?;
        value
            .downcast_ref::<T>()
            .ok_or_else(|| ConfigError::TypeMismatch {
                name: name.to_string(),
                expected: any::type_name::<T>(),
                actual: value.type_name(),
            })
    }

    /// A new builder seeded with a copy of this reader's values.
    pub fn clone_builder(&self) -> Builder {
        self.synthesizer.make_builder_from(&self.values)
    }

    /// Hash of the property values; equal readers have equal hash codes.
    pub fn hash_code(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    pub fn schema(&self) -> &Schema {
        self.synthesizer.schema()
    }

    /// The raw value map. No copy is made.
    pub fn value_map(&self) -> &ValueMap {
        &self.values
    }
}

impl PartialEq for Reader {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for Reader {}

impl Hash for Reader {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}

impl fmt::Display for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {value:?}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("reader", &self.schema().reader_name())
            .field("values", &*self.values)
            .finish()
    }
}
