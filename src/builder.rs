use std::fmt;

use tracing::trace;

use crate::describe::DONE;
use crate::error::{ConfigError, ConfigResult};
use crate::reader::Reader;
use crate::schema::Schema;
use crate::synthesizer::Synthesizer;
use crate::value::{Value, ValueMap};

/// Result of a raw builder call.
#[derive(Debug)]
pub enum BuilderReply {
    /// A setter ran; keep using the same builder.
    Chained,
    /// `done` completed the configuration.
    Done(Reader),
}

/// Accumulates property values until `done` produces a [`Reader`].
///
/// A builder is meant to be consumed by one `done`. Calling setters
/// afterwards is allowed but never affects readers already built, since
/// each reader owns a copy of the values.
#[derive(Clone)]
pub struct Builder {
    synthesizer: Synthesizer,
    values: ValueMap,
}

impl Builder {
    pub(crate) fn new(synthesizer: Synthesizer, values: ValueMap) -> Self {
        Builder {
            synthesizer,
            values,
        }
    }

    /// Dispatches a call by method name.
    ///
    /// `done` ignores its arguments. Any other name is a setter and takes
    /// exactly one argument.
    pub fn invoke(&mut self, method: &str, args: Vec<Value>) -> ConfigResult<BuilderReply> {
        if method == DONE {
            return self.done().map(BuilderReply::Done);
        }

        ConfigError::check_arity(method, 1, args.len())?;
        if let Some(value) = args.into_iter().next() {
            self.set(method, value)?;
        }
        Ok(BuilderReply::Chained)
    }

    /// Assigns `value` to the property `name`, applying its transformation.
    pub fn set(&mut self, name: &str, value: Value) -> ConfigResult<&mut Self> {
        if !self.schema().contains(name) {
            return Err(ConfigError::ProtocolViolation(format!(
                "{} has no setter named {name}",
                self.schema().builder_name()
            )));
        }
        self.assign(name, value);
        Ok(self)
    }

    /// Assigns without checking that `name` belongs to the schema.
    ///
    /// Used by generated typed builders, whose setter names come from the
    /// same declaration as the schema.
    #[doc(hidden)]
    pub fn assign(&mut self, name: &str, value: Value) {
        let value = match self.schema().property(name).and_then(|p| p.transform()) {
            Some(transform) => transform.apply(value),
            None => value,
        };
        trace!("Setting {} = {:?}", name, value);
        self.values.insert(name.to_string(), value);
    }

    /// Builds the reader from the values set so far.
    ///
    /// On [`ConfigError::MissingProperty`] the builder is left as it was and
    /// `done` may be retried after setting the missing properties.
    pub fn done(&self) -> ConfigResult<Reader> {
        self.synthesizer.build_reader(&self.values)
    }

    pub fn values(&self) -> &ValueMap {
        &self.values
    }

    pub fn schema(&self) -> &Schema {
        self.synthesizer.schema()
    }
}

impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("builder", &self.schema().builder_name())
            .field("values", &self.values)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::{InterfaceDescription, MethodDescription};
    use crate::transform::{TransformRef, Transformer};

    #[derive(Default)]
    struct Trim;

    impl Transformer for Trim {
        fn apply(&self, input: Value) -> Value {
            match input.downcast_ref::<String>() {
                Some(s) => Value::new(s.trim().to_string()),
                None => input,
            }
        }
    }

    fn builder() -> Builder {
        let reader = InterfaceDescription::interface("Account")
            .method(
                MethodDescription::new("name", "String")
                    .transform_by(TransformRef::of::<Trim>()),
            )
            .accessor("age", "u32");
        let builder = InterfaceDescription::interface("AccountBuilder")
            .setter("name", "String")
            .setter("age", "u32")
            .done("Account");
        Synthesizer::new(&reader, &builder).unwrap().make_builder()
    }

    #[test]
    fn test_setter_chains_and_stores() {
        let mut builder = builder();
        builder
            .set("name", Value::new("alice".to_string()))
            .unwrap()
            .set("age", Value::new(30u32))
            .unwrap();
        assert_eq!(builder.values().len(), 2);
        assert_eq!(builder.values()["age"], Value::new(30u32));
    }

    #[test]
    fn test_transform_applied_on_assignment() {
        let mut builder = builder();
        builder.set("name", Value::new("  alice ".to_string())).unwrap();
        assert_eq!(builder.values()["name"], Value::new("alice".to_string()));
    }

    #[test]
    fn test_invoke_setter_and_done() {
        let mut builder = builder();
        let reply = builder
            .invoke("name", vec![Value::new("bob".to_string())])
            .unwrap();
        assert!(matches!(reply, BuilderReply::Chained));

        builder.invoke("age", vec![Value::new(41u32)]).unwrap();
        // done ignores its arguments
        match builder.invoke("done", vec![Value::new(true)]).unwrap() {
            BuilderReply::Done(reader) => {
                assert_eq!(reader.get_as::<String>("name").unwrap(), "bob");
            }
            BuilderReply::Chained => panic!("done should produce a reader"),
        }
    }

    #[test]
    fn test_invoke_rejects_wrong_arity() {
        let mut builder = builder();
        let err = builder.invoke("age", vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::ProtocolViolation(_)));

        let err = builder
            .invoke("age", vec![Value::new(1u32), Value::new(2u32)])
            .unwrap_err();
        assert!(matches!(err, ConfigError::ProtocolViolation(_)));
        assert!(builder.values().is_empty());
    }

    #[test]
    fn test_set_rejects_undeclared_property() {
        let mut builder = builder();
        let err = builder.set("email", Value::new("a@b.c".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::ProtocolViolation(_)));
    }

    #[test]
    fn test_failed_done_can_be_retried() {
        let mut builder = builder();
        builder.set("name", Value::new("carol".to_string())).unwrap();
        let err = builder.done().unwrap_err();
        assert_eq!(err, ConfigError::MissingProperty(vec!["age".into()]));

        builder.set("age", Value::new(28u32)).unwrap();
        let reader = builder.done().unwrap();
        assert_eq!(reader.get_as::<u32>("age").unwrap(), &28);
    }
}
