//! Schema validation.
//!
//! Cross-checks a reader description against a builder description and
//! derives the property set shared by every builder and reader synthesized
//! for that pair.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::describe::{self, InterfaceDescription, MethodDescription, CLONE_BUILDER, DONE};
use crate::error::{ConfigError, ConfigResult};
use crate::transform::Transform;
use crate::value::{Value, ValueMap};

/// A single configuration property.
#[derive(Debug, Clone)]
pub struct Property {
    name: String,
    type_name: String,
    transform: Option<Transform>,
    default: Option<Value>,
}

impl Property {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared type of the accessor's return value.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn transform(&self) -> Option<&Transform> {
        self.transform.as_ref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// The validated property set of a reader/builder pair.
#[derive(Debug, Clone)]
pub struct Schema {
    reader: String,
    builder: String,
    properties: BTreeMap<String, Property>,
}

impl Schema {
    /// Validates that `builder` and `reader` describe the same properties.
    pub fn validate(
        reader: &InterfaceDescription,
        builder: &InterfaceDescription,
    ) -> ConfigResult<Schema> {
        if !builder.is_interface() {
            return Err(ConfigError::mismatch(format!(
                "builder {} should be an interface",
                builder.name()
            )));
        }
        if !reader.is_interface() {
            return Err(ConfigError::mismatch(format!(
                "reader {} should be an interface",
                reader.name()
            )));
        }

        let setters = builder_setters(reader, builder)?;
        let properties = reader_properties(reader, builder)?;

        let setter_names: BTreeSet<&str> = setters.keys().copied().collect();
        let property_names: BTreeSet<&str> = properties.keys().map(String::as_str).collect();
        if setter_names != property_names {
            let no_setter: Vec<&str> = property_names.difference(&setter_names).copied().collect();
            let no_accessor: Vec<&str> =
                setter_names.difference(&property_names).copied().collect();
            return Err(ConfigError::mismatch(format!(
                "reader properties do not match builder properties \
                 (no setter for [{}], no accessor for [{}])",
                no_setter.join(", "),
                no_accessor.join(", ")
            )));
        }

        // A transformation may change the value's type, so only plain
        // properties must agree on it.
        for property in properties.values().filter(|p| p.transform.is_none()) {
            let param = setters
                .get(property.name())
                .and_then(|setter| setter.params().first());
            if let Some(param) = param {
                if *param != property.type_name {
                    return Err(ConfigError::mismatch(format!(
                        "setter {} takes {} but accessor returns {}",
                        property.name, param, property.type_name
                    )));
                }
            }
        }

        debug!(
            "Validated configuration {} / {} with {} properties",
            reader.name(),
            builder.name(),
            properties.len()
        );
        Ok(Schema {
            reader: reader.name().to_string(),
            builder: builder.name().to_string(),
            properties,
        })
    }

    pub fn reader_name(&self) -> &str {
        &self.reader
    }

    pub fn builder_name(&self) -> &str {
        &self.builder
    }

    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.properties.values()
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Required properties with no value in `values`, in name order.
    pub fn missing(&self, values: &ValueMap) -> Vec<String> {
        self.properties
            .values()
            .filter(|p| p.default.is_none() && !values.contains_key(&p.name))
            .map(|p| p.name.clone())
            .collect()
    }
}

fn builder_setters<'a>(
    reader: &InterfaceDescription,
    builder: &'a InterfaceDescription,
) -> ConfigResult<BTreeMap<&'a str, &'a MethodDescription>> {
    let mut setters = BTreeMap::new();
    let mut has_done = false;

    for method in builder.methods() {
        let name = method.name();
        if name == DONE {
            if has_done {
                return Err(overloaded(builder, name));
            }
            if method.arity() != 0 {
                return Err(ConfigError::mismatch("done is a method with 0 parameters"));
            }
            if method.returns() != reader.name() {
                return Err(ConfigError::mismatch(format!(
                    "done returns {}, not the reader {}",
                    method.returns(),
                    reader.name()
                )));
            }
            has_done = true;
            continue;
        }

        // Everything else is a setter: Builder property(PropertyType value)
        if describe::is_reserved(name) {
            return Err(reserved(name));
        }
        if method.arity() != 1 {
            return Err(ConfigError::mismatch(format!(
                "setter method {name} takes {} parameters, expected 1",
                method.arity()
            )));
        }
        if method.returns() != builder.name() {
            return Err(ConfigError::mismatch(format!(
                "setter method {name} returns {}, not the builder {}",
                method.returns(),
                builder.name()
            )));
        }
        if method.transform().is_some() || method.default_value().is_some() {
            return Err(ConfigError::mismatch(format!(
                "setter method {name} declares a transformation or default; \
                 declare it on the reader accessor"
            )));
        }
        if setters.insert(name, method).is_some() {
            return Err(overloaded(builder, name));
        }
    }

    if !has_done {
        return Err(ConfigError::mismatch(format!(
            "builder {} declares no done method",
            builder.name()
        )));
    }
    Ok(setters)
}

fn reader_properties(
    reader: &InterfaceDescription,
    builder: &InterfaceDescription,
) -> ConfigResult<BTreeMap<String, Property>> {
    let mut properties = BTreeMap::new();
    let mut has_clone_builder = false;

    for method in reader.methods() {
        let name = method.name();
        if name == CLONE_BUILDER {
            if has_clone_builder {
                return Err(overloaded(reader, name));
            }
            if method.arity() != 0 {
                return Err(ConfigError::mismatch(
                    "clone_builder is a method with 0 parameters",
                ));
            }
            if method.returns() != builder.name() {
                return Err(ConfigError::mismatch(format!(
                    "clone_builder returns {}, not the builder {}",
                    method.returns(),
                    builder.name()
                )));
            }
            has_clone_builder = true;
            continue;
        }

        if describe::is_reserved(name) {
            return Err(reserved(name));
        }
        if method.arity() != 0 {
            return Err(ConfigError::mismatch(format!(
                "accessor method {name} takes {} parameters, expected 0",
                method.arity()
            )));
        }
        let property = Property {
            name: name.to_string(),
            type_name: method.returns().to_string(),
            transform: method.transform().map(|t| t.instantiate()),
            default: method.default_value().cloned(),
        };
        if properties.insert(name.to_string(), property).is_some() {
            return Err(overloaded(reader, name));
        }
    }
    Ok(properties)
}

fn overloaded(description: &InterfaceDescription, name: &str) -> ConfigError {
    ConfigError::mismatch(format!(
        "{} declares {name} more than once; overloading is not supported",
        description.name()
    ))
}

fn reserved(name: &str) -> ConfigError {
    ConfigError::mismatch(format!("{name} is reserved and cannot name a property"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::describe::MethodDescription;
    use crate::transform::{Identity, TransformRef};

    fn reader() -> InterfaceDescription {
        InterfaceDescription::interface("Configuration1")
            .accessor("property1", "String")
            .accessor("property2", "i32")
            .clone_builder("Builder")
    }

    fn builder() -> InterfaceDescription {
        InterfaceDescription::interface("Builder")
            .setter("property1", "String")
            .setter("property2", "i32")
            .done("Configuration1")
    }

    fn mismatch_message(result: ConfigResult<Schema>) -> String {
        match result {
            Err(ConfigError::SchemaMismatch(message)) => message,
            other => panic!("expected a schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_collects_properties() {
        let schema = Schema::validate(&reader(), &builder()).unwrap();
        assert_eq!(schema.reader_name(), "Configuration1");
        assert_eq!(schema.builder_name(), "Builder");
        assert_eq!(schema.property_names().collect::<Vec<_>>(), ["property1", "property2"]);
        assert_eq!(schema.len(), 2);
        assert!(schema.contains("property1"));
        assert!(!schema.contains("clone_builder"));
        assert!(!schema.contains("done"));
    }

    #[test]
    fn test_clone_builder_is_optional() {
        let reader = InterfaceDescription::interface("Configuration1")
            .accessor("property1", "String")
            .accessor("property2", "i32");
        assert!(Schema::validate(&reader, &builder()).is_ok());
    }

    #[test]
    fn test_validate_collects_transforms_and_defaults() {
        let reader = InterfaceDescription::interface("Configuration1")
            .method(
                MethodDescription::new("property1", "String")
                    .transform_by(TransformRef::of::<Identity>()),
            )
            .method(MethodDescription::new("property2", "i32").defaults_to(Value::new(5i32)));

        let schema = Schema::validate(&reader, &builder()).unwrap();
        let property1 = schema.property("property1").unwrap();
        assert!(property1.transform().is_some());
        assert!(property1.default_value().is_none());

        let property2 = schema.property("property2").unwrap();
        assert!(property2.transform().is_none());
        assert_eq!(property2.default_value(), Some(&Value::new(5i32)));
    }

    #[test]
    fn test_builder_must_be_interface() {
        let builder = InterfaceDescription::concrete("Builder")
            .setter("property1", "String")
            .setter("property2", "i32")
            .done("Configuration1");
        let message = mismatch_message(Schema::validate(&reader(), &builder));
        assert!(message.contains("should be an interface"));
    }

    #[test]
    fn test_reader_must_be_interface() {
        let reader = InterfaceDescription::concrete("Configuration1")
            .accessor("property1", "String")
            .accessor("property2", "i32");
        assert!(Schema::validate(&reader, &builder()).is_err());
    }

    #[test]
    fn test_setter_arity() {
        let builder = InterfaceDescription::interface("Builder")
            .setter("property1", "String")
            .method(MethodDescription::new("property2", "Builder").param("i32").param("i32"))
            .done("Configuration1");
        let message = mismatch_message(Schema::validate(&reader(), &builder));
        assert!(message.contains("property2"));
    }

    #[test]
    fn test_setter_return_type() {
        let builder = InterfaceDescription::interface("Builder")
            .setter("property1", "String")
            .method(MethodDescription::new("property2", "OtherBuilder").param("i32"))
            .done("Configuration1");
        let message = mismatch_message(Schema::validate(&reader(), &builder));
        assert!(message.contains("not the builder"));
    }

    #[test]
    fn test_done_shape() {
        let wrong_return = InterfaceDescription::interface("Builder")
            .setter("property1", "String")
            .setter("property2", "i32")
            .done("Other");
        assert!(mismatch_message(Schema::validate(&reader(), &wrong_return)).contains("done"));

        let with_param = InterfaceDescription::interface("Builder")
            .setter("property1", "String")
            .setter("property2", "i32")
            .method(MethodDescription::new("done", "Configuration1").param("bool"));
        assert!(mismatch_message(Schema::validate(&reader(), &with_param)).contains("done"));

        let missing = InterfaceDescription::interface("Builder")
            .setter("property1", "String")
            .setter("property2", "i32");
        assert!(mismatch_message(Schema::validate(&reader(), &missing)).contains("no done"));
    }

    #[test]
    fn test_clone_builder_shape() {
        let reader = InterfaceDescription::interface("Configuration1")
            .accessor("property1", "String")
            .accessor("property2", "i32")
            .clone_builder("Other");
        let message = mismatch_message(Schema::validate(&reader, &builder()));
        assert!(message.contains("clone_builder returns Other"));

        let with_param = InterfaceDescription::interface("Configuration1")
            .accessor("property1", "String")
            .accessor("property2", "i32")
            .method(MethodDescription::new("clone_builder", "Builder").param("bool"));
        let message = mismatch_message(Schema::validate(&with_param, &builder()));
        assert!(message.contains("clone_builder is a method with 0 parameters"));
    }

    #[test]
    fn test_accessor_arity() {
        let reader = InterfaceDescription::interface("Configuration1")
            .accessor("property1", "String")
            .method(MethodDescription::new("property2", "i32").param("i32"));
        let message = mismatch_message(Schema::validate(&reader, &builder()));
        assert!(message.contains("accessor method property2"));
    }

    #[test]
    fn test_property_sets_must_be_equal() {
        let reader = InterfaceDescription::interface("Configuration1")
            .accessor("property1", "String")
            .accessor("property3", "i32");
        let message = mismatch_message(Schema::validate(&reader, &builder()));
        assert!(message.contains("no setter for [property3]"));
        assert!(message.contains("no accessor for [property2]"));

        // A strict subset is still a mismatch.
        let reader =
            InterfaceDescription::interface("Configuration1").accessor("property1", "String");
        assert!(Schema::validate(&reader, &builder()).is_err());
    }

    #[test]
    fn test_overloaded_names_rejected() {
        let builder = InterfaceDescription::interface("Builder")
            .setter("property1", "String")
            .setter("property2", "i32")
            .setter("property2", "i64")
            .done("Configuration1");
        let message = mismatch_message(Schema::validate(&reader(), &builder));
        assert!(message.contains("Builder declares property2 more than once"));

        let reader = InterfaceDescription::interface("Configuration1")
            .accessor("property1", "String")
            .accessor("property2", "i32")
            .accessor("property2", "i64");
        let message = mismatch_message(Schema::validate(&reader, &self::builder()));
        assert!(message.contains("Configuration1 declares property2 more than once"));

        let builder = self::builder().done("Configuration1");
        let message = mismatch_message(Schema::validate(&self::reader(), &builder));
        assert!(message.contains("Builder declares done more than once"));
    }

    #[test]
    fn test_reserved_names_rejected() {
        let reader = InterfaceDescription::interface("Configuration1").accessor("hash_code", "u64");
        let builder = InterfaceDescription::interface("Builder")
            .setter("hash_code", "u64")
            .done("Configuration1");
        let message = mismatch_message(Schema::validate(&reader, &builder));
        assert!(message.contains("hash_code is reserved"));

        // Only the reader uses the reserved name, so the builder passes its checks.
        let reader = InterfaceDescription::interface("Configuration1")
            .accessor("property1", "String")
            .accessor("property2", "i32")
            .accessor("to_string", "String");
        let message = mismatch_message(Schema::validate(&reader, &self::builder()));
        assert!(message.contains("to_string is reserved"));
    }

    #[test]
    fn test_setter_type_must_match_accessor() {
        let builder = InterfaceDescription::interface("Builder")
            .setter("property1", "String")
            .setter("property2", "i64")
            .done("Configuration1");
        let message = mismatch_message(Schema::validate(&reader(), &builder));
        assert!(message.contains("setter property2 takes i64"));
    }

    #[test]
    fn test_transformed_property_may_change_type() {
        let reader = InterfaceDescription::interface("Configuration1")
            .accessor("property1", "String")
            .method(
                MethodDescription::new("property2", "i32")
                    .transform_by(TransformRef::of::<Identity>()),
            );
        let builder = InterfaceDescription::interface("Builder")
            .setter("property1", "String")
            .setter("property2", "String")
            .done("Configuration1");
        assert!(Schema::validate(&reader, &builder).is_ok());
    }

    #[test]
    fn test_transform_on_builder_rejected() {
        let builder = InterfaceDescription::interface("Builder")
            .setter("property1", "String")
            .method(
                MethodDescription::new("property2", "Builder")
                    .param("i32")
                    .transform_by(TransformRef::of::<Identity>()),
            )
            .done("Configuration1");
        let message = mismatch_message(Schema::validate(&reader(), &builder));
        assert!(message.contains("declare it on the reader accessor"));
    }

    #[test]
    fn test_default_on_builder_rejected() {
        let builder = InterfaceDescription::interface("Builder")
            .setter("property1", "String")
            .method(
                MethodDescription::new("property2", "Builder")
                    .param("i32")
                    .defaults_to(Value::new(5i32)),
            )
            .done("Configuration1");
        let message = mismatch_message(Schema::validate(&reader(), &builder));
        assert!(message.contains("setter method property2 declares a transformation or default"));
    }

    #[test]
    fn test_missing_ignores_defaulted_properties() {
        let reader = InterfaceDescription::interface("Configuration1")
            .accessor("property1", "String")
            .method(MethodDescription::new("property2", "i32").defaults_to(Value::new(5i32)));
        let schema = Schema::validate(&reader, &builder()).unwrap();

        assert_eq!(schema.missing(&ValueMap::new()), ["property1"]);

        let mut values = ValueMap::new();
        values.insert("property1".into(), Value::new("value1".to_string()));
        assert!(schema.missing(&values).is_empty());
    }
}
