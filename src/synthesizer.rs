use std::sync::Arc;

use tracing::debug;

use crate::builder::Builder;
use crate::describe::InterfaceDescription;
use crate::error::{ConfigError, ConfigResult};
use crate::reader::Reader;
use crate::schema::Schema;
use crate::value::ValueMap;

/// Produces builders and readers for one validated schema.
///
/// Cloning a synthesizer shares the schema.
#[derive(Debug, Clone)]
pub struct Synthesizer {
    schema: Arc<Schema>,
}

impl Synthesizer {
    /// Validates the pair of descriptions and keeps the resulting schema.
    pub fn new(
        reader: &InterfaceDescription,
        builder: &InterfaceDescription,
    ) -> ConfigResult<Self> {
        Ok(Synthesizer::from_schema(Schema::validate(reader, builder)?))
    }

    pub fn from_schema(schema: Schema) -> Self {
        Synthesizer {
            schema: Arc::new(schema),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// A builder with no properties set.
    pub fn make_builder(&self) -> Builder {
        Builder::new(self.clone(), ValueMap::new())
    }

    /// A builder seeded with a copy of `seed`.
    pub fn make_builder_from(&self, seed: &ValueMap) -> Builder {
        Builder::new(self.clone(), seed.clone())
    }

    /// Builds a reader over a copy of `values`.
    ///
    /// This is the completeness gate: fails with
    /// [`ConfigError::MissingProperty`] unless every property without a
    /// default has a value. Unset defaulted properties take their default.
    pub fn build_reader(&self, values: &ValueMap) -> ConfigResult<Reader> {
        let undeclared: Vec<&str> = values
            .keys()
            .map(String::as_str)
            .filter(|name| !self.schema.contains(name))
            .collect();
        if !undeclared.is_empty() {
            return Err(ConfigError::ProtocolViolation(format!(
                "{} has no properties named {}",
                self.schema.reader_name(),
                undeclared.join(", ")
            )));
        }

        let missing = self.schema.missing(values);
        if !missing.is_empty() {
            return Err(ConfigError::MissingProperty(missing));
        }

        let mut owned = values.clone();
        for property in self.schema.properties() {
            if let Some(default) = property.default_value() {
                owned
                    .entry(property.name().to_string())
                    .or_insert_with(|| default.clone());
            }
        }

        debug!(
            "Built {} with {} properties",
            self.schema.reader_name(),
            owned.len()
        );
        Ok(Reader::new(self.clone(), owned))
    }
}
