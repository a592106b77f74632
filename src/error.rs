use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Configuration missing the following properties: {}", .0.join(", "))]
    MissingProperty(Vec<String>),

    #[error("Value not supplied for property: {0}")]
    PropertyNotSet(String),

    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("Property {name} holds a {actual}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub(crate) fn mismatch(message: impl Into<String>) -> Self {
        ConfigError::SchemaMismatch(message.into())
    }

    /// Checks the argument count of a raw dispatch call.
    pub(crate) fn check_arity(method: &str, expected: usize, actual: usize) -> ConfigResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(ConfigError::ProtocolViolation(format!(
                "{method} expects {expected} argument(s), got {actual}"
            )))
        }
    }
}
