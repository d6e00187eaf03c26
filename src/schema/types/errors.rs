use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A model declaration cannot be classified or violates a declaration
    /// restriction. Fatal to deriving the offending field; the message is
    /// prefixed with the field path at each recursion level.
    InvalidDefinition(String),
    /// A model name passed to the registry is not registered.
    NotFound(String),
}

impl SchemaError {
    /// Prefix the message with the field currently being derived, so nested
    /// failures stay traceable to the exact sub-field.
    pub(crate) fn prefix_field(self, field_name: &str) -> Self {
        match self {
            Self::InvalidDefinition(msg) => {
                Self::InvalidDefinition(format!("Invalid field {}: {}", field_name, msg))
            }
            other => other,
        }
    }

    /// Prefix the message with the model being validated or derived.
    pub(crate) fn prefix_model(self, model_name: &str) -> Self {
        match self {
            Self::InvalidDefinition(msg) => {
                Self::InvalidDefinition(format!("Invalid model {}: {}", model_name, msg))
            }
            other => other,
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SchemaError::InvalidDefinition(msg) => write!(f, "Invalid definition: {}", msg),
            SchemaError::NotFound(msg) => write!(f, "Model not found: {}", msg),
        }
    }
}

impl std::error::Error for SchemaError {}
