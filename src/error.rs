use crate::attachments::StorageError;
use crate::schema::types::SchemaError;
use std::fmt;

/// Unified error type for the crate.
///
/// Schema derivation and attachment payload management fail for different
/// reasons with different recovery stories; this type exists so callers
/// driving both can propagate a single error through `?`.
#[derive(Debug)]
pub enum FormFoldError {
    /// Errors raised while registering or deriving a model declaration
    Schema(SchemaError),

    /// Errors raised while moving attachment payloads to or from storage
    Storage(StorageError),
}

/// Result alias using [`FormFoldError`].
pub type FormFoldResult<T> = Result<T, FormFoldError>;

impl fmt::Display for FormFoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema(err) => write!(f, "Schema error: {}", err),
            Self::Storage(err) => write!(f, "Storage error: {}", err),
        }
    }
}

impl std::error::Error for FormFoldError {}

/// Conversion from SchemaError to FormFoldError
impl From<SchemaError> for FormFoldError {
    fn from(error: SchemaError) -> Self {
        FormFoldError::Schema(error)
    }
}

/// Conversion from StorageError to FormFoldError
impl From<StorageError> for FormFoldError {
    fn from(error: StorageError) -> Self {
        FormFoldError::Storage(error)
    }
}
