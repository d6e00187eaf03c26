/// Error types for attachment payload storage operations.
///
/// A missing file during load is fatal to that load call; it is distinct
/// from the best-effort skip of payload-less attachments during persist.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An expected attachment file is missing or unreadable
    #[error("Attachment file '{name}' could not be read: {source}")]
    Missing {
        name: String,
        source: std::io::Error,
    },

    /// IO error while writing an attachment file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// An inline payload is not valid base64
    #[error("Invalid payload encoding for attachment '{name}': {source}")]
    Decode {
        name: String,
        source: base64::DecodeError,
    },
}
