//! Error types and handling for the pool store

/// Result type alias for pool store operations
pub type Result<T> = std::result::Result<T, PoolStoreError>;

/// Error types for the object pool store
#[derive(Debug, thiserror::Error)]
pub enum PoolStoreError {
    /// I/O related errors (reading pool files, mapping)
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Every slot in the pool table is taken
    #[error("Pool table full: {capacity} slots in use")]
    CapacityExhausted { capacity: usize },

    /// Handle does not name a registered pool
    #[error("Handle not found: {handle}")]
    HandleNotFound { handle: u8 },

    /// Codec failed to compress or decode a region
    #[error("Codec error ({codec}): {message}")]
    Codec { codec: String, message: String },

    /// A fill loop saw too many consecutive zero-byte reads
    #[error("Stalled stream: {zero_reads} consecutive empty reads")]
    StalledStream { zero_reads: u32 },

    /// Invalid parameters or configuration
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },
}

impl PoolStoreError {
    /// Create an I/O error from a standard I/O error
    pub fn from_io(source: std::io::Error, context: &str) -> Self {
        Self::Io {
            message: format!("{}: {}", context, source),
            source: Some(source),
        }
    }

    /// Create a capacity exhausted error
    pub fn capacity_exhausted(capacity: usize) -> Self {
        Self::CapacityExhausted { capacity }
    }

    /// Create a handle not found error
    pub fn handle_not_found(handle: u8) -> Self {
        Self::HandleNotFound { handle }
    }

    /// Create a codec error
    pub fn codec(codec: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Codec {
            codec: codec.into(),
            message: message.into(),
        }
    }

    /// Create a stalled stream error
    pub fn stalled_stream(zero_reads: u32) -> Self {
        Self::StalledStream { zero_reads }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for PoolStoreError {
    fn from(err: std::io::Error) -> Self {
        Self::from_io(err, "I/O operation failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = PoolStoreError::capacity_exhausted(16);
        assert!(matches!(err, PoolStoreError::CapacityExhausted { capacity: 16 }));

        let err = PoolStoreError::handle_not_found(7);
        assert!(matches!(err, PoolStoreError::HandleNotFound { handle: 7 }));

        let err = PoolStoreError::codec("lz4", "short archive");
        assert!(matches!(err, PoolStoreError::Codec { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = PoolStoreError::stalled_stream(256);
        let display = format!("{}", err);
        assert!(display.contains("Stalled stream"));
        assert!(display.contains("256"));
    }
}
