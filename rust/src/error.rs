//! Error handling for tree construction and diagnostics.
//!
//! Mutating operations report absent/duplicate keys through their `bool`
//! results; those are not errors. The error type below covers the two
//! conditions the crate can actually fail with: invalid configuration at
//! construction time and integrity violations found by the validator.

/// Error type for tree operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BPTreeError {
    /// Invalid node capacity specified at construction.
    InvalidCapacity(String),
    /// Internal structure invariant violation.
    DataIntegrityError(String),
}

impl BPTreeError {
    /// Create an `InvalidCapacity` error with context.
    pub fn invalid_capacity(capacity: usize, min_required: usize) -> Self {
        Self::InvalidCapacity(format!(
            "Capacity {} is invalid (minimum required: {})",
            capacity, min_required
        ))
    }

    /// Create a `DataIntegrityError` with context.
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Check if this error is a capacity error.
    pub fn is_capacity_error(&self) -> bool {
        matches!(self, Self::InvalidCapacity(_))
    }
}

impl std::fmt::Display for BPTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BPTreeError::InvalidCapacity(msg) => write!(f, "Invalid capacity: {}", msg),
            BPTreeError::DataIntegrityError(msg) => write!(f, "Data integrity error: {}", msg),
        }
    }
}

impl std::error::Error for BPTreeError {}

/// Result type for tree operations that may fail.
pub type TreeResult<T> = Result<T, BPTreeError>;
