//! Input validation for traversal paths and batching

/// Default batch size when none is configured (32)
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Validation error type
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NoPaths,
    EmptyPath { index: usize },
    NonPositiveBatchSize { size: i64 },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPaths => write!(f, "`traversal_paths` needs at least one path"),
            Self::EmptyPath { index } => {
                write!(f, "traversal path at position {} is empty", index)
            }
            Self::NonPositiveBatchSize { size } => {
                write!(f, "`batch_size` should be a positive integer, got {}", size)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for crate::error::Error {
    fn from(err: ValidationError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

/// Validate the number of paths in a path list
///
/// There is no upper bound: the traversal keeps its own stack, so long
/// lists and deep paths only cost memory.
pub fn validate_path_count(count: usize) -> Result<(), ValidationError> {
    if count == 0 {
        return Err(ValidationError::NoPaths);
    }
    Ok(())
}

/// Validate a single traversal path string
pub fn validate_path(index: usize, path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::EmptyPath { index });
    }
    Ok(())
}

/// Validate a signed batch size and convert it to `usize`
pub fn validate_batch_size(size: i64) -> Result<usize, ValidationError> {
    if size <= 0 {
        return Err(ValidationError::NonPositiveBatchSize { size });
    }
    usize::try_from(size).map_err(|_| ValidationError::NonPositiveBatchSize { size })
}
