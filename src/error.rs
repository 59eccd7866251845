// ⚠️ Error Types - Join + Query + Loader failures
//
// Construction errors (MissingReference) abort the whole load.
// Query errors are local to the call and never touch the Model.

/// Top-level error enum for the community registry.
#[derive(Debug, thiserror::Error)]
pub enum CommunityError {
    /// Query called with a canton code or district number unknown to the Model
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Lookup matched zero entities
    #[error("Not found: {0}")]
    NotFound(String),

    /// Postal record points at a political community number that does not exist
    #[error("Postal community {zip_key} references unknown political community {number}")]
    MissingReference { zip_key: String, number: String },

    /// Two rows produced the same grouping key while building a sorted map
    #[error("Duplicate key {0}")]
    AmbiguousAggregation(String),

    #[error("Invalid date '{0}'")]
    InvalidDate(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type CommunityResult<T> = Result<T, CommunityError>;
