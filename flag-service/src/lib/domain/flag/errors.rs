use thiserror::Error;

/// Error for flag id validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FlagIdError {
    #[error("A valid id is required: /toggles/<id>")]
    Empty,
}

/// Top-level error for all flag-related operations
#[derive(Debug, Clone, Error)]
pub enum FlagError {
    #[error("{0}")]
    InvalidId(#[from] FlagIdError),

    #[error("Both 'id' and 'value' are required")]
    InvalidFlag,

    #[error("the id '{0}' doesn't match with an existing toggle")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
