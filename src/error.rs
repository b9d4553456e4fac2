use thiserror::Error;

/// Failures surfaced by the diff engine.
///
/// Every variant is a programming or input error: the computation is
/// deterministic and synchronous, so nothing is retried or
/// logged-and-continued.
#[derive(Debug, Error)]
pub enum DiffError {
    /// A record in a snapshot has no `_id` field and therefore no stable
    /// identity to match across snapshots.
    #[error("record at position {position} has no '_id' field: {record}")]
    MissingIdentity { position: usize, record: String },
    /// A record carries an `_id` that is neither a number nor a string.
    #[error(
        "record at position {position} has unsupported '_id' value {value} (expected number or string)"
    )]
    InvalidIdentity { position: usize, value: String },
    /// The input was not a JSON array of objects.
    #[error("invalid snapshot input: {0}")]
    InvalidInput(String),
}
