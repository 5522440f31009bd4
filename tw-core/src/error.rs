use thiserror::Error;

/// Errors raised while preparing dashboard data.
///
/// An empty series is not an error: the aggregator reports it as a result
/// with no reference hour and no averages.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TidewatchError {
    /// The snapshot could not be retrieved or decoded.
    #[error("Failed to fetch snapshot: {0}")]
    FetchFailure(String),

    /// A record's timestamp field is missing or cannot be parsed.
    #[error("Record {index} has a malformed timestamp in field '{field}': {value}")]
    MalformedTimestamp {
        index: usize,
        field: String,
        value: String,
    },

    /// A series field configuration was rejected at construction.
    #[error("Invalid series fields: {0}")]
    InvalidFields(String),
}
