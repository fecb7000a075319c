use thiserror::Error;

/// A failure scoped to one location (or to one batched provider call).
///
/// These never abort a whole fetch cycle on their own: the cycle marks the
/// affected location absent and carries on with its siblings.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse JSON response from {url}")]
    JsonParse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid time axis: start {start}, end {end}, interval {interval}")]
    InvalidTimeAxis { start: i64, end: i64, interval: i64 },

    #[error("UTC offset of {0} seconds is out of range")]
    InvalidOffset(i32),

    #[error("Timestamp {0} is outside the representable range")]
    TimestampOutOfRange(i64),

    // Reconstructed axis and value array disagree: the payload is corrupt.
    #[error("Time axis has {expected} entries but variable '{variable}' has {found} values")]
    AxisLengthMismatch {
        variable: String,
        expected: usize,
        found: usize,
    },

    #[error("Timestamp {index} is {found}, expected {expected} on a regular axis")]
    OffAxisTimestamp {
        index: usize,
        expected: i64,
        found: i64,
    },

    #[error("Daily series field '{field}' has {found} entries, expected {expected}")]
    SeriesLengthMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Required path '{0}' is missing from the response")]
    MissingPath(&'static str),

    #[error("Required variable '{0}' is missing from the response")]
    MissingVariable(String),

    #[error("Provider returned no response for position {0} of the batch")]
    MissingResponse(usize),
}
