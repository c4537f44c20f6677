use thiserror::Error;

/// Failures of the derivation pipeline.
///
/// The two range variants are recoverable at the UI boundary: a rejected
/// filter leaves the previous state untouched and the user is re-prompted.
/// `UnknownCountry` and `EmptySeries` indicate a caller bug and are
/// surfaced verbatim rather than swallowed.
#[derive(Debug, Error, PartialEq)]
pub enum DeriveError {
    #[error("invalid year range: {start} is after {end}")]
    InvalidYearRange { start: i32, end: i32 },

    #[error("year {year} is outside the dataset range {min}-{max}")]
    YearOutOfBounds { year: i32, min: i32, max: i32 },

    #[error("unknown country key: {0}")]
    UnknownCountry(String),

    #[error("empty input series")]
    EmptySeries,
}
