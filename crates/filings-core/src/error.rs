//! Error types for filing consolidation.
//!
//! This module defines [`FilingsError`] which covers all error cases that can
//! occur when resolving companies, fetching filings, or exporting tables.

use thiserror::Error;

/// Errors that can occur while fetching or consolidating filings.
#[derive(Error, Debug)]
pub enum FilingsError {
    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// No company matched the requested name.
    #[error("Company not found: {0}")]
    CompanyNotFound(String),

    /// A company name resolved to more than one identifier and no
    /// selection was made.
    #[error("Company name {name:?} is ambiguous: {matches} matches")]
    AmbiguousCompany {
        /// The name that was searched.
        name: String,
        /// Number of candidate identifiers returned by the index.
        matches: usize,
    },

    /// The requested filing could not be located in the source data.
    #[error("Filing not found: {0}")]
    FilingNotFound(String),

    /// Error parsing data returned by a source.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Error writing a consolidated table to durable storage.
    #[error("Export error: {0}")]
    Export(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`FilingsError`].
pub type Result<T> = std::result::Result<T, FilingsError>;
