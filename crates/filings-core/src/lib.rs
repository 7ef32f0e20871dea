#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/filings-rs/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core traits and types for SEC filing consolidation.
//!
//! This crate provides the foundational abstractions shared by the
//! consolidation engine and its data sources:
//!
//! - [`FilingIndex`](source::FilingIndex) - Filing discovery and name lookup
//! - [`ReportCollector`](source::ReportCollector) - Raw filing retrieval
//! - [`StatementPresenter`](source::StatementPresenter) - Statement presentation
//! - [`FilingsError`](error::FilingsError) - Common error taxonomy

/// Error types for filing consolidation.
pub mod error;
/// Collaborator traits for obtaining filing data.
pub mod source;
/// Core data types (Cik, Filing, LineItemKey, etc.).
pub mod types;

// Re-export commonly used items at crate root
pub use error::{FilingsError, Result};
pub use source::{FilingIndex, ReportCollector, StatementPresenter};
pub use types::{
    AccessionNumber, Cik, CompanyMatch, Filing, FormKind, LineItemKey, PresentedStatement,
    RawFact, RawFiling, StatementKind, StatementRow,
};
