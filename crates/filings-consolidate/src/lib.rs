#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/filings-rs/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Consolidation engine for periodic regulatory filings.
//!
//! The engine turns a company's filing history into a sparse time-series
//! table of reported line items:
//!
//! - [`completeness::filter_complete_years`] - keeps fiscal years with a
//!   full quarterly+annual filing set
//! - [`select::resolve`] - resolves duplicate candidate values within one
//!   filing to a single value or absence
//! - [`FilingConsolidator::merge`] - folds resolved values into the
//!   company's [`ConsolidatedTable`], append-only and idempotent
//! - [`ConsolidationPipeline`] - drives the whole flow against injected
//!   data sources
//! - [`export::write_csv`] - serializes the table, one artifact per company

/// Fiscal-year completeness filtering.
pub mod completeness;
/// CSV serialization of consolidated tables.
pub mod export;
/// Per-company consolidation control flow.
pub mod pipeline;
/// Candidate value selection within one filing.
pub mod select;
/// The consolidated per-company table and its merge operation.
pub mod table;

pub use pipeline::{Company, ConsolidationPipeline};
pub use table::{ConsolidatedTable, FilingConsolidator};
