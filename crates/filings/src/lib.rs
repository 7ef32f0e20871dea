#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/filings-rs/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Consolidated time-series tables from SEC filings.
//!
//! # Features
//!
//! - `edgar` - SEC EDGAR data source (enabled by default)
//!
//! # Example
//!
//! ```rust,ignore
//! use filings::{Company, edgar_pipeline, export};
//!
//! #[tokio::main]
//! async fn main() -> filings::Result<()> {
//!     let pipeline = edgar_pipeline("MyApp/1.0 (contact@example.com)");
//!
//!     // Ambiguous names are resolved by an injected selection; here we
//!     // just take the first candidate.
//!     let resolved = pipeline.resolve_company("Apple Inc", |_| Some(0)).await?;
//!
//!     let mut company = Company::new(resolved.cik);
//!     pipeline.consolidate(&mut company).await?;
//!
//!     export::export_csv(company.table(), "apple_consolidated_filings.csv")?;
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use filings_core::*;

// Consolidation engine
pub use filings_consolidate::{
    Company, ConsolidatedTable, ConsolidationPipeline, FilingConsolidator, completeness, export,
    select,
};

// Data sources
#[cfg(feature = "edgar")]
pub use filings_edgar::EdgarClient;

/// Builds a [`ConsolidationPipeline`] backed by SEC EDGAR.
///
/// The SEC requires an identifying user agent of the form
/// "AppName/Version (contact@email.com)".
#[cfg(feature = "edgar")]
#[must_use]
pub fn edgar_pipeline(user_agent: &str) -> ConsolidationPipeline {
    let client = std::sync::Arc::new(EdgarClient::new(user_agent));
    ConsolidationPipeline::new(client.clone(), client.clone(), client)
}
