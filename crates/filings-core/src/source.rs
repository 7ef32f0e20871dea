//! Collaborator traits for obtaining filing data.
//!
//! This module defines the narrow interfaces the consolidation engine
//! consumes:
//!
//! - [`FilingIndex`] - Company lookup and filing discovery
//! - [`ReportCollector`] - Retrieval of one filing's raw facts
//! - [`StatementPresenter`] - Presentation of raw facts as a statement table

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    types::{Cik, CompanyMatch, Filing, PresentedStatement, RawFiling},
};

/// Index of known filings and company identities.
///
/// Implementations answer two questions: which filings exist for a company,
/// and which companies match a free-text name.
#[async_trait]
pub trait FilingIndex: Send + Sync + Debug {
    /// Returns every known filing for the given company.
    async fn company_filings(&self, cik: &Cik) -> Result<Vec<Filing>>;

    /// Resolves a free-text company name to zero, one, or many candidates.
    ///
    /// Multiple matches are returned as-is; disambiguation is the caller's
    /// responsibility.
    async fn find_company(&self, name: &str) -> Result<Vec<CompanyMatch>>;
}

/// Retrieves the raw content of a single filing.
#[async_trait]
pub trait ReportCollector: Send + Sync + Debug {
    /// Collects the facts reported by `filing`, restricted to its own
    /// reporting period.
    async fn collect(&self, cik: &Cik, filing: &Filing) -> Result<RawFiling>;
}

/// Presents raw filing content as a statement table.
///
/// The presented table has one row per line-item key and one value column
/// per reporting context; those columns are the candidate values the
/// consolidation engine resolves.
pub trait StatementPresenter: Send + Sync + Debug {
    /// Presents the raw facts of one filing.
    fn present(&self, raw: &RawFiling) -> Result<PresentedStatement>;
}
