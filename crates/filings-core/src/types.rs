//! Core data types for SEC filing consolidation.
//!
//! This module defines the fundamental data structures:
//!
//! - [`Cik`] - SEC Central Index Key identifying a company
//! - [`AccessionNumber`] - Identifier of a single submission
//! - [`FormKind`] - Filing category (10-K, 10-Q, ...)
//! - [`Filing`] - One regulatory submission
//! - [`StatementKind`] - Which financial statement a tag belongs to
//! - [`LineItemKey`] - Row identity in a consolidated table
//! - [`RawFiling`] / [`PresentedStatement`] - Raw and presented filing content
//! - [`CompanyMatch`] - Result of a company-name lookup

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// SEC Central Index Key.
///
/// CIKs are normalized to a zero-padded 10-digit string on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cik(String);

impl Cik {
    /// Creates a new CIK, zero-padding to 10 digits.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(format!("{:0>10}", s.into()))
    }

    /// Returns the zero-padded CIK as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cik {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Cik {
    fn from(n: u64) -> Self {
        Self(format!("{n:010}"))
    }
}

impl From<&str> for Cik {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Accession number identifying a single EDGAR submission.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessionNumber(String);

impl AccessionNumber {
    /// Creates a new accession number.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the accession number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccessionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AccessionNumber {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Filing category of a regulatory submission.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormKind {
    /// Annual report (10-K).
    AnnualReport,
    /// Quarterly report (10-Q).
    QuarterlyReport,
    /// Current report (8-K).
    CurrentReport,
    /// Proxy statement (DEF 14A).
    ProxyStatement,
    /// Any other EDGAR form type, carried verbatim.
    Other(String),
}

impl FormKind {
    /// Parses an EDGAR form string (e.g. "10-K") into a form kind.
    ///
    /// Unrecognized forms, including amended variants like "10-K/A", are
    /// preserved as [`FormKind::Other`].
    #[must_use]
    pub fn parse(form: &str) -> Self {
        match form.trim() {
            "10-K" => Self::AnnualReport,
            "10-Q" => Self::QuarterlyReport,
            "8-K" => Self::CurrentReport,
            "DEF 14A" => Self::ProxyStatement,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns true for annual-report-equivalent filings.
    #[must_use]
    pub const fn is_annual(&self) -> bool {
        matches!(self, Self::AnnualReport)
    }

    /// Returns true for quarterly-report-equivalent filings.
    #[must_use]
    pub const fn is_quarterly(&self) -> bool {
        matches!(self, Self::QuarterlyReport)
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AnnualReport => write!(f, "10-K"),
            Self::QuarterlyReport => write!(f, "10-Q"),
            Self::CurrentReport => write!(f, "8-K"),
            Self::ProxyStatement => write!(f, "DEF 14A"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

/// One regulatory submission: accession number, form kind, period-end date.
///
/// Filings are immutable once discovered by the index.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Filing {
    /// Accession number of the submission.
    pub accession: AccessionNumber,
    /// Filing category.
    pub form: FormKind,
    /// End date of the reporting period covered by the filing.
    pub period_end: NaiveDate,
}

impl Filing {
    /// Creates a new filing record.
    #[must_use]
    pub const fn new(accession: AccessionNumber, form: FormKind, period_end: NaiveDate) -> Self {
        Self {
            accession,
            form,
            period_end,
        }
    }

    /// Calendar year of the period-end date.
    #[must_use]
    pub fn period_year(&self) -> i32 {
        self.period_end.year()
    }

    /// Column label for this filing's period, formatted `DD_MM_YYYY`.
    #[must_use]
    pub fn date_label(&self) -> String {
        self.period_end.format("%d_%m_%Y").to_string()
    }
}

/// Which financial statement a reported tag belongs to.
///
/// The short codes (BS, IS, ...) match the statement identifiers used in the
/// SEC financial statement data sets and appear in exported tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// Balance sheet (BS).
    BalanceSheet,
    /// Cash flow statement (CF).
    CashFlow,
    /// Statement of comprehensive income (CI).
    ComprehensiveIncome,
    /// Cover page (CP).
    CoverPage,
    /// Statement of equity (EQ).
    Equity,
    /// Income statement (IS).
    IncomeStatement,
    /// Supplemental information (SI).
    SupplementalInfo,
    /// Unclassified (UN).
    Unclassified,
}

impl StatementKind {
    /// Returns the two-letter statement code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "BS",
            Self::CashFlow => "CF",
            Self::ComprehensiveIncome => "CI",
            Self::CoverPage => "CP",
            Self::Equity => "EQ",
            Self::IncomeStatement => "IS",
            Self::SupplementalInfo => "SI",
            Self::Unclassified => "UN",
        }
    }

    /// Parses a two-letter statement code.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "BS" => Self::BalanceSheet,
            "CF" => Self::CashFlow,
            "CI" => Self::ComprehensiveIncome,
            "CP" => Self::CoverPage,
            "EQ" => Self::Equity,
            "IS" => Self::IncomeStatement,
            "SI" => Self::SupplementalInfo,
            _ => Self::Unclassified,
        }
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Row identity in a consolidated table: a taxonomy tag paired with the
/// statement it was reported on.
///
/// The same tag reported under different statement kinds produces distinct
/// keys, and therefore distinct rows.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LineItemKey {
    /// Taxonomy tag naming the line item (e.g. "Revenues").
    pub tag: String,
    /// Statement the tag was reported on.
    pub statement: StatementKind,
}

impl LineItemKey {
    /// Creates a new line-item key.
    #[must_use]
    pub fn new(tag: impl Into<String>, statement: StatementKind) -> Self {
        Self {
            tag: tag.into(),
            statement,
        }
    }
}

impl fmt::Display for LineItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.tag, self.statement)
    }
}

/// A single reported fact within one filing's reporting period.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawFact {
    /// Taxonomy tag.
    pub tag: String,
    /// Unit of measure (USD, shares, pure).
    pub unit: String,
    /// Reported value.
    pub value: f64,
    /// Start of the fact's duration, absent for instantaneous facts.
    pub start: Option<NaiveDate>,
    /// End of the fact's period.
    pub end: NaiveDate,
}

/// Raw filing content restricted to one reporting period.
///
/// Produced by a [`ReportCollector`](crate::source::ReportCollector) and
/// consumed by a [`StatementPresenter`](crate::source::StatementPresenter).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawFiling {
    /// Accession number of the originating submission.
    pub accession: AccessionNumber,
    /// Period-end date the facts are restricted to.
    pub period_end: NaiveDate,
    /// Facts reported for that period.
    pub facts: Vec<RawFact>,
}

/// One presented row: a line-item key with its candidate values.
///
/// Candidate order is the column position in the presented statement; a
/// statement can present the same period through more than one reporting
/// context, yielding multiple candidates for one key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatementRow {
    /// Identity of the line item.
    pub key: LineItemKey,
    /// Candidate values, ordered by column position.
    pub candidates: Vec<Option<f64>>,
}

/// A filing's statement table as presented: rows keyed by line item, with
/// one or more candidate value columns.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PresentedStatement {
    /// Presented rows.
    pub rows: Vec<StatementRow>,
}

impl PresentedStatement {
    /// Creates a presented statement from rows.
    #[must_use]
    pub const fn new(rows: Vec<StatementRow>) -> Self {
        Self { rows }
    }
}

/// One candidate company returned by a name lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyMatch {
    /// The company's CIK.
    pub cik: Cik,
    /// Registered company name.
    pub name: String,
    /// Ticker symbol, when known.
    pub ticker: Option<String>,
}
