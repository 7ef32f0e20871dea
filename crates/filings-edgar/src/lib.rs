#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/filings-rs/filings/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! SEC EDGAR implementation of the filing-consolidation collaborator traits.
//!
//! This crate talks to three EDGAR endpoints:
//!
//! - the company tickers file, for resolving names to CIKs
//! - the submissions API, for a company's filing history
//! - the company facts API, for the XBRL facts behind each filing
//!
//! # Example
//!
//! ```no_run
//! use filings_edgar::EdgarClient;
//! use filings_core::{Cik, FilingIndex};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EdgarClient::new("MyApp/1.0 (contact@example.com)");
//!
//!     let matches = client.find_company("Apple Inc").await?;
//!     for m in &matches {
//!         println!("{}: {}", m.cik, m.name);
//!     }
//!
//!     let filings = client.company_filings(&Cik::new("320193")).await?;
//!     println!("{} filings on record", filings.len());
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, warn};

use filings_core::{
    AccessionNumber, Cik, CompanyMatch, Filing, FilingIndex, FilingsError, FormKind, LineItemKey,
    PresentedStatement, RawFact, RawFiling, ReportCollector, Result, StatementKind,
    StatementPresenter, StatementRow,
};

/// SEC EDGAR API base URL
const EDGAR_BASE_URL: &str = "https://data.sec.gov";

/// SEC company tickers URL
const COMPANY_TICKERS_URL: &str = "https://www.sec.gov/files/company_tickers.json";

/// Default rate limit: 10 requests per second (SEC requirement)
const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(100);

/// Unit preference when a tag reports in more than one unit.
const UNIT_PREFERENCE: [&str; 3] = ["USD", "shares", "pure"];

/// Rate limiter to ensure we don't exceed SEC's rate limits
#[derive(Debug)]
struct RateLimiter {
    last_request: Instant,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            last_request: Instant::now() - min_interval,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        let elapsed = self.last_request.elapsed();
        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }
        self.last_request = Instant::now();
    }
}

/// SEC EDGAR client.
///
/// Implements [`FilingIndex`], [`ReportCollector`], and
/// [`StatementPresenter`] over the EDGAR JSON APIs. Company facts are
/// fetched once per CIK and memoized, since one response covers every
/// filing of the company.
#[derive(Debug)]
pub struct EdgarClient {
    client: reqwest::Client,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    facts_cache: Mutex<HashMap<Cik, Arc<CompanyFacts>>>,
}

impl EdgarClient {
    /// Creates a new EDGAR client with the specified user agent.
    ///
    /// The SEC requires identifying user agent headers. Format should be:
    /// "AppName/Version (contact@email.com)"
    pub fn new(user_agent: &str) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self::with_client(client)
    }

    /// Creates a new EDGAR client with a custom HTTP client.
    ///
    /// The client must already carry an identifying user agent.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(DEFAULT_RATE_LIMIT))),
            facts_cache: Mutex::new(HashMap::new()),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.rate_limiter.lock().await.wait().await;

        debug!(url, "Fetching from SEC EDGAR");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FilingsError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FilingsError::Network(format!(
                "Request to {} failed: HTTP {}",
                url,
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| FilingsError::Parse(format!("Failed to parse {}: {}", url, e)))
    }

    /// Fetches company facts for a CIK, memoizing the response.
    async fn company_facts(&self, cik: &Cik) -> Result<Arc<CompanyFacts>> {
        {
            let cache = self.facts_cache.lock().await;
            if let Some(facts) = cache.get(cik) {
                debug!(cik = %cik, "Company facts cache hit");
                return Ok(facts.clone());
            }
        }

        let url = format!("{}/api/xbrl/companyfacts/CIK{}.json", EDGAR_BASE_URL, cik);
        let facts: CompanyFacts = self.get_json(&url).await?;
        let facts = Arc::new(facts);

        let mut cache = self.facts_cache.lock().await;
        cache.insert(cik.clone(), facts.clone());
        Ok(facts)
    }
}

#[async_trait]
impl FilingIndex for EdgarClient {
    async fn company_filings(&self, cik: &Cik) -> Result<Vec<Filing>> {
        let url = format!("{}/submissions/CIK{}.json", EDGAR_BASE_URL, cik);
        let submissions: CompanySubmissions = self.get_json(&url).await?;

        let filings = submissions.filings.recent.into_filings();
        debug!(cik = %cik, count = filings.len(), "Fetched filing index");
        Ok(filings)
    }

    async fn find_company(&self, name: &str) -> Result<Vec<CompanyMatch>> {
        if name.trim().is_empty() {
            return Err(FilingsError::InvalidParameter(
                "Empty company name".to_string(),
            ));
        }

        let tickers: HashMap<String, CompanyTickerEntry> =
            self.get_json(COMPANY_TICKERS_URL).await?;

        let needle = name.to_uppercase();
        let mut matches: Vec<CompanyMatch> = tickers
            .values()
            .filter(|entry| entry.title.to_uppercase().contains(&needle))
            .map(|entry| CompanyMatch {
                cik: Cik::from(entry.cik_str),
                name: entry.title.clone(),
                ticker: Some(entry.ticker.clone()),
            })
            .collect();

        // The ticker file is unordered; make resolution deterministic.
        matches.sort_by(|a, b| a.cik.as_str().cmp(b.cik.as_str()));
        matches.dedup_by(|a, b| a.cik == b.cik);

        debug!(name, count = matches.len(), "Resolved company name");
        Ok(matches)
    }
}

#[async_trait]
impl ReportCollector for EdgarClient {
    async fn collect(&self, cik: &Cik, filing: &Filing) -> Result<RawFiling> {
        let facts = self.company_facts(cik).await?;

        let mut collected = Vec::new();
        for taxonomy_facts in facts.facts.values() {
            for (tag, tag_facts) in taxonomy_facts {
                let Some(units) = &tag_facts.units else {
                    continue;
                };
                for (unit, values) in units {
                    for value in values {
                        if value.accn.as_deref() == Some(filing.accession.as_str())
                            && parse_date(&value.end) == Some(filing.period_end)
                        {
                            collected.push(RawFact {
                                tag: tag.clone(),
                                unit: unit.clone(),
                                value: value.val,
                                start: value.start.as_deref().and_then(parse_date),
                                end: filing.period_end,
                            });
                        }
                    }
                }
            }
        }

        if collected.is_empty() {
            warn!(
                accession = %filing.accession,
                "No facts reported for filing period"
            );
        }

        Ok(RawFiling {
            accession: filing.accession.clone(),
            period_end: filing.period_end,
            facts: collected,
        })
    }
}

impl StatementPresenter for EdgarClient {
    fn present(&self, raw: &RawFiling) -> Result<PresentedStatement> {
        Ok(present_facts(raw))
    }
}

/// Builds a presented statement from one filing's raw facts.
///
/// Facts are grouped by tag, the preferred unit is kept per tag, and the
/// surviving reporting contexts become candidate columns ordered by duration
/// start: the year-to-date context first, the standalone (most specific)
/// context last. Instantaneous facts form a single context.
fn present_facts(raw: &RawFiling) -> PresentedStatement {
    let mut by_tag: HashMap<&str, Vec<&RawFact>> = HashMap::new();
    let mut tag_order: Vec<&str> = Vec::new();
    for fact in &raw.facts {
        let entry = by_tag.entry(fact.tag.as_str()).or_default();
        if entry.is_empty() {
            tag_order.push(fact.tag.as_str());
        }
        entry.push(fact);
    }

    let mut rows = Vec::with_capacity(tag_order.len());
    for tag in tag_order {
        let Some(facts) = by_tag.get(tag) else {
            continue;
        };

        let unit = preferred_unit(facts);
        let mut contexts: Vec<&RawFact> =
            facts.iter().filter(|f| f.unit == unit).copied().collect();
        contexts.sort_by_key(|f| f.start);
        contexts.dedup_by_key(|f| f.start);

        rows.push(StatementRow {
            key: LineItemKey::new(tag, statement_kind_for_tag(tag)),
            candidates: contexts.iter().map(|f| Some(f.value)).collect(),
        });
    }

    PresentedStatement::new(rows)
}

/// Picks the unit to present for a tag: USD, then shares, then pure, then
/// whatever the filing used.
fn preferred_unit(facts: &[&RawFact]) -> String {
    for unit in UNIT_PREFERENCE {
        if facts.iter().any(|f| f.unit == unit) {
            return unit.to_string();
        }
    }
    facts.first().map(|f| f.unit.clone()).unwrap_or_default()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

// =============================================================================
// Statement classification
// =============================================================================

/// Classifies a US-GAAP tag into the statement it is conventionally
/// reported on.
///
/// Covers the common tags directly; everything else falls back to prefix
/// heuristics and finally [`StatementKind::Unclassified`].
#[must_use]
pub fn statement_kind_for_tag(tag: &str) -> StatementKind {
    match tag {
        // Balance sheet
        "Assets"
        | "AssetsCurrent"
        | "Cash"
        | "CashAndCashEquivalentsAtCarryingValue"
        | "CashCashEquivalentsAndShortTermInvestments"
        | "InventoryNet"
        | "Inventories"
        | "AccountsReceivableNetCurrent"
        | "AccountsReceivableNet"
        | "ReceivablesNetCurrent"
        | "Liabilities"
        | "LiabilitiesCurrent"
        | "LiabilitiesAndStockholdersEquity"
        | "LongTermDebt"
        | "LongTermDebtNoncurrent"
        | "LongTermDebtAndCapitalLeaseObligations"
        | "ShortTermBorrowings"
        | "DebtCurrent"
        | "AccountsPayableCurrent"
        | "AccountsPayableAndAccruedLiabilitiesCurrent"
        | "StockholdersEquity"
        | "StockholdersEquityIncludingPortionAttributableToNoncontrollingInterest"
        | "CommonStockSharesOutstanding"
        | "CommonStockSharesIssued" => StatementKind::BalanceSheet,

        // Income statement
        "Revenues"
        | "RevenueFromContractWithCustomerExcludingAssessedTax"
        | "RevenueFromContractWithCustomerIncludingAssessedTax"
        | "SalesRevenueNet"
        | "CostOfRevenue"
        | "CostOfGoodsAndServicesSold"
        | "CostOfGoodsSold"
        | "GrossProfit"
        | "OperatingExpenses"
        | "OperatingIncomeLoss"
        | "NetIncomeLoss"
        | "ProfitLoss"
        | "NetIncomeLossAvailableToCommonStockholdersBasic"
        | "EarningsPerShareBasic"
        | "EarningsPerShareDiluted"
        | "InterestExpense"
        | "WeightedAverageNumberOfSharesOutstandingBasic"
        | "WeightedAverageNumberOfDilutedSharesOutstanding" => StatementKind::IncomeStatement,

        // Cash flow
        "NetCashProvidedByUsedInOperatingActivities"
        | "CashProvidedByUsedInOperatingActivities"
        | "NetCashProvidedByUsedInInvestingActivities"
        | "NetCashProvidedByUsedInFinancingActivities"
        | "PaymentsToAcquirePropertyPlantAndEquipment"
        | "PaymentsForCapitalImprovements"
        | "PaymentsOfDividends"
        | "PaymentsOfDividendsCommonStock" => StatementKind::CashFlow,

        // Comprehensive income
        "ComprehensiveIncomeNetOfTax"
        | "OtherComprehensiveIncomeLossNetOfTax" => StatementKind::ComprehensiveIncome,

        // Cover page (dei taxonomy)
        "EntityCommonStockSharesOutstanding" | "EntityPublicFloat" => StatementKind::CoverPage,

        _ => {
            if tag.starts_with("PaymentsTo")
                || tag.starts_with("PaymentsOf")
                || tag.starts_with("PaymentsFor")
                || tag.starts_with("ProceedsFrom")
                || tag.starts_with("NetCashProvidedBy")
            {
                StatementKind::CashFlow
            } else if tag.starts_with("ComprehensiveIncome")
                || tag.starts_with("OtherComprehensiveIncome")
            {
                StatementKind::ComprehensiveIncome
            } else {
                StatementKind::Unclassified
            }
        }
    }
}

// =============================================================================
// SEC API Response Types
// =============================================================================

/// Company ticker information from SEC JSON.
#[derive(Debug, Deserialize)]
struct CompanyTickerEntry {
    /// CIK as a number (SEC returns this as an integer)
    cik_str: u64,
    /// Ticker symbol
    ticker: String,
    /// Company name
    title: String,
}

/// Company submissions/filings metadata.
#[derive(Debug, Deserialize)]
struct CompanySubmissions {
    filings: SubmissionFilings,
}

#[derive(Debug, Deserialize)]
struct SubmissionFilings {
    recent: RecentFilings,
}

/// Columnar filing arrays from the submissions API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecentFilings {
    accession_number: Vec<String>,
    form: Vec<String>,
    report_date: Vec<String>,
}

impl RecentFilings {
    /// Zips the columnar arrays into filing records.
    ///
    /// Rows without a report date (e.g. registration statements) are skipped.
    fn into_filings(self) -> Vec<Filing> {
        self.accession_number
            .into_iter()
            .zip(self.form)
            .zip(self.report_date)
            .filter_map(|((accession, form), report_date)| {
                let period_end = parse_date(&report_date)?;
                Some(Filing::new(
                    AccessionNumber::new(accession),
                    FormKind::parse(&form),
                    period_end,
                ))
            })
            .collect()
    }
}

/// Response from the SEC EDGAR Company Facts API.
#[derive(Debug, Deserialize)]
struct CompanyFacts {
    /// Facts organized by taxonomy and tag
    facts: HashMap<String, HashMap<String, TagFacts>>,
}

/// Facts for a specific XBRL tag.
#[derive(Debug, Deserialize)]
struct TagFacts {
    /// Units (USD, shares, etc.) containing the actual fact values
    units: Option<HashMap<String, Vec<FactValue>>>,
}

/// A single fact value with metadata.
#[derive(Debug, Clone, Deserialize)]
struct FactValue {
    /// End date of the period
    end: String,
    /// Value
    val: f64,
    /// Start date of the period, absent for instantaneous facts
    #[serde(default)]
    start: Option<String>,
    /// Accession number
    #[serde(default)]
    accn: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================
