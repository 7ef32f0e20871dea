//! Per-company consolidation control flow.
//!
//! The pipeline obtains a company's filing list, keeps only complete fiscal
//! years, and for each qualifying filing in ascending period order retrieves
//! the presented statement, resolves candidate values, and merges the result
//! into the company's table.

use std::sync::Arc;
use tracing::debug;

use filings_core::{
    Cik, CompanyMatch, FilingIndex, FilingsError, LineItemKey, ReportCollector, Result,
    StatementPresenter,
};

use crate::completeness::filter_complete_years;
use crate::select;
use crate::table::{ConsolidatedTable, FilingConsolidator};

/// One company under consolidation: its identifier and the table it owns.
///
/// The table is created at registration, mutated only through merges, and
/// handed to serialization at the end of a run.
#[derive(Clone, Debug)]
pub struct Company {
    cik: Cik,
    consolidator: FilingConsolidator,
}

impl Company {
    /// Registers a company with an empty consolidated table.
    #[must_use]
    pub fn new(cik: Cik) -> Self {
        Self {
            cik,
            consolidator: FilingConsolidator::new(),
        }
    }

    /// The company's CIK.
    #[must_use]
    pub const fn cik(&self) -> &Cik {
        &self.cik
    }

    /// Merges one filing's resolved line items into the owned table.
    pub fn merge(&mut self, items: &[(LineItemKey, Option<f64>)], date_label: &str) {
        self.consolidator.merge(items, date_label);
    }

    /// Borrows the consolidated table.
    #[must_use]
    pub const fn table(&self) -> &ConsolidatedTable {
        self.consolidator.table()
    }

    /// Consumes the company, handing its table to serialization.
    #[must_use]
    pub fn into_table(self) -> ConsolidatedTable {
        self.consolidator.export()
    }
}

/// Drives consolidation for companies against a set of data sources.
///
/// The pipeline is strictly sequential: collaborators are awaited one filing
/// at a time, in ascending period order. A retrieval or presentation failure
/// is fatal to the run and propagates; the company's table keeps whatever
/// merges completed before the failure.
#[derive(Clone, Debug)]
pub struct ConsolidationPipeline {
    index: Arc<dyn FilingIndex>,
    collector: Arc<dyn ReportCollector>,
    presenter: Arc<dyn StatementPresenter>,
}

impl ConsolidationPipeline {
    /// Creates a pipeline over the given collaborators.
    #[must_use]
    pub fn new(
        index: Arc<dyn FilingIndex>,
        collector: Arc<dyn ReportCollector>,
        presenter: Arc<dyn StatementPresenter>,
    ) -> Self {
        Self {
            index,
            collector,
            presenter,
        }
    }

    /// Resolves a free-text company name to a single match.
    ///
    /// Zero matches fail with [`FilingsError::CompanyNotFound`]. A unique
    /// match is returned directly. Multiple matches are handed to `choose`,
    /// an injected selection strategy; declining (or selecting out of range)
    /// fails with [`FilingsError::AmbiguousCompany`].
    pub async fn resolve_company<F>(&self, name: &str, choose: F) -> Result<CompanyMatch>
    where
        F: FnOnce(&[CompanyMatch]) -> Option<usize>,
    {
        let matches = self.index.find_company(name).await?;
        match matches.as_slice() {
            [] => Err(FilingsError::CompanyNotFound(name.to_string())),
            [unique] => Ok(unique.clone()),
            candidates => {
                debug!(name, matches = candidates.len(), "Company name is ambiguous");
                choose(candidates)
                    .and_then(|i| candidates.get(i).cloned())
                    .ok_or_else(|| FilingsError::AmbiguousCompany {
                        name: name.to_string(),
                        matches: candidates.len(),
                    })
            }
        }
    }

    /// Consolidates every complete-year filing of `company` into its table.
    pub async fn consolidate(&self, company: &mut Company) -> Result<()> {
        let filings = self.index.company_filings(company.cik()).await?;
        let complete = filter_complete_years(&filings);
        debug!(
            cik = %company.cik(),
            available = filings.len(),
            complete = complete.len(),
            "Consolidating filings"
        );

        for filing in &complete {
            let raw = self.collector.collect(company.cik(), filing).await?;
            let statement = self.presenter.present(&raw)?;
            let items: Vec<(LineItemKey, Option<f64>)> = statement
                .rows
                .iter()
                .map(|row| (row.key.clone(), select::resolve(&row.candidates)))
                .collect();
            company.merge(&items, &filing.date_label());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use filings_core::{
        AccessionNumber, Filing, FormKind, PresentedStatement, RawFiling, StatementKind,
        StatementRow,
    };
    use std::collections::HashMap;

    /// Test double serving a canned filing list and canned statements.
    #[derive(Debug, Default)]
    struct FakeSource {
        matches: Vec<CompanyMatch>,
        filings: Vec<Filing>,
        statements: HashMap<AccessionNumber, PresentedStatement>,
        fail_on: Option<AccessionNumber>,
    }

    #[async_trait]
    impl FilingIndex for FakeSource {
        async fn company_filings(&self, _cik: &Cik) -> Result<Vec<Filing>> {
            Ok(self.filings.clone())
        }

        async fn find_company(&self, _name: &str) -> Result<Vec<CompanyMatch>> {
            Ok(self.matches.clone())
        }
    }

    #[async_trait]
    impl ReportCollector for FakeSource {
        async fn collect(&self, _cik: &Cik, filing: &Filing) -> Result<RawFiling> {
            if self.fail_on.as_ref() == Some(&filing.accession) {
                return Err(FilingsError::FilingNotFound(filing.accession.to_string()));
            }
            Ok(RawFiling {
                accession: filing.accession.clone(),
                period_end: filing.period_end,
                facts: Vec::new(),
            })
        }
    }

    impl StatementPresenter for FakeSource {
        fn present(&self, raw: &RawFiling) -> Result<PresentedStatement> {
            Ok(self
                .statements
                .get(&raw.accession)
                .cloned()
                .unwrap_or_default())
        }
    }

    fn filing(accession: &str, form: FormKind, y: i32, m: u32, d: u32) -> Filing {
        Filing::new(
            AccessionNumber::new(accession),
            form,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    fn revenue_row(candidates: Vec<Option<f64>>) -> StatementRow {
        StatementRow {
            key: LineItemKey::new("Revenues", StatementKind::IncomeStatement),
            candidates,
        }
    }

    fn complete_2022() -> Vec<Filing> {
        vec![
            filing("q1", FormKind::QuarterlyReport, 2022, 3, 31),
            filing("q2", FormKind::QuarterlyReport, 2022, 6, 30),
            filing("q3", FormKind::QuarterlyReport, 2022, 9, 30),
            filing("k", FormKind::AnnualReport, 2022, 12, 31),
        ]
    }

    fn pipeline_over(source: FakeSource) -> ConsolidationPipeline {
        let source = Arc::new(source);
        ConsolidationPipeline::new(source.clone(), source.clone(), source)
    }

    #[tokio::test]
    async fn consolidates_only_complete_years_in_order() {
        let mut filings = complete_2022();
        filings.push(filing("q1-23", FormKind::QuarterlyReport, 2023, 3, 31));

        let mut statements = HashMap::new();
        statements.insert(
            AccessionNumber::new("q1"),
            PresentedStatement::new(vec![revenue_row(vec![Some(10.0)])]),
        );
        // Two contexts: the later, more specific one must win.
        statements.insert(
            AccessionNumber::new("q2"),
            PresentedStatement::new(vec![revenue_row(vec![Some(25.0), Some(15.0)])]),
        );
        statements.insert(
            AccessionNumber::new("q3"),
            PresentedStatement::new(vec![revenue_row(vec![Some(45.0), Some(20.0), Some(1.0)])]),
        );
        statements.insert(
            AccessionNumber::new("k"),
            PresentedStatement::new(vec![revenue_row(vec![Some(60.0)])]),
        );

        let pipeline = pipeline_over(FakeSource {
            filings,
            statements,
            ..Default::default()
        });

        let mut company = Company::new(Cik::new("320193"));
        pipeline.consolidate(&mut company).await.unwrap();

        let table = company.into_table();
        assert_eq!(
            table.date_labels(),
            ["31_03_2022", "30_06_2022", "30_09_2022", "31_12_2022"]
        );

        let revenue = LineItemKey::new("Revenues", StatementKind::IncomeStatement);
        assert_eq!(table.value(&revenue, "31_03_2022"), Some(10.0));
        assert_eq!(table.value(&revenue, "30_06_2022"), Some(15.0));
        // Three candidates resolve to absence.
        assert_eq!(table.value(&revenue, "30_09_2022"), None);
        assert_eq!(table.value(&revenue, "31_12_2022"), Some(60.0));
    }

    #[tokio::test]
    async fn retrieval_failure_is_fatal_but_keeps_prior_merges() {
        let pipeline = pipeline_over(FakeSource {
            filings: complete_2022(),
            fail_on: Some(AccessionNumber::new("q3")),
            ..Default::default()
        });

        let mut company = Company::new(Cik::new("320193"));
        let err = pipeline.consolidate(&mut company).await.unwrap_err();
        assert!(matches!(err, FilingsError::FilingNotFound(_)));

        // q1 and q2 merged before the failure; no rollback.
        assert_eq!(company.table().date_labels(), ["31_03_2022", "30_06_2022"]);
    }

    fn company_match(cik: &str, name: &str) -> CompanyMatch {
        CompanyMatch {
            cik: Cik::new(cik),
            name: name.to_string(),
            ticker: None,
        }
    }

    #[tokio::test]
    async fn resolve_company_unique_match() {
        let pipeline = pipeline_over(FakeSource {
            matches: vec![company_match("320193", "Apple Inc")],
            ..Default::default()
        });

        let resolved = pipeline
            .resolve_company("Apple", |_| panic!("no selection needed"))
            .await
            .unwrap();
        assert_eq!(resolved.cik, Cik::new("320193"));
    }

    #[tokio::test]
    async fn resolve_company_no_match() {
        let pipeline = pipeline_over(FakeSource::default());
        let err = pipeline.resolve_company("Nowhere Corp", |_| None).await.unwrap_err();
        assert!(matches!(err, FilingsError::CompanyNotFound(_)));
    }

    #[tokio::test]
    async fn resolve_company_uses_injected_selection() {
        let source = FakeSource {
            matches: vec![
                company_match("1", "Alpha Holdings"),
                company_match("2", "Alpha Industries"),
            ],
            ..Default::default()
        };
        let pipeline = pipeline_over(source);

        let resolved = pipeline
            .resolve_company("Alpha", |candidates| {
                assert_eq!(candidates.len(), 2);
                Some(1)
            })
            .await
            .unwrap();
        assert_eq!(resolved.name, "Alpha Industries");

        let err = pipeline.resolve_company("Alpha", |_| None).await.unwrap_err();
        assert!(matches!(
            err,
            FilingsError::AmbiguousCompany { matches: 2, .. }
        ));
    }
}
