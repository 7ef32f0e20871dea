//! Fiscal-year completeness filtering.
//!
//! A calendar year is complete when the company filed exactly one annual
//! report and exactly three quarterly reports for it. Only filings from
//! complete years participate in consolidation.

use std::collections::HashMap;
use tracing::debug;

use filings_core::Filing;

/// Per-year filing counts.
#[derive(Debug, Default, Clone, Copy)]
struct YearCounts {
    annual: usize,
    quarterly: usize,
}

impl YearCounts {
    /// Exactly one 10-K equivalent and exactly three 10-Q equivalents.
    const fn is_complete(self) -> bool {
        self.annual == 1 && self.quarterly == 3
    }
}

/// Filters a company's filings down to complete fiscal years.
///
/// Filings are grouped by the calendar year of their period-end date. Years
/// failing the exact-count predicate are excluded entirely; there is no
/// partial inclusion of the valid filings within an incomplete year.
/// Duplicate submissions for the same slot (e.g. an amended resubmission
/// carried as a separate 10-K) push the count past the limit and exclude
/// the year. Filings of other form kinds are dropped regardless of year.
///
/// The result is sorted ascending by period-end date; the merge downstream
/// relies on chronological order.
#[must_use]
pub fn filter_complete_years(filings: &[Filing]) -> Vec<Filing> {
    let mut counts: HashMap<i32, YearCounts> = HashMap::new();
    for filing in filings {
        let entry = counts.entry(filing.period_year()).or_default();
        if filing.form.is_annual() {
            entry.annual += 1;
        } else if filing.form.is_quarterly() {
            entry.quarterly += 1;
        }
    }

    let mut complete: Vec<Filing> = filings
        .iter()
        .filter(|f| f.form.is_annual() || f.form.is_quarterly())
        .filter(|f| {
            counts
                .get(&f.period_year())
                .is_some_and(|c| c.is_complete())
        })
        .cloned()
        .collect();

    complete.sort_by_key(|f| f.period_end);

    debug!(
        total = filings.len(),
        complete = complete.len(),
        "Filtered filings to complete fiscal years"
    );

    complete
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use filings_core::{AccessionNumber, FormKind};

    fn filing(accession: &str, form: FormKind, y: i32, m: u32, d: u32) -> Filing {
        Filing::new(
            AccessionNumber::new(accession),
            form,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        )
    }

    fn year_2022() -> Vec<Filing> {
        vec![
            filing("q1-22", FormKind::QuarterlyReport, 2022, 3, 31),
            filing("q2-22", FormKind::QuarterlyReport, 2022, 6, 30),
            filing("q3-22", FormKind::QuarterlyReport, 2022, 9, 30),
            filing("k-22", FormKind::AnnualReport, 2022, 12, 31),
        ]
    }

    #[test]
    fn complete_year_is_kept_sorted_by_period() {
        let mut filings = year_2022();
        filings.reverse();
        let result = filter_complete_years(&filings);
        assert_eq!(result.len(), 4);
        let periods: Vec<_> = result.iter().map(|f| f.period_end).collect();
        let mut sorted = periods.clone();
        sorted.sort();
        assert_eq!(periods, sorted);
    }

    #[test]
    fn four_quarterlies_exclude_the_year_entirely() {
        let mut filings = year_2022();
        filings.push(filing("q4-22", FormKind::QuarterlyReport, 2022, 12, 31));
        assert!(filter_complete_years(&filings).is_empty());
    }

    #[test]
    fn duplicate_annual_excludes_the_year() {
        let mut filings = year_2022();
        filings.push(filing("k-22-bis", FormKind::AnnualReport, 2022, 12, 31));
        assert!(filter_complete_years(&filings).is_empty());
    }

    #[test]
    fn missing_annual_excludes_the_year() {
        let filings: Vec<_> = year_2022()
            .into_iter()
            .filter(|f| f.form.is_quarterly())
            .collect();
        assert!(filter_complete_years(&filings).is_empty());
    }

    #[test]
    fn other_form_kinds_are_dropped_without_breaking_completeness() {
        let mut filings = year_2022();
        filings.push(filing("8k-22", FormKind::CurrentReport, 2022, 5, 2));
        filings.push(filing(
            "ka-22",
            FormKind::Other("10-K/A".to_string()),
            2022,
            12,
            31,
        ));
        let result = filter_complete_years(&filings);
        assert_eq!(result.len(), 4);
        assert!(
            result
                .iter()
                .all(|f| f.form.is_annual() || f.form.is_quarterly())
        );
    }

    #[test]
    fn incomplete_trailing_year_is_excluded() {
        let mut filings = year_2022();
        filings.push(filing("q1-23", FormKind::QuarterlyReport, 2023, 3, 31));
        let result = filter_complete_years(&filings);
        assert_eq!(result.len(), 4);
        assert!(result.iter().all(|f| f.period_year() == 2022));
    }
}
