use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FinboardError;
use crate::fixture::FinancialRecord;
use crate::types::{Money, Scenario};
use crate::FinboardResult;

/// An inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn new(start: NaiveDate, end: NaiveDate) -> FinboardResult<Period> {
        if end < start {
            return Err(FinboardError::DateError(format!(
                "Period end {} precedes start {}",
                end, start
            )));
        }
        Ok(Period { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The same range shifted back 12 calendar months, for prior-year
    /// comparisons. Month-end clamping follows chrono (Mar 31 -> Mar 31,
    /// Feb 29 -> Feb 28 on non-leap years).
    pub fn prior_year(&self) -> Period {
        let shift = Months::new(12);
        Period {
            start: self
                .start
                .checked_sub_months(shift)
                .unwrap_or(self.start),
            end: self.end.checked_sub_months(shift).unwrap_or(self.end),
        }
    }
}

/// Select records by period, scenario, and optional business unit.
/// Pure; an empty result is not an error.
pub fn filter_records<'a>(
    records: &'a [FinancialRecord],
    period: Period,
    scenario: Scenario,
    business_unit: Option<&str>,
) -> Vec<&'a FinancialRecord> {
    records
        .iter()
        .filter(|r| r.scenario == scenario)
        .filter(|r| period.contains(r.date))
        .filter(|r| match business_unit {
            Some(bu) => r.business_unit == bu,
            None => true,
        })
        .collect()
}

/// Sum of a filtered slice. Zero when empty — missing data never signals.
pub fn sum_records(records: &[&FinancialRecord]) -> Money {
    records.iter().map(|r| r.amount).sum::<Decimal>()
}

/// Filter-and-sum in one pass; the shape every aggregate query uses.
pub fn sum_filtered(
    records: &[FinancialRecord],
    period: Period,
    scenario: Scenario,
    business_unit: Option<&str>,
) -> Money {
    records
        .iter()
        .filter(|r| r.scenario == scenario)
        .filter(|r| period.contains(r.date))
        .filter(|r| match business_unit {
            Some(bu) => r.business_unit == bu,
            None => true,
        })
        .map(|r| r.amount)
        .sum::<Decimal>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn record(d: &str, scenario: Scenario, bu: &str, amount: Decimal) -> FinancialRecord {
        FinancialRecord {
            date: date(d),
            scenario,
            business_unit: bu.to_string(),
            category: "Subscriptions".to_string(),
            subcategory: None,
            amount,
        }
    }

    fn sample() -> Vec<FinancialRecord> {
        vec![
            record("2025-01-31", Scenario::Actual, "EMEA", dec!(100)),
            record("2025-02-28", Scenario::Actual, "EMEA", dec!(110)),
            record("2025-01-31", Scenario::Actual, "NA", dec!(200)),
            record("2025-01-31", Scenario::BudgetBase, "EMEA", dec!(90)),
            record("2024-01-31", Scenario::Actual, "EMEA", dec!(80)),
        ]
    }

    #[test]
    fn test_period_rejects_inverted_range() {
        assert!(Period::new(date("2025-03-01"), date("2025-01-01")).is_err());
    }

    #[test]
    fn test_period_bounds_inclusive() {
        let p = Period::new(date("2025-01-01"), date("2025-01-31")).unwrap();
        assert!(p.contains(date("2025-01-01")));
        assert!(p.contains(date("2025-01-31")));
        assert!(!p.contains(date("2025-02-01")));
    }

    #[test]
    fn test_filter_by_scenario_and_period() {
        let records = sample();
        let p = Period::new(date("2025-01-01"), date("2025-01-31")).unwrap();
        let hits = filter_records(&records, p, Scenario::Actual, None);
        // EMEA Jan + NA Jan; excludes Feb, budget, and prior year
        assert_eq!(hits.len(), 2);
        assert_eq!(sum_records(&hits), dec!(300));
    }

    #[test]
    fn test_filter_by_business_unit() {
        let records = sample();
        let p = Period::new(date("2025-01-01"), date("2025-12-31")).unwrap();
        let hits = filter_records(&records, p, Scenario::Actual, Some("EMEA"));
        assert_eq!(hits.len(), 2);
        assert_eq!(sum_records(&hits), dec!(210));
    }

    #[test]
    fn test_no_match_returns_empty_not_error() {
        let records = sample();
        let p = Period::new(date("2030-01-01"), date("2030-12-31")).unwrap();
        let hits = filter_records(&records, p, Scenario::Actual, Some("APAC"));
        assert!(hits.is_empty());
        assert_eq!(sum_records(&hits), dec!(0));
    }

    #[test]
    fn test_prior_year_shift() {
        let p = Period::new(date("2025-01-01"), date("2025-03-31")).unwrap();
        let py = p.prior_year();
        assert_eq!(py.start, date("2024-01-01"));
        assert_eq!(py.end, date("2024-03-31"));
    }

    #[test]
    fn test_prior_year_clamps_month_end() {
        // Feb 29 2024 has no 2023 counterpart; chrono clamps to Feb 28.
        let p = Period::new(date("2024-02-01"), date("2024-02-29")).unwrap();
        let py = p.prior_year();
        assert_eq!(py.end, date("2023-02-28"));
    }

    #[test]
    fn test_sum_filtered_matches_filter_then_sum() {
        let records = sample();
        let p = Period::new(date("2025-01-01"), date("2025-12-31")).unwrap();
        let hits = filter_records(&records, p, Scenario::Actual, None);
        assert_eq!(
            sum_filtered(&records, p, Scenario::Actual, None),
            sum_records(&hits)
        );
    }
}
