use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::FinboardError;
use crate::types::{Money, Scenario};
use crate::FinboardResult;

/// A single dated financial record from the fixture. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub date: NaiveDate,
    pub scenario: Scenario,
    /// Business unit code, e.g. "EMEA", "NA"
    pub business_unit: String,
    /// Reporting category, e.g. "Subscriptions", "Payroll"
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Signed amount. Cost records carry negative amounts.
    pub amount: Money,
}

/// The raw fixture shape: one array per statement line group.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordStore {
    #[serde(default)]
    pub revenues: Vec<FinancialRecord>,
    #[serde(default)]
    pub cogs: Vec<FinancialRecord>,
    #[serde(default)]
    pub opex: Vec<FinancialRecord>,
    #[serde(default)]
    pub cash: Vec<FinancialRecord>,
    #[serde(default)]
    pub capex: Vec<FinancialRecord>,
    #[serde(default)]
    pub equity: Vec<FinancialRecord>,
}

impl RecordStore {
    /// Parse and validate a fixture from its JSON text.
    pub fn from_json(json: &str) -> FinboardResult<RecordStore> {
        let store: RecordStore = serde_json::from_str(json)
            .map_err(|e| FinboardError::FixtureError(format!("Failed to parse fixture: {}", e)))?;
        store.validate()?;
        Ok(store)
    }

    /// Load and validate a fixture from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> FinboardResult<RecordStore> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            FinboardError::FixtureError(format!("Failed to read '{}': {}", path.display(), e))
        })?;
        Self::from_json(&contents)
    }

    /// Enforce the sign convention the derived metrics depend on:
    /// GM = revenue + cogs and EBITDA = GM + opex only hold when cost
    /// records are stored negative.
    pub fn validate(&self) -> FinboardResult<()> {
        check_signs("revenues", &self.revenues, Sign::NonNegative)?;
        check_signs("cogs", &self.cogs, Sign::NonPositive)?;
        check_signs("opex", &self.opex, Sign::NonPositive)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.revenues.is_empty()
            && self.cogs.is_empty()
            && self.opex.is_empty()
            && self.cash.is_empty()
            && self.capex.is_empty()
            && self.equity.is_empty()
    }

    pub fn record_count(&self) -> usize {
        self.revenues.len()
            + self.cogs.len()
            + self.opex.len()
            + self.cash.len()
            + self.capex.len()
            + self.equity.len()
    }
}

enum Sign {
    NonNegative,
    NonPositive,
}

fn check_signs(field: &str, records: &[FinancialRecord], sign: Sign) -> FinboardResult<()> {
    for r in records {
        let ok = match sign {
            Sign::NonNegative => r.amount >= Decimal::ZERO,
            Sign::NonPositive => r.amount <= Decimal::ZERO,
        };
        if !ok {
            return Err(FinboardError::InvalidInput {
                field: field.to_string(),
                reason: format!(
                    "record {} / {} on {} has amount {} violating the stored sign convention",
                    r.business_unit, r.category, r.date, r.amount
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(date: &str, scenario: Scenario, bu: &str, cat: &str, amount: Decimal) -> FinancialRecord {
        FinancialRecord {
            date: date.parse().unwrap(),
            scenario,
            business_unit: bu.to_string(),
            category: cat.to_string(),
            subcategory: None,
            amount,
        }
    }

    #[test]
    fn test_parse_minimal_fixture() {
        let json = r#"{
            "revenues": [
                {"date": "2025-01-31", "scenario": "Actual",
                 "business_unit": "EMEA", "category": "Subscriptions",
                 "amount": "125000"}
            ],
            "cogs": [],
            "opex": []
        }"#;
        let store = RecordStore::from_json(json).unwrap();
        assert_eq!(store.revenues.len(), 1);
        assert_eq!(store.revenues[0].amount, dec!(125000));
        assert_eq!(store.revenues[0].scenario, Scenario::Actual);
    }

    #[test]
    fn test_budget_scenario_wire_names() {
        let json = r#"{
            "revenues": [
                {"date": "2025-01-31", "scenario": "Budget_Worst",
                 "business_unit": "NA", "category": "Services", "amount": "90000"}
            ]
        }"#;
        let store = RecordStore::from_json(json).unwrap();
        assert_eq!(store.revenues[0].scenario, Scenario::BudgetWorst);
    }

    #[test]
    fn test_positive_cogs_rejected() {
        let mut store = RecordStore::default();
        store
            .cogs
            .push(record("2025-01-31", Scenario::Actual, "NA", "Hosting", dec!(500)));
        let err = store.validate().unwrap_err();
        match err {
            FinboardError::InvalidInput { field, .. } => assert_eq!(field, "cogs"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_revenue_rejected() {
        let mut store = RecordStore::default();
        store
            .revenues
            .push(record("2025-02-28", Scenario::Actual, "NA", "Licences", dec!(-10)));
        assert!(store.validate().is_err());
    }

    #[test]
    fn test_missing_arrays_default_empty() {
        let store = RecordStore::from_json("{}").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.record_count(), 0);
    }

    #[test]
    fn test_unknown_scenario_is_parse_error() {
        let json = r#"{
            "revenues": [
                {"date": "2025-01-31", "scenario": "Forecast",
                 "business_unit": "NA", "category": "Services", "amount": "1"}
            ]
        }"#;
        assert!(RecordStore::from_json(json).is_err());
    }
}
