use chrono::NaiveDate;
use finboard_core::aggregate::{analyze_period, period_totals, PeriodQuery};
use finboard_core::cash::cash_walk;
use finboard_core::concentration::analyze_concentration;
use finboard_core::filter::Period;
use finboard_core::fixture::RecordStore;
use finboard_core::types::Scenario;
use finboard_core::waterfall::build_ebitda_bridge;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/company_financials.json")
}

fn load() -> RecordStore {
    RecordStore::from_file(fixture_path()).expect("checked-in fixture must load")
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn q1_2025() -> Period {
    Period::new(date("2025-01-01"), date("2025-03-31")).unwrap()
}

#[test]
fn test_fixture_loads_and_validates() {
    let store = load();
    assert!(!store.is_empty());
    assert!(store.record_count() > 50);
}

#[test]
fn test_january_actual_totals() {
    let store = load();
    let jan = Period::new(date("2025-01-01"), date("2025-01-31")).unwrap();
    let t = period_totals(&store, jan, Scenario::Actual, None);
    // 400k + 250k + 150k + 100k
    assert_eq!(t.revenue, dec!(900000));
    assert_eq!(t.cogs, dec!(-270000));
    assert_eq!(t.gross_margin, dec!(630000));
    assert_eq!(t.opex, dec!(-320000));
    assert_eq!(t.ebitda, dec!(310000));
}

#[test]
fn test_q1_analysis_against_base_budget() {
    let store = load();
    let query = PeriodQuery {
        period: q1_2025(),
        comparison_scenario: Scenario::BudgetBase,
        business_unit: None,
    };
    let out = analyze_period(&store, &query).unwrap();
    // Q1 actual revenue: 900k + 910k + 1,000k
    assert_eq!(out.result.actual.revenue, dec!(2810000));
    // Q1 base budget revenue: 880k + 900k + 940k
    assert_eq!(out.result.budget.revenue, dec!(2720000));
    // Q1 2024 actual revenue: 550k + 570k + 600k
    assert_eq!(out.result.prior_year.revenue, dec!(1720000));
    assert!(out.warnings.is_empty());
}

#[test]
fn test_bu_drilldown_is_additive() {
    let store = load();
    let all = period_totals(&store, q1_2025(), Scenario::Actual, None);
    let sum = ["EMEA", "NA", "APAC"]
        .iter()
        .map(|bu| period_totals(&store, q1_2025(), Scenario::Actual, Some(bu)).revenue)
        .sum::<rust_decimal::Decimal>();
    assert_eq!(sum, all.revenue);
}

#[test]
fn test_q1_concentration_dominated_by_subscriptions() {
    let store = load();
    let out = analyze_concentration(&store, q1_2025()).unwrap();
    let m = &out.result;
    // Subscriptions 2,060k of 2,810k (~73%): concentrated book
    assert_eq!(m.total_revenue, dec!(2810000));
    assert_eq!(m.top_streams[0].category, "Subscriptions");
    assert_eq!(m.top_streams[0].amount, dec!(2060000));
    assert!(m.hhi > dec!(2500));
    assert!(m.effective_streams < dec!(3));
}

#[test]
fn test_q1_bridge_reconciles() {
    let store = load();
    let out = build_ebitda_bridge(&store, q1_2025(), Scenario::BudgetBase, None).unwrap();
    let steps = &out.result;
    let last = steps.last().unwrap();
    // Net income = 2,810,000 - 842,000 - 977,000 (D&A/interest/taxes zero)
    assert_eq!(last.end, dec!(991000));
    assert_eq!(steps[0].end, dec!(2810000));
}

#[test]
fn test_q1_cash_walk() {
    let store = load();
    let out = cash_walk(&store, q1_2025(), Some(dec!(1000000))).unwrap();
    let walk = &out.result;
    assert_eq!(walk.months.len(), 3);
    // Jan: +110,000 - 45,000 = 1,065,000
    assert_eq!(walk.months[0].balance, dec!(1065000));
    // Q1 net: 335,000 cash - 105,000 capex + 250,000 equity
    assert_eq!(walk.closing_balance, dec!(1480000));
}
