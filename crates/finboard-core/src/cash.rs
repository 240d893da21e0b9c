use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::filter::Period;
use crate::fixture::{FinancialRecord, RecordStore};
use crate::types::{with_metadata, ComputationOutput, Money, Scenario};
use crate::FinboardResult;

/// Opening balance used when the caller does not supply one.
pub const DEFAULT_OPENING_BALANCE: Decimal = dec!(2500000);

/// One month of the cash walk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyCash {
    /// Month label, e.g. "2025-01"
    pub month: String,
    /// Net operating cash flow recorded in the month
    pub operating: Money,
    /// Capex flow (negative) recorded in the month
    pub capex: Money,
    /// Equity flow recorded in the month
    pub equity: Money,
    /// Balance after applying the month's flows
    pub balance: Money,
}

/// Opening-to-closing cash decomposition for a period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashWalk {
    pub opening_balance: Money,
    pub closing_balance: Money,
    pub months: Vec<MonthlyCash>,
}

/// Walk the cash balance month by month across the period: opening balance
/// plus cumulative Actual cash, capex and equity flows. Months with no
/// records contribute zero flow and carry the balance forward.
pub fn cash_walk(
    store: &RecordStore,
    period: Period,
    opening_balance: Option<Money>,
) -> FinboardResult<ComputationOutput<CashWalk>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let opening = opening_balance.unwrap_or(DEFAULT_OPENING_BALANCE);
    let mut balance = opening;
    let mut months: Vec<MonthlyCash> = Vec::new();

    let mut cursor = first_of_month(period.start);
    while cursor <= period.end {
        let next = cursor
            .checked_add_months(Months::new(1))
            .unwrap_or(cursor);
        let operating = month_sum(&store.cash, cursor, next);
        let capex = month_sum(&store.capex, cursor, next);
        let equity = month_sum(&store.equity, cursor, next);
        balance += operating + capex + equity;
        months.push(MonthlyCash {
            month: cursor.format("%Y-%m").to_string(),
            operating,
            capex,
            equity,
            balance,
        });
        cursor = next;
    }

    if months.iter().all(|m| {
        m.operating == Decimal::ZERO && m.capex == Decimal::ZERO && m.equity == Decimal::ZERO
    }) {
        warnings.push("No cash flows in period; balance is flat at opening".to_string());
    }

    let walk = CashWalk {
        opening_balance: opening,
        closing_balance: balance,
        months,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Monthly Cash Balance Walk",
        &serde_json::json!({
            "period_start": period.start.to_string(),
            "period_end": period.end.to_string(),
            "opening_balance": opening.to_string(),
        }),
        warnings,
        elapsed,
        walk,
    ))
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Sum Actual records with month_start <= date < month_end.
fn month_sum(records: &[FinancialRecord], month_start: NaiveDate, month_end: NaiveDate) -> Money {
    records
        .iter()
        .filter(|r| r.scenario == Scenario::Actual)
        .filter(|r| r.date >= month_start && r.date < month_end)
        .map(|r| r.amount)
        .sum::<Decimal>()
}
