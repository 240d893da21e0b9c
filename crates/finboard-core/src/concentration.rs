use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;

use crate::filter::{filter_records, Period};
use crate::fixture::RecordStore;
use crate::types::{with_metadata, ComputationOutput, Money, Pct, Scenario};
use crate::FinboardResult;

/// HHI level thresholds (index points).
pub const HHI_MODERATE_FLOOR: Decimal = dec!(1500);
pub const HHI_HIGH_FLOOR: Decimal = dec!(2500);

const TOP_STREAM_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConcentrationLevel {
    Low,
    Moderate,
    High,
}

/// One revenue stream (category) with its share of the total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueStream {
    pub category: String,
    pub amount: Money,
    /// Percentage share of total revenue
    pub share_pct: Pct,
}

/// Herfindahl-Hirschman concentration of revenue across streams.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcentrationMetrics {
    /// Sum of squared percentage shares; 10,000 for a single stream
    pub hhi: Decimal,
    /// 10000 / HHI — the number of equal streams with the same HHI
    pub effective_streams: Decimal,
    pub level: ConcentrationLevel,
    pub total_revenue: Money,
    /// Top streams by amount, descending
    pub top_streams: Vec<RevenueStream>,
}

/// HHI over explicit (category, amount) streams. Zero totals collapse to
/// zero metrics rather than dividing.
pub fn concentration_from_streams(
    streams: &[(String, Money)],
    total_revenue: Money,
) -> ConcentrationMetrics {
    let hhi: Decimal = if total_revenue == Decimal::ZERO {
        Decimal::ZERO
    } else {
        streams
            .iter()
            .map(|(_, amount)| {
                let share = amount / total_revenue * dec!(100);
                share * share
            })
            .sum()
    };

    let effective_streams = if hhi == Decimal::ZERO {
        Decimal::ZERO
    } else {
        dec!(10000) / hhi
    };

    let level = if hhi < HHI_MODERATE_FLOOR {
        ConcentrationLevel::Low
    } else if hhi <= HHI_HIGH_FLOOR {
        ConcentrationLevel::Moderate
    } else {
        ConcentrationLevel::High
    };

    let mut ranked: Vec<RevenueStream> = streams
        .iter()
        .map(|(category, amount)| RevenueStream {
            category: category.clone(),
            amount: *amount,
            share_pct: if total_revenue == Decimal::ZERO {
                Decimal::ZERO
            } else {
                amount / total_revenue * dec!(100)
            },
        })
        .collect();
    ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
    ranked.truncate(TOP_STREAM_COUNT);

    ConcentrationMetrics {
        hhi,
        effective_streams,
        level,
        total_revenue,
        top_streams: ranked,
    }
}

/// Group Actual revenue records by category over the period and measure
/// concentration.
pub fn analyze_concentration(
    store: &RecordStore,
    period: Period,
) -> FinboardResult<ComputationOutput<ConcentrationMetrics>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // BTreeMap keeps category order deterministic across runs.
    let mut by_category: BTreeMap<String, Money> = BTreeMap::new();
    for r in filter_records(&store.revenues, period, Scenario::Actual, None) {
        *by_category.entry(r.category.clone()).or_insert(Decimal::ZERO) += r.amount;
    }

    let streams: Vec<(String, Money)> = by_category.into_iter().collect();
    let total: Money = streams.iter().map(|(_, a)| *a).sum();

    if streams.is_empty() {
        warnings.push("No revenue records in period; concentration is zero".to_string());
    }

    let metrics = concentration_from_streams(&streams, total);

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Herfindahl-Hirschman Revenue Concentration",
        &serde_json::json!({
            "period_start": period.start.to_string(),
            "period_end": period.end.to_string(),
            "stream_count": streams.len(),
        }),
        warnings,
        elapsed,
        metrics,
    ))
}
