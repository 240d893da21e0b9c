use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::filter::{sum_filtered, Period};
use crate::fixture::RecordStore;
use crate::types::{with_metadata, ComputationOutput, MetricPolarity, Money, Scenario};
use crate::variance::{compute_variance, VarianceResult};
use crate::FinboardResult;

/// Period totals with the additively derived margins.
/// Costs are negative, so both derivations are sums.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodTotals {
    pub revenue: Money,
    pub cogs: Money,
    pub opex: Money,
    /// revenue + cogs
    pub gross_margin: Money,
    /// gross_margin + opex
    pub ebitda: Money,
}

impl PeriodTotals {
    pub fn from_components(revenue: Money, cogs: Money, opex: Money) -> PeriodTotals {
        let gross_margin = revenue + cogs;
        PeriodTotals {
            revenue,
            cogs,
            opex,
            gross_margin,
            ebitda: gross_margin + opex,
        }
    }

    pub const ZERO: PeriodTotals = PeriodTotals {
        revenue: Decimal::ZERO,
        cogs: Decimal::ZERO,
        opex: Decimal::ZERO,
        gross_margin: Decimal::ZERO,
        ebitda: Decimal::ZERO,
    };
}

/// A dashboard query: the selection state made explicit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodQuery {
    pub period: Period,
    /// Budget scenario to compare Actual against
    pub comparison_scenario: Scenario,
    /// Restrict to one business unit; None aggregates across all
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_unit: Option<String>,
}

/// Variances for one metric against both comparison bases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricVariances {
    pub metric: String,
    pub vs_budget: VarianceResult,
    pub vs_prior_year: VarianceResult,
}

/// Full period analysis: totals for all three bases plus banded variances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodAnalysis {
    pub actual: PeriodTotals,
    pub budget: PeriodTotals,
    pub prior_year: PeriodTotals,
    pub variances: Vec<MetricVariances>,
}

/// Sum filtered records into period totals for one scenario.
/// Recomputed from the full arrays on every call; nothing is cached.
pub fn period_totals(
    store: &RecordStore,
    period: Period,
    scenario: Scenario,
    business_unit: Option<&str>,
) -> PeriodTotals {
    PeriodTotals::from_components(
        sum_filtered(&store.revenues, period, scenario, business_unit),
        sum_filtered(&store.cogs, period, scenario, business_unit),
        sum_filtered(&store.opex, period, scenario, business_unit),
    )
}

/// Analyze a period: actual vs selected budget scenario vs prior year,
/// with banded variances for revenue, gross margin, EBITDA and OpEx.
pub fn analyze_period(
    store: &RecordStore,
    query: &PeriodQuery,
) -> FinboardResult<ComputationOutput<PeriodAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let bu = query.business_unit.as_deref();
    let actual = period_totals(store, query.period, Scenario::Actual, bu);
    let budget = period_totals(store, query.period, query.comparison_scenario, bu);
    // Prior year is always measured against what actually happened.
    let prior_year = period_totals(store, query.period.prior_year(), Scenario::Actual, bu);

    if query.comparison_scenario == Scenario::Actual {
        warnings.push(
            "Comparison scenario is Actual; budget variances are identically zero".to_string(),
        );
    }
    if actual == PeriodTotals::ZERO {
        warnings.push("No actual records matched the query".to_string());
    }

    let variances = vec![
        metric_variances("revenue", &actual, &budget, &prior_year, |t| t.revenue),
        metric_variances("gross_margin", &actual, &budget, &prior_year, |t| {
            t.gross_margin
        }),
        metric_variances("ebitda", &actual, &budget, &prior_year, |t| t.ebitda),
        // OpEx is compared as spend magnitude with inverted polarity.
        MetricVariances {
            metric: "opex".to_string(),
            vs_budget: compute_variance(-actual.opex, -budget.opex, MetricPolarity::CostLike),
            vs_prior_year: compute_variance(
                -actual.opex,
                -prior_year.opex,
                MetricPolarity::CostLike,
            ),
        },
    ];

    let analysis = PeriodAnalysis {
        actual,
        budget,
        prior_year,
        variances,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Period Aggregation with Budget and Prior-Year Variance Banding",
        &serde_json::json!({
            "period_start": query.period.start.to_string(),
            "period_end": query.period.end.to_string(),
            "comparison_scenario": query.comparison_scenario,
            "business_unit": query.business_unit,
        }),
        warnings,
        elapsed,
        analysis,
    ))
}

fn metric_variances(
    name: &str,
    actual: &PeriodTotals,
    budget: &PeriodTotals,
    prior_year: &PeriodTotals,
    pick: impl Fn(&PeriodTotals) -> Money,
) -> MetricVariances {
    MetricVariances {
        metric: name.to_string(),
        vs_budget: compute_variance(pick(actual), pick(budget), MetricPolarity::RevenueLike),
        vs_prior_year: compute_variance(
            pick(actual),
            pick(prior_year),
            MetricPolarity::RevenueLike,
        ),
    }
}
