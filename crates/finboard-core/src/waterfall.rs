use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::aggregate::period_totals;
use crate::filter::Period;
use crate::fixture::RecordStore;
use crate::types::{with_metadata, ComputationOutput, Money, Scenario};
use crate::FinboardResult;

/// How a bridge step is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    /// Anchors the bridge; bar runs from zero to the cumulative value
    Total,
    /// Intermediate anchor (gross margin, EBITDA); also pinned to zero
    Subtotal,
    /// A signed delta; bar spans the change between cumulatives
    Decrease,
}

/// One step fed to the builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeInput {
    pub label: String,
    pub kind: StepKind,
    /// Cumulative value for totals/subtotals; signed delta for decreases
    pub value: Money,
    /// Same measure under the comparison scenario
    pub comparison_value: Money,
}

/// A positioned bar in the bridge chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterfallStep {
    pub label: String,
    pub kind: StepKind,
    pub value: Money,
    pub comparison_value: Money,
    pub start: Money,
    pub end: Money,
}

/// Thread cumulative positions through an ordered step list.
///
/// Totals and subtotals pin start = 0 and reset the cumulative to their
/// value; decrease bars span min/max of the cumulative before and after
/// the delta, so a bar never renders with negative height.
pub fn position_steps(inputs: &[BridgeInput]) -> Vec<WaterfallStep> {
    let mut cumulative = Decimal::ZERO;
    inputs
        .iter()
        .map(|input| {
            let (start, end) = match input.kind {
                StepKind::Total | StepKind::Subtotal => {
                    cumulative = input.value;
                    (Decimal::ZERO, input.value)
                }
                StepKind::Decrease => {
                    let previous = cumulative;
                    cumulative += input.value;
                    (previous.min(cumulative), previous.max(cumulative))
                }
            };
            WaterfallStep {
                label: input.label.clone(),
                kind: input.kind,
                value: input.value,
                comparison_value: input.comparison_value,
                start,
                end,
            }
        })
        .collect()
}

/// The Revenue → COGS → OpEx → D&A → Interest → Taxes → Net Income bridge
/// for a period, with the comparison scenario's values carried alongside.
///
/// D&A, interest and taxes are not present in the fixture and enter as
/// zero deltas; they keep the bridge reconciling to net income.
pub fn build_ebitda_bridge(
    store: &RecordStore,
    period: Period,
    comparison_scenario: Scenario,
    business_unit: Option<&str>,
) -> FinboardResult<ComputationOutput<Vec<WaterfallStep>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let actual = period_totals(store, period, Scenario::Actual, business_unit);
    let budget = period_totals(store, period, comparison_scenario, business_unit);

    if actual.revenue == Decimal::ZERO {
        warnings.push("No actual revenue in period; bridge starts at zero".to_string());
    }

    let depreciation = Decimal::ZERO;
    let interest = Decimal::ZERO;
    let taxes = Decimal::ZERO;
    let net_income = actual.ebitda + depreciation + interest + taxes;
    let comparison_net_income = budget.ebitda;

    let inputs = vec![
        step("Revenue", StepKind::Total, actual.revenue, budget.revenue),
        step("COGS", StepKind::Decrease, actual.cogs, budget.cogs),
        step(
            "Gross Margin",
            StepKind::Subtotal,
            actual.gross_margin,
            budget.gross_margin,
        ),
        step("OpEx", StepKind::Decrease, actual.opex, budget.opex),
        step("EBITDA", StepKind::Subtotal, actual.ebitda, budget.ebitda),
        step("D&A", StepKind::Decrease, depreciation, Decimal::ZERO),
        step("Interest", StepKind::Decrease, interest, Decimal::ZERO),
        step("Taxes", StepKind::Decrease, taxes, Decimal::ZERO),
        step(
            "Net Income",
            StepKind::Total,
            net_income,
            comparison_net_income,
        ),
    ];

    let steps = position_steps(&inputs);

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "EBITDA Bridge Waterfall Decomposition",
        &serde_json::json!({
            "period_start": period.start.to_string(),
            "period_end": period.end.to_string(),
            "comparison_scenario": comparison_scenario,
            "business_unit": business_unit,
        }),
        warnings,
        elapsed,
        steps,
    ))
}

fn step(label: &str, kind: StepKind, value: Money, comparison_value: Money) -> BridgeInput {
    BridgeInput {
        label: label.to_string(),
        kind,
        value,
        comparison_value,
    }
}
