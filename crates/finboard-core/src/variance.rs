use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{MetricPolarity, Money, Pct};

/// Band thresholds in percentage points. Fixed, not runtime-configurable.
pub const REVENUE_WARNING_FLOOR: Decimal = dec!(-5);
pub const COST_WARNING_CEILING: Decimal = dec!(5);

/// Qualitative severity of a variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Good,
    Warning,
    Bad,
}

/// Actual-vs-comparison variance for a single metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VarianceResult {
    pub actual: Money,
    pub comparison: Money,
    /// actual - comparison
    pub delta: Money,
    /// delta / |comparison| * 100; defined as 0 when comparison is 0
    pub delta_pct: Pct,
    pub band: Band,
}

/// Percentage delta against a baseline. The zero-baseline case collapses to
/// 0 rather than signaling — downstream consumers rely on this.
pub fn delta_pct(actual: Money, comparison: Money) -> Pct {
    if comparison == Decimal::ZERO {
        Decimal::ZERO
    } else {
        (actual - comparison) / comparison.abs() * dec!(100)
    }
}

/// Band a percentage delta by metric polarity.
///
/// Revenue-like metrics improve upward: any non-negative delta is Good and
/// the Warning band sits just below zero. Cost-like metrics invert: coming
/// in under plan is Good, and the Warning band sits just above zero.
pub fn band_for(delta_pct: Pct, polarity: MetricPolarity) -> Band {
    match polarity {
        MetricPolarity::RevenueLike => {
            if delta_pct >= Decimal::ZERO {
                Band::Good
            } else if delta_pct >= REVENUE_WARNING_FLOOR {
                Band::Warning
            } else {
                Band::Bad
            }
        }
        MetricPolarity::CostLike => {
            if delta_pct < Decimal::ZERO {
                Band::Good
            } else if delta_pct <= COST_WARNING_CEILING {
                Band::Warning
            } else {
                Band::Bad
            }
        }
    }
}

/// Compute the full variance record for one metric.
pub fn compute_variance(
    actual: Money,
    comparison: Money,
    polarity: MetricPolarity,
) -> VarianceResult {
    let pct = delta_pct(actual, comparison);
    VarianceResult {
        actual,
        comparison,
        delta: actual - comparison,
        delta_pct: pct,
        band: band_for(pct, polarity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_delta_pct_basic() {
        // (1,000,000 - 900,000) / 900,000 * 100 = 11.11...%
        let pct = delta_pct(dec!(1000000), dec!(900000));
        assert!(pct > dec!(11.11));
        assert!(pct < dec!(11.12));
    }

    #[test]
    fn test_delta_pct_zero_comparison_is_zero() {
        assert_eq!(delta_pct(dec!(500000), dec!(0)), dec!(0));
        assert_eq!(delta_pct(dec!(-500000), dec!(0)), dec!(0));
        assert_eq!(delta_pct(dec!(0), dec!(0)), dec!(0));
    }

    #[test]
    fn test_delta_pct_negative_comparison_uses_abs() {
        // Costs are stored negative. OpEx improving from -500 to -450:
        // delta = 50, pct = 50 / 500 * 100 = +10
        assert_eq!(delta_pct(dec!(-450), dec!(-500)), dec!(10));
    }

    #[test]
    fn test_revenue_band_boundaries() {
        assert_eq!(band_for(dec!(0), MetricPolarity::RevenueLike), Band::Good);
        assert_eq!(band_for(dec!(3.2), MetricPolarity::RevenueLike), Band::Good);
        assert_eq!(
            band_for(dec!(-0.01), MetricPolarity::RevenueLike),
            Band::Warning
        );
        assert_eq!(band_for(dec!(-5), MetricPolarity::RevenueLike), Band::Warning);
        assert_eq!(
            band_for(dec!(-5.01), MetricPolarity::RevenueLike),
            Band::Bad
        );
    }

    #[test]
    fn test_cost_band_boundaries() {
        assert_eq!(band_for(dec!(-0.01), MetricPolarity::CostLike), Band::Good);
        assert_eq!(band_for(dec!(0), MetricPolarity::CostLike), Band::Warning);
        assert_eq!(band_for(dec!(5), MetricPolarity::CostLike), Band::Warning);
        assert_eq!(band_for(dec!(5.01), MetricPolarity::CostLike), Band::Bad);
    }

    #[test]
    fn test_revenue_beat_is_good() {
        let v = compute_variance(dec!(1000000), dec!(900000), MetricPolarity::RevenueLike);
        assert_eq!(v.delta, dec!(100000));
        assert_eq!(v.band, Band::Good);
    }

    #[test]
    fn test_opex_overrun_is_bad() {
        // Cost metrics are compared as spend magnitudes.
        // 550k vs 500k => +10% => Bad.
        let v = compute_variance(dec!(550000), dec!(500000), MetricPolarity::CostLike);
        assert_eq!(v.delta_pct, dec!(10));
        assert_eq!(v.band, Band::Bad);
    }

    #[test]
    fn test_zero_comparison_bands_by_polarity() {
        // delta_pct = 0: Good for revenue-like, Warning for cost-like.
        let v = compute_variance(dec!(100), dec!(0), MetricPolarity::RevenueLike);
        assert_eq!(v.band, Band::Good);
        let v = compute_variance(dec!(100), dec!(0), MetricPolarity::CostLike);
        assert_eq!(v.band, Band::Warning);
    }
}
