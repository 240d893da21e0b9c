use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages expressed in percentage points (5 = 5%). Never as decimals.
pub type Pct = Decimal;

/// Planning scenario a record belongs to. Wire names match the fixture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scenario {
    #[default]
    Actual,
    #[serde(rename = "Budget_Base")]
    BudgetBase,
    #[serde(rename = "Budget_Worst")]
    BudgetWorst,
    #[serde(rename = "Budget_Best")]
    BudgetBest,
}

impl Scenario {
    /// Parse the fixture/CLI spelling of a scenario tag.
    pub fn parse(s: &str) -> Option<Scenario> {
        match s {
            "Actual" => Some(Scenario::Actual),
            "Budget_Base" => Some(Scenario::BudgetBase),
            "Budget_Worst" => Some(Scenario::BudgetWorst),
            "Budget_Best" => Some(Scenario::BudgetBest),
            _ => None,
        }
    }
}

/// Direction in which a metric improves. OpEx improves downward; revenue,
/// gross margin and EBITDA improve upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricPolarity {
    RevenueLike,
    CostLike,
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
