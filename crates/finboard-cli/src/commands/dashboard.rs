use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finboard_core::aggregate::{self, PeriodQuery};
use finboard_core::cash;
use finboard_core::concentration;
use finboard_core::filter::Period;
use finboard_core::fixture::RecordStore;
use finboard_core::types::Scenario;
use finboard_core::waterfall;

use crate::input;

const DEFAULT_FIXTURE: &str = "fixtures/company_financials.json";

/// Flags shared by every dashboard query
#[derive(Args)]
pub struct QueryArgs {
    /// Path to the fixture JSON (stdin is used when piped)
    #[arg(long, default_value = DEFAULT_FIXTURE)]
    pub fixture: String,

    /// Period start (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub start: String,

    /// Period end (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub end: String,
}

/// Arguments for the period summary
#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Budget scenario to compare against
    #[arg(long, default_value = "Budget_Base")]
    pub scenario: String,

    /// Restrict to one business unit code
    #[arg(long)]
    pub bu: Option<String>,
}

/// Arguments for revenue concentration
#[derive(Args)]
pub struct ConcentrationArgs {
    #[command(flatten)]
    pub query: QueryArgs,
}

/// Arguments for the EBITDA bridge
#[derive(Args)]
pub struct WaterfallArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Budget scenario carried as comparison values
    #[arg(long, default_value = "Budget_Base")]
    pub scenario: String,

    /// Restrict to one business unit code
    #[arg(long)]
    pub bu: Option<String>,
}

/// Arguments for the cash walk
#[derive(Args)]
pub struct CashArgs {
    #[command(flatten)]
    pub query: QueryArgs,

    /// Opening cash balance (defaults to the fixture's standing constant)
    #[arg(long)]
    pub opening: Option<Decimal>,
}

pub fn run_summary(args: SummaryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = load_store(&args.query.fixture)?;
    let query = PeriodQuery {
        period: parse_period(&args.query)?,
        comparison_scenario: parse_scenario(&args.scenario)?,
        business_unit: args.bu,
    };
    let result = aggregate::analyze_period(&store, &query)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_concentration(args: ConcentrationArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = load_store(&args.query.fixture)?;
    let period = parse_period(&args.query)?;
    let result = concentration::analyze_concentration(&store, period)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_waterfall(args: WaterfallArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = load_store(&args.query.fixture)?;
    let period = parse_period(&args.query)?;
    let scenario = parse_scenario(&args.scenario)?;
    let result = waterfall::build_ebitda_bridge(&store, period, scenario, args.bu.as_deref())?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_cash(args: CashArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let store = load_store(&args.query.fixture)?;
    let period = parse_period(&args.query)?;
    let result = cash::cash_walk(&store, period, args.opening)?;
    Ok(serde_json::to_value(result)?)
}

/// Load the fixture from stdin when piped, otherwise from the given path.
fn load_store(path: &str) -> Result<RecordStore, Box<dyn std::error::Error>> {
    if let Some(value) = input::stdin::read_stdin()? {
        let store: RecordStore = serde_json::from_value(value)?;
        store.validate()?;
        return Ok(store);
    }
    input::file::read_store(path)
}

fn parse_period(args: &QueryArgs) -> Result<Period, Box<dyn std::error::Error>> {
    let start: NaiveDate = args
        .start
        .parse()
        .map_err(|_| format!("Invalid --start '{}', expected YYYY-MM-DD", args.start))?;
    let end: NaiveDate = args
        .end
        .parse()
        .map_err(|_| format!("Invalid --end '{}', expected YYYY-MM-DD", args.end))?;
    Ok(Period::new(start, end)?)
}

fn parse_scenario(s: &str) -> Result<Scenario, Box<dyn std::error::Error>> {
    Scenario::parse(s).ok_or_else(|| {
        format!(
            "Unknown scenario '{}'; expected Actual, Budget_Base, Budget_Worst or Budget_Best",
            s
        )
        .into()
    })
}
