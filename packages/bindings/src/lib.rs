use napi::Result as NapiResult;
use napi_derive::napi;

use finboard_core::aggregate::PeriodQuery;
use finboard_core::filter::Period;
use finboard_core::fixture::RecordStore;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_store(fixture_json: &str) -> NapiResult<RecordStore> {
    RecordStore::from_json(fixture_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Period summary
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_period(fixture_json: String, query_json: String) -> NapiResult<String> {
    let store = parse_store(&fixture_json)?;
    let query: PeriodQuery = serde_json::from_str(&query_json).map_err(to_napi_error)?;
    let output = finboard_core::aggregate::analyze_period(&store, &query).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Concentration
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_concentration(fixture_json: String, period_json: String) -> NapiResult<String> {
    let store = parse_store(&fixture_json)?;
    let period: Period = serde_json::from_str(&period_json).map_err(to_napi_error)?;
    let output = finboard_core::concentration::analyze_concentration(&store, period)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Waterfall
// ---------------------------------------------------------------------------

#[napi]
pub fn build_waterfall(fixture_json: String, query_json: String) -> NapiResult<String> {
    let store = parse_store(&fixture_json)?;
    let query: PeriodQuery = serde_json::from_str(&query_json).map_err(to_napi_error)?;
    let output = finboard_core::waterfall::build_ebitda_bridge(
        &store,
        query.period,
        query.comparison_scenario,
        query.business_unit.as_deref(),
    )
    .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Cash walk
// ---------------------------------------------------------------------------

#[napi]
pub fn cash_walk(
    fixture_json: String,
    period_json: String,
    opening_balance: Option<String>,
) -> NapiResult<String> {
    let store = parse_store(&fixture_json)?;
    let period: Period = serde_json::from_str(&period_json).map_err(to_napi_error)?;
    let opening = match opening_balance {
        Some(s) => Some(s.parse::<rust_decimal::Decimal>().map_err(to_napi_error)?),
        None => None,
    };
    let output = finboard_core::cash::cash_walk(&store, period, opening).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
