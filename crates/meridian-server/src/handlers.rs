//! Request handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use meridian_analytics::MetricsReport;
use meridian_core::{Date, MonthlyReturn};
use meridian_data::PriceSource;
use meridian_engine::{StrategyContext, StrategyRegistry};
use meridian_portfolio::{AllocationMap, ComponentReturns};

use crate::config::{InfoRow, StrategyProfiles};

/// Application state.
pub struct AppState {
    /// Strategy context registry
    pub registry: Arc<StrategyRegistry>,
    /// Market-data provider for component returns
    pub prices: Arc<dyn PriceSource>,
    /// Static strategy profile content
    pub profiles: StrategyProfiles,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Intro payload: profile content plus allocation and attribution data.
#[derive(Debug, Serialize)]
pub struct IntroResponse {
    /// Strategy name after URL decoding.
    pub strategy: String,
    /// Fund description paragraph.
    pub description: String,
    /// Label/value rows for the info table.
    pub info_table: Vec<InfoRow>,
    /// Investment philosophy bullet points.
    pub philosophy: Vec<String>,
    /// Risk framework bullet points.
    pub risk_framework: Vec<String>,
    /// Weights by symbol for the asset allocation chart.
    pub asset_allocation: AllocationMap,
    /// Weights by sector for the sector allocation chart.
    pub sector_allocation: AllocationMap,
    /// Component returns for the attribution bar chart.
    pub component_returns: ComponentReturns,
    /// Portfolio month-to-date return.
    pub portfolio_mtd_return: f64,
    /// Portfolio year-to-date return, when a current-year window exists.
    pub portfolio_ytd_return: Option<f64>,
}

/// One point of the performance comparison chart.
#[derive(Debug, Serialize)]
pub struct PerformancePoint {
    /// Observation date.
    pub date: Date,
    /// Cumulative fund value.
    pub fund_value: f64,
    /// Cumulative benchmark value.
    pub benchmark_value: f64,
}

/// Performance payload: formatted metrics plus chart series.
#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    /// Strategy name after URL decoding.
    pub strategy: String,
    /// Formatted metrics, displayed verbatim.
    pub metrics: MetricsReport,
    /// Cumulative fund/benchmark series for the comparison chart.
    pub performance_series: Vec<PerformancePoint>,
    /// Monthly returns for the heatmap, keyed by year and month.
    pub monthly_returns: Vec<MonthlyReturn>,
}

/// Strategy intro endpoint.
///
/// URL names substitute hyphens for spaces; the substitution is reversed
/// before the registry lookup.
pub async fn strategy_intro(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let strategy = decode_strategy_name(&name);

    let ctx = match lookup_strategy(&state, &strategy).await {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    let profile = state.profiles.get(&strategy);
    let component_returns = ctx.component_returns(state.prices.as_ref()).await;
    let portfolio_mtd_return = ctx.portfolio_mtd_return(state.prices.as_ref()).await;
    let portfolio_ytd_return = ctx
        .portfolio_ytd_return(state.prices.as_ref(), Date::today())
        .await;

    let response = IntroResponse {
        strategy,
        description: profile.description,
        info_table: profile.info_table,
        philosophy: profile.philosophy,
        risk_framework: profile.risk_framework,
        asset_allocation: ctx.asset_allocation().clone(),
        sector_allocation: ctx.sector_allocation().clone(),
        component_returns,
        portfolio_mtd_return,
        portfolio_ytd_return,
    };

    (StatusCode::OK, Json(serde_json::to_value(response).unwrap()))
}

/// Strategy performance endpoint.
pub async fn strategy_performance(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    let strategy = decode_strategy_name(&name);

    let ctx = match lookup_strategy(&state, &strategy).await {
        Ok(ctx) => ctx,
        Err(response) => return response,
    };

    let performance_series = ctx
        .series()
        .records()
        .iter()
        .map(|r| PerformancePoint {
            date: r.date,
            fund_value: r.fund,
            benchmark_value: r.benchmark,
        })
        .collect();

    let response = PerformanceResponse {
        strategy,
        metrics: ctx.metrics().report(),
        performance_series,
        monthly_returns: ctx.series().monthly_returns(),
    };

    (StatusCode::OK, Json(serde_json::to_value(response).unwrap()))
}

/// Reverse the URL substitution: hyphens back to spaces.
fn decode_strategy_name(name: &str) -> String {
    name.replace('-', " ")
}

/// Look up a strategy context, converting absence and load failures into
/// ready-made error responses.
async fn lookup_strategy(
    state: &AppState,
    strategy: &str,
) -> Result<Arc<StrategyContext>, (StatusCode, Json<serde_json::Value>)> {
    match state.registry.get_or_create(strategy).await {
        Ok(Some(ctx)) => Ok(ctx),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("Strategy not found: {}", strategy)
            })),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": format!("Failed to load strategy: {}", e)
            })),
        )),
    }
}
