//! Integration tests for the Meridian Server API endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use meridian_core::{Date, HoldingRecord, PricePoint, PriceSeries, ReturnRecord};
use meridian_data::{InMemoryFundSource, StaticPriceSource};
use meridian_engine::StrategyRegistry;
use meridian_server::routes::create_router;
use meridian_server::{AppState, StrategyProfiles};

fn date(s: &str) -> Date {
    Date::parse(s).unwrap()
}

/// Build a router over in-memory sources with one populated strategy and
/// one degenerate (empty-series) strategy.
fn test_router() -> axum::Router {
    let source = InMemoryFundSource::new();
    source.insert(
        "All Weather",
        vec![
            ReturnRecord {
                date: date("2024-01-31"),
                fund: 1.00,
                benchmark: 1.00,
            },
            ReturnRecord {
                date: date("2024-02-29"),
                fund: 1.05,
                benchmark: 1.02,
            },
            ReturnRecord {
                date: date("2024-03-31"),
                fund: 1.02,
                benchmark: 1.01,
            },
        ],
        vec![
            HoldingRecord::new(date("2024-02-29"), "AAA", 0.6).with_sector("Technology"),
            HoldingRecord::new(date("2024-03-31"), "AAA", 0.6).with_sector("Technology"),
            HoldingRecord::new(date("2024-03-31"), "BBB", 0.4).with_sector("Healthcare"),
        ],
    );
    source.insert("Empty Fund", vec![], vec![]);

    let mut prices = StaticPriceSource::new();
    prices.insert(
        "AAA",
        PriceSeries::from_points(vec![
            PricePoint {
                date: date("2024-02-29"),
                close: 100.0,
            },
            PricePoint {
                date: date("2024-04-15"),
                close: 110.0,
            },
        ]),
    );
    prices.insert(
        "BBB",
        PriceSeries::from_points(vec![
            PricePoint {
                date: date("2024-02-29"),
                close: 50.0,
            },
            PricePoint {
                date: date("2024-04-15"),
                close: 47.5,
            },
        ]),
    );

    let profiles: StrategyProfiles = toml::from_str(
        r#"
        [strategies."All Weather"]
        description = "Diversified across market regimes."
        philosophy = ["Balance risk, not capital"]
        risk_framework = ["Max single-position weight 10%"]

        [[strategies."All Weather".info_table]]
        label = "Inception"
        value = "2021-01"
        "#,
    )
    .unwrap();

    let state = Arc::new(AppState {
        registry: Arc::new(StrategyRegistry::new(Arc::new(source))),
        prices: Arc::new(prices),
        profiles,
    });

    create_router(state)
}

async fn get_json(router: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn test_health() {
    let (status, json) = get_json(test_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_intro_reverses_hyphen_substitution() {
    let (status, json) = get_json(test_router(), "/api/strategies/All-Weather/intro").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["strategy"], "All Weather");
    assert_eq!(json["description"], "Diversified across market regimes.");
    assert_eq!(json["info_table"][0]["label"], "Inception");
    assert_eq!(json["philosophy"][0], "Balance risk, not capital");
    assert_eq!(json["risk_framework"][0], "Max single-position weight 10%");
}

#[tokio::test]
async fn test_intro_allocations_and_attribution() {
    let (status, json) = get_json(test_router(), "/api/strategies/All-Weather/intro").await;
    assert_eq!(status, StatusCode::OK);

    // Latest snapshot only: AAA 0.6, BBB 0.4.
    assert!((json["asset_allocation"]["AAA"].as_f64().unwrap() - 0.6).abs() < 1e-12);
    assert!((json["asset_allocation"]["BBB"].as_f64().unwrap() - 0.4).abs() < 1e-12);
    assert!((json["sector_allocation"]["Technology"].as_f64().unwrap() - 0.6).abs() < 1e-12);

    // Anchor is the first holdings date (2024-02-29), label one month on.
    let components = &json["component_returns"];
    assert_eq!(components["as_of_label"], "Mar 2024");
    assert_eq!(components["status"]["kind"], "complete");

    // Descending by return: AAA +10%, BBB -5%.
    assert_eq!(components["components"][0]["symbol"], "AAA");
    assert!((components["components"][0]["value"].as_f64().unwrap() - 0.10).abs() < 1e-9);
    assert_eq!(components["components"][1]["symbol"], "BBB");

    // MTD = 0.6 * 0.10 + 0.4 * (-0.05)
    assert!((json["portfolio_mtd_return"].as_f64().unwrap() - 0.04).abs() < 1e-9);
}

#[tokio::test]
async fn test_intro_unknown_strategy_404() {
    let (status, json) = get_json(test_router(), "/api/strategies/No-Such-Fund/intro").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("No Such Fund"));
}

#[tokio::test]
async fn test_performance_metrics_and_series() {
    let (status, json) =
        get_json(test_router(), "/api/strategies/All-Weather/performance").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["metrics"]["annualized_return"], "12.9%");
    assert_eq!(json["metrics"]["total_return"], "2%");
    assert_eq!(json["metrics"]["best_month"], "5.0%");
    assert_eq!(json["metrics"]["worst_month"], "-2.9%");
    assert_eq!(json["metrics"]["pos_month_pct"], "50%");

    let series = json["performance_series"].as_array().unwrap();
    assert_eq!(series.len(), 3);
    assert_eq!(series[0]["date"], "2024-01-31");
    assert!((series[1]["fund_value"].as_f64().unwrap() - 1.05).abs() < 1e-12);
    assert!((series[1]["benchmark_value"].as_f64().unwrap() - 1.02).abs() < 1e-12);

    let monthly = json["monthly_returns"].as_array().unwrap();
    assert_eq!(monthly.len(), 2);
    assert_eq!(monthly[0]["year"], 2024);
    assert_eq!(monthly[0]["month"], 2);
}

#[tokio::test]
async fn test_performance_unknown_strategy_404() {
    let (status, _) = get_json(test_router(), "/api/strategies/Nope/performance").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_performance_empty_series_renders_not_available() {
    let (status, json) = get_json(test_router(), "/api/strategies/Empty-Fund/performance").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["metrics"]["annualized_return"], "N/A");
    assert_eq!(json["metrics"]["sharpe_ratio"], "N/A");
    assert_eq!(json["metrics"]["corr"], "N/A");
    assert!(json["performance_series"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_intro_empty_fund_has_no_holdings() {
    let (status, json) = get_json(test_router(), "/api/strategies/Empty-Fund/intro").await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["asset_allocation"].as_object().unwrap().is_empty());
    assert_eq!(json["component_returns"]["status"]["kind"], "no_holdings");
    assert!((json["portfolio_mtd_return"].as_f64().unwrap()).abs() < 1e-12);
    assert!(json["portfolio_ytd_return"].is_null());
}
