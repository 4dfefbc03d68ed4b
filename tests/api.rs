//! Router-level tests for the dashboard service.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use tower::util::ServiceExt;

use aether_core::config::AetherConfig;
use aether_core::server::{router, AppState};

fn test_app() -> axum::Router {
    let config = AetherConfig::default();
    router(AppState::new(&config))
}

fn json_post(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_dashboard_serves_the_form() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(html.contains("AETHER CLIMATE CORE"));
    for id in ["id=\"fuel\"", "id=\"grid\"", "id=\"supply\"", "id=\"key\""] {
        assert!(html.contains(id), "missing {id}");
    }
}

#[tokio::test]
async fn test_compute_returns_reference_totals_and_chart() {
    let response = test_app()
        .oneshot(json_post(
            "/v1/compute",
            serde_json::json!({
                "fuel_gallons": 2500.0,
                "grid_kwh": 48000.0,
                "supply_method": "weight_based",
                "supply_value": 142000.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["totals"]["scope1_kg"], 22000.0);
    assert_eq!(body["totals"]["scope2_kg"], 18480.0);
    assert_eq!(body["totals"]["scope3_kg"], 224360.0);
    assert_eq!(body["totals"]["total_kg"], 264840.0);
    assert_eq!(
        body["method_label"],
        "Logistic Node Calculation (Activity-Based)"
    );
    assert!(body["chart_svg"].as_str().unwrap().starts_with("<svg"));
}

#[tokio::test]
async fn test_compute_spend_based_totals() {
    let response = test_app()
        .oneshot(json_post(
            "/v1/compute",
            serde_json::json!({
                "fuel_gallons": 2500.0,
                "grid_kwh": 48000.0,
                "supply_method": "spend_based",
                "supply_value": 1000000.0
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert_eq!(body["totals"]["scope3_kg"], 450000.0);
    assert_eq!(body["totals"]["total_kg"], 490480.0);
    assert_eq!(
        body["method_label"],
        "Economic Input-Output Model (Spend-Based)"
    );
}

#[tokio::test]
async fn test_compute_rejects_negative_inputs() {
    let response = test_app()
        .oneshot(json_post(
            "/v1/compute",
            serde_json::json!({ "fuel_gallons": -10.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    assert!(body["error"].as_str().unwrap().contains("fuel gallons"));
}

#[tokio::test]
async fn test_report_is_locked_without_the_key() {
    for key in ["", "Admin123", "admin12", "admin1234"] {
        let response = test_app()
            .oneshot(json_post(
                "/v1/report",
                serde_json::json!({ "inputs": {}, "license_key": key }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "key {key:?}");

        let body: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body["locked"], true);
        assert!(body["message"].as_str().unwrap().contains("LOCKED"));
    }
}

#[tokio::test]
async fn test_report_download_with_the_default_key() {
    let response = test_app()
        .oneshot(json_post(
            "/v1/report",
            serde_json::json!({ "inputs": {}, "license_key": "admin123" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    assert_eq!(
        response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"Aether_Compliance_Audit.pdf\""
    );

    let bytes = body_bytes(response).await;
    let parsed = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), 7);
}

#[tokio::test]
async fn test_zero_inventory_still_produces_seven_pages() {
    let response = test_app()
        .oneshot(json_post(
            "/v1/report",
            serde_json::json!({
                "inputs": {
                    "fuel_gallons": 0.0,
                    "grid_kwh": 0.0,
                    "supply_method": "weight_based",
                    "supply_value": 0.0
                },
                "license_key": "admin123"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = body_bytes(response).await;
    let parsed = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(parsed.get_pages().len(), 7);
}
