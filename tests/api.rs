use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use sales_dashboard::config::DashboardSettings;
use sales_dashboard::{api, DashboardService, Dataset};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const PAGE: &str = r#"<!DOCTYPE html>
<html><body><pre>[
  {"Producto": "Lavadora", "Categoría del Producto": "electrodomesticos", "Precio": 100,
   "Fecha de Compra": "15/01/2021", "Vendedor": "Ana", "Lugar de Compra": "Bogotá",
   "lat": 4.61, "lon": -74.08},
  {"Producto": "Libro", "Categoría del Producto": "libros", "Precio": 200,
   "Fecha de Compra": "20/02/2021", "Vendedor": "Beto", "Lugar de Compra": "Cali",
   "lat": 3.43, "lon": -76.52},
  {"Producto": "Pelota", "Categoría del Producto": "deportes", "Precio": 1500.5,
   "Fecha de Compra": "03/03/2022", "Vendedor": "Caro", "Lugar de Compra": "Cartagena",
   "lat": 10.39, "lon": -75.51}
]</pre></body></html>"#;

fn app() -> Router {
    let dataset = Dataset::from_document(PAGE, "fixture").unwrap();
    let service = DashboardService::new(Arc::new(dataset), DashboardSettings::default()).unwrap();
    api::router(Arc::new(service))
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn health() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn regions_list_country_first() {
    let (status, json) = get_json("/api/regions").await;
    assert_eq!(status, StatusCode::OK);
    let regions = json["data"].as_array().unwrap();
    assert_eq!(regions.len(), 7);
    assert_eq!(regions[0], "Colombia");
}

#[tokio::test]
async fn dashboard_filtered_by_region() {
    let (status, json) = get_json("/api/dashboard?region=Andina").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);

    let view = &json["data"];
    assert_eq!(view["metrics"]["total_count"], 1);
    assert_eq!(view["metrics"]["total_revenue_display"], "COP 100.00 ");
    let cities = view["revenue"]["by_city"].as_array().unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0]["place"], "Bogotá");
}

#[tokio::test]
async fn dashboard_whole_country() {
    let (status, json) = get_json("/api/dashboard?top_n=2").await;
    assert_eq!(status, StatusCode::OK);

    let view = &json["data"];
    assert_eq!(view["metrics"]["total_count"], 3);
    assert_eq!(view["metrics"]["total_revenue_display"], "COP 1.80 mil");
    assert_eq!(view["sellers"]["top_n"], 2);
    let top = view["sellers"]["by_revenue"].as_array().unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!(top[0]["key"], "Caro");
    assert_eq!(view["revenue"]["monthly"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn dashboard_rejects_bad_year() {
    let (status, json) = get_json("/api/dashboard?year=2019").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn sellers_follow_year() {
    let (status, json) = get_json("/api/sellers?year=2021").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"], serde_json::json!(["Ana", "Beto"]));
}

#[tokio::test]
async fn export_csv_table() {
    let (status, body) = get("/api/export/count_by_category?sellers=Ana,Beto").await;
    assert_eq!(status, StatusCode::OK);
    let csv = String::from_utf8(body).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines, vec!["key,value", "electrodomesticos,1", "libros,1"]);
}

#[tokio::test]
async fn export_unknown_table() {
    let (status, _) = get("/api/export/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_numbers_use_json_envelope() {
    for uri in [
        "/api/dashboard?year=abc",
        "/api/dashboard?top_n=-1",
        "/api/sellers?year=abc",
    ] {
        let (status, json) = get_json(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(json["success"], false, "{}", uri);
    }
}

#[tokio::test]
async fn empty_params_mean_no_filter() {
    let (status, json) = get_json("/api/dashboard?year=&top_n=&region=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["metrics"]["total_count"], 3);
    assert_eq!(json["data"]["sellers"]["top_n"], 5);

    let (status, json) = get_json("/api/sellers?year=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 3);
}
