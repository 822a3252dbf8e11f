use crate::error::{DashboardError, Result};
use crate::models::{DashboardView, FilterConfig, RegionSelector, TopN, YearFilter};
use crate::service::{DashboardService, ExportTable};
use axum::{
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query string shared by the dashboard, sellers and export endpoints
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// Region name or "Colombia"; absent means the whole country
    pub region: Option<String>,
    /// Single year; absent or empty means all years
    pub year: Option<String>,
    /// Comma-separated seller names
    pub sellers: Option<String>,
    pub top_n: Option<String>,
}

/// Empty parameters count as absent
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_param<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| {
        DashboardError::InvalidFilter(format!("{} '{}' is not a valid number", name, value))
    })
}

impl DashboardQuery {
    pub fn region(&self) -> Result<RegionSelector> {
        match non_empty(&self.region) {
            None => Ok(RegionSelector::Country),
            Some(name) => name.parse(),
        }
    }

    pub fn year(&self) -> Result<YearFilter> {
        match non_empty(&self.year) {
            None => Ok(YearFilter::AllYears),
            Some(year) => YearFilter::single(parse_param("year", year)?),
        }
    }

    pub fn filter(&self) -> Result<FilterConfig> {
        let sellers = self
            .sellers
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty());
        Ok(FilterConfig::new(self.region()?, self.year()?).with_sellers(sellers))
    }

    pub fn top_n(&self, default: TopN) -> Result<TopN> {
        match non_empty(&self.top_n) {
            None => Ok(default),
            Some(n) => TopN::new(parse_param("top_n", n)?),
        }
    }
}

/// Response envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(message: impl Into<String>, data: T) -> Response {
        let response = ApiResponse {
            success: true,
            message: message.into(),
            data: Some(data),
        };
        (StatusCode::OK, Json(response)).into_response()
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    let response: ApiResponse<()> = ApiResponse {
        success: false,
        message,
        data: None,
    };
    (status, Json(response)).into_response()
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            tracing::error!("Request failed: {}", self);
            StatusCode::INTERNAL_SERVER_ERROR
        };
        error_response(status, format!("Error: {}", self))
    }
}

/// Health check
pub async fn health_check() -> &'static str {
    "OK"
}

/// Region selector entries, whole country first
pub async fn list_regions() -> Response {
    let regions: Vec<&'static str> = RegionSelector::options()
        .iter()
        .map(RegionSelector::label)
        .collect();
    ApiResponse::ok(format!("{} regions", regions.len()), regions)
}

/// Seller multi-select options for the selected region and year
pub async fn list_sellers(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let (region, year) = match query.region().and_then(|r| Ok((r, query.year()?))) {
        Ok(selection) => selection,
        Err(e) => return e.into_response(),
    };
    let sellers = service.seller_options(region, year);
    ApiResponse::ok(format!("{} sellers", sellers.len()), sellers)
}

/// Full dashboard view for the given filters
pub async fn dashboard(
    State(service): State<Arc<DashboardService>>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let (filter, top_n) = match query
        .filter()
        .and_then(|f| Ok((f, query.top_n(service.default_top_n())?)))
    {
        Ok(selection) => selection,
        Err(e) => return e.into_response(),
    };

    let view = service.view(&filter, top_n);
    let view: &DashboardView = &view;
    ApiResponse::ok(
        format!("{} sales match the filters", view.metrics.total_count),
        view,
    )
}

/// One aggregate table as CSV
pub async fn export_csv(
    State(service): State<Arc<DashboardService>>,
    Path(table): Path<String>,
    Query(query): Query<DashboardQuery>,
) -> Response {
    let table: ExportTable = match table.parse() {
        Ok(table) => table,
        Err(message) => return error_response(StatusCode::NOT_FOUND, message),
    };

    match query.filter().and_then(|filter| service.export(table, &filter)) {
        Ok(csv) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}.csv\"", table),
                ),
            ],
            csv,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}
