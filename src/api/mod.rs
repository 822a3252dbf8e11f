pub mod handlers;

pub use handlers::*;

use crate::service::DashboardService;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower::ServiceBuilder;

/// All dashboard routes over one shared service
pub fn router(service: Arc<DashboardService>) -> Router {
    let dashboard_routes = Router::new()
        .route("/api/regions", get(list_regions))
        .route("/api/sellers", get(list_sellers))
        .route("/api/dashboard", get(dashboard))
        .route("/api/export/:table", get(export_csv))
        .with_state(service);

    Router::new()
        .route("/health", get(health_check))
        .merge(dashboard_routes)
        .layer(ServiceBuilder::new())
}
