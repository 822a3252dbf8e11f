use sales_dashboard::{api, load_dataset, AppConfig, DashboardService};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // log with local timestamps
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_target(true)
        .with_level(true)
        .init();

    let config = AppConfig::from_env()?;
    info!("Starting server with config: {:?}", config);

    // the dataset is loaded once; failing here is fatal
    let dataset = Arc::new(load_dataset(&config.source).await?);
    let service = Arc::new(DashboardService::new(dataset, config.dashboard.clone())?);

    let app = api::router(service);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Server listening on {}", addr);
    info!("API Endpoints:");
    info!("  GET /api/regions          - region selector entries");
    info!("  GET /api/sellers          - seller options for region/year");
    info!("  GET /api/dashboard        - filtered dashboard view");
    info!("  GET /api/export/:table    - aggregate table as CSV");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
