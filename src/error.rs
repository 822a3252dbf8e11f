use thiserror::Error;

/// Errors raised while loading the dataset or serving dashboard requests
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to fetch dataset from {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("dataset request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("failed to read dataset file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("no <pre> block with a JSON payload found in dataset document")]
    MissingPayload,

    #[error("failed to decode dataset JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {row}: invalid purchase date '{value}' (expected dd/mm/yyyy)")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: invalid price '{value}'")]
    InvalidPrice { row: usize, value: String },

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl DashboardError {
    /// Errors caused by the caller's input rather than by the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, DashboardError::InvalidFilter(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
