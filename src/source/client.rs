use crate::config::SourceConfig;
use crate::error::{DashboardError, Result};
use std::time::Duration;

/// HTTP client for the published sales dataset
pub struct DatasetClient {
    client: reqwest::Client,
    url: String,
}

impl DatasetClient {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| DashboardError::Fetch {
                url: config.url.clone(),
                source,
            })?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// GET the dataset document
    pub async fn fetch_document(&self) -> Result<String> {
        tracing::info!("Fetching dataset from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| self.fetch_error(source))?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Dataset request failed with status {}", status);
            return Err(DashboardError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| self.fetch_error(source))?;
        tracing::debug!("Dataset document: {} bytes", body.len());
        Ok(body)
    }

    fn fetch_error(&self, source: reqwest::Error) -> DashboardError {
        DashboardError::Fetch {
            url: self.url.clone(),
            source,
        }
    }
}
