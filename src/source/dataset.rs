use super::client::DatasetClient;
use super::html::extract_payload;
use super::parse::parse_records;
use crate::config::SourceConfig;
use crate::error::{DashboardError, Result};
use crate::models::SaleRecord;
use chrono::{DateTime, Utc};

/// Immutable snapshot of every record loaded for this process
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<SaleRecord>,
    origin: String,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(records: Vec<SaleRecord>, origin: impl Into<String>) -> Self {
        Self {
            records,
            origin: origin.into(),
            loaded_at: Utc::now(),
        }
    }

    /// Unwraps and decodes a dataset document (HTML page or bare JSON)
    pub fn from_document(document: &str, origin: impl Into<String>) -> Result<Self> {
        let payload = extract_payload(document)?;
        let records = parse_records(&payload)?;
        Ok(Self::new(records, origin))
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Loads the dataset from `source.path` when set, otherwise from `source.url`
pub async fn load_dataset(config: &SourceConfig) -> Result<Dataset> {
    let (document, origin) = match &config.path {
        Some(path) => {
            tracing::info!("Reading dataset from file {}", path);
            let document = tokio::fs::read_to_string(path)
                .await
                .map_err(|source| DashboardError::Io {
                    path: path.clone(),
                    source,
                })?;
            (document, path.clone())
        }
        None => {
            let client = DatasetClient::new(config)?;
            let document = client.fetch_document().await?;
            (document, client.url().to_string())
        }
    };

    let dataset = Dataset::from_document(&document, origin)?;
    if dataset.is_empty() {
        tracing::warn!("Dataset from {} has no records", dataset.origin());
    }
    tracing::info!(
        "Loaded {} sales records from {} at {}",
        dataset.len(),
        dataset.origin(),
        dataset.loaded_at().format("%Y-%m-%d %H:%M:%S")
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><pre>[
        {"Precio": 100, "Fecha de Compra": "15/01/2021", "Vendedor": "A",
         "Categoría del Producto": "X", "Lugar de Compra": "Bogotá", "lat": 4.6, "lon": -74.0}
    ]</pre></body></html>"#;

    #[test]
    fn test_from_document() {
        let dataset = Dataset::from_document(PAGE, "memory").unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.origin(), "memory");
        assert_eq!(dataset.records()[0].place, "Bogotá");
        assert!(!dataset.is_empty());
        assert!(dataset.loaded_at() <= Utc::now());
    }

    #[test]
    fn test_empty_array_is_an_empty_dataset() {
        let dataset = Dataset::from_document("<pre>[]</pre>", "memory").unwrap();
        assert!(dataset.is_empty());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("sales-dashboard-{}.html", std::process::id()));
        tokio::fs::write(&path, PAGE).await.unwrap();

        let config = SourceConfig {
            url: "http://unused.invalid".to_string(),
            path: Some(path.to_string_lossy().into_owned()),
            timeout_secs: 1,
        };
        let dataset = load_dataset(&config).await.unwrap();
        assert_eq!(dataset.len(), 1);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let config = SourceConfig {
            url: "http://unused.invalid".to_string(),
            path: Some("/nonexistent/sales.html".to_string()),
            timeout_secs: 1,
        };
        assert!(matches!(
            load_dataset(&config).await,
            Err(DashboardError::Io { .. })
        ));
    }
}
