use crate::error::{DashboardError, Result};
use crate::models::{RawSale, SaleRecord};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use std::str::FromStr;

pub const PURCHASE_DATE_FORMAT: &str = "%d/%m/%Y";

/// Decodes the JSON array into enriched records.
///
/// Fails on the first malformed date or price; no partial record list is
/// ever returned.
pub fn parse_records(json: &str) -> Result<Vec<SaleRecord>> {
    let raw: Vec<RawSale> = serde_json::from_str(json)?;
    raw.into_iter()
        .enumerate()
        .map(|(row, sale)| into_record(row, sale))
        .collect()
}

fn into_record(row: usize, raw: RawSale) -> Result<SaleRecord> {
    let purchase_date = NaiveDate::parse_from_str(raw.purchase_date.trim(), PURCHASE_DATE_FORMAT)
        .map_err(|_| DashboardError::InvalidDate {
            row,
            value: raw.purchase_date.clone(),
        })?;
    let price = parse_price(row, &raw.price)?;

    let record = SaleRecord::new(
        purchase_date,
        raw.place,
        raw.seller.unwrap_or_default(),
        raw.category.unwrap_or_default(),
        price,
        raw.lat,
        raw.lon,
    );
    if record.region().is_none() {
        tracing::warn!("row {}: city '{}' has no region", row, record.place);
    }
    Ok(record)
}

// numbers are parsed from their textual form so sums stay exact
fn parse_price(row: usize, value: &serde_json::Value) -> Result<BigDecimal> {
    let text = match value {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    BigDecimal::from_str(&text).map_err(|_| DashboardError::InvalidPrice { row, value: text })
}
