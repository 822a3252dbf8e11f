use super::region::{region_for_city, Region};
use bigdecimal::BigDecimal;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Row as published by the dataset endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawSale {
    #[serde(rename = "Fecha de Compra")]
    pub purchase_date: String,
    #[serde(rename = "Lugar de Compra")]
    pub place: String,
    #[serde(rename = "Vendedor", default)]
    pub seller: Option<String>,
    #[serde(rename = "Categoría del Producto", default)]
    pub category: Option<String>,
    #[serde(rename = "Precio")]
    pub price: serde_json::Value,
    pub lat: f64,
    pub lon: f64,
}

/// One sales transaction, enriched with its region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRecord {
    pub purchase_date: NaiveDate,
    pub place: String,
    pub seller: String,
    pub category: String,
    pub price: BigDecimal,
    pub latitude: f64,
    pub longitude: f64,
    region: Option<Region>,
}

impl SaleRecord {
    pub fn new(
        purchase_date: NaiveDate,
        place: impl Into<String>,
        seller: impl Into<String>,
        category: impl Into<String>,
        price: BigDecimal,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        let place = place.into();
        let region = region_for_city(&place);
        Self {
            purchase_date,
            place,
            seller: seller.into(),
            category: category.into(),
            price,
            latitude,
            longitude,
            region,
        }
    }

    /// Region of the purchase place, `None` for cities outside the lookup table
    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn year(&self) -> i32 {
        self.purchase_date.year()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::sale;
    use super::*;

    #[test]
    fn test_region_and_year_are_derived() {
        let record = sale("2021-01-15", "Bogotá", "A", "X", "100");
        assert_eq!(record.region(), Some(Region::Andina));
        assert_eq!(record.year(), 2021);

        let unknown = sale("2022-03-01", "Tunja", "A", "X", "100");
        assert_eq!(unknown.region(), None);
        assert_eq!(unknown.year(), 2022);
    }
}
