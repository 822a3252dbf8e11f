use crate::error::{DashboardError, Result};
use crate::models::Aggregates;
use bigdecimal::BigDecimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Aggregate tables that can be downloaded as CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTable {
    RevenueByCity,
    CountByCity,
    RevenueByMonth,
    CountByMonth,
    RevenueByCategory,
    CountByCategory,
    Sellers,
}

impl ExportTable {
    pub const ALL: [ExportTable; 7] = [
        ExportTable::RevenueByCity,
        ExportTable::CountByCity,
        ExportTable::RevenueByMonth,
        ExportTable::CountByMonth,
        ExportTable::RevenueByCategory,
        ExportTable::CountByCategory,
        ExportTable::Sellers,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExportTable::RevenueByCity => "revenue_by_city",
            ExportTable::CountByCity => "count_by_city",
            ExportTable::RevenueByMonth => "revenue_by_month",
            ExportTable::CountByMonth => "count_by_month",
            ExportTable::RevenueByCategory => "revenue_by_category",
            ExportTable::CountByCategory => "count_by_category",
            ExportTable::Sellers => "sellers",
        }
    }
}

impl fmt::Display for ExportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportTable {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim_end_matches(".csv");
        ExportTable::ALL
            .iter()
            .copied()
            .find(|t| t.name() == name)
            .ok_or_else(|| format!("unknown export table '{}'", s))
    }
}

#[derive(Serialize)]
struct SellerCsvRow<'a> {
    seller: &'a str,
    revenue: &'a BigDecimal,
    count: u64,
}

/// Renders one aggregate table as CSV with a header row
pub fn export_table(aggregates: &Aggregates, table: ExportTable) -> Result<String> {
    match table {
        ExportTable::RevenueByCity => write_rows(&aggregates.revenue_by_city),
        ExportTable::CountByCity => write_rows(&aggregates.count_by_city),
        ExportTable::RevenueByMonth => write_rows(&aggregates.revenue_by_month),
        ExportTable::CountByMonth => write_rows(&aggregates.count_by_month),
        ExportTable::RevenueByCategory => write_rows(&aggregates.revenue_by_category),
        ExportTable::CountByCategory => write_rows(&aggregates.count_by_category),
        ExportTable::Sellers => {
            let rows: Vec<SellerCsvRow> = aggregates
                .sellers
                .iter()
                .map(|(seller, totals)| SellerCsvRow {
                    seller,
                    revenue: &totals.revenue,
                    count: totals.count,
                })
                .collect();
            write_rows(&rows)
        }
    }
}

fn write_rows<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| DashboardError::Csv(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
