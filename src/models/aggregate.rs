use super::filter::{FilterConfig, TopN};
use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

/// Metric value of one group (category, seller)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow<T> {
    pub key: String,
    pub value: T,
}

/// Per-city metric joined with the city's coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRow<T> {
    pub place: String,
    pub latitude: f64,
    pub longitude: f64,
    pub value: T,
}

/// Metric for one month, keyed by the last day of that month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRow<T> {
    pub bucket: NaiveDate,
    pub year: i32,
    pub month: String,
    pub value: T,
}

/// Revenue and count of one seller
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SellerTotals {
    pub revenue: BigDecimal,
    pub count: u64,
}

/// All tables derived from one filtered record set
#[derive(Debug, Clone, Default, Serialize)]
pub struct Aggregates {
    pub revenue_by_city: Vec<CityRow<BigDecimal>>,
    pub count_by_city: Vec<CityRow<u64>>,
    pub revenue_by_month: Vec<MonthRow<BigDecimal>>,
    pub count_by_month: Vec<MonthRow<u64>>,
    pub revenue_by_category: Vec<GroupRow<BigDecimal>>,
    pub count_by_category: Vec<GroupRow<u64>>,
    /// Seller -> totals, in first-seen order
    pub sellers: IndexMap<String, SellerTotals>,
}

/// Headline numbers shown on every tab
#[derive(Debug, Clone, Serialize)]
pub struct SummaryMetrics {
    pub total_revenue: BigDecimal,
    pub total_revenue_display: String,
    pub total_count: u64,
    pub total_count_display: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RevenueTab {
    pub by_city: Vec<CityRow<BigDecimal>>,
    pub top_cities: Vec<CityRow<BigDecimal>>,
    pub monthly: Vec<MonthRow<BigDecimal>>,
    pub by_category: Vec<GroupRow<BigDecimal>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesTab {
    pub by_city: Vec<CityRow<u64>>,
    pub top_cities: Vec<CityRow<u64>>,
    pub monthly: Vec<MonthRow<u64>>,
    pub by_category: Vec<GroupRow<u64>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SellersTab {
    pub top_n: TopN,
    pub by_revenue: Vec<GroupRow<BigDecimal>>,
    pub by_count: Vec<GroupRow<u64>>,
}

/// Everything the dashboard renders for one filter configuration
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub filter: FilterConfig,
    pub metrics: SummaryMetrics,
    pub revenue: RevenueTab,
    pub sales: SalesTab,
    pub sellers: SellersTab,
}
