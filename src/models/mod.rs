pub mod aggregate;
pub mod filter;
pub mod record;
pub mod region;

pub use aggregate::{
    Aggregates, CityRow, DashboardView, GroupRow, MonthRow, RevenueTab, SalesTab, SellerTotals,
    SellersTab, SummaryMetrics,
};
pub use filter::{FilterConfig, RegionSelector, TopN, YearFilter};
pub use record::{RawSale, SaleRecord};
pub use region::{region_for_city, Region, COUNTRY_LABEL};
