use super::aggregate::{aggregate, top_sellers_by_count, top_sellers_by_revenue, total_revenue};
use super::export::{export_table, ExportTable};
use super::filter::{apply_filters, seller_options};
use super::format::format_number;
use crate::config::DashboardSettings;
use crate::error::Result;
use crate::models::{
    DashboardView, FilterConfig, RegionSelector, RevenueTab, SalesTab, SellersTab, SummaryMetrics,
    TopN, YearFilter,
};
use crate::source::Dataset;
use bigdecimal::ToPrimitive;
use dashmap::DashMap;
use std::sync::Arc;

/// Cities shown in the "top cities" bar charts
pub const TOP_CITIES: usize = 5;

type ViewKey = (FilterConfig, TopN);

/// Dashboard service: filter, aggregate and assemble views over one dataset snapshot
pub struct DashboardService {
    dataset: Arc<Dataset>,
    settings: DashboardSettings,
    default_top_n: TopN,
    cache: Option<DashMap<ViewKey, Arc<DashboardView>>>,
}

impl DashboardService {
    pub fn new(dataset: Arc<Dataset>, settings: DashboardSettings) -> Result<Self> {
        let default_top_n = TopN::new(settings.default_top_n)?;
        let cache = settings.cache_views.then(DashMap::new);
        Ok(Self {
            dataset,
            settings,
            default_top_n,
            cache,
        })
    }

    pub fn default_top_n(&self) -> TopN {
        self.default_top_n
    }

    /// View for one filter configuration, served from the cache when possible
    pub fn view(&self, filter: &FilterConfig, top_n: TopN) -> Arc<DashboardView> {
        let Some(cache) = &self.cache else {
            return Arc::new(self.build_view(filter, top_n));
        };

        let key = (filter.clone(), top_n);
        if let Some(hit) = cache.get(&key) {
            tracing::debug!("View cache hit: {:?}", key);
            return Arc::clone(hit.value());
        }

        if cache.len() >= self.settings.cache_capacity {
            tracing::info!("View cache reached {} entries, clearing", cache.len());
            cache.clear();
        }

        let view = Arc::new(self.build_view(filter, top_n));
        cache.insert(key, Arc::clone(&view));
        view
    }

    fn build_view(&self, filter: &FilterConfig, top_n: TopN) -> DashboardView {
        let records = apply_filters(self.dataset.records(), filter);
        let aggregates = aggregate(&records);

        let revenue = total_revenue(&records);
        let count = records.len() as u64;
        tracing::info!(
            "Built view for region={} year={:?} sellers={}: {} records, revenue {}",
            filter.region,
            filter.year,
            filter.sellers.len(),
            count,
            revenue
        );

        let metrics = SummaryMetrics {
            total_revenue_display: format_number(
                revenue.to_f64().unwrap_or(0.0),
                &self.settings.currency_prefix,
            ),
            total_revenue: revenue,
            total_count: count,
            total_count_display: format_number(count as f64, ""),
        };

        let sellers = SellersTab {
            top_n,
            by_revenue: top_sellers_by_revenue(&aggregates.sellers, top_n.get()),
            by_count: top_sellers_by_count(&aggregates.sellers, top_n.get()),
        };

        let revenue_tab = RevenueTab {
            top_cities: aggregates
                .revenue_by_city
                .iter()
                .take(TOP_CITIES)
                .cloned()
                .collect(),
            by_city: aggregates.revenue_by_city,
            monthly: aggregates.revenue_by_month,
            by_category: aggregates.revenue_by_category,
        };

        let sales_tab = SalesTab {
            top_cities: aggregates
                .count_by_city
                .iter()
                .take(TOP_CITIES)
                .cloned()
                .collect(),
            by_city: aggregates.count_by_city,
            monthly: aggregates.count_by_month,
            by_category: aggregates.count_by_category,
        };

        DashboardView {
            filter: filter.clone(),
            metrics,
            revenue: revenue_tab,
            sales: sales_tab,
            sellers,
        }
    }

    /// Options for the seller multi-select under the current region and year
    pub fn seller_options(&self, region: RegionSelector, year: YearFilter) -> Vec<String> {
        seller_options(self.dataset.records(), region, year)
    }

    /// One aggregate table of the filtered records as CSV
    pub fn export(&self, table: ExportTable, filter: &FilterConfig) -> Result<String> {
        let records = apply_filters(self.dataset.records(), filter);
        let aggregates = aggregate(&records);
        export_table(&aggregates, table)
    }
}
