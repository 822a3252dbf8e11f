use crate::models::{Aggregates, CityRow, GroupRow, MonthRow, SaleRecord, SellerTotals};
use bigdecimal::{BigDecimal, Zero};
use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Running revenue and count of one group
#[derive(Debug, Clone)]
struct Tally {
    revenue: BigDecimal,
    count: u64,
}

impl Tally {
    fn new() -> Self {
        Self {
            revenue: BigDecimal::zero(),
            count: 0,
        }
    }

    fn add(&mut self, price: &BigDecimal) {
        self.revenue += price;
        self.count += 1;
    }
}

/// Coordinates of the first record seen for a city, plus its tally
struct CityTally {
    latitude: f64,
    longitude: f64,
    tally: Tally,
}

/// Last calendar day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(date)
}

/// Computes every aggregate table from a filtered record set in one pass.
///
/// City and category tables are sorted by their metric, descending; groups
/// with equal metrics keep the order in which they first appeared. Month
/// tables are chronological and only contain months present in the input.
pub fn aggregate(records: &[&SaleRecord]) -> Aggregates {
    let mut cities: IndexMap<&str, CityTally> = IndexMap::new();
    let mut months: BTreeMap<NaiveDate, Tally> = BTreeMap::new();
    let mut categories: IndexMap<&str, Tally> = IndexMap::new();
    let mut sellers: IndexMap<String, SellerTotals> = IndexMap::new();

    for record in records {
        cities
            .entry(record.place.as_str())
            .or_insert_with(|| CityTally {
                latitude: record.latitude,
                longitude: record.longitude,
                tally: Tally::new(),
            })
            .tally
            .add(&record.price);

        months
            .entry(month_end(record.purchase_date))
            .or_insert_with(Tally::new)
            .add(&record.price);

        categories
            .entry(record.category.as_str())
            .or_insert_with(Tally::new)
            .add(&record.price);

        let seller = sellers
            .entry(record.seller.clone())
            .or_insert_with(|| SellerTotals {
                revenue: BigDecimal::zero(),
                count: 0,
            });
        seller.revenue += &record.price;
        seller.count += 1;
    }

    let mut revenue_by_city: Vec<CityRow<BigDecimal>> = cities
        .iter()
        .map(|(place, city)| CityRow {
            place: place.to_string(),
            latitude: city.latitude,
            longitude: city.longitude,
            value: city.tally.revenue.clone(),
        })
        .collect();
    revenue_by_city.sort_by(|a, b| b.value.cmp(&a.value));

    let mut count_by_city: Vec<CityRow<u64>> = cities
        .iter()
        .map(|(place, city)| CityRow {
            place: place.to_string(),
            latitude: city.latitude,
            longitude: city.longitude,
            value: city.tally.count,
        })
        .collect();
    count_by_city.sort_by(|a, b| b.value.cmp(&a.value));

    let revenue_by_month = months
        .iter()
        .map(|(bucket, tally)| month_row(*bucket, tally.revenue.clone()))
        .collect();
    let count_by_month = months
        .iter()
        .map(|(bucket, tally)| month_row(*bucket, tally.count))
        .collect();

    let mut revenue_by_category: Vec<GroupRow<BigDecimal>> = categories
        .iter()
        .map(|(key, tally)| GroupRow {
            key: key.to_string(),
            value: tally.revenue.clone(),
        })
        .collect();
    revenue_by_category.sort_by(|a, b| b.value.cmp(&a.value));

    let mut count_by_category: Vec<GroupRow<u64>> = categories
        .iter()
        .map(|(key, tally)| GroupRow {
            key: key.to_string(),
            value: tally.count,
        })
        .collect();
    count_by_category.sort_by(|a, b| b.value.cmp(&a.value));

    Aggregates {
        revenue_by_city,
        count_by_city,
        revenue_by_month,
        count_by_month,
        revenue_by_category,
        count_by_category,
        sellers,
    }
}

fn month_row<T>(bucket: NaiveDate, value: T) -> MonthRow<T> {
    MonthRow {
        bucket,
        year: bucket.year(),
        month: bucket.format("%B").to_string(),
        value,
    }
}

/// Sellers ranked by revenue, at most `n` rows
pub fn top_sellers_by_revenue(
    sellers: &IndexMap<String, SellerTotals>,
    n: usize,
) -> Vec<GroupRow<BigDecimal>> {
    let mut rows: Vec<GroupRow<BigDecimal>> = sellers
        .iter()
        .map(|(seller, totals)| GroupRow {
            key: seller.clone(),
            value: totals.revenue.clone(),
        })
        .collect();
    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows.truncate(n);
    rows
}

/// Sellers ranked by number of sales, at most `n` rows
pub fn top_sellers_by_count(sellers: &IndexMap<String, SellerTotals>, n: usize) -> Vec<GroupRow<u64>> {
    let mut rows: Vec<GroupRow<u64>> = sellers
        .iter()
        .map(|(seller, totals)| GroupRow {
            key: seller.clone(),
            value: totals.count,
        })
        .collect();
    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows.truncate(n);
    rows
}

/// Sum of prices over a record set
pub fn total_revenue(records: &[&SaleRecord]) -> BigDecimal {
    records
        .iter()
        .fold(BigDecimal::zero(), |acc, r| acc + &r.price)
}
