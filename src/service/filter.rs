use crate::models::{FilterConfig, RegionSelector, SaleRecord, YearFilter};
use indexmap::IndexSet;

/// Keeps the records passing every active filter, in input order.
///
/// Filters apply region, then year, then seller.
pub fn apply_filters<'a, I>(records: I, filter: &FilterConfig) -> Vec<&'a SaleRecord>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    records
        .into_iter()
        .filter(|r| filter.region.matches(r.region()))
        .filter(|r| filter.year.matches(r.year()))
        .filter(|r| filter.matches_seller(&r.seller))
        .collect()
}

/// Distinct sellers left after the region and year filters, in first-seen order
pub fn seller_options<'a, I>(records: I, region: RegionSelector, year: YearFilter) -> Vec<String>
where
    I: IntoIterator<Item = &'a SaleRecord>,
{
    let sellers: IndexSet<&str> = records
        .into_iter()
        .filter(|r| region.matches(r.region()) && year.matches(r.year()))
        .map(|r| r.seller.as_str())
        .collect();
    sellers.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::fixtures::sale;
    use crate::models::Region;

    fn records() -> Vec<SaleRecord> {
        vec![
            sale("2021-01-15", "Bogotá", "Ana", "X", "100"),
            sale("2021-02-20", "Cali", "Beto", "Y", "200"),
            sale("2022-05-01", "Barranquilla", "Ana", "Y", "50"),
            sale("2020-07-09", "Tunja", "Caro", "Z", "10"),
            sale("2023-11-30", "Medellín", "Dani", "X", "75"),
        ]
    }

    #[test]
    fn test_region_filter() {
        let records = records();
        let andina = FilterConfig::new(RegionSelector::Region(Region::Andina), YearFilter::AllYears);
        let places: Vec<&str> = apply_filters(&records, &andina)
            .iter()
            .map(|r| r.place.as_str())
            .collect();
        assert_eq!(places, vec!["Bogotá", "Medellín"]);
    }

    #[test]
    fn test_country_keeps_unknown_cities() {
        let records = records();
        let filtered = apply_filters(&records, &FilterConfig::default());
        assert_eq!(filtered.len(), records.len());
        assert!(filtered.iter().any(|r| r.place == "Tunja"));
    }

    #[test]
    fn test_year_and_seller_filters_combine() {
        let records = records();
        let filter = FilterConfig::new(RegionSelector::Country, YearFilter::single(2021).unwrap())
            .with_sellers(["Ana"]);
        let filtered = apply_filters(&records, &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].place, "Bogotá");
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let records = records();
        let filter = FilterConfig::new(RegionSelector::Region(Region::Insular), YearFilter::AllYears);
        assert!(apply_filters(&records, &filter).is_empty());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let records = records();
        let filters = [
            FilterConfig::default(),
            FilterConfig::new(RegionSelector::Region(Region::Caribe), YearFilter::AllYears),
            FilterConfig::new(RegionSelector::Country, YearFilter::single(2021).unwrap())
                .with_sellers(["Beto", "Ana"]),
        ];
        for filter in &filters {
            let once = apply_filters(&records, filter);
            let twice = apply_filters(once.iter().copied(), filter);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_country_covers_every_region() {
        let records = records();
        let country = apply_filters(&records, &FilterConfig::default());
        for region in Region::ALL {
            let filter = FilterConfig::new(RegionSelector::Region(region), YearFilter::AllYears);
            for record in apply_filters(&records, &filter) {
                assert!(country.contains(&record));
            }
        }
        let with_region = records.iter().filter(|r| r.region().is_some()).count();
        let union: usize = Region::ALL
            .iter()
            .map(|&region| {
                let filter = FilterConfig::new(RegionSelector::Region(region), YearFilter::AllYears);
                apply_filters(&records, &filter).len()
            })
            .sum();
        assert_eq!(union, with_region);
    }

    #[test]
    fn test_seller_options_follow_region_and_year() {
        let records = records();
        assert_eq!(
            seller_options(&records, RegionSelector::Country, YearFilter::AllYears),
            vec!["Ana", "Beto", "Caro", "Dani"]
        );
        assert_eq!(
            seller_options(
                &records,
                RegionSelector::Region(Region::Caribe),
                YearFilter::AllYears
            ),
            vec!["Ana"]
        );
        assert!(seller_options(&records, RegionSelector::Country, YearFilter::single(2020).unwrap())
            .contains(&"Caro".to_string()));
    }
}
