use super::region::{Region, COUNTRY_LABEL};
use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

pub const MIN_YEAR: i32 = 2020;
pub const MAX_YEAR: i32 = 2023;

pub const MIN_TOP_N: usize = 2;
pub const MAX_TOP_N: usize = 10;
pub const DEFAULT_TOP_N: usize = 5;

/// Region selector entry: the whole country or one named region
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RegionSelector {
    #[default]
    Country,
    Region(Region),
}

impl RegionSelector {
    /// Every selector entry, whole country first
    pub fn options() -> Vec<RegionSelector> {
        std::iter::once(RegionSelector::Country)
            .chain(Region::ALL.iter().copied().map(RegionSelector::Region))
            .collect()
    }

    /// Whole country keeps everything not tagged with the country itself.
    /// `Region` has no country variant, so that is every record, including
    /// those whose city has no region.
    pub fn matches(&self, region: Option<Region>) -> bool {
        match self {
            RegionSelector::Country => true,
            RegionSelector::Region(selected) => region == Some(*selected),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RegionSelector::Country => COUNTRY_LABEL,
            RegionSelector::Region(r) => r.name(),
        }
    }
}

impl fmt::Display for RegionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RegionSelector {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case(COUNTRY_LABEL) {
            return Ok(RegionSelector::Country);
        }
        s.parse::<Region>()
            .map(RegionSelector::Region)
            .map_err(DashboardError::InvalidFilter)
    }
}

impl Serialize for RegionSelector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for RegionSelector {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// "All years" toggle plus the single-year slider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "year")]
pub enum YearFilter {
    #[default]
    AllYears,
    Single(i32),
}

impl YearFilter {
    pub fn single(year: i32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DashboardError::InvalidFilter(format!(
                "year {} outside [{}, {}]",
                year, MIN_YEAR, MAX_YEAR
            )));
        }
        Ok(YearFilter::Single(year))
    }

    pub fn matches(&self, year: i32) -> bool {
        match self {
            YearFilter::AllYears => true,
            YearFilter::Single(selected) => *selected == year,
        }
    }
}

/// Full filter configuration collected from the dashboard controls
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterConfig {
    pub region: RegionSelector,
    pub year: YearFilter,
    /// Empty means no seller restriction
    pub sellers: BTreeSet<String>,
}

impl FilterConfig {
    pub fn new(region: RegionSelector, year: YearFilter) -> Self {
        Self {
            region,
            year,
            sellers: BTreeSet::new(),
        }
    }

    pub fn with_sellers<I, S>(mut self, sellers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sellers = sellers.into_iter().map(Into::into).collect();
        self
    }

    pub fn matches_seller(&self, seller: &str) -> bool {
        self.sellers.is_empty() || self.sellers.contains(seller)
    }
}

/// Number of sellers shown in the seller tab, bounded to [2, 10]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TopN(usize);

impl TopN {
    pub fn new(n: usize) -> Result<Self> {
        if !(MIN_TOP_N..=MAX_TOP_N).contains(&n) {
            return Err(DashboardError::InvalidFilter(format!(
                "top_n {} outside [{}, {}]",
                n, MIN_TOP_N, MAX_TOP_N
            )));
        }
        Ok(TopN(n))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for TopN {
    fn default() -> Self {
        TopN(DEFAULT_TOP_N)
    }
}
