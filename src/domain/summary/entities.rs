pub use super::value_objects::{Category, Cdr, ScaleKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One reported day for one country: the raw wire date string plus the
/// cumulative CDR triple as of that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    pub date: String,
    pub cdr: Cdr,
}

/// Chronological per-country series plus the latest cumulative triple.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub daily: Vec<DailyPoint>,
    pub cdr: Cdr,
}

/// The whole summary feed. Immutable once fetched for the session.
///
/// The wire key is spelled `countrys` in the published feed and must stay
/// that way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorldSummary {
    pub countrys: BTreeMap<String, CountrySummary>,
    pub cdr: Cdr,
}

/// One region entry of a daily report, used by the treemap. Regions may carry
/// one level of sub-regions in `children`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionReport {
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<BTreeMap<String, RegionReport>>,
}

impl RegionReport {
    pub fn active(&self) -> i64 {
        self.confirmed - self.deaths - self.recovered
    }

    pub fn value(&self, category: Category) -> i64 {
        match category {
            Category::Confirmed => self.confirmed,
            Category::Deaths => self.deaths,
            Category::Recovered => self.recovered,
        }
    }
}

/// A full daily report: region name to report entry.
pub type DailyReport = BTreeMap<String, RegionReport>;
