use derive_more::{Deref, From, Into};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - the metric a chart is currently plotting
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
pub enum Category {
    #[strum(serialize = "confirmed")]
    #[serde(rename = "confirmed")]
    Confirmed,

    #[strum(serialize = "deaths")]
    #[serde(rename = "deaths")]
    Deaths,

    #[strum(serialize = "recovered")]
    #[serde(rename = "recovered")]
    Recovered,
}

impl Category {
    /// Position inside a CDR triple.
    pub fn index(self) -> usize {
        match self {
            Category::Confirmed => 0,
            Category::Deaths => 1,
            Category::Recovered => 2,
        }
    }

    /// Unknown category strings fall back to the default instead of failing,
    /// mirroring how an unrecognized URL parameter is treated.
    pub fn parse_or_default(s: &str) -> Self {
        Category::from_str(s).unwrap_or(Category::Confirmed)
    }
}

/// Value Object - axis scale selection.
///
/// The URL token for the linear scale really is `liner`; it is part of the
/// published query-string contract and is preserved as-is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, EnumString, AsRefStr,
    Serialize, Deserialize,
)]
pub enum ScaleKind {
    #[strum(serialize = "liner")]
    #[serde(rename = "liner")]
    Linear,

    #[strum(serialize = "log")]
    #[serde(rename = "log")]
    Log,
}

impl ScaleKind {
    /// Lower bound of the value domain. Log scales cannot include zero.
    pub fn domain_floor(self) -> f64 {
        match self {
            ScaleKind::Linear => 0.0,
            ScaleKind::Log => 1.0,
        }
    }

    pub fn parse_or_default(s: &str) -> Self {
        ScaleKind::from_str(s).unwrap_or(ScaleKind::Linear)
    }
}

/// Value Object - cumulative (confirmed, deaths, recovered) triple
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, From, Into, Deref, Serialize, Deserialize,
)]
pub struct Cdr(pub [i64; 3]);

impl Cdr {
    pub fn get(&self, category: Category) -> i64 {
        self.0[category.index()]
    }

    /// Cases still active at this point: confirmed minus deaths and recovered.
    pub fn active(&self) -> i64 {
        self.0[0] - self.0[1] - self.0[2]
    }
}
