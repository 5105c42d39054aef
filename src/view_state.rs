use crate::date_utils::{parse_date, ParsedDate};
use crate::domain::query::Query;
use crate::domain::summary::{Category, ScaleKind};

/// Immutable snapshot of the view parameters a transform needs, built from a
/// [`Query`]. Transforms receive this instead of reaching into shared display
/// state; unknown or malformed parameters fall back to defaults here, in one
/// place.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub category: Category,
    pub yscale: ScaleKind,
    pub xscale: ScaleKind,
    pub country: String,
    pub start: ParsedDate,
    pub end: ParsedDate,
    pub date: ParsedDate,
    pub rank: usize,
}

pub const DEFAULT_COUNTRY: &str = "Japan";
pub const DEFAULT_RANK: usize = 30;

impl ViewState {
    pub fn from_query(query: &Query) -> Self {
        let country = query.get("country");
        Self {
            category: Category::parse_or_default(query.get("category")),
            yscale: ScaleKind::parse_or_default(query.get("yscale")),
            xscale: ScaleKind::parse_or_default(query.get("xscale")),
            country: if country.is_empty() { DEFAULT_COUNTRY.to_string() } else { country.to_string() },
            start: parse_date(query.get("startdate")),
            end: parse_date(query.get("enddate")),
            date: parse_date(query.get("date")),
            rank: query.get("rank").parse().unwrap_or(DEFAULT_RANK),
        }
    }
}
