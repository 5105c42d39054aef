//! Shared series primitives used by every chart transform.

use crate::date_utils::parse_date;
use crate::domain::summary::{Category, Cdr, CountrySummary, DailyPoint, WorldSummary};
use chrono::NaiveDate;
use serde::Serialize;

/// A cumulative point resolved to a calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatedValue {
    pub date: NaiveDate,
    pub value: i64,
}

/// Country overview row for selector lists: name plus latest CDR.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryOverview {
    pub name: String,
    pub cdr: Cdr,
}

/// Cumulative values for one category, in series order.
pub fn cumulative_series(daily: &[DailyPoint], category: Category) -> Vec<DatedValue> {
    daily
        .iter()
        .map(|p| DatedValue { date: parse_date(&p.date).date(), value: p.cdr.get(category) })
        .collect()
}

/// Day-over-day deltas for one category. Upstream data corrections can move
/// a cumulative count backwards; those days clamp to zero.
pub fn daily_deltas(daily: &[DailyPoint], category: Category) -> Vec<DatedValue> {
    let mut yesterday = 0i64;
    daily
        .iter()
        .map(|p| {
            let cumulative = p.cdr.get(category);
            let delta = (cumulative - yesterday).max(0);
            yesterday = cumulative;
            DatedValue { date: parse_date(&p.date).date(), value: delta }
        })
        .collect()
}

/// First and last reported date of one country, if it has any data.
pub fn country_date_range(country: &CountrySummary) -> Option<(NaiveDate, NaiveDate)> {
    let first = country.daily.first()?;
    let last = country.daily.last()?;
    Some((parse_date(&first.date).date(), parse_date(&last.date).date()))
}

/// Tightest date range covering every country in the feed.
pub fn dataset_date_range(raw: &WorldSummary) -> Option<(NaiveDate, NaiveDate)> {
    let mut range: Option<(NaiveDate, NaiveDate)> = None;
    for country in raw.countrys.values() {
        if let Some((start, end)) = country_date_range(country) {
            range = Some(match range {
                None => (start, end),
                Some((s, e)) => (s.min(start), e.max(end)),
            });
        }
    }
    range
}

/// Selector rows for every country that actually reported data, with the
/// latest cumulative triple taken from the last daily entry.
pub fn country_overviews(raw: &WorldSummary) -> Vec<CountryOverview> {
    raw.countrys
        .iter()
        .filter_map(|(name, country)| {
            country.daily.last().map(|last| CountryOverview {
                name: name.clone(),
                cdr: last.cdr,
            })
        })
        .collect()
}
