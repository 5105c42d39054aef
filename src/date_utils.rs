use chrono::{Datelike, Duration, NaiveDate, Weekday};
use once_cell::sync::Lazy;

/// Fixed fallback for malformed date strings. Earlier than any feed entry, so
/// a defaulted date lands outside every real window instead of raising.
pub static FALLBACK_DATE: Lazy<NaiveDate> =
    Lazy::new(|| NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default());

/// Weekday on which a candle bucket closes. The feed convention is Monday.
pub const WEEK_ANCHOR: Weekday = Weekday::Mon;

/// Date string styles seen on the wire and in URLs.
///
/// The summary feed uses the compact form (`20200410`), the candle chart's
/// slider and URL parameters use the slash form (`2020/04/10`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    Compact,
    Slash,
}

/// Result of parsing a date string. Malformed input fails closed to
/// [`FALLBACK_DATE`], but callers (and tests) can still tell the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Parsed(NaiveDate),
    Defaulted(NaiveDate),
}

impl ParsedDate {
    pub fn date(&self) -> NaiveDate {
        match self {
            ParsedDate::Parsed(d) | ParsedDate::Defaulted(d) => *d,
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, ParsedDate::Defaulted(_))
    }
}

fn atoi(s: &str) -> Option<u32> {
    s.parse::<u32>().ok()
}

/// Parse a `YYYYMMDD` or `YYYY/MM/DD` string into a calendar date.
///
/// Never fails: anything that does not resolve to a valid calendar day comes
/// back as `Defaulted(FALLBACK_DATE)`.
pub fn parse_date(s: &str) -> ParsedDate {
    let parts: Option<(u32, u32, u32)> = if s.contains('/') {
        let mut it = s.split('/');
        match (it.next(), it.next(), it.next(), it.next()) {
            (Some(y), Some(m), Some(d), None) => {
                match (atoi(y), atoi(m), atoi(d)) {
                    (Some(y), Some(m), Some(d)) => Some((y, m, d)),
                    _ => None,
                }
            }
            _ => None,
        }
    } else if s.len() == 8 && s.is_ascii() {
        match (atoi(&s[0..4]), atoi(&s[4..6]), atoi(&s[6..8])) {
            (Some(y), Some(m), Some(d)) => Some((y, m, d)),
            _ => None,
        }
    } else {
        None
    };

    parts
        .and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y as i32, m, d))
        .map(ParsedDate::Parsed)
        .unwrap_or(ParsedDate::Defaulted(*FALLBACK_DATE))
}

/// Format a date in the given wire style.
pub fn format_date(date: NaiveDate, style: DateStyle) -> String {
    match style {
        DateStyle::Compact => date.format("%Y%m%d").to_string(),
        DateStyle::Slash => date.format("%Y/%m/%d").to_string(),
    }
}

/// Inclusive daily sequence of formatted date strings, used to populate the
/// slider/selector domains.
pub fn date_range(start: NaiveDate, end: NaiveDate, style: DateStyle) -> Vec<String> {
    let mut out = Vec::new();
    let mut date = start;
    while date <= end {
        out.push(format_date(date, style));
        date += Duration::days(1);
    }
    out
}

/// Days elapsed since the most recent anchor weekday (0 when `date` is itself
/// the anchor).
pub fn days_since_anchor(date: NaiveDate, anchor: Weekday) -> i64 {
    let diff = 7 + date.weekday().num_days_from_monday() as i64
        - anchor.num_days_from_monday() as i64;
    diff % 7
}
