use crate::date_utils::{date_range, days_since_anchor, format_date, DateStyle, WEEK_ANCHOR};
use crate::domain::chart::{ChartView, Totals, Viewport};
use crate::domain::query::Query;
use crate::domain::summary::services::{
    country_overviews, daily_deltas, dataset_date_range, CountryOverview,
};
use crate::domain::summary::{Category, ScaleKind, WorldSummary};
use crate::view_state::{ViewState, DEFAULT_COUNTRY};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// One weekly candle: daily deltas aggregated between two anchor weekdays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleBucket {
    /// Midpoint of the bucket, used as the candle's x position.
    pub date: NaiveDateTime,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub open: i64,
    pub close: i64,
    pub high: i64,
    pub low: i64,
}

/// Candle width fallback when there is nothing to plot.
pub const DEFAULT_CANDLE_WIDTH: u32 = 10;

const DEFAULT_START: &str = "2020/04/01";
const DEFAULT_END: &str = "2020/04/10";

/// Plot-ready output of one `change_data` pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandlePlot {
    pub candles: Vec<CandleBucket>,
    pub candle_width: u32,
    pub x_domain: (NaiveDate, NaiveDate),
    pub y_domain: (f64, f64),
    pub totals: Totals,
}

/// Weekly candlestick transform for one selected country.
pub struct CandleChart {
    raw: Option<WorldSummary>,
    viewport: Viewport,
    y_floor: f64,
    dataset_window: Option<(NaiveDate, NaiveDate)>,
    slider_days: Vec<String>,
}

impl CandleChart {
    pub fn new(outer_width: f64) -> Self {
        Self {
            raw: None,
            viewport: Viewport::from_outer(outer_width, 720.0),
            y_floor: ScaleKind::Linear.domain_floor(),
            dataset_window: None,
            slider_days: Vec::new(),
        }
    }

    /// Index the feed: dataset date range seeds the slider domain and the
    /// default window.
    pub fn add_data(&mut self, raw: WorldSummary) {
        self.dataset_window = dataset_date_range(&raw);
        self.slider_days = match self.dataset_window {
            Some((start, end)) => date_range(start, end, DateStyle::Slash),
            None => Vec::new(),
        };
        self.raw = Some(raw);
    }

    pub fn reset_scale(&mut self, scale: ScaleKind) {
        self.y_floor = scale.domain_floor();
    }

    /// Slider domain (inclusive daily sequence over the dataset range).
    pub fn slider_days(&self) -> &[String] {
        &self.slider_days
    }

    /// Country selector rows.
    pub fn countries(&self) -> Vec<CountryOverview> {
        self.raw.as_ref().map(country_overviews).unwrap_or_default()
    }

    /// Recompute the weekly candle buckets for the current view.
    pub fn change_data(&self, view: &ViewState) -> CandlePlot {
        let window = (view.start.date(), view.end.date());
        let mut candles = Vec::new();
        let mut y_max = 0f64;
        let mut totals = Totals::default();

        if let Some(country) = self.raw.as_ref().and_then(|raw| raw.countrys.get(&view.country)) {
            // Deltas run over the full series so the running "yesterday"
            // stays correct even when the window clips early days.
            let deltas = daily_deltas(&country.daily, view.category);

            let mut open = 0i64;
            let mut close = 0i64;
            let mut high = 0i64;
            let mut low = 0i64;
            let mut seeded = false;
            let mut last_date: Option<NaiveDate> = None;

            for point in deltas {
                if point.date < window.0 || point.date > window.1 {
                    continue;
                }
                if point.value as f64 > y_max {
                    y_max = point.value as f64;
                }
                close = point.value;
                if !seeded {
                    // The very first bucket has no carried-over close, so its
                    // extremes start from real data rather than zero.
                    high = close;
                    low = close;
                    seeded = true;
                } else {
                    if close > high {
                        high = close;
                    }
                    if close < low {
                        low = close;
                    }
                }
                last_date = Some(point.date);

                if point.date.weekday() == WEEK_ANCHOR {
                    let start = point.date - Duration::days(6);
                    candles.push(CandleBucket {
                        date: midpoint(start),
                        start,
                        end: point.date,
                        open,
                        close,
                        high,
                        low,
                    });
                    open = close;
                    high = close;
                    low = close;
                }
            }

            // Trailing partial week when the series does not end on the anchor.
            if let Some(date) = last_date {
                if date.weekday() != WEEK_ANCHOR {
                    let start = date - Duration::days(days_since_anchor(date, WEEK_ANCHOR));
                    candles.push(CandleBucket {
                        date: midpoint(start),
                        start,
                        end: date,
                        open,
                        close,
                        high,
                        low,
                    });
                }
            }

            totals = Totals::from_cdr(country.cdr);
        }

        let candle_width = if candles.is_empty() {
            DEFAULT_CANDLE_WIDTH
        } else {
            let span_days = (window.1 - window.0).num_days() as f64;
            let total_weeks = (span_days / 7.0).max(1.0);
            ((self.viewport.width / total_weeks * 0.95).floor() as u32).max(3)
        };

        CandlePlot {
            candles,
            candle_width,
            x_domain: window,
            y_domain: (self.y_floor, y_max),
            totals,
        }
    }

    fn default_window(&self) -> (String, String) {
        match self.dataset_window {
            Some((start, end)) => {
                (format_date(start, DateStyle::Slash), format_date(end, DateStyle::Slash))
            }
            None => (DEFAULT_START.to_string(), DEFAULT_END.to_string()),
        }
    }
}

/// Midpoint of a 7-day bucket: 3.5 days past its start.
fn midpoint(start: NaiveDate) -> NaiveDateTime {
    start.and_time(NaiveTime::MIN) + Duration::hours(84)
}

impl ChartView for CandleChart {
    fn default_query(&self) -> Query {
        let (start, end) = self.default_window();
        let mut q = Query::new();
        q.set("country", DEFAULT_COUNTRY);
        q.set("category", Category::Confirmed.as_ref());
        q.set("yscale", ScaleKind::Linear.as_ref());
        q.set("startdate", &start);
        q.set("enddate", &end);
        q
    }

    fn load_data(&mut self, raw: WorldSummary) {
        self.add_data(raw);
    }

    fn render(&mut self, query: &Query) -> Option<String> {
        self.raw.as_ref()?;
        let view = ViewState::from_query(query);
        self.reset_scale(view.yscale);
        let plot = self.change_data(&view);
        serde_json::to_string(&plot).ok()
    }
}

impl Default for CandleChart {
    fn default() -> Self {
        Self::new(1600.0)
    }
}
