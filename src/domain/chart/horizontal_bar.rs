use crate::date_utils::{date_range, format_date, parse_date, DateStyle};
use crate::domain::chart::{ChartView, Viewport};
use crate::domain::query::Query;
use crate::domain::summary::{Category, Cdr, ScaleKind, WorldSummary};
use crate::view_state::{ViewState, DEFAULT_RANK};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// One ranked row: 1-based rank, country and its cumulative value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedBar {
    pub rank: usize,
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizontalBarPlot {
    pub bars: Vec<RankedBar>,
    pub bar_height: f64,
    pub x_domain: (f64, f64),
    pub date: NaiveDate,
}

#[derive(Debug, Clone)]
struct DayRecord {
    date: NaiveDate,
    values: Vec<(String, Cdr)>,
}

const DEFAULT_DATE: &str = "20200410";

/// Top-N country ranking for a chosen date and category.
pub struct HorizontalBarChart {
    index: HashMap<String, DayRecord>,
    has_data: bool,
    viewport: Viewport,
    x_floor: f64,
    default_date: String,
    slider_days: Vec<String>,
}

impl HorizontalBarChart {
    pub fn new(outer_width: f64) -> Self {
        Self {
            index: HashMap::new(),
            has_data: false,
            viewport: Viewport::from_outer(outer_width, 720.0),
            x_floor: ScaleKind::Linear.domain_floor(),
            default_date: DEFAULT_DATE.to_string(),
            slider_days: Vec::new(),
        }
    }

    /// Build the per-date index: every reported day maps to the cumulative
    /// CDR of every country that reported it.
    pub fn add_data(&mut self, raw: WorldSummary) {
        self.index.clear();
        let mut range: Option<(NaiveDate, NaiveDate)> = None;

        for (name, country) in &raw.countrys {
            if country.daily.is_empty() {
                continue;
            }
            for day in &country.daily {
                let date = parse_date(&day.date).date();
                range = Some(match range {
                    None => (date, date),
                    Some((s, e)) => (s.min(date), e.max(date)),
                });
                self.index
                    .entry(day.date.clone())
                    .or_insert_with(|| DayRecord { date, values: Vec::new() })
                    .values
                    .push((name.clone(), day.cdr));
            }
        }

        if let Some((start, end)) = range {
            self.default_date = format_date(end, DateStyle::Compact);
            self.slider_days = date_range(start, end, DateStyle::Compact);
        }
        self.has_data = !self.index.is_empty();
    }

    pub fn reset_scale(&mut self, scale: ScaleKind) {
        self.x_floor = scale.domain_floor();
    }

    pub fn slider_days(&self) -> &[String] {
        &self.slider_days
    }

    /// Rank countries for the requested date, falling back to the dataset's
    /// latest date when that day is absent from the feed.
    pub fn change_data(&self, view: &ViewState) -> HorizontalBarPlot {
        let requested = format_date(view.date.date(), DateStyle::Compact);
        let record = self.index.get(&requested).or_else(|| self.index.get(&self.default_date));

        let Some(record) = record else {
            return HorizontalBarPlot {
                bars: Vec::new(),
                bar_height: self.viewport.height,
                x_domain: (self.x_floor, 0.0),
                date: view.date.date(),
            };
        };

        let date = record.date;
        let mut values = record.values.clone();
        // Descending by value; ties break by country name ascending so the
        // ranking is deterministic across runs.
        values.sort_by(|a, b| {
            b.1.get(view.category).cmp(&a.1.get(view.category)).then_with(|| a.0.cmp(&b.0))
        });

        let len = values.len().min(view.rank.max(1));
        let mut x_max = 0f64;
        let bars: Vec<RankedBar> = values
            .into_iter()
            .take(len)
            .enumerate()
            .map(|(i, (name, cdr))| {
                let value = cdr.get(view.category);
                x_max = x_max.max(value as f64);
                RankedBar { rank: i + 1, name, value }
            })
            .collect();

        HorizontalBarPlot {
            bars,
            bar_height: self.viewport.height / len.max(1) as f64,
            x_domain: (self.x_floor, x_max),
            date,
        }
    }
}

impl ChartView for HorizontalBarChart {
    fn default_query(&self) -> Query {
        let mut q = Query::new();
        q.set("category", Category::Confirmed.as_ref());
        q.set("rank", &DEFAULT_RANK.to_string());
        q.set("xscale", ScaleKind::Linear.as_ref());
        q.set("date", &self.default_date);
        q
    }

    fn load_data(&mut self, raw: WorldSummary) {
        self.add_data(raw);
    }

    fn render(&mut self, query: &Query) -> Option<String> {
        if !self.has_data {
            return None;
        }
        let view = ViewState::from_query(query);
        self.reset_scale(view.xscale);
        let plot = self.change_data(&view);
        serde_json::to_string(&plot).ok()
    }
}

impl Default for HorizontalBarChart {
    fn default() -> Self {
        Self::new(1600.0)
    }
}
