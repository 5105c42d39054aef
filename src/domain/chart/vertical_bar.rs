use crate::date_utils::{date_range, format_date, DateStyle};
use crate::domain::chart::{ChartView, Totals, Viewport};
use crate::domain::query::Query;
use crate::domain::summary::services::{daily_deltas, dataset_date_range};
use crate::domain::summary::{Category, ScaleKind, WorldSummary};
use crate::view_state::{ViewState, DEFAULT_COUNTRY};
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPoint {
    pub date: NaiveDate,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerticalBarPlot {
    pub bars: Vec<BarPoint>,
    pub bar_width: u32,
    pub x_domain: (NaiveDate, NaiveDate),
    pub y_domain: (f64, f64),
    pub totals: Totals,
}

/// Day-over-day delta bars for one selected country.
pub struct VerticalBarChart {
    raw: Option<WorldSummary>,
    viewport: Viewport,
    y_floor: f64,
    dataset_window: Option<(NaiveDate, NaiveDate)>,
    slider_days: Vec<String>,
}

impl VerticalBarChart {
    pub fn new(outer_width: f64) -> Self {
        Self {
            raw: None,
            viewport: Viewport::from_outer(outer_width, 860.0),
            y_floor: ScaleKind::Linear.domain_floor(),
            dataset_window: None,
            slider_days: Vec::new(),
        }
    }

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

    pub fn slider_days(&self) -> &[String] {
        &self.slider_days
    }

    pub fn countries(&self) -> Vec<String> {
        match &self.raw {
            Some(raw) => raw.countrys.keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    pub fn change_data(&self, view: &ViewState) -> VerticalBarPlot {
        let window = (view.start.date(), view.end.date());
        let mut bars = Vec::new();
        let mut y_max = 0f64;
        let mut totals = Totals::default();

        if let Some(country) = self.raw.as_ref().and_then(|raw| raw.countrys.get(&view.country)) {
            for point in daily_deltas(&country.daily, view.category) {
                if point.date < window.0 || point.date > window.1 {
                    continue;
                }
                if point.value as f64 > y_max {
                    y_max = point.value as f64;
                }
                bars.push(BarPoint { date: point.date, value: point.value });
            }
            totals = Totals::from_cdr(country.cdr);
        }

        // One bar per day across the window, whether or not every day has data.
        let days = (window.1 - window.0).num_days() + 1;
        let bar_width = ((self.viewport.width / days.max(1) as f64).floor() as u32).max(1);

        VerticalBarPlot {
            bars,
            bar_width,
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
            None => ("2020/04/01".to_string(), "2020/04/10".to_string()),
        }
    }
}

impl ChartView for VerticalBarChart {
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

impl Default for VerticalBarChart {
    fn default() -> Self {
        Self::new(8000.0)
    }
}
