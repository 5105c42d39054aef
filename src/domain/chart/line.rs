use crate::date_utils::{date_range, format_date, DateStyle};
use crate::domain::chart::{ChartView, Totals, Viewport};
use crate::domain::query::Query;
use crate::domain::summary::services::cumulative_series;
use crate::domain::summary::{Category, ScaleKind, WorldSummary};
use crate::view_state::ViewState;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePoint {
    pub date: NaiveDate,
    pub value: i64,
}

/// One country's polyline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryLine {
    pub name: String,
    pub values: Vec<LinePoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePlot {
    pub lines: Vec<CountryLine>,
    pub x_domain: (NaiveDate, NaiveDate),
    pub y_domain: (f64, f64),
    pub totals: Totals,
}

/// Cumulative multi-country line transform.
pub struct LineChart {
    raw: Option<WorldSummary>,
    #[allow(dead_code)]
    viewport: Viewport,
    y_floor: f64,
    hidden: BTreeSet<String>,
    dataset_window: Option<(NaiveDate, NaiveDate)>,
    slider_days: Vec<String>,
}

impl LineChart {
    pub fn new(outer_width: f64) -> Self {
        Self {
            raw: None,
            viewport: Viewport::fixed(outer_width, 720.0),
            y_floor: ScaleKind::Linear.domain_floor(),
            hidden: BTreeSet::new(),
            dataset_window: None,
            slider_days: Vec::new(),
        }
    }

    pub fn add_data(&mut self, raw: WorldSummary) {
        self.dataset_window = crate::domain::summary::services::dataset_date_range(&raw);
        self.slider_days = match self.dataset_window {
            Some((start, end)) => date_range(start, end, DateStyle::Slash),
            None => Vec::new(),
        };
        self.raw = Some(raw);
    }

    pub fn reset_scale(&mut self, scale: ScaleKind) {
        self.y_floor = scale.domain_floor();
    }

    /// Toggle one country's visibility (checkbox state, not URL state).
    pub fn set_country_visible(&mut self, name: &str, visible: bool) {
        if visible {
            self.hidden.remove(name);
        } else {
            self.hidden.insert(name.to_string());
        }
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

    /// Recompute the visible polylines for the current view. Countries whose
    /// filtered series is empty are omitted entirely.
    pub fn change_data(&self, view: &ViewState) -> LinePlot {
        let window = (view.start.date(), view.end.date());
        let mut lines = Vec::new();
        let mut y_max = 0f64;
        let mut totals = Totals::default();

        if let Some(raw) = &self.raw {
            for (name, country) in &raw.countrys {
                if self.hidden.contains(name) {
                    continue;
                }
                let values: Vec<LinePoint> = cumulative_series(&country.daily, view.category)
                    .into_iter()
                    .filter(|p| p.date >= window.0 && p.date <= window.1)
                    .map(|p| {
                        if p.value as f64 > y_max {
                            y_max = p.value as f64;
                        }
                        LinePoint { date: p.date, value: p.value }
                    })
                    .collect();
                if values.is_empty() {
                    continue;
                }
                lines.push(CountryLine { name: name.clone(), values });
            }
            totals = Totals::from_cdr(raw.cdr);
        }

        LinePlot { lines, x_domain: window, y_domain: (self.y_floor, y_max), totals }
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

impl ChartView for LineChart {
    fn default_query(&self) -> Query {
        let (start, end) = self.default_window();
        let mut q = Query::new();
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

impl Default for LineChart {
    fn default() -> Self {
        Self::new(1560.0)
    }
}
