use crate::domain::summary::{Category, DailyReport, RegionReport};
use crate::format_utils::format_float;
use serde::Serialize;

/// Fill classification for one treemap cell. The fraction interpolates
/// between the pale and saturated ends of the red/green ramps: 1.0 is fully
/// saturated, 0.0 is pale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "ramp", content = "fraction")]
pub enum NodeShade {
    #[serde(rename = "red")]
    Red(f64),
    #[serde(rename = "green")]
    Green(f64),
    #[serde(rename = "full_red")]
    FullRed,
}

/// One treemap cell, possibly with nested sub-regions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapNode {
    pub name: String,
    pub value: i64,
    /// Active cases (today, one day ago).
    pub active: (i64, i64),
    pub shade: NodeShade,
    /// Day-over-day change label, e.g. `▼12.34%`; absent when undefined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub children: Vec<TreemapNode>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorldTotals {
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapPlot {
    pub nodes: Vec<TreemapNode>,
    pub totals: WorldTotals,
}

/// Interpolation fraction for an active-cases ratio: full intensity until the
/// ratio passes 0.95, then fading out linearly and clamping at 1.0.
pub fn interpolation_fraction(ratio: f64) -> f64 {
    (1.0 - (ratio - 0.95).max(0.0) * 20.0).clamp(0.0, 1.0)
}

/// Classify a cell by comparing today's active cases against yesterday's.
/// Growth shades red, shrinkage shades green; with no usable yesterday value
/// the cell falls back to full red.
pub fn shade(active_now: i64, active_prev: i64) -> NodeShade {
    if active_now > active_prev {
        NodeShade::Red(interpolation_fraction(active_prev as f64 / active_now as f64))
    } else if active_prev != 0 {
        NodeShade::Green(interpolation_fraction(active_now as f64 / active_prev as f64))
    } else {
        NodeShade::FullRed
    }
}

/// Day-over-day change label. `None` when today's active count is zero, since
/// the ratio is undefined there.
pub fn change_label(active_now: i64, active_prev: i64) -> Option<String> {
    if active_now == 0 {
        return None;
    }
    let p = 100.0 - (active_prev as f64 / active_now as f64) * 100.0;
    let arrow = if p > 0.0 { "▼" } else { "▲" };
    Some(format!("{}{}%", arrow, format_float(p)))
}

/// Day-over-day "active cases" treemap over two daily reports.
#[derive(Default)]
pub struct TreemapChart {
    today: Option<DailyReport>,
    one_day_ago: Option<DailyReport>,
}

impl TreemapChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_data(&mut self, today: DailyReport, one_day_ago: DailyReport) {
        self.today = Some(today);
        self.one_day_ago = Some(one_day_ago);
    }

    pub fn has_data(&self) -> bool {
        self.today.is_some()
    }

    /// Recompute every cell for the selected category, accumulating world
    /// totals along the way.
    pub fn change_data(&self, category: Category) -> TreemapPlot {
        let mut totals = WorldTotals::default();
        let mut nodes = Vec::new();

        if let Some(today) = &self.today {
            for (name, region) in today {
                let prev = self.one_day_ago.as_ref().and_then(|r| r.get(name));
                nodes.push(walk_region(name, region, prev, category));
                totals.confirmed += region.confirmed;
                totals.deaths += region.deaths;
                totals.recovered += region.recovered;
            }
        }

        TreemapPlot { nodes, totals }
    }
}

fn walk_region(
    name: &str,
    region: &RegionReport,
    prev: Option<&RegionReport>,
    category: Category,
) -> TreemapNode {
    let active_now = region.active();
    let active_prev = prev.map(|r| r.active()).unwrap_or(0);
    let children = region
        .children
        .as_ref()
        .map(|children| {
            children
                .iter()
                .map(|(child_name, child)| {
                    let child_prev = prev
                        .and_then(|p| p.children.as_ref())
                        .and_then(|c| c.get(child_name));
                    walk_region(child_name, child, child_prev, category)
                })
                .collect()
        })
        .unwrap_or_default();

    TreemapNode {
        name: name.to_string(),
        value: region.value(category),
        active: (active_now, active_prev),
        shade: shade(active_now, active_prev),
        change: change_label(active_now, active_prev),
        children,
    }
}
