use chrono::NaiveDate;
use covid_chart_wasm::domain::chart::line::LineChart;
use covid_chart_wasm::domain::query::Query;
use covid_chart_wasm::domain::summary::{Cdr, CountrySummary, DailyPoint, WorldSummary};
use covid_chart_wasm::view_state::ViewState;
use std::collections::BTreeMap;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn country(points: &[(&str, i64)]) -> CountrySummary {
    let daily = points
        .iter()
        .map(|(d, c)| DailyPoint { date: (*d).to_string(), cdr: Cdr([*c, 0, 0]) })
        .collect();
    let last = points.last().map(|(_, c)| *c).unwrap_or(0);
    CountrySummary { daily, cdr: Cdr([last, 0, 0]) }
}

fn summary() -> WorldSummary {
    let mut countrys = BTreeMap::new();
    countrys.insert(
        "Japan".to_string(),
        country(&[("20200401", 100), ("20200402", 130), ("20200403", 150)]),
    );
    countrys.insert(
        "Italy".to_string(),
        country(&[("20200401", 2000), ("20200402", 2500), ("20200403", 3100)]),
    );
    // Reports only before the test window opens.
    countrys.insert("Early".to_string(), country(&[("20200301", 7)]));
    WorldSummary { countrys, cdr: Cdr([5000, 100, 400]) }
}

fn view(start: &str, end: &str) -> ViewState {
    let mut q = Query::new();
    q.set("startdate", start);
    q.set("enddate", end);
    ViewState::from_query(&q)
}

fn chart() -> LineChart {
    let mut chart = LineChart::new(1560.0);
    chart.add_data(summary());
    chart
}

#[test]
fn one_line_per_visible_country() {
    let plot = chart().change_data(&view("2020/04/01", "2020/04/03"));
    let names: Vec<&str> = plot.lines.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Italy", "Japan"]);
    assert_eq!(plot.lines[1].values.len(), 3);
}

#[test]
fn hidden_countries_are_skipped() {
    let mut chart = chart();
    chart.set_country_visible("Italy", false);

    let plot = chart.change_data(&view("2020/04/01", "2020/04/03"));
    let names: Vec<&str> = plot.lines.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, vec!["Japan"]);

    chart.set_country_visible("Italy", true);
    assert_eq!(chart.change_data(&view("2020/04/01", "2020/04/03")).lines.len(), 2);
}

#[test]
fn countries_without_points_in_window_are_omitted() {
    let plot = chart().change_data(&view("2020/04/01", "2020/04/03"));
    assert!(plot.lines.iter().all(|l| l.name != "Early"));
}

#[test]
fn y_domain_tracks_the_visible_peak() {
    let mut chart = chart();
    assert_eq!(chart.change_data(&view("2020/04/01", "2020/04/03")).y_domain, (0.0, 3100.0));

    // With Italy hidden the peak drops to Japan's last cumulative value.
    chart.set_country_visible("Italy", false);
    assert_eq!(chart.change_data(&view("2020/04/01", "2020/04/03")).y_domain.1, 150.0);
}

#[test]
fn window_clipping_keeps_cumulative_values() {
    let plot = chart().change_data(&view("2020/04/02", "2020/04/03"));
    let japan = plot.lines.iter().find(|l| l.name == "Japan").unwrap();
    assert_eq!(japan.values[0].date, date(2020, 4, 2));
    assert_eq!(japan.values[0].value, 130);
}

#[test]
fn totals_come_from_the_world_feed() {
    let plot = chart().change_data(&view("2020/04/01", "2020/04/03"));
    assert_eq!(plot.totals.confirmed, "5,000");
    assert_eq!(plot.totals.recovered, "400");
}
