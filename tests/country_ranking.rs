use chrono::NaiveDate;
use covid_chart_wasm::domain::chart::horizontal_bar::HorizontalBarChart;
use covid_chart_wasm::domain::query::Query;
use covid_chart_wasm::domain::summary::{Cdr, CountrySummary, DailyPoint, ScaleKind, WorldSummary};
use covid_chart_wasm::view_state::ViewState;
use std::collections::BTreeMap;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn country(points: &[(&str, i64, i64, i64)]) -> CountrySummary {
    let daily = points
        .iter()
        .map(|(d, c, de, r)| DailyPoint { date: (*d).to_string(), cdr: Cdr([*c, *de, *r]) })
        .collect();
    let last = points.last().map(|(_, c, de, r)| Cdr([*c, *de, *r])).unwrap_or_default();
    CountrySummary { daily, cdr: last }
}

fn summary() -> WorldSummary {
    let mut countrys = BTreeMap::new();
    countrys.insert(
        "Austria".to_string(),
        country(&[("20200409", 90, 4, 10), ("20200410", 100, 5, 12)]),
    );
    countrys.insert("Belgium".to_string(), country(&[("20200409", 40, 1, 2), ("20200410", 50, 2, 3)]));
    countrys.insert(
        "Croatia".to_string(),
        country(&[("20200409", 95, 9, 11), ("20200410", 100, 10, 14)]),
    );
    WorldSummary { countrys, cdr: Cdr([250, 17, 29]) }
}

fn view_for(date: &str, rank: &str) -> ViewState {
    let mut q = Query::new();
    q.set("date", date);
    q.set("rank", rank);
    ViewState::from_query(&q)
}

fn chart() -> HorizontalBarChart {
    let mut chart = HorizontalBarChart::new(1600.0);
    chart.add_data(summary());
    chart
}

#[test]
fn top_n_orders_by_value_then_name() {
    let plot = chart().change_data(&view_for("20200410", "2"));

    assert_eq!(plot.bars.len(), 2);
    // Austria and Croatia tie on 100; the name breaks the tie.
    assert_eq!(plot.bars[0].name, "Austria");
    assert_eq!(plot.bars[0].rank, 1);
    assert_eq!(plot.bars[1].name, "Croatia");
    assert_eq!(plot.bars[1].rank, 2);
    assert_eq!(plot.bars[1].value, 100);
}

#[test]
fn missing_date_falls_back_to_latest() {
    // The defaulted date (no `date` parameter) is not in the feed.
    let plot = chart().change_data(&ViewState::from_query(&Query::new()));
    assert_eq!(plot.date, date(2020, 4, 10));
    assert_eq!(plot.bars.first().map(|b| b.value), Some(100));
}

#[test]
fn earlier_dates_rank_their_own_values() {
    let plot = chart().change_data(&view_for("20200409", "3"));
    assert_eq!(plot.date, date(2020, 4, 9));
    assert_eq!(plot.bars[0].name, "Croatia");
    assert_eq!(plot.bars[0].value, 95);
    assert_eq!(plot.bars[2].name, "Belgium");
}

#[test]
fn rank_zero_still_shows_one_bar() {
    let plot = chart().change_data(&view_for("20200410", "0"));
    assert_eq!(plot.bars.len(), 1);
}

#[test]
fn bar_height_divides_the_plot_area() {
    let plot = chart().change_data(&view_for("20200410", "2"));
    // from_outer(1600, 720) leaves a 690px tall plot area.
    assert_eq!(plot.bar_height, 345.0);
}

#[test]
fn x_domain_spans_floor_to_leader() {
    let mut chart = chart();
    let plot = chart.change_data(&view_for("20200410", "3"));
    assert_eq!(plot.x_domain, (0.0, 100.0));

    chart.reset_scale(ScaleKind::Log);
    assert_eq!(chart.change_data(&view_for("20200410", "3")).x_domain.0, 1.0);
}

#[test]
fn deaths_category_ranks_independently() {
    let mut q = Query::new();
    q.set("date", "20200410");
    q.set("rank", "1");
    q.set("category", "deaths");
    let plot = chart().change_data(&ViewState::from_query(&q));
    assert_eq!(plot.bars[0].name, "Croatia");
    assert_eq!(plot.bars[0].value, 10);
}

#[test]
fn slider_uses_compact_dates() {
    let chart = chart();
    assert_eq!(chart.slider_days(), ["20200409", "20200410"]);
}
