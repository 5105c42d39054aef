use covid_chart_wasm::domain::chart::treemap::{
    change_label, interpolation_fraction, shade, NodeShade, TreemapChart,
};
use covid_chart_wasm::domain::summary::{Category, DailyReport, RegionReport};
use std::collections::BTreeMap;

fn region(confirmed: i64, deaths: i64, recovered: i64) -> RegionReport {
    RegionReport { confirmed, deaths, recovered, ..Default::default() }
}

fn report(entries: &[(&str, RegionReport)]) -> DailyReport {
    entries.iter().map(|(n, r)| (n.to_string(), r.clone())).collect()
}

#[test]
fn fraction_fades_above_ninety_five_percent() {
    assert_eq!(interpolation_fraction(0.5), 1.0);
    assert_eq!(interpolation_fraction(0.95), 1.0);
    assert!((interpolation_fraction(0.975) - 0.5).abs() < 1e-9);
    assert_eq!(interpolation_fraction(1.0), 0.0);
    assert_eq!(interpolation_fraction(1.2), 0.0);
}

#[test]
fn growth_shades_red_and_shrinkage_green() {
    assert!(matches!(shade(200, 100), NodeShade::Red(_)));
    assert!(matches!(shade(100, 200), NodeShade::Green(_)));

    // Near-flat growth fades toward pale red.
    if let NodeShade::Red(f) = shade(1000, 990) {
        assert!(f < 0.5);
    } else {
        panic!("expected red");
    }
}

#[test]
fn zero_history_is_full_red() {
    assert_eq!(shade(0, 0), NodeShade::FullRed);
    assert_eq!(shade(-5, 0), NodeShade::FullRed);
}

#[test]
fn change_label_reports_signed_percent() {
    assert_eq!(change_label(200, 100).as_deref(), Some("▼50.00%"));
    assert_eq!(change_label(100, 200).as_deref(), Some("▲-100.00%"));
    assert_eq!(change_label(0, 100), None);
}

#[test]
fn nodes_carry_values_and_world_totals() {
    let today = report(&[
        ("US", region(500, 20, 30)),
        ("Japan", region(100, 5, 10)),
    ]);
    let yesterday = report(&[
        ("US", region(400, 18, 25)),
        ("Japan", region(100, 5, 10)),
    ]);

    let mut chart = TreemapChart::new();
    chart.add_data(today, yesterday);
    assert!(chart.has_data());

    let plot = chart.change_data(Category::Confirmed);
    assert_eq!(plot.totals.confirmed, 600);
    assert_eq!(plot.totals.deaths, 25);

    let us = plot.nodes.iter().find(|n| n.name == "US").unwrap();
    assert_eq!(us.value, 500);
    assert_eq!(us.active, (450, 357));
    assert!(matches!(us.shade, NodeShade::Red(_)));
}

#[test]
fn deaths_category_resizes_without_reshading() {
    let today = report(&[("US", region(500, 20, 30))]);
    let yesterday = report(&[("US", region(400, 18, 25))]);

    let mut chart = TreemapChart::new();
    chart.add_data(today, yesterday);

    let by_confirmed = chart.change_data(Category::Confirmed);
    let by_deaths = chart.change_data(Category::Deaths);
    assert_eq!(by_deaths.nodes[0].value, 20);
    assert_eq!(by_deaths.nodes[0].shade, by_confirmed.nodes[0].shade);
}

#[test]
fn children_match_against_yesterdays_children() {
    let mut us_today = region(500, 20, 30);
    us_today.children = Some(BTreeMap::from([
        ("New York".to_string(), region(200, 10, 5)),
        ("Texas".to_string(), region(100, 2, 3)),
    ]));
    let mut us_yesterday = region(400, 18, 25);
    us_yesterday.children =
        Some(BTreeMap::from([("New York".to_string(), region(150, 9, 4))]));

    let mut chart = TreemapChart::new();
    chart.add_data(report(&[("US", us_today)]), report(&[("US", us_yesterday)]));

    let plot = chart.change_data(Category::Confirmed);
    let us = &plot.nodes[0];
    assert_eq!(us.children.len(), 2);

    let ny = us.children.iter().find(|n| n.name == "New York").unwrap();
    assert_eq!(ny.active, (185, 137));

    // Texas has no yesterday entry, so its previous active count is zero.
    let tx = us.children.iter().find(|n| n.name == "Texas").unwrap();
    assert_eq!(tx.active.1, 0);
    assert_eq!(tx.shade, NodeShade::Red(interpolation_fraction(0.0)));
}

#[test]
fn no_data_means_empty_plot() {
    let chart = TreemapChart::new();
    assert!(!chart.has_data());
    let plot = chart.change_data(Category::Confirmed);
    assert!(plot.nodes.is_empty());
    assert_eq!(plot.totals.confirmed, 0);
}
