use covid_chart_wasm::domain::query::Query;
use quickcheck_macros::quickcheck;

#[test]
fn filter_drops_default_valued_keys() {
    let mut defaults = Query::new();
    defaults.set("country", "Japan");
    defaults.set("category", "confirmed");
    defaults.set("yscale", "liner");

    let mut q = defaults.clone();
    q.set("yscale", "log");

    assert_eq!(q.filter(&defaults).to_search(), "?yscale=log");
}

#[test]
fn filter_of_defaults_is_empty() {
    let mut defaults = Query::new();
    defaults.set("country", "Japan");
    defaults.set("category", "confirmed");

    let minimal = defaults.filter(&defaults);
    assert!(minimal.is_empty());
    assert_eq!(minimal.to_search(), "");
}

#[test]
fn filter_keeps_extra_keys_missing_from_defaults() {
    let defaults = Query::new();
    let mut q = Query::new();
    q.set("date", "20200410");
    assert_eq!(q.filter(&defaults).to_search(), "?date=20200410");
}

#[test]
fn serialization_follows_insertion_order() {
    let mut q = Query::new();
    q.set("b", "2");
    q.set("a", "1");
    q.set("b", "3");
    assert_eq!(q.to_search(), "?b=3&a=1");
}

#[test]
fn reserved_characters_are_encoded() {
    let mut q = Query::new();
    q.set("country", "Bosnia and Herzegovina");
    let search = q.to_search();
    assert!(!search.contains(' '));

    let mut parsed = Query::new();
    parsed.load_search_params(&search);
    assert_eq!(parsed.get("country"), "Bosnia and Herzegovina");
}

#[test]
fn plus_decodes_to_space() {
    let mut q = Query::new();
    q.load_search_params("?country=Korea,+South");
    assert_eq!(q.get("country"), "Korea, South");
}

#[quickcheck]
fn search_string_roundtrip(pairs: Vec<(String, String)>) -> bool {
    let mut q = Query::new();
    for (key, value) in &pairs {
        if key.is_empty() {
            continue;
        }
        q.set(key, value);
    }

    let mut parsed = Query::new();
    parsed.load_search_params(&q.to_search());
    parsed == q
}

#[quickcheck]
fn filter_is_idempotent(pairs: Vec<(String, String)>, defaults: Vec<(String, String)>) -> bool {
    let mut q = Query::new();
    for (key, value) in &pairs {
        if key.is_empty() {
            continue;
        }
        q.set(key, value);
    }
    let mut d = Query::new();
    for (key, value) in &defaults {
        if key.is_empty() {
            continue;
        }
        d.set(key, value);
    }

    let once = q.filter(&d);
    once.filter(&d) == once
}
