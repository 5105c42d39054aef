use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::application::state_sync::{RenderSink, StateSync, SummaryFetch};
use crate::domain::chart::candle::CandleChart;
use crate::domain::chart::horizontal_bar::HorizontalBarChart;
use crate::domain::chart::line::LineChart;
use crate::domain::chart::treemap::TreemapChart;
use crate::domain::chart::vertical_bar::VerticalBarChart;
use crate::domain::chart::ChartView;
use crate::domain::logging::{get_logger, LogComponent};
use crate::domain::summary::Category;
use crate::infrastructure::{BrowserHistory, SummaryHttpClient};

/// WASM bridge between JavaScript pages and the application layer. Each page
/// constructs one app object with a render callback that receives the plot as
/// a JSON string.

/// Forwards finished plots to a JS callback.
struct JsRenderSink {
    callback: Function,
}

impl RenderSink for JsRenderSink {
    fn draw(&mut self, plot_json: &str) {
        if self
            .callback
            .call1(&JsValue::NULL, &JsValue::from_str(plot_json))
            .is_err()
        {
            get_logger().warn(
                LogComponent::Presentation("RenderSink"),
                "render callback threw, plot dropped",
            );
        }
    }
}

struct AppInner<V: ChartView + 'static> {
    sync: Rc<RefCell<StateSync<V, BrowserHistory>>>,
    // Dropped with the app; keeps the popstate hook alive until then.
    _popstate: Option<EventListener>,
}

/// Wire a view to the browser: history backend, popstate listener, and a
/// one-shot background fetch of the summary feed.
fn boot<V: ChartView + 'static>(view: V, render: Function) -> AppInner<V> {
    let sink = Box::new(JsRenderSink { callback: render });
    let sync = Rc::new(RefCell::new(StateSync::new(view, BrowserHistory::new(), sink)));

    let popstate = web_sys::window().map(|window| {
        let sync = Rc::clone(&sync);
        EventListener::new(&window, "popstate", move |_| {
            sync.borrow_mut().reconcile();
        })
    });

    {
        let sync = Rc::clone(&sync);
        spawn_local(async move {
            sync.borrow_mut().begin_load();
            // Fetch outside the borrow; finish_load re-enters the state.
            let client = SummaryHttpClient::new();
            match client.fetch_summary().await {
                Ok(raw) => sync.borrow_mut().finish_load(raw),
                Err(err) => get_logger().error(
                    LogComponent::Presentation("Boot"),
                    &format!("summary fetch failed, page stays blank: {}", err),
                ),
            }
        });
    }

    AppInner { sync, _popstate: popstate }
}

/// Weekly candlestick page.
#[wasm_bindgen]
pub struct CandleApp {
    inner: AppInner<CandleChart>,
}

#[wasm_bindgen]
impl CandleApp {
    #[wasm_bindgen(constructor)]
    pub fn new(outer_width: f64, render: Function) -> Self {
        Self { inner: boot(CandleChart::new(outer_width), render) }
    }

    /// Apply one URL parameter change from the UI.
    pub fn update(&self, key: &str, value: &str) {
        self.inner.sync.borrow_mut().update(&[(key, value)]);
    }

    /// Dataset dates in compact form, for the date slider.
    #[wasm_bindgen(js_name = sliderDays)]
    pub fn slider_days(&self) -> Vec<String> {
        self.inner.sync.borrow().view().slider_days().to_vec()
    }

    /// Country selector rows with their cumulative totals, as JSON.
    pub fn countries(&self) -> String {
        serde_json::to_string(&self.inner.sync.borrow().view().countries()).unwrap_or_default()
    }
}

/// Cumulative line page.
#[wasm_bindgen]
pub struct LineApp {
    inner: AppInner<LineChart>,
}

#[wasm_bindgen]
impl LineApp {
    #[wasm_bindgen(constructor)]
    pub fn new(outer_width: f64, render: Function) -> Self {
        Self { inner: boot(LineChart::new(outer_width), render) }
    }

    pub fn update(&self, key: &str, value: &str) {
        self.inner.sync.borrow_mut().update(&[(key, value)]);
    }

    #[wasm_bindgen(js_name = sliderDays)]
    pub fn slider_days(&self) -> Vec<String> {
        self.inner.sync.borrow().view().slider_days().to_vec()
    }

    pub fn countries(&self) -> Vec<String> {
        self.inner.sync.borrow().view().countries()
    }

    /// Checkbox toggle. Visibility is view-local and never hits the URL, so
    /// this re-renders directly instead of going through the history.
    #[wasm_bindgen(js_name = setCountryVisible)]
    pub fn set_country_visible(&self, name: &str, visible: bool) {
        let mut sync = self.inner.sync.borrow_mut();
        sync.view_mut().set_country_visible(name, visible);
        sync.refresh();
    }
}

/// Daily-delta vertical bar page.
#[wasm_bindgen]
pub struct VerticalBarApp {
    inner: AppInner<VerticalBarChart>,
}

#[wasm_bindgen]
impl VerticalBarApp {
    #[wasm_bindgen(constructor)]
    pub fn new(outer_width: f64, render: Function) -> Self {
        Self { inner: boot(VerticalBarChart::new(outer_width), render) }
    }

    pub fn update(&self, key: &str, value: &str) {
        self.inner.sync.borrow_mut().update(&[(key, value)]);
    }

    #[wasm_bindgen(js_name = sliderDays)]
    pub fn slider_days(&self) -> Vec<String> {
        self.inner.sync.borrow().view().slider_days().to_vec()
    }

    pub fn countries(&self) -> Vec<String> {
        self.inner.sync.borrow().view().countries()
    }
}

/// Country-ranking horizontal bar page.
#[wasm_bindgen]
pub struct HorizontalBarApp {
    inner: AppInner<HorizontalBarChart>,
}

#[wasm_bindgen]
impl HorizontalBarApp {
    #[wasm_bindgen(constructor)]
    pub fn new(outer_width: f64, render: Function) -> Self {
        Self { inner: boot(HorizontalBarChart::new(outer_width), render) }
    }

    pub fn update(&self, key: &str, value: &str) {
        self.inner.sync.borrow_mut().update(&[(key, value)]);
    }

    #[wasm_bindgen(js_name = sliderDays)]
    pub fn slider_days(&self) -> Vec<String> {
        self.inner.sync.borrow().view().slider_days().to_vec()
    }
}

/// Regional treemap page. Works off the two daily-report feeds instead of
/// the summary feed and keeps no URL state.
#[wasm_bindgen]
pub struct TreemapApp {
    chart: Rc<RefCell<TreemapChart>>,
    category: Rc<RefCell<Category>>,
    render: Rc<Function>,
}

#[wasm_bindgen]
impl TreemapApp {
    #[wasm_bindgen(constructor)]
    pub fn new(render: Function) -> Self {
        let app = Self {
            chart: Rc::new(RefCell::new(TreemapChart::new())),
            category: Rc::new(RefCell::new(Category::Confirmed)),
            render: Rc::new(render),
        };

        {
            let chart = Rc::clone(&app.chart);
            let category = Rc::clone(&app.category);
            let render = Rc::clone(&app.render);
            spawn_local(async move {
                let client = SummaryHttpClient::new();
                match client.fetch_daily_reports().await {
                    Ok((today, one_day_ago)) => {
                        chart.borrow_mut().add_data(today, one_day_ago);
                        Self::draw(&chart, *category.borrow(), &render);
                    }
                    Err(err) => get_logger().error(
                        LogComponent::Presentation("TreemapApp"),
                        &format!("daily report fetch failed, page stays blank: {}", err),
                    ),
                }
            });
        }

        app
    }

    /// Switch the sizing category and redraw.
    #[wasm_bindgen(js_name = changeCategory)]
    pub fn change_category(&self, category: &str) {
        *self.category.borrow_mut() = Category::parse_or_default(category);
        Self::draw(&self.chart, *self.category.borrow(), &self.render);
    }

    fn draw(chart: &RefCell<TreemapChart>, category: Category, render: &Function) {
        let chart = chart.borrow();
        if !chart.has_data() {
            return;
        }
        let plot = chart.change_data(category);
        match serde_json::to_string(&plot) {
            Ok(json) => {
                if render.call1(&JsValue::NULL, &JsValue::from_str(&json)).is_err() {
                    get_logger().warn(
                        LogComponent::Presentation("TreemapApp"),
                        "render callback threw, plot dropped",
                    );
                }
            }
            Err(err) => get_logger().error(
                LogComponent::Presentation("TreemapApp"),
                &format!("treemap serialization failed: {}", err),
            ),
        }
    }
}
