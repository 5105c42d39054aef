use crate::domain::chart::ChartView;
use crate::domain::errors::FetchResult;
use crate::domain::logging::{get_logger, LogComponent};
use crate::domain::query::Query;
use crate::domain::summary::WorldSummary;
use std::future::Future;

/// Lifecycle of a chart page. A fetch failure is terminal: the page stays in
/// `Loading` and nothing ever renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Uninitialized,
    Loading,
    Ready,
}

/// Browser-history seam. The real backend wraps `window.history`; tests use
/// an in-memory fake.
pub trait HistoryBackend {
    /// Current search string, `?`-prefixed or empty.
    fn current_search(&self) -> String;
    /// Push a new history entry with the given search string.
    fn push(&mut self, search: &str);
    /// Replace the current entry in place (URL normalization).
    fn replace(&mut self, search: &str);
}

/// Summary-feed fetch seam.
pub trait SummaryFetch {
    fn fetch_summary(&self) -> impl Future<Output = FetchResult<WorldSummary>>;
}

/// Where finished plots go. The wasm implementation forwards to a JS
/// callback; tests record the payloads.
pub trait RenderSink {
    fn draw(&mut self, plot_json: &str);
}

/// Keeps a chart's `Query` in sync with the browser URL in both directions.
///
/// Every user interaction funnels through [`StateSync::update`]; browser
/// back/forward funnels through [`StateSync::reconcile`]. Both paths
/// serialize minimally (default-valued keys omitted) and only push a history
/// entry when the minimal string actually changed.
pub struct StateSync<V: ChartView, H: HistoryBackend> {
    view: V,
    history: H,
    sink: Box<dyn RenderSink>,
    query: Query,
    phase: SyncPhase,
}

impl<V: ChartView, H: HistoryBackend> StateSync<V, H> {
    pub fn new(view: V, history: H, sink: Box<dyn RenderSink>) -> Self {
        let query = view.default_query();
        Self { view, history, sink, query, phase: SyncPhase::Uninitialized }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Re-render with the current query, e.g. after non-URL view changes
    /// such as toggling a country checkbox.
    pub fn refresh(&mut self) {
        self.render();
    }

    /// Fetch the feed once and bring the page up. On failure the error is
    /// logged and the page never renders; there is no retry.
    pub async fn run<F: SummaryFetch>(&mut self, fetcher: &F) -> FetchResult<()> {
        self.begin_load();
        match fetcher.fetch_summary().await {
            Ok(raw) => {
                self.finish_load(raw);
                Ok(())
            }
            Err(err) => {
                get_logger().error(
                    LogComponent::Application("StateSync"),
                    &format!("summary fetch failed, page stays blank: {}", err),
                );
                Err(err)
            }
        }
    }

    pub fn begin_load(&mut self) {
        self.phase = SyncPhase::Loading;
    }

    /// Data arrived: rebuild defaults (the dataset range seeds date windows),
    /// overlay the current URL, normalize it in place and render once.
    pub fn finish_load(&mut self, raw: WorldSummary) {
        self.view.load_data(raw);
        self.phase = SyncPhase::Ready;

        let mut query = self.view.default_query();
        query.load_search_params(&self.history.current_search());
        self.query = query;

        let minimal = self.minimal_search();
        self.history.replace(&minimal);
        self.render();
    }

    /// Apply a partial parameter change coming from the UI.
    pub fn update(&mut self, pairs: &[(&str, &str)]) {
        let mut candidate = self.query.clone();
        for (key, value) in pairs {
            candidate.set(key, value);
        }
        self.update_query(candidate);
    }

    /// Push the candidate state if its minimal serialization differs from the
    /// current URL; otherwise just normalize the URL in place.
    pub fn update_query(&mut self, candidate: Query) {
        let minimal = candidate.filter(&self.view.default_query()).to_search();
        if minimal != self.history.current_search() {
            self.history.push(&minimal);
            self.reconcile();
        } else {
            self.history.replace(&minimal);
            self.query = candidate;
        }
    }

    /// Re-derive state from the URL after navigation (`popstate`) or a push.
    /// Renders only when the minimal serialization actually changed.
    pub fn reconcile(&mut self) {
        let before = self.minimal_search();

        let mut query = self.view.default_query();
        query.load_search_params(&self.history.current_search());
        self.query = query;

        let now = self.minimal_search();
        if now != before {
            self.render();
        } else {
            self.history.replace(&now);
        }
    }

    fn minimal_search(&self) -> String {
        self.query.filter(&self.view.default_query()).to_search()
    }

    fn render(&mut self) {
        if self.phase != SyncPhase::Ready {
            return;
        }
        if let Some(plot) = self.view.render(&self.query) {
            self.sink.draw(&plot);
        }
    }
}
