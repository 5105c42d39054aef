//! Chart aggregate: one module per chart variant plus shared value objects.

pub mod candle;
pub mod horizontal_bar;
pub mod line;
pub mod treemap;
pub mod value_objects;
pub mod vertical_bar;

pub use value_objects::*;

use crate::domain::query::Query;
use crate::domain::summary::WorldSummary;

/// Seam between the state-sync client and a concrete chart.
///
/// `render` resolves the query into a view snapshot, recomputes the plot
/// series and hands it to the external renderer as JSON. A chart that has no
/// data yet renders nothing.
pub trait ChartView {
    /// Query populated with this chart's default parameters. Defaults may
    /// shift once data is loaded (date windows seed from the dataset range).
    fn default_query(&self) -> Query;

    /// Accept the fetched summary feed and build per-chart indices.
    fn load_data(&mut self, raw: WorldSummary);

    /// Recompute the plot for the given query. Returns the serialized plot,
    /// or `None` before data arrives.
    fn render(&mut self, query: &Query) -> Option<String>;
}
