pub mod browser;
pub mod http;

pub use browser::{BrowserHistory, BrowserTimeProvider, ConsoleLogger};
pub use http::SummaryHttpClient;
