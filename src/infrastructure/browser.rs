use crate::application::state_sync::HistoryBackend;
use crate::domain::logging::{
    get_logger, LogComponent, LogEntry, LogLevel, Logger, TimeProvider,
};
use wasm_bindgen::JsValue;

/// History backend over `window.history`, pushing and replacing entries with
/// the page path plus the serialized search string.
#[derive(Debug, Clone, Default)]
pub struct BrowserHistory;

impl BrowserHistory {
    pub fn new() -> Self {
        Self
    }

    fn with_url(&self, search: &str) -> Option<String> {
        let location = web_sys::window()?.location();
        let pathname = location.pathname().ok()?;
        Some(format!("{pathname}{search}"))
    }

    fn apply(&self, search: &str, push: bool) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Ok(history) = window.history() else {
            return;
        };
        let Some(url) = self.with_url(search) else {
            return;
        };
        let result = if push {
            history.push_state_with_url(&JsValue::from_str(""), "", Some(&url))
        } else {
            history.replace_state_with_url(&JsValue::from_str(""), "", Some(&url))
        };
        if result.is_err() {
            get_logger().warn(
                LogComponent::Infrastructure("History"),
                &format!("history update rejected for {url}"),
            );
        }
    }
}

impl HistoryBackend for BrowserHistory {
    fn current_search(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default()
    }

    fn push(&mut self, search: &str) {
        self.apply(search, true);
    }

    fn replace(&mut self, search: &str) {
        self.apply(search, false);
    }
}

/// Console-backed logger with a minimum level.
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new_development() -> Self {
        Self { min_level: LogLevel::Debug }
    }

    pub fn new_production() -> Self {
        Self { min_level: LogLevel::Warn }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let line = format!("[{}] [{}] {}", entry.level, entry.component, entry.message);
        match entry.level {
            LogLevel::Error => gloo::console::error!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            _ => gloo::console::log!(line),
        }
    }
}

/// Time provider over the browser clock.
pub struct BrowserTimeProvider;

impl BrowserTimeProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BrowserTimeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeProvider for BrowserTimeProvider {
    fn current_timestamp(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        js_sys::Date::new(&JsValue::from_f64(timestamp as f64))
            .to_iso_string()
            .as_string()
            .unwrap_or_default()
    }
}
