//! `log` backend for the browser console.
//!
//! [`WebLogger`] routes records from the `log` facade (used throughout
//! `wallet-bridge`) to the matching `console.*` method, prefixed with an ISO
//! timestamp and the level. Install it once with [`init_logging`].

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;
use web_sys::console;

static LOGGER: WebLogger = WebLogger;

#[derive(Clone, Copy, Debug, Default)]
pub struct WebLogger;

impl WebLogger {
    fn format_message(&self, level: Level, message: &str) -> String {
        let timestamp = js_sys::Date::new_0()
            .to_iso_string()
            .as_string()
            .unwrap_or_default();
        format!("[{timestamp}] [{level}] {message}")
    }
}

impl Log for WebLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let formatted = self.format_message(record.level(), &record.args().to_string());
        let line = JsValue::from(formatted);
        match record.level() {
            Level::Error => console::error_1(&line),
            Level::Warn => console::warn_1(&line),
            Level::Info => console::info_1(&line),
            Level::Debug | Level::Trace => console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Installs [`WebLogger`] and sets the maximum level. Calling it again only
/// updates the level.
pub fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("logger already installed");
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_message_formatting() {
        let formatted = WebLogger.format_message(Level::Warn, "test message");
        assert!(formatted.contains("[WARN]"));
        assert!(formatted.ends_with("test message"));
        // ISO timestamp
        assert!(formatted.contains('T'));
        assert!(formatted.contains('Z'));
    }

    #[wasm_bindgen_test]
    fn test_init_is_repeatable() {
        init_logging(LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);
        init_logging(LevelFilter::Warn);
        assert_eq!(log::max_level(), LevelFilter::Warn);
        log::warn!("visible in the browser console");
    }
}
