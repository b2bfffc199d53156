use serde::Deserialize;
use std::cell::Cell;
use std::cmp::Ordering;

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

thread_local! {
    static THRESHOLD: Cell<LogLevel> = const { Cell::new(DEFAULT_LOG_LEVEL) };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl PartialOrd for LogLevel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LogLevel {
    fn cmp(&self, other: &Self) -> Ordering {
        fn rank(level: LogLevel) -> u8 {
            match level {
                LogLevel::Debug => 0,
                LogLevel::Info => 1,
                LogLevel::Warn => 2,
            }
        }

        rank(*self).cmp(&rank(*other))
    }
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }
}

pub fn set_log_level(level: LogLevel) {
    THRESHOLD.with(|threshold| threshold.set(level));
}

pub fn log_level() -> LogLevel {
    THRESHOLD.with(Cell::get)
}

/// Emits one JSON line when `level` clears the current threshold.
pub fn log_event(level: LogLevel, event: &str, fields: serde_json::Value) {
    if level < log_level() {
        return;
    }

    let line = format_event(now_unix_millis(), level, event, fields);
    emit(level, &line);
}

fn format_event(ts: u64, level: LogLevel, event: &str, fields: serde_json::Value) -> String {
    let mut payload = serde_json::Map::new();
    payload.insert(
        "ts".to_string(),
        serde_json::Value::Number(serde_json::Number::from(ts)),
    );
    payload.insert("level".to_string(), serde_json::Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), serde_json::Value::String(event.to_string()));

    if let serde_json::Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    serde_json::Value::Object(payload).to_string()
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    let value = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Warn => web_sys::console::warn_1(&value),
        LogLevel::Debug => web_sys::console::debug_1(&value),
        LogLevel::Info => web_sys::console::log_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: LogLevel, line: &str) {
    match level {
        LogLevel::Warn => eprintln!("{line}"),
        LogLevel::Debug | LogLevel::Info => println!("{line}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_order_from_debug_to_warn() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
    }

    #[test]
    fn formatted_event_merges_extra_fields() {
        let line = format_event(42, LogLevel::Info, "mosaic.mounted", json!({ "width": 320 }));
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid json line");

        assert_eq!(parsed["ts"], 42);
        assert_eq!(parsed["level"], "info");
        assert_eq!(parsed["event"], "mosaic.mounted");
        assert_eq!(parsed["width"], 320);
    }

    #[test]
    fn non_object_fields_are_ignored() {
        let line = format_event(1, LogLevel::Warn, "config.invalid", json!("ignored"));
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid json line");

        assert_eq!(parsed.as_object().map(|map| map.len()), Some(3));
    }

    #[test]
    fn threshold_is_per_thread_and_settable() {
        set_log_level(LogLevel::Warn);
        assert_eq!(log_level(), LogLevel::Warn);
        set_log_level(DEFAULT_LOG_LEVEL);
        assert_eq!(log_level(), LogLevel::Info);
    }
}
