// src/utils.rs

use chrono::NaiveTime;
use serde_json::Value;

/// Shows a JSON value the way it arrived: strings without quotes, everything else as JSON text.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 24-hour wall-clock stamp used in front of every log line.
pub fn format_clock(time: NaiveTime) -> String {
    time.format("%H:%M:%S").to_string()
}

pub fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
