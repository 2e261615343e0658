//! Output → human/json/raw string formatting.
//!
//! Three modes:
//! - **Human** (default): `OK`, record JSON text, `(hash) <base64>`, numbered query results
//! - **JSON** (`--json`): pretty-printed JSON documents
//! - **Raw** (`--raw`): the response payload as a peer would receive it, hashes base64-encoded

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use privreg_executor::{Error, Output, QueryEntry};
use serde_json::{json, Value};

/// Output formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Raw,
}

/// Format a successful output.
pub fn format_output(output: &Output, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&output_json(output)),
        OutputMode::Raw => format_raw(output),
        OutputMode::Human => format_human(output),
    }
}

/// Format an error.
pub fn format_error(err: &Error, mode: OutputMode) -> String {
    match mode {
        OutputMode::Json => pretty(&json!({
            "error": err.to_string(),
            "kind": err.kind(),
        })),
        OutputMode::Raw => err.to_string(),
        OutputMode::Human => format!("(error) {}", err),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn record_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn record_value(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap_or_else(|_| Value::String(record_text(bytes)))
}

fn output_json(output: &Output) -> Value {
    match output {
        Output::Unit => json!({"status": "ok"}),
        Output::Record(bytes) => record_value(bytes),
        Output::Hash(bytes) => json!({"hash": STANDARD.encode(bytes)}),
        Output::Entries(entries) => serde_json::to_value(entries).unwrap_or(Value::Null),
    }
}

fn format_raw(output: &Output) -> String {
    match output {
        Output::Unit => String::new(),
        Output::Record(bytes) => record_text(bytes),
        Output::Hash(bytes) => STANDARD.encode(bytes),
        Output::Entries(entries) => serde_json::to_string(entries).unwrap_or_default(),
    }
}

fn format_human(output: &Output) -> String {
    match output {
        Output::Unit => "OK".to_string(),
        Output::Record(bytes) => record_text(bytes),
        Output::Hash(bytes) => format!("(hash) {}", STANDARD.encode(bytes)),
        Output::Entries(entries) if entries.is_empty() => "(empty list)".to_string(),
        Output::Entries(entries) => entries
            .iter()
            .enumerate()
            .map(|(i, QueryEntry { key, record })| format!("{}) \"{}\" {}", i + 1, key, record))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}
