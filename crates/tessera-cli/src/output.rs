//! Output formatting utilities.

use serde_json::{json, Value};
use tessera_codec::CodecError;

/// Formats a JSON value for display.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}

/// Formats a codec failure as a JSON report.
pub fn format_error_json(err: &CodecError) -> String {
    format_json(&json!({
        "ok": false,
        "code": err.code(),
        "message": err.message(),
    }))
}
