// --- File: crates/tablebook_common/src/http.rs ---
use serde_json::Value;

pub mod client;

/// Extracts the human readable message from a backend error body.
///
/// The backend answers failures with `{"detail": ...}`. A string detail is returned
/// verbatim, any other detail (e.g. a list of validation problems) as its JSON text,
/// and a body that is not JSON as-is.
pub fn error_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}
