//! Request/response plumbing shared by every resource handler: sanitized
//! payload construction and Location header derivation.

use serde_json::{Map, Value};

/// A sanitized insert/update payload: allow-listed request fields plus the
/// authenticated caller's `userId`.
pub type Payload = Map<String, Value>;

/// JavaScript truthiness: `null`, `false`, `0`, and `""` are falsy; arrays
/// and objects are always truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Construct a payload from the request body using an allow-list of field
/// names. Fields with falsy values are dropped (so a partial update never
/// nulls a column), and `userId` is always set to the authenticated caller's
/// id regardless of what the body contains.
pub fn build_payload(allowed_fields: &[&str], body: &Value, user_id: &str) -> Payload {
    let mut result = Payload::new();
    result.insert("userId".to_string(), Value::String(user_id.to_string()));
    if let Some(map) = body.as_object() {
        for field in allowed_fields {
            if let Some(value) = map.get(*field) {
                if is_truthy(value) {
                    result.insert((*field).to_string(), value.clone());
                }
            }
        }
    }
    result
}

/// Location header value for a newly created resource: the request path plus
/// the new id.
pub fn location_for(path: &str, id: &str) -> String {
    let path = path.strip_suffix('/').unwrap_or(path);
    format!("{}/{}", path, id)
}
