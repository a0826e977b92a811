//! Recursive merge of JSON request payloads.

use serde_json::Value;

/// Merges `overlay` into `base`, returning a fresh value.
///
/// Objects merge key-by-key, recursively; any other pairing replaces the
/// base value wholesale, so a scalar overrides an object, an object
/// overrides a scalar, and arrays are opaque (replaced, never merged
/// element-wise). On conflicting scalar keys the overlay wins.
///
/// Neither argument is mutated. The client seeds every outgoing payload with
/// [`default_payload`](crate::envelope::default_payload) and merges the
/// caller's data over it, so a caller-supplied `requestEnvelope` field
/// overrides the default key-by-key rather than discarding it.
#[must_use]
pub fn merge(base: &Value, overlay: &Value) -> Value {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            let mut merged = base.clone();
            for (key, value) in overlay {
                let value = match merged.get(key) {
                    Some(existing) => merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        (_, overlay) => overlay.clone(),
    }
}
