use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

use crate::record::RawRecord;

/// Errors that can occur while decoding a response body into [`RawRecord`]s.
///
/// Individual malformed elements inside an otherwise well-formed envelope are
/// skipped rather than reported; decode errors are reserved for inputs that
/// are not an envelope at all.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Input was not valid JSON.
    #[error("failed to parse response body as JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Failed to read input file.
    #[error("failed to read payload file: {0}")]
    Io(#[from] std::io::Error),
    /// Input was JSON but not a recognizable record envelope.
    #[error("malformed record envelope: {0}")]
    Malformed(String),
}

/// Decode one controller response body into a sequence of [`RawRecord`]s.
///
/// Accepts either the full envelope (`{"imdata": [...]}`) or a bare array of
/// class-keyed wrapper objects, since persisted payloads sometimes store the
/// record list without the envelope.
pub fn decode_bytes(body: &[u8]) -> Result<Vec<RawRecord>, DecodeError> {
    let value: Value = serde_json::from_slice(body)?;
    decode_value(&value)
}

/// Decode an already-parsed JSON response body. See [`decode_bytes`].
pub fn decode_value(body: &Value) -> Result<Vec<RawRecord>, DecodeError> {
    let elements = match body {
        Value::Array(elements) => elements,
        Value::Object(map) => match map.get("imdata") {
            Some(Value::Array(elements)) => elements,
            Some(other) => {
                return Err(DecodeError::Malformed(format!(
                    "imdata is not an array (found {})",
                    type_name(other)
                )))
            }
            None => {
                return Err(DecodeError::Malformed(
                    "object has no imdata array".to_string(),
                ))
            }
        },
        other => {
            return Err(DecodeError::Malformed(format!(
                "expected object or array at top level (found {})",
                type_name(other)
            )))
        }
    };

    Ok(elements.iter().filter_map(decode_wrapper).collect())
}

/// Decode a payload file. See [`decode_bytes`].
pub fn decode_file(path: &Path) -> Result<Vec<RawRecord>, DecodeError> {
    let bytes = fs::read(path)?;
    decode_bytes(&bytes)
}

/// Decode one class-keyed wrapper object (`{"someClass": {"attributes": ...,
/// "children": [...]}}`). The sole key is the class discriminant; wrappers
/// that are not single-key objects yield `None` and are skipped.
fn decode_wrapper(element: &Value) -> Option<RawRecord> {
    let wrapper = element.as_object()?;
    let (class, body) = wrapper.iter().next()?;
    let mut record = RawRecord::new(class.clone());

    let body = match body.as_object() {
        Some(body) => body,
        None => return Some(record),
    };

    if let Some(attributes) = body.get("attributes").and_then(Value::as_object) {
        decode_attributes(attributes, &mut record);
    }
    if let Some(children) = body.get("children").and_then(Value::as_array) {
        record.children = children.iter().filter_map(decode_wrapper).collect();
    }

    Some(record)
}

fn decode_attributes(attributes: &Map<String, Value>, record: &mut RawRecord) {
    for (name, value) in attributes {
        // Scalars only; nested structures are not part of the attribute bag.
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null | Value::Array(_) | Value::Object(_) => continue,
        };
        record.attributes.insert(name.clone(), text);
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{decode_value, DecodeError};

    #[test]
    fn decodes_envelope_with_attributes_and_children() {
        let body = json!({
            "totalCount": "1",
            "imdata": [
                {
                    "topSystem": {
                        "attributes": {"dn": "topology/pod-1/node-101/sys", "id": 101},
                        "children": [
                            {"healthInst": {"attributes": {"cur": "95"}}}
                        ]
                    }
                }
            ]
        });

        let records = decode_value(&body).expect("envelope should decode");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].class, "topSystem");
        // Numeric attribute values are coerced to strings.
        assert_eq!(records[0].attr("id"), Some("101"));
        assert_eq!(records[0].children[0].class, "healthInst");
        assert_eq!(records[0].children[0].attr("cur"), Some("95"));
    }

    #[test]
    fn decodes_bare_record_array() {
        let body = json!([
            {"faultInst": {"attributes": {"dn": "f1"}}},
            {"faultInst": {"attributes": {"dn": "f2"}}}
        ]);

        let records = decode_value(&body).expect("bare array should decode");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].attr("dn"), Some("f2"));
    }

    #[test]
    fn skips_malformed_elements_without_failing_the_batch() {
        let body = json!({
            "imdata": [
                "not-a-wrapper",
                {},
                {"l1PhysIf": {"attributes": {"dn": "if1", "operSt": "up"}}}
            ]
        });

        let records = decode_value(&body).expect("batch should survive");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].attr("operSt"), Some("up"));
    }

    #[test]
    fn rejects_envelope_without_imdata() {
        let body = json!({"data": []});
        match decode_value(&body) {
            Err(DecodeError::Malformed(msg)) => assert!(msg.contains("imdata")),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn null_and_nested_attribute_values_are_dropped() {
        let body = json!([
            {"fvCEp": {"attributes": {"dn": "ep1", "ip": null, "extra": {"a": 1}}}}
        ]);

        let records = decode_value(&body).expect("decode");
        assert_eq!(records[0].attr("dn"), Some("ep1"));
        assert_eq!(records[0].attr("ip"), None);
        assert_eq!(records[0].attr("extra"), None);
    }
}
