#![allow(missing_docs)]
//! Request payloads and the metadata envelope attached to results.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// Body sent to every pdf4me document-AI endpoint. Key casing follows the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRequest {
    #[serde(rename = "docName")]
    pub doc_name: String,
    #[serde(rename = "docContent")]
    pub doc_content: String,
    #[serde(rename = "IsAsync")]
    pub is_async: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocumentRequest {
    pub fn new(
        doc_name: impl Into<String>,
        doc_content: impl Into<String>,
        optional: &OptionalFields,
    ) -> Self {
        Self {
            doc_name: doc_name.into(),
            doc_content: doc_content.into(),
            is_async: true,
            extra: optional.payload_fields(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct OptionalField {
    payload_key: &'static str,
    metadata_key: &'static str,
    value: Value,
}

/// Document-type specific fields, sent with the request and echoed in `_metadata`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionalFields {
    fields: Vec<OptionalField>,
}

impl OptionalFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        payload_key: &'static str,
        metadata_key: &'static str,
        value: impl Into<Value>,
    ) {
        self.fields.retain(|f| f.payload_key != payload_key);
        self.fields.push(OptionalField {
            payload_key,
            metadata_key,
            value: value.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn payload_fields(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|f| (f.payload_key.to_string(), f.value.clone()))
            .collect()
    }

    pub fn metadata_fields(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|f| (f.metadata_key.to_string(), f.value.clone()))
            .collect()
    }
}

/// The `_metadata` object attached to every successful result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    pub success: bool,
    pub message: String,
    pub timestamp: String,
    pub source_file_name: String,
    pub operation: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResultMetadata {
    pub fn new(
        operation: impl Into<String>,
        message: impl Into<String>,
        source_file_name: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            success: true,
            message: message.into(),
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            source_file_name: source_file_name.into(),
            operation: operation.into(),
            extra: Map::new(),
        }
    }

    pub fn with_fields(mut self, fields: Map<String, Value>) -> Self {
        self.extra.extend(fields);
        self
    }
}

/// Parses a terminal response body. A JSON string holding JSON is decoded once more.
pub fn parse_result(body: &[u8]) -> Result<Value> {
    let value: Value = serde_json::from_slice(body)?;
    if let Value::String(inner) = &value {
        if let Ok(nested @ (Value::Object(_) | Value::Array(_))) =
            serde_json::from_str::<Value>(inner)
        {
            return Ok(nested);
        }
    }
    Ok(value)
}

/// Merges `_metadata` into an object result, or wraps other results under `data`.
pub fn attach_metadata(result: Value, metadata: &ResultMetadata) -> Result<Value> {
    let metadata = serde_json::to_value(metadata)?;
    let mut object = match result {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    object.insert("_metadata".to_string(), metadata);
    Ok(Value::Object(object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_request_uses_remote_casing() {
        let mut optional = OptionalFields::new();
        optional.insert("CustomFieldKeys", "customFieldKeys", json!(["PoNumber"]));

        let request = DocumentRequest::new("invoice.pdf", "JVBERi0x", &optional);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "docName": "invoice.pdf",
                "docContent": "JVBERi0x",
                "IsAsync": true,
                "CustomFieldKeys": ["PoNumber"]
            })
        );
    }

    #[test]
    fn test_optional_insert_replaces() {
        let mut optional = OptionalFields::new();
        optional.insert("DocumentType", "documentType", "Deed");
        optional.insert("DocumentType", "documentType", "Note");

        assert_eq!(optional.payload_fields().len(), 1);
        assert_eq!(optional.metadata_fields()["documentType"], json!("Note"));
    }

    #[test]
    fn test_parse_result_object_and_nested_string() {
        assert_eq!(parse_result(br#"{"a":1}"#).unwrap(), json!({"a": 1}));
        assert_eq!(parse_result(br#""{\"a\":1}""#).unwrap(), json!({"a": 1}));
        assert_eq!(parse_result(br#""plain""#).unwrap(), json!("plain"));
    }

    #[test]
    fn test_parse_result_rejects_invalid_json() {
        assert!(parse_result(b"<html>oops</html>").is_err());
        assert!(parse_result(b"").is_err());
    }

    #[test]
    fn test_attach_metadata_to_object() {
        let metadata = ResultMetadata::new("aiInvoiceParser", "Invoice processed", "a.pdf", at())
            .with_fields(OptionalFields::new().metadata_fields());
        let value = attach_metadata(json!({"amount": "100.00"}), &metadata).unwrap();

        assert_eq!(
            value,
            json!({
                "amount": "100.00",
                "_metadata": {
                    "success": true,
                    "message": "Invoice processed",
                    "timestamp": "2024-05-01T12:30:00.000Z",
                    "sourceFileName": "a.pdf",
                    "operation": "aiInvoiceParser"
                }
            })
        );
    }

    #[test]
    fn test_attach_metadata_wraps_non_objects() {
        let metadata = ResultMetadata::new("aiProcessContract", "ok", "c.pdf", at());
        let value = attach_metadata(json!([1, 2]), &metadata).unwrap();

        assert_eq!(value["data"], json!([1, 2]));
        assert_eq!(value["_metadata"]["operation"], json!("aiProcessContract"));
    }
}
