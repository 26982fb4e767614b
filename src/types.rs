//! Type definitions for the pdf4me plugin.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Binary attachment on a host input item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryData {
    /// Raw file bytes.
    pub data: Vec<u8>,
    /// Original file name, if the host knows it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// MIME type reported by the host.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

impl BinaryData {
    /// Creates binary data with a file name.
    pub fn new(data: impl Into<Vec<u8>>, file_name: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            file_name: Some(file_name.into()),
            mime_type: None,
        }
    }
}

/// One input item handed over by the host runtime.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputItem {
    /// JSON produced by the previous node.
    pub json: Value,
    /// Binary attachments keyed by property name.
    #[serde(default)]
    pub binary: HashMap<String, BinaryData>,
}

impl InputItem {
    /// Creates an item carrying only JSON.
    pub fn from_json(json: Value) -> Self {
        Self {
            json,
            binary: HashMap::new(),
        }
    }

    /// Adds a binary attachment under `property`.
    pub fn with_binary(mut self, property: impl Into<String>, data: BinaryData) -> Self {
        self.binary.insert(property.into(), data);
        self
    }
}

/// One output record returned to the host runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputItem {
    /// Result JSON, or an error record when the item failed.
    pub json: Value,
    /// Index of the input item this record belongs to.
    pub paired_item: usize,
}
