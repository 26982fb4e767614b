#![allow(missing_docs)]
//! Host parameter resolution.
//!
//! The host runtime owns the parameter panels; actions only read already
//! resolved values through [`ParameterSource`].

use std::collections::HashMap;

use serde_json::Value;

/// Narrow view of the host's per-item parameter resolution.
pub trait ParameterSource: Send + Sync {
    /// Resolved value of `name` for the item at `item_index`, if set.
    fn get_parameter(&self, name: &str, item_index: usize) -> Option<Value>;

    fn get_string(&self, name: &str, item_index: usize, default: &str) -> String {
        match self.get_parameter(name, item_index) {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => default.to_string(),
        }
    }

    fn get_bool(&self, name: &str, item_index: usize, default: bool) -> bool {
        match self.get_parameter(name, item_index) {
            Some(Value::Bool(b)) => b,
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => default,
            },
            _ => default,
        }
    }

    /// Reads a list from an array or a comma/newline separated string.
    /// Blank entries are dropped.
    fn get_string_list(&self, name: &str, item_index: usize) -> Vec<String> {
        let raw: Vec<String> = match self.get_parameter(name, item_index) {
            Some(Value::Array(values)) => values
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    Value::Null => None,
                    other => Some(other.to_string()),
                })
                .collect(),
            Some(Value::String(s)) => s
                .split([',', '\n'])
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        raw.into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// Map-backed parameters with optional per-item overrides.
#[derive(Debug, Clone, Default)]
pub struct StaticParameters {
    values: HashMap<String, Value>,
    item_values: HashMap<(usize, String), Value>,
}

impl StaticParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Override `name` for a single item.
    pub fn with_item(
        mut self,
        item_index: usize,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.item_values
            .insert((item_index, name.into()), value.into());
        self
    }
}

impl ParameterSource for StaticParameters {
    fn get_parameter(&self, name: &str, item_index: usize) -> Option<Value> {
        self.item_values
            .get(&(item_index, name.to_string()))
            .or_else(|| self.values.get(name))
            .cloned()
    }
}
