use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::command::ConfigurationKind;

/// Payload handed to the external push/apply executor.
///
/// The executor contract is a JSON object carrying an `extra_vars` mapping;
/// the loaded document text goes in under `{kind}_conf`, byte for byte.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PushPayload {
    pub extra_vars: Map<String, Value>,
}

impl PushPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the payload from executor-supplied JSON. The value must already
    /// carry an `extra_vars` object.
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).context("push data is missing an 'extra_vars' object")
    }

    pub fn insert_document(&mut self, configuration: ConfigurationKind, document: String) {
        self.extra_vars
            .insert(configuration.payload_key(), Value::String(document));
    }
}
