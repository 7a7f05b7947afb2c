//! StorageRequest - output binding に渡す 1 回分の書き込み指示

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::key::ObjectKey;

/// Metadata field carrying the object key.
pub const BLOB_NAME_KEY: &str = "blobName";

/// Operation requested from a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingOperation {
    Create,
}

impl BindingOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
        }
    }
}

impl fmt::Display for BindingOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a binding needs to persist one payload.
///
/// Built once per inbound call and moved into the port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageRequest {
    pub container: String,
    pub operation: BindingOperation,
    pub payload: Vec<u8>,
    pub metadata: BTreeMap<String, String>,
}

impl StorageRequest {
    /// `Create` request with `blobName = key`.
    pub fn create(container: impl Into<String>, key: ObjectKey, payload: Vec<u8>) -> Self {
        let mut metadata = BTreeMap::new();
        metadata.insert(BLOB_NAME_KEY.to_string(), key.into_string());
        Self {
            container: container.into(),
            operation: BindingOperation::Create,
            payload,
            metadata,
        }
    }

    pub fn blob_name(&self) -> Option<&str> {
        self.metadata.get(BLOB_NAME_KEY).map(String::as_str)
    }
}

/// Opaque backend answer. The inventory path never inspects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindingResponse {
    pub data: Vec<u8>,
    pub metadata: BTreeMap<String, String>,
}
