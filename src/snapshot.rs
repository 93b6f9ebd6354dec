use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::CodecError;
use crate::exchange::LookupTable;

pub const SNAPSHOT_VERSION: u32 = 1;

/// Published `data.json`: the encoded table plus a format version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub data: String,
    pub version: u32,
}

impl SnapshotDocument {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self {
            data: encoded.into(),
            version: SNAPSHOT_VERSION,
        }
    }

    pub fn publish(table: &LookupTable) -> Result<Self, CodecError> {
        Ok(Self::new(codec::encode(table)?))
    }

    /// The encoded payload, provided this reader understands the version.
    pub fn into_payload(self) -> Result<String, CodecError> {
        if self.version != SNAPSHOT_VERSION {
            return Err(CodecError::UnsupportedVersion(self.version));
        }
        Ok(self.data)
    }

    pub fn to_json_pretty(&self) -> Result<String, CodecError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self, CodecError> {
        Ok(serde_json::from_str(text)?)
    }
}
