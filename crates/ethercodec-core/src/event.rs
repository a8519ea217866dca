//! Raw and decoded log types.

use alloy_primitives::B256;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::hexstr;
use crate::value::AbiValue;

/// A log object in the shape returned by `eth_getLogs` / receipts.
/// This is the input to the event decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    /// Contract that emitted the log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// topics[0] is the event signature hash; the rest are indexed params
    pub topics: Vec<String>,
    /// ABI-encoded non-indexed params, `0x`-prefixed hex
    #[serde(default = "empty_hex")]
    pub data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_index: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_index: Option<String>,
    #[serde(default)]
    pub removed: bool,
}

fn empty_hex() -> String {
    "0x".to_string()
}

impl RawLog {
    /// A bare log with only topics and data, as used in tests and demos.
    pub fn new(topics: Vec<String>, data: impl Into<String>) -> Self {
        Self {
            topics,
            data: data.into(),
            ..Default::default()
        }
    }

    /// topics[0], the event signature hash, if present.
    pub fn event_signature(&self) -> Option<&str> {
        self.topics.first().map(String::as_str)
    }

    /// All topics parsed as 32-byte words.
    pub fn topic_words(&self) -> Result<Vec<B256>, FormatError> {
        self.topics.iter().map(|t| hexstr::parse_word(t)).collect()
    }

    pub fn data_bytes(&self) -> Result<Vec<u8>, FormatError> {
        hexstr::decode(&self.data)
    }
}

/// A decoded event: the matched entry name plus its parameters in
/// declaration order.
///
/// Serializes as a flat object `{"event_name": ..., "<param>": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedEvent {
    #[serde(rename = "event_name")]
    pub name: String,
    /// Canonical signature, e.g. `Transfer(address,address,uint256)`
    #[serde(skip)]
    pub signature: String,
    #[serde(flatten)]
    pub params: IndexMap<String, AbiValue>,
}

impl DecodedEvent {
    /// Get a parameter by name.
    pub fn param(&self, name: &str) -> Option<&AbiValue> {
        self.params.get(name)
    }
}

/// A log with its `data` replaced by the decoded event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedLog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub topics: Vec<String>,
    pub data: DecodedEvent,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_index: Option<String>,
    pub removed: bool,
}

impl ParsedLog {
    pub fn new(raw: &RawLog, event: DecodedEvent) -> Self {
        Self {
            address: raw.address.clone(),
            topics: raw.topics.clone(),
            data: event,
            block_hash: raw.block_hash.clone(),
            block_number: raw.block_number.clone(),
            transaction_hash: raw.transaction_hash.clone(),
            transaction_index: raw.transaction_index.clone(),
            log_index: raw.log_index.clone(),
            removed: raw.removed,
        }
    }
}
