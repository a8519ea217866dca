//! EVM event log decoder.
//!
//! # Log layout
//! - `topics[0]` = keccak256 of the event signature (absent for anonymous
//!   events, which are never matched)
//! - `topics[1..]` = indexed parameters, one word each, in declaration order
//! - `data` = ABI-encoded tuple of the non-indexed parameters
//!
//! Indexed value types (uint, int, bool, address, bytes1..bytes32) are
//! stored as their 32-byte encoding and decode normally. Indexed reference
//! types (string, bytes, arrays, tuples) are stored as the keccak256 hash of
//! their encoding; the value is unrecoverable and the raw hash comes back as
//! a `bytes32`.

use std::collections::HashMap;

use alloy_primitives::B256;
use ethercodec_core::{AbiConfig, AbiError, AbiValue, DecodedEvent, ParsedLog, RawLog};
use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::decoder::{decode_word, AbiDecoder};
use crate::json::{Abi, AbiEntry, EntryKind};

/// Decodes logs emitted by one contract interface.
///
/// Thread-safe; share it by reference across threads.
#[derive(Debug, Clone)]
pub struct EventDecoder {
    abi: Abi,
    by_topic: HashMap<B256, usize>,
    decoder: AbiDecoder,
}

impl EventDecoder {
    pub fn new(abi: Abi) -> Self {
        Self::with_config(abi, &AbiConfig::default())
    }

    pub fn with_config(abi: Abi, config: &AbiConfig) -> Self {
        let mut by_topic = HashMap::new();
        for (index, entry) in abi.entries().iter().enumerate() {
            if entry.kind == EntryKind::Event && !entry.anonymous {
                // first declaration wins on duplicate signatures
                by_topic.entry(entry.topic0()).or_insert(index);
            }
        }
        debug!(events = by_topic.len(), "indexed event topics");
        Self {
            abi,
            by_topic,
            decoder: AbiDecoder::new(config),
        }
    }

    pub fn abi(&self) -> &Abi {
        &self.abi
    }

    /// The event entry whose signature hash is `topic0`.
    pub fn event_for(&self, topic0: &B256) -> Option<&AbiEntry> {
        self.by_topic.get(topic0).map(|&i| &self.abi.entries()[i])
    }

    /// Decode parsed topics and data.
    pub fn decode_event(&self, topics: &[B256], data: &[u8]) -> Result<DecodedEvent, AbiError> {
        let topic0 = topics.first().ok_or_else(|| AbiError::UnknownEvent {
            topic: "<no topics>".into(),
        })?;
        let event = self.event_for(topic0).ok_or_else(|| AbiError::UnknownEvent {
            topic: topic0.to_string(),
        })?;

        let indexed_count = event.inputs.iter().filter(|p| p.indexed).count();
        if topics.len() < indexed_count + 1 {
            return Err(AbiError::TruncatedData {
                offset: topics.len(),
                needed: indexed_count + 1,
                available: topics.len(),
            });
        }

        let data_types: Vec<_> = event
            .inputs
            .iter()
            .filter(|p| !p.indexed)
            .map(|p| p.ty.clone())
            .collect();
        let mut data_values = self.decoder.decode_params(&data_types, data)?.into_iter();
        let mut indexed_topics = topics[1..].iter();

        let mut params = IndexMap::with_capacity(event.inputs.len());
        for (param, name) in event.inputs.iter().zip(event.event_param_names()) {
            let value = if param.indexed {
                let topic = indexed_topics.next().ok_or_else(|| missing(&name))?;
                if param.ty.is_hashed_in_topic() {
                    AbiValue::FixedBytes(*topic, 32)
                } else {
                    decode_word(&param.ty, topic)?
                }
            } else {
                data_values.next().ok_or_else(|| missing(&name))?
            };
            params.insert(name, value);
        }

        trace!(event = %event.name, params = params.len(), "decoded event");
        Ok(DecodedEvent {
            name: event.name.clone(),
            signature: event.signature(),
            params,
        })
    }

    /// Decode an `eth_getLogs`-shaped log.
    pub fn decode_log(&self, log: &RawLog) -> Result<DecodedEvent, AbiError> {
        let topics = log.topic_words()?;
        let data = log.data_bytes()?;
        self.decode_event(&topics, &data)
    }

    /// The log with its `data` replaced by the decoded event.
    pub fn parse_log(&self, log: &RawLog) -> Result<ParsedLog, AbiError> {
        let event = self.decode_log(log)?;
        Ok(ParsedLog::new(log, event))
    }
}

fn missing(name: &str) -> AbiError {
    AbiError::InvalidEncoding {
        reason: format!("no value decoded for parameter '{name}'"),
    }
}

/// Decode one log against `abi`.
pub fn decode_event(log: &RawLog, abi: &Abi) -> Result<DecodedEvent, AbiError> {
    EventDecoder::new(abi.clone()).decode_log(log)
}

/// [`decode_event`], keeping the log metadata.
pub fn parse_event_data(log: &RawLog, abi: &Abi) -> Result<ParsedLog, AbiError> {
    EventDecoder::new(abi.clone()).parse_log(log)
}
