//! # ethercodec-abi
//!
//! Solidity ABI codec: calldata encoding and decoding for functions and
//! constructors, and event log decoding against a contract interface.
//!
//! ## Implementation notes
//! - Interfaces load from standard ABI JSON ([`Abi`])
//! - Calldata = selector (first 4 bytes of keccak256 of the signature) ||
//!   head/tail encoded arguments
//! - Topics[0] → event signature hash; Topics[1..] → indexed parameters;
//!   `data` → non-indexed parameters
//! - Batches of logs decode in parallel with `rayon`

pub mod batch;
pub mod call;
pub mod decoder;
pub mod encoder;
pub mod event;
pub mod json;

pub use batch::{decode_logs, BatchDecodeResult, ErrorMode};
pub use call::{decode_call, decode_call_with, encode_call, encode_constructor};
pub use decoder::{decode_params, decode_word, AbiDecoder};
pub use encoder::{encode_params, encode_value};
pub use event::{decode_event, parse_event_data, EventDecoder};
pub use json::{Abi, AbiEntry, EntryKind, Param};
