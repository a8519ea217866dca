//! # ethercodec-core
//!
//! Primitives shared across the ethercodec crates: error types, keccak and
//! hex helpers, the ABI type/value model, log types and configuration.

pub mod call;
pub mod config;
pub mod error;
pub mod event;
pub mod hash;
pub mod hexstr;
pub mod types;
pub mod value;

pub use alloy_primitives::{Address, B256, I256, U256};
pub use call::DecodedCall;
pub use config::{AbiConfig, CodecConfig, RlpConfig, SignerConfig};
pub use error::{AbiError, BatchDecodeError, ConfigError, FormatError, SignerError};
pub use event::{DecodedEvent, ParsedLog, RawLog};
pub use hash::{keccak256, to_checksum_address};
pub use types::AbiType;
pub use value::AbiValue;
