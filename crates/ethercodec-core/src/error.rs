//! Error types for the ethercodec pipelines.

use thiserror::Error;

/// Malformed RLP or hex input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("empty input")]
    EmptyInput,

    #[error("truncated input: need {needed} bytes, have {available}")]
    Truncated { needed: usize, available: usize },

    #[error("single byte below 0x80 must encode as itself")]
    NonCanonicalSingleByte,

    #[error("length {len} must use the short form")]
    NonCanonicalLength { len: usize },

    #[error("leading zero bytes in {what}")]
    LeadingZeros { what: &'static str },

    #[error("length of {bytes} bytes does not fit in usize")]
    LengthOverflow { bytes: usize },

    #[error("nesting deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("{count} trailing bytes after item")]
    TrailingBytes { count: usize },

    #[error("expected a byte string, found a list")]
    ExpectedBytes,

    #[error("expected a list, found a byte string")]
    ExpectedList,

    #[error("invalid field '{field}': {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for FormatError {
    fn from(e: hex::FromHexError) -> Self {
        FormatError::InvalidHex(e.to_string())
    }
}

/// Errors from transaction signing and sender recovery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignerError {
    #[error("invalid private key: {reason}")]
    InvalidKey { reason: String },

    #[error("invalid signature: {reason}")]
    InvalidSignature { reason: String },

    #[error("unsupported chain: {reason}")]
    UnsupportedChain { reason: String },

    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

/// Errors from the ABI calldata / event codec.
#[derive(Debug, Error)]
pub enum AbiError {
    #[error("no function '{function}' accepts the supplied arguments")]
    SelectorNotFound { function: String },

    #[error("no event matches topic {topic}")]
    UnknownEvent { topic: String },

    #[error("truncated data at offset {offset}: need {needed} bytes, have {available}")]
    TruncatedData {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("invalid encoding: {reason}")]
    InvalidEncoding { reason: String },

    #[error("unsupported ABI type '{ty}'")]
    UnsupportedType { ty: String },

    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch { expected: String, got: String },

    #[error("invalid ABI JSON: {0}")]
    InvalidAbiJson(#[from] serde_json::Error),

    #[error("format error: {0}")]
    Format(#[from] FormatError),
}

/// Errors that can occur during batch decoding.
#[derive(Debug, Error)]
pub enum BatchDecodeError {
    #[error("decode error at index {index}: {source}")]
    ItemFailed {
        index: usize,
        #[source]
        source: AbiError,
    },
}

/// Errors from loading a [`CodecConfig`](crate::config::CodecConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown config format for '{path}' (expected .yaml, .yml or .json)")]
    UnknownFormat { path: String },
}
