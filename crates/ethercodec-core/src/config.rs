//! Codec configuration.
//!
//! Every field has a default, so an empty document is a valid config:
//!
//! ```yaml
//! rlp:
//!   max_depth: 16
//! signer:
//!   accept_unprotected: false
//! abi:
//!   max_array_len: 1048576
//!   max_total_values: 1048576
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    pub rlp: RlpConfig,
    #[serde(default)]
    pub signer: SignerConfig,
    #[serde(default)]
    pub abi: AbiConfig,
}

/// RLP decoder limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RlpConfig {
    /// Maximum list nesting accepted by the decoder
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    16
}

impl Default for RlpConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

/// Signature recovery policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerConfig {
    /// Accept pre-EIP-155 signatures (`v` of 27 or 28) during recovery
    #[serde(default)]
    pub accept_unprotected: bool,
}

/// ABI decoder limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiConfig {
    /// Largest dynamic array / byte-string length word the decoder accepts
    #[serde(default = "default_max_array_len")]
    pub max_array_len: usize,
    /// Most values one decode may produce, counting every nested element.
    #[serde(default = "default_max_total_values")]
    pub max_total_values: usize,
}

fn default_max_array_len() -> usize {
    1 << 20
}

fn default_max_total_values() -> usize {
    1 << 20
}

impl Default for AbiConfig {
    fn default() -> Self {
        Self {
            max_array_len: default_max_array_len(),
            max_total_values: default_max_total_values(),
        }
    }
}

impl CodecConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a `.yaml`/`.yml` or `.json` file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(ConfigError::UnknownFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_uses_defaults() {
        let cfg = CodecConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg, CodecConfig::default());
        assert_eq!(cfg.rlp.max_depth, 16);
        assert!(!cfg.signer.accept_unprotected);
    }

    #[test]
    fn partial_overrides() {
        let cfg = CodecConfig::from_yaml_str("signer:\n  accept_unprotected: true\n").unwrap();
        assert!(cfg.signer.accept_unprotected);
        assert_eq!(cfg.abi.max_array_len, 1 << 20);
        assert_eq!(cfg.abi.max_total_values, 1 << 20);

        let cfg = CodecConfig::from_json_str(r#"{"rlp": {"max_depth": 4}}"#).unwrap();
        assert_eq!(cfg.rlp.max_depth, 4);
    }

    #[test]
    fn unknown_extension_rejected() {
        let path = std::env::temp_dir().join("ethercodec-config-test.toml");
        std::fs::write(&path, "").unwrap();
        let err = CodecConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownFormat { .. }));
        let _ = std::fs::remove_file(path);
    }
}
