//! `0x`-prefixed hex helpers for RPC-shaped strings.

use alloy_primitives::{Address, B256};

use crate::error::FormatError;

/// Decode a hex string, with or without the `0x` prefix. `"0x"` is empty.
pub fn decode(s: &str) -> Result<Vec<u8>, FormatError> {
    let body = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
    Ok(hex::decode(body)?)
}

/// Encode bytes as a `0x`-prefixed lowercase hex string.
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes.as_ref()))
}

/// Parse a 20-byte address from hex.
pub fn parse_address(s: &str) -> Result<Address, FormatError> {
    let bytes = decode(s)?;
    if bytes.len() != 20 {
        return Err(FormatError::InvalidHex(format!(
            "address must be 20 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(Address::from_slice(&bytes))
}

/// Parse a 32-byte word (topic, hash) from hex.
pub fn parse_word(s: &str) -> Result<B256, FormatError> {
    let bytes = decode(s)?;
    if bytes.len() != 32 {
        return Err(FormatError::InvalidHex(format!(
            "word must be 32 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(B256::from_slice(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_with_and_without_prefix() {
        assert_eq!(decode("0xdead").unwrap(), vec![0xde, 0xad]);
        assert_eq!(decode("dead").unwrap(), vec![0xde, 0xad]);
        assert!(decode("0x").unwrap().is_empty());
    }

    #[test]
    fn odd_length_is_rejected() {
        assert!(matches!(decode("0xabc"), Err(FormatError::InvalidHex(_))));
    }

    #[test]
    fn address_length_checked() {
        assert!(parse_address("0x2020202020202020202020202020202020202020").is_ok());
        assert!(parse_address("0x2020").is_err());
    }
}
