//! Minimal big-endian integer conversions.

use alloy_primitives::U256;
use ethercodec_core::FormatError;

/// Minimal big-endian bytes of `v`; zero is the empty vector.
pub fn to_minimal_be(v: U256) -> Vec<u8> {
    let bytes = v.to_be_bytes::<32>();
    strip_leading_zeros(&bytes).to_vec()
}

pub fn to_minimal_be_u64(v: u64) -> Vec<u8> {
    let bytes = v.to_be_bytes();
    strip_leading_zeros(&bytes).to_vec()
}

/// Big-endian bytes of `v` left-padded to exactly `len` bytes.
pub fn to_padded_be(v: U256, len: usize) -> Result<Vec<u8>, FormatError> {
    let minimal = to_minimal_be(v);
    if minimal.len() > len {
        return Err(FormatError::InvalidField {
            field: "integer",
            reason: format!("needs {} bytes, padding width is {len}", minimal.len()),
        });
    }
    let mut out = vec![0u8; len - minimal.len()];
    out.extend_from_slice(&minimal);
    Ok(out)
}

/// Parse a canonical big-endian integer of at most 32 bytes.
pub fn from_be(bytes: &[u8], field: &'static str) -> Result<U256, FormatError> {
    check_canonical(bytes, field, 32)?;
    Ok(U256::from_be_slice(bytes))
}

/// Parse a canonical big-endian integer of at most 8 bytes.
pub fn from_be_u64(bytes: &[u8], field: &'static str) -> Result<u64, FormatError> {
    check_canonical(bytes, field, 8)?;
    Ok(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

fn check_canonical(bytes: &[u8], field: &'static str, max: usize) -> Result<(), FormatError> {
    if bytes.len() > max {
        return Err(FormatError::InvalidField {
            field,
            reason: format!("{} bytes exceeds the {max}-byte limit", bytes.len()),
        });
    }
    if bytes.first() == Some(&0) {
        return Err(FormatError::LeadingZeros { what: field });
    }
    Ok(())
}

pub(crate) fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_empty() {
        assert!(to_minimal_be(U256::ZERO).is_empty());
        assert!(to_minimal_be_u64(0).is_empty());
        assert_eq!(from_be(&[], "n").unwrap(), U256::ZERO);
    }

    #[test]
    fn minimal_encoding() {
        assert_eq!(to_minimal_be_u64(1024), vec![0x04, 0x00]);
        assert_eq!(to_minimal_be(U256::from(0x0186a0u64)), vec![0x01, 0x86, 0xa0]);
        assert_eq!(to_minimal_be(U256::MAX), vec![0xff; 32]);
    }

    #[test]
    fn padded_encoding() {
        assert_eq!(to_padded_be(U256::from(1u64), 4).unwrap(), vec![0, 0, 0, 1]);
        assert!(to_padded_be(U256::from(0x1_0000u64), 2).is_err());
    }

    #[test]
    fn leading_zero_rejected() {
        assert_eq!(
            from_be(&[0x00, 0x01], "nonce"),
            Err(FormatError::LeadingZeros { what: "nonce" })
        );
        assert!(from_be_u64(&[1, 2, 3, 4, 5, 6, 7, 8, 9], "gas").is_err());
        assert_eq!(from_be_u64(&[0x52, 0x08], "gas").unwrap(), 21000);
    }
}
