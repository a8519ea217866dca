//! Keccak-256 and the helpers built directly on it.
//!
//! Every signature fingerprint, function selector, transaction hash and
//! address derivation in the workspace goes through [`keccak256`].

use alloy_primitives::{Address, B256};
use tiny_keccak::{Hasher, Keccak};

/// Keccak-256 (the pre-standard SHA-3 variant Ethereum uses).
pub fn keccak256(data: impl AsRef<[u8]>) -> B256 {
    let mut hasher = Keccak::v256();
    let mut output = [0u8; 32];
    hasher.update(data.as_ref());
    hasher.finalize(&mut output);
    B256::from(output)
}

/// First four bytes of `keccak256(signature)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Address of an uncompressed secp256k1 public key given as the 64-byte
/// `x || y` body (without the leading `0x04` format byte).
pub fn address_from_public_key(public_key: &[u8; 64]) -> Address {
    let hash = keccak256(public_key);
    Address::from_slice(&hash[12..])
}

/// EIP-55 mixed-case checksum encoding, `0x`-prefixed.
pub fn to_checksum_address(address: &Address) -> String {
    let lower = hex::encode(address.as_slice());
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn keccak_empty() {
        assert_eq!(
            keccak256(b"").0,
            hex!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
    }

    #[test]
    fn transfer_selector() {
        assert_eq!(selector("transfer(address,uint256)"), hex!("a9059cbb"));
    }

    #[test]
    fn transfer_event_topic() {
        assert_eq!(
            keccak256("Transfer(address,address,uint256)").0,
            hex!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef")
        );
    }

    #[test]
    fn eip55_checksum() {
        let addr = Address::from(hex!("5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"));
        assert_eq!(
            to_checksum_address(&addr),
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"
        );
        let addr = Address::from(hex!("fb6916095ca1df60bb79ce92ce3ea74c37c5d359"));
        assert_eq!(
            to_checksum_address(&addr),
            "0xfB6916095ca1df60bB79Ce92cE3Ea74c37c5d359"
        );
    }
}
