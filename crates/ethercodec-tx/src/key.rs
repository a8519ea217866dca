//! secp256k1 private keys and public-key encodings.

use std::fmt;

use alloy_primitives::Address;
use ethercodec_core::{hash::address_from_public_key, hexstr, SignerError};
use k256::{ecdsa::SigningKey, elliptic_curve::sec1::ToEncodedPoint, PublicKey};
use zeroize::Zeroizing;

/// A raw 32-byte secret scalar in `[1, n-1]`.
///
/// The scalar is wiped when the key is dropped and never appears in
/// `Debug` output.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Rejects anything that is not 32 bytes or not a valid non-zero scalar.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SignerError> {
        if bytes.len() != 32 {
            return Err(SignerError::InvalidKey {
                reason: format!("expected 32 bytes, got {}", bytes.len()),
            });
        }
        let inner = SigningKey::from_slice(bytes).map_err(|_| SignerError::InvalidKey {
            reason: "scalar is zero or not below the curve order".into(),
        })?;
        Ok(Self { inner })
    }

    pub fn from_hex(s: &str) -> Result<Self, SignerError> {
        let bytes = Zeroizing::new(hexstr::decode(s)?);
        Self::from_bytes(&bytes)
    }

    /// The secret scalar, big-endian. Wiped when the returned buffer drops.
    pub fn to_bytes(&self) -> Zeroizing<[u8; 32]> {
        let mut out = Zeroizing::new([0u8; 32]);
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }

    /// Uncompressed public key without the `0x04` prefix (`x || y`).
    pub fn public_key_uncompressed(&self) -> [u8; 64] {
        let point = PublicKey::from(self.inner.verifying_key()).to_encoded_point(false);
        let mut out = [0u8; 64];
        out.copy_from_slice(&point.as_bytes()[1..]);
        out
    }

    /// SEC1 compressed public key (`0x02`/`0x03` prefix, 33 bytes).
    pub fn public_key_compressed(&self) -> [u8; 33] {
        let point = PublicKey::from(self.inner.verifying_key()).to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(point.as_bytes());
        out
    }

    pub fn address(&self) -> Address {
        address_from_public_key(&self.public_key_uncompressed())
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Address controlled by `key`.
pub fn address_from_private_key(key: &PrivateKey) -> Address {
    key.address()
}

/// Compress a 64-byte `x || y` public key.
pub fn compress_pubkey(uncompressed: &[u8; 64]) -> Result<[u8; 33], SignerError> {
    let mut sec1 = [0u8; 65];
    sec1[0] = 0x04;
    sec1[1..].copy_from_slice(uncompressed);
    let key = PublicKey::from_sec1_bytes(&sec1).map_err(|_| SignerError::InvalidKey {
        reason: "public key is not on the curve".into(),
    })?;
    let point = key.to_encoded_point(true);
    let mut out = [0u8; 33];
    out.copy_from_slice(point.as_bytes());
    Ok(out)
}

/// Expand a 33-byte compressed public key to `x || y`.
pub fn uncompress_pubkey(compressed: &[u8; 33]) -> Result<[u8; 64], SignerError> {
    let key = PublicKey::from_sec1_bytes(compressed).map_err(|_| SignerError::InvalidKey {
        reason: "invalid compressed public key".into(),
    })?;
    let point = key.to_encoded_point(false);
    let mut out = [0u8; 64];
    out.copy_from_slice(&point.as_bytes()[1..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const ORDER: [u8; 32] = hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141");

    #[test]
    fn address_of_known_key() {
        let key = PrivateKey::from_bytes(&[0x46; 32]).unwrap();
        assert_eq!(
            key.address(),
            Address::from(hex!("9d8a62f656a8d1615c1294fd71e9cfb3e4855a4f"))
        );
        assert_eq!(address_from_private_key(&key), key.address());
    }

    #[test]
    fn generator_point_for_scalar_one() {
        let mut one = [0u8; 32];
        one[31] = 1;
        let key = PrivateKey::from_bytes(&one).unwrap();
        assert_eq!(
            key.public_key_compressed(),
            hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798")
        );
        assert_eq!(
            key.address(),
            Address::from(hex!("7e5f4552091a69125d5dfcb7b8c2659029395bdf"))
        );
    }

    #[test]
    fn rejects_out_of_range_scalars() {
        assert!(matches!(
            PrivateKey::from_bytes(&[0u8; 32]),
            Err(SignerError::InvalidKey { .. })
        ));
        assert!(matches!(
            PrivateKey::from_bytes(&ORDER),
            Err(SignerError::InvalidKey { .. })
        ));
        assert!(matches!(
            PrivateKey::from_bytes(&[1u8; 31]),
            Err(SignerError::InvalidKey { .. })
        ));
        assert!(matches!(PrivateKey::from_hex("0xzz"), Err(SignerError::Format(_))));
    }

    #[test]
    fn compression_round_trip() {
        let key = PrivateKey::from_hex(&format!("0x{}", "32".repeat(32))).unwrap();
        let full = key.public_key_uncompressed();
        let compressed = compress_pubkey(&full).unwrap();
        assert_eq!(compressed, key.public_key_compressed());
        assert_eq!(uncompress_pubkey(&compressed).unwrap(), full);
        assert!(compress_pubkey(&[0u8; 64]).is_err());
    }

    #[test]
    fn debug_hides_secret() {
        let key = PrivateKey::from_bytes(&[0x46; 32]).unwrap();
        let shown = format!("{key:?}");
        assert!(!shown.contains("4646"));
        assert_eq!(*key.to_bytes(), [0x46; 32]);
    }
}
