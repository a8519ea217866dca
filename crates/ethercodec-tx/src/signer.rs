//! EIP-155 signing and sender recovery.
//!
//! Signing hashes the nine-field preimage with keccak256 and signs the
//! digest with RFC-6979 deterministic ECDSA over secp256k1, so the same
//! transaction and key always give the same `(v, r, s)`:
//!
//! ```text
//! v = recovery_id + chain_id * 2 + 35
//! ```
//!
//! `s` always leaves through [`LowS`]. Recovery accepts only low-s
//! signatures with an EIP-155 `v` unless
//! [`SignerConfig::accept_unprotected`] admits `v` of 27 or 28.

use alloy_primitives::{uint, Address, B256, U256};
use ethercodec_core::{hash::address_from_public_key, keccak256, SignerConfig, SignerError};
use k256::{
    ecdsa::{RecoveryId, Signature, VerifyingKey},
    elliptic_curve::sec1::ToEncodedPoint,
    PublicKey,
};
use tracing::{debug, trace};

use crate::key::PrivateKey;
use crate::transaction::{SignedTransaction, UnsignedTransaction};

/// Order of the secp256k1 group.
pub const SECP256K1_N: U256 =
    uint!(0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141_U256);

/// Low-s normalization: keeps `s` in `[1, n/2]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowS;

impl LowS {
    /// `floor(n / 2)`
    pub const HALF_ORDER: U256 =
        uint!(0x7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF5D576E7357A4501DDFE92F46681B20A0_U256);

    pub fn is_low(s: &U256) -> bool {
        *s <= Self::HALF_ORDER
    }

    /// Replace a high `s` with `n - s` and flip the recovery parity to match.
    pub fn normalize(&self, s: U256, recovery_id: u8) -> (U256, u8) {
        if Self::is_low(&s) {
            (s, recovery_id)
        } else {
            (SECP256K1_N - s, recovery_id ^ 1)
        }
    }
}

/// Signs transactions and recovers their senders.
#[derive(Debug, Clone, Default)]
pub struct Signer {
    config: SignerConfig,
    low_s: LowS,
}

impl Signer {
    pub fn new(config: SignerConfig) -> Self {
        Self {
            config,
            low_s: LowS,
        }
    }

    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Sign `tx` for its `chain_id`.
    pub fn sign_transaction(
        &self,
        tx: &UnsignedTransaction,
        key: &PrivateKey,
    ) -> Result<SignedTransaction, SignerError> {
        if tx.chain_id == 0 {
            return Err(SignerError::UnsupportedChain {
                reason: "chain id 0 has no replay protection".into(),
            });
        }
        // Both parities must fit in v.
        let v_base = tx
            .chain_id
            .checked_mul(2)
            .and_then(|x| x.checked_add(35))
            .filter(|x| x.checked_add(1).is_some())
            .ok_or_else(|| SignerError::UnsupportedChain {
                reason: format!("chain id {} overflows v", tx.chain_id),
            })?;

        let hash = tx.signing_hash();
        let (r, s, parity) = self.sign_hash(&hash, key)?;

        debug!(chain_id = tx.chain_id, nonce = tx.nonce, "signed transaction");
        Ok(SignedTransaction {
            to: tx.to,
            value: tx.value,
            gas: tx.gas,
            gas_price: tx.gas_price,
            nonce: tx.nonce,
            data: tx.data.clone(),
            v: v_base + u64::from(parity),
            r,
            s,
        })
    }

    /// Sign a 32-byte digest, returning `(r, s, parity)` with low `s`.
    pub fn sign_hash(&self, hash: &B256, key: &PrivateKey) -> Result<(U256, U256, u8), SignerError> {
        let (sig, recid) = key
            .signing_key()
            .sign_prehash_recoverable(hash.as_slice())
            .map_err(|e| SignerError::InvalidSignature {
                reason: e.to_string(),
            })?;
        if recid.is_x_reduced() {
            return Err(SignerError::InvalidSignature {
                reason: "r was reduced modulo n".into(),
            });
        }
        let bytes = sig.to_bytes();
        let r = U256::from_be_slice(&bytes[..32]);
        let s = U256::from_be_slice(&bytes[32..]);
        let (s, parity) = self.low_s.normalize(s, u8::from(recid.is_y_odd()));
        trace!(parity, "produced signature");
        Ok((r, s, parity))
    }

    /// Address that signed `tx`.
    pub fn recover_sender(&self, tx: &SignedTransaction) -> Result<Address, SignerError> {
        check_scalar(&tx.r, "r")?;
        check_scalar(&tx.s, "s")?;
        if !LowS::is_low(&tx.s) {
            return Err(SignerError::InvalidSignature {
                reason: "s is in the upper half of the curve order".into(),
            });
        }

        let (hash, parity) = match tx.v {
            // 35 and 36 would mean chain id 0
            v if v >= 37 => {
                let chain_id = (v - 35) / 2;
                let parity = ((v - 35) % 2) as u8;
                (tx.to_unsigned(chain_id).signing_hash(), parity)
            }
            27 | 28 if self.config.accept_unprotected => {
                (keccak256(tx.legacy_preimage()), (tx.v - 27) as u8)
            }
            v => {
                return Err(SignerError::UnsupportedChain {
                    reason: format!("v = {v} is not an EIP-155 value"),
                })
            }
        };

        let address = recover_address(&hash, &tx.r, &tx.s, parity)?;
        debug!(v = tx.v, %address, "recovered sender");
        Ok(address)
    }
}

/// Recover the signing address of a digest from `(r, s, parity)`.
pub fn recover_address(hash: &B256, r: &U256, s: &U256, parity: u8) -> Result<Address, SignerError> {
    let mut bytes = [0u8; 64];
    bytes[..32].copy_from_slice(&r.to_be_bytes::<32>());
    bytes[32..].copy_from_slice(&s.to_be_bytes::<32>());
    let signature = Signature::from_slice(&bytes).map_err(|e| SignerError::InvalidSignature {
        reason: e.to_string(),
    })?;
    let recid = RecoveryId::from_byte(parity).ok_or_else(|| SignerError::InvalidSignature {
        reason: format!("recovery id {parity} out of range"),
    })?;
    let key = VerifyingKey::recover_from_prehash(hash.as_slice(), &signature, recid).map_err(|e| {
        SignerError::InvalidSignature {
            reason: e.to_string(),
        }
    })?;

    let point = PublicKey::from(&key).to_encoded_point(false);
    let mut public = [0u8; 64];
    public.copy_from_slice(&point.as_bytes()[1..]);
    Ok(address_from_public_key(&public))
}

fn check_scalar(value: &U256, name: &str) -> Result<(), SignerError> {
    if value.is_zero() || *value >= SECP256K1_N {
        return Err(SignerError::InvalidSignature {
            reason: format!("{name} is outside [1, n-1]"),
        });
    }
    Ok(())
}

/// Sign with the default policy.
pub fn sign_transaction(tx: &UnsignedTransaction, key: &PrivateKey) -> Result<SignedTransaction, SignerError> {
    Signer::default().sign_transaction(tx, key)
}

/// Recover with the default policy (EIP-155 only).
pub fn recover_sender(tx: &SignedTransaction) -> Result<Address, SignerError> {
    Signer::default().recover_sender(tx)
}
