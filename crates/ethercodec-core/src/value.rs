//! Typed ABI values.

use std::fmt;

use alloy_primitives::{ruint::UintTryFrom, Address, B256, I256, U256};
use serde::{Serialize, Serializer};

use crate::hash::to_checksum_address;
use crate::types::AbiType;

/// A value carrying the payload for one [`AbiType`].
///
/// Integer variants record their declared width so a decoded `uint8` stays
/// distinguishable from a `uint256`; when encoding, the width of the target
/// parameter type is what counts and the value only has to fit it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbiValue {
    Uint(U256, usize),
    Int(I256, usize),
    Address(Address),
    Bool(bool),
    /// Left-aligned word plus the declared length in bytes.
    FixedBytes(B256, usize),
    Bytes(Vec<u8>),
    String(String),
    Array(Vec<AbiValue>),
    FixedArray(Vec<AbiValue>),
    Tuple(Vec<AbiValue>),
}

impl AbiValue {
    pub fn uint256<T>(v: T) -> Self
    where
        U256: UintTryFrom<T>,
    {
        AbiValue::Uint(U256::from(v), 256)
    }

    pub fn int256(v: I256) -> Self {
        AbiValue::Int(v, 256)
    }

    /// `bytesN` from a slice of at most 32 bytes.
    pub fn fixed_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() || bytes.len() > 32 {
            return None;
        }
        let mut word = [0u8; 32];
        word[..bytes.len()].copy_from_slice(bytes);
        Some(AbiValue::FixedBytes(B256::from(word), bytes.len()))
    }

    /// Structural conformance with a parameter type. Integers match any
    /// declared width they fit into.
    pub fn matches(&self, ty: &AbiType) -> bool {
        match (self, ty) {
            (AbiValue::Uint(v, _), AbiType::Uint(bits)) => uint_fits(v, *bits),
            (AbiValue::Int(v, _), AbiType::Int(bits)) => int_fits(v, *bits),
            (AbiValue::Address(_), AbiType::Address) => true,
            (AbiValue::Bool(_), AbiType::Bool) => true,
            (AbiValue::FixedBytes(_, n), AbiType::FixedBytes(m)) => n == m,
            (AbiValue::Bytes(_), AbiType::Bytes) => true,
            (AbiValue::String(_), AbiType::String) => true,
            (AbiValue::Array(vals), AbiType::Array(elem)) => vals.iter().all(|v| v.matches(elem)),
            (AbiValue::FixedArray(vals), AbiType::FixedArray(elem, len)) => {
                vals.len() == *len && vals.iter().all(|v| v.matches(elem))
            }
            (AbiValue::Tuple(vals), AbiType::Tuple(types)) => {
                vals.len() == types.len() && vals.iter().zip(types).all(|(v, t)| v.matches(t))
            }
            _ => false,
        }
    }

    /// Short description for error messages.
    pub fn kind(&self) -> String {
        match self {
            AbiValue::Uint(_, bits) => format!("uint{bits}"),
            AbiValue::Int(_, bits) => format!("int{bits}"),
            AbiValue::Address(_) => "address".into(),
            AbiValue::Bool(_) => "bool".into(),
            AbiValue::FixedBytes(_, n) => format!("bytes{n}"),
            AbiValue::Bytes(_) => "bytes".into(),
            AbiValue::String(_) => "string".into(),
            AbiValue::Array(v) => format!("array[{}]", v.len()),
            AbiValue::FixedArray(v) => format!("fixed array[{}]", v.len()),
            AbiValue::Tuple(v) => format!("tuple({})", v.len()),
        }
    }

    pub fn as_u256(&self) -> Option<U256> {
        match self {
            AbiValue::Uint(v, _) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i256(&self) -> Option<I256> {
        match self {
            AbiValue::Int(v, _) => Some(*v),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<Address> {
        match self {
            AbiValue::Address(a) => Some(*a),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AbiValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AbiValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Bytes of a `bytes` or `bytesN` value (only the declared `N` bytes).
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            AbiValue::Bytes(b) => Some(b),
            AbiValue::FixedBytes(word, n) => Some(&word[..*n]),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> Option<&[AbiValue]> {
        match self {
            AbiValue::Array(v) | AbiValue::FixedArray(v) | AbiValue::Tuple(v) => Some(v),
            _ => None,
        }
    }

    /// JSON rendering: integers as decimal strings, bytes as `0x` hex,
    /// addresses EIP-55 checksummed, sequences as arrays.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;
        match self {
            AbiValue::Uint(v, _) => Value::String(v.to_string()),
            AbiValue::Int(v, _) => Value::String(v.to_string()),
            AbiValue::Address(a) => Value::String(to_checksum_address(a)),
            AbiValue::Bool(b) => Value::Bool(*b),
            AbiValue::FixedBytes(word, n) => Value::String(format!("0x{}", hex::encode(&word[..*n]))),
            AbiValue::Bytes(b) => Value::String(format!("0x{}", hex::encode(b))),
            AbiValue::String(s) => Value::String(s.clone()),
            AbiValue::Array(v) | AbiValue::FixedArray(v) | AbiValue::Tuple(v) => {
                Value::Array(v.iter().map(AbiValue::to_json).collect())
            }
        }
    }
}

/// `true` when `v` is representable in `bits` unsigned bits.
pub fn uint_fits(v: &U256, bits: usize) -> bool {
    v.bit_len() <= bits
}

/// `true` when `v` is representable in `bits` two's-complement bits.
pub fn int_fits(v: &I256, bits: usize) -> bool {
    if bits >= 256 {
        return true;
    }
    let raw = v.into_raw();
    // For negative x, !x == -x - 1, which must fit in bits - 1 like a positive value.
    let magnitude = if v.is_negative() { !raw } else { raw };
    magnitude.bit_len() < bits
}

impl From<Address> for AbiValue {
    fn from(a: Address) -> Self {
        AbiValue::Address(a)
    }
}

impl From<bool> for AbiValue {
    fn from(b: bool) -> Self {
        AbiValue::Bool(b)
    }
}

impl From<U256> for AbiValue {
    fn from(v: U256) -> Self {
        AbiValue::Uint(v, 256)
    }
}

impl From<u64> for AbiValue {
    fn from(v: u64) -> Self {
        AbiValue::Uint(U256::from(v), 256)
    }
}

impl From<&str> for AbiValue {
    fn from(s: &str) -> Self {
        AbiValue::String(s.to_string())
    }
}

impl From<String> for AbiValue {
    fn from(s: String) -> Self {
        AbiValue::String(s)
    }
}

impl From<Vec<u8>> for AbiValue {
    fn from(b: Vec<u8>) -> Self {
        AbiValue::Bytes(b)
    }
}

impl Serialize for AbiValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl fmt::Display for AbiValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiValue::Uint(v, _) => write!(f, "{v}"),
            AbiValue::Int(v, _) => write!(f, "{v}"),
            AbiValue::Address(a) => write!(f, "{}", to_checksum_address(a)),
            AbiValue::Bool(b) => write!(f, "{b}"),
            AbiValue::FixedBytes(word, n) => write!(f, "0x{}", hex::encode(&word[..*n])),
            AbiValue::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            AbiValue::String(s) => write!(f, "{s:?}"),
            AbiValue::Array(v) | AbiValue::FixedArray(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "[{}]", parts.join(", "))
            }
            AbiValue::Tuple(v) => {
                let parts: Vec<_> = v.iter().map(|x| x.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}
