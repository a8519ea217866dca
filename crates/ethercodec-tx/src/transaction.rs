//! Legacy (type 0) transactions and their RLP wire forms.
//!
//! ```text
//! signing preimage: rlp([nonce, gasPrice, gas, to, value, data, chainId, 0, 0])
//! signed:           rlp([nonce, gasPrice, gas, to, value, data, v, r, s])
//! ```
//!
//! An unsigned transaction serializes to its signing preimage, so the chain
//! id survives a serialize/deserialize round trip. On the way back in, a
//! nine-field list with `r = s = 0` is read as unsigned.

use alloy_primitives::{Address, B256, U256};
use ethercodec_core::{hexstr, keccak256, FormatError};
use ethercodec_rlp::{decode, encode, RlpItem};
use serde::{Deserialize, Serialize};

const FIELD_COUNT: usize = 9;

/// A transaction that has not been signed yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnsignedTransaction {
    /// Recipient; `None` creates a contract.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    pub value: U256,
    pub gas: u64,
    pub gas_price: U256,
    pub nonce: u64,
    #[serde(default, with = "hex_data")]
    pub data: Vec<u8>,
    pub chain_id: u64,
}

/// A signed legacy transaction. The chain id is carried inside `v`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    pub value: U256,
    pub gas: u64,
    pub gas_price: U256,
    pub nonce: u64,
    #[serde(default, with = "hex_data")]
    pub data: Vec<u8>,
    pub v: u64,
    pub r: U256,
    pub s: U256,
}

/// The result of deserializing raw transaction bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Transaction {
    Signed(SignedTransaction),
    Unsigned(UnsignedTransaction),
}

impl UnsignedTransaction {
    /// The bytes whose keccak256 hash is signed.
    pub fn signing_preimage(&self) -> Vec<u8> {
        let mut fields = base_fields(
            self.nonce,
            &self.gas_price,
            self.gas,
            self.to.as_ref(),
            &self.value,
            &self.data,
        );
        fields.push(RlpItem::uint(self.chain_id));
        fields.push(RlpItem::empty());
        fields.push(RlpItem::empty());
        encode(&RlpItem::list(fields))
    }

    /// keccak256 of the signing preimage.
    pub fn signing_hash(&self) -> B256 {
        keccak256(self.signing_preimage())
    }

    pub fn serialize(&self) -> Vec<u8> {
        self.signing_preimage()
    }

    pub fn serialize_hex(&self) -> String {
        hexstr::encode(self.serialize())
    }
}

impl SignedTransaction {
    /// The broadcastable encoding.
    pub fn serialize(&self) -> Vec<u8> {
        let mut fields = base_fields(
            self.nonce,
            &self.gas_price,
            self.gas,
            self.to.as_ref(),
            &self.value,
            &self.data,
        );
        fields.push(RlpItem::uint(self.v));
        fields.push(RlpItem::u256(self.r));
        fields.push(RlpItem::u256(self.s));
        encode(&RlpItem::list(fields))
    }

    pub fn serialize_hex(&self) -> String {
        hexstr::encode(self.serialize())
    }

    /// The transaction hash: keccak256 of the serialized transaction.
    pub fn hash(&self) -> B256 {
        keccak256(self.serialize())
    }

    /// Chain id encoded in an EIP-155 `v`; `None` for pre-EIP-155 values.
    pub fn chain_id(&self) -> Option<u64> {
        self.v.checked_sub(35).map(|x| x / 2)
    }

    /// The transaction as it was before signing, for the given chain.
    pub fn to_unsigned(&self, chain_id: u64) -> UnsignedTransaction {
        UnsignedTransaction {
            to: self.to,
            value: self.value,
            gas: self.gas,
            gas_price: self.gas_price,
            nonce: self.nonce,
            data: self.data.clone(),
            chain_id,
        }
    }

    /// The six-field preimage signed before EIP-155 (`v` of 27 or 28).
    pub fn legacy_preimage(&self) -> Vec<u8> {
        encode(&RlpItem::list(base_fields(
            self.nonce,
            &self.gas_price,
            self.gas,
            self.to.as_ref(),
            &self.value,
            &self.data,
        )))
    }
}

impl Transaction {
    /// Parse raw transaction bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, FormatError> {
        let item = decode(bytes)?;
        let fields = item.as_list()?;
        if fields.len() != FIELD_COUNT {
            return Err(FormatError::InvalidField {
                field: "transaction",
                reason: format!("expected {FIELD_COUNT} fields, got {}", fields.len()),
            });
        }

        let nonce = fields[0].as_u64("nonce")?;
        let gas_price = fields[1].as_u256("gasPrice")?;
        let gas = fields[2].as_u64("gas")?;
        let to = fields[3].as_address("to")?;
        let value = fields[4].as_u256("value")?;
        let data = fields[5].as_bytes()?.to_vec();
        let v = fields[6].as_u64("v")?;
        let r = fields[7].as_u256("r")?;
        let s = fields[8].as_u256("s")?;

        if r.is_zero() && s.is_zero() {
            return Ok(Transaction::Unsigned(UnsignedTransaction {
                to,
                value,
                gas,
                gas_price,
                nonce,
                data,
                chain_id: v,
            }));
        }
        Ok(Transaction::Signed(SignedTransaction {
            to,
            value,
            gas,
            gas_price,
            nonce,
            data,
            v,
            r,
            s,
        }))
    }

    /// Parse a hex string, with or without `0x`.
    pub fn deserialize_hex(s: &str) -> Result<Self, FormatError> {
        Self::deserialize(&hexstr::decode(s)?)
    }

    pub fn serialize(&self) -> Vec<u8> {
        match self {
            Transaction::Signed(tx) => tx.serialize(),
            Transaction::Unsigned(tx) => tx.serialize(),
        }
    }

    pub fn serialize_hex(&self) -> String {
        hexstr::encode(self.serialize())
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, Transaction::Signed(_))
    }

    pub fn as_signed(&self) -> Option<&SignedTransaction> {
        match self {
            Transaction::Signed(tx) => Some(tx),
            Transaction::Unsigned(_) => None,
        }
    }

    pub fn as_unsigned(&self) -> Option<&UnsignedTransaction> {
        match self {
            Transaction::Unsigned(tx) => Some(tx),
            Transaction::Signed(_) => None,
        }
    }
}

impl From<UnsignedTransaction> for Transaction {
    fn from(tx: UnsignedTransaction) -> Self {
        Transaction::Unsigned(tx)
    }
}

impl From<SignedTransaction> for Transaction {
    fn from(tx: SignedTransaction) -> Self {
        Transaction::Signed(tx)
    }
}

fn base_fields(
    nonce: u64,
    gas_price: &U256,
    gas: u64,
    to: Option<&Address>,
    value: &U256,
    data: &[u8],
) -> Vec<RlpItem> {
    vec![
        RlpItem::uint(nonce),
        RlpItem::u256(*gas_price),
        RlpItem::uint(gas),
        RlpItem::address(to),
        RlpItem::u256(*value),
        RlpItem::bytes(data),
    ]
}

/// `0x`-hex (de)serialization for the `data` field.
mod hex_data {
    use ethercodec_core::hexstr;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&hexstr::encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        hexstr::decode(&s).map_err(serde::de::Error::custom)
    }
}
