//! The RLP item tree.

use alloy_primitives::{Address, U256};
use ethercodec_core::FormatError;

use crate::uint;

/// A decoded (or to-be-encoded) RLP item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    /// A byte string (may be empty).
    Bytes(Vec<u8>),
    /// A list of items.
    List(Vec<RlpItem>),
}

impl RlpItem {
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        RlpItem::Bytes(data.into())
    }

    pub fn list(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }

    /// The empty byte string (`0x80`), also the encoding of integer zero.
    pub fn empty() -> Self {
        RlpItem::Bytes(Vec::new())
    }

    /// An integer as its minimal big-endian byte string.
    pub fn uint(v: u64) -> Self {
        RlpItem::Bytes(uint::to_minimal_be_u64(v))
    }

    pub fn u256(v: U256) -> Self {
        RlpItem::Bytes(uint::to_minimal_be(v))
    }

    /// A 20-byte address, or the empty string for contract creation.
    pub fn address(addr: Option<&Address>) -> Self {
        match addr {
            Some(a) => RlpItem::Bytes(a.to_vec()),
            None => RlpItem::empty(),
        }
    }

    #[inline]
    pub fn is_list(&self) -> bool {
        matches!(self, RlpItem::List(_))
    }

    pub fn as_bytes(&self) -> Result<&[u8], FormatError> {
        match self {
            RlpItem::Bytes(b) => Ok(b),
            RlpItem::List(_) => Err(FormatError::ExpectedBytes),
        }
    }

    pub fn as_list(&self) -> Result<&[RlpItem], FormatError> {
        match self {
            RlpItem::List(items) => Ok(items),
            RlpItem::Bytes(_) => Err(FormatError::ExpectedList),
        }
    }

    /// Canonical integer of at most 8 bytes.
    pub fn as_u64(&self, field: &'static str) -> Result<u64, FormatError> {
        uint::from_be_u64(self.as_bytes()?, field)
    }

    /// Canonical integer of at most 32 bytes.
    pub fn as_u256(&self, field: &'static str) -> Result<U256, FormatError> {
        uint::from_be(self.as_bytes()?, field)
    }

    /// A 20-byte address, or `None` for the empty string.
    pub fn as_address(&self, field: &'static str) -> Result<Option<Address>, FormatError> {
        let bytes = self.as_bytes()?;
        match bytes.len() {
            0 => Ok(None),
            20 => Ok(Some(Address::from_slice(bytes))),
            n => Err(FormatError::InvalidField {
                field,
                reason: format!("address must be 0 or 20 bytes, got {n}"),
            }),
        }
    }
}

impl From<Vec<u8>> for RlpItem {
    fn from(b: Vec<u8>) -> Self {
        RlpItem::Bytes(b)
    }
}

impl From<&[u8]> for RlpItem {
    fn from(b: &[u8]) -> Self {
        RlpItem::Bytes(b.to_vec())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_accessors() {
        assert_eq!(RlpItem::uint(1024).as_u64("n").unwrap(), 1024);
        assert_eq!(RlpItem::empty().as_u64("n").unwrap(), 0);
        assert!(RlpItem::bytes(vec![0, 1]).as_u64("n").is_err());
        assert_eq!(
            RlpItem::list(vec![]).as_u256("n"),
            Err(FormatError::ExpectedBytes)
        );
    }

    #[test]
    fn address_accessor() {
        assert_eq!(RlpItem::empty().as_address("to").unwrap(), None);
        let a = Address::repeat_byte(0x20);
        assert_eq!(RlpItem::address(Some(&a)).as_address("to").unwrap(), Some(a));
        assert!(RlpItem::bytes(vec![1u8; 19]).as_address("to").is_err());
    }
}
