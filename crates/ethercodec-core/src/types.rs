//! The Solidity ABI type model and its type-string parser.
//!
//! Type strings such as `"uint256"`, `"(address,bytes)[]"` or `"bytes32[4]"`
//! parse into an [`AbiType`] tree with a small recursive-descent parser:
//!
//! ```text
//! type   := base suffix*
//! base   := "(" [type ("," type)*] ")" | elementary
//! suffix := "[" digits? "]"
//! ```
//!
//! Unknown or out-of-range elementary types fail with
//! [`AbiError::UnsupportedType`] so an interface is rejected when it is
//! loaded rather than when it is first used.

use std::fmt;
use std::str::FromStr;

use crate::error::AbiError;

/// Size of one ABI word.
pub const WORD: usize = 32;

/// An ABI type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AbiType {
    /// Unsigned integer, width in bits (8..=256, multiple of 8).
    Uint(usize),
    /// Two's-complement signed integer, width in bits.
    Int(usize),
    /// 20-byte account address.
    Address,
    Bool,
    /// `bytes1` .. `bytes32`. Length in bytes.
    FixedBytes(usize),
    /// Dynamic byte array.
    Bytes,
    /// Dynamic UTF-8 string.
    String,
    /// `T[]`
    Array(Box<AbiType>),
    /// `T[K]`
    FixedArray(Box<AbiType>, usize),
    /// `(T1,...,Tn)`
    Tuple(Vec<AbiType>),
}

impl AbiType {
    /// Parse a type string. Accepts the `uint`/`int` aliases for 256 bits.
    pub fn parse(s: &str) -> Result<Self, AbiError> {
        let mut parser = TypeParser::new(s);
        let ty = parser.parse_type()?;
        parser.finish()?;
        Ok(ty)
    }

    /// Apply array suffixes such as `"[]"` or `"[2][]"` to an already-built
    /// base type. Used for JSON `tuple[]` parameters whose base comes from
    /// `components`.
    pub fn with_suffixes(base: AbiType, suffixes: &str) -> Result<Self, AbiError> {
        let mut parser = TypeParser::new(suffixes);
        let ty = parser.parse_suffixes(base)?;
        parser.finish()?;
        Ok(ty)
    }

    /// Dynamic types are encoded by reference (offset in the head, payload in
    /// the tail).
    pub fn is_dynamic(&self) -> bool {
        match self {
            AbiType::Bytes | AbiType::String | AbiType::Array(_) => true,
            AbiType::FixedArray(elem, _) => elem.is_dynamic(),
            AbiType::Tuple(elems) => elems.iter().any(AbiType::is_dynamic),
            _ => false,
        }
    }

    /// Number of bytes this type occupies in the head of an enclosing
    /// sequence: one word for dynamic types, the full inline size for static
    /// ones.
    pub fn head_size(&self) -> usize {
        if self.is_dynamic() {
            return WORD;
        }
        match self {
            AbiType::FixedArray(elem, len) => elem.head_size().saturating_mul(*len),
            AbiType::Tuple(elems) => elems.iter().fold(0, |acc, e| acc.saturating_add(e.head_size())),
            _ => WORD,
        }
    }

    /// Indexed event parameters of these types are stored as the keccak256
    /// hash of their encoding rather than the value itself.
    pub fn is_hashed_in_topic(&self) -> bool {
        matches!(
            self,
            AbiType::Bytes
                | AbiType::String
                | AbiType::Array(_)
                | AbiType::FixedArray(..)
                | AbiType::Tuple(_)
        )
    }

    /// The canonical name used in signatures, e.g. `uint256` for `uint`.
    pub fn canonical_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for AbiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbiType::Uint(bits) => write!(f, "uint{bits}"),
            AbiType::Int(bits) => write!(f, "int{bits}"),
            AbiType::Address => write!(f, "address"),
            AbiType::Bool => write!(f, "bool"),
            AbiType::FixedBytes(n) => write!(f, "bytes{n}"),
            AbiType::Bytes => write!(f, "bytes"),
            AbiType::String => write!(f, "string"),
            AbiType::Array(elem) => write!(f, "{elem}[]"),
            AbiType::FixedArray(elem, len) => write!(f, "{elem}[{len}]"),
            AbiType::Tuple(elems) => {
                write!(f, "(")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{elem}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl FromStr for AbiType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AbiType::parse(s)
    }
}

struct TypeParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> TypeParser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn unsupported(&self) -> AbiError {
        AbiError::UnsupportedType {
            ty: self.src.to_string(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> Result<(), AbiError> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.unsupported())
        }
    }

    fn finish(&self) -> Result<(), AbiError> {
        if self.pos == self.src.len() {
            Ok(())
        } else {
            Err(self.unsupported())
        }
    }

    fn parse_type(&mut self) -> Result<AbiType, AbiError> {
        let base = if self.peek() == Some(b'(') {
            self.parse_tuple()?
        } else {
            self.parse_elementary()?
        };
        self.parse_suffixes(base)
    }

    fn parse_suffixes(&mut self, mut ty: AbiType) -> Result<AbiType, AbiError> {
        while self.peek() == Some(b'[') {
            self.pos += 1;
            let start = self.pos;
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.pos += 1;
            }
            let digits = &self.src[start..self.pos];
            self.expect(b']')?;
            ty = if digits.is_empty() {
                AbiType::Array(Box::new(ty))
            } else {
                let len = parse_width(digits).ok_or_else(|| self.unsupported())?;
                AbiType::FixedArray(Box::new(ty), len)
            };
        }
        Ok(ty)
    }

    fn parse_tuple(&mut self) -> Result<AbiType, AbiError> {
        self.expect(b'(')?;
        let mut elems = Vec::new();
        if self.peek() == Some(b')') {
            self.pos += 1;
            return Ok(AbiType::Tuple(elems));
        }
        loop {
            elems.push(self.parse_type()?);
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    return Ok(AbiType::Tuple(elems));
                }
                _ => return Err(self.unsupported()),
            }
        }
    }

    fn parse_elementary(&mut self) -> Result<AbiType, AbiError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric()) {
            self.pos += 1;
        }
        let name = &self.src[start..self.pos];

        let ty = match name {
            "address" => AbiType::Address,
            "bool" => AbiType::Bool,
            "string" => AbiType::String,
            "bytes" => AbiType::Bytes,
            "uint" => AbiType::Uint(256),
            "int" => AbiType::Int(256),
            _ => {
                if let Some(bits) = name.strip_prefix("uint") {
                    AbiType::Uint(int_width(bits).ok_or_else(|| self.unsupported())?)
                } else if let Some(bits) = name.strip_prefix("int") {
                    AbiType::Int(int_width(bits).ok_or_else(|| self.unsupported())?)
                } else if let Some(len) = name.strip_prefix("bytes") {
                    match parse_width(len) {
                        Some(n) if n <= 32 => AbiType::FixedBytes(n),
                        _ => return Err(self.unsupported()),
                    }
                } else {
                    return Err(self.unsupported());
                }
            }
        };
        Ok(ty)
    }
}

/// A positive decimal without leading zeros.
fn parse_width(digits: &str) -> Option<usize> {
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn int_width(digits: &str) -> Option<usize> {
    parse_width(digits).filter(|bits| *bits <= 256 && bits % 8 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_elementary_types() {
        assert_eq!(AbiType::parse("uint256").unwrap(), AbiType::Uint(256));
        assert_eq!(AbiType::parse("int8").unwrap(), AbiType::Int(8));
        assert_eq!(AbiType::parse("bytes32").unwrap(), AbiType::FixedBytes(32));
        assert_eq!(AbiType::parse("bytes").unwrap(), AbiType::Bytes);
        assert_eq!(AbiType::parse("address").unwrap(), AbiType::Address);
    }

    #[test]
    fn uint_alias_is_canonicalized() {
        let ty = AbiType::parse("uint").unwrap();
        assert_eq!(ty.canonical_name(), "uint256");
        assert_eq!(AbiType::parse("int[]").unwrap().to_string(), "int256[]");
    }

    #[test]
    fn parses_nested_arrays_and_tuples() {
        let ty = AbiType::parse("(address,string[])[2][]").unwrap();
        assert_eq!(
            ty,
            AbiType::Array(Box::new(AbiType::FixedArray(
                Box::new(AbiType::Tuple(vec![
                    AbiType::Address,
                    AbiType::Array(Box::new(AbiType::String)),
                ])),
                2
            )))
        );
        assert_eq!(ty.to_string(), "(address,string[])[2][]");
    }

    #[test]
    fn rejects_unsupported_types() {
        for bad in ["uint7", "uint264", "bytes33", "bytes0", "fixed128x18", "function", "uint256[0]", "(uint256", "uint256]", "uint08", ""] {
            assert!(
                matches!(AbiType::parse(bad), Err(AbiError::UnsupportedType { .. })),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn static_and_dynamic_classification() {
        assert!(!AbiType::parse("uint256[3]").unwrap().is_dynamic());
        assert!(AbiType::parse("string[3]").unwrap().is_dynamic());
        assert!(AbiType::parse("(uint256,bytes)").unwrap().is_dynamic());
        assert!(!AbiType::parse("(uint256,bool)").unwrap().is_dynamic());
        assert_eq!(AbiType::parse("(uint256,bool)[2]").unwrap().head_size(), 128);
        assert_eq!(AbiType::parse("bytes[2]").unwrap().head_size(), 32);
    }

    #[test]
    fn suffixes_on_prebuilt_base() {
        let base = AbiType::Tuple(vec![AbiType::Uint(8)]);
        let ty = AbiType::with_suffixes(base, "[]").unwrap();
        assert_eq!(ty.to_string(), "(uint8)[]");
    }
}
