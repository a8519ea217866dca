//! ABI decoder: the inverse of [`encoder`](crate::encoder).
//!
//! Every offset and length word is checked against the remaining input
//! before it is followed, and length words above
//! [`AbiConfig::max_array_len`] are refused before anything is allocated.
//! A single decode produces at most [`AbiConfig::max_total_values`] values,
//! which bounds the work when several offsets point at the same payload.
//! Static words must be in canonical form for their type, with one
//! exception: an `address` word takes its low 20 bytes and ignores the rest.

use alloy_primitives::{Address, B256, I256, U256};
use ethercodec_core::{
    types::WORD,
    value::{int_fits, uint_fits},
    AbiConfig, AbiError, AbiType, AbiValue,
};

/// Decode the parameter tuple `types` from `data` with default limits.
pub fn decode_params(types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
    AbiDecoder::default().decode_params(types, data)
}

/// Decode one 32-byte word as the static type `ty`.
pub fn decode_word(ty: &AbiType, word: &B256) -> Result<AbiValue, AbiError> {
    match ty {
        AbiType::Uint(bits) => {
            let v = U256::from_be_bytes(word.0);
            if !uint_fits(&v, *bits) {
                return Err(invalid(format!("value does not fit uint{bits}")));
            }
            Ok(AbiValue::Uint(v, *bits))
        }
        AbiType::Int(bits) => {
            let v = I256::from_raw(U256::from_be_bytes(word.0));
            if !int_fits(&v, *bits) {
                return Err(invalid(format!("value is not a sign-extended int{bits}")));
            }
            Ok(AbiValue::Int(v, *bits))
        }
        AbiType::Address => Ok(AbiValue::Address(Address::from_slice(&word[12..]))),
        AbiType::Bool => match U256::from_be_bytes(word.0) {
            v if v.is_zero() => Ok(AbiValue::Bool(false)),
            v if v == U256::from(1u8) => Ok(AbiValue::Bool(true)),
            _ => Err(invalid("bool word must be 0 or 1".into())),
        },
        AbiType::FixedBytes(n) => {
            let mut bytes = [0u8; WORD];
            bytes[..*n].copy_from_slice(&word[..*n]);
            Ok(AbiValue::FixedBytes(B256::from(bytes), *n))
        }
        other => Err(AbiError::UnsupportedType {
            ty: format!("{other} is not a single-word type"),
        }),
    }
}

/// A decoder with configurable limits.
#[derive(Debug, Clone, Copy)]
pub struct AbiDecoder {
    max_array_len: usize,
    max_total_values: usize,
}

impl Default for AbiDecoder {
    fn default() -> Self {
        Self::new(&AbiConfig::default())
    }
}

impl AbiDecoder {
    pub fn new(config: &AbiConfig) -> Self {
        Self {
            max_array_len: config.max_array_len,
            max_total_values: config.max_total_values,
        }
    }

    /// Decode the parameter tuple `types` from `data`.
    pub fn decode_params(&self, types: &[AbiType], data: &[u8]) -> Result<Vec<AbiValue>, AbiError> {
        let input = Input { data, base: 0 };
        let mut budget = self.max_total_values;
        self.decode_sequence(types.iter(), input, &mut budget)
    }

    fn decode_sequence<'t>(
        &self,
        types: impl Iterator<Item = &'t AbiType>,
        input: Input<'_>,
        budget: &mut usize,
    ) -> Result<Vec<AbiValue>, AbiError> {
        let mut values = Vec::new();
        let mut pos = 0;
        for ty in types {
            self.spend(budget, 1)?;
            let value = if ty.is_dynamic() {
                let offset = input.read_usize(pos, "offset")?;
                if offset >= input.data.len() {
                    return Err(invalid(format!(
                        "offset {} points outside {} bytes of data",
                        input.base + offset,
                        input.base + input.data.len()
                    )));
                }
                self.decode_value(ty, input.at(offset), budget)?
            } else {
                self.decode_value(ty, input.at(pos), budget)?
            };
            values.push(value);
            pos += ty.head_size();
        }
        Ok(values)
    }

    fn decode_value(&self, ty: &AbiType, input: Input<'_>, budget: &mut usize) -> Result<AbiValue, AbiError> {
        match ty {
            AbiType::Bytes => Ok(AbiValue::Bytes(self.read_packed_bytes(input)?.to_vec())),
            AbiType::String => {
                let bytes = self.read_packed_bytes(input)?;
                let s = std::str::from_utf8(bytes)
                    .map_err(|e| invalid(format!("string is not UTF-8: {e}")))?;
                Ok(AbiValue::String(s.to_string()))
            }
            AbiType::Array(elem) => {
                let len = self.read_length(&input)?;
                let body = input.at(WORD);
                body.require(0, len.saturating_mul(elem.head_size()))?;
                self.check_budget(budget, len)?;
                let values = self.decode_sequence(std::iter::repeat(elem.as_ref()).take(len), body, budget)?;
                Ok(AbiValue::Array(values))
            }
            AbiType::FixedArray(elem, len) => {
                self.check_budget(budget, *len)?;
                let values =
                    self.decode_sequence(std::iter::repeat(elem.as_ref()).take(*len), input, budget)?;
                Ok(AbiValue::FixedArray(values))
            }
            AbiType::Tuple(types) => Ok(AbiValue::Tuple(self.decode_sequence(types.iter(), input, budget)?)),
            _ => decode_word(ty, &input.word(0)?),
        }
    }

    fn check_budget(&self, budget: &usize, wanted: usize) -> Result<(), AbiError> {
        if wanted > *budget {
            return Err(invalid(format!(
                "input expands to more than {} values",
                self.max_total_values
            )));
        }
        Ok(())
    }

    fn spend(&self, budget: &mut usize, n: usize) -> Result<(), AbiError> {
        self.check_budget(budget, n)?;
        *budget -= n;
        Ok(())
    }

    fn read_length(&self, input: &Input<'_>) -> Result<usize, AbiError> {
        let len = input.read_usize(0, "length")?;
        if len > self.max_array_len {
            return Err(invalid(format!(
                "length {len} exceeds the limit of {}",
                self.max_array_len
            )));
        }
        Ok(len)
    }

    fn read_packed_bytes<'a>(&self, input: Input<'a>) -> Result<&'a [u8], AbiError> {
        let len = self.read_length(&input)?;
        input.require(WORD, len)?;
        Ok(&input.data[WORD..WORD + len])
    }
}

/// A view into the input; `base` is the absolute position of `data[0]`,
/// used only for error reporting.
#[derive(Clone, Copy)]
struct Input<'a> {
    data: &'a [u8],
    base: usize,
}

impl<'a> Input<'a> {
    fn at(&self, offset: usize) -> Input<'a> {
        let start = offset.min(self.data.len());
        Input {
            data: &self.data[start..],
            base: self.base + start,
        }
    }

    fn require(&self, offset: usize, needed: usize) -> Result<(), AbiError> {
        let available = self.data.len().saturating_sub(offset);
        if needed > available {
            return Err(AbiError::TruncatedData {
                offset: self.base + offset,
                needed,
                available,
            });
        }
        Ok(())
    }

    fn word(&self, offset: usize) -> Result<B256, AbiError> {
        self.require(offset, WORD)?;
        Ok(B256::from_slice(&self.data[offset..offset + WORD]))
    }

    fn read_usize(&self, offset: usize, what: &str) -> Result<usize, AbiError> {
        let v = U256::from_be_bytes(self.word(offset)?.0);
        if v.bit_len() > 64 {
            return Err(invalid(format!("{what} {v} is too large")));
        }
        usize::try_from(v.as_limbs()[0]).map_err(|_| invalid(format!("{what} {v} is too large")))
    }
}

fn invalid(reason: String) -> AbiError {
    AbiError::InvalidEncoding { reason }
}
