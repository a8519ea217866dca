//! ABI encoder: typed values into head/tail encoded bytes.
//!
//! A sequence (call arguments, tuple fields, array elements) is laid out as
//! a head of fixed-size slots followed by a tail. Static values sit in the
//! head inline. A dynamic value gets a one-word offset slot in the head and
//! its payload in the tail; the slot is written as a placeholder and patched
//! once the payload's position is known. Offsets count from the start of the
//! enclosing head.

use alloy_primitives::U256;
use ethercodec_core::{
    types::WORD,
    value::{int_fits, uint_fits},
    AbiError, AbiType, AbiValue,
};

/// Encode `values` as the parameter tuple `types` (no selector).
pub fn encode_params(types: &[AbiType], values: &[AbiValue]) -> Result<Vec<u8>, AbiError> {
    if types.len() != values.len() {
        return Err(AbiError::TypeMismatch {
            expected: format!("{} values", types.len()),
            got: format!("{} values", values.len()),
        });
    }
    encode_sequence(types.iter().zip(values).collect())
}

/// Encode a single value of type `ty`, as it would appear in a tail.
pub fn encode_value(ty: &AbiType, value: &AbiValue) -> Result<Vec<u8>, AbiError> {
    let mut out = Vec::new();
    encode_into(ty, value, &mut out)?;
    Ok(out)
}

fn encode_sequence(items: Vec<(&AbiType, &AbiValue)>) -> Result<Vec<u8>, AbiError> {
    // declared sizes are unbounded until each value has been matched
    let head_len = items
        .iter()
        .fold(0usize, |acc, (ty, _)| acc.saturating_add(ty.head_size()));
    let mut out = Vec::with_capacity(head_len.min(items.len().saturating_mul(WORD)));
    let mut deferred = Vec::new();

    for (ty, value) in items {
        if ty.is_dynamic() {
            deferred.push((out.len(), ty, value));
            out.extend_from_slice(&[0u8; WORD]);
        } else {
            encode_into(ty, value, &mut out)?;
        }
    }

    for (slot, ty, value) in deferred {
        let offset = usize_word(out.len());
        out[slot..slot + WORD].copy_from_slice(&offset);
        encode_into(ty, value, &mut out)?;
    }
    Ok(out)
}

fn encode_into(ty: &AbiType, value: &AbiValue, out: &mut Vec<u8>) -> Result<(), AbiError> {
    match (ty, value) {
        (AbiType::Uint(bits), AbiValue::Uint(v, _)) if uint_fits(v, *bits) => {
            out.extend_from_slice(&v.to_be_bytes::<32>());
        }
        (AbiType::Int(bits), AbiValue::Int(v, _)) if int_fits(v, *bits) => {
            // two's complement over the full word is the sign extension
            out.extend_from_slice(&v.into_raw().to_be_bytes::<32>());
        }
        (AbiType::Address, AbiValue::Address(a)) => {
            out.extend_from_slice(&[0u8; 12]);
            out.extend_from_slice(a.as_slice());
        }
        (AbiType::Bool, AbiValue::Bool(b)) => {
            let mut word = [0u8; WORD];
            word[WORD - 1] = u8::from(*b);
            out.extend_from_slice(&word);
        }
        (AbiType::FixedBytes(n), AbiValue::FixedBytes(bytes, m)) if n == m => {
            let mut word = [0u8; WORD];
            word[..*n].copy_from_slice(&bytes[..*n]);
            out.extend_from_slice(&word);
        }
        (AbiType::Bytes, AbiValue::Bytes(bytes)) => encode_packed_bytes(bytes, out),
        (AbiType::String, AbiValue::String(s)) => encode_packed_bytes(s.as_bytes(), out),
        (AbiType::Array(elem), AbiValue::Array(values)) => {
            out.extend_from_slice(&usize_word(values.len()));
            let items = values.iter().map(|v| (elem.as_ref(), v)).collect();
            out.extend(encode_sequence(items)?);
        }
        (AbiType::FixedArray(elem, len), AbiValue::FixedArray(values)) if values.len() == *len => {
            let items = values.iter().map(|v| (elem.as_ref(), v)).collect();
            out.extend(encode_sequence(items)?);
        }
        (AbiType::Tuple(types), AbiValue::Tuple(values)) if types.len() == values.len() => {
            out.extend(encode_sequence(types.iter().zip(values).collect())?);
        }
        _ => {
            return Err(AbiError::TypeMismatch {
                expected: ty.to_string(),
                got: value.kind(),
            })
        }
    }
    Ok(())
}

/// Length word, then the bytes right-padded to a word boundary.
fn encode_packed_bytes(bytes: &[u8], out: &mut Vec<u8>) {
    out.extend_from_slice(&usize_word(bytes.len()));
    out.extend_from_slice(bytes);
    let rem = bytes.len() % WORD;
    if rem != 0 {
        out.resize(out.len() + WORD - rem, 0);
    }
}

fn usize_word(n: usize) -> [u8; WORD] {
    U256::from(n).to_be_bytes::<32>()
}
