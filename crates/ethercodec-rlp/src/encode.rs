//! RLP encoder.

use crate::item::RlpItem;
use crate::uint::to_minimal_be_u64;

const BYTES_OFFSET: u8 = 0x80;
const LIST_OFFSET: u8 = 0xc0;
/// Largest payload that fits the single-byte short-form prefix.
const SHORT_MAX: usize = 55;

/// Encode an item tree.
pub fn encode(item: &RlpItem) -> Vec<u8> {
    let mut out = Vec::new();
    encode_into(item, &mut out);
    out
}

/// Append the encoding of `item` to `out`.
pub fn encode_into(item: &RlpItem, out: &mut Vec<u8>) {
    match item {
        RlpItem::Bytes(data) => {
            if data.len() == 1 && data[0] < BYTES_OFFSET {
                out.push(data[0]);
            } else {
                encode_length(data.len(), BYTES_OFFSET, out);
                out.extend_from_slice(data);
            }
        }
        RlpItem::List(items) => {
            let mut payload = Vec::new();
            for item in items {
                encode_into(item, &mut payload);
            }
            encode_length(payload.len(), LIST_OFFSET, out);
            out.extend_from_slice(&payload);
        }
    }
}

fn encode_length(len: usize, offset: u8, out: &mut Vec<u8>) {
    if len <= SHORT_MAX {
        out.push(offset + len as u8);
    } else {
        let len_bytes = to_minimal_be_u64(len as u64);
        out.push(offset + SHORT_MAX as u8 + len_bytes.len() as u8);
        out.extend_from_slice(&len_bytes);
    }
}
