//! RLP decoder.
//!
//! - Validates every length prefix before slicing
//! - Rejects non-canonical encodings (single byte with an explicit prefix,
//!   long form for short payloads, leading zeros in a length)
//! - Rejects truncated input and trailing bytes
//! - Bounds nesting depth

use ethercodec_core::{FormatError, RlpConfig};

use crate::item::RlpItem;

/// Default maximum list nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Decode exactly one item spanning all of `input`, with default limits.
pub fn decode(input: &[u8]) -> Result<RlpItem, FormatError> {
    RlpDecoder::default().decode(input)
}

/// A decoder with configurable limits.
#[derive(Debug, Clone, Copy)]
pub struct RlpDecoder {
    max_depth: usize,
}

impl Default for RlpDecoder {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RlpDecoder {
    pub fn new(config: &RlpConfig) -> Self {
        Self {
            max_depth: config.max_depth,
        }
    }

    /// Decode exactly one item spanning all of `input`.
    pub fn decode(&self, input: &[u8]) -> Result<RlpItem, FormatError> {
        if input.is_empty() {
            return Err(FormatError::EmptyInput);
        }
        let (item, rest) = self.decode_item(input, 0)?;
        if !rest.is_empty() {
            return Err(FormatError::TrailingBytes { count: rest.len() });
        }
        Ok(item)
    }

    fn decode_item<'a>(&self, input: &'a [u8], depth: usize) -> Result<(RlpItem, &'a [u8]), FormatError> {
        let header = Header::read(input)?;
        let end = header.offset + header.len;
        let payload = &input[header.offset..end];
        let rest = &input[end..];

        if !header.is_list {
            return Ok((RlpItem::Bytes(payload.to_vec()), rest));
        }

        if depth >= self.max_depth {
            return Err(FormatError::TooDeep {
                max: self.max_depth,
            });
        }
        let mut items = Vec::new();
        let mut remaining = payload;
        while !remaining.is_empty() {
            let (item, next) = self.decode_item(remaining, depth + 1)?;
            items.push(item);
            remaining = next;
        }
        Ok((RlpItem::List(items), rest))
    }
}

/// A validated prefix: payload starts at `offset` and spans `len` bytes,
/// both already checked against the input length.
struct Header {
    is_list: bool,
    offset: usize,
    len: usize,
}

impl Header {
    fn read(input: &[u8]) -> Result<Self, FormatError> {
        let tag = *input.first().ok_or(FormatError::Truncated {
            needed: 1,
            available: 0,
        })?;

        let header = match tag {
            0x00..=0x7f => Header {
                is_list: false,
                offset: 0,
                len: 1,
            },
            0x80..=0xb7 => {
                let len = usize::from(tag - 0x80);
                if len == 1 {
                    if let Some(&byte) = input.get(1) {
                        if byte < 0x80 {
                            return Err(FormatError::NonCanonicalSingleByte);
                        }
                    }
                }
                Header {
                    is_list: false,
                    offset: 1,
                    len,
                }
            }
            0xb8..=0xbf => {
                let len_of_len = usize::from(tag - 0xb7);
                Header {
                    is_list: false,
                    offset: 1 + len_of_len,
                    len: long_length(input, len_of_len)?,
                }
            }
            0xc0..=0xf7 => Header {
                is_list: true,
                offset: 1,
                len: usize::from(tag - 0xc0),
            },
            0xf8..=0xff => {
                let len_of_len = usize::from(tag - 0xf7);
                Header {
                    is_list: true,
                    offset: 1 + len_of_len,
                    len: long_length(input, len_of_len)?,
                }
            }
        };

        let needed = header
            .offset
            .checked_add(header.len)
            .ok_or(FormatError::LengthOverflow { bytes: header.len })?;
        if input.len() < needed {
            return Err(FormatError::Truncated {
                needed,
                available: input.len(),
            });
        }
        Ok(header)
    }
}

/// Read the big-endian length that follows a long-form tag.
fn long_length(input: &[u8], len_of_len: usize) -> Result<usize, FormatError> {
    let len_bytes = input.get(1..1 + len_of_len).ok_or(FormatError::Truncated {
        needed: 1 + len_of_len,
        available: input.len(),
    })?;
    if len_bytes[0] == 0 {
        return Err(FormatError::LeadingZeros { what: "length" });
    }
    if len_of_len > std::mem::size_of::<usize>() {
        return Err(FormatError::LengthOverflow { bytes: len_of_len });
    }
    let len = len_bytes
        .iter()
        .fold(0usize, |acc, b| (acc << 8) | usize::from(*b));
    if len <= 55 {
        return Err(FormatError::NonCanonicalLength { len });
    }
    Ok(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode;
    use hex_literal::hex;

    #[test]
    fn decodes_single_byte_and_strings() {
        assert_eq!(decode(&[0x42]).unwrap(), RlpItem::bytes(vec![0x42]));
        assert_eq!(decode(&[0x80]).unwrap(), RlpItem::empty());
        assert_eq!(
            decode(&hex!("83646f67")).unwrap(),
            RlpItem::bytes(b"dog".to_vec())
        );
    }

    #[test]
    fn decodes_nested_lists() {
        let item = decode(&hex!("c7c0c1c0c3c0c1c0")).unwrap();
        let list = item.as_list().unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list[1], RlpItem::list(vec![RlpItem::list(vec![])]));
    }

    #[test]
    fn rejects_explicit_prefix_on_small_byte() {
        assert_eq!(decode(&[0x81, 0x00]), Err(FormatError::NonCanonicalSingleByte));
        assert_eq!(decode(&[0x81, 0x7f]), Err(FormatError::NonCanonicalSingleByte));
        assert_eq!(decode(&[0x81, 0x80]).unwrap(), RlpItem::bytes(vec![0x80]));
    }

    #[test]
    fn rejects_long_form_for_short_payload() {
        let mut input = vec![0xb8, 0x02];
        input.extend_from_slice(b"ab");
        assert_eq!(decode(&input), Err(FormatError::NonCanonicalLength { len: 2 }));
    }

    #[test]
    fn rejects_leading_zero_length() {
        let mut input = vec![0xb9, 0x00, 0x40];
        input.extend_from_slice(&[0u8; 64]);
        assert_eq!(decode(&input), Err(FormatError::LeadingZeros { what: "length" }));
    }

    #[test]
    fn rejects_truncated_and_trailing() {
        assert_eq!(decode(&[]), Err(FormatError::EmptyInput));
        assert!(matches!(decode(&[0x83, b'd', b'o']), Err(FormatError::Truncated { .. })));
        assert!(matches!(decode(&[0xc2, 0x01]), Err(FormatError::Truncated { .. })));
        assert!(matches!(decode(&[0xb8]), Err(FormatError::Truncated { .. })));
        assert_eq!(decode(&[0x01, 0x02]), Err(FormatError::TrailingBytes { count: 1 }));
    }

    #[test]
    fn truncated_item_inside_list() {
        // list claims 3 bytes of payload: a string claiming 4 bytes
        assert!(matches!(
            decode(&[0xc3, 0x84, 0x01, 0x02]),
            Err(FormatError::Truncated { .. })
        ));
    }

    #[test]
    fn depth_limit() {
        let mut item = RlpItem::list(vec![]);
        for _ in 0..20 {
            item = RlpItem::list(vec![item]);
        }
        let encoded = encode(&item);
        assert!(matches!(decode(&encoded), Err(FormatError::TooDeep { max: 16 })));

        let permissive = RlpDecoder::new(&RlpConfig { max_depth: 32 });
        assert_eq!(permissive.decode(&encoded).unwrap(), item);
    }

    #[test]
    fn reencoding_is_identity() {
        for input in [&hex!("c88363617483646f67")[..], &hex!("8203e8")[..], &[0x00][..], &[0xc0][..]] {
            assert_eq!(encode(&decode(input).unwrap()), input);
        }
    }
}
