//! # ethercodec-rlp
//!
//! RLP (Recursive Length Prefix), the canonical byte encoding for nested
//! byte strings and lists used by the Ethereum transaction format.
//!
//! ## Encoding rules
//! - Single byte `[0x00, 0x7f]`: itself
//! - String of 0..=55 bytes: `0x80 + len`, then data
//! - Longer string: `0xb7 + len_of_len`, big-endian len, then data
//! - List: same scheme over the concatenated item encodings with
//!   `0xc0` / `0xf7`
//!
//! Integers are minimal big-endian byte strings; zero is the empty string.
//! The decoder accepts only the canonical form of every item.

pub mod decode;
pub mod encode;
pub mod item;
pub mod uint;

pub use decode::{decode, RlpDecoder, DEFAULT_MAX_DEPTH};
pub use encode::{encode, encode_into};
pub use item::RlpItem;
