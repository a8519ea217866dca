//! # ethercodec-tx
//!
//! Legacy Ethereum transactions: the RLP wire format, EIP-155 signing with
//! deterministic ECDSA, and sender recovery.
//!
//! ```no_run
//! use ethercodec_tx::{recover_sender, sign_transaction, PrivateKey, UnsignedTransaction};
//! use ethercodec_core::{Address, U256};
//!
//! let key = PrivateKey::from_bytes(&[0x32; 32])?;
//! let tx = UnsignedTransaction {
//!     to: Some(Address::repeat_byte(0x20)),
//!     value: U256::from(1_000_000_000_000_000_000u64),
//!     gas: 21_000,
//!     gas_price: U256::from(15_000_000_000u64),
//!     nonce: 0,
//!     data: vec![],
//!     chain_id: 1,
//! };
//! let signed = sign_transaction(&tx, &key)?;
//! assert_eq!(recover_sender(&signed)?, key.address());
//! println!("{}", signed.serialize_hex());
//! # Ok::<(), ethercodec_core::SignerError>(())
//! ```

pub mod key;
pub mod signer;
pub mod transaction;

pub use key::{address_from_private_key, compress_pubkey, uncompress_pubkey, PrivateKey};
pub use signer::{recover_address, recover_sender, sign_transaction, LowS, Signer, SECP256K1_N};
pub use transaction::{SignedTransaction, Transaction, UnsignedTransaction};
