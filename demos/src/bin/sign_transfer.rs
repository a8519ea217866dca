//! # sign_transfer
//!
//! Builds a legacy ether transfer, signs it under EIP-155, serializes it to
//! raw bytes, parses those bytes back and recovers the sender.
//!
//! Run with:
//! ```sh
//! RUST_LOG=debug cargo run --bin sign_transfer
//! ```

use anyhow::{bail, Result};
use ethercodec_core::{to_checksum_address, Address, U256};
use ethercodec_observability::{init_tracing, LogConfig};
use ethercodec_tx::{recover_sender, PrivateKey, Signer, Transaction, UnsignedTransaction};
use tracing::info;

fn main() -> Result<()> {
    init_tracing(&LogConfig::default().with_component("ethercodec-tx", "debug"))?;

    // Throwaway key; never use a fixed key for real funds.
    let key = PrivateKey::from_bytes(&[0x32; 32])?;
    println!("ethercodec: EIP-155 sign / parse / recover");
    println!("═══════════════════════════════════════════════════════");
    println!("  signer:    {}", to_checksum_address(&key.address()));

    // ── 1. Build and sign ────────────────────────────────────────────────────
    let tx = UnsignedTransaction {
        to: Some(Address::repeat_byte(0x20)),
        value: U256::from(1_000_000_000_000_000_000u64),
        gas: 21_000,
        gas_price: U256::from(15_000_000_000u64),
        nonce: 0,
        data: vec![],
        chain_id: 1,
    };
    println!("  sighash:   {}", tx.signing_hash());

    let signer = Signer::default();
    let signed = signer.sign_transaction(&tx, &key)?;
    let raw = signed.serialize_hex();
    println!("\n─── Signed ──────────────────────────────────────────");
    println!("  v:         {}", signed.v);
    println!("  r:         {:#x}", signed.r);
    println!("  s:         {:#x}", signed.s);
    println!("  raw:       {raw}");
    println!("  tx hash:   {}", signed.hash());

    // ── 2. Parse the raw bytes and recover ───────────────────────────────────
    let parsed = Transaction::deserialize_hex(&raw)?;
    let Some(parsed) = parsed.as_signed() else {
        bail!("raw transaction parsed as unsigned");
    };
    let sender = recover_sender(parsed)?;
    println!("\n─── Recovered ───────────────────────────────────────");
    println!("  chain id:  {:?}", parsed.chain_id());
    println!("  sender:    {}", to_checksum_address(&sender));

    if sender != key.address() {
        bail!("recovered {sender} but signed with {}", key.address());
    }
    info!("round trip ok");
    Ok(())
}
