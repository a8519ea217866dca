//! # encode_call
//!
//! Encodes an ERC-20 `transfer` call, decodes it back, then wraps the
//! calldata in a signed transaction and walks its RLP fields.
//!
//! Run with:
//! ```sh
//! cargo run --bin encode_call
//! ```

use anyhow::{ensure, Result};
use ethercodec_abi::{decode_call, encode_call, Abi};
use ethercodec_core::{hexstr, AbiValue, U256};
use ethercodec_observability::{init_tracing, LogConfig};
use ethercodec_tx::{sign_transaction, PrivateKey, UnsignedTransaction};

const ERC20_ABI: &str = r#"[
    {
        "name": "transfer",
        "type": "function",
        "inputs": [
            {"name": "to",     "type": "address"},
            {"name": "amount", "type": "uint256"}
        ],
        "outputs": [{"name": "", "type": "bool"}],
        "stateMutability": "nonpayable"
    },
    {
        "name": "approve",
        "type": "function",
        "inputs": [
            {"name": "spender", "type": "address"},
            {"name": "amount",  "type": "uint256"}
        ],
        "outputs": [{"name": "", "type": "bool"}],
        "stateMutability": "nonpayable"
    }
]"#;

const FIELDS: [&str; 9] = ["nonce", "gasPrice", "gas", "to", "value", "data", "v", "r", "s"];

fn main() -> Result<()> {
    init_tracing(&LogConfig::default())?;
    let abi = Abi::from_json(ERC20_ABI)?;

    println!("ethercodec: ABI encode + decode round trip");
    println!("═══════════════════════════════════════════════════════");

    // ── 1. Encode a transfer() call ───────────────────────────────────────────
    let recipient = hexstr::parse_address("0xd8da6bf26964af9d7eed9e03e53415d37aa96045")?;
    let amount = AbiValue::uint256(1_000_000u64); // 1 USDC (6 decimals)
    let calldata = encode_call("transfer", &[recipient.into(), amount.clone()], &abi)?;

    println!("\n─── Encoded transfer() ──────────────────────────────");
    println!("  calldata:  {}", hexstr::encode(&calldata));
    println!("  length:    {} bytes  (4 selector + 32 address + 32 uint)", calldata.len());
    println!("  selector:  0x{}", hex::encode(&calldata[..4]));

    // ── 2. Decode it back ─────────────────────────────────────────────────────
    let decoded = decode_call(&calldata, &abi)?;
    println!("\n─── Decoded back ────────────────────────────────────");
    println!("  function:  {}", decoded.function_name);
    for (name, value) in &decoded.inputs {
        println!("    {:10} = {}", name, value);
    }
    ensure!(decoded.input("amount") == Some(&amount), "amount did not survive the round trip");
    println!("  json:      {}", serde_json::to_string(&decoded)?);

    // ── 3. Put it in a transaction ────────────────────────────────────────────
    let token = hexstr::parse_address("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48")?;
    let tx = UnsignedTransaction {
        to: Some(token),
        value: U256::ZERO,
        gas: 60_000,
        gas_price: U256::from(20_000_000_000u64),
        nonce: 7,
        data: calldata,
        chain_id: 1,
    };
    let signed = sign_transaction(&tx, &PrivateKey::from_bytes(&[0x46; 32])?)?;
    let raw = signed.serialize();

    println!("\n─── Raw transaction fields ──────────────────────────");
    let item = ethercodec_rlp::decode(&raw)?;
    for (name, field) in FIELDS.iter().zip(item.as_list()?) {
        println!("  {:9} {}", name, hexstr::encode(field.as_bytes()?));
    }
    Ok(())
}
