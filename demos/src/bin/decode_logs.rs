//! # decode_logs
//!
//! Decodes a batch of WETH logs in parallel, collecting the failures
//! instead of aborting, and prints each decoded log as JSON.
//!
//! An optional argument names a codec config file (`.yaml`, `.yml` or
//! `.json`) whose `abi` limits the decoder uses.
//!
//! Run with:
//! ```sh
//! cargo run --bin decode_logs [-- config.yaml]
//! ```

use anyhow::{Context, Result};
use ethercodec_abi::{Abi, ErrorMode, EventDecoder};
use ethercodec_core::{CodecConfig, RawLog};
use ethercodec_observability::{init_tracing, LogConfig};
use tracing::info;

const WETH_EVENTS: &str = r#"[
    {"type": "event", "name": "Transfer", "anonymous": false, "inputs": [
        {"name": "src", "type": "address", "indexed": true},
        {"name": "dst", "type": "address", "indexed": true},
        {"name": "wad", "type": "uint256", "indexed": false}
    ]},
    {"type": "event", "name": "Deposit", "anonymous": false, "inputs": [
        {"name": "dst", "type": "address", "indexed": true},
        {"name": "wad", "type": "uint256", "indexed": false}
    ]},
    {"type": "event", "name": "Withdrawal", "anonymous": false, "inputs": [
        {"name": "src", "type": "address", "indexed": true},
        {"name": "wad", "type": "uint256", "indexed": false}
    ]}
]"#;

/// Four logs as returned by `eth_getLogs`; the third is a Uniswap V2
/// `Swap` that the WETH interface does not know.
const LOGS: &str = r#"[
    {
        "address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
        "topics": [
            "0xe1fffcc4923d04b559f4d29a8bfc6cda04eb5b0d3c460751c2402c5c5cc9109c",
            "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045"
        ],
        "data": "0x0000000000000000000000000000000000000000000000000de0b6b3a7640000",
        "blockNumber": "0x112a880",
        "logIndex": "0x3"
    },
    {
        "address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
        "topics": [
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef",
            "0x000000000000000000000000d8da6bf26964af9d7eed9e03e53415d37aa96045",
            "0x000000000000000000000000ab5801a7d398351b8be11c439e05c5b3259aec9b"
        ],
        "data": "0x0000000000000000000000000000000000000000000000000000000003938700",
        "blockNumber": "0x112a880",
        "logIndex": "0x4"
    },
    {
        "address": "0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc",
        "topics": [
            "0xd78ad95fa46c994b6551d0da85fc275fe613ce37657fb8d5e3d130840159d822",
            "0x0000000000000000000000007a250d5630b4cf539739df2c5dacb4c659f2488d",
            "0x0000000000000000000000007a250d5630b4cf539739df2c5dacb4c659f2488d"
        ],
        "data": "0x",
        "blockNumber": "0x112a880",
        "logIndex": "0x5"
    },
    {
        "address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
        "topics": [
            "0x7fcf532c15f0a6db0bd6d0e038bea71d30d808c7d98cb3bf7268a95bf5081b65",
            "0x0000000000000000000000007a250d5630b4cf539739df2c5dacb4c659f2488d"
        ],
        "data": "0x000000000000000000000000000000000000000000000000002386f26fc10000",
        "blockNumber": "0x112a881",
        "logIndex": "0x0"
    }
]"#;

fn main() -> Result<()> {
    init_tracing(&LogConfig::default().with_component("ethercodec-abi", "debug"))?;

    let config = match std::env::args().nth(1) {
        Some(path) => CodecConfig::from_file(std::path::Path::new(&path))
            .with_context(|| format!("loading config {path}"))?,
        None => CodecConfig::default(),
    };
    info!(max_array_len = config.abi.max_array_len, "decoder limits");

    let decoder = EventDecoder::with_config(Abi::from_json(WETH_EVENTS)?, &config.abi);
    let logs: Vec<RawLog> = serde_json::from_str(LOGS)?;

    let result = decoder.decode_logs(&logs, ErrorMode::Collect)?;

    println!("ethercodec: batch log decode");
    println!("═══════════════════════════════════════════════════════");
    println!("  input:     {} logs", logs.len());
    println!("  decoded:   {}", result.events.len());
    println!("  failed:    {}", result.errors.len());

    println!("\n─── Decoded ─────────────────────────────────────────");
    for parsed in &result.events {
        println!("{}", serde_json::to_string_pretty(parsed)?);
    }

    println!("\n─── Errors ──────────────────────────────────────────");
    for (index, err) in &result.errors {
        println!("  [{index}] {err}");
    }
    Ok(())
}
