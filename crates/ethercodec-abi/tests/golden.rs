//! Golden fixture integration tests.
//!
//! Each test loads the WETH9 interface from `fixtures/abi/weth.json` and
//! checks real-shaped logs and calldata against the values recorded in the
//! fixture files.

use alloy_primitives::U256;
use ethercodec_abi::{decode_call, encode_call, Abi, ErrorMode, EventDecoder};
use ethercodec_core::{hexstr, AbiType, AbiValue, RawLog};
use serde_json::Value;

// ─── Helpers ──────────────────────────────────────────────────────────────────

/// The fixtures live two levels above the crate root.
fn fixture_path(name: &str) -> std::path::PathBuf {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../fixtures/abi");
    p.push(name);
    p
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).unwrap_or_else(|e| panic!("fixture {name}: {e}"))
}

fn weth() -> Abi {
    read_fixture("weth.json").parse().expect("invalid WETH ABI")
}

fn cases(name: &str) -> Vec<Value> {
    serde_json::from_str(&read_fixture(name)).expect("invalid fixture JSON")
}

/// Fixture arguments are strings: checksummed addresses or decimal integers.
fn arg_value(ty: &AbiType, s: &str) -> AbiValue {
    match ty {
        AbiType::Address => hexstr::parse_address(s).unwrap().into(),
        AbiType::Uint(bits) => AbiValue::Uint(U256::from_str_radix(s, 10).unwrap(), *bits),
        other => panic!("fixture uses unsupported type {other}"),
    }
}

// ─── Events ───────────────────────────────────────────────────────────────────

#[test]
fn weth_logs_golden() {
    let decoder = EventDecoder::new(weth());
    for case in cases("logs.json") {
        let name = case["name"].as_str().unwrap();
        let log: RawLog = serde_json::from_value(case["log"].clone()).unwrap();

        let parsed = decoder
            .parse_log(&log)
            .unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(
            serde_json::to_value(&parsed.data).unwrap(),
            case["expected"],
            "{name}: decoded fields differ"
        );
        assert_eq!(parsed.address, log.address, "{name}: address not carried over");
        assert_eq!(parsed.block_number, log.block_number);
    }
}

#[test]
fn weth_logs_batch() {
    let decoder = EventDecoder::new(weth());
    let mut logs: Vec<RawLog> = cases("logs.json")
        .iter()
        .map(|c| serde_json::from_value(c["log"].clone()).unwrap())
        .collect();
    // A log from some other contract in the middle of the batch.
    logs.insert(
        2,
        RawLog::new(
            vec!["0xd78ad95fa46c994b6551d0da85fc275fe613ce37657fb8d5e3d130840159d822".into()],
            "0x",
        ),
    );

    let skipped = decoder.decode_logs(&logs, ErrorMode::Skip).unwrap();
    let names: Vec<&str> = skipped.events.iter().map(|p| p.data.name.as_str()).collect();
    assert_eq!(names, vec!["Deposit", "Withdrawal", "Approval", "Transfer"]);

    let collected = decoder.decode_logs(&logs, ErrorMode::Collect).unwrap();
    assert_eq!(collected.errors.len(), 1);
    assert_eq!(collected.errors[0].0, 2);

    assert!(decoder.decode_logs(&logs, ErrorMode::Throw).is_err());
}

#[test]
fn approval_amount_is_max_uint() {
    let decoder = EventDecoder::new(weth());
    let case = cases("logs.json")
        .into_iter()
        .find(|c| c["name"] == "weth-approval-unlimited")
        .unwrap();
    let log: RawLog = serde_json::from_value(case["log"].clone()).unwrap();
    let event = decoder.decode_log(&log).unwrap();
    assert_eq!(event.param("wad").unwrap().as_u256(), Some(U256::MAX));
}

// ─── Calldata ─────────────────────────────────────────────────────────────────

#[test]
fn weth_calls_golden() {
    let abi = weth();
    for case in cases("calls.json") {
        let name = case["name"].as_str().unwrap();
        let function = case["function"].as_str().unwrap();
        let entry = abi.find(function).unwrap();
        let args: Vec<AbiValue> = entry
            .inputs
            .iter()
            .zip(case["args"].as_array().unwrap())
            .map(|(p, a)| arg_value(&p.ty, a.as_str().unwrap()))
            .collect();

        let calldata = encode_call(function, &args, &abi).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(hexstr::encode(&calldata), case["calldata"].as_str().unwrap(), "{name}");

        let decoded = decode_call(&calldata, &abi).unwrap();
        assert_eq!(decoded.function_name, function);
        assert_eq!(decoded.values(), args, "{name}: decode did not invert encode");
    }
}

#[test]
fn unnamed_inputs_get_positional_names() {
    let abi = weth();
    let owner = hexstr::parse_address("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045").unwrap();
    let calldata = encode_call("balanceOf", &[owner.into()], &abi).unwrap();
    assert_eq!(&calldata[..4], &[0x70, 0xa0, 0x82, 0x31]);
    let decoded = decode_call(&calldata, &abi).unwrap();
    assert_eq!(decoded.input("arg0").and_then(AbiValue::as_address), Some(owner));
}
