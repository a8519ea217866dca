//! RLP vector tests.
//!
//! `fixtures/rlp/rlptest.json` uses the common test-vector shape: strings
//! are byte strings, numbers are integers, `#`-prefixed strings are decimal
//! big integers and arrays are lists. Every vector must encode to `out` and
//! decode back to the same item. `fixtures/rlp/invalid.json` lists inputs
//! the decoder must reject.

use alloy_primitives::U256;
use ethercodec_rlp::{decode, encode, RlpItem};
use serde_json::Value;

fn fixture_path(name: &str) -> std::path::PathBuf {
    let mut p = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    p.push("../../fixtures/rlp");
    p.push(name);
    p
}

fn load(name: &str) -> serde_json::Map<String, Value> {
    let text = std::fs::read_to_string(fixture_path(name)).expect("fixture not found");
    match serde_json::from_str(&text).expect("invalid fixture JSON") {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

fn hex_to_bytes(s: &str) -> Vec<u8> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).unwrap_or_else(|e| panic!("bad hex '{s}': {e}"))
}

fn item_from_json(v: &Value) -> RlpItem {
    match v {
        Value::Array(items) => RlpItem::list(items.iter().map(item_from_json).collect()),
        Value::Number(n) => RlpItem::uint(n.as_u64().expect("integer vector")),
        Value::String(s) => match s.strip_prefix('#') {
            Some(digits) => RlpItem::u256(U256::from_str_radix(digits, 10).expect("decimal bigint")),
            None => RlpItem::bytes(s.as_bytes().to_vec()),
        },
        other => panic!("unsupported vector input {other}"),
    }
}

#[test]
fn encodes_all_vectors() {
    for (name, vector) in load("rlptest.json") {
        let item = item_from_json(&vector["in"]);
        let expected = hex_to_bytes(vector["out"].as_str().unwrap());
        assert_eq!(encode(&item), expected, "encoding mismatch for {name}");
    }
}

#[test]
fn decodes_all_vectors() {
    for (name, vector) in load("rlptest.json") {
        let bytes = hex_to_bytes(vector["out"].as_str().unwrap());
        let decoded = decode(&bytes).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert_eq!(decoded, item_from_json(&vector["in"]), "decoding mismatch for {name}");
        assert_eq!(encode(&decoded), bytes, "re-encoding mismatch for {name}");
    }
}

#[test]
fn rejects_invalid_inputs() {
    for (name, input) in load("invalid.json") {
        let bytes = hex_to_bytes(input.as_str().unwrap());
        assert!(decode(&bytes).is_err(), "{name} should be rejected");
    }
}

#[test]
fn big_integers_read_back() {
    let vectors = load("rlptest.json");
    let bytes = hex_to_bytes(vectors["bigint"]["out"].as_str().unwrap());
    let item = decode(&bytes).unwrap();
    assert_eq!(item.as_u256("bigint").unwrap(), U256::MAX);

    let bytes = hex_to_bytes(vectors["mediumint2"]["out"].as_str().unwrap());
    assert_eq!(decode(&bytes).unwrap().as_u64("n").unwrap(), 1000);
}
