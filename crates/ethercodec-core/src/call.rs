//! Decoded function-call type.

use serde::Serialize;

use crate::value::AbiValue;

/// Result of decoding a function call's calldata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedCall {
    /// Function name (e.g. "transfer")
    pub function_name: String,
    /// First 4 bytes of calldata
    #[serde(serialize_with = "serialize_selector")]
    pub selector: [u8; 4],
    /// Decoded input parameters in declaration order
    pub inputs: Vec<(String, AbiValue)>,
}

fn serialize_selector<S: serde::Serializer>(sel: &[u8; 4], s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("0x{}", hex::encode(sel)))
}

impl DecodedCall {
    /// Selector as a hex string ("0xaabbccdd")
    pub fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector))
    }

    /// Look up a decoded input by name
    pub fn input(&self, name: &str) -> Option<&AbiValue> {
        self.inputs.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Input values in declaration order, without names.
    pub fn values(&self) -> Vec<AbiValue> {
        self.inputs.iter().map(|(_, v)| v.clone()).collect()
    }
}
