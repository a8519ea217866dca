//! Contract interfaces loaded from standard Ethereum ABI JSON.
//!
//! Parameter types are parsed when the interface is loaded, so an
//! unsupported type fails [`Abi::from_json`] instead of a later encode or
//! decode. `tuple` parameters take their element types from `components`.
//! Both a bare entry array and a compiler artifact with an `"abi"` field are
//! accepted.

use std::collections::HashSet;

use alloy_primitives::B256;
use ethercodec_core::{hash, keccak256, AbiError, AbiType};
use serde::Deserialize;
use tracing::debug;

/// What an ABI entry describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Function,
    Constructor,
    Event,
    Error,
    Fallback,
    Receive,
}

/// One input or output parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: AbiType,
    /// Only meaningful for event inputs.
    pub indexed: bool,
}

/// A function, constructor, event or error declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiEntry {
    pub name: String,
    pub kind: EntryKind,
    pub inputs: Vec<Param>,
    pub outputs: Vec<Param>,
    pub anonymous: bool,
    pub state_mutability: Option<String>,
}

impl AbiEntry {
    /// Canonical signature, e.g. `transfer(address,uint256)`.
    pub fn signature(&self) -> String {
        let types: Vec<String> = self.inputs.iter().map(|p| p.ty.canonical_name()).collect();
        format!("{}({})", self.name, types.join(","))
    }

    /// First four bytes of the signature hash.
    pub fn selector(&self) -> [u8; 4] {
        hash::selector(&self.signature())
    }

    /// Full signature hash, the `topics[0]` of a non-anonymous event.
    pub fn topic0(&self) -> B256 {
        keccak256(self.signature())
    }

    pub fn input_types(&self) -> Vec<AbiType> {
        self.inputs.iter().map(|p| p.ty.clone()).collect()
    }

    /// Input names, with `arg{i}` standing in for unnamed parameters.
    ///
    /// Names are unique: a repeated name gets a `_{i}` suffix.
    pub fn input_names(&self) -> Vec<String> {
        unique_names(&self.inputs, &[])
    }

    /// Keys for a decoded event's flattened params; `event_name` is taken.
    pub(crate) fn event_param_names(&self) -> Vec<String> {
        unique_names(&self.inputs, &[EVENT_NAME_KEY])
    }
}

const EVENT_NAME_KEY: &str = "event_name";

fn param_name(param: &Param, index: usize) -> String {
    if param.name.is_empty() {
        format!("arg{index}")
    } else {
        param.name.clone()
    }
}

fn unique_names(params: &[Param], reserved: &[&str]) -> Vec<String> {
    let mut taken: HashSet<String> = reserved.iter().map(|r| r.to_string()).collect();
    let mut names = Vec::with_capacity(params.len());
    for (i, param) in params.iter().enumerate() {
        let base = param_name(param, i);
        let mut name = base.clone();
        let mut n = i;
        while taken.contains(&name) {
            name = format!("{base}_{n}");
            n += 1;
        }
        taken.insert(name.clone());
        names.push(name);
    }
    names
}

/// A parsed contract interface: its entries in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Abi {
    entries: Vec<AbiEntry>,
}

impl Abi {
    /// Parse ABI JSON.
    pub fn from_json(json: &str) -> Result<Self, AbiError> {
        let doc: AbiDocument = serde_json::from_str(json)?;
        let raw = match doc {
            AbiDocument::Entries(entries) => entries,
            AbiDocument::Artifact { abi } => abi,
        };
        let entries = raw
            .into_iter()
            .map(RawEntry::resolve)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(entries = entries.len(), "loaded ABI");
        Ok(Self { entries })
    }

    pub fn from_entries(entries: Vec<AbiEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AbiEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn functions(&self) -> impl Iterator<Item = &AbiEntry> {
        self.of_kind(EntryKind::Function)
    }

    pub fn events(&self) -> impl Iterator<Item = &AbiEntry> {
        self.of_kind(EntryKind::Event)
    }

    pub fn errors(&self) -> impl Iterator<Item = &AbiEntry> {
        self.of_kind(EntryKind::Error)
    }

    pub fn constructor(&self) -> Option<&AbiEntry> {
        self.of_kind(EntryKind::Constructor).next()
    }

    /// First entry with this name, of any kind.
    pub fn find(&self, name: &str) -> Option<&AbiEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Every entry with this name (overloads included), in declaration order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a AbiEntry> + 'a {
        self.entries.iter().filter(move |e| e.name == name)
    }

    pub fn function_by_selector(&self, selector: [u8; 4]) -> Option<&AbiEntry> {
        self.functions().find(|f| f.selector() == selector)
    }

    /// The non-anonymous event whose signature hash is `topic`.
    pub fn event_by_topic(&self, topic: &B256) -> Option<&AbiEntry> {
        self.events().find(|e| !e.anonymous && e.topic0() == *topic)
    }

    fn of_kind(&self, kind: EntryKind) -> impl Iterator<Item = &AbiEntry> {
        self.entries.iter().filter(move |e| e.kind == kind)
    }
}

impl std::str::FromStr for Abi {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Abi::from_json(s)
    }
}

// ─── JSON shape ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum AbiDocument {
    Entries(Vec<RawEntry>),
    Artifact { abi: Vec<RawEntry> },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEntry {
    #[serde(rename = "type", default)]
    kind: EntryKind,
    #[serde(default)]
    name: String,
    #[serde(default)]
    inputs: Vec<RawParam>,
    #[serde(default)]
    outputs: Vec<RawParam>,
    #[serde(default)]
    anonymous: bool,
    #[serde(default)]
    state_mutability: Option<String>,
}

#[derive(Deserialize)]
struct RawParam {
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    indexed: bool,
    #[serde(default)]
    components: Vec<RawParam>,
}

impl RawEntry {
    fn resolve(self) -> Result<AbiEntry, AbiError> {
        Ok(AbiEntry {
            name: self.name,
            kind: self.kind,
            inputs: resolve_params(self.inputs)?,
            outputs: resolve_params(self.outputs)?,
            anonymous: self.anonymous,
            state_mutability: self.state_mutability,
        })
    }
}

fn resolve_params(raw: Vec<RawParam>) -> Result<Vec<Param>, AbiError> {
    raw.into_iter().map(RawParam::resolve).collect()
}

impl RawParam {
    fn resolve(self) -> Result<Param, AbiError> {
        let ty = match self.ty.strip_prefix("tuple") {
            Some(suffixes) => {
                let components = resolve_params(self.components)?;
                let base = AbiType::Tuple(components.into_iter().map(|p| p.ty).collect());
                AbiType::with_suffixes(base, suffixes)?
            }
            None => AbiType::parse(&self.ty)?,
        };
        Ok(Param {
            name: self.name,
            ty,
            indexed: self.indexed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const ABI: &str = r#"[
        {"type": "constructor", "inputs": [{"name": "supply", "type": "uint256"}]},
        {"name": "transfer", "type": "function",
         "inputs": [{"name": "to", "type": "address"}, {"name": "amount", "type": "uint256"}],
         "outputs": [{"name": "", "type": "bool"}], "stateMutability": "nonpayable"},
        {"name": "submit", "type": "function",
         "inputs": [{"name": "orders", "type": "tuple[]", "components": [
             {"name": "maker", "type": "address"},
             {"name": "amounts", "type": "uint[2]"}
         ]}]},
        {"name": "Transfer", "type": "event", "anonymous": false, "inputs": [
            {"name": "from", "type": "address", "indexed": true},
            {"name": "to", "type": "address", "indexed": true},
            {"name": "value", "type": "uint256", "indexed": false}
        ]},
        {"name": "Ping", "inputs": []}
    ]"#;

    #[test]
    fn loads_entries_in_order() {
        let abi = Abi::from_json(ABI).unwrap();
        assert_eq!(abi.len(), 5);
        assert_eq!(abi.functions().count(), 3);
        assert_eq!(abi.events().count(), 1);
        assert_eq!(abi.constructor().unwrap().inputs[0].name, "supply");
        // missing "type" means function
        assert_eq!(abi.find("Ping").unwrap().kind, EntryKind::Function);
    }

    #[test]
    fn signatures_and_hashes() {
        let abi = Abi::from_json(ABI).unwrap();
        let transfer = abi.find("transfer").unwrap();
        assert_eq!(transfer.signature(), "transfer(address,uint256)");
        assert_eq!(transfer.selector(), hex!("a9059cbb"));

        let event = abi.find("Transfer").unwrap();
        assert_eq!(
            event.topic0().0,
            hex!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef")
        );
        assert_eq!(abi.event_by_topic(&event.topic0()), Some(event));
        assert_eq!(abi.function_by_selector(hex!("a9059cbb")), Some(transfer));
    }

    #[test]
    fn tuple_components_become_tuples() {
        let abi = Abi::from_json(ABI).unwrap();
        let submit = abi.find("submit").unwrap();
        assert_eq!(submit.signature(), "submit((address,uint256[2])[])");
    }

    #[test]
    fn unsupported_type_fails_at_load() {
        let bad = r#"[{"name": "f", "type": "function", "inputs": [{"name": "x", "type": "fixed128x18"}]}]"#;
        assert!(matches!(
            Abi::from_json(bad),
            Err(AbiError::UnsupportedType { .. })
        ));
        assert!(matches!(
            Abi::from_json("{not json"),
            Err(AbiError::InvalidAbiJson(_))
        ));
    }

    #[test]
    fn artifact_shape_accepted() {
        let artifact = format!(r#"{{"contractName": "Token", "abi": {ABI}}}"#);
        let abi: Abi = artifact.parse().unwrap();
        assert_eq!(abi.len(), 5);
    }

    #[test]
    fn unnamed_inputs_get_positional_names() {
        let abi = Abi::from_json(
            r#"[{"name": "f", "type": "function", "inputs": [{"name": "", "type": "bool"}, {"name": "b", "type": "bool"}]}]"#,
        )
        .unwrap();
        assert_eq!(abi.find("f").unwrap().input_names(), vec!["arg0", "b"]);
    }

    #[test]
    fn clashing_names_are_suffixed() {
        let abi = Abi::from_json(
            r#"[
                {"name": "f", "type": "function", "inputs": [
                    {"name": "", "type": "bool"}, {"name": "arg0", "type": "bool"}, {"name": "arg0", "type": "bool"}
                ]},
                {"name": "E", "type": "event", "inputs": [
                    {"name": "event_name", "type": "uint256", "indexed": false}
                ]}
            ]"#,
        )
        .unwrap();
        assert_eq!(abi.find("f").unwrap().input_names(), vec!["arg0", "arg0_1", "arg0_2"]);
        assert_eq!(abi.find("E").unwrap().input_names(), vec!["event_name"]);
        assert_eq!(abi.find("E").unwrap().event_param_names(), vec!["event_name_0"]);
    }
}
