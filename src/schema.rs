//! Serde bindings for the network table.
//!
//! `load_networks()` parses the bundled `networks.json` from the path exported by
//! the build script through `NETWORKS_JSON_PATH`. `load_networks_from()` reads a
//! caller supplied file with the same layout.

use alloy_primitives::ChainId;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Native asset of a chain, in the shape wallets expect for `nativeCurrency`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl NativeCurrency {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }
}

/// One network as declared in `networks.json`.
///
/// `rpc` entries are URL templates and may reference `${INFURA_KEY}` or
/// `${ALCHEMY_KEY}`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRecord {
    pub chain_id: ChainId,
    pub name: String,
    #[serde(default)]
    pub rpc: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_currency: Option<NativeCurrency>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_explorer_urls: Vec<String>,
}

impl NetworkRecord {
    /// Access the RPC URL templates.
    pub fn rpc_templates(&self) -> &[String] {
        &self.rpc
    }

    /// Access the native currency if the record is extended.
    pub fn native_currency(&self) -> Option<&NativeCurrency> {
        self.native_currency.as_ref()
    }

    /// Access explorer URLs.
    pub fn block_explorer_urls(&self) -> &[String] {
        &self.block_explorer_urls
    }
}

/// Errors when loading a network table.
#[derive(Debug, Error)]
pub enum SchemaLoadError {
    #[error("NETWORKS_JSON_PATH not set; build script should export it")]
    MissingPath,
    #[error("failed to read {0}: {1}")]
    Io(String, #[source] std::io::Error),
    #[error("failed to parse {0}: {1}")]
    Json(String, #[source] serde_json::Error),
}

/// Load the bundled network table.
pub fn load_networks() -> Result<Vec<NetworkRecord>, SchemaLoadError> {
    let path = option_env!("NETWORKS_JSON_PATH").ok_or(SchemaLoadError::MissingPath)?;
    load_networks_from(path)
}

/// Load a network table from `path`.
pub fn load_networks_from(path: impl AsRef<Path>) -> Result<Vec<NetworkRecord>, SchemaLoadError> {
    let path = path.as_ref();
    let display = path.display().to_string();
    let text = std::fs::read_to_string(path).map_err(|e| SchemaLoadError::Io(display.clone(), e))?;
    serde_json::from_str(&text).map_err(|e| SchemaLoadError::Json(display, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_basic_and_extended_records() {
        let json = r#"[
            {"chainId": 3, "name": "Ropsten", "rpc": ["https://ropsten.infura.io/v3/${INFURA_KEY}"]},
            {
                "chainId": 137,
                "name": "Polygon Mainnet",
                "rpc": ["https://polygon-rpc.com"],
                "nativeCurrency": {"name": "Matic", "symbol": "MATIC", "decimals": 18},
                "blockExplorerUrls": ["https://polygonscan.com"]
            }
        ]"#;
        let records: Vec<NetworkRecord> = serde_json::from_str(json).unwrap();

        assert_eq!(records.len(), 2);
        assert!(records[0].native_currency().is_none());
        assert!(records[0].block_explorer_urls().is_empty());
        assert_eq!(
            records[1].native_currency(),
            Some(&NativeCurrency::new("Matic", "MATIC", 18))
        );
        assert_eq!(records[1].block_explorer_urls(), ["https://polygonscan.com"]);
    }

    #[test]
    fn basic_record_serializes_without_extended_fields() {
        let record = NetworkRecord {
            chain_id: 4,
            name: "Rinkeby".to_string(),
            rpc: vec![],
            native_currency: None,
            block_explorer_urls: vec![],
        };
        let value = serde_json::to_value(&record).unwrap();
        assert!(value.get("nativeCurrency").is_none());
        assert!(value.get("blockExplorerUrls").is_none());
        assert_eq!(value["chainId"], 4);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_networks_from("/definitely/not/here/networks.json").unwrap_err();
        assert!(matches!(err, SchemaLoadError::Io(..)));
    }

    #[test]
    fn bundled_table_loads() {
        let records = load_networks().expect("bundled networks.json should load");
        assert_eq!(records.len(), 13);
        assert!(records.iter().any(|r| r.chain_id == 42220));
    }
}
