//! Wallet JSON-RPC parameter shapes and chain id conversions.

use crate::schema::NativeCurrency;
use alloy_primitives::{ChainId, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters a wallet needs to register a network it does not know yet.
///
/// Serializes with a numeric `chainId`; see [`AddChainRequest::to_eip3085`] for
/// the hex form sent over `wallet_addEthereumChain`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChainRequest {
    pub chain_id: ChainId,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    pub block_explorer_urls: Vec<String>,
}

impl AddChainRequest {
    /// Convert to EIP-3085 wallet parameters.
    pub fn to_eip3085(&self) -> Eip3085Params {
        Eip3085Params {
            chain_id: chain_id_hex(self.chain_id),
            chain_name: self.chain_name.clone(),
            native_currency: self.native_currency.clone(),
            rpc_urls: self.rpc_urls.clone(),
            block_explorer_urls: self.block_explorer_urls.clone(),
        }
    }
}

/// What a chain switch hands to a full-metadata connector.
///
/// Chains the wallet already knows travel as a bare id; the rest carry the full
/// add-chain request. Serializes untagged, as either a number or an object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddChainParameter {
    ChainId(ChainId),
    AddChain(AddChainRequest),
}

impl AddChainParameter {
    pub fn chain_id(&self) -> ChainId {
        match self {
            Self::ChainId(id) => *id,
            Self::AddChain(request) => request.chain_id,
        }
    }

    pub fn as_add_chain(&self) -> Option<&AddChainRequest> {
        match self {
            Self::ChainId(_) => None,
            Self::AddChain(request) => Some(request),
        }
    }
}

/// EIP-3085 wallet_addEthereumChain parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip3085Params {
    /// Hex string chain ID, e.g. "0x1".
    pub chain_id: String,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub block_explorer_urls: Vec<String>,
}

/// EIP-3326 wallet_switchEthereumChain parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchChainParams {
    pub chain_id: String,
}

impl SwitchChainParams {
    pub fn new(chain_id: ChainId) -> Self {
        Self {
            chain_id: chain_id_hex(chain_id),
        }
    }
}

/// Hex chain ID string (usable for EIP-3085/3326).
pub fn chain_id_hex(chain_id: ChainId) -> String {
    format!("0x{chain_id:x}")
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChainIdParseError {
    #[error("invalid chain id {0:?}")]
    Invalid(String),
    #[error("chain id {0} does not fit in 64 bits")]
    Overflow(String),
}

/// Parses a chain id as wallets report it, either decimal or `0x` prefixed hex.
pub fn parse_chain_id(value: &str) -> Result<ChainId, ChainIdParseError> {
    let trimmed = value.trim();
    let wide: U256 = trimmed
        .parse()
        .map_err(|_| ChainIdParseError::Invalid(value.to_string()))?;
    u64::try_from(wide).map_err(|_| ChainIdParseError::Overflow(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn polygon() -> AddChainRequest {
        AddChainRequest {
            chain_id: 137,
            chain_name: "Polygon Mainnet".to_string(),
            native_currency: NativeCurrency::new("Matic", "MATIC", 18),
            rpc_urls: vec!["https://polygon-rpc.com".to_string()],
            block_explorer_urls: vec!["https://polygonscan.com".to_string()],
        }
    }

    #[test]
    fn add_chain_request_uses_numeric_chain_id() {
        let value = serde_json::to_value(polygon()).unwrap();
        assert_eq!(
            value,
            json!({
                "chainId": 137,
                "chainName": "Polygon Mainnet",
                "nativeCurrency": {"name": "Matic", "symbol": "MATIC", "decimals": 18},
                "rpcUrls": ["https://polygon-rpc.com"],
                "blockExplorerUrls": ["https://polygonscan.com"]
            })
        );
    }

    #[test]
    fn parameter_serializes_untagged() {
        assert_eq!(
            serde_json::to_value(AddChainParameter::ChainId(1)).unwrap(),
            json!(1)
        );
        let value = serde_json::to_value(AddChainParameter::AddChain(polygon())).unwrap();
        assert_eq!(value["chainName"], "Polygon Mainnet");

        let parsed: AddChainParameter = serde_json::from_value(json!(5)).unwrap();
        assert_eq!(parsed, AddChainParameter::ChainId(5));
        assert_eq!(parsed.chain_id(), 5);
        assert!(parsed.as_add_chain().is_none());
    }

    #[test]
    fn eip3085_uses_hex_chain_id() {
        let params = polygon().to_eip3085();
        assert_eq!(params.chain_id, "0x89");
        assert_eq!(params.rpc_urls, ["https://polygon-rpc.com"]);

        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(value["chainId"], "0x89");
        assert_eq!(value["nativeCurrency"]["symbol"], "MATIC");
    }

    #[test]
    fn switch_chain_params() {
        let value = serde_json::to_value(SwitchChainParams::new(42161)).unwrap();
        assert_eq!(value, json!({"chainId": "0xa4b1"}));
    }

    #[test]
    fn parses_hex_and_decimal_chain_ids() {
        assert_eq!(parse_chain_id("0x89"), Ok(137));
        assert_eq!(parse_chain_id("137"), Ok(137));
        assert_eq!(parse_chain_id(" 0x1 "), Ok(1));
        assert!(matches!(
            parse_chain_id("polygon"),
            Err(ChainIdParseError::Invalid(_))
        ));
        assert!(matches!(
            parse_chain_id("0x10000000000000000"),
            Err(ChainIdParseError::Overflow(_))
        ));
    }
}
