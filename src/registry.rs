//! Chain registry: chain id to RPC URLs and add-chain metadata.
//!
//! A [`ChainRegistry`] is built once, from the bundled [`Network`] table or from
//! caller supplied [`NetworkRecord`]s, with URL templates rendered against
//! [`ProviderKeys`]. It is never mutated afterwards.

use crate::config::ProviderKeys;
use crate::eip::{AddChainParameter, AddChainRequest};
use crate::network::Network;
use crate::schema::{self, NativeCurrency, NetworkRecord, SchemaLoadError};
use crate::template;
use alloy_primitives::ChainId;
use std::collections::BTreeMap;
use std::path::Path;
use strum::IntoEnumIterator;
use thiserror::Error;
use tracing::debug;

/// Chain known only by name and RPC endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicChainInformation {
    pub name: String,
    pub urls: Vec<String>,
}

/// Chain a wallet may not know; carries what `wallet_addEthereumChain` needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtendedChainInformation {
    pub name: String,
    pub urls: Vec<String>,
    pub native_currency: NativeCurrency,
    pub block_explorer_urls: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainEntry {
    Basic(BasicChainInformation),
    Extended(ExtendedChainInformation),
}

impl ChainEntry {
    /// Builds an entry, rendering each template and dropping the ones that cannot be filled.
    ///
    /// The entry is extended iff `native_currency` is given.
    pub fn from_templates<'a>(
        chain_id: ChainId,
        name: impl Into<String>,
        templates: impl IntoIterator<Item = &'a str>,
        native_currency: Option<NativeCurrency>,
        block_explorer_urls: Vec<String>,
        keys: &ProviderKeys,
    ) -> Self {
        let urls = templates
            .into_iter()
            .filter_map(|t| {
                let url = template::render(t, keys);
                if url.is_none() {
                    debug!(chain_id, template = t, "omitting RPC URL with unresolved placeholder");
                }
                url
            })
            .collect();
        let name = name.into();

        match native_currency {
            Some(native_currency) => Self::Extended(ExtendedChainInformation {
                name,
                urls,
                native_currency,
                block_explorer_urls,
            }),
            None => Self::Basic(BasicChainInformation { name, urls }),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Basic(info) => &info.name,
            Self::Extended(info) => &info.name,
        }
    }

    pub fn urls(&self) -> &[String] {
        match self {
            Self::Basic(info) => &info.urls,
            Self::Extended(info) => &info.urls,
        }
    }

    pub fn native_currency(&self) -> Option<&NativeCurrency> {
        match self {
            Self::Basic(_) => None,
            Self::Extended(info) => Some(&info.native_currency),
        }
    }

    pub fn block_explorer_urls(&self) -> &[String] {
        match self {
            Self::Basic(_) => &[],
            Self::Extended(info) => &info.block_explorer_urls,
        }
    }

    pub fn is_extended(&self) -> bool {
        matches!(self, Self::Extended(_))
    }
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("chain id {0} is listed more than once")]
    DuplicateChainId(ChainId),
    #[error("chain id 0 is not a valid chain ({0})")]
    ZeroChainId(String),
    #[error("chain id {0} lists block explorers without a native currency")]
    ExplorersWithoutCurrency(ChainId),
    #[error(transparent)]
    Schema(#[from] SchemaLoadError),
}

/// Immutable chain id to [`ChainEntry`] table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainRegistry {
    entries: BTreeMap<ChainId, ChainEntry>,
}

impl ChainRegistry {
    /// Registry over every bundled [`Network`].
    pub fn new(keys: &ProviderKeys) -> Self {
        let entries = Network::iter()
            .map(|network| {
                let definition = network.definition();
                let entry = ChainEntry::from_templates(
                    definition.id,
                    definition.name,
                    definition.rpc_templates,
                    definition.native_currency,
                    definition
                        .block_explorer_urls
                        .into_iter()
                        .map(str::to_string)
                        .collect(),
                    keys,
                );
                (definition.id, entry)
            })
            .collect();
        Self { entries }
    }

    /// Registry over caller supplied records.
    ///
    /// Rejects the same malformed records the build script refuses for the bundled table.
    pub fn from_records(records: &[NetworkRecord], keys: &ProviderKeys) -> Result<Self, RegistryError> {
        let mut entries = BTreeMap::new();
        for record in records {
            if record.chain_id == 0 {
                return Err(RegistryError::ZeroChainId(record.name.clone()));
            }
            if record.native_currency.is_none() && !record.block_explorer_urls.is_empty() {
                return Err(RegistryError::ExplorersWithoutCurrency(record.chain_id));
            }
            let entry = ChainEntry::from_templates(
                record.chain_id,
                record.name.clone(),
                record.rpc.iter().map(String::as_str),
                record.native_currency.clone(),
                record.block_explorer_urls.clone(),
                keys,
            );
            if entries.insert(record.chain_id, entry).is_some() {
                return Err(RegistryError::DuplicateChainId(record.chain_id));
            }
        }
        Ok(Self { entries })
    }

    /// Registry over a `networks.json` style file.
    pub fn from_json_file(path: impl AsRef<Path>, keys: &ProviderKeys) -> Result<Self, RegistryError> {
        let records = schema::load_networks_from(path)?;
        Self::from_records(&records, keys)
    }

    pub fn get(&self, chain_id: ChainId) -> Option<&ChainEntry> {
        self.entries.get(&chain_id)
    }

    pub fn contains(&self, chain_id: ChainId) -> bool {
        self.entries.contains_key(&chain_id)
    }

    /// Chain ids in ascending order.
    pub fn chain_ids(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.entries.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChainId, &ChainEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The entry name, or the decimal chain id for unknown chains.
    pub fn display_name(&self, chain_id: ChainId) -> String {
        self.get(chain_id)
            .map(|entry| entry.name().to_string())
            .unwrap_or_else(|| chain_id.to_string())
    }

    /// Chains with at least one RPC URL.
    pub fn urls(&self) -> UrlIndex<'_> {
        UrlIndex { registry: self }
    }

    /// Argument for switching a full-metadata wallet to `chain_id`.
    ///
    /// Extended chains yield the full [`AddChainRequest`]. Basic and unknown chains
    /// yield the id unchanged.
    pub fn resolve_add_chain_parameter(&self, chain_id: ChainId) -> AddChainParameter {
        match self.get(chain_id) {
            Some(ChainEntry::Extended(info)) => AddChainParameter::AddChain(AddChainRequest {
                chain_id,
                chain_name: info.name.clone(),
                native_currency: info.native_currency.clone(),
                rpc_urls: info.urls.clone(),
                block_explorer_urls: info.block_explorer_urls.clone(),
            }),
            Some(ChainEntry::Basic(_)) => AddChainParameter::ChainId(chain_id),
            None => {
                debug!(chain_id, "no registry entry, passing chain id through");
                AddChainParameter::ChainId(chain_id)
            }
        }
    }
}

/// View of a [`ChainRegistry`] restricted to chains with a non-empty URL list.
#[derive(Clone, Copy, Debug)]
pub struct UrlIndex<'a> {
    registry: &'a ChainRegistry,
}

impl<'a> UrlIndex<'a> {
    pub fn get(&self, chain_id: ChainId) -> Option<&'a [String]> {
        self.registry
            .get(chain_id)
            .map(ChainEntry::urls)
            .filter(|urls| !urls.is_empty())
    }

    pub fn contains(&self, chain_id: ChainId) -> bool {
        self.get(chain_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChainId, &'a [String])> {
        self.registry
            .entries
            .iter()
            .map(|(id, entry)| (*id, entry.urls()))
            .filter(|(_, urls)| !urls.is_empty())
    }

    pub fn chain_ids(&self) -> impl Iterator<Item = ChainId> + 'a {
        self.iter().map(|(id, _)| id)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn polygon_request() -> AddChainRequest {
        AddChainRequest {
            chain_id: 137,
            chain_name: "Polygon Mainnet".to_string(),
            native_currency: NativeCurrency::new("Matic", "MATIC", 18),
            rpc_urls: vec!["https://polygon-rpc.com".to_string()],
            block_explorer_urls: vec!["https://polygonscan.com".to_string()],
        }
    }

    #[test]
    fn bundled_registry_without_keys() {
        let registry = ChainRegistry::new(&ProviderKeys::default());
        assert_eq!(registry.len(), 13);

        let mainnet = registry.get(1).unwrap();
        assert_eq!(mainnet.urls(), ["https://cloudflare-eth.com"]);
        assert!(!mainnet.is_extended());

        // Infura-only chains end up with no URLs at all
        assert!(registry.get(3).unwrap().urls().is_empty());
        assert!(registry.get(80001).unwrap().urls().is_empty());
    }

    #[test]
    fn keys_fill_templates_in_order() {
        let keys = ProviderKeys::default()
            .with_infura_key("inf")
            .with_alchemy_key("alc");
        let registry = ChainRegistry::new(&keys);

        assert_eq!(
            registry.get(1).unwrap().urls(),
            [
                "https://mainnet.infura.io/v3/inf",
                "https://eth-mainnet.alchemyapi.io/v2/alc",
                "https://cloudflare-eth.com",
            ]
        );
        assert_eq!(
            registry.get(3).unwrap().urls(),
            ["https://ropsten.infura.io/v3/inf"]
        );
    }

    #[test]
    fn urls_never_contain_empty_strings() {
        for keys in [
            ProviderKeys::default(),
            ProviderKeys::default().with_infura_key("").with_alchemy_key(""),
            ProviderKeys::default().with_infura_key("k"),
        ] {
            let registry = ChainRegistry::new(&keys);
            for (_, entry) in registry.iter() {
                assert!(entry.urls().iter().all(|url| !url.is_empty()));
            }
        }
    }

    #[test]
    fn url_index_is_registry_restricted_to_non_empty_urls() {
        let registry = ChainRegistry::new(&ProviderKeys::default());
        let index = registry.urls();

        let expected: BTreeSet<ChainId> = registry
            .iter()
            .filter(|(_, entry)| !entry.urls().is_empty())
            .map(|(id, _)| id)
            .collect();
        let actual: BTreeSet<ChainId> = index.chain_ids().collect();
        assert_eq!(actual, expected);

        assert!(!index.contains(3));
        assert!(index.get(3).is_none());
        assert_eq!(index.get(137), Some(&["https://polygon-rpc.com".to_string()][..]));
        assert_eq!(
            actual,
            BTreeSet::from([1, 10, 69, 137, 42161, 42220, 44787, 421611])
        );
        assert_eq!(index.len(), 8);
        assert!(!index.is_empty());
    }

    #[test]
    fn url_index_with_infura_key_covers_everything() {
        let registry = ChainRegistry::new(&ProviderKeys::default().with_infura_key("k"));
        assert_eq!(registry.urls().len(), registry.len());
    }

    #[test]
    fn basic_chains_resolve_to_their_id() {
        let registry = ChainRegistry::new(&ProviderKeys::default());
        for (id, entry) in registry.iter().filter(|(_, e)| !e.is_extended()) {
            assert_eq!(
                registry.resolve_add_chain_parameter(id),
                AddChainParameter::ChainId(id),
                "{} should resolve to its bare id",
                entry.name()
            );
        }
    }

    #[test]
    fn extended_chains_resolve_to_full_request() {
        let registry = ChainRegistry::new(&ProviderKeys::default().with_infura_key("k"));
        for (id, entry) in registry.iter().filter(|(_, e)| e.is_extended()) {
            let parameter = registry.resolve_add_chain_parameter(id);
            let request = parameter.as_add_chain().expect("extended chain yields request");
            assert_eq!(request.chain_id, id);
            assert_eq!(request.chain_name, entry.name());
            assert_eq!(request.rpc_urls, entry.urls());
            assert_eq!(Some(&request.native_currency), entry.native_currency());
            assert_eq!(request.block_explorer_urls, entry.block_explorer_urls());
        }
    }

    #[test]
    fn mainnet_and_polygon_scenario() {
        let registry = ChainRegistry::new(&ProviderKeys::default());
        assert_eq!(
            registry.resolve_add_chain_parameter(1),
            AddChainParameter::ChainId(1)
        );
        assert_eq!(
            registry.resolve_add_chain_parameter(137),
            AddChainParameter::AddChain(polygon_request())
        );
    }

    #[test]
    fn unknown_chain_passes_through() {
        let registry = ChainRegistry::new(&ProviderKeys::default());
        assert_eq!(
            registry.resolve_add_chain_parameter(56),
            AddChainParameter::ChainId(56)
        );
        assert_eq!(registry.display_name(56), "56");
        assert_eq!(registry.display_name(42161), "Arbitrum One");
    }

    #[test]
    fn from_records_builds_custom_registry() {
        let records = vec![
            NetworkRecord {
                chain_id: 1,
                name: "Mainnet".to_string(),
                rpc: vec!["https://cloudflare-eth.com".to_string()],
                native_currency: None,
                block_explorer_urls: vec![],
            },
            NetworkRecord {
                chain_id: 137,
                name: "Polygon Mainnet".to_string(),
                rpc: vec![
                    "https://polygon-mainnet.infura.io/v3/${INFURA_KEY}".to_string(),
                    "https://polygon-rpc.com".to_string(),
                ],
                native_currency: Some(NativeCurrency::new("Matic", "MATIC", 18)),
                block_explorer_urls: vec!["https://polygonscan.com".to_string()],
            },
        ];
        let registry = ChainRegistry::from_records(&records, &ProviderKeys::default()).unwrap();

        assert_eq!(registry.chain_ids().collect::<Vec<_>>(), [1, 137]);
        assert_eq!(
            registry.resolve_add_chain_parameter(137),
            AddChainParameter::AddChain(polygon_request())
        );
    }

    #[test]
    fn from_records_rejects_bad_ids() {
        let record = |chain_id| NetworkRecord {
            chain_id,
            name: "Dup".to_string(),
            rpc: vec![],
            native_currency: None,
            block_explorer_urls: vec![],
        };
        let keys = ProviderKeys::default();

        let err = ChainRegistry::from_records(&[record(7), record(7)], &keys).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateChainId(7)));

        let err = ChainRegistry::from_records(&[record(0)], &keys).unwrap_err();
        assert!(matches!(err, RegistryError::ZeroChainId(_)));

        let mut orphan_explorers = record(9);
        orphan_explorers.block_explorer_urls = vec!["https://scan".to_string()];
        let err = ChainRegistry::from_records(&[orphan_explorers], &keys).unwrap_err();
        assert!(matches!(err, RegistryError::ExplorersWithoutCurrency(9)));
    }

    #[test]
    fn bundled_file_matches_generated_table() {
        let path = option_env!("NETWORKS_JSON_PATH").expect("build script exports NETWORKS_JSON_PATH");
        let keys = ProviderKeys::default().with_alchemy_key("a");
        let from_file = ChainRegistry::from_json_file(path, &keys).unwrap();
        assert_eq!(from_file, ChainRegistry::new(&keys));
    }
}
