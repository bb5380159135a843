//! Chain registry and wallet connection selector
//!
//! Look up RPC URLs and `wallet_addEthereumChain` metadata by chain id, and drive
//! a chain picker plus connect / disconnect button over any wallet connector.
//!
//! ## Build-time data
//!
//! The network table is `data/networks.json`; the build script turns it into the
//! [`Network`] enum. Point `NETWORKS_JSON_PATH` at another file to ship a
//! different table.
//!
//! RPC entries may reference `${INFURA_KEY}` and `${ALCHEMY_KEY}`. Those are
//! filled from [`ProviderKeys`] when a [`ChainRegistry`] is built; URLs whose key
//! is missing are left out.
//!
//! ## Examples
//!
//! ```rust
//! use chain_select::{AddChainParameter, ChainRegistry, ProviderKeys};
//!
//! let registry = ChainRegistry::new(&ProviderKeys::default());
//! assert_eq!(registry.resolve_add_chain_parameter(1), AddChainParameter::ChainId(1));
//!
//! let polygon = registry.resolve_add_chain_parameter(137);
//! println!("{}", serde_json::to_string(&polygon).unwrap());
//! ```

pub mod config;
pub mod connector;
pub mod eip;
pub mod network;
pub mod registry;
pub mod schema;
pub mod selector;
pub mod status;
pub mod template;

pub use alloy_primitives::ChainId;
pub use config::{ConfigError, ProviderKeys};
pub use connector::{Activation, Capability, Connector, ConnectorError, ConnectorKind, Deactivate};
pub use eip::{
    chain_id_hex, parse_chain_id, AddChainParameter, AddChainRequest, Eip3085Params,
    SwitchChainParams,
};
pub use network::{Network, NetworkDefinition, NetworkNotSupported};
pub use registry::{ChainEntry, ChainRegistry, RegistryError, UrlIndex};
pub use schema::NativeCurrency;
pub use selector::{ConnectionSelector, ConnectorState, DesiredChain, SelectorView};
pub use status::{chain_label, ConnectionStatus};
