use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholders a URL template may reference; values come from provider keys at runtime.
const KNOWN_PLACEHOLDERS: &[&str] = &["INFURA_KEY", "ALCHEMY_KEY"];

// Network definitions as written in data/networks.json
pub type Root = Vec<NetworkRecord>;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRecord {
    pub chain_id: u64,
    pub name: String,
    #[serde(default)]
    pub rpc: Vec<String>,
    #[serde(default)]
    pub native_currency: Option<NativeCurrency>,
    #[serde(default)]
    pub block_explorer_urls: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Simplified network data for code generation
#[derive(Debug, Clone)]
struct NetworkData {
    id: u64,
    variant: String,
    name_str: String,
    rpc_templates: Vec<String>,
    native_currency: Option<NativeCurrency>,
    block_explorer_urls: Vec<String>,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=NETWORKS_JSON_PATH");

    let networks_json = load_networks_json();

    let network_code = generate_network_code(&networks_json);
    let formatted_code = format_rust_code(&network_code);

    let out_dir = env::var("OUT_DIR").unwrap();
    // Keep a copy of networks.json in OUT_DIR for the runtime schema loader
    let json_dest = Path::new(&out_dir).join("networks.json");
    fs::write(&json_dest, &networks_json)
        .unwrap_or_else(|e| panic!("Failed to write networks.json to {:?}: {e}", json_dest));
    println!("cargo:rustc-env=NETWORKS_JSON_PATH={}", json_dest.display());

    let dest_path = Path::new(&out_dir).join("network_generated.rs");
    fs::write(&dest_path, formatted_code).unwrap();

    println!("cargo:info=Generated Network enum from data/networks.json");
}

fn load_networks_json() -> String {
    // Env override lets downstream builds ship their own network table
    if let Ok(path) = env::var("NETWORKS_JSON_PATH") {
        println!("cargo:rerun-if-changed={path}");
        return fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read NETWORKS_JSON_PATH file {path}: {e}"));
    }

    let manifest_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set by Cargo"));
    let local = manifest_dir.join("data").join("networks.json");
    println!("cargo:rerun-if-changed={}", local.display());

    fs::read_to_string(&local)
        .unwrap_or_else(|e| panic!("Failed to read bundled networks.json at {:?}: {e}", local))
}

fn generate_network_code(json_str: &str) -> String {
    let records: Root = match serde_json::from_str(json_str) {
        Ok(records) => records,
        Err(err) => panic!("Failed to parse networks.json: {err}"),
    };

    let mut network_data = get_networks(&records);
    network_data.sort_by_key(|n| n.id);

    let mut enum_variants = TokenStream::new();
    for network in &network_data {
        let name_ident = format_ident!("{}", network.variant);
        let doc_comment = format!("{} (Chain ID: {})", network.name_str, network.id);
        let variant = quote! {
            #[doc = #doc_comment]
            #name_ident,
        };
        enum_variants.extend(variant);
    }

    let definition_entries = network_data
        .iter()
        .map(|network| {
            let name_ident = format_ident!("{}", network.variant);
            let id = network.id;
            let name_str = &network.name_str;

            let rpc_templates = if network.rpc_templates.is_empty() {
                quote! { vec![] }
            } else {
                let templates: Vec<_> = network.rpc_templates.iter().collect();
                quote! { vec![#(#templates),*] }
            };

            let native_currency = if let Some(currency) = &network.native_currency {
                let currency_name = &currency.name;
                let currency_symbol = &currency.symbol;
                let decimals = currency.decimals;
                quote! {
                    Some(NativeCurrency {
                        name: #currency_name.to_string(),
                        symbol: #currency_symbol.to_string(),
                        decimals: #decimals,
                    })
                }
            } else {
                quote! { None }
            };

            let explorers = if network.block_explorer_urls.is_empty() {
                quote! { vec![] }
            } else {
                let urls: Vec<_> = network.block_explorer_urls.iter().collect();
                quote! { vec![#(#urls),*] }
            };

            quote! {
                Self::#name_ident => NetworkDefinition {
                    id: #id,
                    name: #name_str,
                    rpc_templates: #rpc_templates,
                    native_currency: #native_currency,
                    block_explorer_urls: #explorers,
                }
            }
        })
        .collect::<Vec<_>>();

    let try_from_arms = network_data
        .iter()
        .map(|network| {
            let name_ident = format_ident!("{}", network.variant);
            let id = network.id;

            quote! {
                #id => Ok(Self::#name_ident),
            }
        })
        .collect::<Vec<_>>();

    let generated_code = quote! {
        use crate::schema::NativeCurrency;
        use alloy_primitives::{ChainId, U256};
        use serde::{de, Deserialize, Deserializer};
        use strum_macros::EnumIter;
        use thiserror::Error;

        #[doc = r" Compile-time network definition taken from networks.json."]
        #[doc = r""]
        #[doc = r" RPC entries are templates; placeholders are filled from provider keys"]
        #[doc = r" when a registry is built."]
        #[derive(Debug, Clone)]
        pub struct NetworkDefinition {
            pub id: ChainId,
            pub name: &'static str,
            pub rpc_templates: Vec<&'static str>,
            pub native_currency: Option<NativeCurrency>,
            pub block_explorer_urls: Vec<&'static str>,
        }

        #[doc = r" The networks bundled with this crate, ordered by chain id."]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter)]
        pub enum Network {
            #enum_variants
        }

        impl Network {
            /// Returns the network definition
            pub fn definition(&self) -> NetworkDefinition {
                match self {
                    #(#definition_entries),*
                }
            }

            /// Returns the numerical ID of this network.
            pub fn id(&self) -> ChainId {
                self.definition().id
            }

            /// Returns the display name of this network.
            pub fn name(&self) -> &'static str {
                self.definition().name
            }

            /// Returns the unrendered RPC URL templates.
            pub fn rpc_templates(&self) -> Vec<&'static str> {
                self.definition().rpc_templates
            }

            /// Whether the network carries native currency and explorer metadata.
            pub fn is_extended(&self) -> bool {
                self.definition().native_currency.is_some()
            }
        }

        impl TryFrom<u64> for Network {
            type Error = NetworkNotSupported;

            /// Initializes `Network` from a chain ID, returns error if the chain id is not bundled
            fn try_from(value: u64) -> Result<Self, Self::Error> {
                match value {
                    #(#try_from_arms)*
                    _ => Err(NetworkNotSupported),
                }
            }
        }

        impl TryFrom<U256> for Network {
            type Error = NetworkNotSupported;

            /// Initializes `Network` from a chain ID, returns error if the chain id is not bundled
            fn try_from(value: U256) -> Result<Self, Self::Error> {
                match u64::try_from(value) {
                    Ok(id) => Self::try_from(id),
                    Err(_) => Err(NetworkNotSupported),
                }
            }
        }

        impl<'de> Deserialize<'de> for Network {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                struct NetworkVisitor;

                impl de::Visitor<'_> for NetworkVisitor {
                    type Value = Network;

                    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                        formatter.write_str("a u64 or a string")
                    }

                    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
                    where
                        E: de::Error,
                    {
                        Network::try_from(value).map_err(E::custom)
                    }

                    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
                    where
                        E: de::Error,
                    {
                        Network::try_from(value.parse::<u64>().map_err(E::custom)?).map_err(E::custom)
                    }
                }

                deserializer.deserialize_any(NetworkVisitor)
            }
        }

        #[doc = r" Error indicating that a chain ID has no bundled network definition."]
        #[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
        #[error("network not supported")]
        pub struct NetworkNotSupported;
    };

    generated_code.to_string()
}

// Validates the records and derives the code generation data
fn get_networks(records: &[NetworkRecord]) -> Vec<NetworkData> {
    // Fixed variant names for networks whose display name does not make a good identifier
    let default_names = HashMap::from([
        (1, "Mainnet"),
        (5, "Goerli"),
        (137, "Polygon"),
        (80001, "PolygonMumbai"),
    ]);

    let mut seen_ids = HashSet::new();
    let mut seen_variants = HashSet::new();

    records
        .iter()
        .map(|record| {
            if record.chain_id == 0 {
                panic!("networks.json: chain id 0 is not allowed ({})", record.name);
            }
            if !seen_ids.insert(record.chain_id) {
                panic!("networks.json: duplicate chain id {}", record.chain_id);
            }
            if record.native_currency.is_none() && !record.block_explorer_urls.is_empty() {
                panic!(
                    "networks.json: chain {} lists explorers without a native currency",
                    record.chain_id
                );
            }
            for template in &record.rpc {
                check_placeholders(record.chain_id, template);
            }

            let variant = default_names
                .get(&record.chain_id)
                .map(|s| s.to_string())
                .unwrap_or_else(|| sanitize_enum_name(&record.name, record.chain_id));
            if !seen_variants.insert(variant.clone()) {
                panic!("networks.json: variant name {variant} generated twice");
            }

            NetworkData {
                id: record.chain_id,
                variant,
                name_str: record.name.clone(),
                rpc_templates: record.rpc.clone(),
                native_currency: record.native_currency.clone(),
                block_explorer_urls: record.block_explorer_urls.clone(),
            }
        })
        .collect::<Vec<NetworkData>>()
}

fn check_placeholders(chain_id: u64, template: &str) {
    let mut rest = template;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let end = after.find('}').unwrap_or_else(|| {
            panic!("networks.json: unterminated placeholder in {template} (chain {chain_id})")
        });
        let name = &after[..end];
        if !KNOWN_PLACEHOLDERS.contains(&name) {
            panic!("networks.json: unknown placeholder ${{{name}}} in {template} (chain {chain_id})");
        }
        rest = &after[end + 1..];
    }
}

fn sanitize_enum_name(name: &str, chain_id: u64) -> String {
    let mut filtered: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    filtered = filtered
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            }
        })
        .collect();

    if filtered.is_empty() || !filtered.chars().next().unwrap().is_ascii_alphabetic() {
        format!("Chain{chain_id}")
    } else {
        filtered
    }
}

/// Formats the generated code with syn and prettyplease, falling back to the raw tokens.
fn format_rust_code(code: &str) -> String {
    match syn::parse_file(code) {
        Ok(file) => prettyplease::unparse(&file),
        Err(_) => code.to_string(),
    }
}
