//! Print the registry and its URL index for the keys found in the environment.

use chain_select::{ChainRegistry, ProviderKeys};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let keys = ProviderKeys::from_env()?;
    let registry = ChainRegistry::new(&keys);
    println!("Total chains: {}", registry.len());

    for (chain_id, entry) in registry.iter() {
        let kind = if entry.is_extended() { "extended" } else { "basic" };
        println!(
            "{} (id {chain_id}, {kind}) rpc urls: {}",
            entry.name(),
            entry.urls().len()
        );
    }

    let index = registry.urls();
    let ids = index
        .chain_ids()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!("Chains with at least one RPC URL ({}): [{ids}]", index.len());

    Ok(())
}
