//! Show wallet_addEthereumChain parameters for a chain id given on the command line.

use chain_select::{parse_chain_id, AddChainParameter, ChainRegistry, ProviderKeys, SwitchChainParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let chain_id = match std::env::args().nth(1) {
        Some(arg) => parse_chain_id(&arg)?,
        None => 137,
    };
    let registry = ChainRegistry::new(&ProviderKeys::from_env()?);

    match registry.resolve_add_chain_parameter(chain_id) {
        AddChainParameter::AddChain(request) => {
            let params = request.to_eip3085();
            println!("chainId: {}", params.chain_id);
            println!("chainName: {}", params.chain_name);
            println!(
                "nativeCurrency: {} ({}) decimals {}",
                params.native_currency.name,
                params.native_currency.symbol,
                params.native_currency.decimals
            );
            println!("rpcUrls: {}", params.rpc_urls.join(", "));
            println!("blockExplorerUrls: {}", params.block_explorer_urls.join(", "));
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        AddChainParameter::ChainId(id) => {
            println!(
                "{} needs no extra metadata; switch with {}",
                registry.display_name(id),
                serde_json::to_string(&SwitchChainParams::new(id))?
            );
        }
    }

    Ok(())
}
