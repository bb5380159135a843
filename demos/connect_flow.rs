//! Drive the selector against an in-memory connector that rejects the first request.

use async_trait::async_trait;
use chain_select::{
    chain_label, Activation, ChainRegistry, ConnectionSelector, Connector, ConnectorError,
    ConnectorKind, ConnectorState, DesiredChain, ProviderKeys,
};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

struct DemoWallet {
    state: Mutex<ConnectorState>,
    rejected_once: Mutex<bool>,
}

impl DemoWallet {
    fn snapshot(&self) -> ConnectorState {
        *self.state.lock().unwrap()
    }
}

#[async_trait]
impl Connector for DemoWallet {
    fn kind(&self) -> ConnectorKind {
        ConnectorKind::MetaMask
    }

    async fn activate(&self, activation: Activation) -> Result<(), ConnectorError> {
        let mut rejected = self.rejected_once.lock().unwrap();
        if !*rejected {
            *rejected = true;
            return Err(ConnectorError::user_rejected());
        }
        if let Activation::AddChain(request) = &activation {
            println!("wallet_addEthereumChain {}", serde_json::to_string(&request.to_eip3085()).unwrap());
        }
        let mut state = self.state.lock().unwrap();
        state.is_active = true;
        state.chain_id = activation.chain_id().or(Some(1));
        Ok(())
    }

    fn reset_state(&self) {
        *self.state.lock().unwrap() = ConnectorState::default();
    }
}

fn print_view(selector: &ConnectionSelector<'_, DemoWallet>, wallet: &DemoWallet, registry: &ChainRegistry) {
    let state = wallet.snapshot();
    let view = selector.view(&state);
    println!(
        "[{}] chain: {} | button: {}",
        view.status,
        chain_label(registry, state.chain_id).unwrap_or_else(|| "-".to_string()),
        view.action.action
    );
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let registry = ChainRegistry::new(&ProviderKeys::default());
    let wallet = DemoWallet {
        state: Mutex::new(ConnectorState::default()),
        rejected_once: Mutex::new(false),
    };
    let mut selector = ConnectionSelector::new(&wallet, &registry);
    print_view(&selector, &wallet, &registry);

    selector.press_action(&wallet.snapshot()).await;
    print_view(&selector, &wallet, &registry);

    selector.press_action(&wallet.snapshot()).await;
    print_view(&selector, &wallet, &registry);

    selector
        .switch_chain(DesiredChain::Specific(137), &wallet.snapshot())
        .await;
    print_view(&selector, &wallet, &registry);

    selector.press_action(&wallet.snapshot()).await;
    print_view(&selector, &wallet, &registry);
}
