//! Wallet connector capability interface.
//!
//! The connectors themselves (injected providers, WalletConnect sessions, Safe
//! apps) live outside this crate. The selector only sees them through
//! [`Connector`] and only branches on their [`Capability`].

use crate::eip::{AddChainParameter, AddChainRequest};
use alloy_primitives::ChainId;
use async_trait::async_trait;
use strum_macros::{AsRefStr, Display, EnumIter};
use thiserror::Error;

/// Concrete connector families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
pub enum ConnectorKind {
    #[strum(serialize = "MetaMask")]
    MetaMask,
    #[strum(serialize = "WalletConnect")]
    WalletConnect,
    #[strum(serialize = "Coinbase Wallet")]
    CoinbaseWallet,
    #[strum(serialize = "Network")]
    Network,
    #[strum(serialize = "Gnosis Safe")]
    GnosisSafe,
}

impl ConnectorKind {
    pub fn capability(self) -> Capability {
        match self {
            Self::GnosisSafe => Capability::FixedAccount,
            Self::WalletConnect | Self::Network => Capability::IdentifierOnly,
            Self::MetaMask | Self::CoinbaseWallet => Capability::FullMetadata,
        }
    }

    /// Read-only connectors serve RPC themselves, so only chains with a URL are selectable.
    pub fn requires_rpc_urls(self) -> bool {
        matches!(self, Self::Network)
    }
}

/// Which activation arguments a connector accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Capability {
    /// Single fixed account and network; activation takes no argument.
    FixedAccount,
    /// Accepts a bare chain id or nothing.
    IdentifierOnly,
    /// Needs full add-chain parameters for chains the wallet may not know.
    FullMetadata,
}

/// Argument passed to [`Connector::activate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// Connect without asking for a particular chain.
    Unspecified,
    ChainId(ChainId),
    AddChain(AddChainRequest),
}

impl Activation {
    pub fn chain_id(&self) -> Option<ChainId> {
        match self {
            Self::Unspecified => None,
            Self::ChainId(id) => Some(*id),
            Self::AddChain(request) => Some(request.chain_id),
        }
    }
}

impl From<AddChainParameter> for Activation {
    fn from(parameter: AddChainParameter) -> Self {
        match parameter {
            AddChainParameter::ChainId(id) => Self::ChainId(id),
            AddChainParameter::AddChain(request) => Self::AddChain(request),
        }
    }
}

/// Failure reported by a connector, in EIP-1193 `ProviderRpcError` form.
///
/// Stored as-is by the selector; never classified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ConnectorError {
    pub code: Option<i64>,
    pub message: String,
}

impl ConnectorError {
    /// EIP-1193 code for a request the user declined.
    pub const USER_REJECTED: i64 = 4001;

    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: i64, message: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            message: message.into(),
        }
    }

    pub fn user_rejected() -> Self {
        Self::with_code(Self::USER_REJECTED, "User rejected the request.")
    }
}

/// Optional capability to drop a session on the wallet side.
#[async_trait]
pub trait Deactivate: Send + Sync {
    async fn deactivate(&self) -> Result<(), ConnectorError>;
}

#[async_trait]
pub trait Connector: Send + Sync {
    fn kind(&self) -> ConnectorKind;

    fn capability(&self) -> Capability {
        self.kind().capability()
    }

    fn requires_rpc_urls(&self) -> bool {
        self.kind().requires_rpc_urls()
    }

    async fn activate(&self, activation: Activation) -> Result<(), ConnectorError>;

    /// Returns the deactivation capability if the connector has one.
    fn deactivator(&self) -> Option<&dyn Deactivate> {
        None
    }

    /// Forget local connection state; always available.
    fn reset_state(&self);
}
