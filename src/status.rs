//! Human readable connection status and chain label.

use crate::connector::ConnectorError;
use crate::registry::ChainRegistry;
use crate::selector::ConnectorState;
use alloy_primitives::ChainId;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Errored(String),
    Activating,
    Active,
    Idle,
}

impl ConnectionStatus {
    /// An error wins over every flag, then activating, then active.
    pub fn from_state(state: &ConnectorState, error: Option<&ConnectorError>) -> Self {
        if let Some(error) = error {
            Self::Errored(error.message.clone())
        } else if state.is_activating {
            Self::Activating
        } else if state.is_active {
            Self::Active
        } else {
            Self::Idle
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Errored(message) if message.is_empty() => f.write_str("Error"),
            Self::Errored(message) => write!(f, "Error: {message}"),
            Self::Activating => f.write_str("Connecting"),
            Self::Active => f.write_str("Connected"),
            Self::Idle => f.write_str("Disconnected"),
        }
    }
}

/// `"<name> (<id>)"` for the active chain, `None` when no chain is reported.
pub fn chain_label(registry: &ChainRegistry, chain_id: Option<ChainId>) -> Option<String> {
    let chain_id = chain_id?;
    let name = registry
        .get(chain_id)
        .map(|entry| entry.name())
        .unwrap_or("Unknown");
    Some(format!("{name} ({chain_id})"))
}
