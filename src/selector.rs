//! Headless chain picker and connect / disconnect button.
//!
//! [`ConnectionSelector`] owns only the desired chain and the last activation
//! error. Everything else (active chain, activating and active flags) belongs to
//! the connector and is passed in as a [`ConnectorState`] snapshot on each call.
//!
//! Activation failures never surface as `Err`; they are kept as selector state and
//! show up in [`SelectorView`] until the next successful activation.

use crate::connector::{Activation, Capability, Connector, ConnectorError};
use crate::registry::ChainRegistry;
use crate::status::ConnectionStatus;
use alloy_primitives::ChainId;
use strum_macros::Display;
use tracing::{debug, warn};

/// Chain a read-only connector starts on.
pub const DEFAULT_NETWORK_CHAIN_ID: ChainId = 1;

/// Connector owned status flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectorState {
    pub chain_id: Option<ChainId>,
    pub is_activating: bool,
    pub is_active: bool,
}

/// Chain requested through the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DesiredChain {
    /// No specific chain; let the wallet pick.
    Default,
    Specific(ChainId),
}

impl DesiredChain {
    /// Picker value of [`DesiredChain::Default`].
    pub const DEFAULT_SELECT_VALUE: i64 = -1;

    /// Negative values are the default sentinel.
    pub fn from_select_value(value: i64) -> Self {
        u64::try_from(value)
            .map(Self::Specific)
            .unwrap_or(Self::Default)
    }

    pub fn select_value(self) -> i64 {
        match self {
            Self::Default => Self::DEFAULT_SELECT_VALUE,
            Self::Specific(id) => i64::try_from(id).unwrap_or(i64::MAX),
        }
    }

    pub fn chain_id(self) -> Option<ChainId> {
        match self {
            Self::Default => None,
            Self::Specific(id) => Some(id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Action {
    #[strum(serialize = "Connect")]
    Connect,
    #[strum(serialize = "Try Again?")]
    TryAgain,
    #[strum(serialize = "Disconnect")]
    Disconnect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionButton {
    pub action: Action,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainOption {
    pub value: DesiredChain,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSelectView {
    pub value: DesiredChain,
    pub options: Vec<ChainOption>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorView {
    pub status: ConnectionStatus,
    /// `None` for connectors without a chain concept.
    pub chain_select: Option<ChainSelectView>,
    pub action: ActionButton,
}

pub struct ConnectionSelector<'a, C: ?Sized> {
    connector: &'a C,
    registry: &'a ChainRegistry,
    desired: DesiredChain,
    error: Option<ConnectorError>,
}

impl<'a, C> ConnectionSelector<'a, C>
where
    C: Connector + ?Sized,
{
    pub fn new(connector: &'a C, registry: &'a ChainRegistry) -> Self {
        let desired = if connector.requires_rpc_urls() {
            DesiredChain::Specific(DEFAULT_NETWORK_CHAIN_ID)
        } else {
            DesiredChain::Default
        };
        Self {
            connector,
            registry,
            desired,
            error: None,
        }
    }

    pub fn desired(&self) -> DesiredChain {
        self.desired
    }

    /// Last activation failure, if the most recent attempt failed.
    pub fn error(&self) -> Option<&ConnectorError> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Chains offered by the picker: all registry chains, or only those with an
    /// RPC URL for connectors that serve RPC themselves.
    pub fn chain_ids(&self) -> Vec<ChainId> {
        if self.connector.requires_rpc_urls() {
            self.registry.urls().chain_ids().collect()
        } else {
            self.registry.chain_ids().collect()
        }
    }

    /// Activation argument for `desired` under the connector's capability class.
    ///
    /// Fixed-account connectors always get [`Activation::Unspecified`], from the picker too.
    pub fn activation_for(&self, desired: DesiredChain) -> Activation {
        match (self.connector.capability(), desired) {
            (Capability::FixedAccount, _) | (_, DesiredChain::Default) => Activation::Unspecified,
            (Capability::IdentifierOnly, DesiredChain::Specific(id)) => Activation::ChainId(id),
            (Capability::FullMetadata, DesiredChain::Specific(id)) => {
                self.registry.resolve_add_chain_parameter(id).into()
            }
        }
    }

    /// Picker change handler.
    pub async fn switch_chain(&mut self, requested: DesiredChain, state: &ConnectorState) {
        self.desired = requested;

        if requested.chain_id().is_some() && requested.chain_id() == state.chain_id {
            debug!(chain_id = ?state.chain_id, "already on requested chain");
            self.error = None;
            return;
        }
        // Connected to some chain and only the default was asked for.
        if requested == DesiredChain::Default && state.chain_id.is_some() {
            debug!(chain_id = ?state.chain_id, "default chain requested while connected");
            self.error = None;
            return;
        }

        let activation = self.activation_for(requested);
        self.activate(activation).await;
    }

    /// Connect / Try Again handler.
    pub async fn connect(&mut self) {
        self.error = None;
        let activation = self.activation_for(self.desired);
        self.activate(activation).await;
    }

    /// Disconnect handler: deactivate when the connector can, reset otherwise.
    pub async fn disconnect(&self) {
        match self.connector.deactivator() {
            Some(deactivator) => {
                if let Err(err) = deactivator.deactivate().await {
                    warn!(connector = %self.connector.kind(), %err, "deactivation failed");
                }
            }
            None => {
                debug!(connector = %self.connector.kind(), "resetting connector state");
                self.connector.reset_state();
            }
        }
    }

    /// Runs whatever the action button currently shows; a disabled button does nothing.
    pub async fn press_action(&mut self, state: &ConnectorState) {
        let button = self.action_button(state);
        if !button.enabled {
            return;
        }
        match button.action {
            Action::Connect | Action::TryAgain => self.connect().await,
            Action::Disconnect => self.disconnect().await,
        }
    }

    pub fn view(&self, state: &ConnectorState) -> SelectorView {
        SelectorView {
            status: ConnectionStatus::from_state(state, self.error.as_ref()),
            chain_select: self.chain_select(state),
            action: self.action_button(state),
        }
    }

    fn action_button(&self, state: &ConnectorState) -> ActionButton {
        if self.error.is_some() {
            ActionButton {
                action: Action::TryAgain,
                enabled: true,
            }
        } else if state.is_active {
            ActionButton {
                action: Action::Disconnect,
                enabled: true,
            }
        } else {
            ActionButton {
                action: Action::Connect,
                enabled: !state.is_activating,
            }
        }
    }

    /// While active with a specific desired chain the picker follows the connector's
    /// chain id; if the connector reports none, the desired chain is shown instead.
    fn chain_select(&self, state: &ConnectorState) -> Option<ChainSelectView> {
        if self.connector.capability() == Capability::FixedAccount {
            return None;
        }

        let mut options = Vec::new();
        if !self.connector.requires_rpc_urls() {
            options.push(ChainOption {
                value: DesiredChain::Default,
                label: "Default Chain".to_string(),
            });
        }
        options.extend(self.chain_ids().into_iter().map(|id| ChainOption {
            value: DesiredChain::Specific(id),
            label: self.registry.display_name(id),
        }));

        let (value, enabled) = if self.error.is_some() {
            (self.desired, true)
        } else if state.is_active {
            let value = match (self.desired, state.chain_id) {
                (DesiredChain::Default, _) | (_, None) => self.desired,
                (DesiredChain::Specific(_), Some(active)) => DesiredChain::Specific(active),
            };
            (value, true)
        } else {
            (self.desired, !state.is_activating)
        };

        Some(ChainSelectView {
            value,
            options,
            enabled,
        })
    }

    async fn activate(&mut self, activation: Activation) {
        debug!(
            connector = %self.connector.kind(),
            chain_id = ?activation.chain_id(),
            "activating connector"
        );
        match self.connector.activate(activation).await {
            Ok(()) => self.error = None,
            Err(err) => {
                warn!(connector = %self.connector.kind(), %err, "activation failed");
                self.error = Some(err);
            }
        }
    }
}
