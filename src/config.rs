//! Provider API keys used to render RPC URL templates.

use serde::Deserialize;
use thiserror::Error;

/// Placeholder name for the Infura project key.
pub const INFURA_KEY: &str = "INFURA_KEY";
/// Placeholder name for the Alchemy API key.
pub const ALCHEMY_KEY: &str = "ALCHEMY_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] envy::Error),
}

/// Optional API keys for hosted RPC providers.
///
/// A missing or empty key drops every URL template that needs it; no placeholder
/// URL is ever produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderKeys {
    pub infura_key: Option<String>,
    pub alchemy_key: Option<String>,
}

/// Raw environment view; envy lowercases names, so `infuraKey` arrives as `infurakey`.
#[derive(Debug, Default, Deserialize)]
struct EnvKeys {
    #[serde(default)]
    infura_key: Option<String>,
    #[serde(default)]
    infurakey: Option<String>,
    #[serde(default)]
    alchemy_key: Option<String>,
    #[serde(default)]
    alchemykey: Option<String>,
}

impl From<EnvKeys> for ProviderKeys {
    /// `INFURA_KEY` / `ALCHEMY_KEY` win over the camelCase spellings unless empty.
    fn from(env: EnvKeys) -> Self {
        fn pick(primary: Option<String>, fallback: Option<String>) -> Option<String> {
            primary.filter(|v| !v.is_empty()).or(fallback)
        }
        Self {
            infura_key: pick(env.infura_key, env.infurakey),
            alchemy_key: pick(env.alchemy_key, env.alchemykey),
        }
    }
}

impl ProviderKeys {
    /// Reads `INFURA_KEY` and `ALCHEMY_KEY` (or `infuraKey` / `alchemyKey`) from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(envy::from_env::<EnvKeys>()?.into())
    }

    /// Same as [`ProviderKeys::from_env`] over arbitrary key/value pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::from_iter::<_, EnvKeys>(vars)?.into())
    }

    pub fn with_infura_key(mut self, key: impl Into<String>) -> Self {
        self.infura_key = Some(key.into());
        self
    }

    pub fn with_alchemy_key(mut self, key: impl Into<String>) -> Self {
        self.alchemy_key = Some(key.into());
        self
    }

    /// Value for a template placeholder; empty values count as absent.
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        let value = match placeholder {
            INFURA_KEY => self.infura_key.as_deref(),
            ALCHEMY_KEY => self.alchemy_key.as_deref(),
            _ => None,
        };
        value.filter(|v| !v.is_empty())
    }
}
