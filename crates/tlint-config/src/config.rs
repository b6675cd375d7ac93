//! Top-level configuration and layered loading.
//!
//! Sources are merged with figment, later sources winning:
//! built-in defaults, then programmatic overrides, then `TLINT_` environment
//! variables (`__` separates nesting levels).

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::ContextConfig;
use crate::error::{ConfigError, Result as ConfigResult};
use crate::settings::GlobalSettings;

/// Environment variable prefix for overrides, e.g.
/// `TLINT_CONTEXT__MODULES__WORKFLOW=@acme/workflow`.
pub const ENV_PREFIX: &str = "TLINT_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TlintConfig {
    #[serde(default)]
    pub context: ContextConfig,

    #[serde(default)]
    pub settings: GlobalSettings,
}

impl TlintConfig {
    /// Figment holding the built-in defaults merged with the environment.
    ///
    /// Callers that want extra providers (a TOML string, a serialized
    /// override) merge them onto this and pass the result to
    /// [`TlintConfig::from_figment`].
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Load defaults overlaid with `TLINT_` environment variables.
    pub fn load() -> ConfigResult<Self> {
        Self::from_figment(Self::figment())
    }

    /// Extract and validate a configuration from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> ConfigResult<Self> {
        let config: TlintConfig = figment.extract()?;
        crate::validation::validate(&config)?;
        tracing::trace!(
            workflow = %config.context.modules.workflow,
            "loaded tlint configuration"
        );
        Ok(config)
    }

    /// Create from serde_json::Value (for programmatic config).
    ///
    /// Missing fields keep their defaults.
    ///
    /// # Example
    ///
    /// ```
    /// use tlint_config::TlintConfig;
    /// use serde_json::json;
    ///
    /// let config = TlintConfig::from_value(json!({
    ///     "context": { "modules": { "workflow": "@acme/workflow" } }
    /// }))
    /// .unwrap();
    /// assert_eq!(config.context.modules.workflow, "@acme/workflow");
    /// assert_eq!(config.context.modules.activity, "@temporalio/activity");
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        let config: TlintConfig =
            serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
                field: "config".to_string(),
                hint: Some(e.to_string()),
            })?;
        crate::validation::validate(&config)?;
        Ok(config)
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }
}
