//! Schema validation (no filesystem checks).
//!
//! Glob syntax itself is checked when `tlint-core` compiles the patterns.

use crate::config::TlintConfig;
use crate::error::{ConfigError, Result};

pub fn validate(config: &TlintConfig) -> Result<()> {
    let modules = &config.context.modules;
    for (field, value) in [
        ("context.modules.workflow", &modules.workflow),
        ("context.modules.activity", &modules.activity),
        ("context.modules.worker", &modules.worker),
        ("context.modules.client", &modules.client),
        ("context.modules.testing", &modules.testing),
        ("context.modules.shared", &modules.shared),
        ("context.modules.worker_entry_symbol", &modules.worker_entry_symbol),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::SchemaValidation {
                message: format!("{field} cannot be empty"),
                hint: Some("Remove the override to use the built-in default".to_string()),
            });
        }
    }

    let paths = &config.context.paths;
    for (field, list) in [
        ("context.paths.test", &paths.test),
        ("context.paths.workflow", &paths.workflow),
        ("context.paths.activity", &paths.activity),
        ("context.paths.worker", &paths.worker),
        ("context.paths.client", &paths.client),
    ] {
        if list.iter().any(|pattern| pattern.trim().is_empty()) {
            return Err(ConfigError::SchemaValidation {
                message: format!("{field} contains an empty pattern"),
                hint: Some("Remove empty strings from the pattern list".to_string()),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        validate(&TlintConfig::default()).unwrap();
    }

    #[test]
    fn empty_module_source_is_rejected() {
        let mut config = TlintConfig::default();
        config.context.modules.client = "  ".to_string();

        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("context.modules.client"));
    }

    #[test]
    fn empty_pattern_is_rejected() {
        let mut config = TlintConfig::default();
        config.context.paths.worker.push(String::new());

        assert!(matches!(
            validate(&config),
            Err(ConfigError::SchemaValidation { .. })
        ));
    }

    #[test]
    fn empty_pattern_list_is_allowed() {
        let mut config = TlintConfig::default();
        config.context.paths.test.clear();
        validate(&config).unwrap();
    }
}
