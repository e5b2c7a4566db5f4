// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and non-zero token budgets.

use crate::diagnostic::ConfigError;
use crate::model::SwitchboardConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &SwitchboardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.server.log_level
            ),
        });
    }

    if config.openai.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.base_url must not be empty".to_string(),
        });
    }

    if config.openai.default_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.default_model must not be empty".to_string(),
        });
    }

    if config.openai.max_output_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "openai.max_output_tokens must be greater than zero".to_string(),
        });
    }

    if let Some(forced) = &config.routing.force_model
        && forced.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "routing.force_model must not be empty when set".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = SwitchboardConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_host_fails_validation() {
        let mut config = SwitchboardConfig::default();
        config.server.host = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("server.host"))));
    }

    #[test]
    fn bad_log_level_fails_validation() {
        let mut config = SwitchboardConfig::default();
        config.server.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))));
    }

    #[test]
    fn zero_max_output_tokens_fails_validation() {
        let mut config = SwitchboardConfig::default();
        config.openai.max_output_tokens = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("max_output_tokens"))));
    }

    #[test]
    fn empty_force_model_fails_validation() {
        let mut config = SwitchboardConfig::default();
        config.routing.force_model = Some("  ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("force_model"))));
    }

    #[test]
    fn multiple_errors_collected() {
        let mut config = SwitchboardConfig::default();
        config.server.host = "".to_string();
        config.openai.max_output_tokens = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.len() >= 2, "expected all errors, got {}", errors.len());
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = SwitchboardConfig::default();
        config.server.host = "0.0.0.0".to_string();
        config.server.port = 8080;
        config.routing.force_model = Some("gpt-4o".to_string());
        assert!(validate_config(&config).is_ok());
    }
}
