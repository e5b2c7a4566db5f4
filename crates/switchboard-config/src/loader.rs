// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./switchboard.toml` >
//! `~/.config/switchboard/switchboard.toml` > `/etc/switchboard/switchboard.toml`
//! with environment variable overrides via the `SWITCHBOARD_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::SwitchboardConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/switchboard/switchboard.toml` (system-wide)
/// 3. `~/.config/switchboard/switchboard.toml` (user XDG config)
/// 4. `./switchboard.toml` (local directory)
/// 5. `SWITCHBOARD_*` environment variables
pub fn load_config() -> Result<SwitchboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SwitchboardConfig::default()))
        .merge(Toml::file("/etc/switchboard/switchboard.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("switchboard/switchboard.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("switchboard.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<SwitchboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SwitchboardConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<SwitchboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(SwitchboardConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `SWITCHBOARD_OPENAI_API_KEY` must map to
/// `openai.api_key`, not `openai.api.key`.
fn env_provider() -> Env {
    Env::prefixed("SWITCHBOARD_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: SWITCHBOARD_OPENAI_API_KEY -> "openai_api_key"
        let mapped = key
            .as_str()
            .replacen("server_", "server.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("routing_", "routing.", 1)
            .replacen("tools_", "tools.", 1);
        mapped.into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn defaults_load_without_any_file() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3100);
        assert_eq!(config.openai.default_model, "gpt-4o");
        assert!(config.routing.enabled);
    }

    #[test]
    fn toml_overrides_defaults() {
        let config = load_config_from_str(
            r#"
[server]
port = 8080

[openai]
default_model = "gpt-4.5-preview"
"#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.openai.default_model, "gpt-4.5-preview");
        // Untouched sections keep their defaults.
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.tools.weather_enabled);
    }

    #[test]
    #[serial]
    fn env_var_maps_underscore_keys() {
        // SAFETY: serialized test; no other thread reads the environment here.
        unsafe { std::env::set_var("SWITCHBOARD_OPENAI_API_KEY", "sk-test") };
        let config = Figment::new()
            .merge(Serialized::defaults(SwitchboardConfig::default()))
            .merge(env_provider())
            .extract::<SwitchboardConfig>()
            .unwrap();
        unsafe { std::env::remove_var("SWITCHBOARD_OPENAI_API_KEY") };

        assert_eq!(config.openai.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    #[serial]
    fn env_var_overrides_port() {
        unsafe { std::env::set_var("SWITCHBOARD_SERVER_PORT", "9000") };
        let config = Figment::new()
            .merge(Serialized::defaults(SwitchboardConfig::default()))
            .merge(env_provider())
            .extract::<SwitchboardConfig>()
            .unwrap();
        unsafe { std::env::remove_var("SWITCHBOARD_SERVER_PORT") };

        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = load_config_from_str(
            r#"
[server]
prot = 8080
"#,
        );
        assert!(result.is_err());
    }
}
