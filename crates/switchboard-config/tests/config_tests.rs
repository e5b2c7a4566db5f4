// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Switchboard configuration system.

use switchboard_config::diagnostic::{suggest_key, ConfigError};
use switchboard_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_switchboard_config() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080
log_level = "debug"

[openai]
api_key = "sk-test-123"
base_url = "https://api.openai.example/v1"
default_model = "gpt-4.5-preview"
max_output_tokens = 2048
store = false

[routing]
enabled = false
force_model = "gpt-4o"

[tools]
weather_enabled = false
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.log_level, "debug");
    assert_eq!(config.openai.api_key.as_deref(), Some("sk-test-123"));
    assert_eq!(config.openai.base_url, "https://api.openai.example/v1");
    assert_eq!(config.openai.default_model, "gpt-4.5-preview");
    assert_eq!(config.openai.max_output_tokens, 2048);
    assert!(!config.openai.store);
    assert!(!config.routing.enabled);
    assert_eq!(config.routing.force_model.as_deref(), Some("gpt-4o"));
    assert!(!config.tools.weather_enabled);
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3100);
    assert_eq!(config.server.log_level, "info");
    assert!(config.openai.api_key.is_none());
    assert_eq!(config.openai.base_url, "https://api.openai.com/v1");
    assert_eq!(config.openai.default_model, "gpt-4o");
    assert_eq!(config.openai.max_output_tokens, 4096);
    assert!(config.openai.store);
    assert!(config.routing.enabled);
    assert!(config.routing.force_model.is_none());
    assert!(config.tools.weather_enabled);
}

/// Unknown field in [server] section produces an error.
#[test]
fn unknown_field_in_server_produces_error() {
    let toml = r#"
[server]
prot = 8080
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("prot"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unknown field in [openai] section produces an error.
#[test]
fn unknown_field_in_openai_produces_error() {
    let toml = r#"
[openai]
api_kye = "sk-oops"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("api_kye"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// load_and_validate_str surfaces unknown keys as UnknownKey diagnostics
/// with a fuzzy suggestion.
#[test]
fn unknown_key_diagnostic_carries_suggestion() {
    let errors =
        load_and_validate_str("[server]\nprot = 8080\n").expect_err("should produce diagnostics");

    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey { key, suggestion, .. } => Some((key, suggestion)),
            _ => None,
        })
        .expect("expected an UnknownKey diagnostic");

    assert_eq!(unknown.0, "prot");
    assert_eq!(unknown.1.as_deref(), Some("port"));
}

/// Validation errors surface through load_and_validate_str.
#[test]
fn validation_errors_surface() {
    let errors = load_and_validate_str(
        r#"
[openai]
max_output_tokens = 0
"#,
    )
    .expect_err("zero token budget should fail validation");

    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("max_output_tokens"))
    ));
}

/// Wrong value type produces an InvalidType-shaped error.
#[test]
fn wrong_type_produces_error() {
    let toml = r#"
[server]
port = "not-a-number"
"#;

    let err = load_config_from_str(toml).expect_err("should reject wrong type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("expected"),
        "error should mention the type mismatch, got: {err_str}"
    );
}

/// suggest_key is usable directly for tooling.
#[test]
fn suggest_key_finds_close_match() {
    assert_eq!(
        suggest_key("weather_enbled", &["weather_enabled"]),
        Some("weather_enabled".to_string())
    );
}
