// SPDX-License-Identifier: GPL-3.0-only

//! Integration tests for configuration module

use snapcam::config::AppConfig;

#[test]
fn test_config_default() {
    let config = AppConfig::default();

    assert_eq!(
        config.settle_delay_ms, 500,
        "Blackout settle delay should default to 500ms"
    );
    assert!(config.haptics_enabled, "Haptics should be on by default");
    assert!(
        config.library_dir.is_none(),
        "Library directory should default to the system pictures directory"
    );
}

#[test]
fn test_config_missing_fields_fall_back_to_defaults() {
    // An old or hand-edited file may omit fields
    let config: AppConfig = serde_json::from_str("{}").expect("empty object should parse");
    assert_eq!(config, AppConfig::default());

    let config: AppConfig =
        serde_json::from_str(r#"{"settle_delay_ms": 0}"#).expect("partial object should parse");
    assert_eq!(config.settle_delay_ms, 0);
    assert!(config.haptics_enabled);
}

#[test]
fn test_config_serialization_round_trip() {
    let config = AppConfig {
        settle_delay_ms: 250,
        haptics_enabled: false,
        library_dir: Some("/tmp/pics".into()),
    };

    let json = serde_json::to_string(&config).expect("config should serialize");
    let parsed: AppConfig = serde_json::from_str(&json).expect("config should parse back");
    assert_eq!(parsed, config);
}
