mod common;

use common::fixture_path;
use monitor_core::config::MONITOR_CONFIG_ENV;
use monitor_core::load_monitor_config_from_env;

// Single test in this binary so the environment variable is not shared.
#[test]
fn env_override_then_fallback() {
    std::env::set_var(MONITOR_CONFIG_ENV, fixture_path("test_monitor_config.json"));
    let (config, path) = load_monitor_config_from_env();
    assert_eq!(config.seed, Some(20240917));
    assert!(path.is_some());

    std::env::set_var(MONITOR_CONFIG_ENV, fixture_path("missing.json"));
    let (config, path) = load_monitor_config_from_env();
    assert_eq!(config.seed, None);
    assert!(path.is_none());

    std::env::remove_var(MONITOR_CONFIG_ENV);
    let (config, path) = load_monitor_config_from_env();
    assert!(!config.auto_start);
    assert!(path.is_none());
}
