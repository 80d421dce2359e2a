use super::Config;

#[test]
fn test_defaults_from_empty_file() {
    let config = Config::from_toml("").unwrap();
    assert!(config.pretty_json);
    assert_eq!(config.log_filter, "warn");
    assert!(config.create_missing);
}

#[test]
fn test_overrides_keep_other_defaults() {
    let config = Config::from_toml("pretty_json = false\nlog_filter = \"inidoc=debug\"\n").unwrap();
    assert!(!config.pretty_json);
    assert_eq!(config.log_filter, "inidoc=debug");
    assert!(config.create_missing);
}

#[test]
fn test_invalid_toml_is_rejected() {
    assert!(Config::from_toml("pretty_json = \"maybe\"").is_none());
}
