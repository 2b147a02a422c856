use kitchenkit_core::QualityTier;
use kitchenkit_settings::{Config, SettingsError};
use tempfile::TempDir;

#[test]
fn test_toml_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::new();
    config.layout.max_zoom = 3.0;
    config.pricing.default_tier = QualityTier::Started;
    config.storage.data_dir = dir.path().join("data");
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut config = Config::new();
    config.layout.grid_step = 5;
    config.save_to_file(&path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("\"grid_step\": 5"));
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_load_or_default_when_missing() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    std::fs::write(&path, "[layout]\ngrid_step = -5\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::Config(_))
    ));

    std::fs::write(&path, "[storage]\ndata_dir = \"\"\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::InvalidSetting { key, .. }) if key == "storage.data_dir"
    ));

    std::fs::write(&path, "[layout\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}
