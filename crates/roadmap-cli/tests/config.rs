use roadmap_cli::config::{
    CURRENT_VERSION, RoadmapConfig, load_config, migrate, resolve_path, save_config,
};
use std::path::{Path, PathBuf};

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn v0_config_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        dir.path(),
        "config.json",
        r#"{"template": "custom.md", "top_risk_count": 2}"#,
    );

    let config = load_config(&path).unwrap();
    assert_eq!(config.config_version, CURRENT_VERSION);
    assert_eq!(config.template_path, Some(PathBuf::from("custom.md")));
    assert_eq!(config.top_risk_count, 2);
    assert!(!config.json_logs);
}

#[test]
fn migration_keeps_an_explicit_template_path() {
    let json = serde_json::json!({"template": "old.md", "template_path": "new.md"});
    let migrated = migrate(json, 0).unwrap();
    assert_eq!(migrated["template_path"], "new.md");
    assert_eq!(migrated["config_version"], 1);
    assert!(migrated.get("template").is_none());
}

#[test]
fn newer_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "config.json", r#"{"config_version": 99}"#);

    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("newer than this build supports"));
}

#[test]
fn missing_fields_take_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "config.json", r#"{"config_version": 1}"#);

    assert_eq!(load_config(&path).unwrap(), RoadmapConfig::default());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.json");
    let config = RoadmapConfig {
        config_version: 0,
        rule_catalog_path: Some(PathBuf::from("rules.json")),
        top_risk_count: 4,
        json_logs: true,
        ..RoadmapConfig::default()
    };

    save_config(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap();

    assert_eq!(loaded.config_version, CURRENT_VERSION);
    assert_eq!(loaded.rule_catalog_path, config.rule_catalog_path);
    assert_eq!(loaded.top_risk_count, 4);
    assert!(loaded.json_logs);
    assert!(!dir.path().join("nested").join("config.json.tmp").exists());
}

#[cfg(unix)]
#[test]
fn saved_config_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    save_config(&path, &RoadmapConfig::default()).unwrap();

    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn relative_paths_resolve_against_the_config_dir() {
    let base = Path::new("/etc/roadmap");
    assert_eq!(
        resolve_path(Path::new("rules.json"), Some(base)),
        PathBuf::from("/etc/roadmap/rules.json")
    );
    assert_eq!(
        resolve_path(Path::new("/abs/rules.json"), Some(base)),
        PathBuf::from("/abs/rules.json")
    );
    assert_eq!(
        resolve_path(Path::new("rules.json"), None),
        PathBuf::from("rules.json")
    );
}

#[test]
fn registries_load_from_configured_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "roadmap.md", "Hello {{first-name}}\n");
    write(dir.path(), "weights.json", r#"{"hh-stroke": [0, 0, 2, 0, 0, 0]}"#);
    let config = RoadmapConfig {
        template_path: Some(PathBuf::from("roadmap.md")),
        risk_weights_path: Some(PathBuf::from("weights.json")),
        ..RoadmapConfig::default()
    };

    let registries = config.load_registries(Some(dir.path())).unwrap();
    assert!(registries.template.rule_ids().is_empty());
    assert_eq!(
        registries.template.placeholders().into_iter().collect::<Vec<_>>(),
        ["first-name"]
    );
    assert_eq!(registries.weights.len(), 1);
    assert!(!registries.catalog.is_empty());
}

#[test]
fn missing_registry_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = RoadmapConfig {
        canonical_registry_path: Some(PathBuf::from("absent.json")),
        ..RoadmapConfig::default()
    };

    let err = config.load_registries(Some(dir.path())).unwrap_err();
    assert!(err.to_string().contains("absent.json"));
}
