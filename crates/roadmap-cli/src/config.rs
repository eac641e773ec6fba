use std::path::{Path, PathBuf};

use roadmap_engine::Registries;
use roadmap_engine::roadmap::DEFAULT_TOP_RISK_COUNT;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
pub const CURRENT_VERSION: u32 = 1;

const FILE_NAME: &str = "config.json";

fn default_top_risk_count() -> usize {
    DEFAULT_TOP_RISK_COUNT
}

/// Host configuration. Every registry path is optional; a missing one
/// keeps the built-in table. Relative paths resolve against the directory
/// holding the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_registry_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_catalog_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_weights_path: Option<PathBuf>,
    /// Added in v1; v0 files called this `template`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,
    #[serde(default = "default_top_risk_count")]
    pub top_risk_count: usize,
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            canonical_registry_path: None,
            rule_catalog_path: None,
            risk_weights_path: None,
            template_path: None,
            top_risk_count: DEFAULT_TOP_RISK_COUNT,
            json_logs: false,
        }
    }
}

pub fn default_config_path() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("roadmap").join(FILE_NAME))
}

/// Load the config at `path`, or the default location when `None`. A
/// missing file at the default location yields the default config.
pub fn load_or_default(path: Option<&Path>) -> eyre::Result<(RoadmapConfig, Option<PathBuf>)> {
    match path {
        Some(path) => Ok((load_config(path)?, Some(path.to_path_buf()))),
        None => {
            let path = default_config_path()?;
            if path.exists() {
                Ok((load_config(&path)?, Some(path)))
            } else {
                Ok((RoadmapConfig::default(), None))
            }
        }
    }
}

pub fn load_config(path: &Path) -> eyre::Result<RoadmapConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0);
    let on_disk_version = u32::try_from(on_disk_version)
        .map_err(|_| eyre::eyre!("config_version {on_disk_version} is out of range"))?;

    let migrated = migrate(json, on_disk_version)?;
    let config: RoadmapConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
///
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update roadmap."
        ));
    }

    // v0 → v1: `template` renamed to `template_path`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if let Some(template) = obj.remove("template") {
            obj.entry("template_path").or_insert(template);
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (renamed template to template_path)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &RoadmapConfig) -> eyre::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;
    let json = serde_json::to_string_pretty(&stamped)?;

    // Write to a temp file then rename for atomicity
    let mut tmp_path = path.as_os_str().to_owned();
    tmp_path.push(".tmp");
    let tmp_path = PathBuf::from(tmp_path);
    std::fs::write(&tmp_path, json.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// `path` joined onto `base` when relative.
pub fn resolve_path(path: &Path, base: Option<&Path>) -> PathBuf {
    match base {
        Some(base) if path.is_relative() => base.join(path),
        _ => path.to_path_buf(),
    }
}

impl RoadmapConfig {
    /// Load the registries this config names, relative to `base`.
    pub fn load_registries(&self, base: Option<&Path>) -> eyre::Result<Registries> {
        let read = |path: &Option<PathBuf>| -> eyre::Result<Option<String>> {
            let Some(path) = path else {
                return Ok(None);
            };
            let path = resolve_path(path, base);
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
            tracing::debug!(path = %path.display(), "registry source loaded");
            Ok(Some(contents))
        };

        let canonical = read(&self.canonical_registry_path)?;
        let catalog = read(&self.rule_catalog_path)?;
        let weights = read(&self.risk_weights_path)?;
        let template = read(&self.template_path)?;

        let registries = Registries::from_sources(
            canonical.as_deref(),
            catalog.as_deref(),
            weights.as_deref(),
            template.as_deref(),
        )?;
        Ok(registries)
    }
}
