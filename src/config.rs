//! Driver configuration.
//!
//! Read from `config.toml` in the platform config directory unless a path
//! is given on the command line. A broken or missing file never stops the
//! driver: problems are reported as warnings and defaults are used.

use directories::ProjectDirs;
use serde::Deserialize;
use sheetforge_engine::EngineConfig;
use std::path::PathBuf;

const MAX_CONFIG_FILE_BYTES: u64 = 1024 * 1024;

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub log: LogConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Tracing filter directive, e.g. `"sheetforge_engine=debug"`
    pub filter: Option<String>,
}

pub(crate) fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("dev", "sheetforge", "sheetforge")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}

/// Load the driver configuration.
///
/// `config_file` overrides the default location. With `no_config` nothing
/// is read. Returns the configuration and any warnings collected on the way.
pub fn load_config(config_file: Option<&PathBuf>, no_config: bool) -> (AppConfig, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    if no_config {
        return (AppConfig::default(), warnings);
    }

    let Some(path) = config_file.cloned().or_else(user_config_path) else {
        return (AppConfig::default(), warnings);
    };
    if !path.exists() {
        if config_file.is_some() {
            warnings.push(format!("Config file not found: {}", path.display()));
        }
        return (AppConfig::default(), warnings);
    }

    let mut config = match std::fs::metadata(&path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            return (AppConfig::default(), warnings);
        }
        Ok(_) => match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    return (AppConfig::default(), warnings);
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                return (AppConfig::default(), warnings);
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            return (AppConfig::default(), warnings);
        }
    };

    if let Err(err) = config.engine.validate() {
        warnings.push(format!(
            "Ignoring [engine] in {}: {}",
            path.display(),
            err
        ));
        config.engine = EngineConfig::default();
    }

    (config, warnings)
}
