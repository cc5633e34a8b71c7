use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "langsync.toml";

/// Contents of `langsync.toml`.
///
/// ```toml
/// [sync]
/// targets = ["app/src/main/res/values-*/strings.xml"]
/// pace_ms = 50
/// strict = true
/// temp_file_name = ".tmp.xml"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sync: SyncSection,
    /// Directory the config was read from; relative targets resolve against it.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncSection {
    pub targets: Vec<String>,
    pub pace_ms: Option<u64>,
    pub strict: bool,
    pub temp_file_name: Option<String>,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| format!("Invalid config: {}", e))
    }

    /// Configured targets, with relative entries anchored at the config's directory.
    pub fn targets(&self) -> Vec<String> {
        self.sync
            .targets
            .iter()
            .map(|target| match &self.base_dir {
                Some(base) if Path::new(target).is_relative() => {
                    base.join(target).to_string_lossy().into_owned()
                }
                _ => target.clone(),
            })
            .collect()
    }
}

/// Loads the config named on the command line, or `langsync.toml` if present.
///
/// An explicit path must exist; the implicit one is optional.
pub fn load_config(explicit: Option<&str>) -> Result<Config, String> {
    let path = match explicit {
        Some(path) => PathBuf::from(path),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.is_file() {
                return Ok(Config::default());
            }
            default
        }
    };

    let text = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read config '{}': {}", path.display(), e))?;
    let mut config =
        Config::from_toml(&text).map_err(|e| format!("{} ({})", e, path.display()))?;
    config.base_dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf);
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}
