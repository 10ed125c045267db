//! Engine configuration loading: TOML layered over built-in defaults.
//!
//! A missing or malformed file falls back to the defaults without raising.
//! Out-of-range values are a different matter: they surface as a fatal
//! `ConfigError` when the engine is built.

use std::path::{Path, PathBuf};

use ts_core::EngineConfig;

pub fn config_path(explicit: Option<&Path>, data_dir: &Path) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| data_dir.join("config.toml"))
}

pub fn load_engine_config(explicit: Option<&Path>, data_dir: &Path) -> EngineConfig {
    let path = config_path(explicit, data_dir);
    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str::<EngineConfig>(&content) {
            Ok(config) => {
                tracing::debug!("loaded engine config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("ignoring malformed config {}: {e}", path.display());
                EngineConfig::default()
            }
        },
        Err(_) => EngineConfig::default(),
    }
}
