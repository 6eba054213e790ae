use std::path::PathBuf;

use crate::errors::ConfigPathScope;

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Config file location for `scope`.
///
/// `SORTEIAKI_CONFIG` wins over both scopes when set.
#[must_use]
pub fn resolve_config_path(scope: ConfigPathScope) -> PathBuf {
    if let Some(explicit) = non_empty_env(crate::ENV_SORTEIAKI_CONFIG) {
        return PathBuf::from(explicit);
    }
    match scope {
        ConfigPathScope::User => {
            if let Some(xdg_config_home) = non_empty_env("XDG_CONFIG_HOME") {
                return PathBuf::from(xdg_config_home)
                    .join("sorteiaki")
                    .join("config.toml");
            }
            if let Some(home) = non_empty_env("HOME") {
                return PathBuf::from(home)
                    .join(".config")
                    .join("sorteiaki")
                    .join("config.toml");
            }
            PathBuf::from(".sorteiaki").join("config.toml")
        }
        ConfigPathScope::Workspace => PathBuf::from(".sorteiaki").join("config.toml"),
    }
}

/// Default directory for persisted audit records.
#[must_use]
pub fn resolve_results_dir() -> PathBuf {
    if let Some(explicit) = non_empty_env(crate::ENV_SORTEIAKI_RESULTS_DIR) {
        return PathBuf::from(explicit);
    }
    if let Some(xdg_data_home) = non_empty_env("XDG_DATA_HOME") {
        return PathBuf::from(xdg_data_home)
            .join("sorteiaki")
            .join("results");
    }
    if let Some(home) = non_empty_env("HOME") {
        return PathBuf::from(home)
            .join(".local")
            .join("share")
            .join("sorteiaki")
            .join("results");
    }
    PathBuf::from(".sorteiaki").join("results")
}
