use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "texanim";
const CONFIG_DIR_ENV: &str = "TEXANIM_CONFIG_DIR";

/// Settings file (eframe persistence: window geometry + app settings)
pub const SETTINGS_FILE: &str = "texanim.json";
/// Default log file for `--log` without a path
pub const LOG_FILE: &str = "texanim.log";

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables
    ///
    /// Priority: CLI args → ENV var (TEXANIM_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from));

        Self { config_dir }
    }
}

/// Get path to a configuration file
///
/// Priority:
/// 1. CLI --config-dir argument
/// 2. TEXANIM_CONFIG_DIR environment variable
/// 3. Local folder IF any config files exist (texanim.json, texanim.log)
/// 4. Platform-specific config directory from dirs-next (default)
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    get_config_dir(config).join(name)
}

/// Get path to a data file (logs)
///
/// Same priority as [`config_file`], falling back to the platform data
/// directory.
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    get_data_dir(config).join(name)
}

/// Ensure that configuration and data directories exist
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = get_config_dir(config);
    let data_dir = get_data_dir(config);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;
    }

    // Only create data_dir if it's different from config_dir
    if data_dir != config_dir && !data_dir.exists() {
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    }

    Ok(())
}

/// Check if any config files exist in the given directory
fn has_local_config_files(dir: &Path) -> bool {
    [SETTINGS_FILE, LOG_FILE].iter().any(|f| dir.join(f).exists())
}

fn resolve_dir(config: &PathConfig, platform: Option<PathBuf>) -> PathBuf {
    // Priority 1: Custom directory from CLI or ENV
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }

    // Priority 2: Local folder IF config files exist there
    if let Ok(current_dir) = std::env::current_dir()
        && has_local_config_files(&current_dir)
    {
        return current_dir;
    }

    // Priority 3: Platform-specific directory
    if let Some(dir) = platform {
        return dir.join(APP_DIR);
    }

    PathBuf::from(".")
}

fn get_config_dir(config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::config_dir())
}

fn get_data_dir(config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::data_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_with_custom_dir() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };

        let path = config_file("test.json", &config);
        assert_eq!(path, PathBuf::from("/custom/test.json"));
    }

    #[test]
    fn test_data_file_with_custom_dir() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };

        let path = data_file(LOG_FILE, &config);
        assert_eq!(path, PathBuf::from("/custom/texanim.log"));
    }

    #[test]
    fn test_cli_dir_wins_over_env() {
        let config = PathConfig::from_env_and_cli(Some(PathBuf::from("/from/cli")));
        assert_eq!(config.config_dir, Some(PathBuf::from("/from/cli")));
    }

    #[test]
    fn test_local_config_detection() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!has_local_config_files(dir.path()));
        std::fs::write(dir.path().join(SETTINGS_FILE), "{}").unwrap();
        assert!(has_local_config_files(dir.path()));
    }

    #[test]
    fn test_ensure_dirs_creates_custom_dir() {
        let dir = tempfile::tempdir().unwrap();
        let custom = dir.path().join("nested").join("cfg");
        let config = PathConfig {
            config_dir: Some(custom.clone()),
        };
        ensure_dirs(&config).unwrap();
        assert!(custom.is_dir());
    }
}
