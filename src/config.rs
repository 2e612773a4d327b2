use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Application folder name under the platform config/data dirs
const APP_DIR: &str = "scrollreel";

/// Environment override for the config directory
pub const CONFIG_DIR_ENV: &str = "SCROLLREEL_CONFIG_DIR";

/// Persisted window + settings state
pub const STATE_FILE: &str = "scrollreel.json";

/// Default log file for `--log` without a path
pub const LOG_FILE: &str = "scrollreel.log";

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables
    ///
    /// Priority: CLI args → ENV var (SCROLLREEL_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from));
        Self { config_dir }
    }
}

/// Get path to a configuration file
///
/// Priority:
/// 1. CLI --config-dir argument
/// 2. SCROLLREEL_CONFIG_DIR environment variable
/// 3. Local folder IF any of our files exist there (scrollreel.json, scrollreel.log)
/// 4. Platform-specific config directory from dirs-next (default)
///
/// Platform paths:
/// - Linux: ~/.config/scrollreel/{name}
/// - macOS: ~/Library/Application Support/scrollreel/{name}
/// - Windows: %APPDATA%\scrollreel\{name}
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, std::env::current_dir().ok().as_deref(), dirs_next::config_dir()).join(name)
}

/// Get path to a data file (logs)
///
/// Same priority as [`config_file`], falling back to the platform data dir:
/// - Linux: ~/.local/share/scrollreel/{name}
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, std::env::current_dir().ok().as_deref(), dirs_next::data_dir()).join(name)
}

/// Ensure that configuration and data directories exist
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    for file in [config_file(STATE_FILE, config), data_file(LOG_FILE, config)] {
        let Some(dir) = file.parent() else { continue };
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
    }
    Ok(())
}

/// Check if any of our files exist in the given directory
fn has_local_config_files(dir: &Path) -> bool {
    [STATE_FILE, LOG_FILE].iter().any(|f| dir.join(f).exists())
}

fn resolve_dir(config: &PathConfig, current_dir: Option<&Path>, platform_dir: Option<PathBuf>) -> PathBuf {
    // Priority 1: Custom directory from CLI or ENV
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }

    // Priority 2: Local folder IF our files exist there
    if let Some(dir) = current_dir
        && has_local_config_files(dir)
    {
        return dir.to_path_buf();
    }

    // Priority 3: Platform-specific directory
    if let Some(dir) = platform_dir {
        return dir.join(APP_DIR);
    }

    PathBuf::from(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::loader::test_support::temp_dir;

    #[test]
    fn test_config_file_with_custom_dir() {
        let config = PathConfig {
            config_dir: Some(PathBuf::from("/custom")),
        };
        assert_eq!(config_file("test.json", &config), PathBuf::from("/custom/test.json"));
        assert_eq!(data_file("x.log", &config), PathBuf::from("/custom/x.log"));
    }

    #[test]
    fn test_cli_dir_wins_over_env() {
        let config = PathConfig::from_env_and_cli(Some(PathBuf::from("/from-cli")));
        assert_eq!(config.config_dir, Some(PathBuf::from("/from-cli")));
    }

    #[test]
    fn test_platform_dir_used_by_default() {
        let config = PathConfig::default();
        let dir = resolve_dir(&config, None, Some(PathBuf::from("/home/u/.config")));
        assert_eq!(dir, PathBuf::from("/home/u/.config/scrollreel"));
        assert_eq!(resolve_dir(&config, None, None), PathBuf::from("."));
    }

    #[test]
    fn test_local_files_priority() {
        let local = temp_dir("config_local");
        let config = PathConfig::default();
        let platform = Some(PathBuf::from("/platform"));

        assert_eq!(
            resolve_dir(&config, Some(&local), platform.clone()),
            PathBuf::from("/platform/scrollreel")
        );

        std::fs::write(local.join(STATE_FILE), "{}").unwrap();
        assert_eq!(resolve_dir(&config, Some(&local), platform), local);

        let _ = std::fs::remove_dir_all(&local);
    }
}
