use crate::error::ErrorCode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A config file that exists but does not parse. Carries a machine code so
/// the CLI boundary can surface it as `E1001`.
#[derive(Debug, Error)]
#[error("failed to parse {path}: {source}")]
pub struct ConfigParseError {
    path: PathBuf,
    source: toml::de::Error,
}

impl ConfigParseError {
    /// Machine-readable code associated with this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        ErrorCode::ConfigParseError
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_source_url")]
    pub url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_source_url(),
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Unique jokes collected per `gg fetch` when `-n` is not given.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Source calls allowed per requested joke before the loop gives up.
    /// Bounds the duplicate-discard loop against a degenerate source.
    #[serde(default = "default_max_attempts_per_joke")]
    pub max_attempts_per_joke: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_attempts_per_joke: default_max_attempts_per_joke(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Override for the data directory holding the jokes store.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Load config from the platform config directory, falling back to defaults
/// when the file (or the directory itself) does not exist.
pub fn load_config() -> Result<ProjectConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(ProjectConfig::default());
    };

    load_config_from(&config_dir.join("giggle/config.toml"))
}

/// Load config from an explicit path. Missing file means defaults; a file
/// that exists but does not parse is an error worth surfacing.
pub fn load_config_from(path: &Path) -> Result<ProjectConfig> {
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content).map_err(|source| {
        anyhow::Error::new(ConfigParseError {
            path: path.to_path_buf(),
            source,
        })
    })
}

/// Resolve the data directory holding the store.
///
/// Precedence: `GIGGLE_DATA_DIR` env var, then `[store] dir` from config,
/// then the platform data directory.
#[must_use]
pub fn resolve_data_dir(config: &ProjectConfig) -> PathBuf {
    resolve_data_dir_inner(
        env::var("GIGGLE_DATA_DIR").ok().as_deref(),
        config.store.dir.as_deref(),
        dirs::data_dir(),
    )
}

fn resolve_data_dir_inner(
    env_dir: Option<&str>,
    config_dir: Option<&Path>,
    platform_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = env_dir {
        return PathBuf::from(dir);
    }

    if let Some(dir) = config_dir {
        return dir.to_path_buf();
    }

    platform_dir.map_or_else(|| PathBuf::from(".giggle"), |dir| dir.join("giggle"))
}

fn default_source_url() -> String {
    "https://icanhazdadjoke.com/".to_string()
}

fn default_user_agent() -> String {
    "giggle-cli (https://github.com/bobisme/giggle)".to_string()
}

const fn default_batch_size() -> usize {
    10
}

const fn default_max_attempts_per_joke() -> usize {
    50
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    fn make_temp_dir(label: &str) -> PathBuf {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!("giggle-config-test-{label}-{id}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("temp dir must be created");
        dir
    }

    #[test]
    fn missing_config_uses_defaults() {
        let root = make_temp_dir("missing");
        let cfg = load_config_from(&root.join("config.toml")).expect("load should succeed");
        assert_eq!(cfg.source.url, "https://icanhazdadjoke.com/");
        assert_eq!(cfg.fetch.batch_size, 10);
        assert_eq!(cfg.fetch.max_attempts_per_joke, 50);
        assert!(cfg.store.dir.is_none());
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let root = make_temp_dir("partial");
        let path = root.join("config.toml");
        std::fs::write(
            &path,
            r#"
[fetch]
batch_size = 3

[store]
dir = "/tmp/giggle-data"
"#,
        )
        .expect("write config");

        let cfg = load_config_from(&path).expect("load should succeed");
        assert_eq!(cfg.fetch.batch_size, 3);
        assert_eq!(cfg.fetch.max_attempts_per_joke, 50);
        assert_eq!(cfg.store.dir, Some(PathBuf::from("/tmp/giggle-data")));
        assert_eq!(cfg.source.url, "https://icanhazdadjoke.com/");
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn broken_config_is_an_error_with_a_machine_code() {
        let root = make_temp_dir("broken");
        let path = root.join("config.toml");
        std::fs::write(&path, "[fetch\nbatch_size = ").expect("write config");

        let err = load_config_from(&path).unwrap_err();
        let parse = err
            .downcast_ref::<ConfigParseError>()
            .expect("parse failure should carry ConfigParseError");
        assert_eq!(parse.code(), ErrorCode::ConfigParseError);
        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn env_dir_wins_over_config_and_platform() {
        let resolved = resolve_data_dir_inner(
            Some("/env/data"),
            Some(Path::new("/config/data")),
            Some(PathBuf::from("/platform")),
        );
        assert_eq!(resolved, PathBuf::from("/env/data"));
    }

    #[test]
    fn config_dir_wins_over_platform() {
        let resolved = resolve_data_dir_inner(
            None,
            Some(Path::new("/config/data")),
            Some(PathBuf::from("/platform")),
        );
        assert_eq!(resolved, PathBuf::from("/config/data"));
    }

    #[test]
    fn platform_dir_gets_project_suffix() {
        let resolved = resolve_data_dir_inner(None, None, Some(PathBuf::from("/platform")));
        assert_eq!(resolved, PathBuf::from("/platform/giggle"));
    }

    #[test]
    fn no_platform_dir_falls_back_to_relative() {
        let resolved = resolve_data_dir_inner(None, None, None);
        assert_eq!(resolved, PathBuf::from(".giggle"));
    }
}
