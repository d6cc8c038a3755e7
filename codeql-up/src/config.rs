use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Version installed when the releases API cannot be reached. Must stay a
/// release with downloadable archives for all three platforms.
pub const FALLBACK_VERSION: &str = "2.23.6";

pub const RELEASES_API_URL: &str =
    "https://api.github.com/repos/github/codeql-cli-binaries/releases/latest";

pub const DOWNLOAD_BASE_URL: &str =
    "https://github.com/github/codeql-cli-binaries/releases/download";

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub install: InstallConfig,

    #[serde(default)]
    pub release: ReleaseConfig,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct InstallConfig {
    /// Cache directory that holds the `codeql-tools` tree.
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_download_base")]
    pub download_base: String,

    #[serde(default = "default_fallback_version")]
    pub fallback_version: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            download_base: default_download_base(),
            fallback_version: default_fallback_version(),
        }
    }
}

fn default_api_url() -> String {
    RELEASES_API_URL.to_string()
}

fn default_download_base() -> String {
    DOWNLOAD_BASE_URL.to_string()
}

fn default_fallback_version() -> String {
    FALLBACK_VERSION.to_string()
}

/// Platform cache directory used when no override is given.
pub fn default_cache_root() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(std::env::temp_dir)
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("codeql-up.toml"))
            .unwrap_or_else(|| PathBuf::from("codeql-up.toml"))
    }

    /// Merge configuration with command line arguments
    pub fn merge_with_args(&self, args: &mut crate::cli::Args) {
        if args.cache_dir.is_none() {
            args.cache_dir = self.install.cache_dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("test.toml");

        let config_content = r#"
[install]
cache_dir = "/var/cache/codeql"

[release]
api_url = "http://localhost:8080/latest"
fallback_version = "2.20.0"
"#;

        fs::write(&config_path, config_content).unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(
            config.install.cache_dir,
            Some(PathBuf::from("/var/cache/codeql"))
        );
        assert_eq!(config.release.api_url, "http://localhost:8080/latest");
        assert_eq!(config.release.fallback_version, "2.20.0");
        // Fields absent from the file keep their defaults.
        assert_eq!(config.release.download_base, DOWNLOAD_BASE_URL);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.install.cache_dir, None);
        assert_eq!(config.release.api_url, RELEASES_API_URL);
        assert_eq!(config.release.fallback_version, FALLBACK_VERSION);
    }

    #[test]
    fn test_merge_with_args_keeps_cli_value() {
        let config = Config {
            install: InstallConfig {
                cache_dir: Some(PathBuf::from("/from/config")),
            },
            release: ReleaseConfig::default(),
        };

        let mut args = crate::cli::Args {
            tag: None,
            cache_dir: Some(PathBuf::from("/from/cli")),
            config: None,
            quiet: false,
            verbose: false,
        };
        config.merge_with_args(&mut args);
        assert_eq!(args.cache_dir, Some(PathBuf::from("/from/cli")));

        let mut args = crate::cli::Args {
            tag: None,
            cache_dir: None,
            config: None,
            quiet: false,
            verbose: false,
        };
        config.merge_with_args(&mut args);
        assert_eq!(args.cache_dir, Some(PathBuf::from("/from/config")));
    }
}
