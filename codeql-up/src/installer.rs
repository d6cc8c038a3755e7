use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::config::{self, Config};
use crate::error::{InstallError, Result as InstallResult};
use crate::platform::Platform;
use crate::progress::{LogProgress, NoProgress, ProgressSink};
use crate::release::ReleaseClient;
use crate::utils;

pub struct Installer {
    args: Args,
    cache_root: PathBuf,
    client: ReleaseClient,
    fallback_version: String,
}

impl Installer {
    pub fn new(mut args: Args) -> Result<Self> {
        let config = Config::load(&args.config_path()).context("Failed to load configuration")?;

        config.merge_with_args(&mut args);

        let cache_root = args
            .cache_dir
            .clone()
            .unwrap_or_else(config::default_cache_root);

        let fallback_version = config.release.fallback_version.clone();
        let client = ReleaseClient::new(config.release)?;

        Ok(Self {
            args,
            cache_root,
            client,
            fallback_version,
        })
    }

    /// CLI entry point: ensure the CodeQL CLI is installed and print the
    /// executable path to stdout.
    pub async fn run(&self) -> Result<()> {
        let executable = if self.args.quiet {
            self.ensure_installed(&NoProgress).await?
        } else {
            self.ensure_installed(&LogProgress).await?
        };

        println!("{}", executable.display());
        Ok(())
    }

    /// Resolve the version to install, install it if missing, and return the
    /// path to a usable executable.
    ///
    /// Idempotent: when the resolved version is already installed the path
    /// is returned without any download. A failed install removes the whole
    /// version directory before the error propagates, so a later call never
    /// mistakes a half-populated directory for a working install.
    pub async fn ensure_installed(&self, progress: &dyn ProgressSink) -> InstallResult<PathBuf> {
        let platform = Platform::current()?;
        let version = self.resolve_version(progress).await;

        let install_dir = self.install_dir(&version);
        let executable = platform.executable_path(&install_dir);

        if executable.exists() {
            progress.stage(&format!("CodeQL {version} is already installed"));
            return Ok(executable);
        }

        progress.stage(&format!("Downloading CodeQL {version}"));
        progress.indeterminate();

        if let Err(e) = self.install(&version, &install_dir, platform, progress).await {
            if install_dir.exists() {
                if let Err(cleanup) = fs::remove_dir_all(&install_dir) {
                    tracing::warn!(
                        "Failed to remove partial install {}: {cleanup}",
                        install_dir.display()
                    );
                }
            }
            return Err(e);
        }

        if !executable.exists() {
            return Err(InstallError::MissingExecutable {
                path: executable.display().to_string(),
            });
        }

        Ok(executable)
    }

    /// Version-keyed directory holding one extracted distribution.
    pub fn install_dir(&self, version: &str) -> PathBuf {
        self.cache_root
            .join("codeql-tools")
            .join(format!("codeql-dist-{version}"))
    }

    /// Determine the version to install. Never fails: a pinned version wins,
    /// then the latest release tag, then the fallback.
    async fn resolve_version(&self, progress: &dyn ProgressSink) -> String {
        if let Some(version) = self.args.pinned_version() {
            return version;
        }

        progress.stage("Checking the latest CodeQL version");

        match self.client.fetch_latest_tag().await {
            Ok(version) => {
                tracing::info!("Detected latest CodeQL version: {version}");
                version
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch the latest CodeQL version, falling back to {}: {e}",
                    self.fallback_version
                );
                self.fallback_version.clone()
            }
        }
    }

    async fn install(
        &self,
        version: &str,
        install_dir: &Path,
        platform: Platform,
        progress: &dyn ProgressSink,
    ) -> InstallResult<()> {
        let url = self.client.download_url(version, platform);
        tracing::info!("Downloading CodeQL from {url}");

        let archive = self.client.download_archive(&url, progress).await?;

        progress.stage("Extracting the CodeQL archive");
        install_from_archive(archive.path(), install_dir, platform)
    }
}

/// Extract a downloaded distribution archive into `install_dir` and repair
/// the executable bits the archive does not reliably preserve.
///
/// The main binary and the final executable path are required to end up
/// executable; the `tools/**/bin/` helper subtree is best effort.
pub(crate) fn install_from_archive(
    archive: &Path,
    install_dir: &Path,
    platform: Platform,
) -> InstallResult<()> {
    utils::extract_zip(archive, install_dir)?;

    let codeql_home = install_dir.join("codeql");

    let main_binary = codeql_home.join("codeql");
    if main_binary.exists() {
        utils::make_executable(&main_binary).map_err(|source| permissions_error(&main_binary, source))?;
    }

    let tools_dir = codeql_home.join("tools");
    if tools_dir.exists() {
        utils::fix_helper_permissions(&tools_dir);
    }

    let executable = platform.executable_path(install_dir);
    if executable.exists() {
        utils::make_executable(&executable).map_err(|source| permissions_error(&executable, source))?;
    }

    Ok(())
}

fn permissions_error(path: &Path, source: std::io::Error) -> InstallError {
    InstallError::Permissions {
        path: path.display().to_string(),
        source,
    }
}
