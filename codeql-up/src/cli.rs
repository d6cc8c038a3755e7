use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(
    name = "codeql-up",
    version,
    about = "Fetch and install the CodeQL CLI from GitHub releases",
    long_about = None
)]
pub struct Args {
    /// Release version to install (e.g. 2.24.0 or v2.24.0).
    /// Skips the latest-release lookup when given.
    #[clap(short, long)]
    pub tag: Option<String>,

    /// Cache directory that holds installed distributions
    #[clap(short = 'd', long)]
    pub cache_dir: Option<PathBuf>,

    /// Configuration file path
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Suppress stage progress output
    #[clap(short, long)]
    pub quiet: bool,

    /// Enable verbose output
    #[clap(long)]
    pub verbose: bool,
}

impl Args {
    /// Pinned version with an optional leading `v` stripped
    pub fn pinned_version(&self) -> Option<String> {
        self.tag
            .as_deref()
            .map(|tag| tag.strip_prefix('v').unwrap_or(tag).to_string())
    }

    /// Configuration file path, defaulting to the platform config directory
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}
