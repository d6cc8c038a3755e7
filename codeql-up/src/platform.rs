use crate::error::{InstallError, Result};
use std::path::{Path, PathBuf};

/// Operating systems the upstream project publishes archives for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
}

impl Platform {
    /// Detect the running platform.
    pub fn current() -> Result<Self> {
        match std::env::consts::OS {
            "windows" => Ok(Self::Windows),
            "macos" => Ok(Self::MacOs),
            "linux" => Ok(Self::Linux),
            os => Err(InstallError::UnsupportedPlatform { os: os.to_string() }),
        }
    }

    /// Suffix used in upstream release asset names.
    pub fn archive_suffix(&self) -> &'static str {
        match self {
            Self::Windows => "win64",
            Self::MacOs => "osx64",
            Self::Linux => "linux64",
        }
    }

    pub fn executable_name(&self) -> &'static str {
        match self {
            Self::Windows => "codeql.exe",
            Self::MacOs | Self::Linux => "codeql",
        }
    }

    /// Path to the main executable inside an extracted distribution.
    pub fn executable_path(&self, install_dir: &Path) -> PathBuf {
        install_dir.join("codeql").join(self.executable_name())
    }
}
