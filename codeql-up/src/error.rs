use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported operating system: {os}")]
    UnsupportedPlatform { os: String },

    #[error("Failed to download {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    #[error("Archive extraction failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("No release tag found in the releases API response")]
    TagNotFound,

    #[error("Executable missing after install: {path}")]
    MissingExecutable { path: String },

    #[error("Failed to set executable permissions on {path}")]
    Permissions {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Installation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, InstallError>;
