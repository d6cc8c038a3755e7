//! # codeql-up
//!
//! Fetch and install the CodeQL CLI from GitHub releases.
//!
//! ## Overview
//!
//! `codeql-up` guarantees a usable CodeQL executable on the local machine.
//! It resolves the latest released version (falling back to a known-good
//! version when the releases API is unreachable), downloads the archive for
//! the current platform, unpacks it into a version-keyed cache directory,
//! and repairs the executable permissions that archive extraction does not
//! reliably preserve. Repeated runs for an already-installed version return
//! the installed path without any network traffic.
//!
//! ## Usage
//!
//! ```bash
//! # Ensure the latest release is installed, print the executable path
//! codeql-up
//!
//! # Pin an exact release
//! codeql-up --tag v2.24.0
//!
//! # Use a custom cache directory
//! codeql-up --cache-dir /opt/cache
//! ```
//!
//! ## Configuration
//!
//! Settings can be specified in `codeql-up.toml` under the platform config
//! directory, including the cache directory and the release endpoints.

/// Command-line interface definitions and argument parsing
pub mod cli;

/// Configuration file handling and release endpoint defaults
pub mod config;

/// Error types and result alias
pub mod error;

/// Core installation logic: version resolution, download, extraction
pub mod installer;

/// Operating system detection and platform-specific naming
pub mod platform;

/// Progress reporting capability for UI integrations
pub mod progress;

/// HTTP client for the releases API and archive downloads
pub mod release;

/// Utility functions for archive extraction and permission repair
pub mod utils;
