//! Error types for gobump modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading a version out of file content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RewriteError {
    #[error("No match for '{field}' in file content")]
    MissingField { field: String },
}

/// Errors from version operations.
#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Failed to parse version '{0}': {1}")]
    ParseFailed(String, #[source] semver::Error),
}

/// Errors from loading the bump file registry.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {reason}")]
    InvalidToml { path: PathBuf, reason: String },

    #[error("Config {0} has no [[files]] entries")]
    NoFiles(PathBuf),

    #[error("Entry #{index} in {path} is missing the '{key}' key")]
    MissingKey {
        path: PathBuf,
        index: usize,
        key: &'static str,
    },

    #[error("Entry #{index} in {path} has unknown updater '{updater}' (expected 'fields' or 'module')")]
    UnknownUpdater {
        path: PathBuf,
        index: usize,
        updater: String,
    },

    #[error("Invalid pattern for '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("Could not find a module directive in {0}")]
    ModulePathNotFound(PathBuf),

    #[error(
        "Module {module} in {path} has no /vN major suffix. Add a .gobump.toml listing the bump files explicitly."
    )]
    NoMajorSuffix { path: PathBuf, module: String },
}

/// Errors from the bump pipeline.
#[derive(Error, Debug)]
pub enum BumpError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Version(#[from] VersionError),

    #[error("Failed to read version from {path}: {source}")]
    Rewrite {
        path: PathBuf,
        #[source]
        source: RewriteError,
    },

    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "{0} only records the major version and cannot be the version source. List a 'fields' file first."
    )]
    SourceNotFullVersion(PathBuf),

    #[error(
        "Version {0} has pre-release or build metadata, which version constants cannot record"
    )]
    UnsupportedVersion(semver::Version),

    #[error("Bump cancelled by user")]
    Cancelled,
}
