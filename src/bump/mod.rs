//! Bump pipeline: drive the registered rewriters across all bump files.
//!
//! Every file is read and rewritten in memory before anything touches disk,
//! so a file whose version cannot be read aborts the bump with no writes.

pub mod files;

use std::path::{Path, PathBuf};

use semver::Version;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{BumpConfig, BumpFile};
use crate::error::{BumpError, ConfigError};
use crate::rewriter::VersionRewriter;
use crate::version::{BumpRequest, parse_version};

use self::files::{read_file, write_file};

/// The version recorded in one bump file.
#[derive(Debug, Clone, Serialize)]
pub struct FileVersion {
    pub path: PathBuf,
    pub updater: String,
    pub version: String,
}

/// Versions currently recorded across the registry.
#[derive(Debug, Clone, Serialize)]
pub struct VersionReport {
    pub version: Version,
    pub files: Vec<FileVersion>,
}

/// A pending rewrite of one bump file.
#[derive(Debug, Clone, Serialize)]
pub struct FileChange {
    pub path: PathBuf,
    pub updater: String,
    pub current: String,
    pub next: String,
    #[serde(skip)]
    pub original: String,
    #[serde(skip)]
    pub updated: String,
}

impl FileChange {
    pub fn is_changed(&self) -> bool {
        self.original != self.updated
    }
}

/// Everything a bump will do, computed without writing.
#[derive(Debug, Clone, Serialize)]
pub struct BumpPlan {
    pub current_version: Version,
    pub next_version: Version,
    pub files: Vec<FileChange>,
}

/// Read the current version from the registry's source file.
pub fn read_current_version(root: &Path, config: &BumpConfig) -> Result<Version, BumpError> {
    let source = config
        .source()
        .ok_or_else(|| ConfigError::NoFiles(root.to_path_buf()))?;
    let path = resolve_path(root, &source.path);

    if !source.rewriter.describes_full_version() {
        return Err(BumpError::SourceNotFullVersion(source.path.clone()));
    }

    let content = read_file(&path)?;
    let raw = read_with(source, &path, &content)?;
    Ok(parse_version(&raw)?)
}

/// Read every registered file and report what each one records.
pub fn read_versions(root: &Path, config: &BumpConfig) -> Result<VersionReport, BumpError> {
    let version = read_current_version(root, config)?;

    let mut files = Vec::with_capacity(config.files.len());
    for file in &config.files {
        let path = resolve_path(root, &file.path);
        let content = read_file(&path)?;
        let recorded = read_with(file, &path, &content)?;

        files.push(FileVersion {
            path: file.path.clone(),
            updater: file.rewriter.to_string(),
            version: recorded,
        });
    }

    Ok(VersionReport { version, files })
}

/// Compute the next version and the rewritten content of every bump file.
///
/// The next version must be a plain `major.minor.patch`.
pub fn plan_bump(
    root: &Path,
    config: &BumpConfig,
    request: &BumpRequest,
) -> Result<BumpPlan, BumpError> {
    let current_version = read_current_version(root, config)?;
    let next_version = request.next_version(&current_version);
    if !next_version.pre.is_empty() || !next_version.build.is_empty() {
        return Err(BumpError::UnsupportedVersion(next_version));
    }
    let next = next_version.to_string();

    debug!(current = %current_version, next = %next_version, "Planning version bump");

    let mut changes = Vec::with_capacity(config.files.len());
    for file in &config.files {
        let path = resolve_path(root, &file.path);
        let original = read_file(&path)?;
        let current = read_with(file, &path, &original)?;

        warn_on_drift(file, &current, &current_version);

        let updated = file.rewriter.write_version(&original, &next);
        let recorded_next = if file.rewriter.describes_full_version() {
            next.clone()
        } else {
            next_version.major.to_string()
        };

        changes.push(FileChange {
            path,
            updater: file.rewriter.to_string(),
            current,
            next: recorded_next,
            original,
            updated,
        });
    }

    Ok(BumpPlan {
        current_version,
        next_version,
        files: changes,
    })
}

/// Write every changed file in the plan. Returns the number of files written.
pub fn apply_plan(plan: &BumpPlan) -> Result<usize, BumpError> {
    let mut written = 0;

    for change in &plan.files {
        if !change.is_changed() {
            debug!(path = %change.path.display(), "Content unchanged, skipping write");
            continue;
        }

        write_file(&change.path, &change.updated)?;
        written += 1;
    }

    Ok(written)
}

fn read_with(file: &BumpFile, path: &Path, content: &str) -> Result<String, BumpError> {
    file.rewriter
        .read_version(content)
        .map_err(|e| BumpError::Rewrite {
            path: path.to_path_buf(),
            source: e,
        })
}

/// Warn when a file disagrees with the source; it is still rewritten.
fn warn_on_drift(file: &BumpFile, recorded: &str, current: &Version) {
    let expected = if file.rewriter.describes_full_version() {
        current.to_string()
    } else {
        current.major.to_string()
    };

    if recorded != expected {
        warn!(
            path = %file.path.display(),
            recorded = %recorded,
            expected = %expected,
            "Bump file disagrees with the version source"
        );
    }
}

fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
