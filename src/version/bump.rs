//! Semver bump arithmetic.

use semver::Version;

use crate::error::VersionError;

/// Type of version bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl std::fmt::Display for BumpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BumpType::Patch => write!(f, "patch"),
            BumpType::Minor => write!(f, "minor"),
            BumpType::Major => write!(f, "major"),
        }
    }
}

/// How the next version is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BumpRequest {
    Level(BumpType),
    Exact(Version),
}

impl BumpRequest {
    /// Resolve the request against the current version.
    pub fn next_version(&self, current: &Version) -> Version {
        match self {
            BumpRequest::Level(bump) => apply_bump_to_version(current, *bump),
            BumpRequest::Exact(version) => version.clone(),
        }
    }
}

/// Apply a bump to a version.
///
/// - Major resets minor and patch
/// - Minor resets patch
/// - Pre-release and build metadata are dropped
pub fn apply_bump_to_version(base: &Version, bump: BumpType) -> Version {
    match bump {
        BumpType::Major => Version::new(base.major + 1, 0, 0),
        BumpType::Minor => Version::new(base.major, base.minor + 1, 0),
        BumpType::Patch => Version::new(base.major, base.minor, base.patch + 1),
    }
}

/// Parse a version read out of a file, tolerating a leading `v`.
pub fn parse_version(raw: &str) -> Result<Version, VersionError> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix('v').unwrap_or(trimmed);
    Version::parse(stripped).map_err(|e| VersionError::ParseFailed(raw.to_string(), e))
}
