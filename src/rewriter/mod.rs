//! Version rewriters: read a version out of file content and write a new one back.
//!
//! Two strategies exist:
//! - [`FieldRewriter`] for `versionMajor = N` style constants (first match per field)
//! - [`ModuleRewriter`] for `<module>/vN` import paths (every match)

pub mod fields;
pub mod module;

pub use fields::{FieldNames, FieldRewriter};
pub use module::ModuleRewriter;

use crate::error::RewriteError;

/// The read/write contract every bump file rewriter fulfils.
///
/// Both operations are pure text transforms: content in, derived copy out.
pub trait VersionRewriter {
    /// Extract the version currently recorded in `content`.
    fn read_version(&self, content: &str) -> Result<String, RewriteError>;

    /// Produce `content` with the recorded version replaced by `version`.
    ///
    /// A pattern that no longer matches leaves its part of the text unchanged.
    fn write_version(&self, content: &str, version: &str) -> String;
}

/// A rewriter registered for one bump file.
#[derive(Debug, Clone)]
pub enum Rewriter {
    Fields(FieldRewriter),
    Module(ModuleRewriter),
}

impl Rewriter {
    /// Whether `read_version` yields a full `major.minor.patch` triple.
    pub fn describes_full_version(&self) -> bool {
        matches!(self, Rewriter::Fields(_))
    }
}

impl VersionRewriter for Rewriter {
    fn read_version(&self, content: &str) -> Result<String, RewriteError> {
        match self {
            Rewriter::Fields(r) => r.read_version(content),
            Rewriter::Module(r) => r.read_version(content),
        }
    }

    fn write_version(&self, content: &str, version: &str) -> String {
        match self {
            Rewriter::Fields(r) => r.write_version(content, version),
            Rewriter::Module(r) => r.write_version(content, version),
        }
    }
}

impl std::fmt::Display for Rewriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rewriter::Fields(_) => write!(f, "fields"),
            Rewriter::Module(_) => write!(f, "module"),
        }
    }
}

/// Split a dotted version into its first three components.
///
/// Components past the third are dropped; missing ones come back empty.
pub(crate) fn split_version(version: &str) -> [&str; 3] {
    let mut parts = version.split('.');
    [
        parts.next().unwrap_or(""),
        parts.next().unwrap_or(""),
        parts.next().unwrap_or(""),
    ]
}
