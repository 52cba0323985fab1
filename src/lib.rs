//! gobump - bump version constants and module paths in Go library sources.
//!
//! # Overview
//!
//! gobump reads the current version from `versionMajor`/`versionMinor`/`versionPatch`
//! constants, computes the next semver, and rewrites every registered bump file:
//! the constants themselves plus each `<module>/vN` reference in go.mod and docs.

pub mod bump;
pub mod config;
pub mod error;
pub mod rewriter;
pub mod version;

// Re-export commonly used types
pub use bump::{
    BumpPlan, FileChange, VersionReport, apply_plan, plan_bump, read_current_version, read_versions,
};
pub use config::{BumpConfig, BumpFile};
pub use error::{BumpError, ConfigError, RewriteError, VersionError};
pub use rewriter::{FieldRewriter, ModuleRewriter, Rewriter, VersionRewriter};
pub use version::{BumpRequest, BumpType};
