//! Version management and semver bumping.

pub mod bump;

pub use bump::{BumpRequest, BumpType, apply_bump_to_version, parse_version};
