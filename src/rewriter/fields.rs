//! Rewriter for version constants declared as `name = <int>` assignments.

use regex_lite::{NoExpand, Regex};
use tracing::warn;

use crate::error::{ConfigError, RewriteError};

use super::{VersionRewriter, split_version};

/// Literal field names for the three version components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub major: String,
    pub minor: String,
    pub patch: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            major: "versionMajor".to_string(),
            minor: "versionMinor".to_string(),
            patch: "versionPatch".to_string(),
        }
    }
}

/// A compiled pattern for one version component.
#[derive(Debug, Clone)]
struct Field {
    name: String,
    pattern: Regex,
}

impl Field {
    fn new(name: &str) -> Result<Self, ConfigError> {
        let pattern = Regex::new(&format!(r"{} = (\d+)", regex_lite::escape(name))).map_err(
            |e| ConfigError::InvalidPattern {
                name: name.to_string(),
                reason: e.to_string(),
            },
        )?;

        Ok(Self {
            name: name.to_string(),
            pattern,
        })
    }

    fn capture<'a>(&self, content: &'a str) -> Result<&'a str, RewriteError> {
        self.pattern
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| RewriteError::MissingField {
                field: self.name.clone(),
            })
    }

    /// Replace the first assignment only; each field is declared once.
    fn replace(&self, content: &str, value: &str) -> String {
        if !self.pattern.is_match(content) {
            warn!(field = %self.name, "Field not found while writing version, leaving it unchanged");
            return content.to_string();
        }

        let replacement = format!("{} = {}", self.name, value);
        self.pattern
            .replace(content, NoExpand(&replacement))
            .into_owned()
    }
}

/// Reads and writes a version spread over three integer constants.
///
/// ```text
/// versionMajor = 8
/// versionMinor = 1
/// versionPatch = 1
/// ```
#[derive(Debug, Clone)]
pub struct FieldRewriter {
    major: Field,
    minor: Field,
    patch: Field,
}

impl FieldRewriter {
    pub fn new(names: &FieldNames) -> Result<Self, ConfigError> {
        Ok(Self {
            major: Field::new(&names.major)?,
            minor: Field::new(&names.minor)?,
            patch: Field::new(&names.patch)?,
        })
    }

    /// Rewriter for the `versionMajor`/`versionMinor`/`versionPatch` constants.
    pub fn go_defaults() -> Result<Self, ConfigError> {
        Self::new(&FieldNames::default())
    }
}

impl VersionRewriter for FieldRewriter {
    fn read_version(&self, content: &str) -> Result<String, RewriteError> {
        let major = self.major.capture(content)?;
        let minor = self.minor.capture(content)?;
        let patch = self.patch.capture(content)?;

        Ok(format!("{}.{}.{}", major, minor, patch))
    }

    fn write_version(&self, content: &str, version: &str) -> String {
        let [major, minor, patch] = split_version(version);

        let content = self.major.replace(content, major);
        let content = self.minor.replace(&content, minor);
        self.patch.replace(&content, patch)
    }
}
