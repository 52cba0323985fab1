//! Rewriter for Go module paths carrying a `/vN` major-version suffix.

use regex_lite::{NoExpand, Regex};

use crate::error::{ConfigError, RewriteError};

use super::{VersionRewriter, split_version};

/// Keeps `<module>/vN` references in sync with the major version.
///
/// Every occurrence is rewritten, since a module path may appear many times
/// in go.mod and documentation. Only the first one is consulted on read.
#[derive(Debug, Clone)]
pub struct ModuleRewriter {
    module: String,
    pattern: Regex,
}

impl ModuleRewriter {
    /// Create a rewriter for `module`, the path without its `/vN` suffix.
    pub fn new(module: &str) -> Result<Self, ConfigError> {
        let module = module.trim_end_matches('/');
        let pattern = Regex::new(&format!(r"{}/v(\d+)", regex_lite::escape(module))).map_err(
            |e| ConfigError::InvalidPattern {
                name: module.to_string(),
                reason: e.to_string(),
            },
        )?;

        Ok(Self {
            module: module.to_string(),
            pattern,
        })
    }

    pub fn module(&self) -> &str {
        &self.module
    }
}

impl VersionRewriter for ModuleRewriter {
    fn read_version(&self, content: &str) -> Result<String, RewriteError> {
        self.pattern
            .captures(content)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| RewriteError::MissingField {
                field: format!("{}/v", self.module),
            })
    }

    fn write_version(&self, content: &str, version: &str) -> String {
        let [major, _, _] = split_version(version);
        let replacement = format!("{}/v{}", self.module, major);

        self.pattern
            .replace_all(content, NoExpand(&replacement))
            .into_owned()
    }
}
