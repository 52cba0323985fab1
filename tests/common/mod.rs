//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

pub const MODULE: &str = "github.com/GetStream/stream-chat-go";

/// Render a version.go declaring the given version constants.
pub fn version_go(major: u64, minor: u64, patch: u64) -> String {
    format!(
        "package stream_chat\n\nimport (\n\t\"fmt\"\n)\n\nconst (\n\tversionMajor = {major}\n\tversionMinor = {minor}\n\tversionPatch = {patch}\n)\n\n// Version returns the version of the library.\nfunc Version() string {{\n\treturn \"v\" + fmtVersion()\n}}\n"
    )
}

pub fn go_mod(major: u64) -> String {
    format!("module {MODULE}/v{major}\n\ngo 1.22\n\nrequire github.com/stretchr/testify v1.9.0\n")
}

pub fn readme(major: u64) -> String {
    format!(
        "# stream-chat-go\n\n```bash\ngo get {MODULE}/v{major}\n```\n\n```go\nimport stream \"{MODULE}/v{major}\"\n```\n\nRequires Go 1.22 and testify v1.9.0.\n"
    )
}

/// A throwaway Go library checkout with the default bump files.
pub struct TestProject {
    pub dir: tempfile::TempDir,
}

impl TestProject {
    /// Create a project at `major.minor.patch` with version.go, go.mod and README.md.
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let project = Self { dir };
        project.write("version.go", &version_go(major, minor, patch));
        project.write("go.mod", &go_mod(major));
        project.write("README.md", &readme(major));
        project
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.path(name), content)
            .unwrap_or_else(|e| panic!("Failed to write {}: {}", name, e));
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", name, e))
    }
}
