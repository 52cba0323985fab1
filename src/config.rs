//! Bump file registry: which files carry the version and how to rewrite them.
//!
//! The registry comes from `.gobump.toml` when present:
//!
//! ```toml
//! [[files]]
//! path = "version.go"
//! updater = "fields"
//!
//! [[files]]
//! path = "go.mod"
//! updater = "module"
//! module = "github.com/GetStream/stream-chat-go"
//! ```
//!
//! Otherwise the Go library layout is assumed: `version.go` constants plus the
//! module path in `go.mod` and `README.md`.

use std::path::{Path, PathBuf};

use regex_lite::Regex;
use tracing::debug;

use crate::error::ConfigError;
use crate::rewriter::{FieldNames, FieldRewriter, ModuleRewriter, Rewriter, VersionRewriter};

/// Default registry file name, looked up in the project root.
pub const CONFIG_FILE: &str = ".gobump.toml";

/// A file registered for bumping, with its rewriter.
#[derive(Debug, Clone)]
pub struct BumpFile {
    /// Path relative to the project root (or absolute).
    pub path: PathBuf,
    pub rewriter: Rewriter,
}

/// The ordered bump file registry. The first file is the version source.
#[derive(Debug, Clone)]
pub struct BumpConfig {
    pub files: Vec<BumpFile>,
}

impl BumpConfig {
    /// Load the registry for `root`.
    ///
    /// Uses `explicit` if given, else `.gobump.toml` in `root` if it exists,
    /// else the Go library defaults. A relative `explicit` path is taken as is,
    /// i.e. relative to the working directory, not to `root`.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(p) => Some(p.to_path_buf()),
            None => Some(root.join(CONFIG_FILE)).filter(|p| p.exists()),
        };

        match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading bump file registry");
                let content =
                    std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadFailed {
                        path: path.clone(),
                        source: e,
                    })?;
                Self::from_toml(&path, &content)
            }
            None => {
                debug!("No registry file found, using Go library defaults");
                Self::go_defaults(root)
            }
        }
    }

    /// Parse a registry from TOML text. `path` is only used in error messages.
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, ConfigError> {
        let doc = content
            .parse::<toml_edit::DocumentMut>()
            .map_err(|e| ConfigError::InvalidToml {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let entries = doc
            .get("files")
            .and_then(|f| f.as_array_of_tables())
            .ok_or_else(|| ConfigError::NoFiles(path.to_path_buf()))?;

        let mut files = Vec::new();
        for (index, table) in entries.iter().enumerate() {
            let get = |key: &'static str| table.get(key).and_then(|v| v.as_str());
            let missing = |key: &'static str| ConfigError::MissingKey {
                path: path.to_path_buf(),
                index,
                key,
            };

            let file_path = get("path").ok_or_else(|| missing("path"))?;
            let updater = get("updater").ok_or_else(|| missing("updater"))?;

            let rewriter = match updater {
                "fields" => {
                    let defaults = FieldNames::default();
                    let names = FieldNames {
                        major: get("major").map(String::from).unwrap_or(defaults.major),
                        minor: get("minor").map(String::from).unwrap_or(defaults.minor),
                        patch: get("patch").map(String::from).unwrap_or(defaults.patch),
                    };
                    Rewriter::Fields(FieldRewriter::new(&names)?)
                }
                "module" => {
                    let module = get("module").ok_or_else(|| missing("module"))?;
                    Rewriter::Module(ModuleRewriter::new(module)?)
                }
                other => {
                    return Err(ConfigError::UnknownUpdater {
                        path: path.to_path_buf(),
                        index,
                        updater: other.to_string(),
                    });
                }
            };

            files.push(BumpFile {
                path: PathBuf::from(file_path),
                rewriter,
            });
        }

        if files.is_empty() {
            return Err(ConfigError::NoFiles(path.to_path_buf()));
        }

        Ok(Self { files })
    }

    /// The Go library layout: `version.go`, `go.mod`, `README.md`.
    ///
    /// The module path is read from the `module` directive in `go.mod`, which
    /// must carry a `/vN` major suffix (v0/v1 modules have nothing to rewrite).
    pub fn go_defaults(root: &Path) -> Result<Self, ConfigError> {
        let go_mod = root.join("go.mod");
        let content = std::fs::read_to_string(&go_mod).map_err(|e| ConfigError::ReadFailed {
            path: go_mod.clone(),
            source: e,
        })?;
        let module = detect_module_path(&content)
            .ok_or_else(|| ConfigError::ModulePathNotFound(go_mod.clone()))?;

        debug!(module = %module, "Detected module path from go.mod");

        let module_rewriter = ModuleRewriter::new(&module)?;
        if module_rewriter.read_version(&content).is_err() {
            return Err(ConfigError::NoMajorSuffix {
                path: go_mod,
                module,
            });
        }
        let module_rewriter = Rewriter::Module(module_rewriter);

        Ok(Self {
            files: vec![
                BumpFile {
                    path: PathBuf::from("version.go"),
                    rewriter: Rewriter::Fields(FieldRewriter::go_defaults()?),
                },
                BumpFile {
                    path: PathBuf::from("go.mod"),
                    rewriter: module_rewriter.clone(),
                },
                BumpFile {
                    path: PathBuf::from("README.md"),
                    rewriter: module_rewriter,
                },
            ],
        })
    }

    /// The file the current version is read from.
    pub fn source(&self) -> Option<&BumpFile> {
        self.files.first()
    }
}

/// Extract the module path from go.mod content, without its `/vN` suffix.
pub fn detect_module_path(go_mod: &str) -> Option<String> {
    let directive = Regex::new(r"(?m)^\s*module\s+(\S+)").ok()?;
    let raw = directive.captures(go_mod)?.get(1)?.as_str();
    let path = raw.trim_matches(|c| c == '"' || c == '`');

    let base = match path.rsplit_once('/') {
        Some((base, suffix)) if is_major_suffix(suffix) => base,
        _ => path,
    };

    Some(base.to_string())
}

fn is_major_suffix(segment: &str) -> bool {
    segment
        .strip_prefix('v')
        .is_some_and(|n| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_detect_module_path_strips_major() {
        let go_mod = "module github.com/GetStream/stream-chat-go/v8\n\ngo 1.22\n";
        assert_eq!(
            detect_module_path(go_mod).as_deref(),
            Some("github.com/GetStream/stream-chat-go")
        );
    }

    #[test]
    fn test_detect_module_path_without_major() {
        assert_eq!(
            detect_module_path("module example.com/pkg\n").as_deref(),
            Some("example.com/pkg")
        );
    }

    #[test]
    fn test_detect_module_path_quoted() {
        assert_eq!(
            detect_module_path("// comment\nmodule \"example.com/pkg/v3\"\n").as_deref(),
            Some("example.com/pkg")
        );
    }

    #[test]
    fn test_detect_module_path_missing() {
        assert_eq!(detect_module_path("go 1.22\n"), None);
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
[[files]]
path = "version.go"
updater = "fields"

[[files]]
path = "go.mod"
updater = "module"
module = "example.com/pkg"
"#;
        let config = BumpConfig::from_toml(Path::new(CONFIG_FILE), toml).unwrap();
        assert_eq!(config.files.len(), 2);
        assert_eq!(config.files[0].path, PathBuf::from("version.go"));
        assert!(config.files[0].rewriter.describes_full_version());
        assert_eq!(config.files[1].rewriter.to_string(), "module");
    }

    #[test]
    fn test_from_toml_custom_field_names() {
        let toml = r#"
[[files]]
path = "consts.go"
updater = "fields"
major = "Major"
minor = "Minor"
patch = "Patch"
"#;
        let config = BumpConfig::from_toml(Path::new(CONFIG_FILE), toml).unwrap();
        let version = config.files[0]
            .rewriter
            .read_version("Major = 2\nMinor = 0\nPatch = 7\n")
            .unwrap();
        assert_eq!(version, "2.0.7");
    }

    #[test]
    fn test_from_toml_unknown_updater() {
        let toml = "[[files]]\npath = \"a\"\nupdater = \"json\"\n";
        let err = BumpConfig::from_toml(Path::new(CONFIG_FILE), toml).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownUpdater { index: 0, .. }));
    }

    #[test]
    fn test_from_toml_module_without_path() {
        let toml = "[[files]]\npath = \"go.mod\"\nupdater = \"module\"\n";
        let err = BumpConfig::from_toml(Path::new(CONFIG_FILE), toml).unwrap_err();
        assert!(matches!(err, ConfigError::MissingKey { key: "module", .. }));
    }

    #[test]
    fn test_from_toml_no_files() {
        let err = BumpConfig::from_toml(Path::new(CONFIG_FILE), "title = \"x\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::NoFiles(_)));
    }

    #[test]
    fn test_from_toml_invalid() {
        let err = BumpConfig::from_toml(Path::new(CONFIG_FILE), "[[files]\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidToml { .. }));
    }

    #[test]
    fn test_load_prefers_registry_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "[[files]]\npath = \"consts.go\"\nupdater = \"fields\"\n",
        )
        .unwrap();

        let config = BumpConfig::load(dir.path(), None).unwrap();
        assert_eq!(config.files.len(), 1);
        assert_eq!(config.files[0].path, PathBuf::from("consts.go"));
    }

    #[test]
    fn test_load_falls_back_to_go_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("go.mod"), "module example.com/pkg/v2\n").unwrap();

        let config = BumpConfig::load(dir.path(), None).unwrap();
        let paths: Vec<_> = config.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("version.go"),
                PathBuf::from("go.mod"),
                PathBuf::from("README.md")
            ]
        );
        assert_eq!(config.source().unwrap().path, PathBuf::from("version.go"));
    }

    #[test]
    fn test_go_defaults_reject_module_without_major_suffix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("go.mod"), "module example.com/pkg\n\ngo 1.22\n").unwrap();

        let err = BumpConfig::load(dir.path(), None).unwrap_err();
        match err {
            ConfigError::NoMajorSuffix { path, module } => {
                assert_eq!(path, dir.path().join("go.mod"));
                assert_eq!(module, "example.com/pkg");
            }
            other => panic!("expected NoMajorSuffix, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_config_is_not_joined_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let name = "gobump-root-relative-registry.toml";
        fs::write(
            dir.path().join(name),
            "[[files]]\npath = \"version.go\"\nupdater = \"fields\"\n",
        )
        .unwrap();

        // Relative to the working directory, where this file does not exist
        let err = BumpConfig::load(dir.path(), Some(Path::new(name))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { path, .. } if path == Path::new(name)));

        // Absolute paths load directly
        let config = BumpConfig::load(dir.path(), Some(&dir.path().join(name))).unwrap();
        assert_eq!(config.files.len(), 1);
    }

    #[test]
    fn test_load_without_go_mod_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = BumpConfig::load(dir.path(), None).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFailed { .. }));
    }
}
