//! Path Resolution Module
//!
//! Resolves the project root and data/config directories across deployment
//! environments (Docker, bare-metal, local dev).

use std::env;
use std::path::{Path, PathBuf};

/// Maximum number of parent directories to inspect when searching for the
/// project root from the working directory.
const MAX_WALK_UP: usize = 10;

// == Path Resolver ==
/// Resolves filesystem locations relative to the project root.
///
/// Resolution strategy for the root:
/// 1. An explicit override (used by the server binary and tests).
/// 2. The `PROJECT_ROOT` environment variable, if it points at an existing
///    directory.
/// 3. Walking up from the current working directory until a directory
///    containing both `data/` and `config/` is found.
/// 4. The current working directory as a last resort.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root_override: Option<PathBuf>,
}

impl PathResolver {
    // == Constructors ==
    /// Creates a resolver that discovers the root from the environment.
    pub fn from_env() -> Self {
        Self {
            root_override: None,
        }
    }

    /// Creates a resolver pinned to a fixed project root.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root_override: Some(root.into()),
        }
    }

    // == Project Root ==
    /// Returns the project root directory.
    pub fn project_root(&self) -> PathBuf {
        if let Some(root) = &self.root_override {
            return root.clone();
        }

        if let Ok(root) = env::var("PROJECT_ROOT") {
            let path = PathBuf::from(root);
            if path.exists() {
                return path;
            }
        }

        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mut current = cwd.clone();
        for _ in 0..MAX_WALK_UP {
            if current.join("data").exists() && current.join("config").exists() {
                return current;
            }
            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => break,
            }
        }

        cwd
    }

    // == Derived Locations ==
    /// Returns the config directory path.
    pub fn config_dir(&self) -> PathBuf {
        self.project_root().join("config")
    }

    /// Returns the path of a file inside the config directory.
    pub fn config_file(&self, filename: &str) -> PathBuf {
        self.config_dir().join(filename)
    }

    /// Returns the data directory, or a subdirectory of it.
    pub fn data_dir(&self, subdir: Option<&str>) -> PathBuf {
        let data = self.project_root().join("data");
        match subdir {
            Some(sub) => data.join(sub),
            None => data,
        }
    }

    // == Relative Resolution ==
    /// Resolves a configured directory value against the project root.
    ///
    /// Configured values use the `./data/mds` convention; a leading `./` is
    /// stripped before joining. Absolute paths are returned unchanged.
    pub fn resolve_relative(&self, configured: &str) -> PathBuf {
        let trimmed = configured.strip_prefix("./").unwrap_or(configured);
        let path = Path::new(trimmed);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root().join(trimmed)
        }
    }
}
