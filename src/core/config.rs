//! Install layout resolution for handbook content.
//!
//! The handbook content root is an explicit configuration value, never an
//! implicit module-relative path. Resolution order:
//!
//! 1. explicit `--root` flag (or constructor argument)
//! 2. `HANDBOOK_ROOT` environment variable
//! 3. `<cwd>/vendor/handbook/` — the dependency-installed copy
//! 4. `<crate root>/handbook/` — sibling content directory (development mode)
//!
//! Resolution failure is fatal: there is nothing useful the CLI can do without
//! content to serve.

use crate::core::error::HandbookError;
use std::path::{Path, PathBuf};

/// Default policy document at the content root.
pub const DEFAULT_POLICY_FILE: &str = "CLAUDE_GLOBAL.md";

/// Reserved filename excluded from listings and distribution.
pub const RESERVED_README: &str = "README.md";

/// Fixed template filename under `templates/`.
pub const TEMPLATE_FILE: &str = "CLAUDE.template.md";

/// Conventional vendored location relative to the consumer's working directory.
pub const VENDOR_RELATIVE: &str = "vendor/handbook";

/// Resolved handbook content root plus the category directories under it.
///
/// Category directories are fixed relative to `root`; only the root itself is
/// configurable. Accessors re-read from disk on every call — no caching.
#[derive(Debug, Clone)]
pub struct InstallLayout {
    pub root: PathBuf,
}

impl InstallLayout {
    /// Wrap an explicit, known-good content root (used by tests and `--root`).
    pub fn at(root: impl Into<PathBuf>) -> Result<Self, HandbookError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(HandbookError::PathError(format!(
                "handbook content root does not exist: {}",
                root.display()
            )));
        }
        Ok(InstallLayout { root })
    }

    /// Resolve the content root via flag > env > vendored copy > dev sibling.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, HandbookError> {
        if let Some(dir) = explicit {
            return Self::at(dir);
        }
        if let Ok(env_root) = std::env::var("HANDBOOK_ROOT") {
            return Self::at(PathBuf::from(env_root));
        }

        let vendored = std::env::current_dir()?.join(VENDOR_RELATIVE);
        if vendored.is_dir() {
            return Ok(InstallLayout { root: vendored });
        }

        // Development fallback: content directory next to this crate's sources.
        let dev = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("handbook");
        if dev.is_dir() {
            return Ok(InstallLayout { root: dev });
        }

        Err(HandbookError::PathError(
            "could not resolve handbook content root: set HANDBOOK_ROOT, pass --root, \
             or install the package under vendor/handbook/"
                .to_string(),
        ))
    }

    pub fn agents_dir(&self) -> PathBuf {
        self.root.join("agents")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join("templates")
    }

    pub fn playbooks_dir(&self) -> PathBuf {
        self.root.join("playbooks")
    }
}
