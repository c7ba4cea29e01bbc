//! Read-only accessors over the handbook content tree.
//!
//! Every call re-reads from disk — there is no caching layer, so content edits
//! are visible immediately and concurrent tool runs never see stale text.

use crate::core::config::{DEFAULT_POLICY_FILE, InstallLayout, RESERVED_README, TEMPLATE_FILE};
use crate::core::error::HandbookError;
use std::fs;
use std::path::Path;

/// Accessor handle over a resolved [`InstallLayout`].
pub struct Handbook {
    layout: InstallLayout,
}

impl Handbook {
    pub fn new(layout: InstallLayout) -> Self {
        Handbook { layout }
    }

    /// Read a policy document at the content root. `None` selects the global
    /// policy file (`CLAUDE_GLOBAL.md`).
    pub fn policy(&self, name: Option<&str>) -> Result<String, HandbookError> {
        let name = name.unwrap_or(DEFAULT_POLICY_FILE);
        read_doc(&self.layout.root.join(name), name)
    }

    /// The global guardrails policy.
    pub fn global(&self) -> Result<String, HandbookError> {
        self.policy(None)
    }

    /// Read one agent document. The `.md` suffix is appended when missing, so
    /// `agent("reviewer")` and `agent("reviewer.md")` read the same file.
    pub fn agent(&self, name: &str) -> Result<String, HandbookError> {
        let file_name = normalize_doc_name(name);
        read_doc(
            &self.layout.agents_dir().join(&file_name),
            &format!("agents/{}", file_name),
        )
    }

    /// The fixed project-template document.
    pub fn template(&self) -> Result<String, HandbookError> {
        read_doc(
            &self.layout.templates_dir().join(TEMPLATE_FILE),
            &format!("templates/{}", TEMPLATE_FILE),
        )
    }

    /// Agent document filenames, excluding the reserved `README.md`.
    ///
    /// Order is raw directory-listing order and is not stable across
    /// platforms or filesystems.
    pub fn available_agents(&self) -> Result<Vec<String>, HandbookError> {
        list_docs(&self.layout.agents_dir())
    }

    /// Playbook document filenames, same filter and ordering caveat as
    /// [`Handbook::available_agents`].
    pub fn available_playbooks(&self) -> Result<Vec<String>, HandbookError> {
        list_docs(&self.layout.playbooks_dir())
    }
}

/// Append `.md` iff the name does not already carry it. Idempotent.
pub fn normalize_doc_name(name: &str) -> String {
    if name.ends_with(".md") {
        name.to_string()
    } else {
        format!("{}.md", name)
    }
}

/// Whether a filename counts as a distributable handbook document.
pub fn is_doc_name(name: &str) -> bool {
    name.ends_with(".md") && name != RESERVED_README
}

fn read_doc(path: &Path, label: &str) -> Result<String, HandbookError> {
    if !path.is_file() {
        return Err(HandbookError::NotFound(label.to_string()));
    }
    fs::read_to_string(path).map_err(HandbookError::IoError)
}

/// List `.md` documents in one category directory, excluding `README.md`.
pub fn list_docs(dir: &Path) -> Result<Vec<String>, HandbookError> {
    if !dir.is_dir() {
        return Err(HandbookError::NotFound(format!(
            "category directory: {}",
            dir.display()
        )));
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if entry.path().is_file() && is_doc_name(&name) {
            names.push(name);
        }
    }
    Ok(names)
}
