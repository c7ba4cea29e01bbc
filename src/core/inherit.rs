//! Agent inheritance: distribute handbook agent documents into a consumer repo.
//!
//! Copy semantics are deliberately blunt: last write wins, no diffing, no
//! provenance tracking. Re-running with unchanged sources leaves the target
//! byte-identical, so individual copy failures are recoverable by re-running.
//! A single bad document must not block distribution of the rest, so per-item
//! read/write failures are recorded and the batch continues.

use crate::core::config::InstallLayout;
use crate::core::error::HandbookError;
use crate::core::library;
use std::fs;
use std::path::{Path, PathBuf};

/// Conventional target directory, relative to the consumer's working directory.
pub const DEFAULT_TARGET: &str = ".claude/agents";

/// One document that failed to copy, with a human-readable reason.
#[derive(Debug, Clone)]
pub struct CopyFailure {
    pub name: String,
    pub reason: String,
}

/// Aggregate outcome of one inheritance run.
#[derive(Debug, Default)]
pub struct InheritReport {
    pub copied: Vec<String>,
    pub failed: Vec<CopyFailure>,
}

impl InheritReport {
    pub fn copied_count(&self) -> usize {
        self.copied.len()
    }
}

/// Resolve the source agents directory. An explicit directory wins; otherwise
/// the install-layout resolution chain (seeded with `root`, when given)
/// supplies it. Fatal if nothing exists.
pub fn resolve_source_dir(
    explicit: Option<&Path>,
    root: Option<&Path>,
) -> Result<PathBuf, HandbookError> {
    if let Some(dir) = explicit {
        if !dir.is_dir() {
            return Err(HandbookError::PathError(format!(
                "source directory does not exist: {}",
                dir.display()
            )));
        }
        return Ok(dir.to_path_buf());
    }

    let layout = InstallLayout::resolve(root)?;
    let agents = layout.agents_dir();
    if !agents.is_dir() {
        return Err(HandbookError::PathError(format!(
            "resolved handbook root has no agents directory: {}",
            agents.display()
        )));
    }
    Ok(agents)
}

/// Copy every agent document from `source` into `target`.
///
/// Ensures `target` exists (idempotent), then writes each `.md` document
/// unconditionally under its own name. Failures never abort the batch.
pub fn inherit_agents(source: &Path, target: &Path) -> Result<InheritReport, HandbookError> {
    fs::create_dir_all(target)?;

    let mut names = library::list_docs(source)?;
    // Listing order is platform-dependent; copy order does not matter
    // (every write is independent), so it is left as-is.
    let mut report = InheritReport::default();

    for name in names.drain(..) {
        let source_path = source.join(&name);
        let target_path = target.join(&name);

        match copy_one(&source_path, &target_path) {
            Ok(()) => report.copied.push(name),
            Err(e) => report.failed.push(CopyFailure {
                name,
                reason: e.to_string(),
            }),
        }
    }

    Ok(report)
}

fn copy_one(source: &Path, target: &Path) -> Result<(), HandbookError> {
    // Full read-then-write rather than fs::copy: overwrite semantics should
    // replace content without inheriting source permission bits.
    let content = fs::read_to_string(source)?;
    fs::write(target, content)?;
    Ok(())
}

/// Document names present at the target after a run. May include files from
/// prior runs or unrelated sources — provenance is not tracked.
pub fn list_target(target: &Path) -> Result<Vec<String>, HandbookError> {
    if !target.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(target)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if entry.path().is_file() && name.ends_with(".md") {
            names.push(name);
        }
    }
    Ok(names)
}
