//! Publish-gate validation over the package manifest (`handbook.json`).
//!
//! This is a static precondition checker run at publish time, not a runtime
//! validator: it reads only the package's own metadata and content tree. The
//! deployment variants differ only in constraint *values*, so one ordered
//! evaluator runs a per-variant constraint table and reports the first
//! violation — never an aggregate of all of them.

use crate::core::config::{InstallLayout, RESERVED_README, TEMPLATE_FILE};
use crate::core::error::HandbookError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Package descriptor, the subset of keys the gates inspect.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub private: Option<bool>,
    #[serde(default, rename = "publishConfig")]
    pub publish_config: Option<PublishConfig>,
    #[serde(default)]
    pub files: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct PublishConfig {
    #[serde(default)]
    pub registry: Option<String>,
    #[serde(default)]
    pub access: Option<String>,
}

impl Manifest {
    pub fn load(path: &Path) -> Result<Self, HandbookError> {
        if !path.is_file() {
            return Err(HandbookError::NotFound(format!(
                "manifest: {}",
                path.display()
            )));
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Deployment target the package is being validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Variant {
    /// GitHub Package Registry, restricted access, proprietary license.
    Proprietary,
    /// Public npm registry, open license, plus on-disk content checks.
    OpenSource,
}

/// A single predicate over the manifest (or, for the open-source variant, the
/// content tree it describes).
#[derive(Debug)]
pub enum Check {
    NamePrefix(&'static str),
    RegistryEquals(&'static str),
    AccessEquals(&'static str),
    /// Registry publishing forbids `"private": true`.
    PrivateFlagAbsent,
    LicenseEquals(&'static str),
    /// Every listed name must appear in the manifest's `files` array; the
    /// failure message names exactly the missing subset.
    FilesInclude(&'static [&'static str]),
    /// Paths that must exist on disk, relative to the content root.
    PathsExist(&'static [&'static str]),
    /// At least one distributable agent document must exist.
    AgentsPresent,
    /// Exactly the fixed template file must exist under `templates/`.
    TemplatePresent,
}

/// One named gate in a variant's ordered constraint table.
#[derive(Debug)]
pub struct Constraint {
    pub gate: &'static str,
    pub check: Check,
    pub message: &'static str,
}

const REQUIRED_FILES: &[&str] = &["CLAUDE_GLOBAL.md", "agents/", "templates/", "playbooks/"];
const REQUIRED_PATHS: &[&str] = &["CLAUDE_GLOBAL.md", "agents", "templates", "playbooks"];

pub const SCOPE_PREFIX: &str = "@handbook/";
pub const GITHUB_REGISTRY: &str = "https://npm.pkg.github.com/";
pub const NPM_REGISTRY: &str = "https://registry.npmjs.org/";

impl Variant {
    /// The ordered constraint table for this deployment target. Order matters:
    /// only the first violation is ever reported per run.
    pub fn constraints(self) -> Vec<Constraint> {
        match self {
            Variant::Proprietary => vec![
                Constraint {
                    gate: "naming",
                    check: Check::NamePrefix(SCOPE_PREFIX),
                    message: "package name must start with @handbook/",
                },
                Constraint {
                    gate: "registry",
                    check: Check::RegistryEquals(GITHUB_REGISTRY),
                    message: "package must be configured for GitHub Package Registry",
                },
                Constraint {
                    gate: "access",
                    check: Check::AccessEquals("restricted"),
                    message: "package access must be restricted",
                },
                Constraint {
                    gate: "private-flag",
                    check: Check::PrivateFlagAbsent,
                    message: "remove \"private\": true for registry publishing",
                },
                Constraint {
                    gate: "license",
                    check: Check::LicenseEquals("UNLICENSED"),
                    message: "package must be UNLICENSED for proprietary content",
                },
                Constraint {
                    gate: "files",
                    check: Check::FilesInclude(REQUIRED_FILES),
                    message: "missing required entries in manifest files list",
                },
            ],
            Variant::OpenSource => vec![
                Constraint {
                    gate: "naming",
                    check: Check::NamePrefix(SCOPE_PREFIX),
                    message: "package name must start with @handbook/",
                },
                Constraint {
                    gate: "registry",
                    check: Check::RegistryEquals(NPM_REGISTRY),
                    message: "package must be configured for the public npm registry",
                },
                Constraint {
                    gate: "access",
                    check: Check::AccessEquals("public"),
                    message: "package access must be public",
                },
                Constraint {
                    gate: "private-flag",
                    check: Check::PrivateFlagAbsent,
                    message: "remove \"private\": true for registry publishing",
                },
                Constraint {
                    gate: "license",
                    check: Check::LicenseEquals("Apache-2.0"),
                    message: "package must be Apache-2.0 for open distribution",
                },
                Constraint {
                    gate: "files",
                    check: Check::FilesInclude(REQUIRED_FILES),
                    message: "missing required entries in manifest files list",
                },
                Constraint {
                    gate: "content-paths",
                    check: Check::PathsExist(REQUIRED_PATHS),
                    message: "required content paths missing on disk",
                },
                Constraint {
                    gate: "agents-present",
                    check: Check::AgentsPresent,
                    message: "at least one agent document must exist under agents/",
                },
                Constraint {
                    gate: "template-present",
                    check: Check::TemplatePresent,
                    message: "templates/CLAUDE.template.md must exist",
                },
            ],
        }
    }
}

/// Evaluate the variant's constraint table in order; `Err` carries the first
/// violated constraint's message. A passing run returns the gate names that
/// were checked, for the success summary.
pub fn validate_manifest(
    manifest: &Manifest,
    variant: Variant,
    layout: Option<&InstallLayout>,
) -> Result<Vec<&'static str>, HandbookError> {
    let mut passed = Vec::new();
    for constraint in variant.constraints() {
        if let Some(detail) = violation(manifest, &constraint.check, layout)? {
            return Err(HandbookError::ValidationError(format!(
                "{}: {}",
                constraint.message, detail
            )));
        }
        passed.push(constraint.gate);
    }
    Ok(passed)
}

/// `Ok(None)` means the check holds; `Ok(Some(detail))` is a violation with a
/// value-level detail appended to the constraint's message.
fn violation(
    manifest: &Manifest,
    check: &Check,
    layout: Option<&InstallLayout>,
) -> Result<Option<String>, HandbookError> {
    let outcome = match check {
        Check::NamePrefix(prefix) => (!manifest.name.starts_with(prefix))
            .then(|| format!("got \"{}\"", manifest.name)),
        Check::RegistryEquals(expected) => {
            let actual = manifest
                .publish_config
                .as_ref()
                .and_then(|pc| pc.registry.as_deref());
            (actual != Some(*expected))
                .then(|| format!("got {:?}", actual.unwrap_or("<unset>")))
        }
        Check::AccessEquals(expected) => {
            let actual = manifest
                .publish_config
                .as_ref()
                .and_then(|pc| pc.access.as_deref());
            (actual != Some(*expected)).then(|| format!("got {:?}", actual.unwrap_or("<unset>")))
        }
        Check::PrivateFlagAbsent => (manifest.private == Some(true))
            .then(|| "manifest sets \"private\": true".to_string()),
        Check::LicenseEquals(expected) => {
            let actual = manifest.license.as_deref();
            (actual != Some(*expected)).then(|| format!("got {:?}", actual.unwrap_or("<unset>")))
        }
        Check::FilesInclude(required) => {
            let missing: Vec<&str> = required
                .iter()
                .filter(|f| !manifest.files.iter().any(|have| have == **f))
                .copied()
                .collect();
            (!missing.is_empty()).then(|| missing.join(", "))
        }
        Check::PathsExist(required) => {
            let layout = require_layout(layout)?;
            let missing: Vec<&str> = required
                .iter()
                .filter(|p| !layout.root.join(p).exists())
                .copied()
                .collect();
            (!missing.is_empty()).then(|| missing.join(", "))
        }
        Check::AgentsPresent => {
            let layout = require_layout(layout)?;
            let agents = crate::core::library::list_docs(&layout.agents_dir())
                .unwrap_or_default();
            agents
                .is_empty()
                .then(|| format!("no non-{} documents found", RESERVED_README))
        }
        Check::TemplatePresent => {
            let layout = require_layout(layout)?;
            let path = layout.templates_dir().join(TEMPLATE_FILE);
            (!path.is_file()).then(|| format!("expected {}", path.display()))
        }
    };
    Ok(outcome)
}

fn require_layout<'a>(
    layout: Option<&'a InstallLayout>,
) -> Result<&'a InstallLayout, HandbookError> {
    layout.ok_or_else(|| {
        HandbookError::PathError(
            "on-disk content checks need a resolved handbook root (pass --root)".to_string(),
        )
    })
}
