//! Handbook: engineering guardrails as a distributable package.
//!
//! This crate is the tooling around a markdown handbook (a global policy
//! document, agent persona docs, playbooks, and a project template):
//!
//! - **Accessors**: read policy/agent/template/playbook text from a resolved
//!   install layout, uncached.
//! - **Inheritance**: copy the handbook's agent documents into a consumer
//!   repo's `.claude/agents/` directory, overwrite semantics, never aborting
//!   the batch on a single bad document.
//! - **Publish gates**: fail-fast validation of the package manifest
//!   (`handbook.json`) against a deployment variant's constraint table.
//! - **Policy check**: verify a consumer CLAUDE.md declares
//!   `Inherits: @handbook/guardrails`.
//!
//! # Examples
//!
//! ```bash
//! # Print the global policy
//! handbook policy
//!
//! # Copy agent docs into the current repo
//! handbook inherit
//!
//! # Publish gate, proprietary deployment
//! handbook validate manifest --variant proprietary
//! ```
//!
//! # Crate Structure
//!
//! - [`core`]: install layout, accessors, copier, manifest gates, policy check

pub mod core;

use crate::core::config::InstallLayout;
use crate::core::error::HandbookError;
use crate::core::library::Handbook;
use crate::core::{inherit, manifest, output, policy_check};

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(
    name = "handbook",
    version = env!("CARGO_PKG_VERSION"),
    about = "Engineering guardrails handbook: document accessors, agent inheritance, and publish-gate validation."
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct RootOpt {
    /// Handbook content root (overrides HANDBOOK_ROOT and the vendored copy).
    #[clap(long)]
    root: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
struct ListCli {
    /// Category to list.
    #[clap(value_enum)]
    category: ListCategory,
    /// Output format: 'text' or 'json'.
    #[clap(long, default_value = "text")]
    format: String,
    #[clap(flatten)]
    root: RootOpt,
}

#[derive(Debug, Clone, clap::ValueEnum)]
enum ListCategory {
    Agents,
    Playbooks,
}

#[derive(clap::Args, Debug)]
struct InheritCli {
    /// Source agents directory (defaults to the resolved handbook's agents/).
    #[clap(long)]
    source: Option<PathBuf>,
    /// Target directory (defaults to .claude/agents in the working directory).
    #[clap(long)]
    target: Option<PathBuf>,
    #[clap(flatten)]
    root: RootOpt,
}

#[derive(clap::Args, Debug)]
struct ValidateCli {
    #[clap(subcommand)]
    command: ValidateCommand,
}

#[derive(Subcommand, Debug)]
enum ValidateCommand {
    /// Run the publish gates over the package manifest.
    Manifest {
        /// Manifest path (defaults to ./handbook.json).
        #[clap(long)]
        manifest: Option<PathBuf>,
        /// Deployment variant whose constraint table applies.
        #[clap(long, value_enum, default_value = "proprietary")]
        variant: manifest::Variant,
        #[clap(flatten)]
        root: RootOpt,
    },
    /// Check a consumer document for the inheritance declaration.
    Policy {
        /// Path to the consumer's CLAUDE.md (or any policy document).
        file: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a policy document from the content root (default: CLAUDE_GLOBAL.md).
    Policy {
        /// Policy filename at the content root.
        name: Option<String>,
        #[clap(flatten)]
        root: RootOpt,
    },
    /// Print one agent document (the .md suffix is optional).
    Agent {
        name: String,
        #[clap(flatten)]
        root: RootOpt,
    },
    /// Print the project template (templates/CLAUDE.template.md).
    Template {
        #[clap(flatten)]
        root: RootOpt,
    },
    /// List available documents in a category.
    List(ListCli),
    /// Copy handbook agent documents into a consumer repo.
    Inherit(InheritCli),
    /// Publish-time validation gates.
    Validate(ValidateCli),
    /// Print the package version.
    Version,
}

pub fn run() -> Result<(), HandbookError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Policy { name, root } => {
            let handbook = Handbook::new(InstallLayout::resolve(root.root.as_deref())?);
            print!("{}", handbook.policy(name.as_deref())?);
            Ok(())
        }
        Command::Agent { name, root } => {
            let handbook = Handbook::new(InstallLayout::resolve(root.root.as_deref())?);
            print!("{}", handbook.agent(&name)?);
            Ok(())
        }
        Command::Template { root } => {
            let handbook = Handbook::new(InstallLayout::resolve(root.root.as_deref())?);
            print!("{}", handbook.template()?);
            Ok(())
        }
        Command::List(args) => run_list(args),
        Command::Inherit(args) => run_inherit(args),
        Command::Validate(args) => match args.command {
            ValidateCommand::Manifest {
                manifest,
                variant,
                root,
            } => run_validate_manifest(manifest, variant, root.root),
            ValidateCommand::Policy { file } => run_validate_policy(&file),
        },
    }
}

fn run_list(args: ListCli) -> Result<(), HandbookError> {
    let handbook = Handbook::new(InstallLayout::resolve(args.root.root.as_deref())?);
    let (label, names) = match args.category {
        ListCategory::Agents => ("agents", handbook.available_agents()?),
        ListCategory::Playbooks => ("playbooks", handbook.available_playbooks()?),
    };

    if args.format == "json" {
        let payload = serde_json::json!({
            "category": label,
            "documents": names,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if names.is_empty() {
        println!("no {} documents found", label);
        return Ok(());
    }
    for name in names {
        println!("  - {}", name.trim_end_matches(".md"));
    }
    Ok(())
}

fn run_inherit(args: InheritCli) -> Result<(), HandbookError> {
    let source = inherit::resolve_source_dir(args.source.as_deref(), args.root.root.as_deref())?;
    let target = match args.target {
        Some(t) => t,
        None => std::env::current_dir()?.join(inherit::DEFAULT_TARGET),
    };

    println!("Inheriting handbook agents");
    println!("  source: {}", source.display());
    println!("  target: {}", target.display());
    println!();

    let report = inherit::inherit_agents(&source, &target)?;

    for name in &report.copied {
        println!("  {} inherited: {}", "✓".green(), name);
    }
    for failure in &report.failed {
        eprintln!(
            "  {} failed: {}: {}",
            "✗".red(),
            failure.name,
            output::compact_reason(&failure.reason, 120)
        );
    }

    println!();
    println!(
        "{} {} agent(s) inherited",
        "✓".green().bold(),
        report.copied_count()
    );
    if !report.failed.is_empty() {
        let reasons: Vec<String> = report
            .failed
            .iter()
            .map(|f| format!("{}: {}", f.name, f.reason))
            .collect();
        eprintln!(
            "{} {} failed: {}",
            "✗".red().bold(),
            report.failed.len(),
            output::preview_failures(&reasons, 4, 80)
        );
    }

    let present = inherit::list_target(&target)?;
    if !present.is_empty() {
        println!();
        println!("Available agents:");
        for name in present {
            println!("  - {}", name.trim_end_matches(".md"));
        }
    }
    Ok(())
}

fn run_validate_manifest(
    manifest_path: Option<PathBuf>,
    variant: manifest::Variant,
    root: Option<PathBuf>,
) -> Result<(), HandbookError> {
    let path = match manifest_path {
        Some(p) => p,
        None => std::env::current_dir()?.join("handbook.json"),
    };
    let m = manifest::Manifest::load(&path)?;

    // The open-source table checks the content tree, so it needs a layout;
    // the proprietary table is metadata-only and must not require one.
    let layout = match variant {
        manifest::Variant::OpenSource => Some(InstallLayout::resolve(root.as_deref())?),
        manifest::Variant::Proprietary => None,
    };

    println!("Validating handbook package manifest ({})...", path.display());

    match manifest::validate_manifest(&m, variant, layout.as_ref()) {
        Ok(gates) => {
            println!("{} all {} gates passed", "✓".green().bold(), gates.len());
            println!("{} {}@{} ready to publish", "✓".green(), m.name, m.version);
            if let Some(registry) = m.publish_config.as_ref().and_then(|pc| pc.registry.as_deref())
            {
                println!("{} publishes to: {}", "✓".green(), registry);
            }
            Ok(())
        }
        Err(HandbookError::ValidationError(msg)) => {
            eprintln!("{} {}", "✗".red().bold(), msg);
            std::process::exit(1);
        }
        Err(e) => Err(e),
    }
}

fn run_validate_policy(file: &std::path::Path) -> Result<(), HandbookError> {
    if !file.is_file() {
        return Err(HandbookError::NotFound(format!("{}", file.display())));
    }
    let text = std::fs::read_to_string(file)?;
    let check = policy_check::validate_policy(&text);

    if check.valid {
        if check.warning {
            println!("{} policy inheritance found", "✓".green().bold());
            eprintln!("{} {}", "⚠".yellow().bold(), check.message);
        } else {
            println!("{} {}", "✓".green().bold(), check.message);
        }
        Ok(())
    } else {
        eprintln!("{} {}", "✗".red().bold(), check.message);
        std::process::exit(1);
    }
}
