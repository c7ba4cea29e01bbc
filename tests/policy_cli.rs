use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_handbook(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_handbook"))
        .current_dir(dir)
        .args(args)
        .output()
        .expect("run handbook")
}

#[test]
fn first_line_declaration_exits_zero_without_warning() {
    let tmp = TempDir::new().expect("tmpdir");
    let file = tmp.path().join("CLAUDE.md");
    fs::write(&file, "Inherits: @handbook/guardrails\n\n# Rules\n").expect("write");

    let out = run_handbook(tmp.path(), &["validate", "policy", "CLAUDE.md"]);
    assert!(out.status.success());
    assert!(out.stderr.is_empty(), "unexpected stderr: {}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn declaration_elsewhere_exits_zero_with_warning_on_stderr() {
    let tmp = TempDir::new().expect("tmpdir");
    let file = tmp.path().join("CLAUDE.md");
    fs::write(&file, "# Rules\n\nInherits: @handbook/guardrails\n").expect("write");

    let out = run_handbook(tmp.path(), &["validate", "policy", "CLAUDE.md"]);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("first line"), "got: {}", stderr);
}

#[test]
fn missing_declaration_exits_nonzero_with_corrective_message() {
    let tmp = TempDir::new().expect("tmpdir");
    let file = tmp.path().join("CLAUDE.md");
    fs::write(&file, "# Rules\n\nNothing declared here.\n").expect("write");

    let out = run_handbook(tmp.path(), &["validate", "policy", "CLAUDE.md"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("Inherits: @handbook/guardrails"),
        "got: {}",
        stderr
    );
}

#[test]
fn missing_file_is_fatal() {
    let tmp = TempDir::new().expect("tmpdir");
    let out = run_handbook(tmp.path(), &["validate", "policy", "absent.md"]);
    assert!(!out.status.success());
}
