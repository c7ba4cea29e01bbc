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

fn write_manifest(dir: &Path, json: &serde_json::Value) {
    fs::write(
        dir.join("handbook.json"),
        serde_json::to_string_pretty(json).expect("render manifest"),
    )
    .expect("write manifest");
}

fn proprietary_manifest() -> serde_json::Value {
    serde_json::json!({
        "name": "@handbook/guardrails",
        "version": "0.3.1",
        "license": "UNLICENSED",
        "publishConfig": {
            "registry": "https://npm.pkg.github.com/",
            "access": "restricted"
        },
        "files": ["CLAUDE_GLOBAL.md", "agents/", "templates/", "playbooks/"]
    })
}

fn seed_content_root(root: &Path) {
    fs::create_dir_all(root.join("agents")).expect("agents");
    fs::create_dir_all(root.join("templates")).expect("templates");
    fs::create_dir_all(root.join("playbooks")).expect("playbooks");
    fs::write(root.join("CLAUDE_GLOBAL.md"), "# policy\n").expect("policy");
    fs::write(root.join("agents/reviewer.md"), "# reviewer\n").expect("agent");
    fs::write(root.join("templates/CLAUDE.template.md"), "# template\n").expect("template");
    fs::write(root.join("playbooks/refactor.md"), "# playbook\n").expect("playbook");
}

#[test]
fn conformant_manifest_passes_and_prints_name_version() {
    let tmp = TempDir::new().expect("tmpdir");
    write_manifest(tmp.path(), &proprietary_manifest());

    let out = run_handbook(tmp.path(), &["validate", "manifest"]);
    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("@handbook/guardrails@0.3.1"), "got: {}", stdout);
    assert!(stdout.contains("https://npm.pkg.github.com/"), "got: {}", stdout);
}

#[test]
fn missing_required_file_exits_nonzero_and_names_exactly_it() {
    let tmp = TempDir::new().expect("tmpdir");
    let mut manifest = proprietary_manifest();
    manifest["files"] = serde_json::json!(["CLAUDE_GLOBAL.md", "agents/", "templates/"]);
    write_manifest(tmp.path(), &manifest);

    let out = run_handbook(tmp.path(), &["validate", "manifest"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("playbooks/"), "got: {}", stderr);
    assert!(!stderr.contains("agents/"), "got: {}", stderr);
}

#[test]
fn wrong_license_fails_the_license_gate() {
    let tmp = TempDir::new().expect("tmpdir");
    let mut manifest = proprietary_manifest();
    manifest["license"] = serde_json::json!("MIT");
    write_manifest(tmp.path(), &manifest);

    let out = run_handbook(tmp.path(), &["validate", "manifest"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("UNLICENSED"), "got: {}", stderr);
}

#[test]
fn private_true_fails_for_registry_publishing() {
    let tmp = TempDir::new().expect("tmpdir");
    let mut manifest = proprietary_manifest();
    manifest["private"] = serde_json::json!(true);
    write_manifest(tmp.path(), &manifest);

    let out = run_handbook(tmp.path(), &["validate", "manifest"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("private"), "got: {}", stderr);
}

#[test]
fn only_the_first_violation_is_reported() {
    let tmp = TempDir::new().expect("tmpdir");
    let mut manifest = proprietary_manifest();
    manifest["name"] = serde_json::json!("guardrails");
    manifest["license"] = serde_json::json!("MIT");
    write_manifest(tmp.path(), &manifest);

    let out = run_handbook(tmp.path(), &["validate", "manifest"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("@handbook/"), "got: {}", stderr);
    assert!(!stderr.contains("UNLICENSED"), "got: {}", stderr);
}

#[test]
fn open_source_variant_checks_the_content_tree() {
    let tmp = TempDir::new().expect("tmpdir");
    let content_root = tmp.path().join("handbook");
    seed_content_root(&content_root);
    write_manifest(
        tmp.path(),
        &serde_json::json!({
            "name": "@handbook/guardrails",
            "version": "0.3.1",
            "license": "Apache-2.0",
            "publishConfig": {
                "registry": "https://registry.npmjs.org/",
                "access": "public"
            },
            "files": ["CLAUDE_GLOBAL.md", "agents/", "templates/", "playbooks/"]
        }),
    );

    let root = content_root.to_string_lossy().to_string();
    let ok = run_handbook(
        tmp.path(),
        &["validate", "manifest", "--variant", "open-source", "--root", &root],
    );
    assert!(
        ok.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&ok.stderr)
    );

    // Removing the fixed template must fail the template-present gate.
    fs::remove_file(content_root.join("templates/CLAUDE.template.md")).expect("remove template");
    let bad = run_handbook(
        tmp.path(),
        &["validate", "manifest", "--variant", "open-source", "--root", &root],
    );
    assert!(!bad.status.success());
    let stderr = String::from_utf8_lossy(&bad.stderr);
    assert!(stderr.contains("CLAUDE.template.md"), "got: {}", stderr);
}

#[test]
fn missing_manifest_file_is_fatal() {
    let tmp = TempDir::new().expect("tmpdir");
    let out = run_handbook(tmp.path(), &["validate", "manifest"]);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("handbook.json"), "got: {}", stderr);
}
