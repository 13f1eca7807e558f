// Reproducibility tests at the CLI boundary.
//
// Verify that the binary produces byte-identical output for identical
// input, that diagnostics go to stderr rather than stdout, and that exit
// codes follow the documented contract (0 ok, 1 denied warnings, 2 I/O).

use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicUsize, Ordering};

fn mmc_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_mmc"))
}

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// Write a unique temp .mmd file with the given contents.
fn temp_source(contents: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = std::env::temp_dir().join(format!("mmc_repro_{}_{}.mmd", std::process::id(), n));
    std::fs::write(&path, contents).expect("failed to write temporary source");
    path
}

fn run_mmc(args: &[&str]) -> Output {
    Command::new(mmc_binary())
        .args(args)
        .output()
        .expect("failed to run mmc")
}

const MATERIAL: &str = "graph LR\n\
                        T[TextureSample] --> M[Multiply]\n\
                        C[Constant(0.5)] --> M\n\
                        M --> BaseColor\n";

#[test]
fn same_source_identical_json() {
    let source = temp_source(MATERIAL);
    let path = source.to_str().unwrap();

    let first = run_mmc(&[path, "--emit", "json"]);
    let second = run_mmc(&[path, "--emit", "json"]);

    assert!(first.status.success());
    assert_eq!(
        first.stdout, second.stdout,
        "JSON plan should be byte-identical across runs"
    );
    assert!(!first.stdout.is_empty());
}

#[test]
fn same_source_identical_plan_listing() {
    let source = temp_source(MATERIAL);
    let path = source.to_str().unwrap();

    let first = run_mmc(&[path]);
    let second = run_mmc(&[path]);

    assert_eq!(first.stdout, second.stdout);
    let listing = String::from_utf8(first.stdout).unwrap();
    assert!(listing.starts_with("create T TextureSample"));
}

#[test]
fn build_info_is_stable_and_hashes_source() {
    let source = temp_source(MATERIAL);
    let path = source.to_str().unwrap();

    let first = run_mmc(&[path, "--emit", "build-info"]);
    let second = run_mmc(&[path, "--emit", "build-info"]);
    assert_eq!(first.stdout, second.stdout);

    let other = temp_source("A[Constant(1)] --> BaseColor\n");
    let different = run_mmc(&[other.to_str().unwrap(), "--emit", "build-info"]);
    assert_ne!(first.stdout, different.stdout);

    let info = String::from_utf8(first.stdout).unwrap();
    assert!(info.contains("\"source_hash\""));
    assert!(info.contains("\"registry_fingerprint\""));
}

#[test]
fn warnings_go_to_stderr_not_stdout() {
    let source = temp_source("A[Foo]\nA --> B[Constant]\n");
    let out = run_mmc(&[source.to_str().unwrap()]);

    assert!(out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("W0200"));
    assert!(stderr.contains("W0400"));
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(!stdout.contains("warning"));
}

#[test]
fn deny_warnings_fails_dirty_input_only() {
    let dirty = temp_source("A -->\n");
    let out = run_mmc(&[dirty.to_str().unwrap(), "--deny-warnings"]);
    assert_eq!(out.status.code(), Some(1));

    let clean = temp_source(MATERIAL);
    let out = run_mmc(&[clean.to_str().unwrap(), "--deny-warnings"]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn missing_input_exits_2() {
    let out = run_mmc(&["/nonexistent/material.mmd"]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn output_flag_writes_file() {
    let source = temp_source(MATERIAL);
    let dest = std::env::temp_dir().join(format!("mmc_repro_out_{}.json", std::process::id()));

    let out = run_mmc(&[
        source.to_str().unwrap(),
        "--emit",
        "json",
        "-o",
        dest.to_str().unwrap(),
    ]);
    assert!(out.status.success());
    assert!(out.stdout.is_empty());

    let written = std::fs::read_to_string(&dest).unwrap();
    assert!(written.contains("\"op\": \"CreateNode\""));
}
