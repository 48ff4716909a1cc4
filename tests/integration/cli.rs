mod common;

use common::{interfacer_bin, sample_tree};

fn write_config(tree: &common::GoTree, extra: &str) -> std::path::PathBuf {
    tree.write(
        "interfacer.toml",
        &format!("goroot = \".\"\ngopath = [\"no-gopath\"]\ngoos = \"linux\"\ngoarch = \"amd64\"\n{extra}"),
    );
    tree.path("interfacer.toml")
}

#[test]
fn prints_one_line_per_method() {
    let tree = sample_tree();
    let config = write_config(&tree, "");
    let output = interfacer_bin().arg("--config").arg(&config).arg("pkg.ReadCloser").output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Read(p []byte) (n int, err error)\nClose() error\n"
    );
}

#[test]
fn json_output() {
    let tree = sample_tree();
    let config = write_config(&tree, "");
    let output = interfacer_bin()
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .arg("pkg.Handler")
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["name"], "Serve");
    assert_eq!(value[0]["params"][0]["name"], "");
    assert_eq!(value[0]["params"][0]["type"], "pkg.ResponseWriter");
    assert_eq!(value[0]["params"][1]["type"], "*pkg.Request");
}

#[test]
fn index_resolver_from_config() {
    let tree = sample_tree();
    let config = write_config(&tree, "resolver = \"index\"\n\n[imports]\npkg = \"pkg\"\n");
    let output = interfacer_bin().arg("--config").arg(&config).arg("pkg.Closer").output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Close() error\n");
}

#[test]
fn errors_exit_non_zero() {
    let tree = sample_tree();
    let config = write_config(&tree, "");
    let output = interfacer_bin().arg("--config").arg(&config).arg("pkg.Nonexistent").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("type Nonexistent not found in pkg"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn bad_config_is_reported() {
    let tree = sample_tree();
    let config = write_config(&tree, "resolver = \"psychic\"\n");
    let output = interfacer_bin().arg("--config").arg(&config).arg("pkg.Closer").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error[config]"));
}

#[test]
fn verbose_shows_skipped_files() {
    let tree = sample_tree();
    tree.file("pkg/aaa_broken.go", "package pkg\n\ntype Broken interface {\n");
    let config = write_config(&tree, "");
    let output = interfacer_bin()
        .arg("--config")
        .arg(&config)
        .arg("--verbose")
        .arg("pkg.Handler")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Serve(pkg.ResponseWriter, *pkg.Request)\n");
    assert!(String::from_utf8_lossy(&output.stderr).contains("aaa_broken.go"));
}
