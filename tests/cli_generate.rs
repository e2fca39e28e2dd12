//! End-to-end tests for `mkprops generate` and `mkprops inspect`
//!
//! These drive the built binary against saved dry-run logs and, on Unix,
//! small shell scripts standing in for `make`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn mkprops() -> Command {
    Command::new(env!("CARGO_BIN_EXE_mkprops"))
}

fn run(args: &[&str], dir: &Path) -> Output {
    mkprops()
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to execute mkprops")
}

fn read_properties(path: &Path) -> serde_json::Value {
    let content = fs::read_to_string(path).expect("properties file should exist");
    serde_json::from_str(&content).expect("properties file should be valid JSON")
}

fn canonical(path: &Path) -> String {
    path.canonicalize().unwrap().to_string_lossy().to_string()
}

fn default_output(dir: &Path) -> PathBuf {
    dir.join(".vscode").join("c_cpp_properties.json")
}

#[test]
fn test_generate_from_log() {
    let project = tempfile::tempdir().unwrap();
    fs::create_dir(project.path().join("inc")).unwrap();
    fs::write(
        project.path().join("dryrun.log"),
        "cc1 -foo\n/usr/bin/g++ -Iinc -DFOO=1 -std=c++17 -o a.out a.cpp\n",
    )
    .unwrap();

    let output = run(
        &["generate", "--input", "dryrun.log", "--no-probe", "--name", "Linux"],
        project.path(),
    );
    assert!(
        output.status.success(),
        "generate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value = read_properties(&default_output(project.path()));
    assert_eq!(value["version"], 4);
    let entry = &value["configurations"][0];
    assert_eq!(entry["name"], "Linux");
    assert_eq!(
        entry["includePath"],
        serde_json::json!([canonical(&project.path().join("inc"))])
    );
    assert_eq!(entry["defines"], serde_json::json!(["FOO=1"]));
    assert_eq!(entry["compilerPath"], "/usr/bin/g++");
    assert_eq!(entry["cStandard"], "");
    assert_eq!(entry["cppStandard"], "c++17");
}

#[test]
fn test_output_is_sorted() {
    let project = tempfile::tempdir().unwrap();
    for d in ["zlib", "app", "mid"] {
        fs::create_dir(project.path().join(d)).unwrap();
    }
    fs::write(
        project.path().join("dryrun.log"),
        "gcc -Izlib -DZED -Iapp -c a.c\ngcc -Imid -DALPHA=2 -Izlib -c b.c\n",
    )
    .unwrap();

    let output = run(
        &["generate", "-i", "dryrun.log", "--no-probe", "-o", "props.json"],
        project.path(),
    );
    assert!(output.status.success());

    let value = read_properties(&project.path().join("props.json"));
    let entry = &value["configurations"][0];
    assert_eq!(
        entry["includePath"],
        serde_json::json!([
            canonical(&project.path().join("app")),
            canonical(&project.path().join("mid")),
            canonical(&project.path().join("zlib")),
        ])
    );
    assert_eq!(entry["defines"], serde_json::json!(["ALPHA=2", "ZED"]));
}

#[test]
fn test_nothing_built_still_writes() {
    let project = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join("dryrun.log"),
        "make: Nothing to be done for 'all'.\n",
    )
    .unwrap();

    let output = run(
        &["generate", "-i", "dryrun.log", "--no-probe"],
        project.path(),
    );
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Nothing built"), "stderr: {}", stderr);

    let value = read_properties(&default_output(project.path()));
    let entry = &value["configurations"][0];
    assert_eq!(entry["includePath"], serde_json::json!([]));
    assert_eq!(entry["defines"], serde_json::json!([]));
    assert_eq!(entry["cStandard"], "");
    assert_eq!(entry["cppStandard"], "");
}

#[test]
fn test_empty_log_is_fatal() {
    let project = tempfile::tempdir().unwrap();
    fs::write(project.path().join("dryrun.log"), "\n").unwrap();

    let output = run(&["generate", "-i", "dryrun.log"], project.path());
    assert!(!output.status.success());
    assert!(!default_output(project.path()).exists());
}

#[test]
fn test_unwritable_output_is_fatal() {
    let project = tempfile::tempdir().unwrap();
    fs::write(project.path().join("dryrun.log"), "gcc -c a.c\n").unwrap();
    fs::write(project.path().join("blocker"), "").unwrap();

    let output = run(
        &[
            "generate",
            "-i",
            "dryrun.log",
            "--no-probe",
            "-o",
            "blocker/props.json",
        ],
        project.path(),
    );
    assert!(!output.status.success());
}

#[test]
fn test_inspect_does_not_write() {
    let project = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join("dryrun.log"),
        "clang -DINSPECTED -std=gnu11 -c a.c\n",
    )
    .unwrap();

    let output = run(
        &["inspect", "-i", "dryrun.log", "--no-probe"],
        project.path(),
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("INSPECTED"));
    assert!(stdout.contains("gnu11"));
    assert!(!project.path().join(".vscode").exists());
}

#[test]
fn test_config_file_is_respected() {
    let project = tempfile::tempdir().unwrap();
    fs::write(
        project.path().join("mkprops.toml"),
        "[output]\npath = \"ide/props.json\"\nname = \"Board\"\n\n[compilers]\nextra = [\"xc32-gcc\"]\n\n[probe]\nenabled = false\n",
    )
    .unwrap();
    fs::write(
        project.path().join("dryrun.log"),
        "/opt/xc32/bin/xc32-gcc -D__PIC32 -c main.c\n",
    )
    .unwrap();

    let output = run(&["generate", "-i", "dryrun.log"], project.path());
    assert!(output.status.success());

    let value = read_properties(&project.path().join("ide").join("props.json"));
    let entry = &value["configurations"][0];
    assert_eq!(entry["name"], "Board");
    assert_eq!(entry["compilerPath"], "/opt/xc32/bin/xc32-gcc");
    assert_eq!(entry["defines"], serde_json::json!(["__PIC32"]));
}

#[test]
fn test_doctor_rejects_broken_config() {
    let project = tempfile::tempdir().unwrap();
    fs::write(project.path().join("mkprops.toml"), "[probe]\nenabled = \"maybe\"\n").unwrap();

    let output = run(&["doctor"], project.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Invalid"));
}

#[cfg(unix)]
fn fake_make(dir: &Path, script_body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-make");
    fs::write(&path, format!("#!/bin/sh\n{}\n", script_body)).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn test_runs_build_tool_in_dry_run_mode() {
    let project = tempfile::tempdir().unwrap();
    fs::create_dir(project.path().join("include")).unwrap();
    let make = fake_make(
        project.path(),
        r#"[ "$1" = "-n" ] || exit 9
echo "gcc -Iinclude -DFROM_MAKE -std=c11 -c main.c""#,
    );

    let output = run(
        &["generate", "--make", make.to_str().unwrap(), "--no-probe"],
        project.path(),
    );
    assert!(
        output.status.success(),
        "generate failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let value = read_properties(&default_output(project.path()));
    let entry = &value["configurations"][0];
    assert_eq!(entry["defines"], serde_json::json!(["FROM_MAKE"]));
    assert_eq!(entry["cStandard"], "c11");
    assert_eq!(
        entry["includePath"],
        serde_json::json!([canonical(&project.path().join("include"))])
    );
}

#[cfg(unix)]
#[test]
fn test_failing_build_tool_writes_nothing() {
    let project = tempfile::tempdir().unwrap();
    let make = fake_make(
        project.path(),
        "echo 'gcc -c main.c'\necho 'make: *** [all] Error 2' >&2\nexit 2",
    );

    let output = run(
        &["generate", "--make", make.to_str().unwrap()],
        project.path(),
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exit code 2"), "stderr: {}", stderr);
    assert!(!default_output(project.path()).exists());
}
