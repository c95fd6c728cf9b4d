//! Integration tests for the intcode CLI.

use intcode_cli as _;
use intcode_core as _;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_intcode"))
}

fn create_temp_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run_with_stdin(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(binary_path())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run intcode");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

const EQUALS_8: &str = "3,9,8,9,10,9,4,9,99,-1,8\n";

#[test]
fn input_list_drives_program_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    let program = create_temp_file(temp_dir.path(), "eq8.txt", EQUALS_8);

    let output = Command::new(binary_path())
        .args([program.to_str().unwrap(), "-i", "8"])
        .output()
        .expect("failed to run intcode");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "1\n");
}

#[test]
fn stdin_lines_feed_input_instructions() {
    let temp_dir = tempfile::tempdir().unwrap();
    let program = create_temp_file(temp_dir.path(), "echo.txt", "3,0,4,0,3,0,4,0,99");

    let output = run_with_stdin(&[program.to_str().unwrap()], "12\n-7\n");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "12\n-7\n");
}

#[test]
fn dump_reports_memory_and_result() {
    let temp_dir = tempfile::tempdir().unwrap();
    let program = create_temp_file(temp_dir.path(), "add.txt", "1,0,0,0,99");

    let output = Command::new(binary_path())
        .args([program.to_str().unwrap(), "--dump"])
        .output()
        .expect("failed to run intcode");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("memory: {0: 2, 1: 0, 2: 0, 3: 0, 4: 99}"));
    assert!(stderr.contains("result: 2"));
}

#[test]
fn trace_and_stats_go_to_stderr() {
    let temp_dir = tempfile::tempdir().unwrap();
    let program = create_temp_file(temp_dir.path(), "eq8.txt", EQUALS_8);

    let output = Command::new(binary_path())
        .args([program.to_str().unwrap(), "-i", "3", "--trace", "--stats"])
        .output()
        .expect("failed to run intcode");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("    0: IN   -> @9"));
    assert!(stderr.contains("    8: HALT"));
    assert!(stderr.contains("instructions: 4"));
}

#[test]
fn invalid_opcode_exits_with_fault_and_memory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let program = create_temp_file(temp_dir.path(), "bad.txt", "1,0,0,0,50");

    let output = Command::new(binary_path())
        .arg(program.to_str().unwrap())
        .output()
        .expect("failed to run intcode");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid opcode: 50 @4"));
    assert!(stderr.contains("memory: {0: 2,"));
}

#[test]
fn exhausted_input_is_a_fault_not_a_crash() {
    let temp_dir = tempfile::tempdir().unwrap();
    let program = create_temp_file(temp_dir.path(), "eq8.txt", EQUALS_8);

    let output = run_with_stdin(&[program.to_str().unwrap()], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("input exhausted"));
}

#[test]
fn step_limit_stops_infinite_loops() {
    let temp_dir = tempfile::tempdir().unwrap();
    let program = create_temp_file(temp_dir.path(), "loop.txt", "1105,1,0");

    let output = Command::new(binary_path())
        .args([program.to_str().unwrap(), "--max-steps", "100"])
        .output()
        .expect("failed to run intcode");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("step limit exceeded: 100 @0"));
}

#[test]
fn malformed_program_fails_to_load() {
    let temp_dir = tempfile::tempdir().unwrap();
    let program = create_temp_file(temp_dir.path(), "bad.txt", "1,2,three");

    let output = Command::new(binary_path())
        .arg(program.to_str().unwrap())
        .output()
        .expect("failed to run intcode");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("malformed program: token 2"));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_file_fails_to_load() {
    let temp_dir = tempfile::tempdir().unwrap();
    let missing = temp_dir.path().join("nope.txt");

    let output = Command::new(binary_path())
        .arg(missing.to_str().unwrap())
        .output()
        .expect("failed to run intcode");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("could not read program"));
}

#[test]
fn usage_errors_exit_with_two() {
    let output = Command::new(binary_path())
        .output()
        .expect("failed to run intcode");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing program path"));
    assert!(stderr.contains("Usage: intcode"));
}

#[test]
fn help_prints_usage() {
    let output = Command::new(binary_path())
        .arg("--help")
        .output()
        .expect("failed to run intcode");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--max-steps"));
}
