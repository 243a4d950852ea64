#![forbid(unused_must_use)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

const BITS: &str = env!("CARGO_BIN_EXE_bits");
const CARGO_TARGET_TMPDIR: &str = env!("CARGO_TARGET_TMPDIR");

struct Case {
    case_tmp_dir: PathBuf,
}

fn case(case_name: &str) -> Case {
    let case_tmp_dir = Path::new(CARGO_TARGET_TMPDIR)
        .join("bits_tests")
        .join(case_name);

    println!("----- case: {} -----", case_name);
    println!("case_tmp_dir: {}", case_tmp_dir.display());

    std::fs::create_dir_all(&case_tmp_dir).unwrap();

    Case { case_tmp_dir }
}

impl Case {
    /// A `bits` command isolated from the user's settings and history.
    fn cmd(&self) -> Command {
        let mut cmd = Command::new(BITS);
        cmd.current_dir(&self.case_tmp_dir);
        cmd.env("HOME", &self.case_tmp_dir);
        cmd.env("XDG_CONFIG_HOME", self.case_tmp_dir.join("config"));
        cmd.env("XDG_STATE_HOME", self.case_tmp_dir.join("state"));
        cmd.env_remove("RUST_LOG");
        cmd.stdin(Stdio::null());
        cmd
    }

    fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.case_tmp_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn run(&self, args: &[&str]) -> Output {
        let mut cmd = self.cmd();
        cmd.args(args);
        output_of(cmd)
    }

    fn run_with_stdin(&self, args: &[&str], stdin: &str) -> Output {
        let mut cmd = self.cmd();
        cmd.args(args);
        cmd.stdin(Stdio::piped());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        println!("Spawning process: {:?}", cmd);
        let mut child = cmd.spawn().expect("Failed to spawn bits");
        child
            .stdin
            .take()
            .unwrap()
            .write_all(stdin.as_bytes())
            .unwrap();
        child.wait_with_output().expect("Failed to wait for bits")
    }
}

fn output_of(mut cmd: Command) -> Output {
    println!("Spawning process: {:?}", cmd);
    let output = cmd.output().expect("Failed to run bits");
    println!("stdout: {}", String::from_utf8_lossy(&output.stdout));
    println!("stderr: {}", String::from_utf8_lossy(&output.stderr));
    output
}

#[track_caller]
fn expect_stdout(output: &Output, expected: &str) {
    assert!(output.status.success(), "bits failed: {:?}", output.status);
    assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
}

#[track_caller]
fn expect_failure(output: &Output, message: &str) {
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(message),
        "expected {:?} in stderr: {}",
        message,
        stderr
    );
}

#[test]
fn arguments_are_the_script() {
    let c = case("arguments_are_the_script");
    expect_stdout(&c.run(&["2", "3", "+"]), "5 (uint64)\n");
    expect_stdout(&c.run(&["2 3 +"]), "5 (uint64)\n");
    expect_stdout(&c.run(&["-c", "5", "2", "-"]), "3 (uint64)\n");
}

#[test]
fn negative_numbers_are_not_flags() {
    let c = case("negative_numbers_are_not_flags");
    expect_stdout(&c.run(&["-1", "2", "+"]), "1 (int64)\n");
    expect_stdout(&c.run(&["-q", "-1", "p"]), "-1 (int64)\n");
}

#[test]
fn faults_end_batch_sessions() {
    let c = case("faults_end_batch_sessions");
    let output = c.run(&["1", "0", "/"]);
    expect_failure(&output, "integer divide by zero");
    assert!(output.stdout.is_empty());

    expect_failure(&c.run(&["1", "foo"]), "syntax error");
    expect_failure(&c.run(&["+"]), "stack underflow");
}

#[test]
fn quiet_skips_summary() {
    let c = case("quiet_skips_summary");
    expect_stdout(&c.run(&["-q", "1", "2"]), "");
}

#[test]
fn display_replaces_summary() {
    let c = case("display_replaces_summary");
    expect_stdout(&c.run(&["1", "p"]), "1 (uint64)\n");
    expect_stdout(&c.run(&["1", "2", "l"]), "1: 1 (uint64)\n0: 2 (uint64)\n");
    // Values pushed after the display bring the summary back.
    expect_stdout(&c.run(&["1", "p", "2", "+"]), "1 (uint64)\n3 (uint64)\n");
}

#[test]
fn summary_dumps_deeper_stacks() {
    let c = case("summary_dumps_deeper_stacks");
    let output = c.run(&["1", "2"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("1: type\tuint64\n   dec\t1\n"), "{}", stdout);
    assert!(stdout.contains("0: type\tuint64\n   dec\t2\n"), "{}", stdout);
}

#[test]
fn empty_script() {
    let c = case("empty_script");
    expect_stdout(&c.run(&["-c"]), "(empty)\n");
}

#[test]
fn stdin_lines() {
    let c = case("stdin_lines");
    let output = c.run_with_stdin(&[], "1 2 +\n# comment\n3 *\n");
    expect_stdout(&output, "9 (uint64)\n");

    // The first fault ends a piped session too.
    let output = c.run_with_stdin(&[], "1\n0 /\n5\n");
    expect_failure(&output, "integer divide by zero");
}

#[test]
fn script_files() {
    let c = case("script_files");
    let first = c.write("first.rpn", "0x10\n// sixteen\n");
    let second = c.write("second.rpn", "0x20 +\n");

    expect_stdout(
        &c.run(&["-f", first.to_str().unwrap(), second.to_str().unwrap()]),
        "48 (uint64)\n",
    );
}

#[test]
fn single_file_argument() {
    let c = case("single_file_argument");
    c.write("seven", "3 4 +\n");
    expect_stdout(&c.run(&["seven"]), "7 (uint64)\n");
    // Unless `-c` says the arguments are the script.
    expect_failure(&c.run(&["-c", "seven"]), "syntax error");
}

#[test]
fn missing_script_file() {
    let c = case("missing_script_file");
    expect_failure(&c.run(&["-f", "nowhere.rpn"]), "failed to open");
}

#[test]
fn settings_file() {
    let c = case("settings_file");
    let quiet = c.write("quiet.toml", "quiet = true\n");
    expect_stdout(&c.run(&["--config", quiet.to_str().unwrap(), "1", "2"]), "");

    c.write("config/bits/config.toml", "");
    expect_stdout(&c.run(&["1"]), "1 (uint64)\n");

    let bad = c.write("bad.toml", "quiet = \"very\"\n");
    expect_failure(&c.run(&["--config", bad.to_str().unwrap(), "1"]), "invalid settings file");
}
