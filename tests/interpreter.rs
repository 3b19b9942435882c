use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

fn nook(home: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_nook"));
    command
        .current_dir(home)
        .env("HOME", home)
        .env("TERM", "xterm")
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    command
}

fn run_session(home: &Path, input: &str) -> Output {
    let mut child = nook(home).spawn().expect("spawn nook");

    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(input.as_bytes())
        .expect("write session input");

    child.wait_with_output().expect("wait for nook")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn exit_terminates_with_success() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = run_session(home.path(), "exit\necho unreachable\n");

    assert!(output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains("unreachable"));
}

#[test]
fn end_of_input_terminates_with_success() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = run_session(home.path(), "echo hello\n");

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["hello"]);
}

#[test]
fn missing_program_is_reported_and_loop_continues() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = run_session(home.path(), "nook-missing-program arg\necho still-here\nexit\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("command not found: nook-missing-program"));
    assert_eq!(stdout_lines(&output), ["still-here"]);
}

#[test]
fn detached_job_prints_pid_without_blocking() {
    let home = tempfile::tempdir().expect("tempdir");
    let start = Instant::now();

    // The detached sleep inherits stdout, so read the announcement directly
    // instead of waiting for the pipe to close.
    let mut child = nook(home.path())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn nook");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(b"sleep 5 &\nexit\n")
        .expect("write session input");

    let mut line = String::new();
    BufReader::new(child.stdout.take().expect("piped stdout"))
        .read_line(&mut line)
        .expect("read job line");
    let status = child.wait().expect("wait for nook");

    assert!(start.elapsed() < Duration::from_secs(4));
    assert!(status.success());

    let pid: i32 = line
        .trim_end()
        .strip_prefix("Job ")
        .and_then(|pid| pid.parse().ok())
        .expect("Job <pid> line");
    assert!(pid > 0);

    let _ = Command::new("kill").arg(pid.to_string()).status();
}

#[test]
fn foreground_command_blocks() {
    let home = tempfile::tempdir().expect("tempdir");
    let start = Instant::now();
    let output = run_session(home.path(), "sleep 1\necho done\nexit\n");

    assert!(start.elapsed() >= Duration::from_millis(900));
    assert_eq!(stdout_lines(&output), ["done"]);
}

#[test]
fn cd_exports_pwd_to_children() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = run_session(home.path(), "cd /\nprintenv PWD\npwd\nexit\n");

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["/", "/"]);
}

#[test]
fn cd_without_argument_toggles() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = run_session(home.path(), "cd /\ncd /usr\ncd\npwd\ncd -\npwd\nexit\n");

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["/", "/usr"]);
}

#[test]
fn cd_home_and_failure_continue() {
    let home = tempfile::tempdir().expect("tempdir");
    let real_home = home.path().canonicalize().expect("canonical home");
    let output = run_session(home.path(), "cd /\ncd /no/such/dir\npwd\ncd ~\npwd\nexit\n");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cd: /no/such/dir"));
    assert_eq!(
        stdout_lines(&output),
        ["/".to_string(), real_home.to_string_lossy().into_owned()]
    );
}

#[test]
fn blank_lines_are_ignored() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = run_session(home.path(), "\n   \n\t\necho ok\n");

    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    assert_eq!(stdout_lines(&output), ["ok"]);
}

#[test]
fn cd_exports_normalized_pwd() {
    let home = tempfile::tempdir().expect("tempdir");
    let output = run_session(home.path(), "cd /tmp/../usr\nprintenv PWD\ncd ./lib/..\nprintenv PWD\nexit\n");

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["/usr", "/usr"]);
}

#[test]
fn cd_recovers_from_removed_directory() {
    let home = tempfile::tempdir().expect("tempdir");
    let gone = home.path().join("gone");
    std::fs::create_dir(&gone).expect("create dir");
    let input = format!("cd {}\nrmdir {}\ncd /\npwd\nexit\n", gone.display(), gone.display());
    let output = run_session(home.path(), &input);

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output), ["/"]);
}

#[test]
fn closed_stdout_does_not_abort() {
    let home = tempfile::tempdir().expect("tempdir");
    let mut child = nook(home.path())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn nook");
    drop(child.stdout.take());

    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(b"sleep 1 &\nexit\n")
        .expect("write session input");

    let status = child.wait().expect("wait for nook");
    assert!(status.success());
}
