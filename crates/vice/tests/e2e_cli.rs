use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use testkit::{error_with_stack, incoming_request, line, sample_local_clock, warn_with_context};

fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_vice")
}

fn vice(config_dir: &Path) -> Command {
    let mut cmd = Command::new(bin());
    cmd.env("VICE_CONFIG", config_dir.join("absent.toml"))
        .env_remove("VICE_COLOR")
        .env_remove("VICE_SYMBOLS")
        .env_remove("VICE_DETAIL_THRESHOLD")
        .env_remove("VICE_QUIET_LEVELS")
        .arg("--color")
        .arg("never")
        .arg("--symbols")
        .arg("never");
    cmd
}

fn run_with_stdin(mut cmd: Command, input: &str) -> Output {
    let mut child = cmd
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn e2e_stdin_formats_records_and_passes_text_through() {
    let temp = tempfile::tempdir().unwrap();
    let input = format!(
        "{}\nnot json at all\n{}\n",
        line(&incoming_request()),
        line(&warn_with_context())
    );

    let output = run_with_stdin(vice(temp.path()), &input);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    let clock = sample_local_clock();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], format!("{clock} info [req-1] <-- GET /health"));
    assert_eq!(lines[1], "not json at all");
    assert!(lines[2].starts_with(&format!("{clock} warn billing invoices retrying charge")));
    assert!(lines[2].contains("customer.plan: pro"));
}

#[test]
fn e2e_dash_reads_stdin() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = vice(temp.path());
    cmd.arg("-");
    let output = run_with_stdin(cmd, "{\"level\":\"debug\",\"msg\":\"hi\"}");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "debug hi");
}

#[test]
fn e2e_file_input_renders_error_blocks() {
    let temp = tempfile::tempdir().unwrap();
    let log_path = temp.path().join("app.log");
    std::fs::write(&log_path, format!("{}\n", line(&error_with_stack()))).unwrap();

    let output = vice(temp.path()).arg(&log_path).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("error worker bad arg"));
    assert!(stdout.contains("         | TypeError:"));
    assert!(stdout.contains("         |   code: E_ARG"));
    assert!(stdout.contains("         | Stack trace:"));
    assert!(stdout.contains("         |    at parse (parser.js:10:5)"));
}

#[test]
fn e2e_detail_threshold_flag() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = vice(temp.path());
    cmd.arg("--detail-threshold").arg("5");
    let output = run_with_stdin(cmd, "{\"level\":40,\"msg\":\"m\",\"key\":\"value\"}\n");

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["warn m", "         |key: value"]);
}

#[test]
fn e2e_config_file_is_honoured() {
    let temp = tempfile::tempdir().unwrap();
    let config_path = temp.path().join("config.toml");
    std::fs::write(&config_path, "quiet_levels = [\"info\", \"warn\"]\n").unwrap();

    let mut cmd = vice(temp.path());
    cmd.env("VICE_CONFIG", &config_path);
    let output = run_with_stdin(cmd, "{\"level\":40,\"msg\":\"m\",\"key\":\"value\"}\n");

    assert_eq!(String::from_utf8_lossy(&output.stdout).trim_end(), "warn m");
}

#[test]
fn e2e_missing_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    let output = vice(temp.path())
        .arg(temp.path().join("nope.log"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("nope.log"));
}

#[test]
fn e2e_bad_config_fails() {
    let temp = tempfile::tempdir().unwrap();
    let config_path = temp.path().join("config.toml");
    std::fs::write(&config_path, "color = \"sometimes\"\n").unwrap();

    let output = vice(temp.path())
        .env("VICE_CONFIG", &config_path)
        .arg(temp.path().join("unused.log"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("configuration error"));
}
