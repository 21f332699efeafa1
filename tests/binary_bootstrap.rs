use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::tempdir;

const ANSWERS: &str = "Search returns nothing
Searching for an existing product returns no results
Type 'lamp' into the search box and press Enter
Matching lamps are listed
An empty result page is shown
Desktop
Firefox
Linux
Low

yes
";

#[test]
fn plain_report_with_no_config_submits_to_default_outbox() {
    let dir = tempdir().expect("tempdir");
    let home = dir.path();

    let mut child = Command::new(env!("CARGO_BIN_EXE_bugdesk"))
        .args(["report", "--plain"])
        .env("HOME", home)
        .env("USER", "tester")
        .env_remove("BUGDESK_CONFIG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn binary");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(ANSWERS.as_bytes())
        .expect("write answers");
    let output = child.wait_with_output().expect("wait binary");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("bugdesk> Thanks! Your bug report was submitted as bug-"));
    assert!(stdout.trim_end().ends_with("status=submitted"));

    let outbox = home.join(".bugdesk/outbox");
    let files = std::fs::read_dir(&outbox)
        .expect("outbox dir")
        .filter_map(Result::ok)
        .count();
    assert_eq!(files, 1);
    assert!(home.join(".bugdesk/logs/intake.log").is_file());
}

#[test]
fn unknown_command_exits_non_zero() {
    let output = Command::new(env!("CARGO_BIN_EXE_bugdesk"))
        .arg("frobnicate")
        .output()
        .expect("run binary");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown command `frobnicate`"));
}
